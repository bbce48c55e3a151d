pub mod adjustments;
pub mod catalog;
pub mod character;
pub mod rules;
pub mod validate;
