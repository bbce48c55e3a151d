pub mod cli;
pub mod data;
pub mod server;
pub mod teams;
