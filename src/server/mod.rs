//! Blocking HTTP front end. One request per connection: headers are read
//! until the blank line, then exactly `Content-Length` body bytes, looping
//! the reads so a body split across TCP segments arrives whole.

use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};

pub mod api;
pub mod routes;

const READ_CHUNK_BYTES: usize = 4_096;
const MAX_HEADER_BYTES: usize = 16_384;
const MAX_BODY_BYTES: usize = 1_048_576;

pub fn run_server(bind_addr: &str) -> io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    println!("teyvat server listening on http://{bind_addr}");

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream) {
                    eprintln!("request error: {err}");
                }
            }
            Err(err) => eprintln!("connection failed: {err}"),
        }
    }

    Ok(())
}

fn handle_connection(stream: &mut TcpStream) -> io::Result<()> {
    let Some(request) = read_request(stream)? else {
        return Ok(());
    };
    let response =
        routes::route_request(&request.method, &request.path, &request.body).to_http_string();
    stream.write_all(response.as_bytes())?;
    stream.flush()
}

#[derive(Debug, PartialEq, Eq)]
struct Request {
    method: String,
    path: String,
    body: String,
}

/// Read one request from the stream. `Ok(None)` means the peer closed the
/// connection without sending anything.
fn read_request<R: Read>(reader: &mut R) -> io::Result<Option<Request>> {
    let mut buffer: Vec<u8> = Vec::new();
    let mut chunk = [0_u8; READ_CHUNK_BYTES];

    let (head_len, body_start) = loop {
        if let Some(found) = find_header_end(&buffer) {
            break found;
        }
        if buffer.len() > MAX_HEADER_BYTES {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "request headers too large"));
        }
        let bytes_read = reader.read(&mut chunk)?;
        if bytes_read == 0 {
            if buffer.is_empty() {
                return Ok(None);
            }
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed before headers ended",
            ));
        }
        buffer.extend_from_slice(&chunk[..bytes_read]);
    };

    let head = String::from_utf8_lossy(&buffer[..head_len]).into_owned();
    let mut lines = head.lines();
    let mut request_parts = lines.next().unwrap_or_default().split_whitespace();
    let method = request_parts.next().unwrap_or("GET").to_string();
    let path = request_parts.next().unwrap_or("/").to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    if content_length > MAX_BODY_BYTES {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "request body too large"));
    }

    let mut body = buffer.split_off(body_start);
    while body.len() < content_length {
        let bytes_read = reader.read(&mut chunk)?;
        if bytes_read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed before body ended",
            ));
        }
        body.extend_from_slice(&chunk[..bytes_read]);
    }
    body.truncate(content_length);

    Ok(Some(Request {
        method,
        path,
        body: String::from_utf8_lossy(&body).into_owned(),
    }))
}

/// Position of the blank line separating headers from body, as
/// `(head length, body offset)`. Tolerates bare-LF requests.
fn find_header_end(buffer: &[u8]) -> Option<(usize, usize)> {
    if let Some(i) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
        return Some((i, i + 4));
    }
    buffer.windows(2).position(|window| window == b"\n\n").map(|i| (i, i + 2))
}
