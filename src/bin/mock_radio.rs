//! Mock radio control endpoint for integration testing
//!
//! Accepts TCP connections, prints each received command, and answers every
//! message with a fixed reply, so the proxy can be exercised without a real
//! radio process.
//!
//! Usage: `mock-radio [port] [reply]` - port 0 picks an ephemeral port, the
//! reply defaults to `ack1`. Pass a reply shorter than four bytes to provoke
//! short-reply handling in clients.

use std::io::{Read, Write};
use std::net::TcpListener;

fn main() {
    let mut args = std::env::args().skip(1);
    let port: u16 = args
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or(4005);
    let reply = args.next().unwrap_or_else(|| "ack1".to_string());

    let listener = TcpListener::bind(("127.0.0.1", port)).expect("failed to bind mock radio port");
    println!(
        "listening at: {}",
        listener.local_addr().expect("local addr")
    );

    for stream in listener.incoming() {
        let mut stream = match stream {
            Ok(s) => s,
            Err(_) => continue,
        };

        let mut buf = [0u8; 256];
        let n = stream.read(&mut buf).unwrap_or(0);
        if n == 0 {
            continue;
        }

        println!("received: {}", String::from_utf8_lossy(&buf[..n]));
        stream.write_all(reply.as_bytes()).ok();
    }
}
