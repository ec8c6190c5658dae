//! Keep-alive command example.
//!
//! The action binds a TCP listener and returns. Because the command is
//! marked keep-alive, `run` returns instead of exiting, and `main` goes on to
//! serve connections until the process is interrupted.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p command-tree-demos --example server -- --port 3000
//! curl http://127.0.0.1:3000/
//! ```

use std::cell::RefCell;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::rc::Rc;

use anyhow::Context;
use command_tree::Command;
use command_tree_core::{OptionSpec, ValueKind};

fn respond(stream: TcpStream) -> std::io::Result<()> {
    let mut request_line = String::new();
    BufReader::new(&stream).read_line(&mut request_line)?;

    let body = "hello from server\n";
    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 200 OK\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    )?;
    stream.flush()
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let bound: Rc<RefCell<Option<TcpListener>>> = Rc::default();
    let slot = Rc::clone(&bound);

    let server = Command::new("server")
        .description("Start a small HTTP server")
        .version("1.0.0")
        .option(
            OptionSpec::value("port", "Port to listen on")
                .alias("p")
                .kind(ValueKind::Number)
                .default_value(3000),
        )
        .option(OptionSpec::value("host", "Address to bind").default_value("127.0.0.1"))
        .keep_alive()
        .before(|_args, _options| {
            println!("starting server...");
            Ok(())
        })
        .action(move |_args, options, _cmd| {
            let host = options.get_str("host").unwrap_or("127.0.0.1");
            let port = options.get_number("port").unwrap_or(3000.0);
            anyhow::ensure!(
                port.fract() == 0.0 && (0.0..=65535.0).contains(&port),
                "invalid port: {port}"
            );

            let address = format!("{host}:{}", port as u16);
            let listener =
                TcpListener::bind(&address).with_context(|| format!("failed to bind {address}"))?;
            println!("listening on http://{address} (Ctrl+C to stop)");
            *slot.borrow_mut() = Some(listener);
            Ok(())
        })
        .after(|_args, _options| {
            println!("startup complete");
            Ok(())
        });

    // Help, version and failures exit inside `run`; only a completed
    // keep-alive run returns here.
    server.run();

    let Some(listener) = bound.borrow_mut().take() else {
        return;
    };
    for stream in listener.incoming() {
        match stream.and_then(respond) {
            Ok(()) => {}
            Err(err) => eprintln!("warning: connection failed: {err}"),
        }
    }
}
