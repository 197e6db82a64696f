//! HTTP transport behavior against a local one-shot server.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use stocklens::infra::fetch::{TransportError, fetch_url};

/// Serve one HTTP response on a random local port, then close.
fn one_shot_server(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let addr = listener.local_addr().expect("local addr");

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            // Drain the request head before answering
            let mut buf = [0u8; 4096];
            let mut head = Vec::new();
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => head.extend_from_slice(&buf[..n]),
                }
            }

            let response = format!(
                "{status_line}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).ok();
        }
    });

    format!("http://{addr}/inventario.csv")
}

#[test]
fn fetch_returns_the_body_on_200() {
    let url = one_shot_server(
        "HTTP/1.1 200 OK",
        "codigo,clave,desc_prod,inv\nA1,K1,Widget,3\n",
    );

    let text = fetch_url(&url).expect("fetch should succeed");
    assert!(text.starts_with("codigo,clave"));
    assert!(text.contains("Widget"));
}

#[test]
fn non_2xx_surfaces_as_a_status_error() {
    let url = one_shot_server("HTTP/1.1 404 Not Found", "gone");

    match fetch_url(&url) {
        Err(TransportError::Status { status }) => assert_eq!(status, 404),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[test]
fn refused_connection_is_a_transport_error() {
    // Grab a free port, then close the listener so the connect is refused
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    match fetch_url(&format!("http://{addr}/inventario.csv")) {
        Err(TransportError::Transport(_)) => {}
        other => panic!("expected transport error, got {other:?}"),
    }
}
