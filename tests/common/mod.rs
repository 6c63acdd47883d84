#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const SHARE_ID: &str = "/subscriptions/sub-1/resourceGroups/rg1/providers/Microsoft.DataShare/accounts/acc1/shares/share1";
pub const DATA_SET_ID: &str = "/subscriptions/sub-1/resourceGroups/rg1/providers/Microsoft.DataShare/accounts/acc1/shares/share1/dataSets/ds1";

/// A one-shot HTTP server answering a single request with a canned response.
pub struct MockServer {
    pub endpoint: String,
    request_line: mpsc::Receiver<(String, Vec<String>)>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub fn respond(status: u16, body: &str) -> Self {
        Self::start(Some((status, body.to_string())))
    }

    /// Accepts the request but never answers it.
    pub fn stall() -> Self {
        Self::start(None)
    }

    fn start(response: Option<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let endpoint = format!("http://{}", listener.local_addr().expect("local addr"));
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("read request line");
            let mut headers = Vec::new();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("read header");
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                headers.push(line.trim_end().to_string());
            }
            let _ = tx.send((request_line.trim_end().to_string(), headers));

            match response {
                Some((status, body)) => {
                    let reply = format!(
                        "HTTP/1.1 {status} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    stream.write_all(reply.as_bytes()).expect("write response");
                    stream.flush().expect("flush");
                }
                None => thread::sleep(Duration::from_secs(3)),
            }
        });

        Self {
            endpoint,
            request_line: rx,
            handle,
        }
    }

    /// Request line and headers of the request the server received.
    pub fn received(self) -> (String, Vec<String>) {
        let received = self
            .request_line
            .recv_timeout(Duration::from_secs(5))
            .expect("server received a request");
        self.handle.join().expect("server thread");
        received
    }
}
