//! Connection Session Module
//!
//! Owns one client connection: reads newline-terminated requests, hands them
//! to the dispatcher, writes responses, and tears the connection down on
//! peer disconnect, write failure or an explicit exit command. Sessions
//! share state with each other only through the cache and store handles
//! inside the dispatcher.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::models::{Request, Response};
use crate::server::{Dispatch, Dispatcher};

// == Session ==
/// Per-connection worker state.
pub struct Session {
    stream: TcpStream,
    client_id: u64,
    dispatcher: Arc<Dispatcher>,
}

impl Session {
    // == Constructor ==
    /// Binds a freshly accepted connection to the shared dispatcher.
    pub fn new(stream: TcpStream, client_id: u64, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            stream,
            client_id,
            dispatcher,
        }
    }

    // == Run ==
    /// Request/response loop. Returns when the peer disconnects, a write
    /// fails, or an exit command is acknowledged.
    pub async fn run(self) {
        let client_id = self.client_id;
        let (read_half, mut write_half) = self.stream.into_split();
        let mut reader = BufReader::new(read_half);
        let mut line = String::new();

        debug!(client_id, "session started");

        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!(client_id, "peer disconnected");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    // Transport failure: no response is attempted
                    warn!(client_id, error = %e, "read failed, closing session");
                    break;
                }
            }

            let raw = line.trim();
            if raw.is_empty() {
                continue;
            }
            debug!(client_id, request = raw, "request received");

            let request: Request = match serde_json::from_str(raw) {
                Ok(request) => request,
                Err(e) => {
                    // Undecodable line: report it and keep the session open
                    debug!(client_id, error = %e, "undecodable request");
                    let reply = Response::error(format!("Malformed request: {e}"));
                    if write_response(&mut write_half, &reply, client_id).await.is_err() {
                        break;
                    }
                    continue;
                }
            };

            match self.dispatcher.dispatch(request).await {
                Dispatch::Reply(response) => {
                    if write_response(&mut write_half, &response, client_id).await.is_err() {
                        break;
                    }
                }
                Dispatch::Close(response) => {
                    // Best effort: the session ends either way
                    let _ = write_response(&mut write_half, &response, client_id).await;
                    info!(client_id, "session closed by client");
                    break;
                }
            }
        }

        debug!(client_id, "session finished");
    }
}

/// Writes one response as a single JSON line.
async fn write_response(
    writer: &mut OwnedWriteHalf,
    response: &Response,
    client_id: u64,
) -> std::io::Result<()> {
    // Serialization of our own DTOs cannot fail; fall back to a plain error
    // line rather than panicking if it ever does.
    let json = serde_json::to_string(response)
        .unwrap_or_else(|_| r#"{"status":"ERROR","content":"encoding failure"}"#.to_string());

    let result = async {
        writer.write_all(json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await
    }
    .await;

    if let Err(ref e) = result {
        warn!(client_id, error = %e, "write failed, closing session");
    }
    result
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;
    use tokio::sync::RwLock;

    use crate::auth::{TokenService, UserDirectory};
    use crate::cache::RecordCache;
    use crate::models::ResponseStatus;
    use crate::store::MemoryStore;

    async fn spawn_session() -> TcpStream {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let dispatcher = Arc::new(Dispatcher::new(
            Arc::new(RwLock::new(RecordCache::new(10, 60))),
            Arc::new(MemoryStore::new()),
            Arc::new(UserDirectory::new(Vec::new())),
            TokenService::new("test-secret", 60),
        ));

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            Session::new(stream, 1, dispatcher).run().await;
        });

        TcpStream::connect(addr).await.unwrap()
    }

    async fn round_trip(client: &mut TcpStream, line: &str) -> Response {
        client.write_all(line.as_bytes()).await.unwrap();
        client.write_all(b"\n").await.unwrap();

        let (read_half, _) = client.split();
        let mut reader = BufReader::new(read_half);
        let mut reply = String::new();
        reader.read_line(&mut reply).await.unwrap();
        serde_json::from_str(&reply).unwrap()
    }

    #[tokio::test]
    async fn test_malformed_line_gets_error_and_session_survives() {
        let mut client = spawn_session().await;

        let first = round_trip(&mut client, "this is not json").await;
        assert_eq!(first.status, ResponseStatus::Error);

        // The session must still answer a well-formed request afterwards
        let second = round_trip(
            &mut client,
            r#"{"type":"EXIT","createdAt":"2023-10-01T00:00:00Z"}"#,
        )
        .await;
        assert_eq!(second.status, ResponseStatus::Close);
    }

    #[tokio::test]
    async fn test_exit_acknowledged_then_connection_closes() {
        let mut client = spawn_session().await;

        let reply = round_trip(
            &mut client,
            r#"{"type":"EXIT","createdAt":"2023-10-01T00:00:00Z"}"#,
        )
        .await;
        assert_eq!(reply.status, ResponseStatus::Close);

        // After CLOSE the server side hangs up; the next read yields EOF
        let (read_half, _) = client.split();
        let mut reader = BufReader::new(read_half);
        let mut line = String::new();
        let n = reader.read_line(&mut line).await.unwrap();
        assert_eq!(n, 0);
    }

    #[tokio::test]
    async fn test_blank_lines_are_skipped() {
        let mut client = spawn_session().await;

        client.write_all(b"\n\n").await.unwrap();
        let reply = round_trip(
            &mut client,
            r#"{"type":"EXIT","createdAt":"2023-10-01T00:00:00Z"}"#,
        )
        .await;
        assert_eq!(reply.status, ResponseStatus::Close);
    }
}
