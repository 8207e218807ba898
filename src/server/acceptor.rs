//! Connection Acceptor Module
//!
//! Accepts connections in a loop, assigns each an increasing client number,
//! and spawns an independent session task per connection so a slow or
//! misbehaving session never blocks acceptance of new ones.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::server::{Dispatcher, Session};

// == Serve ==
/// Accept loop. Runs until the listener fails; each accepted connection is
/// handled on its own task with the shared dispatcher.
pub async fn serve(listener: TcpListener, dispatcher: Arc<Dispatcher>) -> std::io::Result<()> {
    let client_seq = AtomicU64::new(0);

    loop {
        let (stream, peer) = listener.accept().await?;
        let client_id = client_seq.fetch_add(1, Ordering::SeqCst) + 1;
        info!(client_id, %peer, "connection accepted");

        let session = Session::new(stream, client_id, Arc::clone(&dispatcher));
        tokio::spawn(session.run());
    }
}
