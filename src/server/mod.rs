//! Server Module
//!
//! Connection acceptance, per-connection sessions and command dispatch.
//!
//! Control flow: acceptor spawns a session per connection; the session reads
//! one line-delimited request at a time and hands it to the dispatcher,
//! which authenticates, routes to the cache/store, and produces exactly one
//! response.

mod acceptor;
mod dispatcher;
mod session;

pub use acceptor::serve;
pub use dispatcher::{Dispatch, Dispatcher};
pub use session::Session;
