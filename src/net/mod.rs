//! Connection setup: produce a byte-stream channel to the peer.

pub mod transport;

pub use transport::{accept_peer, bind_host, connect_peer, open_channel, Role};
