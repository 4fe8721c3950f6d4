// #![warn(missing_docs)]

//! Minimal websocket echo core.
//!
//! ## Features
//! - Upgrade handshake on a single route, with http error responses.
//! - Unfragmented, masked or unmasked text frames up to 65535 bytes.
//! - One complete frame in memory at a time, nothing buffered across frames.
//! - Blocking and async (tokio) drivers.
//!
//! ## High-level API
//!
//! - [`connection`]
//! - [`endpoint`]
//! - [`stream`]
//! - `server`, `broadcast` (feature `async`)
//!
//! ```ignore
//! {
//!     // handshake, then echo until the peer leaves
//!     let mut conn = Connection::new(Config::default());
//!     conn.accept(tcp)?;
//!     conn.run()?;
//!
//!     // or drive the stream directly
//!     let mut stream = Endpoint::accept(tcp, &mut buf, "/ws")?;
//!     let frame = stream.read_frame()?;
//!     stream.write_text(&frame.payload)?;
//! }
//! ```
//!
//! ## Low-level API
//!
//! - [`frame`]
//! - [`handshake`]
//!
//! Frame:
//!
//! ```ignore
//! {
//!     // encode a text frame head
//!     let head = FrameHead::text(payload.len())?;
//!     let offset = head.encode(&mut buf)?;
//!
//!     // decode a frame head
//!     let (head, offset) = FrameHead::decode(&buf)?;
//! }
//! ```
//!
//! Handshake:
//!
//! ```ignore
//! {
//!     // parse and validate a client request
//!     let (request, offset) = Request::decode(&buf)?;
//!     let sec_accept = request.negotiate()?;
//!
//!     // make the server response
//!     let offset = Response::new(&sec_accept).encode(&mut buf)?;
//! }
//! ```

mod bleed;

pub mod config;
pub mod error;
pub mod frame;
pub mod stream;
pub mod endpoint;
pub mod handshake;
pub mod connection;

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio")] {
        pub mod server;
        pub mod broadcast;
    }
}
