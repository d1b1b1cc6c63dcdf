//! Framed byte-stream transport for the EVA MCP server.
//!
//! Messages are framed with a `Content-Length` header block:
//!
//! ```text
//! Content-Length: 52\r\n
//! \r\n
//! {"jsonrpc":"2.0","id":1,"method":"initialize"}
//! ```
//!
//! [`FrameCodec`] handles the byte-level framing with push-back buffering;
//! [`FramedTransport`] layers request decoding and response encoding over a
//! `Read`/`Write` pair (stdin/stdout in production, in-memory buffers in
//! tests).

#![forbid(unsafe_code)]

mod framed;
mod transport;

pub use framed::{CodecError, Decoded, FrameCodec};
pub use transport::{FramedTransport, ReadOutcome, TransportError};
