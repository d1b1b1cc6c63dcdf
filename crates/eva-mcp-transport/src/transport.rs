//! Framed transport over a byte-stream pair.

use std::io::{Read, Write};

use log::{debug, trace, warn};

use eva_mcp_core::logging::targets;
use eva_mcp_protocol::{JsonRpcRequest, JsonRpcResponse, INTERNAL_PARSE_ERROR};

use crate::framed::{CodecError, Decoded, FrameCodec};

/// Outcome of a single `recv` call.
///
/// At most one message per call; `Skipped` means a frame with an unusable
/// `Content-Length` was discarded and the caller should read again.
#[derive(Debug)]
pub enum ReadOutcome {
    /// A decoded request (or the parse-error sentinel for an undecodable body).
    Message(JsonRpcRequest),
    /// A malformed frame was skipped without a response.
    Skipped,
    /// The input stream ended and no complete frame remains buffered.
    Eof,
}

/// Transport error types.
#[derive(Debug)]
pub enum TransportError {
    /// I/O error on the underlying streams.
    Io(std::io::Error),
    /// Framing error.
    Codec(CodecError),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Io(e) => write!(f, "I/O error: {e}"),
            TransportError::Codec(e) => write!(f, "Codec error: {e}"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Io(e) => Some(e),
            TransportError::Codec(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io(err)
    }
}

impl From<CodecError> for TransportError {
    fn from(err: CodecError) -> Self {
        TransportError::Codec(err)
    }
}

/// Framed transport over any `Read`/`Write` pair.
///
/// Production servers bind stdin/stdout via [`FramedTransport::stdio`];
/// tests supply in-memory buffers. Reads follow a pull model: buffered
/// bytes are always consumed to completion before the underlying stream is
/// asked for more, so frames that arrived before the stream closed are
/// still delivered after the close.
pub struct FramedTransport<R, W> {
    reader: R,
    writer: W,
    codec: FrameCodec,
}

impl<R: Read, W: Write> FramedTransport<R, W> {
    /// Creates a transport over a custom reader/writer pair.
    #[must_use]
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            codec: FrameCodec::new(),
        }
    }

    /// Returns a mutable reference to the codec, for configuring limits.
    pub fn codec_mut(&mut self) -> &mut FrameCodec {
        &mut self.codec
    }

    /// Reads the next frame from the input stream.
    ///
    /// A body that is not valid JSON is returned as a synthetic request
    /// with method `__internal_parse_error__`, no id, and the decoder's
    /// message in `params.message`; the dispatcher owns the error envelope.
    ///
    /// # Errors
    ///
    /// Returns `Io` on stream failure and `Codec` on an oversized frame.
    pub fn recv(&mut self) -> Result<ReadOutcome, TransportError> {
        let mut chunk = [0u8; 8192];
        loop {
            match self.codec.try_decode()? {
                Some(Decoded::Frame(body)) => {
                    trace!(target: targets::TRANSPORT, "frame received ({} bytes)", body.len());
                    return Ok(ReadOutcome::Message(parse_body(&body)));
                }
                Some(Decoded::Skip) => {
                    warn!(
                        target: targets::TRANSPORT,
                        "skipping frame without a usable Content-Length"
                    );
                    return Ok(ReadOutcome::Skipped);
                }
                None => {
                    let n = self.reader.read(&mut chunk)?;
                    if n == 0 {
                        if self.codec.has_buffered() {
                            debug!(
                                target: targets::TRANSPORT,
                                "input closed with a partial frame pending"
                            );
                        }
                        return Ok(ReadOutcome::Eof);
                    }
                    self.codec.push(&chunk[..n])?;
                }
            }
        }
    }

    /// Writes a framed response and flushes the output stream.
    ///
    /// # Errors
    ///
    /// Returns `Io` on stream failure, `Codec` on serialization failure.
    pub fn send(&mut self, response: &JsonRpcResponse) -> Result<(), TransportError> {
        let bytes = self.codec.encode(response)?;
        self.writer.write_all(&bytes)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl FramedTransport<std::io::Stdin, std::io::Stdout> {
    /// Creates a transport bound to the process's stdin/stdout.
    ///
    /// This is the primary constructor for servers running as a subprocess.
    /// Diagnostics must go to stderr; nothing but framed responses is ever
    /// written to stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(std::io::stdin(), std::io::stdout())
    }
}

/// Parses a frame body, falling back to the parse-error sentinel.
fn parse_body(body: &[u8]) -> JsonRpcRequest {
    match serde_json::from_slice::<JsonRpcRequest>(body) {
        Ok(request) => request,
        Err(e) => {
            debug!(target: targets::TRANSPORT, "undecodable frame body: {e}");
            JsonRpcRequest::notification(
                INTERNAL_PARSE_ERROR,
                Some(serde_json::json!({ "message": e.to_string() })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eva_mcp_protocol::RequestId;
    use std::io::Cursor;

    fn frame(json: &str) -> Vec<u8> {
        let mut bytes = format!("Content-Length: {}\r\n\r\n", json.len()).into_bytes();
        bytes.extend_from_slice(json.as_bytes());
        bytes
    }

    fn expect_message<R: Read, W: Write>(transport: &mut FramedTransport<R, W>) -> JsonRpcRequest {
        match transport.recv().unwrap() {
            ReadOutcome::Message(req) => req,
            other => panic!("expected message, got {other:?}"),
        }
    }

    /// A reader that hands out input a few bytes at a time, to exercise
    /// push-back buffering across chunk boundaries.
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        step: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let remaining = self.data.len() - self.pos;
            let n = remaining.min(self.step).min(buf.len());
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    #[test]
    fn receives_single_message() {
        let input = frame(r#"{"jsonrpc":"2.0","method":"initialize","id":1}"#);
        let mut transport = FramedTransport::new(Cursor::new(input), Vec::new());

        let req = expect_message(&mut transport);
        assert_eq!(req.method, "initialize");
        assert_eq!(req.id, Some(RequestId::Number(1)));
    }

    #[test]
    fn buffered_frames_survive_stream_close() {
        // All frames arrive before the close; each recv still yields
        // exactly one message, and the extra recv yields Eof.
        let mut input = Vec::new();
        for i in 1..=3 {
            input.extend(frame(&format!(
                r#"{{"jsonrpc":"2.0","method":"tools/list","id":{i}}}"#
            )));
        }
        let mut transport = FramedTransport::new(Cursor::new(input), Vec::new());

        for i in 1..=3 {
            let req = expect_message(&mut transport);
            assert_eq!(req.id, Some(RequestId::Number(i)));
        }
        assert!(matches!(transport.recv().unwrap(), ReadOutcome::Eof));
    }

    #[test]
    fn frames_split_across_tiny_chunks() {
        let mut input = Vec::new();
        input.extend(frame(r#"{"jsonrpc":"2.0","method":"a","id":1}"#));
        input.extend(frame(r#"{"jsonrpc":"2.0","method":"b","id":2}"#));
        let reader = Trickle {
            data: input,
            pos: 0,
            step: 3,
        };
        let mut transport = FramedTransport::new(reader, Vec::new());

        assert_eq!(expect_message(&mut transport).method, "a");
        assert_eq!(expect_message(&mut transport).method, "b");
        assert!(matches!(transport.recv().unwrap(), ReadOutcome::Eof));
    }

    #[test]
    fn empty_input_is_eof() {
        let mut transport = FramedTransport::new(Cursor::new(Vec::new()), Vec::new());
        assert!(matches!(transport.recv().unwrap(), ReadOutcome::Eof));
    }

    #[test]
    fn close_mid_header_is_eof() {
        let input = b"Content-Length: 10\r\n".to_vec();
        let mut transport = FramedTransport::new(Cursor::new(input), Vec::new());
        assert!(matches!(transport.recv().unwrap(), ReadOutcome::Eof));
    }

    #[test]
    fn close_mid_body_is_eof() {
        let input = b"Content-Length: 10\r\n\r\n{\"a\"".to_vec();
        let mut transport = FramedTransport::new(Cursor::new(input), Vec::new());
        assert!(matches!(transport.recv().unwrap(), ReadOutcome::Eof));
    }

    #[test]
    fn frame_without_length_is_skipped() {
        let mut input = b"X-Nothing: here\r\n\r\n".to_vec();
        input.extend(frame(r#"{"jsonrpc":"2.0","method":"after","id":9}"#));
        let mut transport = FramedTransport::new(Cursor::new(input), Vec::new());

        assert!(matches!(transport.recv().unwrap(), ReadOutcome::Skipped));
        assert_eq!(expect_message(&mut transport).method, "after");
    }

    #[test]
    fn invalid_json_body_becomes_parse_error_sentinel() {
        let input = frame("{not json");
        let mut transport = FramedTransport::new(Cursor::new(input), Vec::new());

        let req = expect_message(&mut transport);
        assert_eq!(req.method, INTERNAL_PARSE_ERROR);
        assert!(req.id.is_none());
        let params = req.params.unwrap();
        assert!(params["message"].as_str().unwrap().len() > 1);
    }

    #[test]
    fn send_writes_framed_response() {
        let mut transport = FramedTransport::new(Cursor::new(Vec::new()), Vec::new());
        let response = JsonRpcResponse::success(RequestId::Number(2), serde_json::json!({"ok": 1}));
        transport.send(&response).unwrap();

        let written = String::from_utf8(transport.writer.clone()).unwrap();
        assert!(written.starts_with("Content-Length: "));
        assert!(written.contains("\r\n\r\n"));
        assert!(written.contains("\"id\":2"));
    }

    #[test]
    fn write_then_read_roundtrip() {
        // Encode through one transport, decode through another.
        let mut sender = FramedTransport::new(Cursor::new(Vec::new()), Vec::new());
        let response = JsonRpcResponse::success(
            RequestId::String("r-1".into()),
            serde_json::json!({"content": [{"type": "text", "text": "hi"}]}),
        );
        sender.send(&response).unwrap();

        let mut codec = FrameCodec::new();
        codec.push(&sender.writer).unwrap();
        let Some(Decoded::Frame(body)) = codec.try_decode().unwrap() else {
            panic!("expected a complete frame");
        };
        let back: JsonRpcResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(back.id, Some(RequestId::String("r-1".into())));
        assert_eq!(back.result, response.result);
    }

    #[test]
    fn notification_has_no_id() {
        let input = frame(r#"{"jsonrpc":"2.0","method":"shutdown"}"#);
        let mut transport = FramedTransport::new(Cursor::new(input), Vec::new());
        let req = expect_message(&mut transport);
        assert!(req.is_notification());
    }

    #[test]
    fn oversized_frame_is_a_codec_error() {
        let mut input = b"Content-Length: 99\r\n\r\n".to_vec();
        input.extend(vec![b'x'; 99]);
        let mut transport = FramedTransport::new(Cursor::new(input), Vec::new());
        transport.codec_mut().set_max_frame_size(10);

        let result = transport.recv();
        assert!(matches!(
            result,
            Err(TransportError::Codec(CodecError::FrameTooLarge(_)))
        ));
    }
}
