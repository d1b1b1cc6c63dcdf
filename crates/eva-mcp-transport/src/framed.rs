//! Byte-level frame codec.
//!
//! A frame is one or more header lines terminated by CRLF, a single empty
//! CRLF line, then a body of exactly `Content-Length` bytes. Header names
//! are case-insensitive; only `Content-Length` is honored and other headers
//! are ignored. Incoming bytes are scanned for `0x0A` to delimit header
//! lines; bytes past a complete frame stay buffered for subsequent decodes.

use eva_mcp_protocol::JsonRpcResponse;

/// Threshold for compacting the buffer (consumed prefix beyond this is dropped).
const COMPACT_THRESHOLD: usize = 4096;

/// Slack allowed for header bytes on top of the frame-size cap.
const MAX_HEADER_BLOCK: usize = 8 * 1024;

/// Outcome of a decode attempt over the buffered bytes.
#[derive(Debug, PartialEq, Eq)]
pub enum Decoded {
    /// A complete frame body, ready for JSON parsing.
    Frame(Vec<u8>),
    /// A header block without a usable `Content-Length`; the block was
    /// discarded and no body was consumed.
    Skip,
}

/// Codec for `Content-Length` framed messages.
#[derive(Debug)]
pub struct FrameCodec {
    /// Buffer for incomplete frames.
    buffer: Vec<u8>,
    /// Read position in buffer (data before this has been consumed).
    read_pos: usize,
    /// Maximum allowed frame body size in bytes.
    max_frame_size: usize,
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCodec {
    /// Creates a new codec with default settings (10MB limit).
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            read_pos: 0,
            max_frame_size: 10 * 1024 * 1024,
        }
    }

    /// Returns the maximum allowed frame body size in bytes.
    #[must_use]
    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }

    /// Sets the maximum allowed frame body size in bytes.
    pub fn set_max_frame_size(&mut self, size: usize) {
        self.max_frame_size = size;
    }

    /// Returns true if undecoded bytes are buffered.
    #[must_use]
    pub fn has_buffered(&self) -> bool {
        self.read_pos < self.buffer.len()
    }

    /// Appends input bytes to the push-back buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the unread data would exceed the frame-size cap
    /// plus header slack; the buffer is cleared so the stream can resync.
    pub fn push(&mut self, data: &[u8]) -> Result<(), CodecError> {
        let unread = self.buffer.len() - self.read_pos;
        let projected = unread.saturating_add(data.len());
        if projected > self.max_frame_size.saturating_add(MAX_HEADER_BLOCK) {
            self.buffer.clear();
            self.read_pos = 0;
            return Err(CodecError::FrameTooLarge(projected));
        }
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    /// Attempts to decode one frame from the buffered bytes.
    ///
    /// Returns `None` when more input is needed: the header block is still
    /// incomplete, or the declared body has not fully arrived. A header
    /// block whose `Content-Length` is absent, non-numeric, zero, or
    /// negative is consumed and reported as [`Decoded::Skip`].
    ///
    /// # Errors
    ///
    /// Returns an error if the declared body length exceeds the cap; the
    /// buffer is cleared.
    pub fn try_decode(&mut self) -> Result<Option<Decoded>, CodecError> {
        let buf = &self.buffer[self.read_pos..];

        // Locate the end of the header block and the declared length.
        let mut cursor = 0;
        let mut declared: Option<i64> = None;
        let body_start = loop {
            let Some(offset) = buf[cursor..].iter().position(|&b| b == b'\n') else {
                // Header block incomplete.
                return Ok(None);
            };
            let nl = cursor + offset;
            let mut line = &buf[cursor..nl];
            if line.last() == Some(&b'\r') {
                line = &line[..line.len() - 1];
            }
            if line.is_empty() {
                break nl + 1;
            }
            if let Some(value) = header_value(line) {
                declared = std::str::from_utf8(value)
                    .ok()
                    .and_then(|s| s.trim().parse::<i64>().ok());
            }
            cursor = nl + 1;
        };

        let Some(length) = declared.filter(|n| *n > 0) else {
            self.consume(body_start);
            return Ok(Some(Decoded::Skip));
        };

        #[allow(clippy::cast_sign_loss)]
        let length = length as usize;
        if length > self.max_frame_size {
            self.buffer.clear();
            self.read_pos = 0;
            return Err(CodecError::FrameTooLarge(length));
        }

        if buf.len() - body_start < length {
            // Body incomplete; leave the header buffered and re-parse once
            // more bytes arrive.
            return Ok(None);
        }

        let body = buf[body_start..body_start + length].to_vec();
        self.consume(body_start + length);
        Ok(Some(Decoded::Frame(body)))
    }

    /// Encodes a response as a framed message.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(&self, response: &JsonRpcResponse) -> Result<Vec<u8>, CodecError> {
        let body = serde_json::to_vec(response)?;
        let mut bytes = format!("Content-Length: {}\r\n\r\n", body.len()).into_bytes();
        bytes.extend_from_slice(&body);
        Ok(bytes)
    }

    /// Clears the internal buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.read_pos = 0;
    }

    fn consume(&mut self, len: usize) {
        self.read_pos += len;
        if self.read_pos >= COMPACT_THRESHOLD {
            self.buffer.drain(..self.read_pos);
            self.read_pos = 0;
        }
    }
}

/// Returns the value bytes if the line is a `Content-Length` header.
fn header_value(line: &[u8]) -> Option<&[u8]> {
    let colon = line.iter().position(|&b| b == b':')?;
    let (name, rest) = line.split_at(colon);
    if name.eq_ignore_ascii_case(b"Content-Length") {
        Some(&rest[1..])
    } else {
        None
    }
}

/// Codec error types.
#[derive(Debug)]
pub enum CodecError {
    /// JSON serialization error.
    Json(serde_json::Error),
    /// Frame too large.
    FrameTooLarge(usize),
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::Json(e) => write!(f, "JSON error: {e}"),
            CodecError::FrameTooLarge(size) => write!(f, "Frame too large: {size} bytes"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Json(e) => Some(e),
            CodecError::FrameTooLarge(_) => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Json(err)
    }
}
