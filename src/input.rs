//! Reading requests off a client socket.
//!
//! Bytes are accumulated in a [`BytesMut`] until at least one complete RESP
//! frame is available, so a request split across several TCP segments is
//! decoded exactly as if it had arrived in one read.

use bytes::BytesMut;
use thiserror::Error;
use tokio::io::AsyncReadExt;

use crate::resp::{RespError, RespValue, MAX_BULK_LENGTH};

/// Upper bound on buffered, not yet decoded request bytes per connection.
pub const MAX_BUFFERED_BYTES: usize = 2 * MAX_BULK_LENGTH;

/// Errors that can occur while reading and parsing commands from network streams.
#[derive(Error, Debug, PartialEq)]
pub enum CommandReadError {
    #[error("I/O error: {0}")]
    IoError(String),
    #[error("connection closed")]
    ConnectionClosed,
    #[error("connection closed in the middle of a frame")]
    TruncatedFrame,
    #[error("frame exceeds {} bytes", MAX_BUFFERED_BYTES)]
    FrameTooLarge,
    #[error("RESP parse error: {0}")]
    RespParseError(#[from] RespError),
}

/// Reads from `stream` until one or more complete RESP values are buffered.
///
/// All complete frames currently in the buffer are returned in arrival order;
/// any trailing partial frame stays in `buffer` for the next call.
///
/// # Returns
///
/// * `Err(CommandReadError::ConnectionClosed)` - The peer closed the socket between frames
/// * `Err(CommandReadError::TruncatedFrame)` - The peer closed the socket mid-frame
/// * `Err(CommandReadError::RespParseError)` - The bytes are not valid RESP
pub async fn read_and_parse_resp<R>(
    stream: &mut R,
    buffer: &mut BytesMut,
) -> Result<Vec<RespValue>, CommandReadError>
where
    R: AsyncReadExt + Unpin,
{
    loop {
        let values = drain_complete_frames(buffer)?;

        if !values.is_empty() {
            return Ok(values);
        }

        if buffer.len() > MAX_BUFFERED_BYTES {
            return Err(CommandReadError::FrameTooLarge);
        }

        let number_of_bytes = stream
            .read_buf(buffer)
            .await
            .map_err(|e| CommandReadError::IoError(e.to_string()))?;

        if number_of_bytes == 0 {
            return if buffer.is_empty() {
                Err(CommandReadError::ConnectionClosed)
            } else {
                Err(CommandReadError::TruncatedFrame)
            };
        }
    }
}

fn drain_complete_frames(buffer: &mut BytesMut) -> Result<Vec<RespValue>, CommandReadError> {
    let mut values = Vec::new();

    while let Some(value) = RespValue::parse(buffer)? {
        values.push(value);
    }

    Ok(values)
}
