//! Redis Serialization Protocol (RESP) values.
//!
//! Requests arrive as arrays of bulk strings; replies are built from the same
//! [`RespValue`] type and turned into wire bytes with [`RespValue::encode`].

use bytes::{Buf, BytesMut};
use thiserror::Error;

const CRLF: &[u8] = b"\r\n";

/// Largest bulk string a client may send.
pub const MAX_BULK_LENGTH: usize = 4 * 1024 * 1024;

/// Arrays nested deeper than this are rejected.
const MAX_NESTING_DEPTH: usize = 8;

#[derive(Error, Debug, PartialEq)]
pub enum RespError {
    #[error("not enough data is available to parse an entire frame")]
    Incomplete,
    #[error("unknown RESP type byte {0:#04x}")]
    UnknownRespType(u8),
    #[error("failed to parse integer")]
    InvalidInteger,
    #[error("invalid bulk string")]
    InvalidBulkString,
    #[error("invalid array")]
    InvalidArray,
    #[error("invalid UTF-8 sequence")]
    InvalidUtf8,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RespValue {
    SimpleString(String),
    Error(String),
    Integer(i64),
    BulkString(String),
    Array(Vec<RespValue>),
    NullBulkString,
    NullArray,
}

impl RespValue {
    /// Decodes one complete value from the front of `buffer`.
    ///
    /// Returns `Ok(None)` when the buffer holds only part of a frame; the
    /// buffer is left untouched so more bytes can be appended. On success the
    /// decoded bytes are removed from the buffer.
    pub fn parse(buffer: &mut BytesMut) -> Result<Option<RespValue>, RespError> {
        let mut position = 0;

        match Self::decode(&buffer[..], &mut position, 0) {
            Ok(value) => {
                buffer.advance(position);
                Ok(Some(value))
            }
            Err(RespError::Incomplete) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn decode(src: &[u8], position: &mut usize, depth: usize) -> Result<RespValue, RespError> {
        let line = read_line(src, position)?;

        let Some((&type_byte, content)) = line.split_first() else {
            return Err(RespError::UnknownRespType(0));
        };

        match type_byte {
            b'+' => Ok(RespValue::SimpleString(to_string(content)?)),
            b'-' => Ok(RespValue::Error(to_string(content)?)),
            b':' => Ok(RespValue::Integer(parse_integer(content)?)),
            b'$' => {
                let length = parse_integer(content)?;

                if length == -1 {
                    return Ok(RespValue::NullBulkString);
                }

                let length = usize::try_from(length)
                    .ok()
                    .filter(|&length| length <= MAX_BULK_LENGTH)
                    .ok_or(RespError::InvalidBulkString)?;
                let end = *position + length;

                if src.len() < end + CRLF.len() {
                    return Err(RespError::Incomplete);
                }

                if &src[end..end + CRLF.len()] != CRLF {
                    return Err(RespError::InvalidBulkString);
                }

                let data = to_string(&src[*position..end])?;
                *position = end + CRLF.len();

                Ok(RespValue::BulkString(data))
            }
            b'*' => {
                let count = parse_integer(content)?;

                if count == -1 {
                    return Ok(RespValue::NullArray);
                }

                if depth >= MAX_NESTING_DEPTH {
                    return Err(RespError::InvalidArray);
                }

                let count = usize::try_from(count).map_err(|_| RespError::InvalidArray)?;
                // Every element takes at least three bytes, so the buffer bounds the count.
                let mut elements = Vec::with_capacity(count.min(src.len() - *position));

                while elements.len() < count {
                    elements.push(Self::decode(src, position, depth + 1)?);
                }

                Ok(RespValue::Array(elements))
            }
            other => Err(RespError::UnknownRespType(other)),
        }
    }

    pub fn encode(&self) -> String {
        match self {
            RespValue::SimpleString(s) => format!("+{}\r\n", s),
            RespValue::Error(s) => format!("-{}\r\n", s),
            RespValue::Integer(i) => format!(":{}\r\n", i),
            RespValue::BulkString(s) => format!("${}\r\n{}\r\n", s.len(), s),
            RespValue::Array(elements) => {
                let mut encoded = format!("*{}\r\n", elements.len());

                for element in elements {
                    encoded.push_str(&element.encode());
                }

                encoded
            }
            RespValue::NullBulkString => "$-1\r\n".to_string(),
            RespValue::NullArray => "*-1\r\n".to_string(),
        }
    }

    /// Builds a flat array of bulk strings.
    pub fn bulk_string_array<I>(items: I) -> RespValue
    where
        I: IntoIterator<Item = String>,
    {
        RespValue::Array(items.into_iter().map(RespValue::BulkString).collect())
    }

    pub fn encode_array_from_strings(items: Vec<String>) -> String {
        Self::bulk_string_array(items).encode()
    }
}

fn read_line<'a>(src: &'a [u8], position: &mut usize) -> Result<&'a [u8], RespError> {
    let start = *position;

    let Some(offset) = src[start..]
        .windows(CRLF.len())
        .position(|window| window == CRLF)
    else {
        return Err(RespError::Incomplete);
    };

    *position = start + offset + CRLF.len();

    Ok(&src[start..start + offset])
}

fn to_string(bytes: &[u8]) -> Result<String, RespError> {
    std::str::from_utf8(bytes)
        .map(|s| s.to_string())
        .map_err(|_| RespError::InvalidUtf8)
}

fn parse_integer(bytes: &[u8]) -> Result<i64, RespError> {
    std::str::from_utf8(bytes)
        .map_err(|_| RespError::InvalidUtf8)?
        .parse::<i64>()
        .map_err(|_| RespError::InvalidInteger)
}
