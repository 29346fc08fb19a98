use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum StreamIdError {
    #[error("Invalid stream ID specified as stream command argument")]
    Invalid,
    #[error("The ID specified in XADD must be greater than 0-0")]
    BelowFloor,
    #[error("The ID specified in XADD is equal or smaller than the target stream top item")]
    NotMonotonic,
}

/// Identifier of a stream entry, ordered by milliseconds and then sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StreamId {
    pub ms: u64,
    pub seq: u64,
}

impl StreamId {
    pub const ZERO: StreamId = StreamId { ms: 0, seq: 0 };
    pub const MAX: StreamId = StreamId {
        ms: u64::MAX,
        seq: u64::MAX,
    };

    pub fn new(ms: u64, seq: u64) -> Self {
        Self { ms, seq }
    }

    /// Parses `<ms>-<seq>`, or a bare `<ms>` completed with `default_seq`.
    pub fn parse_with_default_sequence(input: &str, default_seq: u64) -> Result<Self, StreamIdError> {
        match input.split_once('-') {
            Some((ms, seq)) => Ok(Self::new(parse_part(ms)?, parse_part(seq)?)),
            None => Ok(Self::new(parse_part(input)?, default_seq)),
        }
    }

    /// Inclusive lower bound of an XRANGE query. `-` is the smallest id.
    pub fn parse_range_start(input: &str) -> Result<Self, StreamIdError> {
        match input {
            "-" => Ok(Self::ZERO),
            _ => Self::parse_with_default_sequence(input, 0),
        }
    }

    /// Inclusive upper bound of an XRANGE query. `+` is the largest id.
    pub fn parse_range_end(input: &str) -> Result<Self, StreamIdError> {
        match input {
            "+" => Ok(Self::MAX),
            _ => Self::parse_with_default_sequence(input, u64::MAX),
        }
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.ms, self.seq)
    }
}

fn parse_part(part: &str) -> Result<u64, StreamIdError> {
    part.parse::<u64>().map_err(|_| StreamIdError::Invalid)
}

/// The id argument of XADD before it is resolved against the stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IdRequest {
    /// `*`
    Auto,
    /// `<ms>-*`
    AutoSequence(u64),
    /// `<ms>-<seq>`
    Explicit(StreamId),
}

impl IdRequest {
    /// Parses the XADD id argument.
    ///
    /// # Returns
    ///
    /// * `Err(StreamIdError::Invalid)` - Not `*`, `<ms>-*` or `<ms>-<seq>`
    /// * `Err(StreamIdError::BelowFloor)` - An explicit `0-0`
    pub fn parse(input: &str) -> Result<Self, StreamIdError> {
        if input == "*" {
            return Ok(IdRequest::Auto);
        }

        let Some((ms, seq)) = input.split_once('-') else {
            return Err(StreamIdError::Invalid);
        };

        let ms = parse_part(ms)?;

        if seq == "*" {
            return Ok(IdRequest::AutoSequence(ms));
        }

        let id = StreamId::new(ms, parse_part(seq)?);

        if id == StreamId::ZERO {
            return Err(StreamIdError::BelowFloor);
        }

        Ok(IdRequest::Explicit(id))
    }

    /// Produces the concrete id for an append to a stream whose top item is
    /// `last`. `now_ms` is only consulted for [`IdRequest::Auto`].
    ///
    /// The resolved id is always strictly greater than `last` and than `0-0`.
    pub fn resolve(self, last: Option<StreamId>, now_ms: u64) -> Result<StreamId, StreamIdError> {
        match self {
            IdRequest::Explicit(id) => match last {
                Some(last) if id <= last => Err(StreamIdError::NotMonotonic),
                _ => Ok(id),
            },
            IdRequest::AutoSequence(ms) => match last {
                Some(last) if ms < last.ms => Err(StreamIdError::NotMonotonic),
                Some(last) if ms == last.ms => last
                    .seq
                    .checked_add(1)
                    .map(|seq| StreamId::new(ms, seq))
                    .ok_or(StreamIdError::NotMonotonic),
                _ if ms == 0 => Ok(StreamId::new(0, 1)),
                _ => Ok(StreamId::new(ms, 0)),
            },
            IdRequest::Auto => {
                // A clock that went backwards keeps appending under the top item's ms.
                let ms = last.map_or(now_ms, |last| last.ms.max(now_ms));

                IdRequest::AutoSequence(ms).resolve(last, now_ms)
            }
        }
    }
}
