use thiserror::Error;

use crate::{resp::RespValue, stream_id::StreamIdError};

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Invalid command")]
    InvalidCommand,
    #[error("Invalid command argument")]
    InvalidCommandArgument,
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    #[error("Invalid PING command")]
    InvalidPingCommand,
    #[error("Invalid ECHO command")]
    InvalidEchoCommand,
    #[error("Invalid GET command")]
    InvalidGetCommand,
    #[error("Invalid SET command")]
    InvalidSetCommand,
    #[error("Invalid SET command argument")]
    InvalidSetCommandArgument,
    #[error("Invalid SET command expiration")]
    InvalidSetCommandExpiration,
    #[error("Invalid TYPE command")]
    InvalidTypeCommand,
    #[error("Invalid RPUSH command")]
    InvalidRPushCommand,
    #[error("Invalid LPUSH command")]
    InvalidLPushCommand,
    #[error("Invalid LRANGE command")]
    InvalidLRangeCommand,
    #[error("Invalid LRANGE command argument")]
    InvalidLRangeCommandArgument,
    #[error("Invalid LLEN command")]
    InvalidLLenCommand,
    #[error("Invalid LPOP command")]
    InvalidLPopCommand,
    #[error("Invalid LPOP command argument")]
    InvalidLPopCommandArgument,
    #[error("Invalid BLPOP command")]
    InvalidBLPopCommand,
    #[error("Invalid BLPOP command argument")]
    InvalidBLPopCommandArgument,
    #[error("Invalid XADD command")]
    InvalidXAddCommand,
    #[error("Invalid XRANGE command")]
    InvalidXRangeCommand,
    #[error("Invalid XREAD command")]
    InvalidXReadCommand,
    #[error("Invalid XREAD command option")]
    InvalidXReadOption,
    #[error("Invalid XREAD block duration")]
    InvalidXReadBlockDuration,
    #[error("{0}")]
    InvalidStreamId(#[from] StreamIdError),
    #[error("WRONGTYPE Operation against a key holding the wrong kind of value")]
    WrongType,
}

impl CommandError {
    pub fn as_resp(&self) -> RespValue {
        match self {
            CommandError::WrongType => RespValue::Error(self.to_string()),
            _ => RespValue::Error(format!("ERR {}", self)),
        }
    }

    pub fn as_string(&self) -> String {
        self.as_resp().encode()
    }
}
