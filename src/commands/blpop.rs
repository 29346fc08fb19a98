use std::time::Duration;

use tracing::debug;

use crate::{
    commands::command_error::CommandError, key_value_store::KeyValueStore, resp::RespValue,
};

#[derive(Debug, PartialEq)]
pub struct BlpopArguments {
    key: String,
    /// `None` blocks until an element arrives.
    timeout: Option<Duration>,
}

impl BlpopArguments {
    /// Parses `key timeout`, where the timeout is a non-negative number of
    /// seconds that may be fractional. A timeout of 0 never expires.
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() != 2 {
            return Err(CommandError::InvalidBLPopCommand);
        }

        let seconds = arguments[1]
            .parse::<f64>()
            .map_err(|_| CommandError::InvalidBLPopCommandArgument)?;

        if seconds < 0.0 {
            return Err(CommandError::InvalidBLPopCommandArgument);
        }

        let timeout = if seconds == 0.0 {
            None
        } else {
            Some(
                Duration::try_from_secs_f64(seconds)
                    .map_err(|_| CommandError::InvalidBLPopCommandArgument)?,
            )
        };

        Ok(Self {
            key: arguments[0].clone(),
            timeout,
        })
    }
}

/// Handles the BLPOP command.
///
/// Pops the head of the list, or waits for a push to the key if the list is
/// empty. Blocked clients are served in the order they arrived.
///
/// # Returns
///
/// * `Ok(String)` - Array of `[key, element]`, or a null array if the timeout expired first
/// * `Err(CommandError::InvalidBLPopCommand)` - If the number of arguments is not exactly 2
/// * `Err(CommandError::InvalidBLPopCommandArgument)` - If the timeout is not a non-negative number
pub async fn blpop(store: &KeyValueStore, arguments: Vec<String>) -> Result<String, CommandError> {
    let blpop_arguments = BlpopArguments::parse(arguments)?;

    let popped = store
        .lists
        .blocking_pop(&blpop_arguments.key, blpop_arguments.timeout)
        .await;

    match popped {
        Some(value) => Ok(RespValue::encode_array_from_strings(vec![
            blpop_arguments.key,
            value,
        ])),
        None => {
            debug!(key = %blpop_arguments.key, "BLPOP timed out");
            Ok(RespValue::NullArray.encode())
        }
    }
}
