use std::time::Duration;

use crate::{
    commands::command_error::CommandError, key_value_store::KeyValueStore, resp::RespValue,
};

/// Represents the parsed arguments for the SET command
#[derive(Debug, PartialEq)]
pub struct SetArguments {
    /// The key name to store the value under
    key: String,
    /// The value to be stored under the given key
    value: String,
    /// How long the value lives; `None` keeps it forever
    ttl: Option<Duration>,
}

impl SetArguments {
    /// Parses command arguments into a SetArguments structure.
    ///
    /// Two formats are accepted:
    ///   - `[key, value]` - For permanent storage
    ///   - `[key, value, "PX", milliseconds]` - For expiring storage
    ///
    /// # Returns
    ///
    /// * `Ok(SetArguments)` - Successfully parsed arguments
    /// * `Err(CommandError::InvalidSetCommand)` - If the number of arguments is not 2 or 4
    /// * `Err(CommandError::InvalidSetCommandArgument)` - If the expiration option is not "PX"
    /// * `Err(CommandError::InvalidSetCommandExpiration)` - If the expiration time is not a valid integer
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let result = SetArguments::parse(vec![
    ///     "mykey".to_string(),
    ///     "hello".to_string(),
    ///     "PX".to_string(),
    ///     "1000".to_string()
    /// ]);
    /// // Returns: Ok(SetArguments { key: "mykey", value: "hello", ttl: Some(1s) })
    /// ```
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() != 2 && arguments.len() != 4 {
            return Err(CommandError::InvalidSetCommand);
        }

        let mut ttl: Option<Duration> = None;

        if arguments.len() == 4 {
            if arguments[2].to_lowercase() != "px" {
                return Err(CommandError::InvalidSetCommandArgument);
            }

            let Ok(milliseconds) = arguments[3].parse::<u64>() else {
                return Err(CommandError::InvalidSetCommandExpiration);
            };

            ttl = Some(Duration::from_millis(milliseconds));
        }

        Ok(Self {
            key: arguments[0].clone(),
            value: arguments[1].clone(),
            ttl,
        })
    }
}

/// Handles the SET command.
///
/// # Returns
///
/// * `Ok(String)` - `+OK` once the value is stored
/// * `Err(CommandError::WrongType)` - If the key holds a stream
pub async fn set(store: &KeyValueStore, arguments: Vec<String>) -> Result<String, CommandError> {
    let set_arguments = SetArguments::parse(arguments)?;

    if store.streams.has_entries(&set_arguments.key).await {
        return Err(CommandError::WrongType);
    }

    store
        .strings
        .set(set_arguments.key, set_arguments.value, set_arguments.ttl);

    Ok(RespValue::SimpleString("OK".to_string()).encode())
}
