use crate::{
    commands::command_error::CommandError, key_value_store::KeyValueStore, resp::RespValue,
};

pub struct GetArguments {
    key: String,
}

impl GetArguments {
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() != 1 {
            return Err(CommandError::InvalidGetCommand);
        }

        Ok(Self {
            key: arguments[0].clone(),
        })
    }
}

/// Handles the GET command.
///
/// Retrieves the string stored under a key. An entry whose expiry has passed
/// is removed from the store and reported as missing.
///
/// # Returns
///
/// * `Ok(String)` - A RESP-encoded response:
///   - Bulk string containing the value if the key exists and hasn't expired
///   - Null bulk string if the key doesn't exist or has expired
/// * `Err(CommandError::InvalidGetCommand)` - If the number of arguments is not exactly 1
/// * `Err(CommandError::WrongType)` - If the key holds a stream
pub async fn get(store: &KeyValueStore, arguments: Vec<String>) -> Result<String, CommandError> {
    let get_arguments = GetArguments::parse(arguments)?;

    match store.strings.get(&get_arguments.key) {
        Some(value) => Ok(RespValue::BulkString(value).encode()),
        None if store.streams.has_entries(&get_arguments.key).await => {
            Err(CommandError::WrongType)
        }
        None => Ok(RespValue::NullBulkString.encode()),
    }
}
