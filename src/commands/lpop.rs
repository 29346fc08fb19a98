use crate::{
    commands::command_error::CommandError, key_value_store::KeyValueStore, resp::RespValue,
};

pub struct LpopArguments {
    key: String,
    /// `None` when no count was given; the reply is then a single bulk string.
    count: Option<usize>,
}

impl LpopArguments {
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.is_empty() || arguments.len() > 2 {
            return Err(CommandError::InvalidLPopCommand);
        }

        let count = match arguments.get(1) {
            Some(count) => Some(
                count
                    .parse::<usize>()
                    .map_err(|_| CommandError::InvalidLPopCommandArgument)?,
            ),
            None => None,
        };

        Ok(Self {
            key: arguments[0].clone(),
            count,
        })
    }
}

/// Handles the LPOP command.
///
/// Removes and returns one or more elements from the head of a list.
///
/// # Returns
///
/// * `Ok(String)` - A RESP-encoded response:
///   - Bulk string when no count is given
///   - Array of up to `count` elements when a count is given
///   - Null bulk string if the list is empty or doesn't exist
/// * `Err(CommandError::InvalidLPopCommand)` - If wrong number of arguments
/// * `Err(CommandError::InvalidLPopCommandArgument)` - If count is not a non-negative integer
///
/// # Examples
///
/// ```ignore
/// // LPOP mylist
/// // Returns: "$3\r\nval\r\n" (single element) or "$-1\r\n" (null if empty)
///
/// // LPOP mylist 3
/// // Returns: "*3\r\n$3\r\none\r\n$3\r\ntwo\r\n$5\r\nthree\r\n"
/// ```
pub async fn lpop(store: &KeyValueStore, arguments: Vec<String>) -> Result<String, CommandError> {
    let lpop_arguments = LpopArguments::parse(arguments)?;

    let Some(count) = lpop_arguments.count else {
        let mut popped = store.lists.pop(&lpop_arguments.key, 1).await;

        return match popped.pop() {
            Some(value) => Ok(RespValue::BulkString(value).encode()),
            None => Ok(RespValue::NullBulkString.encode()),
        };
    };

    let popped = store.lists.pop(&lpop_arguments.key, count).await;

    if popped.is_empty() && count > 0 {
        return Ok(RespValue::NullBulkString.encode());
    }

    Ok(RespValue::encode_array_from_strings(popped))
}
