use crate::{
    commands::command_error::CommandError, key_value_store::KeyValueStore, resp::RespValue,
};

/// Represents the parsed arguments for the LRANGE command.
#[derive(Debug, PartialEq)]
pub struct LrangeArguments {
    /// The key name to retrieve from the store
    key: String,
    /// The starting index for the range (can be negative to count from the end)
    start_index: i64,
    /// The ending index for the range, inclusive (can be negative to count from the end)
    end_index: i64,
}

impl LrangeArguments {
    /// Parses and validates the arguments for the LRANGE command.
    ///
    /// # Returns
    ///
    /// * `Ok(LrangeArguments)` - If the arguments are valid
    /// * `Err(CommandError::InvalidLRangeCommand)` - If the number of arguments is not exactly 3
    /// * `Err(CommandError::InvalidLRangeCommandArgument)` - If start or end index is not a valid integer
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() != 3 {
            return Err(CommandError::InvalidLRangeCommand);
        }

        let Ok(start_index) = arguments[1].parse::<i64>() else {
            return Err(CommandError::InvalidLRangeCommandArgument);
        };

        let Ok(end_index) = arguments[2].parse::<i64>() else {
            return Err(CommandError::InvalidLRangeCommandArgument);
        };

        Ok(Self {
            key: arguments[0].clone(),
            start_index,
            end_index,
        })
    }
}

/// Handles the LRANGE command.
///
/// Returns a range of elements from a list stored at the given key.
/// Both start and end indices can be negative to count from the end of the list.
/// If the key doesn't exist or the range selects nothing, returns an empty array.
///
/// # Examples
///
/// ```ignore
/// // LRANGE mylist 0 2  (get first 3 elements)
/// let result = lrange(&store, vec!["mylist".to_string(), "0".to_string(), "2".to_string()]).await;
/// // Returns: "*3\r\n$3\r\nval1\r\n$3\r\nval2\r\n$3\r\nval3\r\n"
///
/// // LRANGE mylist -2 -1  (get last 2 elements)
/// let result = lrange(&store, vec!["mylist".to_string(), "-2".to_string(), "-1".to_string()]).await;
/// // Returns: "*2\r\n$3\r\nval4\r\n$3\r\nval5\r\n"
/// ```
pub async fn lrange(store: &KeyValueStore, arguments: Vec<String>) -> Result<String, CommandError> {
    let lrange_arguments = LrangeArguments::parse(arguments)?;

    let range = store
        .lists
        .range(
            &lrange_arguments.key,
            lrange_arguments.start_index,
            lrange_arguments.end_index,
        )
        .await;

    Ok(RespValue::encode_array_from_strings(range))
}
