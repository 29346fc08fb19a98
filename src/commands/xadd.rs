use crate::{
    commands::{command_error::CommandError, stream_utils::ensure_not_string},
    key_value_store::KeyValueStore,
    resp::RespValue,
    stream_id::IdRequest,
};

#[derive(Debug, PartialEq)]
pub struct XaddArguments {
    key: String,
    id: IdRequest,
    fields: Vec<(String, String)>,
}

impl XaddArguments {
    /// Parses `key id field value [field value ...]`.
    ///
    /// # Returns
    ///
    /// * `Err(CommandError::InvalidXAddCommand)` - Missing fields or a field without a value
    /// * `Err(CommandError::InvalidStreamId)` - Malformed id, or an explicit `0-0`
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() < 4 || arguments.len() % 2 != 0 {
            return Err(CommandError::InvalidXAddCommand);
        }

        let id = IdRequest::parse(&arguments[1])?;

        let fields = arguments[2..]
            .chunks(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect();

        Ok(Self {
            key: arguments[0].clone(),
            id,
            fields,
        })
    }
}

/// Handles the XADD command.
///
/// Appends an entry to a stream, creating the stream if needed, and replies
/// with the id the entry was stored under.
///
/// # Examples
///
/// ```ignore
/// // XADD sensor 1-* temperature 36
/// // Returns: "$3\r\n1-0\r\n"
///
/// // XADD sensor 0-0 temperature 36
/// // Returns: Err(CommandError::InvalidStreamId(StreamIdError::BelowFloor))
/// ```
pub async fn xadd(store: &KeyValueStore, arguments: Vec<String>) -> Result<String, CommandError> {
    let xadd_arguments = XaddArguments::parse(arguments)?;

    ensure_not_string(store, &xadd_arguments.key)?;

    let id = store
        .streams
        .add(&xadd_arguments.key, xadd_arguments.id, xadd_arguments.fields)
        .await?;

    Ok(RespValue::BulkString(id.to_string()).encode())
}
