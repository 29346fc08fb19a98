use std::time::Duration;

use crate::{
    commands::{
        command_error::CommandError,
        stream_utils::{ensure_not_string, parse_streams_to_resp},
    },
    key_value_store::KeyValueStore,
    resp::RespValue,
    stream_id::StreamId,
    stream_store::{BlockMode, ReadStart},
};

/// Represents the parsed arguments for the XREAD command.
///
/// Format: `XREAD [BLOCK milliseconds] STREAMS key1 key2 ... id1 id2 ...`
#[derive(Debug, PartialEq)]
pub struct XreadArguments {
    /// Whether and how long to wait when no stream has new entries.
    block_mode: BlockMode,
    /// Stream names paired with the position to read after.
    key_stream_pairs: Vec<(String, ReadStart)>,
}

impl XreadArguments {
    /// Parses command arguments into structured XreadArguments.
    ///
    /// Handles both blocking and non-blocking variants of the XREAD command:
    /// - `XREAD STREAMS key1 key2 id1 id2` (non-blocking)
    /// - `XREAD BLOCK milliseconds STREAMS key1 key2 id1 id2` (blocking, 0 waits forever)
    ///
    /// An id is either `$` (the stream's last id when the command runs), a
    /// full `<ms>-<seq>` or a bare `<ms>` meaning `<ms>-0`.
    ///
    /// # Returns
    ///
    /// * `Ok(XreadArguments)` - Successfully parsed arguments
    /// * `Err(CommandError::InvalidXReadCommand)` - If no streams are given or keys and ids don't pair up
    /// * `Err(CommandError::InvalidXReadBlockDuration)` - If block duration is not a valid number
    /// * `Err(CommandError::InvalidXReadOption)` - If an option other than BLOCK or STREAMS is given
    /// * `Err(CommandError::InvalidStreamId)` - If an id is malformed
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Blocking: XREAD BLOCK 1000 STREAMS mystream $
    /// let args = XreadArguments::parse(vec![
    ///     "BLOCK".to_string(),
    ///     "1000".to_string(),
    ///     "STREAMS".to_string(),
    ///     "mystream".to_string(),
    ///     "$".to_string()
    /// ])?;
    /// ```
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() < 3 {
            return Err(CommandError::InvalidXReadCommand);
        }

        let (block_mode, start_data_index) = match arguments[0].to_lowercase().as_str() {
            "block" => {
                let duration_ms = arguments[1]
                    .parse::<u64>()
                    .map_err(|_| CommandError::InvalidXReadBlockDuration)?;

                if arguments[2].to_lowercase() != "streams" {
                    return Err(CommandError::InvalidXReadOption);
                }

                let block_mode = match duration_ms {
                    0 => BlockMode::Forever,
                    duration_ms => BlockMode::Timeout(Duration::from_millis(duration_ms)),
                };

                (block_mode, 3)
            }
            "streams" => (BlockMode::Immediate, 1),
            _ => {
                return Err(CommandError::InvalidXReadOption);
            }
        };

        let data = &arguments[start_data_index..];

        if data.is_empty() || data.len() % 2 != 0 {
            return Err(CommandError::InvalidXReadCommand);
        }

        let (keys, ids) = data.split_at(data.len() / 2);

        let mut key_stream_pairs = Vec::with_capacity(keys.len());

        for (key, id) in keys.iter().zip(ids) {
            let start = match id.as_str() {
                "$" => ReadStart::LastEntry,
                id => ReadStart::After(StreamId::parse_with_default_sequence(id, 0)?),
            };

            key_stream_pairs.push((key.clone(), start));
        }

        Ok(Self {
            block_mode,
            key_stream_pairs,
        })
    }
}

/// Handles the XREAD command.
///
/// Reads entries newer than the given ids from one or more streams. Only
/// streams with new entries appear in the reply. When nothing qualifies the
/// reply is a null array, after waiting first if BLOCK was given.
///
/// # Format
///
/// ```ignore
/// [
///   ["stream1", [["id1", ["field1", "value1", ...]], ["id2", [...]]]],
///   ["stream2", [["id3", ["field2", "value2", ...]]]]
/// ]
/// ```
pub async fn xread(store: &KeyValueStore, arguments: Vec<String>) -> Result<String, CommandError> {
    let xread_arguments = XreadArguments::parse(arguments)?;

    for (key, _) in &xread_arguments.key_stream_pairs {
        ensure_not_string(store, key)?;
    }

    let streams = store
        .streams
        .read(xread_arguments.key_stream_pairs, xread_arguments.block_mode)
        .await;

    if streams.is_empty() {
        return Ok(RespValue::NullArray.encode());
    }

    Ok(parse_streams_to_resp(streams).encode())
}
