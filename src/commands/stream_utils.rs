use crate::{
    commands::command_error::CommandError, key_value_store::KeyValueStore, resp::RespValue,
    stream_store::StreamEntry,
};

/// Fails with `WRONGTYPE` if `key` holds a string that has not expired.
pub fn ensure_not_string(store: &KeyValueStore, key: &str) -> Result<(), CommandError> {
    if store.strings.contains_live_key(key) {
        return Err(CommandError::WrongType);
    }

    Ok(())
}

/// Converts stream entries to RESP array format.
///
/// Each entry becomes a 2-element array: `[id, [field1, value1, field2, value2, ...]]`,
/// with fields in the order they were added.
///
/// # Examples
///
/// ```text
/// // entries 1234-0 {temp: 25} and 1235-0 {temp: 26}
/// *2\r\n*2\r\n$6\r\n1234-0\r\n*2\r\n$4\r\ntemp\r\n$2\r\n25\r\n*2\r\n$6\r\n1235-0\r\n*2\r\n$4\r\ntemp\r\n$2\r\n26\r\n
/// ```
pub fn parse_stream_entries_to_resp(entries: &[StreamEntry]) -> RespValue {
    let resp_entries = entries
        .iter()
        .map(|entry| {
            let fields = entry
                .fields
                .iter()
                .flat_map(|(field, value)| [field.clone(), value.clone()]);

            RespValue::Array(vec![
                RespValue::BulkString(entry.id.to_string()),
                RespValue::bulk_string_array(fields),
            ])
        })
        .collect();

    RespValue::Array(resp_entries)
}

/// Converts XREAD results to `[[key, [entries...]], ...]`.
pub fn parse_streams_to_resp(streams: Vec<(String, Vec<StreamEntry>)>) -> RespValue {
    RespValue::Array(
        streams
            .into_iter()
            .map(|(key, entries)| {
                RespValue::Array(vec![
                    RespValue::BulkString(key),
                    parse_stream_entries_to_resp(&entries),
                ])
            })
            .collect(),
    )
}
