use crate::{
    commands::{
        command_error::CommandError,
        stream_utils::{ensure_not_string, parse_stream_entries_to_resp},
    },
    key_value_store::KeyValueStore,
    stream_id::StreamId,
};

pub struct XrangeArguments {
    key: String,
    start: StreamId,
    end: StreamId,
}

impl XrangeArguments {
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() != 3 {
            return Err(CommandError::InvalidXRangeCommand);
        }

        Ok(Self {
            key: arguments[0].clone(),
            start: StreamId::parse_range_start(&arguments[1])?,
            end: StreamId::parse_range_end(&arguments[2])?,
        })
    }
}

/// Handles the XRANGE command.
///
/// Both bounds are inclusive. `-` and `+` stand for the smallest and largest
/// possible ids; a bare `<ms>` covers every sequence number of that millisecond.
pub async fn xrange(store: &KeyValueStore, arguments: Vec<String>) -> Result<String, CommandError> {
    let xrange_arguments = XrangeArguments::parse(arguments)?;

    ensure_not_string(store, &xrange_arguments.key)?;

    let entries = store
        .streams
        .range(
            &xrange_arguments.key,
            xrange_arguments.start,
            xrange_arguments.end,
        )
        .await;

    Ok(parse_stream_entries_to_resp(&entries).encode())
}
