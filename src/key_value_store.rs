use std::sync::Arc;

use crate::{
    list_store::ListStore, resp::RespValue, stream_store::StreamStore, string_store::StringStore,
};

/// The kind of value TYPE reports for a key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataType {
    String,
    Stream,
    None,
}

impl DataType {
    pub fn as_resp(&self) -> RespValue {
        match self {
            DataType::String => RespValue::SimpleString("string".to_string()),
            DataType::Stream => RespValue::SimpleString("stream".to_string()),
            DataType::None => RespValue::BulkString("none".to_string()),
        }
    }
}

/// Shared handle to every store the server keeps.
///
/// Cloning is cheap; all clones see the same data. The server builds one at
/// startup and hands a clone to each connection.
#[derive(Debug, Clone, Default)]
pub struct KeyValueStore {
    pub strings: Arc<StringStore>,
    pub lists: Arc<ListStore>,
    pub streams: Arc<StreamStore>,
}

impl KeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports `string` for any stored string, expired or not, then `stream`
    /// for a stream with entries. Lists are not consulted.
    pub async fn type_of(&self, key: &str) -> DataType {
        if self.strings.contains_key(key) {
            return DataType::String;
        }

        if self.streams.has_entries(key).await {
            return DataType::Stream;
        }

        DataType::None
    }
}
