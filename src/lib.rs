//! An in-memory, Redis-compatible data structure server.
//!
//! Supported commands:
//!
//! - Strings with optional expiry (GET, SET)
//! - Lists with blocking pop (RPUSH, LPUSH, LRANGE, LLEN, LPOP, BLPOP)
//! - Streams (XADD, XRANGE, XREAD)
//! - Server commands (PING, ECHO, TYPE)
//!
//! Clients speak the Redis Serialization Protocol (RESP). Each connection is
//! served by its own Tokio task; all tasks share one [`key_value_store::KeyValueStore`].

pub mod commands;
pub mod connection;
pub mod input;
pub mod key_value_store;
pub mod list_store;
pub mod resp;
pub mod server;
pub mod stream_id;
pub mod stream_store;
pub mod string_store;
