use crate::{
    commands::{
        blpop::blpop,
        command_error::CommandError,
        echo::echo,
        get::get,
        llen::llen,
        lpop::lpop,
        lrange::lrange,
        ping::ping,
        rpush_and_lpush::{lpush, rpush},
        set::set,
        type_command::type_command,
        xadd::xadd,
        xrange::xrange,
        xread::xread,
    },
    key_value_store::KeyValueStore,
    resp::RespValue,
};

/// A decoded request: the upper-cased command name and its arguments.
#[derive(Debug, PartialEq, Clone)]
pub struct CommandHandler {
    pub name: String,
    pub arguments: Vec<String>,
}

impl CommandHandler {
    /// Builds a handler from a request frame, which must be a non-empty array
    /// of bulk strings.
    pub fn new(input: RespValue) -> Result<Self, CommandError> {
        let RespValue::Array(elements) = input else {
            return Err(CommandError::InvalidCommand);
        };

        let mut arguments = Vec::with_capacity(elements.len());

        for element in elements {
            match element {
                RespValue::BulkString(s) => arguments.push(s),
                _ => return Err(CommandError::InvalidCommandArgument),
            }
        }

        if arguments.is_empty() {
            return Err(CommandError::InvalidCommand);
        }

        let name = arguments.remove(0).to_uppercase();

        Ok(Self { name, arguments })
    }

    /// Runs the command against `store` and returns the encoded reply.
    ///
    /// BLPOP and a blocking XREAD only return once they have data or their
    /// timeout has passed.
    pub async fn handle_command(&self, store: &KeyValueStore) -> Result<String, CommandError> {
        let arguments = self.arguments.clone();

        match self.name.as_str() {
            "PING" => ping(arguments),
            "ECHO" => echo(arguments),
            "GET" => get(store, arguments).await,
            "SET" => set(store, arguments).await,
            "TYPE" => type_command(store, arguments).await,
            "RPUSH" => rpush(store, arguments).await,
            "LPUSH" => lpush(store, arguments).await,
            "LRANGE" => lrange(store, arguments).await,
            "LLEN" => llen(store, arguments).await,
            "LPOP" => lpop(store, arguments).await,
            "BLPOP" => blpop(store, arguments).await,
            "XADD" => xadd(store, arguments).await,
            "XRANGE" => xrange(store, arguments).await,
            "XREAD" => xread(store, arguments).await,
            _ => Err(CommandError::UnknownCommand(self.name.clone())),
        }
    }
}
