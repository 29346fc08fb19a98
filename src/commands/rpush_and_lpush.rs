use crate::{
    commands::command_error::CommandError, key_value_store::KeyValueStore,
    list_store::PushDirection, resp::RespValue,
};

pub struct PushArrayOperations {
    key: String,
    values: Vec<String>,
}

impl PushArrayOperations {
    pub fn parse(arguments: Vec<String>, direction: PushDirection) -> Result<Self, CommandError> {
        if arguments.len() < 2 {
            return match direction {
                PushDirection::Left => Err(CommandError::InvalidLPushCommand),
                PushDirection::Right => Err(CommandError::InvalidRPushCommand),
            };
        }

        Ok(Self {
            key: arguments[0].clone(),
            values: arguments[1..].to_vec(),
        })
    }
}

pub async fn rpush(store: &KeyValueStore, arguments: Vec<String>) -> Result<String, CommandError> {
    push_array_operations(store, arguments, PushDirection::Right).await
}

pub async fn lpush(store: &KeyValueStore, arguments: Vec<String>) -> Result<String, CommandError> {
    push_array_operations(store, arguments, PushDirection::Left).await
}

async fn push_array_operations(
    store: &KeyValueStore,
    arguments: Vec<String>,
    direction: PushDirection,
) -> Result<String, CommandError> {
    let push_array_arguments = PushArrayOperations::parse(arguments, direction)?;

    let list_length = store
        .lists
        .push(
            &push_array_arguments.key,
            push_array_arguments.values,
            direction,
        )
        .await;

    Ok(RespValue::Integer(list_length as i64).encode())
}
