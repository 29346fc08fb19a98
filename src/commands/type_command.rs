use crate::{commands::command_error::CommandError, key_value_store::KeyValueStore};

pub struct TypeArguments {
    key: String,
}

impl TypeArguments {
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() != 1 {
            return Err(CommandError::InvalidTypeCommand);
        }

        Ok(Self {
            key: arguments[0].clone(),
        })
    }
}

pub async fn type_command(
    store: &KeyValueStore,
    arguments: Vec<String>,
) -> Result<String, CommandError> {
    let type_arguments = TypeArguments::parse(arguments)?;

    Ok(store.type_of(&type_arguments.key).await.as_resp().encode())
}
