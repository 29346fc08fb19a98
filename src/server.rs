use anyhow::Context;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{connection::handle_client_connection, key_value_store::KeyValueStore};

pub const DEFAULT_PORT: u16 = 6379;

#[derive(Error, Debug, PartialEq)]
pub enum CliError {
    #[error("Invalid command line flag")]
    InvalidCommandLineFlag,
    #[error("Invalid command line flag value")]
    InvalidCommandLineFlagValue,
}

#[derive(Debug, PartialEq)]
pub struct RedisServer {
    pub port: u16,
}

impl RedisServer {
    /// Builds the server configuration from the process arguments. The first
    /// item is the program name and is skipped.
    ///
    /// Only `--port <1-65535>` is understood; the port defaults to 6379.
    pub fn new<I: IntoIterator<Item = String>>(command_line_args: I) -> Result<Self, CliError> {
        let mut iter = command_line_args.into_iter().skip(1);
        let mut port: Option<u16> = None;

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--port" => {
                    let Some(port_str) = iter.next() else {
                        return Err(CliError::InvalidCommandLineFlagValue);
                    };

                    let port_number = port_str
                        .parse::<u16>()
                        .map_err(|_| CliError::InvalidCommandLineFlagValue)?;

                    if port_number == 0 {
                        return Err(CliError::InvalidCommandLineFlagValue);
                    }

                    port = Some(port_number);
                }
                _ => return Err(CliError::InvalidCommandLineFlag),
            }
        }

        Ok(RedisServer {
            port: port.unwrap_or(DEFAULT_PORT),
        })
    }

    /// Binds `0.0.0.0:<port>` and serves clients until the process exits.
    pub async fn run(&self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(("0.0.0.0", self.port))
            .await
            .with_context(|| format!("failed to bind to port {}", self.port))?;

        serve(listener, KeyValueStore::new()).await
    }
}

/// Accepts connections on `listener`, one task per client, all sharing `store`.
pub async fn serve(listener: TcpListener, store: KeyValueStore) -> anyhow::Result<()> {
    info!("listening on {}", listener.local_addr()?);

    loop {
        let (stream, client_address) = match listener.accept().await {
            Ok(connection) => connection,
            Err(e) => {
                error!(error = %e, "failed to accept connection");
                continue;
            }
        };

        info!(%client_address, "accepted connection");

        let store = store.clone();
        tokio::spawn(handle_client_connection(
            stream,
            client_address.to_string(),
            store,
        ));
    }
}
