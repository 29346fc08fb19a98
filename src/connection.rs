use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    commands::CommandHandler,
    input::{read_and_parse_resp, CommandReadError},
    key_value_store::KeyValueStore,
};

/// Serves one client until it disconnects.
///
/// Requests are answered in the order they arrive. A command that fails is
/// answered with an error reply and the connection stays open; bytes that are
/// not valid RESP, or a failed write, end the connection without a reply.
#[instrument(name = "connection", skip(stream, store))]
pub async fn handle_client_connection<S>(mut stream: S, client_address: String, store: KeyValueStore)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buffer = BytesMut::with_capacity(4096);

    loop {
        let parsed_input = match read_and_parse_resp(&mut stream, &mut buffer).await {
            Ok(values) => values,
            Err(CommandReadError::ConnectionClosed) => {
                info!("connection closed");
                break;
            }
            Err(e) => {
                warn!(error = %e, "closing connection");
                break;
            }
        };

        for input in parsed_input {
            let response = match CommandHandler::new(input) {
                Ok(command_handler) => {
                    debug!(
                        command = %command_handler.name,
                        arguments = ?command_handler.arguments,
                        "received command"
                    );

                    match command_handler.handle_command(&store).await {
                        Ok(response) => response,
                        Err(e) => {
                            warn!(command = %command_handler.name, error = %e, "command failed");
                            e.as_string()
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "rejected request");
                    e.as_string()
                }
            };

            debug!(response = ?response, "sending response");

            if let Err(e) = write_to_stream(&mut stream, response.as_bytes()).await {
                error!(error = %e, "error writing to stream");
                return;
            }
        }
    }
}

async fn write_to_stream<S>(stream: &mut S, response: &[u8]) -> std::io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    stream.write_all(response).await?;
    stream.flush().await
}
