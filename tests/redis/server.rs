use std::time::Duration;

use bytes::BytesMut;
use redlite::{
    commands::CommandError, key_value_store::KeyValueStore, resp::RespValue, server::serve,
};
use tokio::{
    io::AsyncWriteExt,
    net::{TcpListener, TcpStream},
};

use crate::test_utils::TestUtils;

async fn start_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();

    tokio::spawn(serve(listener, KeyValueStore::new()));

    address
}

#[tokio::test]
async fn test_server_replies_to_client_commands() {
    let address = start_server().await;

    let mut client = TcpStream::connect(&address).await.unwrap();
    let mut buffer = BytesMut::with_capacity(512);

    TestUtils::send_command_and_receive(
        &mut client,
        &mut buffer,
        TestUtils::ping_command(),
        RespValue::SimpleString("PONG".to_string()),
    )
    .await;

    TestUtils::send_command_and_receive(
        &mut client,
        &mut buffer,
        TestUtils::set_command("grape", "mango"),
        RespValue::SimpleString("OK".to_string()),
    )
    .await;

    TestUtils::send_command_and_receive(
        &mut client,
        &mut buffer,
        TestUtils::get_command("grape"),
        RespValue::BulkString("mango".to_string()),
    )
    .await;

    TestUtils::send_command_and_receive(
        &mut client,
        &mut buffer,
        TestUtils::get_command("missing"),
        RespValue::NullBulkString,
    )
    .await;
}

#[tokio::test]
async fn test_server_keeps_connection_open_after_command_error() {
    let address = start_server().await;

    let mut client = TcpStream::connect(&address).await.unwrap();
    let mut buffer = BytesMut::with_capacity(512);

    TestUtils::send_command_and_receive(
        &mut client,
        &mut buffer,
        TestUtils::invalid_command(&["FLUSHALL"]),
        CommandError::UnknownCommand("FLUSHALL".to_string()).as_resp(),
    )
    .await;

    TestUtils::send_command_and_receive(
        &mut client,
        &mut buffer,
        TestUtils::echo_command("still here"),
        RespValue::BulkString("still here".to_string()),
    )
    .await;
}

#[tokio::test]
async fn test_server_shares_store_between_clients() {
    let address = start_server().await;

    let mut first_client = TcpStream::connect(&address).await.unwrap();
    let mut first_buffer = BytesMut::with_capacity(512);
    let mut second_client = TcpStream::connect(&address).await.unwrap();
    let mut second_buffer = BytesMut::with_capacity(512);

    TestUtils::send_command_and_receive(
        &mut first_client,
        &mut first_buffer,
        TestUtils::rpush_command("fruits", &["mango", "apple"]),
        RespValue::Integer(2),
    )
    .await;

    TestUtils::send_command_and_receive(
        &mut second_client,
        &mut second_buffer,
        TestUtils::lrange_command("fruits", 0, -1),
        RespValue::bulk_string_array(["mango", "apple"].map(String::from)),
    )
    .await;
}

#[tokio::test]
async fn test_server_blpop_across_clients() {
    let address = start_server().await;

    let mut blocked_client = TcpStream::connect(&address).await.unwrap();
    let mut blocked_buffer = BytesMut::with_capacity(512);
    let mut pushing_client = TcpStream::connect(&address).await.unwrap();
    let mut pushing_buffer = BytesMut::with_capacity(512);

    let blocked = tokio::spawn(async move {
        TestUtils::send_command_and_receive(
            &mut blocked_client,
            &mut blocked_buffer,
            TestUtils::blpop_command("fruits", "0"),
            RespValue::bulk_string_array(["fruits", "mango"].map(String::from)),
        )
        .await;
    });

    TestUtils::sleep_ms(100).await;

    TestUtils::send_command_and_receive(
        &mut pushing_client,
        &mut pushing_buffer,
        TestUtils::rpush_command("fruits", &["mango"]),
        RespValue::Integer(1),
    )
    .await;

    tokio::time::timeout(Duration::from_secs(2), blocked)
        .await
        .expect("blocked client should be served")
        .unwrap();
}

#[tokio::test]
async fn test_server_xread_across_clients() {
    let address = start_server().await;

    let mut reading_client = TcpStream::connect(&address).await.unwrap();
    let mut reading_buffer = BytesMut::with_capacity(512);
    let mut writing_client = TcpStream::connect(&address).await.unwrap();
    let mut writing_buffer = BytesMut::with_capacity(512);

    let expected = RespValue::Array(vec![RespValue::Array(vec![
        RespValue::BulkString("sensor".to_string()),
        RespValue::Array(vec![TestUtils::expected_stream_entry(
            "1-1",
            &["temperature", "36"],
        )]),
    ])]);

    let reader = tokio::spawn(async move {
        TestUtils::send_command_and_receive(
            &mut reading_client,
            &mut reading_buffer,
            TestUtils::xread_blocking_command("0", &["sensor"], &["$"]),
            expected,
        )
        .await;
    });

    TestUtils::sleep_ms(100).await;

    TestUtils::send_command_and_receive(
        &mut writing_client,
        &mut writing_buffer,
        TestUtils::xadd_command("sensor", "1-1", &["temperature", "36"]),
        RespValue::BulkString("1-1".to_string()),
    )
    .await;

    tokio::time::timeout(Duration::from_secs(2), reader)
        .await
        .expect("blocked reader should be served")
        .unwrap();
}

#[tokio::test]
async fn test_server_closes_connection_on_protocol_error() {
    let address = start_server().await;

    let mut client = TcpStream::connect(&address).await.unwrap();
    client.write_all(b"?garbage\r\n").await.unwrap();
    client.flush().await.unwrap();

    let mut buffer = BytesMut::with_capacity(64);
    let result = tokio::time::timeout(
        Duration::from_secs(2),
        redlite::input::read_and_parse_resp(&mut client, &mut buffer),
    )
    .await
    .expect("server should close the connection");

    assert!(result.is_err());
}
