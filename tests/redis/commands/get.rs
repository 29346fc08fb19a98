use redlite::commands::CommandError;

use crate::test_utils::{TestEnv, TestUtils};

#[tokio::test]
async fn test_handle_get_command() {
    let env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::set_command("grape", "mango"),
        &TestUtils::expected_simple_string("OK"),
    )
    .await;

    let test_cases = vec![
        ("grape", TestUtils::expected_bulk_string("mango")),
        ("non-existing-key", TestUtils::expected_null()),
    ];

    for (key, expected_response) in test_cases {
        env.exec_command_ok(TestUtils::get_command(key), &expected_response)
            .await;
    }
}

#[tokio::test]
async fn test_handle_get_command_invalid() {
    let env = TestEnv::new();

    let test_cases = vec![vec!["GET"], vec!["GET", "grape", "mango"]];

    for command in test_cases {
        env.exec_command_err(
            TestUtils::invalid_command(&command),
            CommandError::InvalidGetCommand,
        )
        .await;
    }
}

#[tokio::test]
async fn test_handle_get_command_on_stream() {
    let env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::xadd_command("sensor", "1-1", &["temperature", "36"]),
        &TestUtils::expected_bulk_string("1-1"),
    )
    .await;

    env.exec_command_err(TestUtils::get_command("sensor"), CommandError::WrongType)
        .await;
}

#[tokio::test]
async fn test_handle_get_command_on_list() {
    let env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::rpush_command("fruits", &["mango"]),
        &TestUtils::expected_integer(1),
    )
    .await;

    env.exec_command_ok(TestUtils::get_command("fruits"), &TestUtils::expected_null())
        .await;
}
