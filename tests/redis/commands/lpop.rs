use redlite::commands::CommandError;

use crate::test_utils::{TestEnv, TestUtils};

#[tokio::test]
async fn test_handle_lpop_command() {
    let env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::rpush_command("fruits", &["grape", "apple"]),
        &TestUtils::expected_integer(2),
    )
    .await;

    let test_cases = vec![
        TestUtils::expected_bulk_string("grape"),
        TestUtils::expected_bulk_string("apple"),
        TestUtils::expected_null(),
    ];

    for expected_response in test_cases {
        env.exec_command_ok(TestUtils::lpop_command("fruits"), &expected_response)
            .await;
    }

    env.exec_command_ok(
        TestUtils::lpop_command("non-existing-key"),
        &TestUtils::expected_null(),
    )
    .await;
}

#[tokio::test]
async fn test_handle_lpop_command_multiple_items() {
    let env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::rpush_command(
            "fruits",
            &["grape", "apple", "pineapple", "mango", "raspberry"],
        ),
        &TestUtils::expected_integer(5),
    )
    .await;

    let test_cases = vec![
        (2, TestUtils::expected_bulk_string_array(&["grape", "apple"])),
        (1, TestUtils::expected_bulk_string_array(&["pineapple"])),
        (0, TestUtils::expected_bulk_string_array(&[])),
        (9, TestUtils::expected_bulk_string_array(&["mango", "raspberry"])),
        (2, TestUtils::expected_null()),
    ];

    for (count, expected_response) in test_cases {
        env.exec_command_ok(
            TestUtils::lpop_command_multiple_items("fruits", count),
            &expected_response,
        )
        .await;
    }

    env.exec_command_ok(TestUtils::llen_command("fruits"), &TestUtils::expected_integer(0))
        .await;
}

#[tokio::test]
async fn test_handle_lpop_command_invalid() {
    let env = TestEnv::new();

    let test_cases = vec![
        (vec!["LPOP"], CommandError::InvalidLPopCommand),
        (vec!["LPOP", "fruits", "1", "2"], CommandError::InvalidLPopCommand),
        (vec!["LPOP", "fruits", "-1"], CommandError::InvalidLPopCommandArgument),
        (vec!["LPOP", "fruits", "many"], CommandError::InvalidLPopCommandArgument),
    ];

    for (command, expected_error) in test_cases {
        env.exec_command_err(TestUtils::invalid_command(&command), expected_error)
            .await;
    }
}
