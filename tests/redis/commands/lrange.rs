use redlite::commands::CommandError;

use crate::test_utils::{TestEnv, TestUtils};

#[tokio::test]
async fn test_handle_lrange_command() {
    let env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::rpush_command(
            "fruits",
            &["grape", "apple", "pineapple", "mango", "raspberry"],
        ),
        &TestUtils::expected_integer(5),
    )
    .await;

    let test_cases: Vec<(&str, i64, i64, Vec<&str>)> = vec![
        ("fruits", 0, 2, vec!["grape", "apple", "pineapple"]),
        ("fruits", 1, 3, vec!["apple", "pineapple", "mango"]),
        ("fruits", 2, 9, vec!["pineapple", "mango", "raspberry"]),
        ("fruits", 2, 1, vec![]),
        ("fruits", 5, 6, vec![]),
        ("fruits", -2, -1, vec!["mango", "raspberry"]),
        ("fruits", -9, -4, vec!["grape", "apple"]),
        ("fruits", 4, 4, vec!["raspberry"]),
        ("fruits", 0, -10, vec!["grape"]),
        ("non-existing-key", 0, -1, vec![]),
    ];

    for (key, start, stop, expected) in test_cases {
        env.exec_command_ok(
            TestUtils::lrange_command(key, start, stop),
            &TestUtils::expected_bulk_string_array(&expected),
        )
        .await;
    }
}

#[tokio::test]
async fn test_handle_lrange_command_invalid() {
    let env = TestEnv::new();

    let test_cases = vec![
        (vec!["LRANGE", "fruits", "0"], CommandError::InvalidLRangeCommand),
        (
            vec!["LRANGE", "fruits", "zero", "1"],
            CommandError::InvalidLRangeCommandArgument,
        ),
    ];

    for (command, expected_error) in test_cases {
        env.exec_command_err(TestUtils::invalid_command(&command), expected_error)
            .await;
    }
}
