use std::{collections::HashSet, time::Duration};

use crate::test_utils::{TestEnv, TestUtils};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_blpop_concurrent_waiters_receive_distinct_items() {
    let env = TestEnv::new();
    let number_of_clients = 10;

    let waiters: Vec<_> = (0..number_of_clients)
        .map(|_| TestUtils::spawn_blpop_task(&env, "queue", "0"))
        .collect();

    env.wait_for_list_waiters("queue", number_of_clients).await;

    let pushers: Vec<_> = (0..number_of_clients)
        .map(|i| {
            let item = format!("item_{}", i);
            TestUtils::spawn_command_task(&env, TestUtils::rpush_command("queue", &[&item]))
        })
        .collect();

    for pusher in pushers {
        assert!(TestUtils::wait_for_completion(pusher, Duration::from_secs(2))
            .await
            .is_ok());
    }

    let mut results = Vec::new();
    for waiter in waiters {
        results.push(TestUtils::wait_for_completion(waiter, Duration::from_secs(2)).await);
    }

    let successful_results = TestUtils::filter_successful_results_containing(&results, "item_");
    assert_eq!(successful_results.len(), number_of_clients);

    let distinct: HashSet<_> = successful_results.into_iter().collect();
    assert_eq!(distinct.len(), number_of_clients);

    env.exec_command_ok(
        TestUtils::llen_command("queue"),
        &TestUtils::expected_integer(0),
    )
    .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_blpop_more_items_than_waiters() {
    let env = TestEnv::new();

    let waiters: Vec<_> = (0..3)
        .map(|_| TestUtils::spawn_blpop_task(&env, "queue", "0"))
        .collect();

    env.wait_for_list_waiters("queue", 3).await;

    env.exec_command_ok(
        TestUtils::rpush_command("queue", &["a", "b", "c", "d", "e"]),
        &TestUtils::expected_integer(5),
    )
    .await;

    for waiter in waiters {
        let result = TestUtils::wait_for_completion(waiter, Duration::from_secs(2)).await;
        assert!(result.is_ok());
    }

    env.exec_command_ok(
        TestUtils::lrange_command("queue", 0, -1),
        &TestUtils::expected_bulk_string_array(&["d", "e"]),
    )
    .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_xadd_concurrent_generated_ids_are_unique() {
    let env = TestEnv::new();
    let number_of_clients = 20;

    let tasks: Vec<_> = (0..number_of_clients)
        .map(|i| {
            let value = i.to_string();
            TestUtils::spawn_command_task(
                &env,
                TestUtils::xadd_command("sensor", "*", &["reading", &value]),
            )
        })
        .collect();

    let mut ids = HashSet::new();
    for task in tasks {
        let response = TestUtils::wait_for_completion(task, Duration::from_secs(2))
            .await
            .unwrap();
        let id = response.split("\r\n").nth(1).unwrap().to_string();

        assert!(ids.insert(id));
    }

    let range = env
        .exec_command(TestUtils::xrange_command("sensor", "-", "+"))
        .await
        .unwrap();

    assert!(range.starts_with(&format!("*{}\r\n", number_of_clients)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_xread_concurrent_readers_all_woken() {
    let env = TestEnv::new();

    let readers: Vec<_> = (0..5)
        .map(|_| TestUtils::spawn_xread_task(&env, &["sensor"], &["0-0"], "0"))
        .collect();

    TestUtils::sleep_ms(100).await;

    env.exec_command_ok(
        TestUtils::xadd_command("sensor", "1-1", &["temperature", "36"]),
        &TestUtils::expected_bulk_string("1-1"),
    )
    .await;

    let expected = TestUtils::expected_xread(vec![(
        "sensor",
        vec![TestUtils::expected_stream_entry("1-1", &["temperature", "36"])],
    )]);

    for reader in readers {
        let result = TestUtils::wait_for_completion(reader, Duration::from_secs(2)).await;
        assert_eq!(result, Ok(expected.clone()));
    }
}
