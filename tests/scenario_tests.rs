use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::{json, Value};
use tokio::task;
use warp::Filter;

#[tokio::test]
async fn scenario_runs_named_preset_with_requested_simulations() {
    let route = warp::path!("scenarios" / String)
        .and(warp::post())
        .and(warp::body::json())
        .map(|name: String, body: Value| {
            let queues: Vec<f64> = (0..10).map(|i| 25.0 + i as f64).collect();
            warp::reply::json(&json!({
                "avg_max_queue": 29.5,
                "avg_waiting_time": 2.1,
                "avg_service_rate": 0.97,
                "avg_accidents_per_hour": 0.2,
                "prob_light_traffic": 0.9,
                "prob_moderate_jam": 0.1,
                "prob_severe_jam": 0.0,
                "all_max_queues": queues,
                "sample_queue_history": [],
                "scenario_name": format!("{name} x{}", body["simulations"]),
                "scenario_description": "Weekend traffic with lower volume"
            }))
        });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let dir = assert_fs::TempDir::new().unwrap();
    let prefix = dir.path().join("weekend");
    let prefix_arg = prefix.to_str().unwrap().to_string();
    let base_url = format!("http://{addr}");

    task::spawn_blocking(move || {
        let mut cmd = assert_cmd::cargo_bin_cmd!("trafficsim");
        cmd.args([
            "scenario",
            "weekend",
            "-n",
            "50",
            "-o",
            &prefix_arg,
            "--no-charts",
            "--base-url",
            &base_url,
        ]);

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("Scenario: weekend x50"))
            .stdout(predicate::str::contains("Description: Weekend traffic with lower volume"))
            .stdout(predicate::str::contains("Traffic level: light"))
            .stdout(predicate::str::contains("No issues detected"));
    })
    .await
    .unwrap();

    assert!(prefix.with_extension("json").exists());
}

#[tokio::test]
async fn unknown_scenario_shows_generic_notice() {
    let route = warp::path!("scenarios" / String).and(warp::post()).map(|_name: String| {
        warp::reply::with_status(
            warp::reply::json(&json!({"error": "Unknown scenario"})),
            warp::http::StatusCode::BAD_REQUEST,
        )
    });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let dir = assert_fs::TempDir::new().unwrap();
    let prefix = dir.path().join("missing");
    let prefix_arg = prefix.to_str().unwrap().to_string();
    let base_url = format!("http://{addr}");

    task::spawn_blocking(move || {
        let mut cmd = assert_cmd::cargo_bin_cmd!("trafficsim");
        cmd.args(["scenario", "nope", "-o", &prefix_arg, "--base-url", &base_url]);

        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("Scenario simulation failed. Please try again."));
    })
    .await
    .unwrap();

    assert!(!prefix.with_extension("json").exists());
}

#[tokio::test]
async fn scenario_name_is_sent_as_one_path_segment() {
    let hits = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = hits.clone();
    let route = warp::path!("scenarios" / String)
        .and(warp::post())
        .map(move |name: String| {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            assert_eq!(name, "rush%2Fhour%3Fpeak");
            let queues: Vec<f64> = (0..10).map(|i| 40.0 + i as f64).collect();
            warp::reply::json(&json!({
                "avg_max_queue": 44.5,
                "avg_waiting_time": 3.0,
                "avg_service_rate": 0.9,
                "avg_accidents_per_hour": 0.1,
                "prob_light_traffic": 0.5,
                "prob_moderate_jam": 0.4,
                "prob_severe_jam": 0.1,
                "all_max_queues": queues,
                "sample_queue_history": [],
                "scenario_name": "Rush Hour Peak"
            }))
        });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let dir = assert_fs::TempDir::new().unwrap();
    let prefix = dir.path().join("escaped");
    let prefix_arg = prefix.to_str().unwrap().to_string();
    let base_url = format!("http://{addr}");

    task::spawn_blocking(move || {
        let mut cmd = assert_cmd::cargo_bin_cmd!("trafficsim");
        cmd.args([
            "scenario",
            "rush/hour?peak",
            "-o",
            &prefix_arg,
            "--no-charts",
            "--base-url",
            &base_url,
        ]);

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("Scenario: Rush Hour Peak"));
    })
    .await
    .unwrap();

    assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn compare_is_refused_as_a_scenario_name() {
    let hits = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = hits.clone();
    let route = warp::path!("scenarios" / String)
        .and(warp::post())
        .map(move |_name: String| {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            warp::reply::json(&json!({"scenarios": {}}))
        });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let dir = assert_fs::TempDir::new().unwrap();
    let prefix = dir.path().join("compare");
    let prefix_arg = prefix.to_str().unwrap().to_string();
    let base_url = format!("http://{addr}");

    task::spawn_blocking(move || {
        let mut cmd = assert_cmd::cargo_bin_cmd!("trafficsim");
        cmd.args(["scenario", "compare", "-o", &prefix_arg, "--base-url", &base_url]);

        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("Scenario simulation failed. Please try again."));
    })
    .await
    .unwrap();

    assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 0);
    assert!(!prefix.with_extension("json").exists());
}
