use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use tokio::task;
use warp::Filter;

#[tokio::test]
async fn network_reports_each_intersection_and_bottleneck() {
    let route = warp::path!("network" / "simulate" / String)
        .and(warp::post())
        .map(|_topology: String| {
            warp::reply::json(&json!({
                "intersections": {
                    "north": {"avg_max_queue": 35.0, "avg_waiting_time": 3.2, "avg_service_rate": 0.93},
                    "south": {"avg_max_queue": 72.5, "avg_waiting_time": 8.8, "avg_service_rate": 0.79}
                },
                "network_summary": {
                    "avg_total_max_queue": 107.5,
                    "avg_network_service_rate": 0.86,
                    "std_total_max_queue": 11.2
                }
            }))
        });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let dir = assert_fs::TempDir::new().unwrap();
    let prefix = dir.path().join("network");
    let prefix_arg = prefix.to_str().unwrap().to_string();
    let base_url = format!("http://{addr}");

    task::spawn_blocking(move || {
        let mut cmd = assert_cmd::cargo_bin_cmd!("trafficsim");
        cmd.args([
            "network",
            "simple_two_intersection",
            "-o",
            &prefix_arg,
            "--base-url",
            &base_url,
        ]);

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("Network Report: simple_two_intersection"))
            .stdout(predicate::str::contains("north | 35.00 | 3.20 | 93.0% | moderate"))
            .stdout(predicate::str::contains("south | 72.50 | 8.80 | 79.0% | heavy"))
            .stdout(predicate::str::contains("Total max queue: 107.50 vehicles"))
            .stdout(predicate::str::contains("Bottleneck: south (72.50 vehicles)"));
    })
    .await
    .unwrap();

    let saved = std::fs::read_to_string(prefix.with_extension("json")).unwrap();
    assert!(saved.contains("network_summary"));
}
