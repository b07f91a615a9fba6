use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::{json, Value};
use tokio::task;
use warp::Filter;

#[tokio::test]
async fn export_saves_backend_file_with_timestamped_name() {
    let route = warp::path!("export" / "pdf")
        .and(warp::post())
        .and(warp::body::json())
        .map(|body: Value| {
            assert_eq!(body["scenario_name"], "Weekend Traffic");
            assert_eq!(body["result_data"]["avg_max_queue"], 33.0);
            b"%PDF-1.4 mock report".to_vec()
        });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let dir = assert_fs::TempDir::new().unwrap();
    let result = dir.child("weekend.json");
    result
        .write_str(
            &json!({"avg_max_queue": 33.0, "scenario_name": "Weekend Traffic"}).to_string(),
        )
        .unwrap();
    let exports = dir.child("reports");
    let result_arg = result.path().to_str().unwrap().to_string();
    let exports_arg = exports.path().to_str().unwrap().to_string();
    let base_url = format!("http://{addr}");

    task::spawn_blocking(move || {
        let mut cmd = assert_cmd::cargo_bin_cmd!("trafficsim");
        cmd.args([
            "export",
            "pdf",
            "-i",
            &result_arg,
            "-d",
            &exports_arg,
            "--base-url",
            &base_url,
        ]);

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("Export written to"));
    })
    .await
    .unwrap();

    let files: Vec<_> = std::fs::read_dir(exports.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("Weekend_Traffic_"));
    assert!(name.ends_with(".pdf"));
    // Weekend_Traffic_YYYYmmdd_HHMMSS.pdf
    assert_eq!(name.len(), "Weekend_Traffic_".len() + 15 + ".pdf".len());
    assert_eq!(std::fs::read(&files[0]).unwrap(), b"%PDF-1.4 mock report");
}

#[tokio::test]
async fn export_failure_writes_nothing() {
    let route = warp::path!("export" / "excel").and(warp::post()).map(|| {
        warp::reply::with_status(
            warp::reply::json(&json!({"error": "No data"})),
            warp::http::StatusCode::BAD_REQUEST,
        )
    });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let dir = assert_fs::TempDir::new().unwrap();
    let result = dir.child("run.json");
    result.write_str("{\"avg_max_queue\": 10.0}").unwrap();
    let exports = dir.child("exports");
    let result_arg = result.path().to_str().unwrap().to_string();
    let exports_arg = exports.path().to_str().unwrap().to_string();
    let base_url = format!("http://{addr}");

    task::spawn_blocking(move || {
        let mut cmd = assert_cmd::cargo_bin_cmd!("trafficsim");
        cmd.args([
            "export",
            "excel",
            "-i",
            &result_arg,
            "-d",
            &exports_arg,
            "--base-url",
            &base_url,
        ]);

        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("Export failed. Please try again."));
    })
    .await
    .unwrap();

    exports.assert(predicate::path::missing());
}
