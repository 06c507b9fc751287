mod common;

use assert_cmd::Command;
use serde_json::Value;

#[test]
fn cli_help_runs() {
    let mut cmd = Command::cargo_bin("fda-dash").expect("binary exists");
    cmd.arg("--help").assert().success();
}

#[test]
fn unknown_subcommand_fails() {
    let mut cmd = Command::cargo_bin("fda-dash").expect("binary exists");
    cmd.arg("frobnicate").assert().failure();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn top_json_prints_only_rows_on_stdout() {
    let (addr, upstream) = common::spawn_upstream().await;
    let base_url = format!("http://{addr}/ok");

    let output = tokio::task::spawn_blocking(move || {
        Command::cargo_bin("fda-dash")
            .expect("binary exists")
            .env("OPENFDA_BASE_URL", base_url)
            .env("RUST_LOG", "fda_dash=info")
            .env("NO_PROXY", "127.0.0.1")
            .args(["top", "--json", "--limit", "9"])
            .output()
            .expect("run fda-dash")
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{output:?}");
    let rows: Value = serde_json::from_slice(&output.stdout).expect("stdout is pure json");
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["drug_name"], "ASPIRIN");
    assert_eq!(rows[0]["count"], 3);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("querying openFDA"), "{stderr}");
    assert_eq!(upstream.hits(), 1);
}
