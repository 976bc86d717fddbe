use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("sidra").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("sidra"));
}

#[test]
fn get_from_local_payload_prints_stats_and_writes_spec() {
    let dir = tempfile::tempdir().unwrap();
    let payload_path = dir.path().join("payload.json");
    let spec_path = dir.path().join("spec.json");
    std::fs::write(
        &payload_path,
        r#"[
          {"D1N":"Unidade da Federação","D2N":"Ano","D3N":"Sexo","V":"Valor"},
          {"D1N":"Acre","D2N":"2022","D3N":"Total","V":"70.0"},
          {"D1N":"Amazonas","D2N":"2022","D3N":"Total","V":"90.0"}
        ]"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("sidra").unwrap();
    cmd.args([
        "get",
        "--input",
        payload_path.to_str().unwrap(),
        "--year",
        "2022",
        "--stats",
        "--spec",
        spec_path.to_str().unwrap(),
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Amazonas"));

    let spec: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&spec_path).unwrap()).unwrap();
    assert!(spec.get("Bar").is_some(), "default chart kind is bar");
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn fetch_online_literacy_stats() {
    let mut cmd = Command::cargo_bin("sidra").unwrap();
    cmd.args(["get", "--stats"]);
    cmd.assert().success();
}
