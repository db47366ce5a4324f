use httpmock::prelude::*;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const ACCOUNTS: &str = r#"
[accounts]
admin_username = "admin"
admin_password = "password"
"#;

fn write_config(dir: &Path, interface: &str) -> PathBuf {
    let path = dir.join("harness.toml");
    std::fs::write(&path, format!("{}\n{}", interface, ACCOUNTS)).unwrap();
    path
}

fn run_harness(config: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_andromeda-harness"))
        .arg("--config")
        .arg(config)
        .args(extra)
        .output()
        .unwrap()
}

/// CLI config whose index.php is a shell script run with `sh`.
#[cfg(unix)]
fn scripted_server(dir: &Path, script: &str) -> PathBuf {
    std::fs::write(dir.join("index.php"), script).unwrap();
    write_config(
        dir,
        &format!(
            "[interface]\nkind = \"cli\"\nphp_binary = \"sh\"\nserver_root = \"{}\"\n",
            dir.display()
        ),
    )
}

#[test]
fn test_missing_config_exits_2() {
    let dir = TempDir::new().unwrap();

    let output = run_harness(&dir.path().join("nope.toml"), &[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_invalid_config_exits_2() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "[interface]\nkind = \"http\"\n");

    let output = run_harness(&config, &[]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_dry_run_sends_nothing() {
    let server = MockServer::start();
    let any = server.mock(|when, then| {
        when.path("/index.php");
        then.status(200)
            .json_body(serde_json::json!({"ok": true, "code": 200, "appdata": null}));
    });
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        &format!("[interface]\nkind = \"http\"\nurl = \"{}\"\n", server.url("/index.php")),
    );

    let output = run_harness(&config, &["--dry-run"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("would install and test: files"), "{}", stdout);
    assert_eq!(any.hits(), 0);
}

#[test]
fn test_unreachable_server_exits_3() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        "[interface]\nkind = \"http\"\nurl = \"http://127.0.0.1:9/index.php\"\ntimeout_seconds = 5\n",
    );

    let output = run_harness(&config, &["--apps", "core"]);

    assert_eq!(output.status.code(), Some(3));
}

#[cfg(unix)]
#[test]
fn test_passing_run_prints_json_report() {
    let dir = TempDir::new().unwrap();
    let config = scripted_server(
        dir.path(),
        r#"if [ "$2" = "notanapp" ]; then
  echo '{"ok":false,"code":400,"message":"UNKNOWN_APP"}'
else
  echo '{"ok":true,"code":200,"appdata":{"id":"acc1"}}'
fi"#,
    );

    let output = run_harness(&config, &["--json"]);

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let cases = report["cases"].as_array().unwrap();
    assert_eq!(cases.len(), 3);
    assert!(cases.iter().all(|c| c["outcome"]["status"] == "passed"));
}

#[cfg(unix)]
#[test]
fn test_failed_install_exits_1() {
    let dir = TempDir::new().unwrap();
    let config = scripted_server(
        dir.path(),
        r#"if [ "$2" = "files" ]; then
  echo '{"ok":false,"code":500,"message":"DATABASE_ERROR"}'
else
  echo '{"ok":true,"code":200,"appdata":{"id":"acc1"}}'
fi"#,
    );

    let output = run_harness(&config, &["--json"]);

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["cases"][0]["outcome"]["status"], "not_run");
    assert_eq!(report["cases"][2]["outcome"]["status"], "install_failed");
    assert_eq!(report["cases"][2]["outcome"]["severity"], "high");
}

#[cfg(unix)]
#[test]
fn test_garbage_server_output_exits_3() {
    let dir = TempDir::new().unwrap();
    let config = scripted_server(dir.path(), "echo 'PHP Fatal error: out of memory'");

    let output = run_harness(&config, &["--apps", "core"]);

    assert_eq!(output.status.code(), Some(3));
}
