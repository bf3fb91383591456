use assert_cmd::Command;

#[test]
fn test_help_lists_overrides() {
    let output = Command::cargo_bin("todo-server")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--config", "--database-url", "--listen-addr", "--port", "--log-level"] {
        assert!(stdout.contains(flag), "missing {flag} in:\n{stdout}");
    }
}

#[test]
fn test_invalid_configuration_exits_with_error() {
    Command::cargo_bin("todo-server")
        .unwrap()
        .env_remove("RUST_LOG")
        .env_remove("CONFIG_FILE")
        .args(["--database-url", "postgres://localhost/todos"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_port_is_rejected_by_parser() {
    Command::cargo_bin("todo-server")
        .unwrap()
        .args(["--port", "70000"])
        .assert()
        .failure();
}
