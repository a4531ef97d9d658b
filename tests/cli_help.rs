use std::process::Command;

#[test]
fn test_help_lists_every_command() {
    let bin = env!("CARGO_BIN_EXE_deployml");

    let output = Command::new(bin).arg("--help").output().unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["deploy", "destroy", "init", "doctor", "status", "generate"] {
        assert!(
            stdout.contains(command),
            "help output should list `{command}`; got:\n{stdout}"
        );
    }
}

#[test]
fn test_missing_subcommand_is_a_usage_error() {
    let bin = env!("CARGO_BIN_EXE_deployml");

    let output = Command::new(bin).output().unwrap();

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_deploy_requires_config_path() {
    let bin = env!("CARGO_BIN_EXE_deployml");

    let output = Command::new(bin).arg("deploy").output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--config-path"), "got:\n{stderr}");
}
