//! CLI integration tests
//!
//! Each test writes a workspace file into a scratch directory and runs the
//! built binary against it.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const WORKSPACE: &str = r#"
[[types]]
id = "mvn"
display_name = "Maven"
template = { name = "build", command_line = "mvn clean install" }

[[types]]
id = "custom"
display_name = "Custom"
template = { name = "newCustom", command_line = "echo hello" }

[[goals]]
id = "debug"
display_name = "Debug"

[[commands]]
name = "compile"
type_id = "mvn"
command_line = "mvn compile"
attributes = { goal = "build" }

[[commands]]
name = "package"
type_id = "mvn"
command_line = "mvn package"
attributes = { goal = "build" }

[[commands]]
name = "hello"
type_id = "custom"
command_line = "echo hello"
"#;

fn setup_workspace(temp_dir: &TempDir) -> PathBuf {
    let path = temp_dir.path().join("workspace.toml");
    fs::write(&path, WORKSPACE).unwrap();
    path
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cmdsync"))
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_cli_menu_prints_goal_groups() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = setup_workspace(&temp_dir);

    let output = run_cli(&["menu", "--workspace", workspace.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        stdout(&output),
        "Commands\n  Build (2)\n    compile\n    package\n  Common (1)\n    hello\n"
    );
}

#[test]
fn test_cli_explorer_lists_every_goal() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = setup_workspace(&temp_dir);

    let output = run_cli(&["explorer", "--workspace", workspace.to_str().unwrap()]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("Common (1)\n  hello: echo hello\nTest (0)\nBuild (2)\n"));
    assert!(text.contains("Deploy (0)\n"));
    assert!(text.ends_with("Debug (0)\n"));
}

#[test]
fn test_cli_create_suffixes_taken_name() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = setup_workspace(&temp_dir);

    let output = run_cli(&[
        "create",
        "--type",
        "mvn",
        "--goal",
        "deploy",
        "--workspace",
        workspace.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("Created build\n"));
    assert!(text.contains("  Deploy (1)\n    build\n"));
}

#[test]
fn test_cli_duplicate_and_remove() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = setup_workspace(&temp_dir);
    let workspace = workspace.to_str().unwrap();

    let output = run_cli(&["duplicate", "compile", "--workspace", workspace]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("Duplicated compile as compile-1\n"));
    assert!(text.contains("  Build (3)\n"));

    let output = run_cli(&["remove", "hello", "--workspace", workspace]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Removed hello\nCommands\n  Build (2)\n    compile\n    package\n"
    );
}

#[test]
fn test_cli_run_prints_command_line() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = setup_workspace(&temp_dir);

    let output = run_cli(&["run", "package", "--workspace", workspace.to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "$ mvn package\n");
}

#[test]
fn test_cli_failures_exit_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = setup_workspace(&temp_dir);
    let workspace = workspace.to_str().unwrap();

    let output = run_cli(&["remove", "ghost", "--workspace", workspace]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Command not found: ghost"));

    let output = run_cli(&["create", "--type", "ant", "--workspace", workspace]);
    assert_eq!(output.status.code(), Some(1));

    let output = run_cli(&["menu", "--workspace", "/nonexistent/workspace.toml"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_cli_config_reject_policy() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path().join("workspace.toml");
    let taken = "\n[[commands]]\nname = \"build\"\ntype_id = \"mvn\"\n";
    fs::write(&workspace, format!("{WORKSPACE}{taken}")).unwrap();
    let workspace = workspace.to_str().unwrap();
    let config = temp_dir.path().join("cmdsync.toml");
    let config_arg = config.to_str().unwrap();

    let output = run_cli(&["create", "--type", "mvn", "--workspace", workspace]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Created build-1\n"));

    fs::write(&config, "[naming]\npolicy = \"reject\"\n").unwrap();
    let output = run_cli(&[
        "create",
        "--type",
        "mvn",
        "--workspace",
        workspace,
        "--config",
        config_arg,
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("already in use: build"));

    fs::write(&config, "[naming]\nmax_name_suffix = 0\n").unwrap();
    let output = run_cli(&["menu", "--workspace", workspace, "--config", config_arg]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("max_name_suffix"));
}
