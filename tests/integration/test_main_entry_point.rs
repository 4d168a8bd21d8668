// main.rsとエントリーポイントのテスト
use std::process::{Command, Output};

fn run_binary(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_widget_line"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn count_lines(stdout: &str, needle: &str) -> usize {
    stdout.lines().filter(|line| line.contains(needle)).count()
}

#[test]
fn test_cli_help() {
    let output = run_binary(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("widget_line"));
    assert!(stdout.contains("--widgets"));
    assert!(stdout.contains("--kth"));
}

#[test]
fn test_scenario_a_output() {
    let output = run_binary(&["-n", "5", "-p", "1", "-c", "1", "-k", "-1"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(count_lines(&stdout, " consumes [id="), 5);
    assert_eq!(count_lines(&stdout, "found a broken widget"), 0);
    assert!(!stdout.contains("[execution stops]"));
    assert!(stdout.lines().last().unwrap().starts_with("The program took [ "));
}

#[test]
fn test_scenario_b_output() {
    let output = run_binary(&["-n", "5", "-p", "2", "-c", "2", "-k", "3"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(count_lines(&stdout, "found a broken widget"), 1);
    assert!(count_lines(&stdout, " consumes [id=") <= 4);
    assert!(stdout.contains("[execution stops]"));
}

#[test]
fn test_scenario_c_output() {
    let output = run_binary(&["-n", "0"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(count_lines(&stdout, " consumes [id="), 0);
    assert_eq!(stdout.lines().count(), 1);
}

#[test]
fn test_json_summary() {
    let output = run_binary(&["-n", "3", "--quiet", "--json"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let start = stdout.find('{').unwrap();
    let end = stdout.rfind('}').unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout[start..=end]).unwrap();

    assert_eq!(json["outcome"], "completed");
    assert_eq!(json["produced"], 3);
    assert_eq!(json["delivered"], 3);
    assert_eq!(json["consumed"], 3);
}

#[test]
fn test_zero_consumers_fails() {
    let output = run_binary(&["-n", "3", "-c", "0"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("consumers"));
    assert!(stderr.contains("--help"));
}

#[test]
fn test_invalid_flag_value() {
    let output = run_binary(&["-p", "many"]);

    assert_eq!(output.status.code(), Some(2));
}
