// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! These tests run the actual robomsg binary and verify its behavior.

mod common;

use std::process::{Command, Output};

use common::{fixture_path, pose_stamped_bytes};

/// Run robomsg with arguments
fn run(args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_robomsg");
    Command::new(bin)
        .args(args)
        .output()
        .unwrap_or_else(|_| panic!("Failed to run {:?}", bin))
}

/// Run robomsg and assert success
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run robomsg and assert failure
fn run_err(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command should have failed but succeeded: {:?}",
        args
    );
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn fixture(name: &str) -> String {
    fixture_path(name).to_string_lossy().to_string()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    let output = run_ok(&["--help"]);
    assert!(output.contains("Decode and construct ROS1 messages"));
    assert!(output.contains("decode"));
    assert!(output.contains("template"));
    assert!(output.contains("schema"));
}

#[test]
fn test_cli_version() {
    let output = run_ok(&["--version"]);
    assert!(output.contains("robomsg"));
}

#[test]
fn test_cli_no_args() {
    let output = run(&[]);
    assert!(!output.status.success());
}

// ============================================================================
// Decode Tests
// ============================================================================

#[test]
fn test_decode_hex() {
    let pair = fixture("pair.msg");
    let output = run_ok(&[
        "decode", "-d", &pair, "-t", "test/Pair", "--hex", "070a000000", "--compact",
    ]);
    assert_eq!(output.trim(), r#"{"a":7,"b":10}"#);
}

#[test]
fn test_decode_hex_with_prefix_and_spaces() {
    let pair = fixture("pair.msg");
    let output = run_ok(&[
        "decode", "-d", &pair, "-t", "test/Pair", "--hex", "0x07 0a 00 00 00", "--compact",
    ]);
    assert_eq!(output.trim(), r#"{"a":7,"b":10}"#);
}

#[test]
fn test_decode_input_file() {
    let path = std::env::temp_dir().join(format!("robomsg_cli_pose_{}.bin", std::process::id()));
    std::fs::write(&path, pose_stamped_bytes()).unwrap();

    let definition = fixture("pose_stamped.msg");
    let input = path.to_string_lossy().to_string();
    let output = run_ok(&[
        "decode",
        "-d",
        &definition,
        "-t",
        "geometry_msgs/PoseStamped",
        "-i",
        &input,
    ]);
    std::fs::remove_file(&path).ok();

    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["header"]["seq"], 42);
    assert_eq!(json["header"]["stamp"]["secs"], 1_700_000_000u32);
    assert_eq!(json["header"]["frame_id"], "map");
    assert_eq!(json["pose"]["position"]["y"], 2.0);
    assert!(output.find("\"header\"").unwrap() < output.find("\"pose\"").unwrap());
}

#[test]
fn test_decode_stream() {
    let pair = fixture("pair.msg");
    let output = run_ok(&[
        "decode",
        "-d",
        &pair,
        "-t",
        "test/Pair",
        "--hex",
        "070a000000 0114000000",
        "--stream",
    ]);
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(lines, vec![r#"{"a":7,"b":10}"#, r#"{"a":1,"b":20}"#]);
}

#[test]
fn test_decode_stream_reports_failing_message() {
    let pair = fixture("pair.msg");
    let stderr = run_err(&[
        "decode", "-d", &pair, "-t", "test/Pair", "--hex", "070a000000 01", "--stream",
    ]);
    assert!(stderr.contains("message 1 at byte 5"), "{stderr}");
}

#[test]
fn test_decode_truncated_input() {
    let pair = fixture("pair.msg");
    let stderr = run_err(&["decode", "-d", &pair, "-t", "test/Pair", "--hex", "070a00"]);
    assert!(stderr.contains("Buffer too short"), "{stderr}");
}

#[test]
fn test_decode_trailing_bytes() {
    let pair = fixture("pair.msg");
    let args = [
        "decode",
        "-d",
        pair.as_str(),
        "-t",
        "test/Pair",
        "--hex",
        "070a000000ff",
    ];
    let stderr = run_err(&args);
    assert!(stderr.contains("trailing bytes"), "{stderr}");

    let lenient = fixture("lenient.toml");
    let mut lenient_args = args.to_vec();
    lenient_args.extend(["--config", lenient.as_str(), "--compact"]);
    let output = run_ok(&lenient_args);
    assert_eq!(output.trim(), r#"{"a":7,"b":10}"#);
}

#[test]
fn test_decode_config_limits_array_length() {
    let bytes = fixture("bytes.msg");
    let strict = fixture("strict.toml");
    let hex = "03000000010203";

    let output = run_ok(&["decode", "-d", &bytes, "-t", "test/Bytes", "--hex", hex, "--compact"]);
    assert_eq!(output.trim(), r#"{"data":[1,2,3]}"#);

    let stderr = run_err(&[
        "decode", "-d", &bytes, "-t", "test/Bytes", "--hex", hex, "--config", &strict,
    ]);
    assert!(stderr.contains("exceeds maximum"), "{stderr}");
}

#[test]
fn test_decode_invalid_hex() {
    let pair = fixture("pair.msg");
    let stderr = run_err(&["decode", "-d", &pair, "-t", "test/Pair", "--hex", "zz"]);
    assert!(stderr.contains("Invalid hex input"), "{stderr}");
}

#[test]
fn test_decode_missing_definition() {
    let stderr = run_err(&[
        "decode",
        "-d",
        "/nonexistent/Missing.msg",
        "-t",
        "test/Missing",
        "--hex",
        "00",
    ]);
    assert!(stderr.contains("Failed to load definition"), "{stderr}");
}

// ============================================================================
// Template Tests
// ============================================================================

#[test]
fn test_template_pose_stamped() {
    let definition = fixture("pose_stamped.msg");
    let output = run_ok(&[
        "template",
        "-d",
        &definition,
        "-t",
        "geometry_msgs/PoseStamped",
    ]);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["header"]["seq"], 0);
    assert_eq!(json["header"]["frame_id"], "");
    assert_eq!(json["pose"]["orientation"]["w"], 0.0);
}

#[test]
fn test_template_unknown_type() {
    let pair = fixture("pair.msg");
    // The root block is registered under the requested name, so an unknown
    // nested reference is what fails.
    let definition = std::env::temp_dir().join(format!("robomsg_cli_{}.msg", std::process::id()));
    std::fs::write(&definition, "other_msgs/Missing inner\n").unwrap();
    let path = definition.to_string_lossy().to_string();
    let stderr = run_err(&["template", "-d", &path, "-t", "test/Outer"]);
    std::fs::remove_file(&definition).ok();
    assert!(stderr.contains("other_msgs/Missing"), "{stderr}");

    let output = run_ok(&["template", "-d", &pair, "-t", "test/Pair", "--compact"]);
    assert_eq!(output.trim(), r#"{"a":0,"b":0}"#);
}

// ============================================================================
// Schema Tests
// ============================================================================

#[test]
fn test_schema_tree() {
    let pair = fixture("pair.msg");
    let output = run_ok(&["schema", "-d", &pair, "-t", "test/Pair"]);
    assert!(output.starts_with("test/Pair\n"));
    assert!(output.contains("  uint8 a\n"));
    assert!(output.contains("  uint32 b\n"));
    assert!(output.contains("# fixed size: 5 bytes"));
    assert!(output.contains("# md5: 763b91c4f8a883341881104a0436ba4c"));

    let bytes = fixture("bytes.msg");
    let output = run_ok(&["schema", "-d", &bytes, "-t", "test/Bytes"]);
    assert!(output.contains("uint8[] data"));
    assert!(output.contains("# variable size"));
}

#[test]
fn test_schema_full_text() {
    let definition = fixture("pose_stamped.msg");
    let output = run_ok(&[
        "schema",
        "-d",
        &definition,
        "-t",
        "geometry_msgs/PoseStamped",
        "--full-text",
    ]);
    let blocks: Vec<_> = output.lines().filter(|l| l.starts_with("MSG: ")).collect();
    assert_eq!(
        blocks,
        vec![
            "MSG: std_msgs/Header",
            "MSG: geometry_msgs/Pose",
            "MSG: geometry_msgs/Point",
            "MSG: geometry_msgs/Quaternion",
        ]
    );

    let output = run_ok(&["schema", "-d", &definition, "-t", "geometry_msgs/PoseStamped"]);
    assert!(output.contains("# md5: d3812c3cbc69362b77dc0b19b345f8f5"), "{output}");
}

#[test]
fn test_schema_json_round_trip() {
    let definition = fixture("pose_stamped.msg");
    let output = run_ok(&[
        "schema",
        "-d",
        &definition,
        "-t",
        "geometry_msgs/PoseStamped",
        "--json",
    ]);

    let path = std::env::temp_dir().join(format!("robomsg_cli_schema_{}.json", std::process::id()));
    std::fs::write(&path, &output).unwrap();
    let json_path = path.to_string_lossy().to_string();

    // A .json definition is loaded as a schema directly.
    let decoded = run_ok(&[
        "template",
        "-d",
        &json_path,
        "-t",
        "geometry_msgs/PoseStamped",
        "--compact",
    ]);
    std::fs::remove_file(&path).ok();
    assert!(decoded.starts_with(r#"{"header":{"seq":0,"#), "{decoded}");
}
