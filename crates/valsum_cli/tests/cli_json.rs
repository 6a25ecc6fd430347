#![allow(missing_docs)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use valsum_testkit::{SummaryWriter, kind, write_fixture};

#[test]
fn info_json_reports_version_and_size() {
	let path = fixture("cli-info.bin", &scenario_buffer().0);
	let json = run_json(&["info", &path_arg(&path), "--json"]);

	assert_eq!(json["version"], 1);
	assert_eq!(json["compression"], "none");
	assert_eq!(json["bytes"].as_u64(), Some(scenario_buffer().0.len() as u64));
}

#[test]
fn args_json_decodes_point_argument() {
	let (bytes, index) = scenario_buffer();
	let buffer = fixture("cli-args.bin", &bytes);
	let shapes = fixture("cli-args-shapes.json", br#"[["Point", "x", "y"]]"#);

	let json = run_json(&[
		"args",
		&path_arg(&buffer),
		"--shapes",
		&path_arg(&shapes),
		"--index",
		&index.to_string(),
		"--json",
	]);

	assert_eq!(json["status"], "values");
	let point = &json["values"][0];
	assert_eq!(point["class"], "Point");
	assert_eq!(point["preview"]["own_properties_length"], 2);
	assert_eq!(point["preview"]["own_properties"][0]["key"], "x");
	assert_eq!(point["preview"]["own_properties"][0]["value"]["value"], 1);
	assert_eq!(point["preview"]["own_properties"][1]["value"]["value"], 2.5);
	assert_eq!(json["values"][1]["value"], "foo");
}

#[test]
fn args_sentinels_print_markers() {
	let buffer = fixture("cli-args-sentinel.bin", &scenario_buffer().0);

	let output = run(&["args", &path_arg(&buffer), "--index", "-2"]);
	assert!(output.status.success());
	assert_eq!(String::from_utf8_lossy(&output.stdout), "<no arguments>\n");

	let output = run(&["args", &path_arg(&buffer), "--index", "-1"]);
	assert!(output.status.success());
	assert_eq!(String::from_utf8_lossy(&output.stdout), "<missing>\n");
}

#[test]
fn value_text_without_shapes_reports_unknown_class() {
	let (bytes, index) = scenario_buffer();
	let buffer = fixture("cli-value.bin", &bytes);

	let output = run(&["value", &path_arg(&buffer), "--offset", &(index + 4).to_string()]);
	assert!(output.status.success());
	assert_eq!(String::from_utf8_lossy(&output.stdout), "<unknown>\n");
}

#[test]
fn zstd_buffers_are_accepted() {
	let (bytes, _) = scenario_buffer();
	let compressed = zstd::encode_all(bytes.as_slice(), 3).expect("zstd encodes");
	let path = fixture("cli-info.bin.zst", &compressed);

	let json = run_json(&["info", &path_arg(&path), "--json"]);
	assert_eq!(json["compression"], "zstd");
}

#[test]
fn decode_errors_exit_nonzero() {
	let buffer = fixture("cli-bad-version.bin", &[9, 0, 0, 0]);

	let output = run(&["info", &path_arg(&buffer)]);
	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.starts_with("error: unsupported value buffer version 9"), "stderr: {stderr}");
}

/// Version prefix, then one argument list: `Point { x: 1, y: 2.5 }` and `"foo"`.
fn scenario_buffer() -> (Vec<u8>, usize) {
	let mut out = SummaryWriter::with_version();
	let index = out.position();
	out.u32(2);
	out.object(kind::GENERIC_OBJECT, 0).u32(0).u32(2).int32(1).double(2.5);
	out.string_value("foo");
	(out.into_bytes(), index)
}

fn fixture(name: &str, bytes: &[u8]) -> PathBuf {
	write_fixture(name, bytes)
}

fn path_arg(path: &Path) -> String {
	path.display().to_string()
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_valsum")).args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(
		output.status.success(),
		"valsum command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}
