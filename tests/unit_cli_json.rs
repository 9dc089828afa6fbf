#![allow(missing_docs)]

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use serde_json::Value;
use wldoc_testkit::{WldBuilder, fixtures};

#[test]
fn info_json_reports_counts_and_kinds() {
	let path = write_fixture("info_humanoid", fixtures::humanoid());
	let json = run_json(&["info", &path, "--json"]);

	assert_eq!(json["version"], "old");
	assert_eq!(json["declared_fragments"], 11);
	assert_eq!(json["decoded_fragments"], 11);
	assert!(json["issues"].as_array().is_some_and(|items| items.is_empty()));
	let kinds = json["kinds"].as_array().expect("kinds array");
	assert!(kinds.iter().any(|item| item["kind"] == "skeleton" && item["count"] == 1));
	assert!(kinds.iter().any(|item| item["kind"] == "track" && item["count"] == 4));
}

#[test]
fn fragments_json_filters_by_kind_and_name() {
	let path = write_fixture("fragments_humanoid", fixtures::humanoid());
	let json = run_json(&["fragments", &path, "--kind", "track", "--name", "c01", "--json"]);

	assert_eq!(json["count"], 2);
	let rows = json["fragments"].as_array().expect("fragments array");
	assert_eq!(rows[0]["name"], "C01HUMPE_TRACK");
	assert_eq!(rows[0]["type_id"], 0x13);
	assert_eq!(rows[0]["index"], 6);
}

#[test]
fn fragments_rejects_unknown_kind_labels() {
	let path = write_fixture("fragments_bad_kind", fixtures::humanoid());
	let output = Command::new(env!("CARGO_BIN_EXE_wldoc"))
		.args(["fragments", &path, "--kind", "nope"])
		.output()
		.expect("command executes");

	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("unknown fragment kind"));
}

#[test]
fn strings_json_lists_offsets() {
	let mut builder = WldBuilder::new();
	builder.string("FIRST");
	builder.string("SECOND");
	let path = write_fixture("strings", builder);
	let json = run_json(&["strings", &path, "--json"]);

	let strings = json["strings"].as_array().expect("strings array");
	assert!(strings.iter().any(|item| item["offset"] == 1 && item["value"] == "FIRST"));
	assert!(strings.iter().any(|item| item["offset"] == 7 && item["value"] == "SECOND"));
}

#[test]
fn skeleton_json_imports_shared_animations() {
	let path = write_fixture("skeleton_humanoid", fixtures::humanoid());
	let shared = write_fixture("skeleton_shared", fixtures::shared_animations());
	let json = run_json(&["skeleton", &path, "--shared", &shared, "--shared-model", "elf", "--json"]);

	assert_eq!(json["shared_tracks_bound"], 1);
	let skeleton = &json["skeletons"][0];
	assert_eq!(skeleton["name"], "HUM_HS_DEF");
	assert_eq!(skeleton["bones"][1]["index_path"], "0/1/");

	let animations = skeleton["animations"].as_array().expect("animations array");
	let shared = animations.iter().find(|item| item["name"] == "l02").expect("shared animation");
	assert_eq!(shared["shared_tracks"], 1);
	assert_eq!(shared["frame_count"], 6);
}

#[test]
fn bsp_json_reports_region_classification() {
	let path = write_fixture("bsp_zone", fixtures::zone());
	let json = run_json(&["bsp", &path, "--all", "--json"]);

	assert_eq!(json["linked_nodes"], 2);
	assert_eq!(json["trees"][0]["linked"], 2);

	let regions = json["regions"].as_array().expect("regions array");
	assert_eq!(regions.len(), 3);
	assert_eq!(regions[0]["classes"][0], "water");
	assert_eq!(regions[1]["zoneline"]["kind"], "reference");
	assert!(regions[2]["region_type"].is_null());
}

fn write_fixture(name: &str, builder: WldBuilder) -> String {
	let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR"));
	let path = dir.join(format!("{name}.wld"));
	fs::write(&path, builder.build()).expect("fixture written");
	path.display().to_string()
}

fn run_json(args: &[&str]) -> Value {
	let output = Command::new(env!("CARGO_BIN_EXE_wldoc")).args(args).output().expect("command executes");

	assert!(
		output.status.success(),
		"command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}
