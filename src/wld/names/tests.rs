use super::{clean_bone_name, clean_name, clean_track_name, model_base, piece_name};

#[test]
fn clean_name_strips_kind_suffixes() {
	assert_eq!(clean_name("HUM_HS_DEF"), "hum");
	assert_eq!(clean_name("C01HUMPE_TRACKDEF"), "c01humpe");
	assert_eq!(clean_name("C01HUMPE_TRACK"), "c01humpe");
	assert_eq!(clean_name("BARREL_DMSPRITEDEF"), "barrel");
	assert_eq!(clean_name("BARREL_ACTORDEF"), "barrel");
	assert_eq!(clean_name("plain"), "plain");
}

#[test]
fn specific_cleaners_only_strip_their_suffix() {
	assert_eq!(model_base("ELF_HS_DEF"), "elf");
	assert_eq!(model_base("ELF_TRACK"), "elf_track");
	assert_eq!(clean_bone_name("HUMPE_DAG"), "humpe");
	assert_eq!(clean_track_name("HUMPE_TRACK"), "humpe");
}

#[test]
fn piece_name_strips_model_base_and_falls_back_to_root() {
	assert_eq!(piece_name("humpe", "hum"), "pe");
	assert_eq!(piece_name("hum", "hum"), "root");
	assert_eq!(piece_name("elfpe", "hum"), "elfpe");
	assert_eq!(piece_name("", ""), "root");
}
