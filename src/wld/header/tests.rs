use wldoc_testkit::WldBuilder;

use crate::wld::{WldError, WldHeader, WldVersion};

#[test]
fn parses_old_dialect_header() {
	let bytes = WldBuilder::new().build();
	let header = WldHeader::parse(&bytes).expect("header parses");
	assert_eq!(header.version, WldVersion::Old);
	assert_eq!(header.fragment_count, 0);
	assert_eq!(header.string_table_size, 1);
	assert!(!header.is_new_format());
}

#[test]
fn parses_new_dialect_header() {
	let bytes = WldBuilder::new().new_format().build();
	let header = WldHeader::parse(&bytes).expect("header parses");
	assert_eq!(header.version, WldVersion::New);
	assert!(header.is_new_format());
}

#[test]
fn rejects_foreign_magic() {
	let mut bytes = WldBuilder::new().build();
	bytes[0] = b'P';
	let err = WldHeader::parse(&bytes).expect_err("bad magic");
	assert!(matches!(err, WldError::InvalidContainer { .. }));
}

#[test]
fn rejects_unknown_version() {
	let bytes = WldBuilder::new().version(0x0002_0000).build();
	let err = WldHeader::parse(&bytes).expect_err("bad version");
	assert!(matches!(err, WldError::UnrecognizedFormat { version: 0x0002_0000 }));
}

#[test]
fn short_header_is_truncated() {
	let bytes = WldBuilder::new().build();
	let err = WldHeader::parse(&bytes[..12]).expect_err("short header");
	assert!(matches!(err, WldError::TruncatedHeader { need: 28, have: 12 }));
}
