use crate::wld::WldError;
use crate::wld::bytes::Cursor;

#[test]
fn reads_little_endian_scalars_in_order() {
	let mut bytes = Vec::new();
	bytes.extend_from_slice(&0x1234_u16.to_le_bytes());
	bytes.extend_from_slice(&(-2_i32).to_le_bytes());
	bytes.extend_from_slice(&1.5_f32.to_le_bytes());
	bytes.push(0xff);

	let mut cursor = Cursor::new(&bytes);
	assert_eq!(cursor.read_u16_le().expect("u16"), 0x1234);
	assert_eq!(cursor.read_i32_le().expect("i32"), -2);
	assert_eq!(cursor.read_f32_le().expect("f32"), 1.5);
	assert_eq!(cursor.read_i8().expect("i8"), -1);
	assert_eq!(cursor.remaining(), 0);
}

#[test]
fn short_read_reports_offset_and_does_not_advance() {
	let bytes = [1_u8, 2, 3];
	let mut cursor = Cursor::new(&bytes);
	cursor.read_u8().expect("first byte");

	let err = cursor.read_u32_le().expect_err("only two bytes remain");
	assert!(matches!(err, WldError::UnexpectedEof { at: 1, need: 4, rem: 2 }));
	assert_eq!(cursor.pos(), 1);
}

#[test]
fn negative_count_is_rejected() {
	let bytes = (-3_i32).to_le_bytes();
	let mut cursor = Cursor::new(&bytes);
	let err = cursor.read_count("bone").expect_err("negative count");
	assert!(matches!(err, WldError::NegativeCount { field: "bone", count: -3 }));
}
