use crate::wld::StringTable;
use crate::wld::cipher::encode;

#[test]
fn offsets_are_cumulative_byte_positions() {
	let table = StringTable::decode(&encode(b"\0ELF_HS_DEF\0PE_DAG\0"));

	assert_eq!(table.len(), 3);
	assert_eq!(table.get(0).map(|item| item.as_ref()), Some(""));
	assert_eq!(table.get(1).map(|item| item.as_ref()), Some("ELF_HS_DEF"));
	assert_eq!(table.get(12).map(|item| item.as_ref()), Some("PE_DAG"));
	assert_eq!(table.byte_len(), 19);
}

#[test]
fn negative_reference_addresses_offset() {
	let table = StringTable::from_plain(b"\0WATER\0");
	assert_eq!(table.lookup(-1).map(|item| item.as_ref()), Some("WATER"));
	assert_eq!(table.name(-1).as_ref(), "WATER");
}

#[test]
fn zero_positive_and_missing_references_are_empty() {
	let table = StringTable::from_plain(b"NAME\0OTHER\0");
	assert!(table.lookup(0).is_none());
	assert!(table.lookup(5).is_none());
	assert!(table.lookup(-3).is_none(), "offset 3 is inside a string");
	assert_eq!(table.name(-3).as_ref(), "");
}

#[test]
fn trailing_piece_without_nul_is_kept() {
	let table = StringTable::from_plain(b"A\0BC");
	let items: Vec<_> = table.iter().collect();
	assert_eq!(items, vec![(0, "A"), (2, "BC")]);
}
