use super::decode;

const REGIONS: usize = 1024;

#[test]
fn skip_then_include_runs() {
	assert_eq!(decode(&[0x02, 0xC3], false, REGIONS), vec![2, 3, 4]);
}

#[test]
fn long_skip_reads_u16() {
	assert_eq!(decode(&[0x3F, 0x00, 0x01, 0xC1], false, REGIONS), vec![256]);
}

#[test]
fn packed_skip_include_uses_both_fields() {
	// skip 2, include 1
	assert_eq!(decode(&[0x51], false, REGIONS), vec![2]);
	// include 2, skip 1, include 1
	assert_eq!(decode(&[0x91, 0xC1], false, REGIONS), vec![0, 1, 3]);
}

#[test]
fn long_include_reads_u16() {
	assert_eq!(decode(&[0xFF, 0x02, 0x00], false, REGIONS), vec![0, 1]);
}

#[test]
fn truncated_run_stops_quietly() {
	assert_eq!(decode(&[0xC1, 0xFF, 0x05], false, REGIONS), vec![0]);
}

#[test]
fn word_encoding_lists_one_based_ids() {
	assert_eq!(decode(&[0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x07], true, REGIONS), vec![0, 2]);
}

#[test]
fn runs_stop_at_the_region_count() {
	let entry: Vec<u8> = [0xFF, 0xFF, 0xFF].repeat(1000);
	assert_eq!(decode(&entry, false, 5), vec![0, 1, 2, 3, 4]);
	assert_eq!(decode(&[0xC2, 0x3F, 0xFF, 0xFF, 0xC4], false, 10), vec![0, 1]);
}

#[test]
fn words_past_the_region_count_are_dropped() {
	assert_eq!(decode(&[0x02, 0x00, 0xFF, 0xFF], true, 4), vec![1]);
}

#[test]
fn no_regions_means_nothing_is_visible() {
	assert!(decode(&[0xC3], false, 0).is_empty());
}
