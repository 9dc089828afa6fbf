use crate::wld::FragmentRef;

#[test]
fn one_based_value_resolves_to_previous_index() {
	let item = FragmentRef::resolve(3, 5).expect("in range");
	assert_eq!(item.index(), 2);
	assert_eq!(item.raw(), 3);
	assert_eq!(item.to_string(), "#3");
}

#[test]
fn zero_and_negative_are_absent() {
	assert_eq!(FragmentRef::resolve(0, 5), None);
	assert_eq!(FragmentRef::resolve(-4, 5), None);
}

#[test]
fn forward_reference_is_absent() {
	// Fragment 5 (zero-based) sees five prior fragments; raw 8 addresses index 7.
	assert_eq!(FragmentRef::resolve(8, 5), None);
	assert_eq!(FragmentRef::resolve(6, 5), None);
	assert_eq!(FragmentRef::resolve(5, 5).map(FragmentRef::index), Some(4));
}
