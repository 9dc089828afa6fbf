//! XOR transform shared by the string table and embedded strings.

/// Static key applied cyclically over the input.
pub const KEY: [u8; 8] = [0x95, 0x3A, 0xC5, 0x2A, 0x95, 0x7A, 0x95, 0x6A];

/// Apply the key to `bytes` in place. Applying it twice restores the input.
pub fn apply(bytes: &mut [u8]) {
	for (idx, byte) in bytes.iter_mut().enumerate() {
		*byte ^= KEY[idx % KEY.len()];
	}
}

/// Decode a copy of `bytes`.
pub fn decode(bytes: &[u8]) -> Vec<u8> {
	let mut out = bytes.to_vec();
	apply(&mut out);
	out
}

/// Encode a copy of `bytes`. Identical to [`decode`].
pub fn encode(bytes: &[u8]) -> Vec<u8> {
	decode(bytes)
}

/// Decode an embedded string, dropping everything from the first NUL.
pub fn decode_string(bytes: &[u8]) -> String {
	let plain = decode(bytes);
	let end = plain.iter().position(|byte| *byte == 0).unwrap_or(plain.len());
	String::from_utf8_lossy(&plain[..end]).into_owned()
}
