use std::io::Read;

use crate::summary::buffer::read_version;
use crate::summary::{Result, SummaryError, VALUE_BUFFER_VERSION};

/// Upper bound on decompressed value buffer size.
pub const MAX_DECOMPRESSED_BYTES: usize = 256 * 1024 * 1024;
/// zstd frame magic used by compressed buffer dumps.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression mode detected for a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Raw uncompressed stream.
	None,
	/// zstd-compressed stream.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Detect and decode compression, returning `(mode, decoded_bytes)`.
///
/// A raw buffer starts with its little-endian version, which never matches
/// the zstd frame magic. Raw bytes are returned untouched; version errors on
/// them surface from [`crate::summary::ValueBuffer`].
pub fn decode_bytes(raw: Vec<u8>) -> Result<(Compression, Vec<u8>)> {
	if raw.starts_with(&ZSTD_MAGIC) {
		let out = decode_zstd(&raw, MAX_DECOMPRESSED_BYTES)?;
		return Ok((Compression::Zstd, out));
	}

	Ok((Compression::None, raw))
}

/// Inflate one zstd stream of at most `limit` bytes that must hold a value buffer.
fn decode_zstd(raw: &[u8], limit: usize) -> Result<Vec<u8>> {
	let decoder = zstd::stream::read::Decoder::new(raw)?;
	let mut out = Vec::new();
	// One byte past the limit is enough to tell an oversized stream apart.
	decoder.take(limit as u64 + 1).read_to_end(&mut out)?;
	if out.len() > limit {
		return Err(SummaryError::DecompressedTooLarge { limit });
	}

	match read_version(&out) {
		Ok(VALUE_BUFFER_VERSION) => Ok(out),
		_ => Err(SummaryError::NotValueBufferAfterDecompress {
			expected: VALUE_BUFFER_VERSION,
		}),
	}
}

#[cfg(test)]
mod tests {
	use crate::summary::SummaryError;
	use crate::summary::compression::{Compression, decode_bytes, decode_zstd};

	#[test]
	fn raw_bytes_pass_through() {
		let (mode, bytes) = decode_bytes(vec![1, 0, 0, 0, 0x13]).expect("raw decodes");
		assert_eq!(mode, Compression::None);
		assert_eq!(bytes, [1, 0, 0, 0, 0x13]);
	}

	#[test]
	fn zstd_frames_are_decompressed() {
		let payload = vec![1_u8, 0, 0, 0, 0x02, 0x12];
		let compressed = zstd::encode_all(payload.as_slice(), 3).expect("zstd encodes");

		let (mode, bytes) = decode_bytes(compressed).expect("zstd decodes");
		assert_eq!(mode, Compression::Zstd);
		assert_eq!(bytes, payload);
		assert_eq!(mode.as_str(), "zstd");
	}

	#[test]
	fn zstd_frame_without_value_buffer_prefix_is_rejected() {
		for payload in [&b"BLENDER-v405"[..], &[2, 0, 0, 0, 0x13][..], &[1, 0][..]] {
			let compressed = zstd::encode_all(payload, 3).expect("zstd encodes");
			let err = decode_bytes(compressed).expect_err("payload is not a value buffer");
			assert!(matches!(err, SummaryError::NotValueBufferAfterDecompress { expected: 1 }), "payload {payload:?}: {err}");
		}
	}

	#[test]
	fn zstd_output_past_limit_is_rejected() {
		let payload = [1_u8, 0, 0, 0, 0x02, 0x12, 0x22, 0x32];
		let compressed = zstd::encode_all(payload.as_slice(), 3).expect("zstd encodes");

		let err = decode_zstd(&compressed, 6).expect_err("eight bytes exceed limit");
		assert!(matches!(err, SummaryError::DecompressedTooLarge { limit: 6 }));
		assert_eq!(decode_zstd(&compressed, 8).expect("fits exactly"), payload);
	}
}
