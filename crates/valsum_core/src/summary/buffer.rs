use std::fs;
use std::path::Path;

use crate::summary::compression::decode_bytes;
use crate::summary::{ArgumentDecodeResult, Compression, Cursor, Result, ShapeTable, SummaryError, ValueSummary, decode_arguments, decode_value_at};

/// Value buffer format version this decoder reads.
pub const VALUE_BUFFER_VERSION: u32 = 1;

/// Snapshot of a tracer value buffer.
///
/// The buffer opens with a little-endian `u32` format version; argument
/// indices recorded by the tracer are absolute offsets that include it.
#[derive(Debug, Clone)]
pub struct ValueBuffer {
	/// Compression mode detected for source bytes.
	pub compression: Compression,
	version: u32,
	bytes: Vec<u8>,
}

impl ValueBuffer {
	/// Read, decompress if needed, and validate a value buffer from disk.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let raw = fs::read(path)?;
		let (compression, bytes) = decode_bytes(raw)?;
		Self::validate(compression, bytes)
	}

	/// Validate an in-memory, uncompressed value buffer.
	pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
		Self::validate(Compression::None, bytes)
	}

	fn validate(compression: Compression, bytes: Vec<u8>) -> Result<Self> {
		let version = read_version(&bytes)?;
		if version != VALUE_BUFFER_VERSION {
			return Err(SummaryError::UnsupportedBufferVersion {
				version,
				expected: VALUE_BUFFER_VERSION,
			});
		}

		Ok(Self { compression, version, bytes })
	}

	/// Format version from the buffer prefix.
	pub fn version(&self) -> u32 {
		self.version
	}

	/// Return decoded raw bytes backing this buffer.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Buffer size in bytes, version prefix included.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Whether the buffer holds nothing but its version prefix.
	pub fn is_empty(&self) -> bool {
		self.bytes.len() <= 4
	}

	/// Decode the argument list recorded at `values_index`.
	pub fn argument_summaries(&self, shapes: &ShapeTable, values_index: i32) -> Result<ArgumentDecodeResult> {
		decode_arguments(&self.bytes, shapes, values_index)
	}

	/// Decode one value at an absolute offset.
	pub fn value_at(&self, shapes: &ShapeTable, offset: usize, depth: u32) -> Result<ValueSummary> {
		decode_value_at(&self.bytes, shapes, offset, depth)
	}
}

/// Read the little-endian version prefix of a decoded value buffer.
pub(crate) fn read_version(bytes: &[u8]) -> Result<u32> {
	Cursor::new(bytes).read_u32()
}
