use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, SummaryError>;

/// Errors produced while loading value buffers and decoding summaries.
#[derive(Debug, Error)]
pub enum SummaryError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Cursor was repositioned past the end of its buffer.
	#[error("cursor index {index} out of range (len={len})")]
	IndexOutOfRange {
		/// Requested absolute index.
		index: usize,
		/// Buffer length.
		len: usize,
	},
	/// Value buffer carried a format version this decoder does not read.
	#[error("unsupported value buffer version {version} (expected {expected})")]
	UnsupportedBufferVersion {
		/// Version found in the buffer prefix.
		version: u32,
		/// Version understood by this decoder.
		expected: u32,
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// A zstd frame decompressed to something other than a readable value buffer.
	#[error("decompressed stream is not a version {expected} value buffer")]
	NotValueBufferAfterDecompress {
		/// Version prefix required after decompression.
		expected: u32,
	},
	/// Header byte carried a type tag outside the known tag set.
	#[error("unknown value tag 0x{tag:x} at offset {at}")]
	UnknownValueTag {
		/// Low-nibble tag value.
		tag: u8,
		/// Offset of the header byte.
		at: usize,
	},
	/// Object header was followed by an unknown kind byte.
	#[error("unknown object kind {kind} at offset {at}")]
	UnknownObjectKind {
		/// Raw kind byte.
		kind: u8,
		/// Offset of the kind byte.
		at: usize,
	},
	/// String length field carried an unknown encoding.
	#[error("unknown string encoding {encoding} at offset {at}")]
	UnknownStringEncoding {
		/// Two-bit encoding tag.
		encoding: u8,
		/// Offset of the length/encoding field.
		at: usize,
	},
	/// A hole marker appeared where a value is required.
	#[error("unexpected hole marker at offset {at}")]
	UnexpectedHole {
		/// Offset of the hole header.
		at: usize,
	},
	/// Object property count disagrees with its shape's property names.
	#[error("shape {shape_id} lists {names} property names but object encodes {encoded}")]
	ShapePropertyMismatch {
		/// Shape id referenced by the object.
		shape_id: u32,
		/// Usable property names on the shape.
		names: usize,
		/// Property values encoded for the object.
		encoded: usize,
	},
	/// External payload declared a size reaching past the buffer end.
	#[error("external payload size {size} at offset {at} exceeds remaining {rem}")]
	ExternalSizeOutOfRange {
		/// Offset of the size field.
		at: usize,
		/// Declared payload size.
		size: u32,
		/// Bytes available from `at`.
		rem: usize,
	},
	/// Argument values index is negative but not a known sentinel.
	#[error("invalid values index {index}")]
	InvalidValuesIndex {
		/// Offending index.
		index: i32,
	},
	/// Shape table input could not be interpreted.
	#[error("invalid shape table: {reason}")]
	InvalidShapeTable {
		/// Human-readable description of the problem.
		reason: String,
	},
	/// CLI offset/index argument was not a valid number.
	#[error("invalid index literal: {value}")]
	InvalidIndexLiteral {
		/// User-provided literal.
		value: String,
	},
}
