//! Shared test helpers for workspace crates.
//!
//! [`SummaryWriter`] encodes value summaries the same way the tracer does, so
//! tests can assemble buffers declaratively instead of hand-writing bytes.

use std::path::{Path, PathBuf};

/// Value header type tags (low nibble).
pub mod tag {
	/// IEEE 754 double.
	pub const DOUBLE: u8 = 0x0;
	/// 32-bit signed integer.
	pub const INT32: u8 = 0x1;
	/// Boolean, value in flags.
	pub const BOOLEAN: u8 = 0x2;
	/// `undefined`.
	pub const UNDEFINED: u8 = 0x3;
	/// `null`.
	pub const NULL: u8 = 0x4;
	/// Dense-element hole.
	pub const MAGIC: u8 = 0x5;
	/// String.
	pub const STRING: u8 = 0x6;
	/// Symbol.
	pub const SYMBOL: u8 = 0x7;
	/// BigInt, decimal text.
	pub const BIGINT: u8 = 0x9;
	/// Object, followed by a kind byte.
	pub const OBJECT: u8 = 0xc;
}

/// Object kind bytes following an object header.
pub mod kind {
	/// Class-name-only fallback.
	pub const NOT_IMPLEMENTED: u8 = 0;
	/// Arrays and sets.
	pub const ARRAY_LIKE: u8 = 1;
	/// Maps.
	pub const MAP_LIKE: u8 = 2;
	/// Functions.
	pub const FUNCTION: u8 = 3;
	/// Boxed primitives.
	pub const WRAPPED_PRIMITIVE_OBJECT: u8 = 4;
	/// Plain objects.
	pub const GENERIC_OBJECT: u8 = 5;
	/// Proxies.
	pub const PROXY_OBJECT: u8 = 6;
	/// Embedder-defined payload.
	pub const EXTERNAL: u8 = 7;
}

/// Out-of-line marker for numeric flags.
pub const NUMBER_IS_OUT_OF_LINE_MAGIC: u8 = 0xf;
/// Flag for generic objects carrying a dense-elements block.
pub const GENERIC_OBJECT_HAS_DENSE_ELEMENTS: u8 = 1;
/// Flag for symbols without a description.
pub const SYMBOL_NO_DESCRIPTION: u8 = 1;
/// Property prefix byte introducing a getter/setter pair.
pub const GETTER_SETTER_MAGIC: u8 = 0x0f;
/// Format version written at the start of a value buffer.
pub const VALUE_BUFFER_VERSION: u32 = 1;
/// Embedder summary version for external payloads.
pub const EXTERNAL_SUMMARY_VERSION: u8 = 1;
/// External payload kind for DOM-like nodes.
pub const EXTERNAL_KIND_NODE: u8 = 1;

/// String payload encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
	/// One byte per char.
	Latin1 = 0,
	/// UTF-16LE code units.
	TwoByte = 1,
	/// UTF-8 bytes.
	Utf8 = 2,
}

/// Producer-side encoder for value summary buffers.
#[derive(Debug, Default, Clone)]
pub struct SummaryWriter {
	bytes: Vec<u8>,
}

impl SummaryWriter {
	/// Create an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a writer primed with the value buffer version prefix.
	pub fn with_version() -> Self {
		let mut out = Self::new();
		out.u32(VALUE_BUFFER_VERSION);
		out
	}

	/// Current write offset.
	pub fn position(&self) -> usize {
		self.bytes.len()
	}

	/// Borrow written bytes.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Consume the writer.
	pub fn into_bytes(self) -> Vec<u8> {
		self.bytes
	}

	/// Append raw bytes.
	pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
		self.bytes.extend_from_slice(bytes);
		self
	}

	/// Append one byte.
	pub fn u8(&mut self, value: u8) -> &mut Self {
		self.bytes.push(value);
		self
	}

	/// Append a little-endian `u16`.
	pub fn u16(&mut self, value: u16) -> &mut Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append a little-endian `u32`.
	pub fn u32(&mut self, value: u32) -> &mut Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append a little-endian `i32`.
	pub fn i32(&mut self, value: i32) -> &mut Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append a little-endian `f64`.
	pub fn f64(&mut self, value: f64) -> &mut Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append a value header byte.
	pub fn header(&mut self, tag: u8, flags: u8) -> &mut Self {
		assert!(tag <= 0xf && flags <= 0xf, "header nibbles out of range");
		self.u8(flags << 4 | tag)
	}

	/// Append a string field in the given encoding.
	pub fn string(&mut self, encoding: Encoding, value: &str) -> &mut Self {
		let payload: Vec<u8> = match encoding {
			Encoding::Latin1 => value
				.chars()
				.map(|ch| u8::try_from(u32::from(ch)).expect("latin1 string"))
				.collect(),
			Encoding::TwoByte => value.encode_utf16().flat_map(|unit| unit.to_le_bytes()).collect(),
			Encoding::Utf8 => value.as_bytes().to_vec(),
		};
		let length = match encoding {
			Encoding::TwoByte => payload.len() / 2,
			_ => payload.len(),
		};
		assert!(length < 1 << 14, "string too long for length field");
		self.u16((encoding as u16) << 14 | length as u16);
		self.raw(&payload)
	}

	/// Append a Latin-1 string field.
	pub fn latin1(&mut self, value: &str) -> &mut Self {
		self.string(Encoding::Latin1, value)
	}

	/// Append an `int32` value, inline when it fits the header.
	pub fn int32(&mut self, value: i32) -> &mut Self {
		if (-1..=13).contains(&value) {
			self.header(tag::INT32, (value + 1) as u8)
		} else {
			self.header(tag::INT32, NUMBER_IS_OUT_OF_LINE_MAGIC).i32(value)
		}
	}

	/// Append a double value; positive zero is written inline.
	pub fn double(&mut self, value: f64) -> &mut Self {
		if value == 0.0 && value.is_sign_positive() {
			self.header(tag::DOUBLE, 0)
		} else {
			self.header(tag::DOUBLE, NUMBER_IS_OUT_OF_LINE_MAGIC).f64(value)
		}
	}

	/// Append a boolean value.
	pub fn boolean(&mut self, value: bool) -> &mut Self {
		self.header(tag::BOOLEAN, u8::from(value))
	}

	/// Append `undefined`.
	pub fn undefined(&mut self) -> &mut Self {
		self.header(tag::UNDEFINED, 0)
	}

	/// Append `null`.
	pub fn null(&mut self) -> &mut Self {
		self.header(tag::NULL, 0)
	}

	/// Append a dense-element hole.
	pub fn hole(&mut self) -> &mut Self {
		self.header(tag::MAGIC, 0)
	}

	/// Append a string value as Latin-1.
	pub fn string_value(&mut self, value: &str) -> &mut Self {
		self.header(tag::STRING, 0).latin1(value)
	}

	/// Append a string value in an explicit encoding.
	pub fn string_value_in(&mut self, encoding: Encoding, value: &str) -> &mut Self {
		self.header(tag::STRING, 0).string(encoding, value)
	}

	/// Append a symbol value.
	pub fn symbol(&mut self, description: Option<&str>) -> &mut Self {
		match description {
			Some(text) => self.header(tag::SYMBOL, 0).latin1(text),
			None => self.header(tag::SYMBOL, SYMBOL_NO_DESCRIPTION),
		}
	}

	/// Append a bigint value.
	pub fn bigint(&mut self, text: &str) -> &mut Self {
		self.header(tag::BIGINT, 0).latin1(text)
	}

	/// Append an object header and kind byte.
	pub fn object(&mut self, kind: u8, flags: u8) -> &mut Self {
		self.header(tag::OBJECT, flags).u8(kind)
	}

	/// Reserve an external payload size field and return its offset.
	pub fn begin_external(&mut self) -> usize {
		let offset = self.position();
		self.u32(0);
		offset
	}

	/// Back-patch the size field at `offset` with everything written since.
	pub fn end_external(&mut self, offset: usize) -> &mut Self {
		let size = u32::try_from(self.position() - offset).expect("external size fits u32");
		self.bytes[offset..offset + 4].copy_from_slice(&size.to_le_bytes());
		self
	}
}

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Write `bytes` under `<target>/valsum-fixtures/<name>` and return the path.
pub fn write_fixture(name: &str, bytes: &[u8]) -> PathBuf {
	let dir = target_dir().join("valsum-fixtures");
	std::fs::create_dir_all(&dir).expect("fixture dir is creatable");
	let path = dir.join(name);
	std::fs::write(&path, bytes).expect("fixture is writable");
	path
}
