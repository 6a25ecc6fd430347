use crate::summary::{Result, SummaryError};

const STRING_LENGTH_MASK: u16 = !(0b11 << 14);
const STRING_ENCODING_SHIFT: u16 = 14;

/// Character encoding carried in the top two bits of a string length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringEncoding {
	/// One byte per character, Latin-1.
	Latin1,
	/// Two bytes per character, little-endian UTF-16 code units.
	TwoByte,
	/// Variable-width UTF-8, length counted in bytes.
	Utf8,
}

impl StringEncoding {
	/// Map the raw two-bit tag to an encoding.
	pub fn from_raw(raw: u8) -> Option<Self> {
		match raw {
			0 => Some(Self::Latin1),
			1 => Some(Self::TwoByte),
			2 => Some(Self::Utf8),
			_ => None,
		}
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Latin1 => "latin1",
			Self::TwoByte => "two-byte",
			Self::Utf8 => "utf-8",
		}
	}
}

/// Positioned little-endian reader over an immutable byte slice.
///
/// The offset is the only mutable state touched while decoding. Every read
/// is bounds-checked and reports [`SummaryError::UnexpectedEof`] instead of
/// reading past the end.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Create a cursor positioned at `index`.
	pub fn at(bytes: &'a [u8], index: usize) -> Result<Self> {
		let mut cursor = Self::new(bytes);
		cursor.set_index(index)?;
		Ok(cursor)
	}

	/// Return current byte offset.
	pub fn get_index(&self) -> usize {
		self.pos
	}

	/// Reposition to an absolute offset. The end of the buffer is a valid position.
	pub fn set_index(&mut self, index: usize) -> Result<()> {
		if index > self.bytes.len() {
			return Err(SummaryError::IndexOutOfRange {
				index,
				len: self.bytes.len(),
			});
		}
		self.pos = index;
		Ok(())
	}

	/// Total length of the underlying buffer.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Whether the underlying buffer is empty.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(SummaryError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Return the next byte without advancing.
	pub fn peek_u8(&self) -> Result<u8> {
		self.bytes.get(self.pos).copied().ok_or(SummaryError::UnexpectedEof {
			at: self.pos,
			need: 1,
			rem: 0,
		})
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read a little-endian `u16`.
	pub fn read_u16(&mut self) -> Result<u16> {
		Ok(u16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read one signed byte.
	pub fn read_i8(&mut self) -> Result<i8> {
		Ok(i8::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i16`.
	pub fn read_i16(&mut self) -> Result<i16> {
		Ok(i16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian IEEE 754 `f64`.
	pub fn read_f64(&mut self) -> Result<f64> {
		Ok(f64::from_le_bytes(self.read_array()?))
	}

	/// Read a length/encoding-prefixed string.
	///
	/// The `u16` prefix holds the length in its low 14 bits and the
	/// [`StringEncoding`] in its top two. A zero length yields an empty string
	/// without reading a payload, whatever the encoding bits say. Latin-1 and
	/// UTF-8 lengths count bytes; two-byte lengths count UTF-16 code units.
	pub fn read_string(&mut self) -> Result<String> {
		let at = self.pos;
		let field = self.read_u16()?;
		let length = usize::from(field & STRING_LENGTH_MASK);
		if length == 0 {
			return Ok(String::new());
		}

		let raw_encoding = (field >> STRING_ENCODING_SHIFT) as u8;
		let encoding = StringEncoding::from_raw(raw_encoding).ok_or(SummaryError::UnknownStringEncoding { encoding: raw_encoding, at })?;

		match encoding {
			StringEncoding::Latin1 => {
				let raw = self.read_exact(length)?;
				Ok(raw.iter().map(|byte| char::from(*byte)).collect())
			}
			StringEncoding::TwoByte => {
				let raw = self.read_exact(length * 2)?;
				let units: Vec<u16> = raw.chunks_exact(2).map(|pair| u16::from_le_bytes([pair[0], pair[1]])).collect();
				Ok(String::from_utf16_lossy(&units))
			}
			StringEncoding::Utf8 => {
				let raw = self.read_exact(length)?;
				Ok(String::from_utf8_lossy(raw).into_owned())
			}
		}
	}

	/// Read a zero-terminated byte string without the terminator.
	pub fn read_cstring_bytes(&mut self) -> Result<&'a [u8]> {
		let start = self.pos;
		let rem = &self.bytes[self.pos..];
		let Some(rel_end) = rem.iter().position(|byte| *byte == 0) else {
			return Err(SummaryError::UnexpectedEof {
				at: self.pos,
				need: 1,
				rem: self.remaining(),
			});
		};

		let end = start + rel_end;
		self.pos = end + 1;
		Ok(&self.bytes[start..end])
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}
}
