use crate::summary::object::decode_object;
use crate::summary::{Cursor, Result, ShapeTable, SpecialNumber, SummaryError, ValueSummary};

/// Cap on items decoded per collection, property list, attribute list,
/// child-node list, and parameter list.
pub const MAX_COLLECTION_VALUES: usize = 16;

/// Depth below which composite previews are expanded.
pub const MAX_PREVIEW_DEPTH: u32 = 1;

const NUMBER_IS_OUT_OF_LINE_MAGIC: u8 = 0xf;
const MIN_INLINE_INT: i32 = -1;
const SYMBOL_NO_DESCRIPTION: u8 = 1;

/// Type tag carried in the low nibble of a value header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ValueTag {
	/// IEEE 754 double.
	Double = 0x0,
	/// 32-bit signed integer.
	Int32 = 0x1,
	/// Boolean, value in flags.
	Boolean = 0x2,
	/// `undefined`.
	Undefined = 0x3,
	/// `null`.
	Null = 0x4,
	/// Dense-element hole marker.
	Magic = 0x5,
	/// String.
	String = 0x6,
	/// Symbol.
	Symbol = 0x7,
	/// BigInt as decimal text.
	BigInt = 0x9,
	/// Object, followed by a kind byte.
	Object = 0xc,
}

impl ValueTag {
	/// Map a low-nibble tag to a known type.
	pub fn from_raw(raw: u8) -> Option<Self> {
		match raw {
			0x0 => Some(Self::Double),
			0x1 => Some(Self::Int32),
			0x2 => Some(Self::Boolean),
			0x3 => Some(Self::Undefined),
			0x4 => Some(Self::Null),
			0x5 => Some(Self::Magic),
			0x6 => Some(Self::String),
			0x7 => Some(Self::Symbol),
			0x9 => Some(Self::BigInt),
			0xc => Some(Self::Object),
			_ => None,
		}
	}
}

/// Header byte written for a dense-element hole.
pub(crate) const HOLE_HEADER: u8 = ValueTag::Magic as u8;

/// Whether composite values at `depth` expand their items.
pub(crate) fn expands_preview(depth: u32) -> bool {
	depth < MAX_PREVIEW_DEPTH
}

/// Clamp a declared count to [`MAX_COLLECTION_VALUES`].
pub(crate) fn capped(count: u32) -> usize {
	(count as usize).min(MAX_COLLECTION_VALUES)
}

/// Decode one value summary at the cursor.
///
/// `depth` is 0 for top-level values and grows by one for each preview
/// level; composite values at depth >= [`MAX_PREVIEW_DEPTH`] keep only their
/// counts.
pub fn decode_value(cursor: &mut Cursor<'_>, depth: u32, shapes: &ShapeTable) -> Result<ValueSummary> {
	let at = cursor.get_index();
	let header = cursor.read_u8()?;
	let raw_tag = header & 0x0f;
	let flags = header >> 4;
	let tag = ValueTag::from_raw(raw_tag).ok_or(SummaryError::UnknownValueTag { tag: raw_tag, at })?;

	match tag {
		ValueTag::Double => {
			if flags != NUMBER_IS_OUT_OF_LINE_MAGIC {
				return Ok(ValueSummary::Double(0.0));
			}
			let value = cursor.read_f64()?;
			Ok(match SpecialNumber::classify(value) {
				Some(special) => ValueSummary::Special(special),
				None => ValueSummary::Double(value),
			})
		}
		ValueTag::Int32 => {
			if flags == NUMBER_IS_OUT_OF_LINE_MAGIC {
				return Ok(ValueSummary::Int(cursor.read_i32()?));
			}
			Ok(ValueSummary::Int(i32::from(flags) + MIN_INLINE_INT))
		}
		ValueTag::Boolean => Ok(ValueSummary::Bool(flags != 0)),
		ValueTag::Undefined => Ok(ValueSummary::Undefined),
		ValueTag::Null => Ok(ValueSummary::Null),
		ValueTag::Magic => Err(SummaryError::UnexpectedHole { at }),
		ValueTag::String => Ok(ValueSummary::String(cursor.read_string()?)),
		ValueTag::Symbol => {
			let description = if flags == SYMBOL_NO_DESCRIPTION { None } else { Some(cursor.read_string()?) };
			Ok(ValueSummary::Symbol { description })
		}
		ValueTag::BigInt => Ok(ValueSummary::BigInt { text: cursor.read_string()? }),
		ValueTag::Object => Ok(ValueSummary::Object(decode_object(cursor, flags, depth, shapes)?)),
	}
}

/// Decode one slot of a list that may contain holes, returning `None` for a hole.
pub(crate) fn decode_element(cursor: &mut Cursor<'_>, depth: u32, shapes: &ShapeTable) -> Result<Option<ValueSummary>> {
	if cursor.peek_u8()? == HOLE_HEADER {
		cursor.read_u8()?;
		return Ok(None);
	}
	decode_value(cursor, depth, shapes).map(Some)
}

/// Decode a single value at an absolute offset of `buffer`.
pub fn decode_value_at(buffer: &[u8], shapes: &ShapeTable, offset: usize, depth: u32) -> Result<ValueSummary> {
	let mut cursor = Cursor::at(buffer, offset)?;
	decode_value(&mut cursor, depth, shapes)
}
