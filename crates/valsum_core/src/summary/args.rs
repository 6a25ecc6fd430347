use crate::summary::{Cursor, Result, ShapeTable, SummaryError, ValueSummary, decode_value};

/// Maximum number of call arguments the tracer records per call.
pub const MAX_ARGUMENTS_TO_RECORD: usize = 4;
/// Values index recorded for a call without arguments.
pub const ZERO_ARGUMENTS_MAGIC: i32 = -2;
/// Values index recorded once argument values were overwritten in the ring buffer.
pub const EXPIRED_VALUES_MAGIC: i32 = -1;

/// Outcome of decoding the argument list of one traced call.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentDecodeResult {
	/// The call had no arguments.
	Empty,
	/// The argument values were evicted before the snapshot.
	Unavailable,
	/// Up to [`MAX_ARGUMENTS_TO_RECORD`] decoded arguments.
	Values(Vec<ValueSummary>),
}

/// Decode the argument summaries recorded at `values_index` of `buffer`.
///
/// Sentinel indices return without reading the buffer. Otherwise the index is
/// an absolute offset of a `u32` argument count followed by
/// `min(argc, MAX_ARGUMENTS_TO_RECORD)` top-level value summaries.
pub fn decode_arguments(buffer: &[u8], shapes: &ShapeTable, values_index: i32) -> Result<ArgumentDecodeResult> {
	match values_index {
		ZERO_ARGUMENTS_MAGIC => return Ok(ArgumentDecodeResult::Empty),
		EXPIRED_VALUES_MAGIC => return Ok(ArgumentDecodeResult::Unavailable),
		_ => {}
	}

	let start = usize::try_from(values_index).map_err(|_| SummaryError::InvalidValuesIndex { index: values_index })?;
	let mut cursor = Cursor::at(buffer, start)?;
	let argc = cursor.read_u32()?;
	let count = (argc as usize).min(MAX_ARGUMENTS_TO_RECORD);

	let mut values = Vec::with_capacity(count);
	for _ in 0..count {
		values.push(decode_value(&mut cursor, 0, shapes)?);
	}
	Ok(ArgumentDecodeResult::Values(values))
}

#[cfg(test)]
mod tests;
