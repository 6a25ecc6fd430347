use std::fs;
use std::path::Path;

use valsum::summary::{Result, ShapeEntry, ShapeTable, SummaryError};

/// Load a shape table from a JSON array indexed by shape id.
///
/// Each item is `null` or `["ClassName", "prop", ...]`. A missing path yields
/// an empty table.
pub(crate) fn load_shapes(path: Option<&Path>) -> Result<ShapeTable> {
	let Some(path) = path else {
		return Ok(ShapeTable::new());
	};

	let raw = fs::read(path)?;
	parse_shapes(&raw)
}

/// Parse the JSON shape table representation.
pub(crate) fn parse_shapes(raw: &[u8]) -> Result<ShapeTable> {
	let items: Vec<Option<Vec<String>>> = serde_json::from_slice(raw).map_err(|err| SummaryError::InvalidShapeTable { reason: err.to_string() })?;

	let mut table = ShapeTable::new();
	for (id, item) in items.into_iter().enumerate() {
		let Some(mut names) = item else {
			continue;
		};
		let id = u32::try_from(id).map_err(|_| SummaryError::InvalidShapeTable {
			reason: format!("shape id {id} does not fit u32"),
		})?;
		let entry = if names.is_empty() {
			ShapeEntry::default()
		} else {
			let class_name = names.remove(0);
			ShapeEntry::new(class_name, names)
		};
		table.insert(id, entry);
	}
	Ok(table)
}

/// Parse a decimal or `0x`-prefixed hex values index; negative sentinels are decimal.
pub(crate) fn parse_values_index(value: &str) -> Result<i32> {
	let parsed = if let Some(stripped) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
		i32::from_str_radix(stripped, 16)
	} else {
		value.parse::<i32>()
	};

	parsed.map_err(|_| SummaryError::InvalidIndexLiteral { value: value.to_owned() })
}

/// Parse a decimal or `0x`-prefixed hex byte offset.
pub(crate) fn parse_offset(value: &str) -> Result<usize> {
	let parsed = if let Some(stripped) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
		usize::from_str_radix(stripped, 16)
	} else {
		value.parse::<usize>()
	};

	parsed.map_err(|_| SummaryError::InvalidIndexLiteral { value: value.to_owned() })
}

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: failed to encode json: {err}"),
	}
}
