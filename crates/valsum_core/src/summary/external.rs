//! Embedder-defined object payloads.
//!
//! An external object is a shape id followed by a self-sized sub-payload:
//!
//! ```text
//! size:      u32   (counted from the start of this field)
//! version:   u8
//! kind:      u8    (0 = other, 1 = node)
//! payload:   kind-specific
//! ```
//!
//! Whatever the payload decoder consumes, the cursor always ends at
//! `start + size`, so unknown versions, unknown kinds, and trailing fields
//! added by newer producers are skipped without disturbing sibling values.

use crate::summary::decode::{capped, decode_value, expands_preview};
use crate::summary::object::{class_name, read_shape};
use crate::summary::{Cursor, NodePreview, NodeSubkindData, ObjectSummary, Preview, Result, ShapeTable, SummaryError};

/// External payload version understood by this decoder.
pub const EXTERNAL_SUMMARY_VERSION: u8 = 1;

const EXTERNAL_KIND_NODE: u8 = 1;
const NODE_CONNECTED_BIT: u8 = 1 << 7;

/// Node subkinds carried in the low seven bits of the node flags byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NodeSubkind {
	/// Element.
	Element = 1,
	/// Attribute.
	Attr = 2,
	/// Document.
	Document = 3,
	/// Document fragment.
	DocumentFragment = 4,
	/// Text node.
	Text = 5,
	/// Comment node.
	Comment = 6,
}

impl NodeSubkind {
	/// Map a raw subkind to a known subkind.
	pub fn from_raw(raw: u8) -> Option<Self> {
		match raw {
			1 => Some(Self::Element),
			2 => Some(Self::Attr),
			3 => Some(Self::Document),
			4 => Some(Self::DocumentFragment),
			5 => Some(Self::Text),
			6 => Some(Self::Comment),
			_ => None,
		}
	}
}

pub(crate) fn read_external_object(cursor: &mut Cursor<'_>, depth: u32, shapes: &ShapeTable) -> Result<ObjectSummary> {
	let (_, shape) = read_shape(cursor, shapes)?;
	let class = class_name(shape);

	let start = cursor.get_index();
	let size = cursor.read_u32()?;
	let end = start
		.checked_add(size as usize)
		.filter(|end| *end <= cursor.len())
		.ok_or(SummaryError::ExternalSizeOutOfRange {
			at: start,
			size,
			rem: cursor.len() - start,
		})?;

	let preview = read_external_payload(cursor, depth, shapes);
	cursor.set_index(end)?;

	Ok(ObjectSummary {
		class,
		preview: preview?,
		wrapped_value: None,
	})
}

fn read_external_payload(cursor: &mut Cursor<'_>, depth: u32, shapes: &ShapeTable) -> Result<Option<Preview>> {
	let version = cursor.read_u8()?;
	if version != EXTERNAL_SUMMARY_VERSION {
		return Ok(None);
	}

	match cursor.read_u8()? {
		EXTERNAL_KIND_NODE => Ok(Some(Preview::Node(read_node(cursor, depth, shapes)?))),
		_ => Ok(None),
	}
}

fn read_node(cursor: &mut Cursor<'_>, depth: u32, shapes: &ShapeTable) -> Result<NodePreview> {
	let node_type = cursor.read_u16()?;
	let node_name = cursor.read_string()?.to_lowercase();
	let packed = cursor.read_u8()?;
	let is_connected = packed & NODE_CONNECTED_BIT != 0;
	let raw_subkind = packed & !NODE_CONNECTED_BIT;

	let subkind = match NodeSubkind::from_raw(raw_subkind) {
		Some(NodeSubkind::Element) => {
			let attributes_length = cursor.read_u32()?;
			let mut attributes = Vec::with_capacity(capped(attributes_length));
			for _ in 0..capped(attributes_length) {
				let name = cursor.read_string()?;
				let value = cursor.read_string()?;
				attributes.push((name, value));
			}
			NodeSubkindData::Element {
				attributes,
				attributes_length,
			}
		}
		Some(NodeSubkind::Attr) => NodeSubkindData::Attr { value: cursor.read_string()? },
		Some(NodeSubkind::Document) => NodeSubkindData::Document {
			location: cursor.read_string()?,
		},
		Some(NodeSubkind::DocumentFragment) => {
			let child_nodes_length = cursor.read_u32()?;
			let child_nodes = if expands_preview(depth) {
				let mut children = Vec::with_capacity(capped(child_nodes_length));
				for _ in 0..capped(child_nodes_length) {
					children.push(decode_value(cursor, depth + 1, shapes)?);
				}
				Some(children)
			} else {
				None
			};
			NodeSubkindData::DocumentFragment {
				child_nodes,
				child_nodes_length,
			}
		}
		Some(NodeSubkind::Text) => NodeSubkindData::Text {
			text_content: cursor.read_string()?,
		},
		Some(NodeSubkind::Comment) => NodeSubkindData::Comment {
			text_content: cursor.read_string()?,
		},
		None => NodeSubkindData::Other { subkind: raw_subkind },
	};

	Ok(NodePreview {
		node_type,
		node_name,
		is_connected,
		subkind,
	})
}

#[cfg(test)]
mod tests;
