use crate::summary::{Cursor, MAX_COLLECTION_VALUES, Result};

/// Interned description of an object's class and own-property order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeEntry {
	/// Class name reported for objects with this shape.
	pub class_name: String,
	/// Property names in encoding order, at most [`MAX_COLLECTION_VALUES`] used.
	pub property_names: Vec<String>,
	/// True property count before truncation, when the producer reported it.
	pub property_count: Option<u32>,
}

impl ShapeEntry {
	/// Build an entry from a class name and property names.
	pub fn new<I, S>(class_name: impl Into<String>, property_names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			class_name: class_name.into(),
			property_names: property_names.into_iter().map(Into::into).collect(),
			property_count: None,
		}
	}

	/// Whether the entry carries no metadata at all.
	pub fn is_empty(&self) -> bool {
		self.class_name.is_empty() && self.property_names.is_empty()
	}

	/// Property names actually paired with encoded values.
	pub fn usable_property_names(&self) -> &[String] {
		let end = self.property_names.len().min(MAX_COLLECTION_VALUES);
		&self.property_names[..end]
	}
}

/// Shape summary record as exported alongside a shape string buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeRecord {
	/// Shape id referenced from object summaries.
	pub id: u32,
	/// Total own-property count, excluding dense elements.
	pub num_properties: u32,
	/// Offset of the class name in the string buffer.
	pub string_buffer_offset: usize,
}

/// Read-only arena of shapes indexed by small integer id.
#[derive(Debug, Clone, Default)]
pub struct ShapeTable {
	entries: Vec<Option<ShapeEntry>>,
}

impl ShapeTable {
	/// Create an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a table from `(id, entry)` pairs.
	pub fn from_entries(entries: impl IntoIterator<Item = (u32, ShapeEntry)>) -> Self {
		let mut table = Self::new();
		for (id, entry) in entries {
			table.insert(id, entry);
		}
		table
	}

	/// Build a table from shape records pointing into a buffer of
	/// NUL-terminated strings: the class name, then
	/// `min(num_properties, MAX_COLLECTION_VALUES)` property names.
	pub fn from_string_buffer(string_buffer: &[u8], records: &[ShapeRecord]) -> Result<Self> {
		let mut table = Self::new();
		for record in records {
			let mut cursor = Cursor::at(string_buffer, record.string_buffer_offset)?;
			let class_name = String::from_utf8_lossy(cursor.read_cstring_bytes()?).into_owned();

			let name_count = (record.num_properties as usize).min(MAX_COLLECTION_VALUES);
			let mut property_names = Vec::with_capacity(name_count);
			for _ in 0..name_count {
				property_names.push(String::from_utf8_lossy(cursor.read_cstring_bytes()?).into_owned());
			}

			table.insert(
				record.id,
				ShapeEntry {
					class_name,
					property_names,
					property_count: Some(record.num_properties),
				},
			);
		}
		Ok(table)
	}

	/// Insert or replace the entry for `id`, returning the previous one.
	pub fn insert(&mut self, id: u32, entry: ShapeEntry) -> Option<ShapeEntry> {
		let slot = id as usize;
		if slot >= self.entries.len() {
			self.entries.resize_with(slot + 1, || None);
		}
		self.entries[slot].replace(entry)
	}

	/// Append an entry at the next free id and return that id.
	pub fn push(&mut self, entry: ShapeEntry) -> u32 {
		let id = self.entries.len() as u32;
		self.entries.push(Some(entry));
		id
	}

	/// Look up a shape by id.
	pub fn lookup(&self, id: u32) -> Option<&ShapeEntry> {
		self.entries.get(id as usize).and_then(Option::as_ref)
	}

	/// Look up a shape by id, treating empty entries as absent.
	pub(crate) fn resolve(&self, id: u32) -> Option<&ShapeEntry> {
		self.lookup(id).filter(|entry| !entry.is_empty())
	}

	/// Number of id slots, including gaps.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the table has no slots.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
