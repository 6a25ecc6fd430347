use crate::summary::decode::{capped, decode_element, decode_value, expands_preview};
use crate::summary::external::read_external_object;
use crate::summary::{
	ArrayLikePreview, Cursor, FunctionSummary, GenericObjectPreview, MapLikePreview, ObjectSummary, OwnProperty, Preview, PropertyDescriptor, Result, ShapeEntry,
	ShapeTable, SummaryError,
};

/// Property prefix introducing a getter/setter pair: type nibble 0xf, which
/// no value header uses.
const GETTER_SETTER_MAGIC: u8 = 0x0f;
const GENERIC_OBJECT_HAS_DENSE_ELEMENTS: u8 = 1;
const FUNCTION_CLASS: &str = "Function";

/// Object kind byte following an object header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ObjectKind {
	/// Producer fallback; class name only.
	NotImplemented = 0,
	/// Arrays and sets.
	ArrayLike = 1,
	/// Maps.
	MapLike = 2,
	/// Functions.
	Function = 3,
	/// Boxed primitives with own properties.
	WrappedPrimitiveObject = 4,
	/// Plain objects.
	GenericObject = 5,
	/// Proxies; never introspected.
	ProxyObject = 6,
	/// Embedder-defined, size-prefixed payload.
	External = 7,
}

impl ObjectKind {
	/// Map a raw kind byte to a known kind.
	pub fn from_raw(raw: u8) -> Option<Self> {
		match raw {
			0 => Some(Self::NotImplemented),
			1 => Some(Self::ArrayLike),
			2 => Some(Self::MapLike),
			3 => Some(Self::Function),
			4 => Some(Self::WrappedPrimitiveObject),
			5 => Some(Self::GenericObject),
			6 => Some(Self::ProxyObject),
			7 => Some(Self::External),
			_ => None,
		}
	}
}

/// Decode the object payload following an object header with `flags`.
pub(crate) fn decode_object(cursor: &mut Cursor<'_>, flags: u8, depth: u32, shapes: &ShapeTable) -> Result<ObjectSummary> {
	let at = cursor.get_index();
	let raw = cursor.read_u8()?;
	let kind = ObjectKind::from_raw(raw).ok_or(SummaryError::UnknownObjectKind { kind: raw, at })?;

	match kind {
		ObjectKind::NotImplemented => {
			let (_, shape) = read_shape(cursor, shapes)?;
			Ok(ObjectSummary::class_only(class_name(shape)))
		}
		ObjectKind::ArrayLike => read_array_like(cursor, depth, shapes),
		ObjectKind::MapLike => read_map_like(cursor, depth, shapes),
		ObjectKind::Function => read_function(cursor),
		ObjectKind::WrappedPrimitiveObject => {
			let wrapped = decode_value(cursor, depth, shapes)?;
			let mut summary = read_generic_object(cursor, flags, depth, shapes)?;
			summary.wrapped_value = Some(Box::new(wrapped));
			Ok(summary)
		}
		ObjectKind::GenericObject => read_generic_object(cursor, flags, depth, shapes),
		ObjectKind::ProxyObject => {
			let (_, shape) = read_shape(cursor, shapes)?;
			Ok(ObjectSummary {
				class: class_name(shape),
				preview: Some(Preview::Object(GenericObjectPreview::default())),
				wrapped_value: None,
			})
		}
		ObjectKind::External => read_external_object(cursor, depth, shapes),
	}
}

/// Read a shape id and resolve it against the table.
pub(crate) fn read_shape<'s>(cursor: &mut Cursor<'_>, shapes: &'s ShapeTable) -> Result<(u32, Option<&'s ShapeEntry>)> {
	let shape_id = cursor.read_u32()?;
	Ok((shape_id, shapes.resolve(shape_id)))
}

pub(crate) fn class_name(shape: Option<&ShapeEntry>) -> Option<String> {
	shape.map(|entry| entry.class_name.clone())
}

// Objects whose shape did not resolve drop both class and preview; the
// payload has still been consumed by the caller.
fn with_shape(shape: Option<&ShapeEntry>, preview: Preview) -> ObjectSummary {
	match shape {
		Some(entry) => ObjectSummary {
			class: Some(entry.class_name.clone()),
			preview: Some(preview),
			wrapped_value: None,
		},
		None => ObjectSummary::default(),
	}
}

fn read_array_like(cursor: &mut Cursor<'_>, depth: u32, shapes: &ShapeTable) -> Result<ObjectSummary> {
	let (_, shape) = read_shape(cursor, shapes)?;
	let length = cursor.read_u32()?;

	let mut items = Vec::new();
	if expands_preview(depth) {
		for _ in 0..capped(length) {
			if let Some(item) = decode_element(cursor, depth + 1, shapes)? {
				items.push(item);
			}
		}
	}

	Ok(with_shape(shape, Preview::ArrayLike(ArrayLikePreview { length, items })))
}

fn read_map_like(cursor: &mut Cursor<'_>, depth: u32, shapes: &ShapeTable) -> Result<ObjectSummary> {
	let (_, shape) = read_shape(cursor, shapes)?;
	let size = cursor.read_u32()?;

	let mut entries = Vec::new();
	if expands_preview(depth) {
		for _ in 0..capped(size) {
			let key = decode_value(cursor, depth + 1, shapes)?;
			let value = decode_value(cursor, depth + 1, shapes)?;
			entries.push((key, value));
		}
	}

	Ok(with_shape(shape, Preview::MapLike(MapLikePreview { size, entries })))
}

fn read_function(cursor: &mut Cursor<'_>) -> Result<ObjectSummary> {
	let name = cursor.read_string()?;
	let count = cursor.read_u32()?;
	let mut parameter_names = Vec::with_capacity(capped(count));
	for _ in 0..capped(count) {
		parameter_names.push(cursor.read_string()?);
	}

	Ok(ObjectSummary {
		class: Some(FUNCTION_CLASS.to_owned()),
		preview: Some(Preview::Function(FunctionSummary { name, parameter_names })),
		wrapped_value: None,
	})
}

/// Decode the generic-object body shared by plain objects and boxed primitives.
///
/// Named property values are paired with the shape's property names. The
/// producer writes `min(own_properties_length, 16)` of them, which must agree
/// with the shape's usable name count; otherwise the stream and the shape
/// table disagree and decoding stops with [`SummaryError::ShapePropertyMismatch`].
/// Without a resolved shape the values are still consumed, then dropped.
fn read_generic_object(cursor: &mut Cursor<'_>, flags: u8, depth: u32, shapes: &ShapeTable) -> Result<ObjectSummary> {
	let (shape_id, shape) = read_shape(cursor, shapes)?;
	let has_dense_elements = flags & GENERIC_OBJECT_HAS_DENSE_ELEMENTS != 0;
	let mut own_properties_length = cursor.read_u32()?;
	let mut own_properties = Vec::new();

	if expands_preview(depth) {
		let encoded = capped(own_properties_length);
		match shape {
			Some(entry) => {
				let names = entry.usable_property_names();
				if names.len() != encoded {
					return Err(SummaryError::ShapePropertyMismatch {
						shape_id,
						names: names.len(),
						encoded,
					});
				}
				for name in names {
					let descriptor = read_property(cursor, depth, shapes)?;
					own_properties.push(OwnProperty {
						key: name.clone(),
						descriptor,
					});
				}
			}
			None => {
				for _ in 0..encoded {
					read_property(cursor, depth, shapes)?;
				}
			}
		}
	}

	if has_dense_elements {
		let elements_length = cursor.read_u32()?;
		if expands_preview(depth) {
			for index in 0..capped(elements_length) {
				let Some(value) = decode_element(cursor, depth + 1, shapes)? else {
					continue;
				};
				own_properties_length = own_properties_length.saturating_add(1);
				own_properties.push(OwnProperty {
					key: index.to_string(),
					descriptor: PropertyDescriptor::Value(value),
				});
			}
		}
	}

	Ok(with_shape(
		shape,
		Preview::Object(GenericObjectPreview {
			own_properties,
			own_properties_length,
		}),
	))
}

fn read_property(cursor: &mut Cursor<'_>, depth: u32, shapes: &ShapeTable) -> Result<PropertyDescriptor> {
	if cursor.peek_u8()? == GETTER_SETTER_MAGIC {
		cursor.read_u8()?;
		let getter = decode_value(cursor, depth + 1, shapes)?;
		let setter = decode_value(cursor, depth + 1, shapes)?;
		return Ok(PropertyDescriptor::Accessor { getter, setter });
	}
	Ok(PropertyDescriptor::Value(decode_value(cursor, depth + 1, shapes)?))
}
