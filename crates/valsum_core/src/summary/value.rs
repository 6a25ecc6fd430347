/// Decoded, display-oriented snapshot of one traced value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSummary {
	/// Integer stored as `int32`.
	Int(i32),
	/// Finite double, including ordinary `+0`.
	Double(f64),
	/// Double without a plain numeric rendering.
	Special(SpecialNumber),
	/// Boolean scalar.
	Bool(bool),
	/// `null`.
	Null,
	/// `undefined`.
	Undefined,
	/// Symbol with its optional description.
	Symbol {
		/// Description text, absent for `Symbol()`.
		description: Option<String>,
	},
	/// BigInt preserved as decimal text.
	BigInt {
		/// Base-10 rendering.
		text: String,
	},
	/// String scalar.
	String(String),
	/// Object summary with optional preview.
	Object(ObjectSummary),
}

impl ValueSummary {
	/// Stable lowercase kind label.
	pub fn kind_label(&self) -> &'static str {
		match self {
			Self::Int(_) | Self::Double(_) | Self::Special(_) => "number",
			Self::Bool(_) => "boolean",
			Self::Null => "null",
			Self::Undefined => "undefined",
			Self::Symbol { .. } => "symbol",
			Self::BigInt { .. } => "bigint",
			Self::String(_) => "string",
			Self::Object(_) => "object",
		}
	}

	/// Numeric value, when this summary is a number.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Int(value) => Some(f64::from(*value)),
			Self::Double(value) => Some(*value),
			Self::Special(special) => Some(special.as_f64()),
			_ => None,
		}
	}

	/// Borrow string contents.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	/// Borrow the object summary.
	pub fn as_object(&self) -> Option<&ObjectSummary> {
		match self {
			Self::Object(object) => Some(object),
			_ => None,
		}
	}
}

/// Doubles that are reported as markers rather than numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialNumber {
	/// Not-a-number.
	NaN,
	/// Positive infinity.
	PosInfinity,
	/// Negative infinity.
	NegInfinity,
	/// Negative zero.
	NegativeZero,
}

impl SpecialNumber {
	/// Classify a double, returning `None` for ordinary finite values.
	pub fn classify(value: f64) -> Option<Self> {
		if value.is_nan() {
			Some(Self::NaN)
		} else if value == f64::INFINITY {
			Some(Self::PosInfinity)
		} else if value == f64::NEG_INFINITY {
			Some(Self::NegInfinity)
		} else if value == 0.0 && value.is_sign_negative() {
			Some(Self::NegativeZero)
		} else {
			None
		}
	}

	/// Display label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::NaN => "NaN",
			Self::PosInfinity => "Infinity",
			Self::NegInfinity => "-Infinity",
			Self::NegativeZero => "-0",
		}
	}

	/// The double this marker stands for.
	pub fn as_f64(self) -> f64 {
		match self {
			Self::NaN => f64::NAN,
			Self::PosInfinity => f64::INFINITY,
			Self::NegInfinity => f64::NEG_INFINITY,
			Self::NegativeZero => -0.0,
		}
	}
}

/// Summary of an object value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSummary {
	/// Class name, absent when the shape id did not resolve.
	pub class: Option<String>,
	/// Kind-specific preview.
	pub preview: Option<Preview>,
	/// Boxed primitive, only for wrapped-primitive objects.
	pub wrapped_value: Option<Box<ValueSummary>>,
}

impl ObjectSummary {
	/// Object carrying only a class name.
	pub fn class_only(class: Option<String>) -> Self {
		Self {
			class,
			..Self::default()
		}
	}
}

/// Bounded, partially expanded view of a composite value.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
	/// Arrays and sets.
	ArrayLike(ArrayLikePreview),
	/// Maps.
	MapLike(MapLikePreview),
	/// Plain objects, boxed primitives, and proxies.
	Object(GenericObjectPreview),
	/// Functions.
	Function(FunctionSummary),
	/// DOM-like nodes from external payloads.
	Node(NodePreview),
}

impl Preview {
	/// Stable kind label.
	pub fn kind_label(&self) -> &'static str {
		match self {
			Self::ArrayLike(_) => "ArrayLike",
			Self::MapLike(_) => "MapLike",
			Self::Object(_) => "Object",
			Self::Function(_) => "Function",
			Self::Node(_) => "DOMNode",
		}
	}
}

/// Array-like preview.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayLikePreview {
	/// True element count.
	pub length: u32,
	/// Up to 16 decoded items; empty when nested, holes omitted.
	pub items: Vec<ValueSummary>,
}

/// Map-like preview.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapLikePreview {
	/// True entry count.
	pub size: u32,
	/// Up to 16 decoded key/value pairs; empty when nested.
	pub entries: Vec<(ValueSummary, ValueSummary)>,
}

/// Generic object preview.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericObjectPreview {
	/// Decoded properties in encoding order, named first then dense elements.
	pub own_properties: Vec<OwnProperty>,
	/// Named property count plus decoded dense elements.
	pub own_properties_length: u32,
}

impl GenericObjectPreview {
	/// Find the first property with `key`.
	pub fn get(&self, key: &str) -> Option<&PropertyDescriptor> {
		self.own_properties.iter().find(|item| item.key == key).map(|item| &item.descriptor)
	}

	/// Iterate property keys in order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.own_properties.iter().map(|item| item.key.as_str())
	}
}

/// One keyed property of a generic object preview.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnProperty {
	/// Property key as a display string.
	pub key: String,
	/// Data or accessor descriptor.
	pub descriptor: PropertyDescriptor,
}

/// Property payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyDescriptor {
	/// Data property.
	Value(ValueSummary),
	/// Accessor property.
	Accessor {
		/// Getter function or `undefined`.
		getter: ValueSummary,
		/// Setter function or `undefined`.
		setter: ValueSummary,
	},
}

impl PropertyDescriptor {
	/// Borrow the data value, if any.
	pub fn value(&self) -> Option<&ValueSummary> {
		match self {
			Self::Value(value) => Some(value),
			Self::Accessor { .. } => None,
		}
	}
}

/// Function preview.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionSummary {
	/// Function name, empty for anonymous functions.
	pub name: String,
	/// Up to 16 parameter names; destructured parameters are empty strings.
	pub parameter_names: Vec<String>,
}

/// DOM-like node preview.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePreview {
	/// Numeric node type.
	pub node_type: u16,
	/// Lower-cased node name.
	pub node_name: String,
	/// Whether the node is attached to a document.
	pub is_connected: bool,
	/// Subkind-specific fields.
	pub subkind: NodeSubkindData,
}

/// Node fields that depend on the node subkind.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeSubkindData {
	/// Element with its attributes.
	Element {
		/// Up to 16 `(name, value)` pairs.
		attributes: Vec<(String, String)>,
		/// True attribute count.
		attributes_length: u32,
	},
	/// Attribute node.
	Attr {
		/// Attribute value.
		value: String,
	},
	/// Document.
	Document {
		/// Document location.
		location: String,
	},
	/// Document fragment with child nodes.
	DocumentFragment {
		/// Up to 16 children; `None` when nested.
		child_nodes: Option<Vec<ValueSummary>>,
		/// True child count.
		child_nodes_length: u32,
	},
	/// Text node.
	Text {
		/// Text content.
		text_content: String,
	},
	/// Comment node.
	Comment {
		/// Comment content.
		text_content: String,
	},
	/// Subkind without extra fields.
	Other {
		/// Raw 7-bit subkind.
		subkind: u8,
	},
}
