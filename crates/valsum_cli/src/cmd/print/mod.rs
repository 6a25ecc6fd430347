use valsum::summary::{NodePreview, NodeSubkindData, ObjectSummary, Preview, PropertyDescriptor, ValueSummary};

/// Output truncation and formatting limits for decoded summaries.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum nesting depth printed before composites collapse to `{ ... }`.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_string_len: 200,
			max_print_depth: 6,
		}
	}
}

const UNKNOWN_CLASS: &str = "<unknown>";

/// Print one decoded summary tree to stdout.
pub fn print_value(value: &ValueSummary, options: PrintOptions) {
	print!("{}", render_value(value, options));
}

/// Render one decoded summary tree as indented text, one trailing newline included.
pub fn render_value(value: &ValueSummary, options: PrintOptions) -> String {
	let mut out = String::new();
	write_value(&mut out, value, 0, 0, options);
	out
}

// Writes `value` at the current position; nested lines are indented by `indent + 2`.
fn write_value(out: &mut String, value: &ValueSummary, indent: usize, depth: u32, options: PrintOptions) {
	match value {
		ValueSummary::Object(object) => write_object(out, object, indent, depth, options),
		scalar => {
			out.push_str(&scalar_label(scalar, options));
			out.push('\n');
		}
	}
}

fn scalar_label(value: &ValueSummary, options: PrintOptions) -> String {
	match value {
		ValueSummary::Int(v) => v.to_string(),
		ValueSummary::Double(v) => v.to_string(),
		ValueSummary::Special(special) => special.as_str().to_owned(),
		ValueSummary::Bool(v) => v.to_string(),
		ValueSummary::Null => "null".to_owned(),
		ValueSummary::Undefined => "undefined".to_owned(),
		ValueSummary::Symbol { description } => format!("Symbol({})", description.as_deref().unwrap_or_default()),
		ValueSummary::BigInt { text } => format!("{text}n"),
		ValueSummary::String(v) => quote(v, options),
		ValueSummary::Object(object) => object.class.clone().unwrap_or_else(|| UNKNOWN_CLASS.to_owned()),
	}
}

fn write_object(out: &mut String, object: &ObjectSummary, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	let class = object.class.as_deref().unwrap_or(UNKNOWN_CLASS);

	let Some(preview) = &object.preview else {
		out.push_str(&format!("{class}\n"));
		return;
	};

	if let Preview::Function(function) = preview {
		let name = if function.name.is_empty() { "anonymous" } else { function.name.as_str() };
		out.push_str(&format!("function {name}({})\n", function.parameter_names.join(", ")));
		return;
	}

	if depth >= options.max_print_depth {
		out.push_str(&format!("{class} {{ ... }}\n"));
		return;
	}

	match preview {
		Preview::ArrayLike(array) => {
			if array.items.is_empty() {
				let body = if array.length == 0 { "[]" } else { "[...]" };
				out.push_str(&format!("{class}({}) {body}\n", array.length));
				return;
			}
			out.push_str(&format!("{class}({}) [\n", array.length));
			for item in &array.items {
				out.push_str(&format!("{pad}  "));
				write_value(out, item, indent + 2, depth + 1, options);
			}
			write_remainder(out, &pad, array.length, array.items.len());
			out.push_str(&format!("{pad}]\n"));
		}
		Preview::MapLike(map) => {
			if map.entries.is_empty() {
				let body = if map.size == 0 { "{}" } else { "{...}" };
				out.push_str(&format!("{class}({}) {body}\n", map.size));
				return;
			}
			out.push_str(&format!("{class}({}) {{\n", map.size));
			for (key, value) in &map.entries {
				out.push_str(&format!("{pad}  {} => ", scalar_label(key, options)));
				write_value(out, value, indent + 2, depth + 1, options);
			}
			write_remainder(out, &pad, map.size, map.entries.len());
			out.push_str(&format!("{pad}}}\n"));
		}
		Preview::Object(generic) => {
			if generic.own_properties.is_empty() && object.wrapped_value.is_none() {
				let body = if generic.own_properties_length == 0 { "{}" } else { "{ ... }" };
				out.push_str(&format!("{class} {body}\n"));
				return;
			}
			out.push_str(&format!("{class} {{\n"));
			if let Some(wrapped) = &object.wrapped_value {
				out.push_str(&format!("{pad}  [[PrimitiveValue]]: "));
				write_value(out, wrapped, indent + 2, depth + 1, options);
			}
			for property in &generic.own_properties {
				out.push_str(&format!("{pad}  {}: ", property.key));
				match &property.descriptor {
					PropertyDescriptor::Value(value) => write_value(out, value, indent + 2, depth + 1, options),
					PropertyDescriptor::Accessor { getter, setter } => {
						out.push_str(&format!("get {} / set {}\n", accessor_label(getter, options), accessor_label(setter, options)));
					}
				}
			}
			write_remainder(out, &pad, generic.own_properties_length, generic.own_properties.len());
			out.push_str(&format!("{pad}}}\n"));
		}
		Preview::Node(node) => write_node(out, class, node, indent, depth, options),
		Preview::Function(_) => {}
	}
}

fn write_node(out: &mut String, class: &str, node: &NodePreview, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	let name = &node.node_name;

	match &node.subkind {
		NodeSubkindData::Element {
			attributes,
			attributes_length,
		} => {
			let mut tag = format!("<{name}");
			for (key, value) in attributes {
				tag.push_str(&format!(" {key}={}", quote(value, options)));
			}
			if *attributes_length as usize > attributes.len() {
				tag.push_str(" ...");
			}
			out.push_str(&format!("{class} {tag}>\n"));
		}
		NodeSubkindData::Attr { value } => out.push_str(&format!("{class} {name}={}\n", quote(value, options))),
		NodeSubkindData::Document { location } => out.push_str(&format!("{class} {name} {}\n", quote(location, options))),
		NodeSubkindData::Text { text_content } | NodeSubkindData::Comment { text_content } => {
			out.push_str(&format!("{class} {name} {}\n", quote(text_content, options)));
		}
		NodeSubkindData::DocumentFragment {
			child_nodes,
			child_nodes_length,
		} => match child_nodes {
			Some(children) if !children.is_empty() => {
				out.push_str(&format!("{class} {name}({child_nodes_length}) [\n"));
				for child in children {
					out.push_str(&format!("{pad}  "));
					write_value(out, child, indent + 2, depth + 1, options);
				}
				write_remainder(out, &pad, *child_nodes_length, children.len());
				out.push_str(&format!("{pad}]\n"));
			}
			_ => out.push_str(&format!("{class} {name}({child_nodes_length})\n")),
		},
		NodeSubkindData::Other { subkind } => out.push_str(&format!("{class} {name} (subkind {subkind})\n")),
	}
}

fn accessor_label(value: &ValueSummary, options: PrintOptions) -> String {
	match value {
		ValueSummary::Object(ObjectSummary {
			preview: Some(Preview::Function(function)),
			..
		}) => {
			if function.name.is_empty() {
				"function".to_owned()
			} else {
				format!("function {}", function.name)
			}
		}
		other => scalar_label(other, options),
	}
}

fn write_remainder(out: &mut String, pad: &str, total: u32, shown: usize) {
	let total = total as usize;
	if total > shown {
		out.push_str(&format!("{pad}  ... {} more\n", total - shown));
	}
}

fn quote(input: &str, options: PrintOptions) -> String {
	format!("\"{}\"", truncate(input, options.max_string_len))
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}
