use serde_json::{Map, Value as JsonValue, json};
use valsum::summary::{NodePreview, NodeSubkindData, ObjectSummary, Preview, PropertyDescriptor, ValueSummary};

/// Convert a decoded summary into a tagged JSON object.
pub fn value_to_json(value: &ValueSummary) -> JsonValue {
	match value {
		ValueSummary::Int(v) => json!({ "type": "number", "value": v }),
		ValueSummary::Double(v) => json!({ "type": "number", "value": v }),
		ValueSummary::Special(special) => json!({ "type": "number", "special": special.as_str() }),
		ValueSummary::Bool(v) => json!({ "type": "boolean", "value": v }),
		ValueSummary::Null => json!({ "type": "null" }),
		ValueSummary::Undefined => json!({ "type": "undefined" }),
		ValueSummary::Symbol { description } => json!({ "type": "symbol", "description": description }),
		ValueSummary::BigInt { text } => json!({ "type": "bigint", "value": text }),
		ValueSummary::String(v) => json!({ "type": "string", "value": v }),
		ValueSummary::Object(object) => object_to_json(object),
	}
}

fn object_to_json(object: &ObjectSummary) -> JsonValue {
	let mut out = Map::new();
	out.insert("type".to_owned(), json!("object"));
	out.insert("class".to_owned(), json!(object.class));
	out.insert("preview".to_owned(), object.preview.as_ref().map_or(JsonValue::Null, preview_to_json));
	if let Some(wrapped) = &object.wrapped_value {
		out.insert("wrapped_value".to_owned(), value_to_json(wrapped));
	}
	JsonValue::Object(out)
}

fn preview_to_json(preview: &Preview) -> JsonValue {
	let kind = preview.kind_label();
	match preview {
		Preview::ArrayLike(array) => json!({
			"kind": kind,
			"length": array.length,
			"items": array.items.iter().map(value_to_json).collect::<Vec<_>>(),
		}),
		Preview::MapLike(map) => json!({
			"kind": kind,
			"size": map.size,
			"entries": map
				.entries
				.iter()
				.map(|(key, value)| json!([value_to_json(key), value_to_json(value)]))
				.collect::<Vec<_>>(),
		}),
		Preview::Object(generic) => {
			let properties: Vec<JsonValue> = generic
				.own_properties
				.iter()
				.map(|property| match &property.descriptor {
					PropertyDescriptor::Value(value) => json!({ "key": property.key, "value": value_to_json(value) }),
					PropertyDescriptor::Accessor { getter, setter } => json!({
						"key": property.key,
						"getter": value_to_json(getter),
						"setter": value_to_json(setter),
					}),
				})
				.collect();
			json!({
				"kind": kind,
				"own_properties_length": generic.own_properties_length,
				"own_properties": properties,
			})
		}
		Preview::Function(function) => json!({
			"kind": kind,
			"name": function.name,
			"parameter_names": function.parameter_names,
		}),
		Preview::Node(node) => node_to_json(kind, node),
	}
}

fn node_to_json(kind: &str, node: &NodePreview) -> JsonValue {
	let mut out = Map::new();
	out.insert("kind".to_owned(), json!(kind));
	out.insert("node_type".to_owned(), json!(node.node_type));
	out.insert("node_name".to_owned(), json!(node.node_name));
	out.insert("is_connected".to_owned(), json!(node.is_connected));

	match &node.subkind {
		NodeSubkindData::Element {
			attributes,
			attributes_length,
		} => {
			out.insert("subkind".to_owned(), json!("element"));
			out.insert("attributes".to_owned(), json!(attributes));
			out.insert("attributes_length".to_owned(), json!(attributes_length));
		}
		NodeSubkindData::Attr { value } => {
			out.insert("subkind".to_owned(), json!("attr"));
			out.insert("value".to_owned(), json!(value));
		}
		NodeSubkindData::Document { location } => {
			out.insert("subkind".to_owned(), json!("document"));
			out.insert("location".to_owned(), json!(location));
		}
		NodeSubkindData::DocumentFragment {
			child_nodes,
			child_nodes_length,
		} => {
			out.insert("subkind".to_owned(), json!("document_fragment"));
			let children = child_nodes
				.as_ref()
				.map_or(JsonValue::Null, |items| JsonValue::Array(items.iter().map(value_to_json).collect()));
			out.insert("child_nodes".to_owned(), children);
			out.insert("child_nodes_length".to_owned(), json!(child_nodes_length));
		}
		NodeSubkindData::Text { text_content } => {
			out.insert("subkind".to_owned(), json!("text"));
			out.insert("text_content".to_owned(), json!(text_content));
		}
		NodeSubkindData::Comment { text_content } => {
			out.insert("subkind".to_owned(), json!("comment"));
			out.insert("text_content".to_owned(), json!(text_content));
		}
		NodeSubkindData::Other { subkind } => {
			out.insert("subkind".to_owned(), json!(subkind));
		}
	}

	JsonValue::Object(out)
}
