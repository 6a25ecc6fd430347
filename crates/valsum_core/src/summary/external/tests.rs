use valsum_testkit::{EXTERNAL_KIND_NODE, EXTERNAL_SUMMARY_VERSION, SummaryWriter, kind};

use crate::summary::{Cursor, NodePreview, NodeSubkindData, ObjectSummary, Preview, ShapeEntry, ShapeTable, SummaryError, ValueSummary, decode_value};

const DIV: u32 = 0;
const FRAGMENT: u32 = 1;

fn shapes() -> ShapeTable {
	ShapeTable::from_entries([
		(DIV, ShapeEntry::new("HTMLDivElement", Vec::<String>::new())),
		(FRAGMENT, ShapeEntry::new("DocumentFragment", Vec::<String>::new())),
	])
}

/// Write an external node with `payload` appended after the node header.
fn write_node(out: &mut SummaryWriter, shape: u32, name: &str, packed: u8, payload: impl FnOnce(&mut SummaryWriter)) {
	out.object(kind::EXTERNAL, 0).u32(shape);
	let size_at = out.begin_external();
	out.u8(EXTERNAL_SUMMARY_VERSION).u8(EXTERNAL_KIND_NODE);
	out.u16(1).latin1(name).u8(packed);
	payload(out);
	out.end_external(size_at);
}

fn decode_all(bytes: &[u8], depth: u32, count: usize) -> Vec<ValueSummary> {
	let shapes = shapes();
	let mut cursor = Cursor::new(bytes);
	let values = (0..count)
		.map(|_| decode_value(&mut cursor, depth, &shapes).expect("value decodes"))
		.collect();
	assert_eq!(cursor.get_index(), bytes.len(), "all bytes consumed");
	values
}

fn node(value: &ValueSummary) -> &NodePreview {
	match value.as_object().and_then(|object| object.preview.as_ref()) {
		Some(Preview::Node(node)) => node,
		other => panic!("expected node preview, got {other:?}"),
	}
}

#[test]
fn element_node_reads_lowercased_name_and_attributes() {
	let mut out = SummaryWriter::new();
	write_node(&mut out, DIV, "DIV", 0x80 | 1, |out| {
		out.u32(2).latin1("id").latin1("main").latin1("class").latin1("wide");
	});

	let values = decode_all(out.bytes(), 0, 1);
	assert_eq!(values[0].as_object().and_then(|object| object.class.as_deref()), Some("HTMLDivElement"));
	let node = node(&values[0]);
	assert_eq!(node.node_type, 1);
	assert_eq!(node.node_name, "div");
	assert!(node.is_connected);
	assert_eq!(
		node.subkind,
		NodeSubkindData::Element {
			attributes: vec![("id".to_owned(), "main".to_owned()), ("class".to_owned(), "wide".to_owned())],
			attributes_length: 2,
		}
	);
}

#[test]
fn string_subkinds_decode() {
	let cases = [
		(2, NodeSubkindData::Attr { value: "v".to_owned() }),
		(3, NodeSubkindData::Document { location: "v".to_owned() }),
		(5, NodeSubkindData::Text { text_content: "v".to_owned() }),
		(6, NodeSubkindData::Comment { text_content: "v".to_owned() }),
	];

	for (subkind, expected) in cases {
		let mut out = SummaryWriter::new();
		write_node(&mut out, DIV, "#node", subkind, |out| {
			out.latin1("v");
		});

		let values = decode_all(out.bytes(), 0, 1);
		let node = node(&values[0]);
		assert!(!node.is_connected);
		assert_eq!(node.subkind, expected, "subkind {subkind}");
	}
}

#[test]
fn unknown_node_subkind_is_kept_raw() {
	let mut out = SummaryWriter::new();
	write_node(&mut out, DIV, "x", 0x80 | 0x2a, |out| {
		out.raw(&[1, 2, 3]);
	});

	let values = decode_all(out.bytes(), 0, 1);
	let node = node(&values[0]);
	assert!(node.is_connected);
	assert_eq!(node.subkind, NodeSubkindData::Other { subkind: 0x2a });
}

#[test]
fn document_fragment_children_expand_only_at_top_level() {
	let build = || {
		let mut out = SummaryWriter::new();
		write_node(&mut out, FRAGMENT, "#document-fragment", 4, |out| {
			out.u32(2).string_value("a").int32(3);
		});
		out.null();
		out.into_bytes()
	};

	let top = decode_all(&build(), 0, 2);
	assert_eq!(
		node(&top[0]).subkind,
		NodeSubkindData::DocumentFragment {
			child_nodes: Some(vec![ValueSummary::String("a".to_owned()), ValueSummary::Int(3)]),
			child_nodes_length: 2,
		}
	);
	assert_eq!(top[1], ValueSummary::Null);

	// Children written by a permissive producer are skipped by the size field.
	let nested = decode_all(&build(), 1, 2);
	assert_eq!(
		node(&nested[0]).subkind,
		NodeSubkindData::DocumentFragment {
			child_nodes: None,
			child_nodes_length: 2,
		}
	);
	assert_eq!(nested[1], ValueSummary::Null);
}

#[test]
fn unknown_version_yields_class_only_and_skips_payload() {
	let mut out = SummaryWriter::new();
	out.object(kind::EXTERNAL, 0).u32(DIV);
	let size_at = out.begin_external();
	out.u8(EXTERNAL_SUMMARY_VERSION + 1).raw(&[0xff; 11]);
	out.end_external(size_at);
	out.string_value("sibling");

	let values = decode_all(out.bytes(), 0, 2);
	assert_eq!(values[0].as_object(), Some(&ObjectSummary::class_only(Some("HTMLDivElement".to_owned()))));
	assert_eq!(values[1], ValueSummary::String("sibling".to_owned()));
}

#[test]
fn non_node_kind_has_no_preview() {
	let mut out = SummaryWriter::new();
	out.object(kind::EXTERNAL, 0).u32(DIV);
	let size_at = out.begin_external();
	out.u8(EXTERNAL_SUMMARY_VERSION).u8(0).raw(&[9, 9]);
	out.end_external(size_at);

	let values = decode_all(out.bytes(), 0, 1);
	assert_eq!(values[0].as_object().and_then(|object| object.preview.as_ref()), None);
}

#[test]
fn trailing_payload_bytes_are_skipped() {
	let mut out = SummaryWriter::new();
	write_node(&mut out, DIV, "p", 5, |out| {
		out.latin1("text").raw(&[0xde, 0xad, 0xbe, 0xef]);
	});
	out.boolean(false);

	let values = decode_all(out.bytes(), 0, 2);
	assert_eq!(node(&values[0]).subkind, NodeSubkindData::Text { text_content: "text".to_owned() });
	assert_eq!(values[1], ValueSummary::Bool(false));
}

#[test]
fn unresolved_shape_keeps_node_preview() {
	let mut out = SummaryWriter::new();
	write_node(&mut out, 55, "span", 5, |out| {
		out.latin1("hi");
	});

	let values = decode_all(out.bytes(), 0, 1);
	assert_eq!(values[0].as_object().and_then(|object| object.class.as_deref()), None);
	assert_eq!(node(&values[0]).node_name, "span");
}

#[test]
fn oversized_external_is_rejected() {
	let mut out = SummaryWriter::new();
	out.object(kind::EXTERNAL, 0).u32(DIV).u32(64).u8(EXTERNAL_SUMMARY_VERSION);

	let shapes = shapes();
	let mut cursor = Cursor::new(out.bytes());
	let err = decode_value(&mut cursor, 0, &shapes).expect_err("size exceeds buffer");
	assert!(matches!(err, SummaryError::ExternalSizeOutOfRange { at: 6, size: 64, rem: 5 }));
}

#[test]
fn payload_errors_still_propagate() {
	let mut out = SummaryWriter::new();
	out.object(kind::EXTERNAL, 0).u32(DIV);
	let size_at = out.begin_external();
	out.u8(EXTERNAL_SUMMARY_VERSION).u8(EXTERNAL_KIND_NODE).u16(1);
	out.end_external(size_at);

	let shapes = shapes();
	let mut cursor = Cursor::new(out.bytes());
	let err = decode_value(&mut cursor, 0, &shapes).expect_err("node name missing");
	assert!(matches!(err, SummaryError::UnexpectedEof { .. }));
}

#[test]
fn element_attributes_cap_and_keep_length() {
	let mut out = SummaryWriter::new();
	write_node(&mut out, DIV, "DIV", 1, |out| {
		out.u32(20);
		for index in 0..16 {
			out.latin1(&format!("data-{index}")).latin1(&index.to_string());
		}
	});
	out.string_value("next");

	let values = decode_all(out.bytes(), 0, 2);
	let NodeSubkindData::Element { attributes, attributes_length } = &node(&values[0]).subkind else {
		panic!("expected element subkind");
	};
	assert_eq!(*attributes_length, 20);
	assert_eq!(attributes.len(), 16);
	assert_eq!(attributes[15], ("data-15".to_owned(), "15".to_owned()));
	assert_eq!(values[1], ValueSummary::String("next".to_owned()));
}

#[test]
fn document_fragment_children_cap_and_keep_length() {
	let mut out = SummaryWriter::new();
	write_node(&mut out, FRAGMENT, "#document-fragment", 4, |out| {
		out.u32(25);
		for index in 0..16 {
			out.int32(index);
		}
	});
	out.boolean(true);

	let values = decode_all(out.bytes(), 0, 2);
	let NodeSubkindData::DocumentFragment { child_nodes, child_nodes_length } = &node(&values[0]).subkind else {
		panic!("expected fragment subkind");
	};
	assert_eq!(*child_nodes_length, 25);
	let children = child_nodes.as_deref().expect("top-level fragment expands children");
	assert_eq!(children.len(), 16);
	assert_eq!(children[15], ValueSummary::Int(15));
	assert_eq!(values[1], ValueSummary::Bool(true));
}
