use valsum_testkit::{SummaryWriter, kind};

use crate::summary::{
	ArgumentDecodeResult, EXPIRED_VALUES_MAGIC, MAX_ARGUMENTS_TO_RECORD, Preview, ShapeEntry, ShapeTable, SummaryError, ValueSummary, ZERO_ARGUMENTS_MAGIC,
	decode_arguments,
};

#[test]
fn sentinels_do_not_touch_the_buffer() {
	let shapes = ShapeTable::new();
	assert_eq!(decode_arguments(&[], &shapes, ZERO_ARGUMENTS_MAGIC).expect("empty"), ArgumentDecodeResult::Empty);
	assert_eq!(
		decode_arguments(&[], &shapes, EXPIRED_VALUES_MAGIC).expect("unavailable"),
		ArgumentDecodeResult::Unavailable
	);
}

#[test]
fn two_string_arguments_decode_in_order() {
	let mut out = SummaryWriter::with_version();
	let index = out.position();
	out.u32(2).string_value("foo").string_value("bar");

	let result = decode_arguments(out.bytes(), &ShapeTable::new(), index as i32).expect("arguments decode");
	assert_eq!(
		result,
		ArgumentDecodeResult::Values(vec![ValueSummary::String("foo".to_owned()), ValueSummary::String("bar".to_owned())])
	);
}

#[test]
fn argument_count_is_capped() {
	let mut out = SummaryWriter::with_version();
	let index = out.position();
	out.u32(9);
	for value in 0..MAX_ARGUMENTS_TO_RECORD {
		out.int32(value as i32 * 100);
	}

	let ArgumentDecodeResult::Values(values) = decode_arguments(out.bytes(), &ShapeTable::new(), index as i32).expect("arguments decode") else {
		panic!("expected values");
	};
	assert_eq!(values.len(), MAX_ARGUMENTS_TO_RECORD);
	assert_eq!(values[3], ValueSummary::Int(300));
}

#[test]
fn zero_count_yields_empty_values() {
	let mut out = SummaryWriter::with_version();
	out.u32(0);

	let result = decode_arguments(out.bytes(), &ShapeTable::new(), 4).expect("arguments decode");
	assert_eq!(result, ArgumentDecodeResult::Values(Vec::new()));
}

#[test]
fn arguments_are_top_level_previews() {
	let shapes = ShapeTable::from_entries([(0, ShapeEntry::new("Array", Vec::<String>::new()))]);
	let mut out = SummaryWriter::with_version();
	out.u32(1).object(kind::ARRAY_LIKE, 0).u32(0).u32(2).int32(1).int32(2);

	let ArgumentDecodeResult::Values(values) = decode_arguments(out.bytes(), &shapes, 4).expect("arguments decode") else {
		panic!("expected values");
	};
	let Some(Preview::ArrayLike(preview)) = values[0].as_object().and_then(|object| object.preview.as_ref()) else {
		panic!("expected array preview");
	};
	assert_eq!(preview.items, vec![ValueSummary::Int(1), ValueSummary::Int(2)]);
}

#[test]
fn bad_indices_are_rejected() {
	let shapes = ShapeTable::new();
	let out = SummaryWriter::with_version();

	let err = decode_arguments(out.bytes(), &shapes, -3).expect_err("negative index");
	assert!(matches!(err, SummaryError::InvalidValuesIndex { index: -3 }));

	let err = decode_arguments(out.bytes(), &shapes, 40).expect_err("index past end");
	assert!(matches!(err, SummaryError::IndexOutOfRange { index: 40, len: 4 }));

	let err = decode_arguments(out.bytes(), &shapes, 4).expect_err("count missing");
	assert!(matches!(err, SummaryError::UnexpectedEof { at: 4, need: 4, rem: 0 }));
}
