mod args;
mod buffer;
mod bytes;
mod compression;
mod decode;
mod error;
mod external;
mod object;
mod shape;
mod value;

/// Argument-list entry point, sentinels, and result type.
pub use args::{ArgumentDecodeResult, EXPIRED_VALUES_MAGIC, MAX_ARGUMENTS_TO_RECORD, ZERO_ARGUMENTS_MAGIC, decode_arguments};
/// Versioned value buffer container.
pub use buffer::{VALUE_BUFFER_VERSION, ValueBuffer};
/// Byte cursor and string encodings.
pub use bytes::{Cursor, StringEncoding};
/// Compression detection result and limits.
pub use compression::{Compression, MAX_DECOMPRESSED_BYTES};
/// Value decoder entry points, tags, and caps.
pub use decode::{MAX_COLLECTION_VALUES, MAX_PREVIEW_DEPTH, ValueTag, decode_value, decode_value_at};
/// Error and result aliases.
pub use error::{Result, SummaryError};
/// External payload version and node subkinds.
pub use external::{EXTERNAL_SUMMARY_VERSION, NodeSubkind};
/// Object kind bytes.
pub use object::ObjectKind;
/// Shape arena types.
pub use shape::{ShapeEntry, ShapeRecord, ShapeTable};
/// Decoded value summary tree.
pub use value::{
	ArrayLikePreview, FunctionSummary, GenericObjectPreview, MapLikePreview, NodePreview, NodeSubkindData, ObjectSummary, OwnProperty, Preview,
	PropertyDescriptor, SpecialNumber, ValueSummary,
};
