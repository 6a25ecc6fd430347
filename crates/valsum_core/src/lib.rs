//! Public library API for decoding traced value summaries.

/// Value-summary wire format, decoders, shape tables, and buffer container.
pub mod summary;
