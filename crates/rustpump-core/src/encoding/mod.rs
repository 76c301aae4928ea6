/// Bit-field descriptors for packed wire formats.
pub mod field;
/// Bounds-checked byte reader for fixed-width pump fields.
pub mod reader;
/// Packed timestamp decoders (full, date-only, condensed CGM).
pub mod timestamp;
/// Byte writer for encoding pump payloads into a caller-owned buffer.
pub mod writer;

pub use timestamp::{decode_cgm_time, decode_date, decode_time, localize, PackedFormat};
