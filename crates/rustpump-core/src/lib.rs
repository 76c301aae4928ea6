//! Insulin pump wire codecs in pure Rust.
//!
//! `rustpump-core` translates between the pump's compact, bit-packed field
//! encodings and ordinary values: civil timestamps, times of day, and insulin
//! quantities. It performs no I/O; the transport layer hands it raw byte
//! buffers and the command layer embeds the payloads it produces.
//!
//! # Feature flags
//!
//! - **`serde`** — derives `Serialize`/`Deserialize` on the value types and
//!   the stroke table.

/// Packed timestamp decoders and the byte reader/writer they are built on.
pub mod encoding;
/// Error types for decoding, encoding, and parsing.
pub mod error;
/// Pump command payload codecs.
pub mod services;
/// Core value types: time of day, insulin, device family, stroke table.
pub mod types;

pub use error::{DecodeError, EncodeError, FormatError};
