use std::path::Path;

use clap::ValueEnum;
use rustpump_core::encoding::PackedFormat;
use rustpump_core::types::StrokeTable;

/// CLI-friendly enum for selecting a packed timestamp format.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PackedFormatArg {
    /// 5-byte history timestamp.
    Full,
    /// 2-byte date.
    Date,
    /// 4-byte CGM timestamp.
    Cgm,
}

impl PackedFormatArg {
    /// Convert to the core [`PackedFormat`] representation.
    pub const fn into_format(self) -> PackedFormat {
        match self {
            Self::Full => PackedFormat::Full,
            Self::Date => PackedFormat::Date,
            Self::Cgm => PackedFormat::Cgm,
        }
    }
}

/// Parses hex bytes, accepting `1F400001 05`, `1f 40 00 01 05`, or `0x1F,0x40`.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, String> {
    let digits: String = input
        .split(|c: char| c.is_whitespace() || c == ',' || c == ':')
        .map(|tok| tok.trim_start_matches("0x").trim_start_matches("0X"))
        .collect();
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits in {input:?}"));
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            digits
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| format!("invalid hex byte at offset {i} in {input:?}"))
        })
        .collect()
}

/// Loads a stroke table from a JSON file, or the default table when absent.
pub fn load_stroke_table(path: Option<&Path>) -> Result<StrokeTable, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(StrokeTable::default());
    };
    let text = std::fs::read_to_string(path)?;
    let table = serde_json::from_str(&text)?;
    log::debug!("loaded stroke table from {}", path.display());
    Ok(table)
}
