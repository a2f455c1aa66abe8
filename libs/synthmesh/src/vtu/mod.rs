//! # VTU Serialization
//!
//! VTK XML `UnstructuredGrid` files holding one piece of hexahedral cells
//! with point data.
//!
//! ## Layout
//!
//! ```text
//! VTKFile (UnstructuredGrid, LittleEndian, UInt32 headers)
//! └── UnstructuredGrid
//!     └── Piece (NumberOfPoints, NumberOfCells)
//!         ├── PointData (Scalars=active scalar, Vectors=active vector)
//!         │   └── DataArray Float64 per field, in file order
//!         ├── Points: DataArray Float64 x3
//!         └── Cells: connectivity Int64, offsets Int64, types UInt8
//! ```
//!
//! Array payloads are either whitespace-separated `ascii` text or inline
//! `binary`: base64 of a UInt32 byte count followed by little-endian values.

mod reader;
mod writer;

use std::fmt;
use std::str::FromStr;

pub use reader::{parse_vtu, read_vtu};
pub use writer::VtuWriter;

/// Encoding of `DataArray` payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataFormat {
    /// Human-readable decimal text.
    #[default]
    Ascii,
    /// Base64-encoded little-endian bytes.
    Binary,
}

impl DataFormat {
    /// Value of the `format` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            DataFormat::Ascii => "ascii",
            DataFormat::Binary => "binary",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascii" => Ok(DataFormat::Ascii),
            "binary" => Ok(DataFormat::Binary),
            other => Err(format!("unsupported data format '{other}'")),
        }
    }
}

/// VTK element type of a `DataArray`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueType {
    Float32,
    Float64,
    Int32,
    Int64,
    UInt8,
    UInt32,
    UInt64,
}

impl ValueType {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ValueType::Float32 => "Float32",
            ValueType::Float64 => "Float64",
            ValueType::Int32 => "Int32",
            ValueType::Int64 => "Int64",
            ValueType::UInt8 => "UInt8",
            ValueType::UInt32 => "UInt32",
            ValueType::UInt64 => "UInt64",
        }
    }

    pub(crate) fn parse(name: &str) -> Option<Self> {
        match name {
            "Float32" => Some(ValueType::Float32),
            "Float64" => Some(ValueType::Float64),
            "Int32" => Some(ValueType::Int32),
            "Int64" => Some(ValueType::Int64),
            "UInt8" => Some(ValueType::UInt8),
            "UInt32" => Some(ValueType::UInt32),
            "UInt64" => Some(ValueType::UInt64),
            _ => None,
        }
    }

    /// Width in bytes of one value.
    pub(crate) fn size(self) -> usize {
        match self {
            ValueType::UInt8 => 1,
            ValueType::Float32 | ValueType::Int32 | ValueType::UInt32 => 4,
            ValueType::Float64 | ValueType::Int64 | ValueType::UInt64 => 8,
        }
    }

    pub(crate) fn is_float(self) -> bool {
        matches!(self, ValueType::Float32 | ValueType::Float64)
    }
}
