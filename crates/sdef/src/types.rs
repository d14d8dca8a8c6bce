//! Wire-level type codes for SDEF entries.

/// The entry type code that marks an array entry rather than a plain value.
pub const ARRAY_SENTINEL: u16 = 2;

/// Value type codes used in SDEF entry records.
///
/// The values are the actual binary type codes from the file format.
/// `Array` doubles as the sentinel that switches an entry record into its
/// array layout. `UInt64` and `String` only decode in the versioned
/// sub-format; the legacy sub-format predates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ValueTag {
    /// No value.
    Nothing = 0,
    /// Null value.
    Null = 1,
    /// Array sentinel.
    Array = 2,
    /// Length-prefixed string.
    String = 3,
    /// Signed 8-bit integer.
    SByte = 4,
    /// Unsigned 8-bit integer.
    Byte = 5,
    /// Boolean (single byte).
    Bool = 7,
    /// Signed 32-bit integer.
    Int32 = 10,
    /// Unsigned 32-bit integer.
    UInt32 = 11,
    /// 32-bit floating point.
    Float32 = 12,
    /// Unsigned 64-bit integer.
    UInt64 = 14,
    /// 64-bit floating point.
    Float64 = 15,
}

impl ValueTag {
    /// Parse from a u16 type code.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(Self::Nothing),
            1 => Some(Self::Null),
            2 => Some(Self::Array),
            3 => Some(Self::String),
            4 => Some(Self::SByte),
            5 => Some(Self::Byte),
            7 => Some(Self::Bool),
            10 => Some(Self::Int32),
            11 => Some(Self::UInt32),
            12 => Some(Self::Float32),
            14 => Some(Self::UInt64),
            15 => Some(Self::Float64),
            _ => None,
        }
    }

    /// Get the string name for this type code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nothing => "Nothing",
            Self::Null => "Null",
            Self::Array => "Array",
            Self::String => "String",
            Self::SByte => "SByte",
            Self::Byte => "Byte",
            Self::Bool => "Bool",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Float32 => "Float32",
            Self::UInt64 => "UInt64",
            Self::Float64 => "Float64",
        }
    }
}

impl std::fmt::Display for ValueTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
