//! Primitive type tags
//!
//! Every property declared by a class carries one of these tags. Tags are
//! compared exactly: there is no widening, narrowing, or sign coercion
//! between them anywhere in the SDK.

use serde::{Deserialize, Serialize};

/// Primitive type of a declared property.
///
/// The numeric codes follow declaration order and are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum MiType {
    /// Boolean
    Boolean = 0,
    /// Unsigned 8-bit integer
    Uint8 = 1,
    /// Signed 8-bit integer
    Sint8 = 2,
    /// Unsigned 16-bit integer
    Uint16 = 3,
    /// Signed 16-bit integer
    Sint16 = 4,
    /// Unsigned 32-bit integer
    Uint32 = 5,
    /// Signed 32-bit integer
    Sint32 = 6,
    /// Unsigned 64-bit integer
    Uint64 = 7,
    /// Signed 64-bit integer
    Sint64 = 8,
    /// 32-bit float
    Real32 = 9,
    /// 64-bit float
    Real64 = 10,
    /// UTF-16 code unit
    Char16 = 11,
    /// Timestamp or interval
    Datetime = 12,
    /// String
    String = 13,
    /// Reference to another instance
    Reference = 14,
    /// Embedded instance
    Instance = 15,
}

impl MiType {
    /// All tags, in code order.
    pub const ALL: [MiType; 16] = [
        MiType::Boolean,
        MiType::Uint8,
        MiType::Sint8,
        MiType::Uint16,
        MiType::Sint16,
        MiType::Uint32,
        MiType::Sint32,
        MiType::Uint64,
        MiType::Sint64,
        MiType::Real32,
        MiType::Real64,
        MiType::Char16,
        MiType::Datetime,
        MiType::String,
        MiType::Reference,
        MiType::Instance,
    ];

    /// Numeric code of this tag
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Tag for a numeric code, if any
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Lowercase type name, as used in fixtures and diagnostics
    pub const fn type_name(self) -> &'static str {
        match self {
            MiType::Boolean => "boolean",
            MiType::Uint8 => "uint8",
            MiType::Sint8 => "sint8",
            MiType::Uint16 => "uint16",
            MiType::Sint16 => "sint16",
            MiType::Uint32 => "uint32",
            MiType::Sint32 => "sint32",
            MiType::Uint64 => "uint64",
            MiType::Sint64 => "sint64",
            MiType::Real32 => "real32",
            MiType::Real64 => "real64",
            MiType::Char16 => "char16",
            MiType::Datetime => "datetime",
            MiType::String => "string",
            MiType::Reference => "reference",
            MiType::Instance => "instance",
        }
    }

    /// Whether values of this tag are integers
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            MiType::Uint8
                | MiType::Sint8
                | MiType::Uint16
                | MiType::Sint16
                | MiType::Uint32
                | MiType::Sint32
                | MiType::Uint64
                | MiType::Sint64
        )
    }
}

impl std::fmt::Display for MiType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}
