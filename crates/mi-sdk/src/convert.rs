//! Strict conversions between Rust scalars and `MiValue`.
//!
//! Each Rust type maps to exactly one `MiType`. Extraction succeeds only
//! when the value carries that tag; a `u32` is never read out of a
//! `Uint8` value, and vice versa.

use crate::types::MiType;
use crate::value::{Datetime, MiValue};

/// Extract a Rust value from an `MiValue` of a matching tag.
pub trait FromMiValue: Sized {
    /// The one tag this type is extracted from
    const MI_TYPE: MiType;

    /// Returns `None` unless `value.ty() == Self::MI_TYPE`.
    fn from_mi_value(value: &MiValue) -> Option<Self>;
}

/// Wrap a Rust value as an `MiValue`.
pub trait IntoMiValue {
    /// Convert into the tagged union
    fn into_mi_value(self) -> MiValue;
}

macro_rules! scalar_conversions {
    ($($rust:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromMiValue for $rust {
                const MI_TYPE: MiType = MiType::$variant;

                fn from_mi_value(value: &MiValue) -> Option<Self> {
                    match value {
                        MiValue::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            }

            impl IntoMiValue for $rust {
                fn into_mi_value(self) -> MiValue {
                    MiValue::$variant(self)
                }
            }
        )*
    };
}

scalar_conversions! {
    bool => Boolean,
    u8 => Uint8,
    i8 => Sint8,
    u16 => Uint16,
    i16 => Sint16,
    u32 => Uint32,
    i32 => Sint32,
    u64 => Uint64,
    i64 => Sint64,
    f32 => Real32,
    f64 => Real64,
    Datetime => Datetime,
}

// u16 is taken by Uint16; char16 values go through this wrapper.
/// A UTF-16 code unit, stored as `MiType::Char16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Char16(pub u16);

impl FromMiValue for Char16 {
    const MI_TYPE: MiType = MiType::Char16;

    fn from_mi_value(value: &MiValue) -> Option<Self> {
        match value {
            MiValue::Char16(c) => Some(Char16(*c)),
            _ => None,
        }
    }
}

impl IntoMiValue for Char16 {
    fn into_mi_value(self) -> MiValue {
        MiValue::Char16(self.0)
    }
}

impl FromMiValue for String {
    const MI_TYPE: MiType = MiType::String;

    fn from_mi_value(value: &MiValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl IntoMiValue for String {
    fn into_mi_value(self) -> MiValue {
        MiValue::String(self)
    }
}

impl IntoMiValue for &str {
    fn into_mi_value(self) -> MiValue {
        MiValue::String(self.to_string())
    }
}

impl IntoMiValue for MiValue {
    fn into_mi_value(self) -> MiValue {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mi_value_matches_tag_only() {
        assert_eq!(u32::from_mi_value(&MiValue::Uint32(42)), Some(42));
        assert_eq!(u32::from_mi_value(&MiValue::Uint8(42)), None);
        assert_eq!(u8::from_mi_value(&MiValue::Uint32(42)), None);
        assert_eq!(i64::from_mi_value(&MiValue::Uint64(1)), None);
        assert_eq!(bool::from_mi_value(&MiValue::Boolean(true)), Some(true));
        assert_eq!(
            String::from_mi_value(&MiValue::String("host".into())),
            Some("host".to_string())
        );
        assert_eq!(u16::from_mi_value(&MiValue::Char16(65)), None);
        assert_eq!(Char16::from_mi_value(&MiValue::Char16(65)), Some(Char16(65)));
    }

    #[test]
    fn test_into_mi_value() {
        assert_eq!(7u8.into_mi_value(), MiValue::Uint8(7));
        assert_eq!(7u64.into_mi_value(), MiValue::Uint64(7));
        assert_eq!("x".into_mi_value(), MiValue::String("x".into()));
        assert_eq!(Char16(9).into_mi_value().ty(), MiType::Char16);
    }

    #[test]
    fn test_mi_type_consts() {
        assert_eq!(<u8 as FromMiValue>::MI_TYPE, MiType::Uint8);
        assert_eq!(<String as FromMiValue>::MI_TYPE, MiType::String);
        assert_eq!(<Datetime as FromMiValue>::MI_TYPE, MiType::Datetime);
    }
}
