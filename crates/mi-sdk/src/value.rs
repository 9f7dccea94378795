//! Tagged union over the provider primitive types
//!
//! A field's value always carries the tag declared for its property; the
//! instance API refuses to store a value whose tag differs from the
//! declaration. Non-existing fields hold [`MiValue::default_for`] their tag.

use crate::instance::Instance;
use crate::types::MiType;

/// Point in time, or a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datetime {
    /// Calendar timestamp
    Timestamp {
        /// Year
        year: u32,
        /// Month (1-12)
        month: u32,
        /// Day of month (1-31)
        day: u32,
        /// Hour (0-23)
        hour: u32,
        /// Minute (0-59)
        minute: u32,
        /// Second (0-59)
        second: u32,
        /// Microseconds
        microseconds: u32,
        /// Offset from UTC in minutes
        utc: i32,
    },
    /// Elapsed interval
    Interval {
        /// Days
        days: u32,
        /// Hours
        hours: u32,
        /// Minutes
        minutes: u32,
        /// Seconds
        seconds: u32,
        /// Microseconds
        microseconds: u32,
    },
}

impl Datetime {
    /// Zero-length interval
    pub const ZERO: Datetime = Datetime::Interval {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        microseconds: 0,
    };
}

impl std::fmt::Display for Datetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Datetime::Timestamp {
                year,
                month,
                day,
                hour,
                minute,
                second,
                microseconds,
                utc,
            } => write!(
                f,
                "{:04}{:02}{:02}{:02}{:02}{:02}.{:06}{}{:03}",
                year,
                month,
                day,
                hour,
                minute,
                second,
                microseconds,
                if utc < 0 { '-' } else { '+' },
                utc.unsigned_abs()
            ),
            Datetime::Interval {
                days,
                hours,
                minutes,
                seconds,
                microseconds,
            } => write!(
                f,
                "{:08}{:02}{:02}{:02}.{:06}:000",
                days, hours, minutes, seconds, microseconds
            ),
        }
    }
}

/// Value of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum MiValue {
    /// boolean
    Boolean(bool),
    /// uint8
    Uint8(u8),
    /// sint8
    Sint8(i8),
    /// uint16
    Uint16(u16),
    /// sint16
    Sint16(i16),
    /// uint32
    Uint32(u32),
    /// sint32
    Sint32(i32),
    /// uint64
    Uint64(u64),
    /// sint64
    Sint64(i64),
    /// real32
    Real32(f32),
    /// real64
    Real64(f64),
    /// char16
    Char16(u16),
    /// datetime
    Datetime(Datetime),
    /// string
    String(String),
    /// reference (None is a null reference)
    Reference(Option<Box<Instance>>),
    /// embedded instance (None is a null instance)
    Instance(Option<Box<Instance>>),
}

impl MiValue {
    /// Zero value for a type tag
    pub fn default_for(ty: MiType) -> Self {
        match ty {
            MiType::Boolean => MiValue::Boolean(false),
            MiType::Uint8 => MiValue::Uint8(0),
            MiType::Sint8 => MiValue::Sint8(0),
            MiType::Uint16 => MiValue::Uint16(0),
            MiType::Sint16 => MiValue::Sint16(0),
            MiType::Uint32 => MiValue::Uint32(0),
            MiType::Sint32 => MiValue::Sint32(0),
            MiType::Uint64 => MiValue::Uint64(0),
            MiType::Sint64 => MiValue::Sint64(0),
            MiType::Real32 => MiValue::Real32(0.0),
            MiType::Real64 => MiValue::Real64(0.0),
            MiType::Char16 => MiValue::Char16(0),
            MiType::Datetime => MiValue::Datetime(Datetime::ZERO),
            MiType::String => MiValue::String(String::new()),
            MiType::Reference => MiValue::Reference(None),
            MiType::Instance => MiValue::Instance(None),
        }
    }

    /// Type tag of this value
    pub fn ty(&self) -> MiType {
        match self {
            MiValue::Boolean(_) => MiType::Boolean,
            MiValue::Uint8(_) => MiType::Uint8,
            MiValue::Sint8(_) => MiType::Sint8,
            MiValue::Uint16(_) => MiType::Uint16,
            MiValue::Sint16(_) => MiType::Sint16,
            MiValue::Uint32(_) => MiType::Uint32,
            MiValue::Sint32(_) => MiType::Sint32,
            MiValue::Uint64(_) => MiType::Uint64,
            MiValue::Sint64(_) => MiType::Sint64,
            MiValue::Real32(_) => MiType::Real32,
            MiValue::Real64(_) => MiType::Real64,
            MiValue::Char16(_) => MiType::Char16,
            MiValue::Datetime(_) => MiType::Datetime,
            MiValue::String(_) => MiType::String,
            MiValue::Reference(_) => MiType::Reference,
            MiValue::Instance(_) => MiType::Instance,
        }
    }

    /// Borrow the string payload, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MiValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for MiValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MiValue::Boolean(b) => write!(f, "{}", b),
            MiValue::Uint8(v) => write!(f, "{}", v),
            MiValue::Sint8(v) => write!(f, "{}", v),
            MiValue::Uint16(v) => write!(f, "{}", v),
            MiValue::Sint16(v) => write!(f, "{}", v),
            MiValue::Uint32(v) => write!(f, "{}", v),
            MiValue::Sint32(v) => write!(f, "{}", v),
            MiValue::Uint64(v) => write!(f, "{}", v),
            MiValue::Sint64(v) => write!(f, "{}", v),
            MiValue::Real32(v) => write!(f, "{}", v),
            MiValue::Real64(v) => write!(f, "{}", v),
            MiValue::Char16(c) => match char::from_u32(*c as u32) {
                Some(ch) => write!(f, "{}", ch),
                None => write!(f, "\\u{{{:04x}}}", c),
            },
            MiValue::Datetime(dt) => write!(f, "{}", dt),
            MiValue::String(s) => write!(f, "\"{}\"", s),
            MiValue::Reference(Some(inst)) | MiValue::Instance(Some(inst)) => {
                write!(f, "<{}>", inst.class().name())
            }
            MiValue::Reference(None) | MiValue::Instance(None) => write!(f, "null"),
        }
    }
}
