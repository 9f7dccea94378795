//! Field reflection over self-describing instances
//!
//! Lookups walk the class descriptor in declaration order and read each
//! property's field from the slot the descriptor names. Nothing here
//! assumes a particular property order or slot layout, so the same code
//! serves every class.
//!
//! Low-level lookups return [`LookupError`] and leave the decision to the
//! caller. The typed getters on [`PropertyInfo`] are strict: a tag
//! mismatch or an unset property is a fatal test failure.

use mi_sdk::{
    Char16, DeclFlags, Datetime, Field, FromMiValue, Instance, MiType, MiValue, PropertyDecl,
};

use mi_sdk::instance::FIELD_FLAG_MODIFIED;

use crate::assert::{assert_equal, fail};

/// Non-fatal lookup outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No property with that name or ordinal
    #[error("property not found")]
    NotFound,

    /// Property exists but its declared type is not the one asked for
    #[error("property type mismatch")]
    TypeMismatch,
}

/// Everything one lookup learned about a property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInfo {
    /// Property name
    pub name: String,
    /// Key qualifier set on the declaration
    pub is_key: bool,
    /// Declared type
    pub ty: MiType,
    /// Field value (zero value of `ty` when not set)
    pub value: MiValue,
    /// Whether the field is set
    pub exists: bool,
    /// Per-field state bits
    pub flags: u8,
    /// Declaration qualifier bits
    pub decl_flags: DeclFlags,
}

impl PropertyInfo {
    fn extract(pd: &PropertyDecl, field: &Field) -> Self {
        Self {
            name: pd.name.clone(),
            is_key: pd.is_key(),
            ty: pd.ty,
            value: field.value.clone(),
            exists: field.exists,
            flags: field.flags,
            decl_flags: pd.flags,
        }
    }

    /// Value as `T`; fails the test unless the declared type is exactly
    /// `T::MI_TYPE` and the property is set.
    #[track_caller]
    pub fn value_as<T: FromMiValue>(&self) -> T {
        assert_equal(
            T::MI_TYPE,
            self.ty,
            format_args!("Type of property {}", self.name),
        );
        assert_equal(
            true,
            self.exists,
            format_args!("Existence of property {}", self.name),
        );
        match T::from_mi_value(&self.value) {
            Some(v) => v,
            None => fail(format_args!(
                "Property {} declared {} but holds {}",
                self.name,
                self.ty,
                self.value.ty()
            )),
        }
    }

    /// string value
    #[track_caller]
    pub fn value_string(&self) -> String {
        self.value_as()
    }

    /// boolean value
    #[track_caller]
    pub fn value_boolean(&self) -> bool {
        self.value_as()
    }

    /// uint8 value
    #[track_caller]
    pub fn value_uint8(&self) -> u8 {
        self.value_as()
    }

    /// uint16 value
    #[track_caller]
    pub fn value_uint16(&self) -> u16 {
        self.value_as()
    }

    /// uint32 value
    #[track_caller]
    pub fn value_uint32(&self) -> u32 {
        self.value_as()
    }

    /// uint64 value
    #[track_caller]
    pub fn value_uint64(&self) -> u64 {
        self.value_as()
    }

    /// sint8 value
    #[track_caller]
    pub fn value_sint8(&self) -> i8 {
        self.value_as()
    }

    /// sint16 value
    #[track_caller]
    pub fn value_sint16(&self) -> i16 {
        self.value_as()
    }

    /// sint32 value
    #[track_caller]
    pub fn value_sint32(&self) -> i32 {
        self.value_as()
    }

    /// sint64 value
    #[track_caller]
    pub fn value_sint64(&self) -> i64 {
        self.value_as()
    }

    /// real32 value
    #[track_caller]
    pub fn value_real32(&self) -> f32 {
        self.value_as()
    }

    /// real64 value
    #[track_caller]
    pub fn value_real64(&self) -> f64 {
        self.value_as()
    }

    /// char16 value
    #[track_caller]
    pub fn value_char16(&self) -> u16 {
        self.value_as::<Char16>().0
    }

    /// datetime value
    #[track_caller]
    pub fn value_datetime(&self) -> Datetime {
        self.value_as()
    }
}

#[track_caller]
fn field_of<'a>(instance: &'a Instance, pd: &PropertyDecl) -> &'a Field {
    match instance.field(pd.offset) {
        Some(field) => field,
        None => fail(format_args!(
            "Class {} declares {} at slot {} but the instance has {} fields",
            instance.class().name(),
            pd.name,
            pd.offset,
            instance.class().field_count()
        )),
    }
}

/// Set properties in declaration order, optionally keys only.
fn existing<'a>(
    instance: &'a Instance,
    keys_only: bool,
) -> impl Iterator<Item = (&'a PropertyDecl, &'a Field)> + 'a {
    instance
        .class()
        .properties()
        .iter()
        .map(move |pd| (pd, field_of(instance, pd)))
        .filter(move |(pd, field)| field.exists && (!keys_only || pd.is_key()))
}

/// Look a property up by name. First declaration with that name wins.
pub fn find_property(instance: &Instance, name: &str) -> Result<PropertyInfo, LookupError> {
    instance
        .class()
        .properties()
        .iter()
        .find(|pd| pd.name.as_bytes() == name.as_bytes())
        .map(|pd| PropertyInfo::extract(pd, field_of(instance, pd)))
        .ok_or(LookupError::NotFound)
}

/// The `ordinal`-th set property (0-based), optionally counting keys only.
pub fn find_property_at(
    instance: &Instance,
    ordinal: usize,
    keys_only: bool,
) -> Result<PropertyInfo, LookupError> {
    existing(instance, keys_only)
        .nth(ordinal)
        .map(|(pd, field)| PropertyInfo::extract(pd, field))
        .ok_or(LookupError::NotFound)
}

/// Number of set key properties
pub fn count_keys(instance: &Instance) -> usize {
    existing(instance, true).count()
}

/// Number of set properties
pub fn count_properties(instance: &Instance) -> usize {
    existing(instance, false).count()
}

/// Write handle on one string field of an instance.
///
/// Writing through it keeps the field's value, `exists` bit and modified
/// flag consistent with `Instance::set`.
#[derive(Debug)]
pub struct StringFieldMut<'a> {
    field: &'a mut Field,
}

impl StringFieldMut<'_> {
    /// Current value; empty when unset
    pub fn value(&self) -> &str {
        match &self.field.value {
            MiValue::String(s) => s,
            _ => "",
        }
    }

    /// Whether the property has been set
    pub fn exists(&self) -> bool {
        self.field.exists
    }

    /// Store `value` and mark the field set
    pub fn set(&mut self, value: &str) {
        self.field.value = MiValue::String(value.to_string());
        self.field.exists = true;
        self.field.flags |= FIELD_FLAG_MODIFIED;
    }
}

/// Writable access to a string property, used to fill in key values on
/// instances handed to code under test.
pub fn find_string_field_mut<'a>(
    instance: &'a mut Instance,
    name: &str,
) -> Result<StringFieldMut<'a>, LookupError> {
    let (offset, ty) = match instance.class().property(name) {
        Some(pd) => (pd.offset, pd.ty),
        None => return Err(LookupError::NotFound),
    };
    if ty != MiType::String {
        return Err(LookupError::TypeMismatch);
    }
    let field = instance.field_mut(offset).ok_or(LookupError::NotFound)?;
    Ok(StringFieldMut { field })
}
