//! Instances: a class descriptor plus a field table
//!
//! Cloning an `Instance` shares its field table. Any mutation detaches the
//! table first (`Arc::make_mut`), so a clone taken earlier keeps observing
//! the values it was taken with.

use std::sync::Arc;

use crate::class::ClassDecl;
use crate::convert::IntoMiValue;
use crate::error::{SdkError, SdkResult};
use crate::value::MiValue;

/// Per-field state bit: value has been modified since construction
pub const FIELD_FLAG_MODIFIED: u8 = 0x01;

/// One field slot of an instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Current value; holds the tag's zero value when `exists` is false
    pub value: MiValue,
    /// Whether the property has been set
    pub exists: bool,
    /// Per-field state bits
    pub flags: u8,
}

/// A self-describing record.
#[derive(Debug, Clone)]
pub struct Instance {
    class: Arc<ClassDecl>,
    fields: Arc<Vec<Field>>,
}

impl Instance {
    /// New instance of `class` with no property set
    pub fn new(class: Arc<ClassDecl>) -> Self {
        let mut fields: Vec<Field> = (0..class.field_count())
            .map(|_| Field {
                value: MiValue::Boolean(false),
                exists: false,
                flags: 0,
            })
            .collect();
        for pd in class.properties() {
            fields[pd.offset].value = MiValue::default_for(pd.ty);
        }
        Self {
            class,
            fields: Arc::new(fields),
        }
    }

    /// Class descriptor
    pub fn class(&self) -> &Arc<ClassDecl> {
        &self.class
    }

    /// Field stored at a slot
    pub fn field(&self, offset: usize) -> Option<&Field> {
        self.fields.get(offset)
    }

    /// Mutable field at a slot; detaches the field table from any clone
    pub fn field_mut(&mut self, offset: usize) -> Option<&mut Field> {
        Arc::make_mut(&mut self.fields).get_mut(offset)
    }

    /// Whether this instance and `other` share one field table
    pub fn shares_fields_with(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }

    /// Set a property by name
    ///
    /// The value's tag must equal the declared type exactly.
    pub fn set(&mut self, name: &str, value: impl IntoMiValue) -> SdkResult<()> {
        let value = value.into_mi_value();
        let (offset, ty) = {
            let pd = self.class.property(name).ok_or_else(|| SdkError::NoSuchProperty {
                class: self.class.name().to_string(),
                name: name.to_string(),
            })?;
            (pd.offset, pd.ty)
        };
        if value.ty() != ty {
            return Err(SdkError::TypeMismatch {
                property: name.to_string(),
                expected: ty,
                actual: value.ty(),
            });
        }
        let field = &mut Arc::make_mut(&mut self.fields)[offset];
        field.value = value;
        field.exists = true;
        field.flags |= FIELD_FLAG_MODIFIED;
        Ok(())
    }

    /// Builder-style `set`
    pub fn with(mut self, name: &str, value: impl IntoMiValue) -> SdkResult<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Unset a property by name, restoring its zero value
    pub fn clear(&mut self, name: &str) -> SdkResult<()> {
        let pd = self.class.property(name).ok_or_else(|| SdkError::NoSuchProperty {
            class: self.class.name().to_string(),
            name: name.to_string(),
        })?;
        let (offset, ty) = (pd.offset, pd.ty);
        let field = &mut Arc::make_mut(&mut self.fields)[offset];
        field.value = MiValue::default_for(ty);
        field.exists = false;
        field.flags |= FIELD_FLAG_MODIFIED;
        Ok(())
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.class, &other.class) || self.class == other.class)
            && self.fields == other.fields
    }
}
