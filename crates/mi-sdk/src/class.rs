//! Class descriptors
//!
//! A `ClassDecl` is static, read-only metadata shared by every instance of
//! a record type. Each `PropertyDecl` names the field slot (`offset`) that
//! holds its value inside the instance field table. Declaration order is
//! authoritative for lookups; slot order is independent of it.

use std::sync::Arc;

use crate::error::{SdkError, SdkResult};
use crate::types::MiType;

bitflags::bitflags! {
    /// Property qualifier bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DeclFlags: u32 {
        /// Part of the instance identity
        const KEY = 0x0000_1000;
        /// Method input parameter
        const IN = 0x0000_2000;
        /// Method output parameter
        const OUT = 0x0000_4000;
        /// Must be set by the provider
        const REQUIRED = 0x0000_8000;
        /// Not writable by clients
        const READONLY = 0x0020_0000;
    }
}

impl DeclFlags {
    /// No qualifiers
    pub const NONE: DeclFlags = DeclFlags::empty();
}

/// Upper bound on the field slots a class may declare
pub const MAX_FIELD_SLOTS: usize = 1 << 16;

/// Declaration of one property of a class.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    /// Property name (compared byte-for-byte)
    pub name: String,
    /// Declared primitive type
    pub ty: MiType,
    /// Index of this property's field in the instance field table
    pub offset: usize,
    /// Qualifier bits
    pub flags: DeclFlags,
}

impl PropertyDecl {
    /// Whether this property is part of the instance key
    pub fn is_key(&self) -> bool {
        self.flags.contains(DeclFlags::KEY)
    }
}

/// Static description of a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    name: String,
    properties: Vec<PropertyDecl>,
    field_count: usize,
}

impl ClassDecl {
    /// Create a builder for manual descriptor construction
    pub fn builder(name: &str) -> ClassDeclBuilder {
        ClassDeclBuilder {
            name: name.to_string(),
            properties: Vec::new(),
        }
    }

    /// Class name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Property declarations in declaration order
    pub fn properties(&self) -> &[PropertyDecl] {
        &self.properties
    }

    /// Number of field slots an instance of this class carries
    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// First declaration with this name
    pub fn property(&self, name: &str) -> Option<&PropertyDecl> {
        self.properties.iter().find(|pd| pd.name == name)
    }
}

/// Builder for `ClassDecl`.
///
/// Properties added without an explicit slot take the next slot after the
/// highest one used so far.
pub struct ClassDeclBuilder {
    name: String,
    properties: Vec<PropertyDecl>,
}

impl ClassDeclBuilder {
    fn next_offset(&self) -> usize {
        self.properties
            .iter()
            .map(|pd| pd.offset.saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    /// Add a key property
    pub fn key(self, name: &str, ty: MiType) -> Self {
        self.property_with_flags(name, ty, DeclFlags::KEY)
    }

    /// Add a non-key property
    pub fn property(self, name: &str, ty: MiType) -> Self {
        self.property_with_flags(name, ty, DeclFlags::NONE)
    }

    /// Add a property with explicit qualifier bits
    pub fn property_with_flags(mut self, name: &str, ty: MiType, flags: DeclFlags) -> Self {
        let offset = self.next_offset();
        self.properties.push(PropertyDecl {
            name: name.to_string(),
            ty,
            offset,
            flags,
        });
        self
    }

    /// Add a property bound to an explicit field slot
    pub fn with_offset(mut self, name: &str, ty: MiType, flags: DeclFlags, offset: usize) -> Self {
        self.properties.push(PropertyDecl {
            name: name.to_string(),
            ty,
            offset,
            flags,
        });
        self
    }

    /// Validate slots and build a shared descriptor
    pub fn build(self) -> SdkResult<Arc<ClassDecl>> {
        if let Some(pd) = self.properties.iter().find(|pd| pd.offset >= MAX_FIELD_SLOTS) {
            return Err(SdkError::InvalidClass {
                reason: format!(
                    "field slot {} out of range ({}); at most {} slots",
                    pd.offset, pd.name, MAX_FIELD_SLOTS
                ),
                class: self.name,
            });
        }
        let field_count = self.next_offset();
        let mut used = vec![false; field_count];
        for pd in &self.properties {
            if std::mem::replace(&mut used[pd.offset], true) {
                return Err(SdkError::InvalidClass {
                    class: self.name,
                    reason: format!("field slot {} declared twice ({})", pd.offset, pd.name),
                });
            }
        }
        Ok(Arc::new(ClassDecl {
            name: self.name,
            properties: self.properties,
            field_count,
        }))
    }
}
