//! Testable instances
//!
//! A `TestableInstance` is an immutable snapshot of a provider instance.
//! Ingestion clones the instance, which shares the field table until the
//! source is next mutated; the snapshot itself never mutates.

use std::fmt;

use mi_sdk::{FromMiValue, Instance, MiType};

use crate::assert::{assert_equal, fail};
use crate::reflect::{self, LookupError, PropertyInfo};

/// Name of the property that carries a method's return value.
pub const MI_RETURN: &str = "MIReturn";

/// Snapshot of one posted instance with typed accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct TestableInstance {
    instance: Instance,
}

impl TestableInstance {
    /// Snapshot an instance
    pub fn new(instance: &Instance) -> Self {
        Self {
            instance: instance.clone(),
        }
    }

    /// Underlying instance
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Class name of the underlying instance
    pub fn class_name(&self) -> &str {
        self.instance.class().name()
    }

    /// Number of set key properties
    pub fn number_of_keys(&self) -> usize {
        reflect::count_keys(&self.instance)
    }

    /// Number of set properties
    pub fn number_of_properties(&self) -> usize {
        reflect::count_properties(&self.instance)
    }

    /// Look a property up by name
    pub fn find_property(&self, name: &str) -> Result<PropertyInfo, LookupError> {
        reflect::find_property(&self.instance, name)
    }

    /// Look up the `ordinal`-th set property
    pub fn find_property_at(
        &self,
        ordinal: usize,
        keys_only: bool,
    ) -> Result<PropertyInfo, LookupError> {
        reflect::find_property_at(&self.instance, ordinal, keys_only)
    }

    #[track_caller]
    fn expect_key(
        &self,
        found: Result<PropertyInfo, LookupError>,
        what: fmt::Arguments<'_>,
    ) -> PropertyInfo {
        let info = match found {
            Ok(info) => info,
            Err(e) => fail(format_args!("{}: {}", what, e)),
        };
        assert_equal(true, info.is_key, format_args!("Key flag of {}", info.name));
        assert_equal(MiType::String, info.ty, format_args!("Type of key {}", info.name));
        assert_equal(true, info.exists, format_args!("Existence of key {}", info.name));
        info
    }

    /// Value of the key property `name`
    #[track_caller]
    pub fn key(&self, name: &str) -> String {
        let info = self.expect_key(
            self.find_property(name),
            format_args!("Lookup of key {} in {}", name, self.class_name()),
        );
        info.value_string()
    }

    /// Name and value of the `ordinal`-th set key property
    #[track_caller]
    pub fn key_at(&self, ordinal: usize) -> (String, String) {
        let info = self.expect_key(
            self.find_property_at(ordinal, true),
            format_args!("Lookup of key #{} in {}", ordinal, self.class_name()),
        );
        let value = info.value_string();
        (info.name, value)
    }

    /// Name of the `ordinal`-th set key property
    #[track_caller]
    pub fn key_name(&self, ordinal: usize) -> String {
        self.key_at(ordinal).0
    }

    /// Value of the `ordinal`-th set key property
    #[track_caller]
    pub fn key_value(&self, ordinal: usize) -> String {
        self.key_at(ordinal).1
    }

    /// Value of the non-key `MIReturn` property as `T`
    #[track_caller]
    pub fn mi_return<T: FromMiValue>(&self) -> T {
        let info = match self.find_property(MI_RETURN) {
            Ok(info) => info,
            Err(e) => fail(format_args!(
                "Lookup of {} in {}: {}",
                MI_RETURN,
                self.class_name(),
                e
            )),
        };
        assert_equal(false, info.is_key, format_args!("Key flag of {}", MI_RETURN));
        info.value_as()
    }

    /// `MIReturn` as boolean
    #[track_caller]
    pub fn mi_return_boolean(&self) -> bool {
        self.mi_return()
    }

    /// `MIReturn` as uint8
    #[track_caller]
    pub fn mi_return_uint8(&self) -> u8 {
        self.mi_return()
    }

    /// `MIReturn` as uint16
    #[track_caller]
    pub fn mi_return_uint16(&self) -> u16 {
        self.mi_return()
    }

    /// `MIReturn` as uint32
    #[track_caller]
    pub fn mi_return_uint32(&self) -> u32 {
        self.mi_return()
    }

    /// `MIReturn` as uint64
    #[track_caller]
    pub fn mi_return_uint64(&self) -> u64 {
        self.mi_return()
    }

    /// `MIReturn` as string
    #[track_caller]
    pub fn mi_return_string(&self) -> String {
        self.mi_return()
    }

    /// Write a human-readable dump to stdout
    pub fn print(&self) {
        print!("{}", self);
    }
}

impl From<&Instance> for TestableInstance {
    fn from(instance: &Instance) -> Self {
        Self::new(instance)
    }
}

impl fmt::Display for TestableInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "instance of {}", self.class_name())?;
        writeln!(f, "{{")?;
        for pd in self.instance.class().properties() {
            let Some(field) = self.instance.field(pd.offset) else {
                continue;
            };
            if !field.exists {
                continue;
            }
            let key = if pd.is_key() { " [key]" } else { "" };
            writeln!(f, "    {}: {} = {}{}", pd.name, pd.ty, field.value, key)?;
        }
        writeln!(f, "}}")
    }
}
