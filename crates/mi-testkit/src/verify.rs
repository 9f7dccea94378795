//! Property-name validation against an expected set

use std::collections::BTreeSet;

use crate::assert::fail;
use crate::instance::TestableInstance;

/// Difference between the set properties of an instance and an expected set.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("property mismatch in {class}: unexpected {unexpected:?}, missing {missing:?}")]
pub struct PropertyNameMismatch {
    /// Class of the checked instance
    pub class: String,
    /// Set properties not in the expected set, in declaration order
    pub unexpected: Vec<String>,
    /// Expected names with no matching property, sorted
    pub missing: Vec<String>,
}

/// Compare the instance's set property names with `expected`.
///
/// An expected name only counts as present when the instance actually has
/// that property set.
pub fn check_instance_property_names<S: AsRef<str>>(
    instance: &TestableInstance,
    expected: &[S],
) -> Result<(), PropertyNameMismatch> {
    let expected: BTreeSet<&str> = expected.iter().map(|s| s.as_ref()).collect();

    let mut actual = BTreeSet::new();
    let mut unexpected = Vec::new();
    for ordinal in 0..instance.number_of_properties() {
        let Ok(info) = instance.find_property_at(ordinal, false) else {
            break;
        };
        if !expected.contains(info.name.as_str()) {
            unexpected.push(info.name.clone());
        }
        actual.insert(info.name);
    }

    let missing: Vec<String> = expected
        .iter()
        .filter(|name| !actual.contains(**name))
        .map(|name| name.to_string())
        .collect();

    if unexpected.is_empty() && missing.is_empty() {
        Ok(())
    } else {
        Err(PropertyNameMismatch {
            class: instance.class_name().to_string(),
            unexpected,
            missing,
        })
    }
}

/// Fail the test unless the instance's set properties are exactly `expected`.
#[track_caller]
pub fn verify_instance_property_names<S: AsRef<str>>(instance: &TestableInstance, expected: &[S]) {
    if let Err(mismatch) = check_instance_property_names(instance, expected) {
        if let Some(name) = mismatch.unexpected.first() {
            fail(format_args!("Property mismatch: {} ({})", name, mismatch));
        }
        if let Some(name) = mismatch.missing.first() {
            fail(format_args!("Missing property: {} ({})", name, mismatch));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mi_sdk::{ClassDecl, Instance, MiType};

    fn disk() -> TestableInstance {
        let class = ClassDecl::builder("SCX_DiskDrive")
            .key("DeviceID", MiType::String)
            .property("Size", MiType::Uint64)
            .property("Removable", MiType::Boolean)
            .build()
            .unwrap();
        let inst = Instance::new(class)
            .with("DeviceID", "sda")
            .and_then(|i| i.with("Size", 1u64 << 30))
            .unwrap();
        TestableInstance::new(&inst)
    }

    #[test]
    fn test_exact_set_passes() {
        let inst = disk();
        assert_eq!(check_instance_property_names(&inst, &["Size", "DeviceID"]), Ok(()));
        verify_instance_property_names(&inst, &["DeviceID", "Size"]);
    }

    #[test]
    fn test_declared_but_unset_counts_as_missing() {
        let err = check_instance_property_names(&disk(), &["DeviceID", "Size", "Removable"])
            .unwrap_err();
        assert!(err.unexpected.is_empty());
        assert_eq!(err.missing, vec!["Removable"]);
    }

    #[test]
    fn test_extra_actual_property_reported() {
        let err = check_instance_property_names(&disk(), &["DeviceID"]).unwrap_err();
        assert_eq!(err.unexpected, vec!["Size"]);
        assert!(err.missing.is_empty());
    }

    #[test]
    #[should_panic(expected = "Property mismatch: Size")]
    fn test_verify_fails_on_extra() {
        verify_instance_property_names(&disk(), &["DeviceID"]);
    }

    #[test]
    #[should_panic(expected = "Missing property: Caption")]
    fn test_verify_fails_on_omission() {
        verify_instance_property_names(&disk(), &["DeviceID", "Size", "Caption"]);
    }
}
