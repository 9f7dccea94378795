//! JSON instance fixtures
//!
//! A fixture declares classes and the instances a fake provider should
//! post, so tests (and `mitest inspect`) can drive the harness without
//! hand-building descriptors:
//!
//! ```json
//! {
//!   "classes": [
//!     { "name": "SCX_Agent",
//!       "properties": [
//!         { "name": "Name", "type": "string", "key": true },
//!         { "name": "Id", "type": "uint32" } ] }
//!   ],
//!   "instances": [
//!     { "class": "SCX_Agent", "values": { "Name": "scx", "Id": 5 } }
//!   ]
//! }
//! ```
//!
//! JSON `null` leaves a property unset. Numbers must fit the declared
//! width exactly; nothing is rounded or truncated.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use mi_sdk::{Char16, ClassDecl, Datetime, DeclFlags, Instance, MiType, MiValue, SdkError};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while loading a fixture
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Failed to read fixture file
    #[error("Failed to read fixture file: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed JSON
    #[error("Failed to parse fixture: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Instance or embedded value names an undeclared class
    #[error("Unknown class: {0}")]
    UnknownClass(String),

    /// JSON value cannot be stored in the declared property type
    #[error("Bad value for {class}.{property} ({ty}): {reason}")]
    BadValue {
        /// Class name
        class: String,
        /// Property name
        property: String,
        /// Declared type
        ty: MiType,
        /// What is wrong with it
        reason: String,
    },

    /// Descriptor or instance rejected by the SDK
    #[error(transparent)]
    Sdk(#[from] SdkError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureFile {
    #[serde(default)]
    classes: Vec<ClassSpec>,
    #[serde(default)]
    instances: Vec<InstanceSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClassSpec {
    name: String,
    #[serde(default)]
    properties: Vec<PropertySpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PropertySpec {
    name: String,
    #[serde(rename = "type")]
    ty: MiType,
    #[serde(default)]
    key: bool,
    #[serde(default)]
    offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InstanceSpec {
    class: String,
    #[serde(default)]
    values: serde_json::Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DatetimeSpec {
    Timestamp {
        year: u32,
        month: u32,
        day: u32,
        #[serde(default)]
        hour: u32,
        #[serde(default)]
        minute: u32,
        #[serde(default)]
        second: u32,
        #[serde(default)]
        microseconds: u32,
        #[serde(default)]
        utc: i32,
    },
    Interval {
        #[serde(default)]
        days: u32,
        #[serde(default)]
        hours: u32,
        #[serde(default)]
        minutes: u32,
        #[serde(default)]
        seconds: u32,
        #[serde(default)]
        microseconds: u32,
    },
}

impl From<DatetimeSpec> for Datetime {
    fn from(spec: DatetimeSpec) -> Self {
        match spec {
            DatetimeSpec::Timestamp {
                year,
                month,
                day,
                hour,
                minute,
                second,
                microseconds,
                utc,
            } => Datetime::Timestamp {
                year,
                month,
                day,
                hour,
                minute,
                second,
                microseconds,
                utc,
            },
            DatetimeSpec::Interval {
                days,
                hours,
                minutes,
                seconds,
                microseconds,
            } => Datetime::Interval {
                days,
                hours,
                minutes,
                seconds,
                microseconds,
            },
        }
    }
}

/// Loaded fixture: class descriptors plus the instances built from them.
#[derive(Debug, Clone)]
pub struct Fixture {
    classes: Vec<Arc<ClassDecl>>,
    instances: Vec<Instance>,
}

impl Fixture {
    /// Load from file
    pub fn from_file(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, FixtureError> {
        let file: FixtureFile = serde_json::from_str(content)?;

        let mut classes = Vec::with_capacity(file.classes.len());
        for spec in &file.classes {
            classes.push(build_class(spec)?);
        }
        let by_name: HashMap<&str, &Arc<ClassDecl>> =
            classes.iter().map(|c| (c.name(), c)).collect();

        let mut instances = Vec::with_capacity(file.instances.len());
        for spec in &file.instances {
            instances.push(build_instance(&by_name, &spec.class, &spec.values)?);
        }
        log::debug!(
            "fixture loaded: {} classes, {} instances",
            classes.len(),
            instances.len()
        );
        Ok(Self { classes, instances })
    }

    /// Declared classes, in file order
    pub fn classes(&self) -> &[Arc<ClassDecl>] {
        &self.classes
    }

    /// Class by name
    pub fn class(&self, name: &str) -> Option<&Arc<ClassDecl>> {
        self.classes.iter().find(|c| c.name() == name)
    }

    /// Instances, in file order
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }
}

fn build_class(spec: &ClassSpec) -> Result<Arc<ClassDecl>, FixtureError> {
    let mut builder = ClassDecl::builder(&spec.name);
    for prop in &spec.properties {
        let flags = if prop.key { DeclFlags::KEY } else { DeclFlags::NONE };
        builder = match prop.offset {
            Some(offset) => builder.with_offset(&prop.name, prop.ty, flags, offset),
            None => builder.property_with_flags(&prop.name, prop.ty, flags),
        };
    }
    Ok(builder.build()?)
}

fn build_instance(
    classes: &HashMap<&str, &Arc<ClassDecl>>,
    class_name: &str,
    values: &serde_json::Map<String, Value>,
) -> Result<Instance, FixtureError> {
    let class = classes
        .get(class_name)
        .ok_or_else(|| FixtureError::UnknownClass(class_name.to_string()))?;
    let mut instance = Instance::new(Arc::clone(class));
    for (name, json) in values {
        if json.is_null() {
            continue;
        }
        let pd = class.property(name).ok_or_else(|| SdkError::NoSuchProperty {
            class: class_name.to_string(),
            name: name.clone(),
        })?;
        let value = convert(classes, json, pd.ty).map_err(|reason| FixtureError::BadValue {
            class: class_name.to_string(),
            property: name.clone(),
            ty: pd.ty,
            reason,
        })?;
        instance.set(name, value)?;
    }
    Ok(instance)
}

fn int<T: TryFrom<i64> + TryFrom<u64>>(json: &Value) -> Result<T, String> {
    let converted = if let Some(u) = json.as_u64() {
        <T as TryFrom<u64>>::try_from(u).ok()
    } else if let Some(i) = json.as_i64() {
        <T as TryFrom<i64>>::try_from(i).ok()
    } else {
        return Err(format!("expected an integer, got {}", json));
    };
    converted.ok_or_else(|| format!("{} is out of range", json))
}

fn convert(
    classes: &HashMap<&str, &Arc<ClassDecl>>,
    json: &Value,
    ty: MiType,
) -> Result<MiValue, String> {
    let value = match ty {
        MiType::Boolean => MiValue::Boolean(
            json.as_bool()
                .ok_or_else(|| format!("expected a boolean, got {}", json))?,
        ),
        MiType::Uint8 => MiValue::Uint8(int(json)?),
        MiType::Sint8 => MiValue::Sint8(int(json)?),
        MiType::Uint16 => MiValue::Uint16(int(json)?),
        MiType::Sint16 => MiValue::Sint16(int(json)?),
        MiType::Uint32 => MiValue::Uint32(int(json)?),
        MiType::Sint32 => MiValue::Sint32(int(json)?),
        MiType::Uint64 => MiValue::Uint64(int(json)?),
        MiType::Sint64 => MiValue::Sint64(int(json)?),
        MiType::Real32 => MiValue::Real32(
            json.as_f64()
                .ok_or_else(|| format!("expected a number, got {}", json))? as f32,
        ),
        MiType::Real64 => MiValue::Real64(
            json.as_f64()
                .ok_or_else(|| format!("expected a number, got {}", json))?,
        ),
        MiType::Char16 => MiValue::Char16(char16(json)?.0),
        MiType::Datetime => {
            let spec: DatetimeSpec =
                serde_json::from_value(json.clone()).map_err(|e| e.to_string())?;
            MiValue::Datetime(spec.into())
        }
        MiType::String => MiValue::String(
            json.as_str()
                .ok_or_else(|| format!("expected a string, got {}", json))?
                .to_string(),
        ),
        MiType::Reference => MiValue::Reference(Some(Box::new(embedded(classes, json)?))),
        MiType::Instance => MiValue::Instance(Some(Box::new(embedded(classes, json)?))),
    };
    Ok(value)
}

fn char16(json: &Value) -> Result<Char16, String> {
    if let Some(s) = json.as_str() {
        let mut units = s.encode_utf16();
        return match (units.next(), units.next()) {
            (Some(unit), None) => Ok(Char16(unit)),
            _ => Err(format!("expected a single UTF-16 unit, got {}", json)),
        };
    }
    int::<u16>(json).map(Char16)
}

fn embedded(classes: &HashMap<&str, &Arc<ClassDecl>>, json: &Value) -> Result<Instance, String> {
    let spec: InstanceSpec = serde_json::from_value(json.clone()).map_err(|e| e.to_string())?;
    build_instance(classes, &spec.class, &spec.values).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGENT: &str = r#"{
        "classes": [
            { "name": "SCX_Agent",
              "properties": [
                { "name": "Name", "type": "string", "key": true },
                { "name": "Id", "type": "uint32" },
                { "name": "Grade", "type": "char16" },
                { "name": "Uptime", "type": "datetime" },
                { "name": "Note", "type": "string" } ] }
        ],
        "instances": [
            { "class": "SCX_Agent",
              "values": { "Name": "scx", "Id": 5, "Grade": "A",
                          "Uptime": { "interval": { "days": 2 } }, "Note": null } }
        ]
    }"#;

    #[test]
    fn test_load_classes_and_instances() {
        let fixture = Fixture::from_str(AGENT).unwrap();
        assert_eq!(fixture.classes().len(), 1);
        let class = fixture.class("SCX_Agent").unwrap();
        assert!(class.property("Name").unwrap().is_key());

        let inst = &fixture.instances()[0];
        let field = |name: &str| inst.field(class.property(name).unwrap().offset).unwrap();
        assert_eq!(field("Name").value, MiValue::String("scx".into()));
        assert_eq!(field("Id").value, MiValue::Uint32(5));
        assert_eq!(field("Grade").value, MiValue::Char16('A' as u16));
        assert!(matches!(
            field("Uptime").value,
            MiValue::Datetime(Datetime::Interval { days: 2, .. })
        ));
        assert!(!field("Note").exists);
    }

    #[test]
    fn test_out_of_range_integer_rejected() {
        let json = r#"{
            "classes": [ { "name": "C", "properties": [ { "name": "B", "type": "uint8" } ] } ],
            "instances": [ { "class": "C", "values": { "B": 256 } } ]
        }"#;
        match Fixture::from_str(json) {
            Err(FixtureError::BadValue { property, ty, .. }) => {
                assert_eq!(property, "B");
                assert_eq!(ty, MiType::Uint8);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_negative_into_unsigned_rejected() {
        let json = r#"{
            "classes": [ { "name": "C", "properties": [ { "name": "N", "type": "uint32" } ] } ],
            "instances": [ { "class": "C", "values": { "N": -1 } } ]
        }"#;
        assert!(matches!(
            Fixture::from_str(json),
            Err(FixtureError::BadValue { .. })
        ));
    }

    #[test]
    fn test_unknown_class_and_property() {
        let json = r#"{ "instances": [ { "class": "Nope" } ] }"#;
        assert!(matches!(
            Fixture::from_str(json),
            Err(FixtureError::UnknownClass(name)) if name == "Nope"
        ));

        let json = r#"{
            "classes": [ { "name": "C" } ],
            "instances": [ { "class": "C", "values": { "X": 1 } } ]
        }"#;
        assert!(matches!(
            Fixture::from_str(json),
            Err(FixtureError::Sdk(SdkError::NoSuchProperty { .. }))
        ));
    }

    #[test]
    fn test_embedded_instance() {
        let json = r#"{
            "classes": [
                { "name": "Inner", "properties": [ { "name": "V", "type": "sint16" } ] },
                { "name": "Outer", "properties": [ { "name": "Child", "type": "instance" } ] }
            ],
            "instances": [
                { "class": "Outer", "values": { "Child": { "class": "Inner", "values": { "V": -3 } } } }
            ]
        }"#;
        let fixture = Fixture::from_str(json).unwrap();
        match &fixture.instances()[0].field(0).unwrap().value {
            MiValue::Instance(Some(child)) => {
                assert_eq!(child.class().name(), "Inner");
                assert_eq!(child.field(0).unwrap().value, MiValue::Sint16(-3));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_explicit_offsets() {
        let json = r#"{
            "classes": [ { "name": "C", "properties": [
                { "name": "A", "type": "boolean", "offset": 1 },
                { "name": "B", "type": "boolean", "offset": 0 } ] } ]
        }"#;
        let fixture = Fixture::from_str(json).unwrap();
        let class = fixture.class("C").unwrap();
        assert_eq!(class.property("A").unwrap().offset, 1);
        assert_eq!(class.property("B").unwrap().offset, 0);
    }

    #[test]
    fn test_huge_offset_rejected() {
        for offset in ["18446744073709551615", "4000000000"] {
            let json = format!(
                r#"{{ "classes": [ {{ "name": "C", "properties": [
                    {{ "name": "A", "type": "boolean", "offset": {} }} ] }} ] }}"#,
                offset
            );
            assert!(matches!(
                Fixture::from_str(&json),
                Err(FixtureError::Sdk(SdkError::InvalidClass { .. }))
            ));
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Fixture::from_str("{"),
            Err(FixtureError::JsonError(_))
        ));
    }
}
