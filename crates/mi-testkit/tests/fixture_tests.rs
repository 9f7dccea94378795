//! Integration tests for JSON fixtures and harness config files

use std::io::Write;

use mi_sdk::MiResult;
use mi_testkit::{
    verify_instance_property_names, ConfigError, Fixture, FixtureError, HarnessConfig,
    TestableContext,
};
use tempfile::NamedTempFile;

const PROCESSES: &str = r#"{
    "classes": [
        { "name": "SCX_UnixProcess",
          "properties": [
            { "name": "CSCreationClassName", "type": "string", "key": true },
            { "name": "Handle", "type": "string", "key": true },
            { "name": "Priority", "type": "uint32" },
            { "name": "ParentProcessID", "type": "uint64" },
            { "name": "Nice", "type": "sint32" } ] }
    ],
    "instances": [
        { "class": "SCX_UnixProcess",
          "values": { "CSCreationClassName": "SCX_ComputerSystem", "Handle": "1",
                      "Priority": 20, "ParentProcessID": 0, "Nice": -5 } },
        { "class": "SCX_UnixProcess",
          "values": { "CSCreationClassName": "SCX_ComputerSystem", "Handle": "42",
                      "Priority": 20, "Nice": null } }
    ]
}"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_fixture_instances_through_context() {
    let file = write_temp(PROCESSES);
    let fixture = Fixture::from_file(file.path()).unwrap();

    let ctx = TestableContext::new();
    for inst in fixture.instances() {
        ctx.context().post_instance(inst);
    }
    ctx.context().post_result(MiResult::Ok);

    assert_eq!(ctx.instance_count(), 2);
    let init = ctx.instance(0);
    assert_eq!(init.number_of_keys(), 2);
    assert_eq!(init.key_name(1), "Handle");
    assert_eq!(init.key_value(1), "1");
    assert_eq!(init.find_property("Nice").unwrap().value_sint32(), -5);
    verify_instance_property_names(
        &init,
        &["CSCreationClassName", "Handle", "Priority", "ParentProcessID", "Nice"],
    );

    let second = ctx.instance(1);
    assert_eq!(second.key("Handle"), "42");
    assert_eq!(second.number_of_properties(), 3);
}

#[test]
fn test_fixture_missing_file() {
    let err = Fixture::from_file(std::path::Path::new("/nonexistent/fixture.json")).unwrap_err();
    assert!(matches!(err, FixtureError::IoError(_)));
}

#[test]
fn test_fixture_wrong_type() {
    let json = PROCESSES.replace("\"Priority\": 20, \"Nice\": null", "\"Priority\": \"high\"");
    let err = Fixture::from_str(&json).unwrap_err();
    assert!(err.to_string().contains("SCX_UnixProcess.Priority"));
}

#[test]
fn test_config_file() {
    let file = write_temp(
        r#"
[probe]
resolver_command = "getent hosts {host} | awk '{print $2}'"
resolver_timeout_ms = 2000
"#,
    );
    let config = HarnessConfig::from_file(file.path()).unwrap();
    assert_eq!(config.probe.resolver_timeout_ms, 2000);
    assert_eq!(
        config.probe.resolver_command_for("db01"),
        "getent hosts db01 | awk '{print $2}'"
    );
}

#[test]
fn test_config_parse_error() {
    let file = write_temp("[probe\n");
    assert!(matches!(
        HarnessConfig::from_file(file.path()),
        Err(ConfigError::ParseError(_))
    ));
}
