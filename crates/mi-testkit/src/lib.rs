//! MI Testkit - unit-test harness for management-instrumentation providers
//!
//! Provider code posts results and instances into a `Context`. In a test,
//! that context comes from a [`TestableContext`], which records everything
//! posted so the test can inspect it afterwards:
//!
//! ```ignore
//! use mi_sdk::MiResult;
//! use mi_testkit::{verify_instance_property_names, TestableContext};
//!
//! let ctx = TestableContext::new();
//! my_provider::enumerate(ctx.context());
//!
//! assert_eq!(ctx.result(), MiResult::Ok);
//! let agent = ctx.instance(0);
//! assert_eq!(agent.key("Name"), "scx");
//! verify_instance_property_names(&agent, &["Name", "Version"]);
//! ```
//!
//! # Modules
//!
//! - [`reflect`]: name and ordinal lookups over any instance
//! - [`instance`]: immutable snapshots with key and `MIReturn` accessors
//! - [`context`]: the recording context and its handle registry
//! - [`verify`]: exact property-set checks
//! - [`probe`]: host name, FQDN, privilege gate, distribution label
//! - [`fixture`]: classes and instances described in JSON
//! - [`config`]: `mitest.toml`
//!
//! Checks that a test cannot recover from go through [`assert::fail`],
//! which panics with the caller's location.

#![warn(missing_docs)]

pub mod assert;
pub mod config;
pub mod context;
pub mod fixture;
pub mod instance;
pub mod probe;
pub mod reflect;
pub mod registry;
pub mod verify;

pub use assert::{assert_equal, assert_that, fail};
pub use config::{ConfigError, HarnessConfig, ProbeConfig};
pub use context::{ResultRecord, TestableContext, INITIAL_RESULT};
pub use fixture::{Fixture, FixtureError};
pub use instance::{TestableInstance, MI_RETURN};
pub use probe::{
    distribution_name, get_fq_host_name, meets_prerequisites, ProbeError, ProcessOutput,
    ProcessRunner, ShellRunner,
};
pub use reflect::{LookupError, PropertyInfo, StringFieldMut};
pub use registry::HandleRegistry;
pub use verify::{
    check_instance_property_names, verify_instance_property_names, PropertyNameMismatch,
};
