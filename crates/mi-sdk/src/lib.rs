//! MI SDK - provider-facing data model
//!
//! This crate provides the types a management-instrumentation provider
//! works with: typed property values, class descriptors, instances, result
//! codes and the context a provider posts its output into. It carries no
//! host logic; hosts (and test doubles) supply the context callbacks.
//!
//! # Example
//!
//! ```ignore
//! use mi_sdk::{ClassDecl, Context, Instance, MiResult, MiType};
//!
//! fn enumerate(ctx: Context<'_>) -> MiResult {
//!     let class = ClassDecl::builder("SCX_Agent")
//!         .key("Name", MiType::String)
//!         .property("Id", MiType::Uint32)
//!         .build()
//!         .unwrap();
//!     let inst = Instance::new(class).with("Name", "scx").unwrap();
//!     ctx.post_instance(&inst);
//!     ctx.post_result(MiResult::Ok)
//! }
//! ```

#![warn(missing_docs)]

pub mod class;
pub mod context;
pub mod convert;
pub mod error;
pub mod instance;
pub mod property_set;
pub mod result;
pub mod types;
pub mod value;

pub use class::{ClassDecl, ClassDeclBuilder, DeclFlags, PropertyDecl};
pub use context::{Context, ContextFT, ContextHandle, RawContext};
pub use convert::{Char16, FromMiValue, IntoMiValue};
pub use error::{SdkError, SdkResult};
pub use instance::{Field, Instance};
pub use property_set::PropertySet;
pub use result::MiResult;
pub use types::MiType;
pub use value::{Datetime, MiValue};
