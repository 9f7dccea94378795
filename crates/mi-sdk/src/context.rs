//! Callback sink a provider posts into
//!
//! A host hands code under test a `RawContext`: a function table plus an
//! opaque handle the host uses to find its own state again. Providers never
//! touch the table directly; they go through the `Context` wrapper, which
//! also carries the property set the client asked for, if any.

use crate::instance::Instance;
use crate::property_set::PropertySet;
use crate::result::MiResult;

/// Opaque identity of a context, chosen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextHandle(u64);

impl ContextHandle {
    /// Handle from a raw host token
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw host token
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ContextHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ctx#{}", self.0)
    }
}

/// Posts the final result of an operation
pub type PostResultFn = fn(ctx: &RawContext, result: MiResult) -> MiResult;

/// Posts one output instance
pub type PostInstanceFn = fn(ctx: &RawContext, instance: &Instance) -> MiResult;

/// Asks the host not to unload the provider
pub type RefuseUnloadFn = fn(ctx: &RawContext) -> MiResult;

/// Host callback table. Empty slots answer `NotSupported`.
#[derive(Debug, Clone, Copy)]
pub struct ContextFT {
    /// Result posting
    pub post_result: Option<PostResultFn>,
    /// Instance posting
    pub post_instance: Option<PostInstanceFn>,
    /// Unload refusal
    pub refuse_unload: Option<RefuseUnloadFn>,
}

impl ContextFT {
    /// Table with every slot empty
    pub const EMPTY: ContextFT = ContextFT {
        post_result: None,
        post_instance: None,
        refuse_unload: None,
    };
}

impl Default for ContextFT {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Function table plus host handle.
#[derive(Debug, Clone)]
pub struct RawContext {
    ft: &'static ContextFT,
    handle: ContextHandle,
}

impl RawContext {
    /// Bind a table to a handle
    pub const fn new(ft: &'static ContextFT, handle: ContextHandle) -> Self {
        Self { ft, handle }
    }

    /// Host handle
    pub fn handle(&self) -> ContextHandle {
        self.handle
    }

    /// Callback table
    pub fn ft(&self) -> &'static ContextFT {
        self.ft
    }
}

/// Provider-side view of a context.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    raw: &'a RawContext,
    property_set: Option<&'a PropertySet>,
}

impl<'a> Context<'a> {
    /// Wrap a raw context
    pub fn new(raw: &'a RawContext) -> Self {
        Self {
            raw,
            property_set: None,
        }
    }

    /// Wrap a raw context for a request limited to `property_set`
    pub fn with_property_set(raw: &'a RawContext, property_set: &'a PropertySet) -> Self {
        Self {
            raw,
            property_set: Some(property_set),
        }
    }

    /// Properties the client asked for, if the request named any
    pub fn property_set(&self) -> Option<&'a PropertySet> {
        self.property_set
    }

    /// Whether the provider should fill in `name`.
    ///
    /// True when no property set was given or the set is empty.
    pub fn wants_property(&self, name: &str) -> bool {
        match self.property_set {
            Some(set) if !set.is_empty() => set.contains(name),
            _ => true,
        }
    }

    /// Post the final result of the operation
    pub fn post_result(&self, result: MiResult) -> MiResult {
        match self.raw.ft.post_result {
            Some(f) => f(self.raw, result),
            None => MiResult::NotSupported,
        }
    }

    /// Post an output instance
    pub fn post_instance(&self, instance: &Instance) -> MiResult {
        match self.raw.ft.post_instance {
            Some(f) => f(self.raw, instance),
            None => MiResult::NotSupported,
        }
    }

    /// Ask the host to keep the provider loaded
    pub fn refuse_unload(&self) -> MiResult {
        match self.raw.ft.refuse_unload {
            Some(f) => f(self.raw),
            None => MiResult::NotSupported,
        }
    }

    /// Post a failure result; `Ok` is reported as `Failed`
    pub fn post_error(&self, result: MiResult) -> MiResult {
        let result = if result.is_ok() { MiResult::Failed } else { result };
        self.post_result(result)
    }

    /// Underlying raw context
    pub fn raw(&self) -> &'a RawContext {
        self.raw
    }
}
