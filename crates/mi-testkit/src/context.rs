//! Recording stand-in for the provider host
//!
//! Code under test receives `Context`s built from a `TestableContext` and
//! posts into them as it would into a live host. The callbacks installed in
//! the function table find the owning context through the process-wide
//! handle registry and record:
//!
//! - the last posted result (initially `ServerIsShuttingDown`)
//! - every posted instance, in order, as a `TestableInstance`
//! - whether the provider refused unload
//!
//! A `TestableContext` deregisters its handle when dropped; a callback that
//! arrives on a stale handle fails the test.

use std::fmt;
use std::sync::{Arc, LazyLock};

use mi_sdk::{Context, ContextFT, ContextHandle, Instance, MiResult, PropertySet, RawContext};
use parking_lot::Mutex;

use crate::assert::fail;
use crate::instance::TestableInstance;
use crate::registry::HandleRegistry;

/// Result a fresh or reset context reports before anything is posted
pub const INITIAL_RESULT: MiResult = MiResult::ServerIsShuttingDown;

static CONTEXTS: LazyLock<HandleRegistry<Mutex<ResultRecord>>> =
    LazyLock::new(HandleRegistry::new);

static TESTABLE_FT: ContextFT = ContextFT {
    post_result: Some(post_result),
    post_instance: Some(post_instance),
    refuse_unload: Some(refuse_unload),
};

/// Everything a provider posted.
#[derive(Debug, Clone)]
pub struct ResultRecord {
    result: MiResult,
    instances: Vec<TestableInstance>,
    unload_refused: bool,
}

impl ResultRecord {
    fn new() -> Self {
        Self {
            result: INITIAL_RESULT,
            instances: Vec::new(),
            unload_refused: false,
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

#[track_caller]
fn owner_of(ctx: &RawContext) -> Arc<Mutex<ResultRecord>> {
    match CONTEXTS.lookup(ctx.handle()) {
        Some(owner) => owner,
        None => fail(format_args!("Unable to find TestableContext! ({})", ctx.handle())),
    }
}

fn post_result(ctx: &RawContext, result: MiResult) -> MiResult {
    let owner = owner_of(ctx);
    log::debug!("{}: post result {}", ctx.handle(), result);
    owner.lock().result = result;
    MiResult::Ok
}

fn post_instance(ctx: &RawContext, instance: &Instance) -> MiResult {
    let owner = owner_of(ctx);
    log::debug!("{}: post instance of {}", ctx.handle(), instance.class().name());
    owner.lock().instances.push(TestableInstance::new(instance));
    MiResult::Ok
}

fn refuse_unload(ctx: &RawContext) -> MiResult {
    let owner = owner_of(ctx);
    log::debug!("{}: refuse unload", ctx.handle());
    owner.lock().unload_refused = true;
    MiResult::Ok
}

/// Recording context for provider tests.
pub struct TestableContext {
    raw: RawContext,
    record: Arc<Mutex<ResultRecord>>,
    property_set: PropertySet,
}

impl TestableContext {
    /// Create a context and register it for callback dispatch
    pub fn new() -> Self {
        let record = Arc::new(Mutex::new(ResultRecord::new()));
        let handle = CONTEXTS.register(&record);
        Self {
            raw: RawContext::new(&TESTABLE_FT, handle),
            record,
            property_set: PropertySet::new(),
        }
    }

    /// Handle the callbacks are dispatched on
    pub fn handle(&self) -> ContextHandle {
        self.raw.handle()
    }

    /// Raw context (function table + handle)
    pub fn raw(&self) -> &RawContext {
        &self.raw
    }

    /// Provider-facing context carrying this context's property set;
    /// borrows `self`, so it cannot outlive the next `reset` or the drop of
    /// this context.
    pub fn context(&self) -> Context<'_> {
        Context::with_property_set(&self.raw, &self.property_set)
    }

    /// Last posted result
    pub fn result(&self) -> MiResult {
        self.record.lock().result
    }

    /// Snapshot of the posted instances, in posting order
    pub fn instances(&self) -> Vec<TestableInstance> {
        self.record.lock().instances.clone()
    }

    /// Posted instance at `index`
    #[track_caller]
    pub fn instance(&self, index: usize) -> TestableInstance {
        let len = {
            let record = self.record.lock();
            if let Some(inst) = record.instances.get(index) {
                return inst.clone();
            }
            record.instances.len()
        };
        fail(format_args!(
            "Instance #{} requested but only {} posted",
            index, len
        ))
    }

    /// Number of posted instances
    pub fn instance_count(&self) -> usize {
        self.record.lock().instances.len()
    }

    /// Whether the provider refused unload
    pub fn was_refuse_unload_called(&self) -> bool {
        self.record.lock().unload_refused
    }

    /// Copy of everything recorded so far
    pub fn record(&self) -> ResultRecord {
        self.record.lock().clone()
    }

    /// Forget everything posted so far
    pub fn reset(&mut self) {
        log::debug!("{}: reset", self.raw.handle());
        self.record.lock().reset();
    }

    /// Property set handed to code under test through `context()`; kept
    /// across `reset`
    pub fn property_set(&self) -> &PropertySet {
        &self.property_set
    }

    /// Mutable property set
    pub fn property_set_mut(&mut self) -> &mut PropertySet {
        &mut self.property_set
    }

    /// Dump every posted instance to stdout
    pub fn print(&self) {
        print!("{}", self);
    }
}

impl ResultRecord {
    /// Last posted result
    pub fn result(&self) -> MiResult {
        self.result
    }

    /// Posted instances, in posting order
    pub fn instances(&self) -> &[TestableInstance] {
        &self.instances
    }

    /// Whether unload was refused
    pub fn unload_refused(&self) -> bool {
        self.unload_refused
    }
}

impl Default for TestableContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestableContext {
    fn drop(&mut self) {
        CONTEXTS.deregister(self.raw.handle());
    }
}

impl fmt::Display for TestableContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.record.lock();
        writeln!(f, "{}", "-".repeat(84))?;
        writeln!(f, "TestableContext size: {}", record.instances.len())?;
        for inst in &record.instances {
            write!(f, "{}", inst)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TestableContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestableContext")
            .field("handle", &self.raw.handle())
            .field("record", &*self.record.lock())
            .finish()
    }
}
