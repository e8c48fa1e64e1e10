use crate::dependency::DependencyBuilder;

/// A schedulable work unit: an engine system or a render pass.
///
/// The scheduler drives each unit through a fixed lifecycle:
///
/// 1. [`init`](System::init) — once, at registration.
/// 2. [`declare_dependencies`](System::declare_dependencies) — once, at
///    registration, on a fresh [`DependencyBuilder`].
/// 3. [`update`](System::update) — once per
///    [`Scheduler::execute`](crate::Scheduler::execute) call, in
///    compiled stage order.
/// 4. [`shutdown`](System::shutdown) — once, at teardown, in reverse
///    traversal order.
///
/// The declared read/write sets are a contract: a unit that touches
/// resources it never declared silently invalidates the plan's safety
/// guarantee. The scheduler cannot detect this.
///
/// # Example
///
/// ```ignore
/// struct Movement;
///
/// impl System for Movement {
///     fn declare_dependencies(&self, deps: &mut DependencyBuilder) {
///         deps.reads::<Velocity>();
///         deps.writes::<Position>();
///     }
///
///     fn update(&mut self, delta_time: f32) {
///         // integrate positions
///     }
/// }
/// ```
pub trait System: Send + 'static {
    /// Declares the resource classes this unit reads and writes.
    ///
    /// Called exactly once, at registration.
    fn declare_dependencies(&self, deps: &mut DependencyBuilder);

    /// One-time setup hook, invoked at registration.
    fn init(&mut self) {}

    /// Per-frame work. Invoked once per stage-visit during execution.
    fn update(&mut self, delta_time: f32);

    /// One-time teardown hook, invoked during scheduler shutdown.
    fn shutdown(&mut self) {}
}
