use thiserror::Error;

/// Errors raised by the scheduler and the dependency graph.
///
/// All variants are programmer-contract violations, not transient
/// conditions: they are surfaced to the caller immediately and never
/// retried internally.
#[derive(Error, Debug)]
pub enum SchedError {
    /// The hazard graph is not acyclic. `involved` lists the names of the
    /// nodes that could not be placed into any stage.
    #[error("dependency cycle detected among: [{}]", involved.join(", "))]
    CycleDetected {
        /// Names of the nodes left unplaced by the topological sort.
        involved: Vec<String>,
    },

    /// `register` (or `add_node`) was called after the plan was compiled.
    #[error("cannot register new work units after bake()")]
    RegisterAfterBake,

    /// `bake` was called while already baked. A new plan requires a fresh
    /// graph; see [`DependencyGraph::clear`](crate::DependencyGraph::clear).
    #[error("bake() was already called; the compiled plan is immutable")]
    AlreadyBaked,

    /// `execute` was called before the plan was compiled.
    #[error("execute() called before bake()")]
    ExecuteBeforeBake,

    /// Any operation was called after `shutdown` completed.
    #[error("scheduler was shut down; no further operations are allowed")]
    UseAfterShutdown,
}

/// Convenience alias for scheduler results.
pub type SchedResult<T> = Result<T, SchedError>;
