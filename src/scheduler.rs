use crate::dependency::DependencyBuilder;
use crate::error::{SchedError, SchedResult};
use crate::graph::{DependencyGraph, NodeHandle};
use crate::system::System;

/// Lifecycle state of a [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Accepting registrations.
    Open,
    /// Plan compiled; accepting `execute`.
    Baked,
    /// Teardown in progress.
    ShuttingDown,
    /// Torn down; every operation is an error.
    Closed,
}

/// Owns a set of work units and the compiled execution plan over them.
///
/// Lifecycle: `register* → bake → execute* → shutdown`. Units are stored
/// in an arena inside the dependency graph, indexed by [`NodeHandle`];
/// the hot `execute` path walks stage lists of arena indices.
///
/// The scheduler is single-threaded and synchronous. Stage boundaries are
/// full barriers; nodes within one stage have no mutual ordering
/// requirement and a caller with its own thread pool may dispatch them
/// concurrently — this type itself runs them in listed order.
///
/// # Example
///
/// ```ignore
/// let mut scheduler = Scheduler::new();
/// scheduler.register(Movement)?;
/// scheduler.register(Render)?;
/// scheduler.bake()?;
/// scheduler.execute(dt)?;
/// scheduler.shutdown()?;
/// ```
pub struct Scheduler {
    graph: DependencyGraph<Box<dyn System>>,
    /// Compiled plan; empty until `bake()` succeeds.
    stages: Vec<Vec<NodeHandle>>,
    state: State,
}

impl Scheduler {
    /// Creates an empty scheduler in the Open state.
    pub fn new() -> Self {
        Self {
            graph: DependencyGraph::new(),
            stages: Vec::new(),
            state: State::Open,
        }
    }

    /// Registers a work unit.
    ///
    /// Invokes the unit's [`init`](System::init) hook, collects its
    /// declared dependencies through a fresh [`DependencyBuilder`], and
    /// inserts it into the hazard graph.
    ///
    /// Fails with [`SchedError::RegisterAfterBake`] once
    /// [`bake`](Scheduler::bake) has succeeded, and with
    /// [`SchedError::UseAfterShutdown`] after
    /// [`shutdown`](Scheduler::shutdown).
    pub fn register<S: System>(&mut self, mut system: S) -> SchedResult<NodeHandle> {
        match self.state {
            State::Open => {}
            State::Closed | State::ShuttingDown => return Err(SchedError::UseAfterShutdown),
            State::Baked => return Err(SchedError::RegisterAfterBake),
        }

        system.init();

        let mut deps = DependencyBuilder::new();
        system.declare_dependencies(&mut deps);

        let name = std::any::type_name::<S>();
        let handle = self.graph.add_node(Box::new(system), name, &deps)?;
        log::trace!(
            "registered {} as node {} ({} reads, {} writes)",
            name,
            handle.index(),
            deps.read_set().len(),
            deps.write_set().len()
        );
        Ok(handle)
    }

    /// Compiles the registered units into an execution plan.
    ///
    /// On success the scheduler transitions to Baked and rejects further
    /// registration. On [`SchedError::CycleDetected`] it stays Open, so
    /// the caller may correct registrations and retry. A second call
    /// while Baked fails with [`SchedError::AlreadyBaked`].
    pub fn bake(&mut self) -> SchedResult<()> {
        match self.state {
            State::Open => {}
            State::Closed | State::ShuttingDown => return Err(SchedError::UseAfterShutdown),
            State::Baked => return Err(SchedError::AlreadyBaked),
        }

        self.stages = self.graph.bake()?;
        self.state = State::Baked;
        log::debug!(
            "scheduler baked: {} units in {} stages",
            self.graph.node_count(),
            self.stages.len()
        );
        Ok(())
    }

    /// Runs one tick of the compiled plan.
    ///
    /// Stages run strictly in compiled order; within a stage, units run
    /// in listed (ascending handle) order. The traversal is identical on
    /// every call.
    ///
    /// Fails with [`SchedError::ExecuteBeforeBake`] while still Open and
    /// [`SchedError::UseAfterShutdown`] after shutdown.
    pub fn execute(&mut self, delta_time: f32) -> SchedResult<()> {
        match self.state {
            State::Baked => {}
            State::Closed | State::ShuttingDown => return Err(SchedError::UseAfterShutdown),
            State::Open => return Err(SchedError::ExecuteBeforeBake),
        }

        for stage in &self.stages {
            for &handle in stage {
                self.graph.payload_mut(handle).update(delta_time);
            }
        }
        Ok(())
    }

    /// Tears the scheduler down.
    ///
    /// Invokes each unit's [`shutdown`](System::shutdown) hook once, in
    /// the reverse of the traversal `execute` uses (dependents before
    /// their dependencies). If `bake` never ran, units are torn down in
    /// reverse registration order. Afterwards the graph and unit storage
    /// are cleared and every further operation fails with
    /// [`SchedError::UseAfterShutdown`].
    pub fn shutdown(&mut self) -> SchedResult<()> {
        match self.state {
            State::Open | State::Baked => {}
            State::Closed | State::ShuttingDown => return Err(SchedError::UseAfterShutdown),
        }
        self.state = State::ShuttingDown;

        // Without a compiled plan there is no stage traversal to
        // reverse; fall back to reverse registration order.
        let order: Vec<NodeHandle> = if self.stages.is_empty() {
            (0..self.graph.node_count())
                .rev()
                .map(NodeHandle::from_index)
                .collect()
        } else {
            self.stages
                .iter()
                .rev()
                .flat_map(|stage| stage.iter().rev().copied())
                .collect()
        };

        for handle in order {
            log::trace!("shutting down {}", self.graph.name(handle));
            self.graph.payload_mut(handle).shutdown();
        }

        self.graph.clear();
        self.stages.clear();
        self.state = State::Closed;
        log::debug!("scheduler shut down");
        Ok(())
    }

    /// Returns the number of registered units.
    pub fn system_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of compiled stages. Zero until `bake` succeeds.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Returns the unit type names in execution order, grouped by stage.
    ///
    /// Useful for debugging and visualization.
    pub fn execution_stages(&self) -> Vec<Vec<&'static str>> {
        self.stages
            .iter()
            .map(|stage| stage.iter().map(|&h| self.graph.name(h)).collect())
            .collect()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
