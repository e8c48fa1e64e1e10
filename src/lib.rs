//! # stagegraph
//!
//! Resource-dependency scheduler for engine systems and render passes.
//!
//! Work units declare the shared resources they read and write; the
//! scheduler derives hazard edges (read-after-write, write-after-write,
//! write-after-read), compiles them into barrier-separated stages via a
//! staged topological sort, and executes the compiled plan in order.
//! Units within one stage are mutually conflict-free and may be
//! dispatched concurrently by the caller; this crate itself never spawns
//! threads.
//!
//! ## Core Types
//!
//! - [`ResourceKey`] — Stable, comparable identity for a resource class
//! - [`DependencyBuilder`] — Per-unit read/write declaration collector
//! - [`DependencyGraph`] — Generic hazard-edge DAG builder with staged bake
//! - [`System`] — Work unit contract: `init` / `update` / `shutdown`
//! - [`Scheduler`] — Lifecycle orchestrator: `register → bake → execute → shutdown`
//! - [`SchedError`] — Contract-violation and cycle diagnostics
//!
//! ## Example
//!
//! ```ignore
//! let mut scheduler = Scheduler::new();
//! scheduler.register(Physics)?;      // writes Position
//! scheduler.register(Renderer)?;     // reads Position
//! scheduler.bake()?;                 // stages: [[Physics], [Renderer]]
//! loop {
//!     scheduler.execute(dt)?;
//! }
//! ```
//!
//! See `DESIGN.md` for architecture decisions.

mod dependency;
mod error;
mod graph;
mod resource_key;
mod scheduler;
mod system;

pub use dependency::DependencyBuilder;
pub use error::{SchedError, SchedResult};
pub use graph::{DependencyGraph, NodeHandle};
pub use resource_key::ResourceKey;
pub use scheduler::Scheduler;
pub use system::System;
