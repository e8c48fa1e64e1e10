use std::collections::HashMap;

use fixedbitset::FixedBitSet;

use crate::dependency::DependencyBuilder;
use crate::error::{SchedError, SchedResult};
use crate::resource_key::ResourceKey;

/// Stable handle to a node in a [`DependencyGraph`].
///
/// Handles are assigned monotonically at registration and never reused;
/// they double as indices into the graph's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(usize);

impl NodeHandle {
    /// The underlying arena index.
    pub fn index(&self) -> usize {
        self.0
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// A registered node with its payload and outgoing edges.
struct Node<T> {
    payload: T,
    /// Human-readable name for debug/error messages.
    name: &'static str,
    /// Indices of nodes that must run after this one. Deduplicated.
    successors: Vec<usize>,
}

/// A generic DAG builder keyed by [`ResourceKey`].
///
/// Nodes are added with their declared read/write sets; the graph derives
/// hazard edges (read-after-write, write-after-write, write-after-read)
/// from reader/writer indexes maintained across insertions, and
/// [`bake()`](DependencyGraph::bake) compiles the accumulated graph into
/// barrier-separated stages via a staged topological sort.
///
/// Ordering semantics per resource:
/// - writers are ordered among themselves by registration order;
/// - every pure reader runs after every writer, regardless of
///   registration order;
/// - a node that both reads and writes a resource participates as a
///   writer for ordering purposes;
/// - two pure readers are never ordered against each other.
///
/// Mutually crossed read/write declarations between two nodes therefore
/// form a cycle, which `bake` reports as
/// [`SchedError::CycleDetected`].
pub struct DependencyGraph<T> {
    /// Node arena, indexed by handle. Nodes are never removed individually.
    nodes: Vec<Node<T>>,
    /// ResourceKey → handles that declared a read of that resource.
    readers: HashMap<ResourceKey, Vec<usize>>,
    /// ResourceKey → handles that declared a write of that resource.
    writers: HashMap<ResourceKey, Vec<usize>>,
    /// Set once `bake()` succeeds; further registration is rejected.
    baked: bool,
}

impl<T> DependencyGraph<T> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            readers: HashMap::new(),
            writers: HashMap::new(),
            baked: false,
        }
    }

    /// Adds a node with its declared access sets and derives hazard edges
    /// against all previously registered nodes.
    ///
    /// Returns [`SchedError::RegisterAfterBake`] once the graph is baked.
    ///
    /// A node may legally declare both a read and a write of the same
    /// resource; this never produces a self-edge.
    pub fn add_node(
        &mut self,
        payload: T,
        name: &'static str,
        deps: &DependencyBuilder,
    ) -> SchedResult<NodeHandle> {
        if self.baked {
            return Err(SchedError::RegisterAfterBake);
        }

        let n = self.nodes.len();
        self.nodes.push(Node {
            payload,
            name,
            successors: Vec::new(),
        });

        // RAW: this node reads what earlier writers produced.
        for key in deps.read_set() {
            if let Some(writers) = self.writers.get(key) {
                for &w in writers {
                    Self::push_edge(&mut self.nodes, w, n);
                }
            }
        }

        // WAW: writers of one resource keep registration order.
        for key in deps.write_set() {
            if let Some(writers) = self.writers.get(key) {
                for &w in writers {
                    Self::push_edge(&mut self.nodes, w, n);
                }
            }
        }

        // WAR: a writer precedes every pure reader of the resource, even
        // readers registered before it. Readers that also write the
        // resource are already ordered by the WAW rule above.
        for key in deps.write_set() {
            if let Some(readers) = self.readers.get(key) {
                let writers = self.writers.get(key);
                for &r in readers {
                    let also_writes = writers.map(|w| w.contains(&r)).unwrap_or(false);
                    if !also_writes {
                        Self::push_edge(&mut self.nodes, n, r);
                    }
                }
            }
        }

        // Register into the indexes so later insertions order against us.
        for key in deps.read_set() {
            self.readers.entry(*key).or_default().push(n);
        }
        for key in deps.write_set() {
            self.writers.entry(*key).or_default().push(n);
        }

        Ok(NodeHandle(n))
    }

    /// Inserts an edge `from → to`, skipping duplicates and self-edges.
    fn push_edge(nodes: &mut [Node<T>], from: usize, to: usize) {
        if from == to {
            return;
        }
        let successors = &mut nodes[from].successors;
        if !successors.contains(&to) {
            successors.push(to);
        }
    }

    /// Compiles the accumulated graph into parallel-executable stages.
    ///
    /// Runs Kahn's topological sort by generation: stage `k+1` is the set
    /// of nodes whose last unresolved predecessor sits in stage `k`. Each
    /// stage is emitted in ascending handle order, so the compiled plan is
    /// deterministic for a fixed registration order.
    ///
    /// On success the graph is marked baked and further
    /// [`add_node`](DependencyGraph::add_node) calls fail. A second call
    /// fails with [`SchedError::AlreadyBaked`].
    ///
    /// If a cycle exists, fails with [`SchedError::CycleDetected`]
    /// listing the unplaced node names; the graph itself is left
    /// untouched, so the caller may correct registrations and retry.
    pub fn bake(&mut self) -> SchedResult<Vec<Vec<NodeHandle>>> {
        if self.baked {
            return Err(SchedError::AlreadyBaked);
        }

        let n = self.nodes.len();
        let mut remaining = vec![0usize; n];
        for node in &self.nodes {
            for &succ in &node.successors {
                remaining[succ] += 1;
            }
        }

        // Stage 0: everything with no predecessors, in handle order.
        let mut current: Vec<usize> = (0..n).filter(|&i| remaining[i] == 0).collect();

        let mut placed = FixedBitSet::with_capacity(n);
        let mut stages: Vec<Vec<NodeHandle>> = Vec::new();

        while !current.is_empty() {
            let mut next = Vec::new();
            for &idx in &current {
                placed.insert(idx);
                for &succ in &self.nodes[idx].successors {
                    remaining[succ] -= 1;
                    if remaining[succ] == 0 {
                        next.push(succ);
                    }
                }
            }
            next.sort_unstable();
            stages.push(current.iter().map(|&i| NodeHandle(i)).collect());
            current = next;
        }

        if placed.count_ones(..) != n {
            let involved: Vec<String> = (0..n)
                .filter(|&i| !placed.contains(i))
                .map(|i| self.nodes[i].name.to_string())
                .collect();
            log::warn!(
                "bake failed: dependency cycle among [{}]",
                involved.join(", ")
            );
            return Err(SchedError::CycleDetected { involved });
        }

        self.baked = true;
        log::debug!("baked {} nodes into {} stages", n, stages.len());
        Ok(stages)
    }

    /// Resets all internal storage, including the baked flag. Handles
    /// restart from zero afterwards.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.readers.clear();
        self.writers.clear();
        self.baked = false;
    }

    /// Returns the number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether `bake()` has succeeded.
    pub fn is_baked(&self) -> bool {
        self.baked
    }

    /// Returns the name of the node behind `handle`.
    pub fn name(&self, handle: NodeHandle) -> &'static str {
        self.nodes[handle.0].name
    }

    /// Returns a reference to the payload of the node behind `handle`.
    pub fn payload(&self, handle: NodeHandle) -> &T {
        &self.nodes[handle.0].payload
    }

    /// Returns a mutable reference to the payload of the node behind
    /// `handle`.
    pub fn payload_mut(&mut self, handle: NodeHandle) -> &mut T {
        &mut self.nodes[handle.0].payload
    }
}

impl<T> Default for DependencyGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}
