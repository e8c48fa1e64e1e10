use std::collections::HashSet;

use crate::resource_key::ResourceKey;

/// Collects the resource access a work unit declares before registration.
///
/// A unit receives one builder instance exactly once, in
/// [`System::declare_dependencies`](crate::System::declare_dependencies).
/// Call order and duplicates are insignificant; the sets deduplicate.
///
/// Declarations are a contract, not an enforced property: the scheduler
/// cannot detect a unit that touches resources it never declared, and such
/// a unit silently invalidates the compiled plan's safety guarantee.
///
/// # Example
///
/// ```ignore
/// fn declare_dependencies(&self, deps: &mut DependencyBuilder) {
///     deps.reads::<Position>();
///     deps.writes::<Velocity>();
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct DependencyBuilder {
    reads: HashSet<ResourceKey>,
    writes: HashSet<ResourceKey>,
}

impl DependencyBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares read access to resource class `T`.
    pub fn reads<T: 'static>(&mut self) {
        self.reads.insert(ResourceKey::of::<T>());
    }

    /// Declares write access to resource class `T`.
    pub fn writes<T: 'static>(&mut self) {
        self.writes.insert(ResourceKey::of::<T>());
    }

    /// Declares read access to an already-constructed key.
    pub fn reads_key(&mut self, key: ResourceKey) {
        self.reads.insert(key);
    }

    /// Declares write access to an already-constructed key.
    pub fn writes_key(&mut self, key: ResourceKey) {
        self.writes.insert(key);
    }

    /// The deduplicated read set.
    pub fn read_set(&self) -> &HashSet<ResourceKey> {
        &self.reads
    }

    /// The deduplicated write set.
    pub fn write_set(&self) -> &HashSet<ResourceKey> {
        &self.writes
    }
}
