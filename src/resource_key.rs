use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Underlying identity of a [`ResourceKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum KeyId {
    /// Compile-time type identity (component classes and the like).
    Type(TypeId),
    /// Caller-assigned numeric tag (named buffers, attachments).
    Tag(u64),
}

/// A stable, comparable identity for one class of shared resource.
///
/// Two work units that declare the same `ResourceKey` are considered to
/// access the *same* resource; no partial overlap is modeled. A key is
/// either the identity of a Rust type ([`ResourceKey::of`]) or a
/// caller-assigned numeric tag ([`ResourceKey::tagged`]); the two spaces
/// never collide. The attached name is used purely for diagnostics —
/// equality and hashing consider only the identity.
///
/// # Example
///
/// ```ignore
/// struct Position;
/// let by_type = ResourceKey::of::<Position>();
/// let by_tag = ResourceKey::tagged(7, "shadow_atlas");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ResourceKey {
    id: KeyId,
    name: &'static str,
}

impl ResourceKey {
    /// Creates the key identifying resource class `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: KeyId::Type(TypeId::of::<T>()),
            name: std::any::type_name::<T>(),
        }
    }

    /// Creates a key from a caller-assigned numeric tag.
    ///
    /// Callers are responsible for keeping tags unique per resource;
    /// the name is for diagnostics only and does not participate in
    /// equality.
    pub fn tagged(tag: u64, name: &'static str) -> Self {
        Self {
            id: KeyId::Tag(tag),
            name,
        }
    }

    /// Human-readable name, for debug and error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ResourceKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ResourceKey {}

impl Hash for ResourceKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Position;
    struct Velocity;

    #[test]
    fn same_type_same_key() {
        assert_eq!(ResourceKey::of::<Position>(), ResourceKey::of::<Position>());
    }

    #[test]
    fn different_types_different_keys() {
        assert_ne!(ResourceKey::of::<Position>(), ResourceKey::of::<Velocity>());
    }

    #[test]
    fn tags_compare_by_value_not_name() {
        assert_eq!(
            ResourceKey::tagged(3, "gbuffer"),
            ResourceKey::tagged(3, "renamed")
        );
        assert_ne!(ResourceKey::tagged(3, "gbuffer"), ResourceKey::tagged(4, "gbuffer"));
    }

    #[test]
    fn tag_and_type_spaces_never_collide() {
        assert_ne!(
            ResourceKey::of::<Position>(),
            ResourceKey::tagged(0, "position")
        );
    }

    #[test]
    fn usable_in_hash_set() {
        let mut set = HashSet::new();
        set.insert(ResourceKey::of::<Position>());
        set.insert(ResourceKey::of::<Position>());
        set.insert(ResourceKey::of::<Velocity>());
        set.insert(ResourceKey::tagged(1, "atlas"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn name_contains_type() {
        assert!(ResourceKey::of::<Position>().name().contains("Position"));
    }
}
