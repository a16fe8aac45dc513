//! Per-surface activation tracking.

use std::collections::HashSet;
use std::hash::Hash;

/// CSS class set on a canvas once a viewer is attached to it.
pub const ACTIVE_CLASS: &str = "spin360-view-active";

/// Set of surfaces that already have a viewer.
///
/// Activation is one-shot per surface: the second attempt on the same key is
/// refused so listeners are never attached twice and the intro never restarts.
#[derive(Clone, Debug)]
pub struct ActivationRegistry<K> {
    active: HashSet<K>,
}

impl<K: Eq + Hash> Default for ActivationRegistry<K> {
    fn default() -> Self {
        Self {
            active: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash> ActivationRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` active. Returns `false` if it already was.
    pub fn try_activate(&mut self, key: K) -> bool {
        self.active.insert(key)
    }

    pub fn is_active(&self, key: &K) -> bool {
        self.active.contains(key)
    }

    /// Whether a viewer may attach to `key`.
    ///
    /// `has_marker` reports the [`ACTIVE_CLASS`] flag on the surface itself,
    /// which catches surfaces activated by another instance of the crate.
    pub fn can_activate(&self, key: &K, has_marker: bool) -> bool {
        !has_marker && !self.is_active(key)
    }

    /// Number of active surfaces.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_activation_is_refused() {
        let mut registry = ActivationRegistry::new();
        assert!(registry.try_activate("#viewer"));
        assert!(!registry.try_activate("#viewer"));
        assert!(registry.is_active(&"#viewer"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_surfaces_are_independent() {
        let mut registry = ActivationRegistry::new();
        assert!(registry.try_activate(1u32));
        assert!(registry.try_activate(2u32));
        assert!(!registry.is_active(&3u32));
    }

    #[test]
    fn test_can_activate_fresh_surface() {
        let registry: ActivationRegistry<&str> = ActivationRegistry::new();
        assert!(registry.can_activate(&"#viewer", false));
    }

    #[test]
    fn test_marker_class_blocks_activation() {
        let registry: ActivationRegistry<&str> = ActivationRegistry::new();
        assert!(!registry.can_activate(&"#viewer", true));
    }

    #[test]
    fn test_registered_surface_blocks_activation() {
        let mut registry = ActivationRegistry::new();
        registry.try_activate("#viewer");
        assert!(!registry.can_activate(&"#viewer", false));
        assert!(!registry.can_activate(&"#viewer", true));
        assert!(registry.can_activate(&"#other", false));
    }
}
