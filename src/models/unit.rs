//! Compilation units (one class or module per source file)

use super::package::PackageId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stable handle to a [`Unit`] inside a [`PackageTree`](super::tree::PackageTree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub(crate) usize);

impl UnitId {
    /// Position of the unit in the tree's arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single source compilation unit and the units it depends on
///
/// Units are created lazily, either by the declaration in their own file or
/// as the target of an import. Both paths yield the same instance.
#[derive(Debug, Clone)]
pub struct Unit {
    name: String,
    package: PackageId,
    dependencies: BTreeSet<UnitId>,
}

impl Unit {
    pub(crate) fn new(name: impl Into<String>, package: PackageId) -> Self {
        Self {
            name: name.into(),
            package,
            dependencies: BTreeSet::new(),
        }
    }

    /// Simple name, unique within the owning package
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning package
    pub fn package(&self) -> PackageId {
        self.package
    }

    /// Record `other` as a dependency. Returns false if it was already present.
    pub fn depends_on(&mut self, other: UnitId) -> bool {
        self.dependencies.insert(other)
    }

    /// Whether `other` is among this unit's dependencies
    pub fn has_dependency(&self, other: UnitId) -> bool {
        self.dependencies.contains(&other)
    }

    /// Dependencies in handle order
    pub fn dependencies(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.dependencies.iter().copied()
    }

    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depends_on_is_idempotent() {
        let mut unit = Unit::new("Foo", PackageId(0));
        assert!(unit.depends_on(UnitId(1)));
        for _ in 0..5 {
            assert!(!unit.depends_on(UnitId(1)));
        }
        assert_eq!(unit.dependency_count(), 1);
        assert!(unit.has_dependency(UnitId(1)));
        assert!(!unit.has_dependency(UnitId(2)));
    }

    #[test]
    fn test_new_unit_has_no_dependencies() {
        let unit = Unit::new("Bar", PackageId(3));
        assert_eq!(unit.name(), "Bar");
        assert_eq!(unit.package(), PackageId(3));
        assert_eq!(unit.dependencies().count(), 0);
    }
}
