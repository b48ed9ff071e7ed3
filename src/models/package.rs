//! Package nodes: one segment of a dotted package path

use super::unit::UnitId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable handle to a [`PackageNode`] inside a [`PackageTree`](super::tree::PackageTree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageId(pub(crate) usize);

impl PackageId {
    /// Position of the package in the tree's arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single package segment
///
/// Children and units are owned through the tree's arenas and keyed by name
/// here, so iteration is lexicographic. The parent link is a plain handle
/// used for name computation only.
#[derive(Debug, Clone)]
pub struct PackageNode {
    name: String,
    parent: Option<PackageId>,
    children: BTreeMap<String, PackageId>,
    units: BTreeMap<String, UnitId>,
}

impl PackageNode {
    pub(crate) fn new(name: impl Into<String>, parent: Option<PackageId>) -> Self {
        Self {
            name: name.into(),
            parent,
            children: BTreeMap::new(),
            units: BTreeMap::new(),
        }
    }

    /// Segment name (not qualified)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent package, `None` for roots
    pub fn parent(&self) -> Option<PackageId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Child with the given segment name
    pub fn child(&self, segment: &str) -> Option<PackageId> {
        self.children.get(segment).copied()
    }

    /// Children ordered by segment name
    pub fn children(&self) -> impl Iterator<Item = (&str, PackageId)> + '_ {
        self.children.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Unit with the given simple name
    pub fn unit(&self, name: &str) -> Option<UnitId> {
        self.units.get(name).copied()
    }

    /// Units ordered by name
    pub fn units(&self) -> impl Iterator<Item = (&str, UnitId)> + '_ {
        self.units.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub(crate) fn insert_child(&mut self, segment: &str, child: PackageId) {
        self.children.insert(segment.to_string(), child);
    }

    pub(crate) fn insert_unit(&mut self, name: &str, unit: UnitId) {
        self.units.insert(name.to_string(), unit);
    }
}
