//! Package tree registry
//!
//! Owns every [`PackageNode`] and [`Unit`] in two arenas and resolves dotted
//! names into them with create-or-get semantics. Handles stay valid for the
//! lifetime of the tree since nothing is ever removed.

use super::package::{PackageId, PackageNode};
use super::unit::{Unit, UnitId};
use crate::error::{PacktreeError, Result};
use std::collections::HashMap;

/// Split a dotted name into its segments
///
/// Fails with `InvalidPath` for the empty string and for names with empty
/// segments (`a..b`, `.a`, `a.`) or embedded whitespace.
pub fn split_dotted(dotted: &str) -> Result<Vec<&str>> {
    if dotted.is_empty() {
        return Err(PacktreeError::invalid_path(dotted));
    }

    let segments: Vec<&str> = dotted.split('.').collect();
    if segments
        .iter()
        .any(|s| s.is_empty() || s.chars().any(char::is_whitespace))
    {
        return Err(PacktreeError::invalid_path(dotted));
    }

    Ok(segments)
}

/// Root-level owner of the package hierarchy
#[derive(Debug, Clone, Default)]
pub struct PackageTree {
    packages: Vec<PackageNode>,
    units: Vec<Unit>,
    roots: HashMap<String, PackageId>,
    root_order: Vec<PackageId>,
}

impl PackageTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a dotted package name, creating missing segments
    ///
    /// Resolving the same name twice returns the same handle.
    pub fn resolve_package_path(&mut self, dotted: &str) -> Result<PackageId> {
        let segments = split_dotted(dotted)?;
        let (first, rest) = segments
            .split_first()
            .ok_or_else(|| PacktreeError::invalid_path(dotted))?;

        let mut current = self.resolve_root(first);
        for segment in rest {
            current = self.resolve_child(current, segment);
        }

        Ok(current)
    }

    /// Resolve `unit_name` inside the package named `dotted_package`
    pub fn resolve_unit(&mut self, dotted_package: &str, unit_name: &str) -> Result<UnitId> {
        let package = self.resolve_package_path(dotted_package)?;
        self.resolve_unit_in(package, unit_name)
    }

    /// Return the root with this segment name, creating it if absent
    pub fn resolve_root(&mut self, segment: &str) -> PackageId {
        if let Some(id) = self.roots.get(segment) {
            return *id;
        }

        let id = self.push_package(PackageNode::new(segment, None));
        self.roots.insert(segment.to_string(), id);
        self.root_order.push(id);
        tracing::trace!(package = segment, "created root package");
        id
    }

    /// Return the child of `parent` with this segment name, creating and
    /// linking it if absent
    pub fn resolve_child(&mut self, parent: PackageId, segment: &str) -> PackageId {
        if let Some(id) = self.packages[parent.0].child(segment) {
            return id;
        }

        let id = self.push_package(PackageNode::new(segment, Some(parent)));
        self.packages[parent.0].insert_child(segment, id);
        tracing::trace!(package = %self.qualified_name(id), "created package");
        id
    }

    /// Return the unit named `name` under `package`, creating it if absent
    pub fn resolve_unit_in(&mut self, package: PackageId, name: &str) -> Result<UnitId> {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(PacktreeError::invalid_path(name));
        }

        if let Some(id) = self.packages[package.0].unit(name) {
            debug_assert!(self.units[id.0].package() == package && self.units[id.0].name() == name);
            return Ok(id);
        }

        let id = UnitId(self.units.len());
        self.units.push(Unit::new(name, package));
        self.packages[package.0].insert_unit(name, id);
        tracing::trace!(unit = %self.unit_qualified_name(id), "created unit");
        Ok(id)
    }

    /// Record a dependency edge. Returns false if the edge already existed.
    pub fn add_dependency(&mut self, from: UnitId, to: UnitId) -> bool {
        self.units[from.0].depends_on(to)
    }

    /// Look up a package without creating anything
    pub fn find_package(&self, dotted: &str) -> Option<PackageId> {
        let segments = split_dotted(dotted).ok()?;
        let (first, rest) = segments.split_first()?;
        let mut current = *self.roots.get(*first)?;
        for segment in rest {
            current = self.packages[current.0].child(segment)?;
        }
        Some(current)
    }

    /// Look up a unit without creating anything
    pub fn find_unit(&self, dotted_package: &str, unit_name: &str) -> Option<UnitId> {
        let package = self.find_package(dotted_package)?;
        self.packages[package.0].unit(unit_name)
    }

    pub fn package(&self, id: PackageId) -> &PackageNode {
        &self.packages[id.0]
    }

    pub fn unit(&self, id: UnitId) -> &Unit {
        &self.units[id.0]
    }

    /// Fully qualified name: parent's qualified name, a dot, then the segment
    pub fn qualified_name(&self, id: PackageId) -> String {
        let node = &self.packages[id.0];
        match node.parent() {
            Some(parent) => format!("{}.{}", self.qualified_name(parent), node.name()),
            None => node.name().to_string(),
        }
    }

    /// Qualified name of a unit, e.g. `a.b.Foo`
    pub fn unit_qualified_name(&self, id: UnitId) -> String {
        let unit = &self.units[id.0];
        format!("{}.{}", self.qualified_name(unit.package()), unit.name())
    }

    /// Number of segments from the root down to `id`, roots being 1
    pub fn depth(&self, id: PackageId) -> usize {
        let mut depth = 1;
        let mut current = self.packages[id.0].parent();
        while let Some(parent) = current {
            depth += 1;
            current = self.packages[parent.0].parent();
        }
        depth
    }

    /// Roots in first-seen order
    pub fn roots(&self) -> impl Iterator<Item = PackageId> + '_ {
        self.root_order.iter().copied()
    }

    /// Root with the given segment name
    pub fn root(&self, segment: &str) -> Option<PackageId> {
        self.roots.get(segment).copied()
    }

    /// All packages in creation order
    pub fn package_ids(&self) -> impl Iterator<Item = PackageId> {
        (0..self.packages.len()).map(PackageId)
    }

    /// All units in creation order
    pub fn unit_ids(&self) -> impl Iterator<Item = UnitId> {
        (0..self.units.len()).map(UnitId)
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn root_count(&self) -> usize {
        self.root_order.len()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Total number of dependency edges
    pub fn edge_count(&self) -> usize {
        self.units.iter().map(Unit::dependency_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    fn push_package(&mut self, node: PackageNode) -> PackageId {
        let id = PackageId(self.packages.len());
        self.packages.push(node);
        id
    }
}
