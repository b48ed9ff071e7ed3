//! Read-only traversal of a finished package tree
//!
//! [`walk`] makes two passes, mirroring how a diagram is drawn: first every
//! package depth-first (self before children, children and roots sorted by
//! segment name) with its units sorted by name, then every unit's
//! dependencies sorted by qualified name.

use crate::error::Result;
use crate::models::package::PackageId;
use crate::models::tree::PackageTree;
use crate::models::unit::UnitId;

/// Consumer of the tree traversal. Every method defaults to a no-op.
pub trait ModelVisitor {
    /// Called before the package's units and children
    fn enter_package(
        &mut self,
        _tree: &PackageTree,
        _package: PackageId,
        _depth: usize,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once per unit, in the package that owns it
    fn visit_unit(&mut self, _tree: &PackageTree, _unit: UnitId, _depth: usize) -> Result<()> {
        Ok(())
    }

    /// Called after the package's children
    fn leave_package(
        &mut self,
        _tree: &PackageTree,
        _package: PackageId,
        _depth: usize,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once per dependency edge, after all packages were visited
    fn visit_dependency(&mut self, _tree: &PackageTree, _from: UnitId, _to: UnitId) -> Result<()> {
        Ok(())
    }
}

/// Roots sorted by segment name
pub fn sorted_roots(tree: &PackageTree) -> Vec<PackageId> {
    let mut roots: Vec<PackageId> = tree.roots().collect();
    roots.sort_by(|a, b| tree.package(*a).name().cmp(tree.package(*b).name()));
    roots
}

/// Dependencies of `unit` sorted by qualified name
pub fn sorted_dependencies(tree: &PackageTree, unit: UnitId) -> Vec<UnitId> {
    let mut deps: Vec<(String, UnitId)> = tree
        .unit(unit)
        .dependencies()
        .map(|dep| (tree.unit_qualified_name(dep), dep))
        .collect();
    deps.sort();
    deps.into_iter().map(|(_, dep)| dep).collect()
}

/// Packages in visitation order
pub fn packages_depth_first(tree: &PackageTree) -> Vec<PackageId> {
    let mut order = Vec::with_capacity(tree.package_count());
    let mut stack: Vec<PackageId> = sorted_roots(tree).into_iter().rev().collect();

    while let Some(id) = stack.pop() {
        order.push(id);
        let children: Vec<PackageId> =
            tree.package(id).children().map(|(_, child)| child).collect();
        stack.extend(children.into_iter().rev());
    }

    order
}

/// Units in visitation order
pub fn units_in_order(tree: &PackageTree) -> Vec<UnitId> {
    packages_depth_first(tree)
        .into_iter()
        .flat_map(|package| tree.package(package).units().map(|(_, unit)| unit).collect::<Vec<_>>())
        .collect()
}

/// First pass: packages and their units
pub fn walk_packages<V: ModelVisitor + ?Sized>(tree: &PackageTree, visitor: &mut V) -> Result<()> {
    for root in sorted_roots(tree) {
        walk_package(tree, root, 0, visitor)?;
    }
    Ok(())
}

fn walk_package<V: ModelVisitor + ?Sized>(
    tree: &PackageTree,
    package: PackageId,
    depth: usize,
    visitor: &mut V,
) -> Result<()> {
    visitor.enter_package(tree, package, depth)?;

    let node = tree.package(package);
    for (_, unit) in node.units() {
        visitor.visit_unit(tree, unit, depth + 1)?;
    }
    for (_, child) in node.children() {
        walk_package(tree, child, depth + 1, visitor)?;
    }

    visitor.leave_package(tree, package, depth)
}

/// Second pass: dependency edges, grouped by source unit in visitation order
pub fn walk_dependencies<V: ModelVisitor + ?Sized>(
    tree: &PackageTree,
    visitor: &mut V,
) -> Result<()> {
    for unit in units_in_order(tree) {
        for dep in sorted_dependencies(tree, unit) {
            visitor.visit_dependency(tree, unit, dep)?;
        }
    }
    Ok(())
}

/// Both passes
pub fn walk<V: ModelVisitor + ?Sized>(tree: &PackageTree, visitor: &mut V) -> Result<()> {
    walk_packages(tree, visitor)?;
    walk_dependencies(tree, visitor)
}
