//! Summary statistics over a built model

use crate::core::builder::Model;
use crate::models::tree::PackageTree;
use crate::models::unit::UnitId;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

/// Counts and dependency cycles of a model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelStatistics {
    pub packages: usize,
    pub roots: usize,
    pub units: usize,
    pub declared_units: usize,
    pub implicit_units: usize,
    pub dependencies: usize,
    pub max_package_depth: usize,
    /// Each cycle as sorted qualified unit names
    pub cycles: Vec<Vec<String>>,
}

impl ModelStatistics {
    pub fn from_model(model: &Model) -> Self {
        let tree = model.tree();
        let declared_units = model.declared_count();

        Self {
            packages: tree.package_count(),
            roots: tree.root_count(),
            units: tree.unit_count(),
            declared_units,
            implicit_units: tree.unit_count() - declared_units,
            dependencies: tree.edge_count(),
            max_package_depth: tree
                .package_ids()
                .map(|id| tree.depth(id))
                .max()
                .unwrap_or(0),
            cycles: dependency_cycles(tree),
        }
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }
}

/// Unit dependency graph as a petgraph `DiGraph`, node weights being unit handles
pub fn dependency_graph(tree: &PackageTree) -> DiGraph<UnitId, ()> {
    let mut graph = DiGraph::with_capacity(tree.unit_count(), tree.edge_count());
    let nodes: Vec<NodeIndex> = tree.unit_ids().map(|id| graph.add_node(id)).collect();

    for id in tree.unit_ids() {
        for dep in tree.unit(id).dependencies() {
            graph.add_edge(nodes[id.index()], nodes[dep.index()], ());
        }
    }

    graph
}

/// Strongly connected components with more than one unit, plus self-imports
pub fn dependency_cycles(tree: &PackageTree) -> Vec<Vec<String>> {
    let graph = dependency_graph(tree);

    let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
        .map(|scc| {
            let mut names: Vec<String> = scc
                .into_iter()
                .map(|node| tree.unit_qualified_name(graph[node]))
                .collect();
            names.sort();
            names
        })
        .collect();

    cycles.sort();
    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::ModelBuilder;
    use std::path::Path;

    #[test]
    fn test_statistics_counts() {
        let mut builder = ModelBuilder::new();
        builder.add_file(Path::new("Foo.java"), ["package a.b;", "import c.d.E;", "import c.F;"]);
        builder.add_file(Path::new("E.java"), ["package c.d;"]);
        let stats = ModelStatistics::from_model(&builder.finish().unwrap());

        assert_eq!(stats.packages, 4);
        assert_eq!(stats.roots, 2);
        assert_eq!(stats.units, 3);
        assert_eq!(stats.declared_units, 2);
        assert_eq!(stats.implicit_units, 1);
        assert_eq!(stats.dependencies, 2);
        assert_eq!(stats.max_package_depth, 2);
        assert!(!stats.has_cycles());
    }

    #[test]
    fn test_cycles_are_detected() {
        let mut tree = PackageTree::new();
        let a = tree.resolve_unit("p", "A").unwrap();
        let b = tree.resolve_unit("q", "B").unwrap();
        let c = tree.resolve_unit("r", "C").unwrap();
        let d = tree.resolve_unit("s", "D").unwrap();
        tree.add_dependency(a, b);
        tree.add_dependency(b, a);
        tree.add_dependency(b, c);
        tree.add_dependency(d, d);

        assert_eq!(
            dependency_cycles(&tree),
            vec![
                vec!["p.A".to_string(), "q.B".to_string()],
                vec!["s.D".to_string()],
            ]
        );
    }

    #[test]
    fn test_graph_mirrors_tree() {
        let mut tree = PackageTree::new();
        let a = tree.resolve_unit("p", "A").unwrap();
        let b = tree.resolve_unit("p", "B").unwrap();
        tree.add_dependency(a, b);

        let graph = dependency_graph(&tree);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }
}
