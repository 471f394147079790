//! Dependency graph entity module
//!
//! A typed DAG keyed by operation id, with symmetric `dependsOn`/`requiredBy`
//! adjacency and a topological sort in either direction (§4.3). This is the
//! run-time structure the Scheduling Strategy walks; the assembly tree
//! (`MakeMethod`) is only the source of its edges, never the other way
//! around (§9).

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

/// Direction to walk the graph's topological order in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalDirection {
    /// Dependencies before dependents — starts from nodes with no
    /// `dependsOn`.
    Forward,
    /// Dependents before dependencies — starts from nodes with no
    /// `requiredBy`.
    Reverse,
}

/// One node of the dependency graph: an operation id plus its two
/// deduplicated, insertion-ordered edge sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DependencyNode {
    pub depends_on: Vec<String>,
    pub required_by: Vec<String>,
}

/// A cycle was detected during topological sort; carries the operation ids
/// that could not be ordered (the residual set Kahn's algorithm could not
/// drain).
#[derive(Debug, Clone, PartialEq)]
pub struct CycleDetected {
    pub residual: Vec<String>,
}

/// Mapping from operation id to its dependency node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyGraph {
    nodes: HashMap<String, DependencyNode>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self { nodes: HashMap::new() }
    }

    /// Ensures a node exists for `id` without creating any edges.
    pub fn add_node(&mut self, id: impl Into<String>) {
        self.nodes.entry(id.into()).or_default();
    }

    /// Adds `b` to `dependsOn(a)` and `a` to `requiredBy(b)`, if not already
    /// present. Creates both nodes if missing.
    pub fn add_dependency(&mut self, a: &str, b: &str) {
        self.add_node(a);
        self.add_node(b);

        let a_depends_on_b = self
            .nodes
            .get(a)
            .map(|n| n.depends_on.iter().any(|x| x == b))
            .unwrap_or(false);
        if !a_depends_on_b {
            self.nodes.get_mut(a).unwrap().depends_on.push(b.to_string());
        }

        let b_required_by_a = self
            .nodes
            .get(b)
            .map(|n| n.required_by.iter().any(|x| x == a))
            .unwrap_or(false);
        if !b_required_by_a {
            self.nodes.get_mut(b).unwrap().required_by.push(a.to_string());
        }
    }

    pub fn node(&self, id: &str) -> Option<&DependencyNode> {
        self.nodes.get(id)
    }

    pub fn depends_on(&self, id: &str) -> &[String] {
        self.nodes.get(id).map(|n| n.depends_on.as_slice()).unwrap_or(&[])
    }

    pub fn required_by(&self, id: &str) -> &[String] {
        self.nodes.get(id).map(|n| n.required_by.as_slice()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &String> {
        self.nodes.keys()
    }

    /// Kahn's algorithm linearization. `Forward` starts from nodes with
    /// empty `dependsOn`; `Reverse` starts from nodes with empty
    /// `requiredBy`. Fails with [`CycleDetected`] when the emitted order is
    /// shorter than the node count.
    pub fn topological_sort(&self, direction: TraversalDirection) -> Result<Vec<String>, CycleDetected> {
        let (front, back): (fn(&DependencyNode) -> &[String], fn(&DependencyNode) -> &[String]) = match direction {
            TraversalDirection::Forward => (
                |n: &DependencyNode| n.depends_on.as_slice(),
                |n: &DependencyNode| n.required_by.as_slice(),
            ),
            TraversalDirection::Reverse => (
                |n: &DependencyNode| n.required_by.as_slice(),
                |n: &DependencyNode| n.depends_on.as_slice(),
            ),
        };

        // in-degree here means "number of unsatisfied predecessors in the
        // walk direction", i.e. the size of the `front` edge set.
        let mut remaining: HashMap<&str, usize> = HashMap::new();
        let mut ready: VecDeque<&str> = VecDeque::new();

        // Stable ordering: iterate ids sorted so ties resolve
        // deterministically regardless of HashMap iteration order.
        let mut ids: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        ids.sort();

        for &id in &ids {
            let node = &self.nodes[id];
            let degree = front(node).len();
            remaining.insert(id, degree);
            if degree == 0 {
                ready.push_back(id);
            }
        }

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(id) = ready.pop_front() {
            order.push(id.to_string());
            let node = &self.nodes[id];
            let mut next: Vec<&str> = back(node).iter().map(String::as_str).collect();
            next.sort();
            for succ in next {
                if let Some(deg) = remaining.get_mut(succ) {
                    *deg -= 1;
                    if *deg == 0 {
                        ready.push_back(succ);
                    }
                }
            }
        }

        if order.len() < self.nodes.len() {
            let emitted: HashSet<&str> = order.iter().map(String::as_str).collect();
            let residual = ids
                .into_iter()
                .filter(|id| !emitted.contains(id))
                .map(String::from)
                .collect();
            return Err(CycleDetected { residual });
        }

        Ok(order)
    }
}
