//! Dependency Builder service module
//!
//! Derives same-method precedence edges from an ordered set of operations,
//! folding `With Previous` groupings into shared ranks (§4.4, §9).
//!
//! `With Previous` is modeled only as a ranking attribute used here, at
//! edge-construction time; once the edges exist, a `With Previous`
//! operation is just a node sharing predecessors with its group-mate — no
//! runtime parallelism primitive is needed downstream. The group-mate
//! itself is never discoverable from those edges, though: two operations
//! sharing a rank never get an edge directly between them, so
//! [`DependencyBuilder::rank_mates`] is exposed separately for the
//! Scheduling Strategy to resolve which anchor a `With Previous` operation
//! copies its dates from.

use std::collections::BTreeMap;

use crate::domain::entities::{Operation, OperationOrder};

/// An edge `(dependent, predecessor)`: `dependent` depends on `predecessor`.
pub type Edge = (String, String);

/// Stateless service deriving precedence edges within one make method.
#[derive(Debug, Default, Clone, Copy)]
pub struct DependencyBuilder;

impl DependencyBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Builds the same-method edges for `operations`, which must all
    /// belong to the same make method. Returns one edge per (dependent,
    /// predecessor) pair across adjacent ranks.
    pub fn build_edges(&self, operations: &[&Operation]) -> Vec<Edge> {
        let ranks = self.assign_ranks(operations);

        let mut by_rank: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
        for op in operations {
            let rank = ranks[op.id.as_str()];
            by_rank.entry(rank).or_default().push(op.id.as_str());
        }

        let mut edges = Vec::new();
        let rank_numbers: Vec<u32> = by_rank.keys().copied().collect();
        for window in rank_numbers.windows(2) {
            let (lower, upper) = (window[0], window[1]);
            for &dependent in &by_rank[&upper] {
                for &predecessor in &by_rank[&lower] {
                    edges.push((dependent.to_string(), predecessor.to_string()));
                }
            }
        }
        edges
    }

    /// Maps each `With Previous` operation to the `After Previous` operation
    /// that anchors its shared rank — the "group-mate" the Scheduling
    /// Strategy copies dates from. `depends_on`/`required_by` cannot answer
    /// this: same-rank operations share edges with the *next* or *previous*
    /// rank, never with each other. A leading `With Previous` run (no
    /// `After Previous` operation precedes it) has no anchor and is absent
    /// from the map.
    pub fn rank_mates<'a>(&self, operations: &[&'a Operation]) -> BTreeMap<&'a str, &'a str> {
        let mut sorted: Vec<&Operation> = operations.to_vec();
        sorted.sort_by_key(|op| op.order);

        let mut mates = BTreeMap::new();
        let mut anchor: Option<&str> = None;
        for op in sorted {
            match op.operation_order {
                OperationOrder::AfterPrevious => anchor = Some(op.id.as_str()),
                OperationOrder::WithPrevious => {
                    if let Some(anchor_id) = anchor {
                        mates.insert(op.id.as_str(), anchor_id);
                    }
                }
            }
        }
        mates
    }

    /// Operations with no same-method predecessor — rank `1` — used by the
    /// Assembly Handler to find what a child method's completion must gate.
    pub fn rank_one_operations<'a>(&self, operations: &[&'a Operation]) -> Vec<&'a Operation> {
        let ranks = self.assign_ranks(operations);
        operations
            .iter()
            .copied()
            .filter(|op| ranks[op.id.as_str()] == 1)
            .collect()
    }

    /// Assigns each operation an adjusted rank: `With Previous` operations
    /// inherit the rank of the most recent preceding `After Previous`
    /// operation (rank `1` if none exists); all others take their sequence
    /// position among `After Previous` operations.
    pub(crate) fn assign_ranks<'a>(&self, operations: &[&'a Operation]) -> BTreeMap<&'a str, u32> {
        let mut sorted: Vec<&Operation> = operations.to_vec();
        sorted.sort_by_key(|op| op.order);

        let mut ranks = BTreeMap::new();
        let mut current_rank: u32 = 0;
        for op in sorted {
            let rank = match op.operation_order {
                OperationOrder::AfterPrevious => {
                    current_rank += 1;
                    current_rank
                }
                OperationOrder::WithPrevious => {
                    if current_rank == 0 {
                        1
                    } else {
                        current_rank
                    }
                }
            };
            ranks.insert(op.id.as_str(), rank);
        }
        ranks
    }
}
