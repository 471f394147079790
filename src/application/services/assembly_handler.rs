//! Assembly Handler service module
//!
//! Groups a job's loaded operations by make method, emits them in
//! traversal order, and derives the cross-method edges the Dependency
//! Builder cannot see on its own: a child method's root operations gate the
//! parent material's consuming operation (§4.5, §4.4).

use std::collections::HashMap;

use crate::application::services::dependency_builder::{DependencyBuilder, Edge};
use crate::domain::entities::{MakeMethod, Operation, TraversalDirection};

/// Stateless service over the assembly tree and its grouped operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssemblyHandler;

impl AssemblyHandler {
    pub fn new() -> Self {
        Self
    }

    /// Groups operations by owning make method id.
    pub fn group_by_method<'a>(&self, operations: &'a [Operation]) -> HashMap<String, Vec<&'a Operation>> {
        let mut grouped: HashMap<String, Vec<&Operation>> = HashMap::new();
        for op in operations {
            grouped.entry(op.make_method_id.clone()).or_default().push(op);
        }
        grouped
    }

    /// `1 + max(depth(children))`, leaf = `1`.
    pub fn assembly_depth(&self, tree: &MakeMethod) -> u32 {
        tree.depth()
    }

    /// Flattens operations across methods in the traversal order matching
    /// the scheduling direction: post-order (children before parents) for
    /// `Reverse`/backward scheduling, pre-order (parents before children)
    /// for `Forward`/forward scheduling.
    pub fn operations_in_traversal_order<'a>(
        &self,
        tree: &MakeMethod,
        operations_by_method: &HashMap<String, Vec<&'a Operation>>,
        direction: TraversalDirection,
    ) -> Vec<&'a Operation> {
        let methods = match direction {
            TraversalDirection::Forward => tree.pre_order(),
            TraversalDirection::Reverse => tree.post_order(),
        };
        methods
            .into_iter()
            .flat_map(|m| operations_by_method.get(&m.id).cloned().unwrap_or_default())
            .collect()
    }

    /// Derives cross-method edges for the whole tree: for each child
    /// method, every root operation of that child must complete before the
    /// identified consuming operation in the parent starts. If no explicit
    /// material link exists, the child's completion gates the parent
    /// method's rank-1 operations instead (§4.4).
    pub fn build_cross_method_edges(
        &self,
        tree: &MakeMethod,
        operations_by_method: &HashMap<String, Vec<&Operation>>,
        dependency_builder: &DependencyBuilder,
    ) -> Vec<Edge> {
        let mut edges = Vec::new();
        self.collect_cross_edges(tree, operations_by_method, dependency_builder, &mut edges);
        edges
    }

    fn collect_cross_edges(
        &self,
        node: &MakeMethod,
        operations_by_method: &HashMap<String, Vec<&Operation>>,
        dependency_builder: &DependencyBuilder,
        edges: &mut Vec<Edge>,
    ) {
        let empty: Vec<&Operation> = Vec::new();
        for child in &node.children {
            let child_ops = operations_by_method.get(&child.id).unwrap_or(&empty);
            let child_roots = dependency_builder.rank_one_operations(child_ops);

            if !child_roots.is_empty() {
                let parent_ops = operations_by_method.get(&node.id).unwrap_or(&empty);
                let material_id = child.parent_material_id.as_deref();
                let gating_ops = match material_id.and_then(|m| self.find_consuming_operation(parent_ops, m, dependency_builder)) {
                    Some(op) => vec![op],
                    None => dependency_builder.rank_one_operations(parent_ops),
                };
                for gate in &gating_ops {
                    for root in &child_roots {
                        edges.push((gate.id.clone(), root.id.clone()));
                    }
                }
            }

            self.collect_cross_edges(child, operations_by_method, dependency_builder, edges);
        }
    }

    /// The first operation (by adjusted rank, then declared order) in
    /// `parent_ops` that consumes `material_id`.
    fn find_consuming_operation<'a>(
        &self,
        parent_ops: &[&'a Operation],
        material_id: &str,
        dependency_builder: &DependencyBuilder,
    ) -> Option<&'a Operation> {
        if parent_ops.is_empty() {
            return None;
        }
        let ranks = dependency_builder.assign_ranks(parent_ops);
        let mut candidates: Vec<&Operation> = parent_ops
            .iter()
            .copied()
            .filter(|op| op.consumes_material_id.as_deref() == Some(material_id))
            .collect();
        candidates.sort_by_key(|op| (ranks[op.id.as_str()], op.order));
        candidates.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{OperationOrder, OperationStatus, OperationType, RatedTime};

    fn op(id: &str, method: &str, order: i32, consumes: Option<&str>) -> Operation {
        Operation {
            id: id.to_string(),
            job_id: "JOB".to_string(),
            make_method_id: method.to_string(),
            order,
            operation_order: OperationOrder::AfterPrevious,
            process_id: "PROC".to_string(),
            work_center_id: None,
            setup_time: RatedTime::none(),
            labor_time: RatedTime::none(),
            machine_time: RatedTime::none(),
            quantity: None,
            lead_time_days: None,
            existing_start_date: None,
            existing_due_date: None,
            status: OperationStatus::Ready,
            operation_type: OperationType::Inside,
            consumes_material_id: consumes.map(str::to_string),
            job_priority: None,
            deadline_type: None,
        }
    }

    #[test]
    fn two_level_assembly_gates_explicit_consuming_operation() {
        // Parent method has op P consuming MAT1; child method (parentMaterialId = MAT1) has op K.
        let tree = MakeMethod::new("PARENT", "WIDGET").with_child(MakeMethod {
            id: "CHILD".to_string(),
            parent_material_id: Some("MAT1".to_string()),
            item_id: "SUBASSY".to_string(),
            children: Vec::new(),
        });

        let p = op("P", "PARENT", 1, Some("MAT1"));
        let k = op("K", "CHILD", 1, None);
        let operations = vec![p, k];

        let handler = AssemblyHandler::new();
        let builder = DependencyBuilder::new();
        let grouped = handler.group_by_method(&operations);
        let edges = handler.build_cross_method_edges(&tree, &grouped, &builder);

        assert_eq!(edges, vec![("P".to_string(), "K".to_string())]);
    }

    #[test]
    fn no_explicit_link_gates_parent_rank_one_operations() {
        let tree = MakeMethod::new("PARENT", "WIDGET").with_child(MakeMethod {
            id: "CHILD".to_string(),
            parent_material_id: Some("MAT1".to_string()),
            item_id: "SUBASSY".to_string(),
            children: Vec::new(),
        });

        let p = op("P", "PARENT", 1, None);
        let k = op("K", "CHILD", 1, None);
        let operations = vec![p, k];

        let handler = AssemblyHandler::new();
        let builder = DependencyBuilder::new();
        let grouped = handler.group_by_method(&operations);
        let edges = handler.build_cross_method_edges(&tree, &grouped, &builder);

        assert_eq!(edges, vec![("P".to_string(), "K".to_string())]);
    }

    #[test]
    fn assembly_depth_matches_tree_depth() {
        let tree = MakeMethod::new("PARENT", "WIDGET").with_child(MakeMethod::new("CHILD", "SUBASSY"));
        let handler = AssemblyHandler::new();
        assert_eq!(handler.assembly_depth(&tree), 2);
    }
}
