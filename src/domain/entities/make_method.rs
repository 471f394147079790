//! Make method entity module
//!
//! A make method is a node of the assembly tree: a specific way to produce
//! an item, whose children are the sub-assemblies consumed as materials.
//! Implemented as a plain value type with owned children and no back
//! pointers, so the tree and the run-time dependency DAG never share
//! ownership (§9).

use serde::{Deserialize, Serialize};

/// One node of the assembly tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MakeMethod {
    pub id: String,
    /// `None` only at the root of the tree.
    pub parent_material_id: Option<String>,
    pub item_id: String,
    pub children: Vec<MakeMethod>,
}

impl MakeMethod {
    pub fn new(id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_material_id: None,
            item_id: item_id.into(),
            children: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_material_id.is_none()
    }

    pub fn with_child(mut self, child: MakeMethod) -> Self {
        self.children.push(child);
        self
    }

    /// `1 + max(depth(children))`; a leaf method has depth `1` (§4.5).
    pub fn depth(&self) -> u32 {
        1 + self
            .children
            .iter()
            .map(MakeMethod::depth)
            .max()
            .unwrap_or(0)
    }

    /// Post-order traversal: children before parents, for backward
    /// scheduling (§4.5).
    pub fn post_order(&self) -> Vec<&MakeMethod> {
        let mut out = Vec::new();
        self.post_order_into(&mut out);
        out
    }

    fn post_order_into<'a>(&'a self, out: &mut Vec<&'a MakeMethod>) {
        for child in &self.children {
            child.post_order_into(out);
        }
        out.push(self);
    }

    /// Pre-order traversal: parents before children, for forward scheduling
    /// (§4.5).
    pub fn pre_order(&self) -> Vec<&MakeMethod> {
        let mut out = Vec::new();
        self.pre_order_into(&mut out);
        out
    }

    fn pre_order_into<'a>(&'a self, out: &mut Vec<&'a MakeMethod>) {
        out.push(self);
        for child in &self.children {
            child.pre_order_into(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> MakeMethod {
        MakeMethod::new("ROOT", "WIDGET").with_child(
            MakeMethod {
                id: "CHILD".to_string(),
                parent_material_id: Some("MAT1".to_string()),
                item_id: "SUBASSY".to_string(),
                children: vec![MakeMethod {
                    id: "GRANDCHILD".to_string(),
                    parent_material_id: Some("MAT2".to_string()),
                    item_id: "PART".to_string(),
                    children: Vec::new(),
                }],
            },
        )
    }

    #[test]
    fn leaf_depth_is_one() {
        assert_eq!(MakeMethod::new("LEAF", "ITEM").depth(), 1);
    }

    #[test]
    fn depth_is_one_plus_deepest_child() {
        assert_eq!(sample_tree().depth(), 3);
    }

    #[test]
    fn post_order_visits_children_before_parent() {
        let tree = sample_tree();
        let ids: Vec<&str> = tree.post_order().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["GRANDCHILD", "CHILD", "ROOT"]);
    }

    #[test]
    fn pre_order_visits_parent_before_children() {
        let tree = sample_tree();
        let ids: Vec<&str> = tree.pre_order().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["ROOT", "CHILD", "GRANDCHILD"]);
    }

    #[test]
    fn only_root_has_no_parent_material() {
        let tree = sample_tree();
        assert!(tree.is_root());
        assert!(!tree.children[0].is_root());
    }
}
