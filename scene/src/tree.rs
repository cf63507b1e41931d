use super::{Node, NodeId, Scene};

/// Trait for implementing tree traversal operations.
///
/// Implementors of this trait can be passed to tree walking functions
/// to perform arbitrary operations on each node during traversal.
///
/// The visitor receives callbacks when entering and exiting nodes. A node
/// placed under several parents is entered once per placement.
pub trait TreeVisitor {
    /// Called when entering a node (before processing its children).
    ///
    /// Returns true to continue traversing children, false to skip the subtree.
    fn enter_node(&mut self, node: &Node) -> bool;

    /// Called when exiting a node (after processing its children).
    fn exit_node(&mut self, node: &Node);
}

/// Walks the scene graph starting from a given node.
pub fn walk_tree<V: TreeVisitor>(scene: &Scene, node_id: NodeId, visitor: &mut V) {
    let node = match scene.get_node(node_id) {
        Some(n) => n,
        None => return,
    };

    let should_visit_children = visitor.enter_node(node);

    if should_visit_children {
        for &child_id in node.children() {
            walk_tree(scene, child_id, visitor);
        }
    }

    visitor.exit_node(node);
}

/// Collects the full `/`-separated path of every placement of every node.
#[derive(Default)]
pub(super) struct PathCollector {
    stack: Vec<String>,
    pub paths: Vec<String>,
}

impl TreeVisitor for PathCollector {
    fn enter_node(&mut self, node: &Node) -> bool {
        self.stack.push(node.name_or_empty().to_string());
        self.paths.push(self.stack.join("/"));
        true
    }

    fn exit_node(&mut self, _node: &Node) {
        self.stack.pop();
    }
}

/// Collects every node reachable from the walk root, including the root.
#[derive(Default)]
pub(super) struct DescendantCollector {
    pub found: Vec<NodeId>,
}

impl TreeVisitor for DescendantCollector {
    fn enter_node(&mut self, node: &Node) -> bool {
        if self.found.contains(&node.id) {
            return false;
        }
        self.found.push(node.id);
        true
    }

    fn exit_node(&mut self, _node: &Node) {}
}
