/// Index of a node inside [`Tree::nodes`]. The root is always index 0.
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Root at the top, depth advances downward.
    Vertical,
    /// Root at the left, depth advances rightward.
    Horizontal,
}

impl Orientation {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "vertical" => Some(Self::Vertical),
            "horizontal" => Some(Self::Horizontal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub label: String,
    /// Explicit color override; `None` means "use the palette".
    pub color: Option<String>,
    /// Children in outline order.
    pub children: Vec<NodeId>,
}

/// Arena-allocated outline tree. Built by a single linear scan with a depth
/// stack, so it is acyclic and finite by construction; positions and other
/// per-node data are keyed by [`NodeId`] rather than by reference.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

pub const ROOT: NodeId = 0;

impl Tree {
    pub fn with_root(label: String, color: Option<String>) -> Self {
        Self {
            nodes: vec![Node {
                label,
                color,
                children: Vec::new(),
            }],
        }
    }

    pub fn add_child(&mut self, parent: NodeId, label: String, color: Option<String>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            label,
            color,
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: construction seeds the root and nodes are never
    /// removed. Exists to pair with [`Tree::len`].
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_tokens() {
        assert_eq!(
            Orientation::from_token("Horizontal"),
            Some(Orientation::Horizontal)
        );
        assert_eq!(
            Orientation::from_token(" vertical "),
            Some(Orientation::Vertical)
        );
        assert_eq!(Orientation::from_token("diagonal"), None);
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut tree = Tree::with_root("r".to_string(), None);
        let a = tree.add_child(ROOT, "a".to_string(), None);
        let b = tree.add_child(ROOT, "b".to_string(), None);
        assert_eq!(tree.node(ROOT).children, vec![a, b]);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn tree_always_has_its_root() {
        let tree = Tree::with_root("r".to_string(), None);
        assert!(!tree.is_empty());
        assert_eq!(tree.len(), 1);
    }
}
