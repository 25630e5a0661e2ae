//! Indentation tree over the lines of a dumpsys section.
//!
//! Most `dumpsys` services print nested data by indenting child lines
//! further than their parent. [`DumpTree`] rebuilds that nesting in a
//! single pass. Nodes live in an arena owned by the tree and refer to
//! each other by [`NodeId`], so the parent link never owns anything.

/// Index of a node inside its [`DumpTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
struct DumpNode {
    line: String,
    depth: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpTree {
    // nodes[0] is the virtual root, it has no line and no parent
    nodes: Vec<DumpNode>,
}

impl DumpTree {
    pub const ROOT: NodeId = NodeId(0);

    /// Builds the tree from raw lines.
    ///
    /// A line becomes the child of the closest preceding line that is
    /// strictly less indented. Blank lines are skipped. Inconsistent
    /// indentation never fails, it just attaches to the nearest shallower
    /// ancestor.
    pub fn new<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut nodes = vec![DumpNode {
            line: String::new(),
            depth: 0,
            parent: None,
            children: Vec::new(),
        }];
        let mut open: Vec<NodeId> = vec![Self::ROOT];

        for raw in lines {
            let text = raw.trim();
            if text.is_empty() {
                continue;
            }
            let depth = raw.len() - raw.trim_start().len();

            while open.len() > 1 {
                let top = open[open.len() - 1];
                if nodes[top.0].depth >= depth {
                    open.pop();
                } else {
                    break;
                }
            }

            let parent = open[open.len() - 1];
            let id = NodeId(nodes.len());
            nodes.push(DumpNode {
                line: text.to_string(),
                depth,
                parent: Some(parent),
                children: Vec::new(),
            });
            nodes[parent.0].children.push(id);
            open.push(id);
        }

        Self { nodes }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }

    pub fn root(&self) -> Node<'_> {
        self.node(Self::ROOT)
    }

    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node { tree: self, id }
    }

    /// Number of real (non-root) nodes.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All real nodes in pre-order, which is also the original line order.
    pub fn iter(&self) -> impl Iterator<Item = Node<'_>> {
        (1..self.nodes.len()).map(move |i| self.node(NodeId(i)))
    }
}

/// Borrowed view of one node.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    tree: &'a DumpTree,
    id: NodeId,
}

impl<'a> Node<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Line text with its indentation stripped.
    pub fn line(&self) -> &'a str {
        &self.tree.nodes[self.id.0].line
    }

    pub fn depth(&self) -> usize {
        self.tree.nodes[self.id.0].depth
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        self.tree.nodes[self.id.0]
            .parent
            .map(|id| self.tree.node(id))
    }

    pub fn child_count(&self) -> usize {
        self.tree.nodes[self.id.0].children.len()
    }

    pub fn child(&self, index: usize) -> Option<Node<'a>> {
        self.tree.nodes[self.id.0]
            .children
            .get(index)
            .map(|&id| self.tree.node(id))
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        let tree = self.tree;
        tree.nodes[self.id.0]
            .children
            .iter()
            .map(move |&id| tree.node(id))
    }
}
