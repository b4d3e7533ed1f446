//! Skeleton hierarchy
//!
//! The skeleton mirrors the imported scene graph: every node carries its
//! bind-pose local transform and exclusively owns its children, so the tree
//! is acyclic with a single root by construction.

use glam::Mat4;

/// A node of the skeleton hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonNode {
    /// Node name, matched against channel and bone names
    pub name: String,
    /// Bind-pose transform relative to the parent node
    pub local_bind_transform: Mat4,
    /// Child nodes in import order
    pub children: Vec<SkeletonNode>,
}

impl SkeletonNode {
    /// Create a leaf node
    pub fn new(name: impl Into<String>, local_bind_transform: Mat4) -> Self {
        Self {
            name: name.into(),
            local_bind_transform,
            children: Vec::new(),
        }
    }

    /// Append a child, builder style
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child
    pub fn push_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Number of levels in the tree, counting this node as 1
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        max_depth
    }

    /// Total number of nodes including this one
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// First node with the given name in pre-order
    pub fn find(&self, name: &str) -> Option<&Self> {
        self.iter().find(|node| node.name == name)
    }

    /// Depth-first, pre-order iterator over this node and its descendants
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }
}

impl<'a> IntoIterator for &'a SkeletonNode {
    type Item = &'a SkeletonNode;
    type IntoIter = PreOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order traversal of a skeleton, children visited in stored order
pub struct PreOrder<'a> {
    stack: Vec<&'a SkeletonNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a SkeletonNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
