// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Navigable document tree
//!
//! Every parse mode builds the same `ego_tree::Tree<NodeData>`. Nodes are
//! addressed by [`NodeId`] handles; parent links are handles too, so ancestor
//! scans never hold owning references.

use ego_tree::{NodeRef, Tree};

pub use ego_tree::NodeId;

/// Elements whose text never counts as page content
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "template", "noscript"];

#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    Element {
        name: String,
        attrs: Vec<(String, String)>,
        classes: Vec<String>,
    },
    Text(String),
}

/// Parsed markup as an acyclic tree with a single document root
#[derive(Debug, Clone)]
pub struct DocumentTree {
    tree: Tree<NodeData>,
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTree {
    pub fn new() -> Self {
        Self {
            tree: Tree::new(NodeData::Document),
        }
    }

    pub fn root(&self) -> NodeId {
        self.tree.root().id()
    }

    /// Append an element under `parent`. Tag names are stored lower-case.
    pub fn append_element<I, K, V>(&mut self, parent: NodeId, name: &str, attrs: I) -> NodeId
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let attrs: Vec<(String, String)> = attrs
            .into_iter()
            .map(|(k, v)| (k.into().to_lowercase(), v.into()))
            .collect();

        let mut classes: Vec<String> = Vec::new();
        if let Some((_, value)) = attrs.iter().find(|(k, _)| k == "class") {
            for class in value.split_whitespace() {
                if !classes.iter().any(|c| c == class) {
                    classes.push(class.to_string());
                }
            }
        }

        self.append(
            parent,
            NodeData::Element {
                name: name.to_lowercase(),
                attrs,
                classes,
            },
        )
    }

    /// Append a text run under `parent`, merging with a preceding text sibling
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(mut node) = self.tree.get_mut(parent) {
            if let Some(mut last) = node.last_child() {
                if let NodeData::Text(existing) = last.value() {
                    existing.push_str(text);
                    return;
                }
            }
        }
        self.append(parent, NodeData::Text(text.to_string()));
    }

    // Unknown handles attach to the document root
    fn append(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        match self.tree.get_mut(parent) {
            Some(mut node) => node.append(data).id(),
            None => self.tree.root_mut().append(data).id(),
        }
    }

    fn node(&self, id: NodeId) -> Option<NodeRef<'_, NodeData>> {
        self.tree.get(id)
    }

    /// Tag name, `None` for text and the document root
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.node(id)?.value() {
            NodeData::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.tag(id).is_some()
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match self.node(id)?.value() {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Class list in source order. Empty for nodes without classes.
    pub fn classes(&self, id: NodeId) -> &[String] {
        match self.node(id).map(|node| node.value()) {
            Some(NodeData::Element { classes, .. }) => classes,
            _ => &[],
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).iter().any(|c| c == class)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent().map(|p| p.id())
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id)
            .into_iter()
            .flat_map(|node| node.children())
            .map(|child| child.id())
    }

    /// Ancestors of `id`, nearest first, ending at the document root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id)
            .into_iter()
            .flat_map(|node| node.ancestors())
            .map(|ancestor| ancestor.id())
    }

    /// All nodes below `id` in document order, `id` itself excluded
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id)
            .into_iter()
            .flat_map(|node| node.descendants().skip(1))
            .map(|descendant| descendant.id())
    }

    /// Concatenated text of every descendant text run
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack: Vec<NodeRef<'_, NodeData>> = self.node(id).into_iter().collect();
        while let Some(current) = stack.pop() {
            match current.value() {
                NodeData::Text(text) => out.push_str(text),
                NodeData::Element { name, .. } if NON_CONTENT_TAGS.contains(&name.as_str()) => {}
                _ => stack.extend(current.children().rev()),
            }
        }
        out
    }

    /// First element in document order satisfying `predicate`
    pub fn find_first<F>(&self, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Self, NodeId) -> bool,
    {
        self.descendants(self.root())
            .find(|&id| self.is_element(id) && predicate(self, id))
    }

    pub fn find_first_tag(&self, tag: &str) -> Option<NodeId> {
        self.find_first(|tree, id| tree.tag(id) == Some(tag))
    }
}
