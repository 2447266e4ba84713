// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A mutable SVG document.
//!
//! Unlike a renderer tree, nothing here is resolved: elements and attributes
//! are stored exactly as they were written, so the document can be written
//! back after plugins have edited it.

mod names;
mod parse;

pub use names::*;

/// The SVG namespace.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
/// The XLink namespace.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// A node handle.
///
/// Stays valid for the whole life of a `Document`, even after the node was detached.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn get_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for NodeId {
    #[inline]
    fn from(id: usize) -> Self {
        // We do not allow more than 1_000_000 nodes, so this cannot overflow.
        NodeId(id as u32)
    }
}

/// A node kind.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum NodeKind {
    Root,
    Element(Element),
    Text(String),
    Comment(String),
    ProcessingInstruction { target: String, value: Option<String> },
}

/// An attribute.
#[derive(Clone, PartialEq, Debug)]
pub struct Attribute {
    /// A qualified name, like `fill` or `xlink:href`.
    pub name: String,
    /// A raw value.
    pub value: String,
}

/// An element.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Element {
    /// A qualified name, like `path` or `sodipodi:namedview`.
    pub name: String,
    /// Attributes in the document order.
    ///
    /// Namespace declarations are stored as `xmlns` and `xmlns:*` attributes.
    pub attributes: Vec<Attribute>,
}

impl Element {
    /// Creates a new element without attributes.
    pub fn new(name: &str) -> Self {
        Element {
            name: name.to_string(),
            attributes: Vec::new(),
        }
    }

    /// Returns the name without a prefix.
    pub fn local_name(&self) -> &str {
        split_name(&self.name).1
    }

    /// Returns the name prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        split_name(&self.name).0
    }

    /// Checks that the element has the specified unprefixed name.
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Returns an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Checks that the element has an attribute.
    #[inline]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Sets an attribute, keeping its position when it already exists.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Removes an attribute and returns its value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let idx = self.attributes.iter().position(|a| a.name == name)?;
        Some(self.attributes.remove(idx).value)
    }

    /// Returns the `href` value, preferring the SVG 2 form over `xlink:href`.
    pub fn href(&self) -> Option<&str> {
        self.attribute("href").or_else(|| self.attribute("xlink:href"))
    }
}

/// Splits a qualified name into a prefix and a local name.
pub fn split_name(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

struct NodeData {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// An SVG document.
pub struct Document {
    nodes: Vec<NodeData>,
    /// The `<?xml ...?>` declaration as written in the source.
    pub declaration: Option<String>,
    /// The `<!DOCTYPE ...>` declaration as written in the source.
    pub doctype: Option<String>,
}

impl Document {
    /// Parses a `Document` from a string.
    pub fn parse(text: &str) -> Result<Document, crate::Error> {
        parse::parse(text)
    }

    /// Parses a `Document` from raw data.
    pub fn from_data(data: &[u8]) -> Result<Document, crate::Error> {
        let text = std::str::from_utf8(data).map_err(|_| crate::Error::NotAnUtf8Str)?;
        Self::parse(text)
    }

    fn new() -> Self {
        Document {
            nodes: vec![NodeData {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Root,
            }],
            declaration: None,
            doctype: None,
        }
    }

    /// Returns the root node id.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the `svg` element.
    pub fn root_element(&self) -> NodeId {
        // `unwrap` is safe, because `Document` is guarantee to have an `svg` element.
        self.children(self.root())
            .iter()
            .copied()
            .find(|id| self.is_element(*id))
            .unwrap()
    }

    /// Returns a read-only view of a node.
    #[inline]
    pub fn node(&self, id: NodeId) -> Node {
        Node { id, doc: self }
    }

    /// Returns a node kind.
    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.get_usize()].kind
    }

    /// Returns a mutable node kind.
    #[inline]
    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.get_usize()].kind
    }

    /// Returns element data when the node is an element.
    #[inline]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.kind(id) {
            NodeKind::Element(ref e) => Some(e),
            _ => None,
        }
    }

    /// Returns mutable element data when the node is an element.
    #[inline]
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.kind_mut(id) {
            NodeKind::Element(ref mut e) => Some(e),
            _ => None,
        }
    }

    /// Checks that the node is an element.
    #[inline]
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Element(_))
    }

    /// Checks that the node is an element with the specified name.
    #[inline]
    pub fn is_tag(&self, id: NodeId, name: &str) -> bool {
        self.element(id).map(|e| e.is(name)) == Some(true)
    }

    /// Returns an element attribute.
    #[inline]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attribute(name)
    }

    /// Returns node children.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.get_usize()].children
    }

    /// Returns element children.
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.is_element(*c))
            .collect()
    }

    /// Returns the parent node.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.get_usize()].parent
    }

    /// Returns node ancestors, starting with the node itself.
    pub fn ancestors(&self, id: NodeId) -> Ancestors {
        Ancestors {
            doc: self,
            next: Some(id),
        }
    }

    /// Returns the node and all of its descendants in the document order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut list = Vec::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            list.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }

        list
    }

    /// Returns all attached elements in the document order.
    pub fn elements(&self) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| self.is_element(*id))
            .collect()
    }

    /// Checks that the node is still a part of the document.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.ancestors(id).last() == Some(self.root())
    }

    /// Returns the node position in the parent children list.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    /// Returns a concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        for child in self.descendants(id) {
            if let NodeKind::Text(ref s) = self.kind(child) {
                text.push_str(s);
            }
        }

        text
    }

    /// Returns the number of nodes ever created, detached ones included.
    #[inline]
    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    /// Appends a new node.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let idx = self.children(parent).len();
        self.insert(parent, idx, kind)
    }

    /// Inserts a new node at the specified children position.
    pub fn insert(&mut self, parent: NodeId, index: usize, kind: NodeKind) -> NodeId {
        let id = NodeId::from(self.nodes.len());
        self.nodes.push(NodeData {
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self.nodes[parent.get_usize()].children.insert(index, id);
        id
    }

    /// Removes the node from its parent.
    ///
    /// The node and its subtree are still accessible via `NodeId`,
    /// but no longer reachable from the root.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            self.nodes[parent.get_usize()].children.retain(|c| *c != id);
        }

        self.nodes[id.get_usize()].parent = None;
    }

    /// Moves an existing node to a new position.
    pub fn move_to(&mut self, id: NodeId, new_parent: NodeId, index: usize) {
        self.detach(id);
        let index = index.min(self.children(new_parent).len());
        self.nodes[new_parent.get_usize()].children.insert(index, id);
        self.nodes[id.get_usize()].parent = Some(new_parent);
    }

    /// Replaces a node with its children.
    pub fn ungroup(&mut self, id: NodeId) {
        let parent = match self.parent(id) {
            Some(v) => v,
            None => return,
        };

        // `unwrap` is safe, because the node has a parent.
        let mut idx = self.index_in_parent(id).unwrap();
        let children = self.children(id).to_vec();
        for child in children {
            idx += 1;
            self.move_to(child, parent, idx);
        }

        self.detach(id);
    }

    /// Moves all child elements of `parent` into a newly created element,
    /// which is appended to `parent`.
    ///
    /// Text, comments and processing instructions stay in `parent`.
    pub fn wrap_children(&mut self, parent: NodeId, wrapper: Element) -> NodeId {
        let children: Vec<NodeId> = self
            .children(parent)
            .iter()
            .copied()
            .filter(|id| self.is_element(*id))
            .collect();
        let new_id = self.append(parent, NodeKind::Element(wrapper));
        for child in children {
            let len = self.children(new_id).len();
            self.move_to(child, new_id, len);
        }

        new_id
    }

    /// Removes all nodes under `root` for which `f` returns `true`.
    ///
    /// Children of a removed node are not visited.
    /// Returns the number of removed nodes.
    pub fn drain<F>(&mut self, root: NodeId, mut f: F) -> usize
    where
        F: FnMut(&Document, NodeId) -> bool,
    {
        let mut count = 0;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if id != root && f(self, id) {
                self.detach(id);
                count += 1;
                continue;
            }

            stack.extend(self.children(id).iter().rev().copied());
        }

        count
    }

    /// Removes all attached nodes for which `f` returns `true`.
    pub fn remove_all<F>(&mut self, f: F) -> usize
    where
        F: FnMut(&Document, NodeId) -> bool,
    {
        let root = self.root();
        self.drain(root, f)
    }

    /// Changes an element name.
    pub fn rename(&mut self, id: NodeId, name: &str) {
        if let Some(e) = self.element_mut(id) {
            e.name = name.to_string();
        }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        fn print_children(
            doc: &Document,
            parent: NodeId,
            depth: usize,
            f: &mut std::fmt::Formatter,
        ) -> Result<(), std::fmt::Error> {
            for child in doc.children(parent) {
                for _ in 0..depth {
                    write!(f, "    ")?;
                }

                match doc.kind(*child) {
                    NodeKind::Element(ref e) => {
                        writeln!(f, "{} {:?}", e.name, e.attributes)?;
                        print_children(doc, *child, depth + 1, f)?;
                    }
                    kind => writeln!(f, "{:?}", kind)?,
                }
            }

            Ok(())
        }

        writeln!(f, "Document [")?;
        print_children(self, self.root(), 1, f)?;
        writeln!(f, "]")
    }
}

/// An iterator over node ancestors.
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.doc.parent(id);
        Some(id)
    }
}

impl std::fmt::Debug for Ancestors<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Ancestors({:?})", self.next)
    }
}

/// A read-only node view.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    id: NodeId,
    doc: &'a Document,
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.doc.element(self.id) {
            Some(e) => write!(f, "Element({:?}, {})", self.id, e.name),
            None => write!(f, "Node({:?})", self.id),
        }
    }
}

impl<'a> Node<'a> {
    /// Returns the node id.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the element data.
    #[inline]
    pub fn element(&self) -> Option<&'a Element> {
        self.doc.element(self.id)
    }

    /// Returns an attribute value.
    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.element()?.attribute(name)
    }

    /// Returns the parent element.
    pub fn parent_element(&self) -> Option<Node<'a>> {
        self.doc
            .ancestors(self.id)
            .skip(1)
            .find(|id| self.doc.is_element(*id))
            .map(|id| self.doc.node(id))
    }

    /// Returns the previous sibling element.
    pub fn prev_sibling_element(&self) -> Option<Node<'a>> {
        let parent = self.doc.parent(self.id)?;
        let siblings = self.doc.children(parent);
        let idx = siblings.iter().position(|c| *c == self.id)?;
        siblings[..idx]
            .iter()
            .rev()
            .find(|id| self.doc.is_element(**id))
            .map(|id| self.doc.node(*id))
    }
}

impl simplecss::Element for Node<'_> {
    fn parent_element(&self) -> Option<Self> {
        Node::parent_element(self)
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        Node::prev_sibling_element(self)
    }

    fn has_local_name(&self, local_name: &str) -> bool {
        self.element().map(|e| e.local_name() == local_name) == Some(true)
    }

    fn attribute_matches(&self, local_name: &str, operator: simplecss::AttributeOperator) -> bool {
        match self.attribute(local_name) {
            Some(value) => operator.matches(value),
            None => false,
        }
    }

    fn pseudo_class_matches(&self, class: simplecss::PseudoClass) -> bool {
        match class {
            simplecss::PseudoClass::FirstChild => self.prev_sibling_element().is_none(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ungroup_keeps_order() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'><rect/><g><circle/><path/></g><line/></svg>",
        )
        .unwrap();
        let svg = doc.root_element();
        let g = doc.children(svg)[1];
        doc.ungroup(g);

        let names: Vec<_> = doc
            .children(svg)
            .iter()
            .map(|id| doc.element(*id).unwrap().name.clone())
            .collect();
        assert_eq!(names, ["rect", "circle", "path", "line"]);
        assert!(!doc.is_attached(g));
    }

    #[test]
    fn wrap_children_moves_elements() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'><!-- c --><rect/><circle/></svg>",
        )
        .unwrap();
        let svg = doc.root_element();
        let g = doc.wrap_children(svg, Element::new("g"));

        assert_eq!(doc.children(svg).len(), 2);
        assert!(matches!(doc.kind(doc.children(svg)[0]), NodeKind::Comment(_)));
        assert_eq!(doc.children(svg)[1], g);
        assert_eq!(doc.children(g).len(), 2);
    }

    #[test]
    fn node_debug() {
        let doc = Document::parse("<svg xmlns='http://www.w3.org/2000/svg'><rect/></svg>").unwrap();
        let svg = doc.root_element();
        let rect = doc.children(svg)[0];
        assert!(format!("{:?}", doc.node(rect)).ends_with(", rect)"));
        assert!(format!("{:?}", doc.ancestors(rect)).starts_with("Ancestors(Some("));
    }

    #[test]
    fn drain_skips_subtrees() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'><g><g/></g><rect/></svg>",
        )
        .unwrap();
        let root = doc.root();
        let count = doc.drain(root, |doc, id| doc.is_tag(id, "g"));
        assert_eq!(count, 1);
        assert_eq!(doc.elements().len(), 2);
    }
}
