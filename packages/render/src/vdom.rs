use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual DOM node
///
/// Attributes and styles are ordered maps so that rendering the same
/// content always yields byte-identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<VNode>,
    },

    /// Text node
    Text { content: String },

    /// Comment node
    Comment { content: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        VNode::Comment {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    /// Boolean attribute (`checked`, `selected`, ...), only set when `on`
    pub fn with_flag(self, key: impl Into<String>, on: bool) -> Self {
        if on {
            self.with_attr(key, "")
        } else {
            self
        }
    }

    /// Append a class name to the `class` attribute
    pub fn with_class(mut self, class: impl AsRef<str>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            let class = class.as_ref();
            attributes
                .entry("class".to_string())
                .and_modify(|existing| {
                    existing.push(' ');
                    existing.push_str(class);
                })
                .or_insert_with(|| class.to_string());
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: impl IntoIterator<Item = VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    /// Element with a single text child
    pub fn text_element(tag: impl Into<String>, content: impl Into<String>) -> Self {
        VNode::element(tag).with_child(VNode::text(content))
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn style(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { styles, .. } => styles.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Concatenated text of this node and all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            VNode::Text { content } => out.push_str(content),
            VNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            VNode::Comment { .. } => {}
        }
    }

    /// Depth-first search for the first node matching `predicate`
    pub fn find(&self, predicate: &dyn Fn(&VNode) -> bool) -> Option<&VNode> {
        if predicate(self) {
            return Some(self);
        }
        self.children()
            .iter()
            .find_map(|child| child.find(predicate))
    }

    /// All nodes matching `predicate`, depth-first
    pub fn find_all(&self, predicate: &dyn Fn(&VNode) -> bool) -> Vec<&VNode> {
        let mut found = Vec::new();
        self.collect_matching(predicate, &mut found);
        found
    }

    fn collect_matching<'a>(&'a self, predicate: &dyn Fn(&VNode) -> bool, found: &mut Vec<&'a VNode>) {
        if predicate(self) {
            found.push(self);
        }
        for child in self.children() {
            child.collect_matching(predicate, found);
        }
    }

    /// First element carrying `class`
    pub fn find_class(&self, class: &str) -> Option<&VNode> {
        self.find(&|node| node.has_class(class))
    }
}
