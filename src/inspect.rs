// Copyright 2025 Cowboy AI, LLC.

//! Read-only introspection of a wired chain.
//!
//! Every node can describe itself and, recursively, everything subscribed
//! below it. The description is plain data: it can be rendered as an
//! indented tree for humans or serialized for tooling. Nothing in the push
//! path looks at it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identifiers::NodeId;

/// Role of a node in a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum NodeKind {
    /// Chain head holding the value to push
    Source,
    /// Transform node, both subscriber and publisher
    Step,
    /// Terminal consumer
    Sink,
    /// A user-supplied subscriber that does not describe itself
    Opaque,
}

/// Snapshot of one node and the subtree wired below it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NodeDescription {
    /// Node identity, if the node has one
    pub id: Option<NodeId>,
    /// Role of the node
    pub kind: NodeKind,
    /// Short type name of the node
    pub name: String,
    /// Payload type received from upstream
    pub input: Option<String>,
    /// Payload type pushed downstream
    pub output: Option<String>,
    /// Downstream subscribers in registration order
    pub subscribers: Vec<NodeDescription>,
}

impl NodeDescription {
    /// Describe a subscriber that knows nothing about itself beyond its type
    pub fn opaque(name: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            id: None,
            kind: NodeKind::Opaque,
            name: name.into(),
            input: Some(input.into()),
            output: None,
            subscribers: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, this node included
    pub fn node_count(&self) -> usize {
        1 + self
            .subscribers
            .iter()
            .map(NodeDescription::node_count)
            .sum::<usize>()
    }

    /// Length of the longest path from this node to a leaf, in nodes
    pub fn depth(&self) -> usize {
        1 + self
            .subscribers
            .iter()
            .map(NodeDescription::depth)
            .max()
            .unwrap_or(0)
    }

    /// One-line label such as `Step<i32 -> f64> #1a2b3c4d`
    pub fn label(&self) -> String {
        let types = match (&self.input, &self.output) {
            (Some(i), Some(o)) => format!("<{i} -> {o}>"),
            (Some(t), None) | (None, Some(t)) => format!("<{t}>"),
            (None, None) => String::new(),
        };
        match &self.id {
            Some(id) => format!("{}{} #{}", self.name, types, id.short()),
            None => format!("{}{}", self.name, types),
        }
    }

    /// Render the subtree as an indented tree, one node per line
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, level: usize) {
        out.push_str(&"    ".repeat(level));
        out.push_str(&self.label());
        out.push('\n');
        for subscriber in &self.subscribers {
            subscriber.render_into(out, level + 1);
        }
    }
}

impl fmt::Display for NodeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Short form of a type name: module paths are dropped, generics kept.
///
/// `core::option::Option<alloc::string::String>` becomes `Option<String>`.
pub fn short_type_name<T: ?Sized>() -> String {
    shorten(std::any::type_name::<T>())
}

fn shorten(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    let mut chars = full.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                segment.clear();
            }
            c if c.is_alphanumeric() || c == '_' => segment.push(c),
            c => {
                out.push_str(&segment);
                segment.clear();
                out.push(c);
            }
        }
    }
    out.push_str(&segment);
    out
}
