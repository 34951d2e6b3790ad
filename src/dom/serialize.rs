//! HTML serialization for the arena [`Document`].
//!
//! Drives html5ever's serializer over the arena, so escaping and void-element
//! handling follow the HTML spec exactly as for a parsed tree.

use std::io;

use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope, serialize};

use super::arena::{Document, NodeData, NodeId};
use crate::error::{Error, Result};

/// A node of a document, in a form html5ever can serialize.
pub struct SerializableNode<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> SerializableNode<'a> {
    pub fn new(doc: &'a Document, id: NodeId) -> Self {
        Self { doc, id }
    }
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let include_self = matches!(traversal_scope, TraversalScope::IncludeNode)
            && !matches!(
                self.doc.get(self.id).map(|n| &n.data),
                Some(NodeData::Document)
            );

        if include_self {
            write_node(self.doc, self.id, serializer)
        } else {
            for child in self.doc.children(self.id) {
                write_node(self.doc, child, serializer)?;
            }
            Ok(())
        }
    }
}

fn write_node<S: Serializer>(doc: &Document, id: NodeId, serializer: &mut S) -> io::Result<()> {
    let Some(node) = doc.get(id) else {
        return Ok(());
    };

    match &node.data {
        NodeData::Element { name, attrs, .. } => {
            serializer.start_elem(
                name.clone(),
                attrs.iter().map(|a| (&a.name, a.value.as_str())),
            )?;
            for child in doc.children(id) {
                write_node(doc, child, serializer)?;
            }
            serializer.end_elem(name.clone())
        }
        NodeData::Text(text) => serializer.write_text(text),
        NodeData::Comment(text) => serializer.write_comment(text),
        NodeData::Doctype(name) => serializer.write_doctype(name),
        NodeData::Document => {
            for child in doc.children(id) {
                write_node(doc, child, serializer)?;
            }
            Ok(())
        }
    }
}

impl Document {
    /// Serialize the whole document.
    pub fn to_html(&self) -> Result<String> {
        self.inner_html(self.root())
    }

    /// Serialize a node including its own tag.
    pub fn outer_html(&self, id: NodeId) -> Result<String> {
        self.serialize_scope(id, TraversalScope::IncludeNode)
    }

    /// Serialize only the children of a node.
    pub fn inner_html(&self, id: NodeId) -> Result<String> {
        self.serialize_scope(id, TraversalScope::ChildrenOnly(None))
    }

    fn serialize_scope(&self, id: NodeId, traversal_scope: TraversalScope) -> Result<String> {
        let mut bytes = Vec::new();
        let opts = SerializeOpts {
            traversal_scope,
            ..Default::default()
        };
        serialize(&mut bytes, &SerializableNode::new(self, id), opts).map_err(Error::Serialize)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
