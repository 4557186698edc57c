//! Serialization of the arena DOM back to HTML text.

use std::io;

use html5ever::serialize::{
    Serialize, SerializeOpts, Serializer, TraversalScope, serialize,
};

use crate::error::Result;

use super::{Dom, NodeData, NodeId};

/// A node borrowed for serialization.
struct SerializableNode<'a> {
    dom: &'a Dom,
    id: NodeId,
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        match traversal_scope {
            TraversalScope::IncludeNode => serialize_into(self.dom, self.id, serializer),
            TraversalScope::ChildrenOnly(_) => {
                for child in self.dom.children(self.id) {
                    serialize_into(self.dom, child, serializer)?;
                }
                Ok(())
            }
        }
    }
}

fn serialize_into<S>(dom: &Dom, id: NodeId, serializer: &mut S) -> io::Result<()>
where
    S: Serializer,
{
    let Some(node) = dom.get(id) else {
        return Ok(());
    };

    match &node.data {
        NodeData::Document => {
            for child in dom.children(id) {
                serialize_into(dom, child, serializer)?;
            }
            Ok(())
        }
        NodeData::Element { name, attrs, .. } => {
            serializer.start_elem(
                name.clone(),
                attrs.iter().map(|a| (&a.name, a.value.as_str())),
            )?;
            for child in dom.children(id) {
                serialize_into(dom, child, serializer)?;
            }
            serializer.end_elem(name.clone())
        }
        NodeData::Text(text) => serializer.write_text(text),
        NodeData::Comment(text) => serializer.write_comment(text),
        NodeData::Doctype { name, .. } => serializer.write_doctype(name),
    }
}

/// Serialize a node and its subtree.
pub fn serialize_node(dom: &Dom, id: NodeId) -> Result<String> {
    let mut bytes = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    serialize(&mut bytes, &SerializableNode { dom, id }, opts)?;
    Ok(String::from_utf8(bytes)?)
}

/// Serialize only a node's children (inner HTML). For the document node this
/// yields the whole page.
pub fn serialize_children(dom: &Dom, id: NodeId) -> Result<String> {
    let mut bytes = Vec::new();
    serialize(&mut bytes, &SerializableNode { dom, id }, SerializeOpts::default())?;
    Ok(String::from_utf8(bytes)?)
}
