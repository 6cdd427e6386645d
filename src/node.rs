//! Output markup tree.
//!
//! A tree is built fresh for every document and turned into an HTML
//! fragment with [`MarkupNode::to_html`]. Text and attribute values are
//! written as-is, without escaping.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Attribute pairs, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn write_to(&self, out: &mut String) {
        for (key, value) in self.iter() {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
}

/// A value-bearing leaf. Without a tag it renders as bare text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

/// A tagged node holding an ordered list of children.
///
/// `children: None` (never set) is distinct from `Some(vec![])`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerNode {
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub children: Option<Vec<MarkupNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarkupNode {
    Value(ValueNode),
    Container(ContainerNode),
}

impl MarkupNode {
    /// Untagged text.
    pub fn text(value: impl Into<String>) -> Self {
        MarkupNode::Value(ValueNode {
            tag: None,
            value: Some(value.into()),
            attributes: None,
        })
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        MarkupNode::Value(ValueNode {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attributes: None,
        })
    }

    pub fn container(tag: impl Into<String>, children: Vec<MarkupNode>) -> Self {
        MarkupNode::Container(ContainerNode {
            tag: Some(tag.into()),
            children: Some(children),
            attributes: None,
        })
    }

    pub fn with_attributes(mut self, attrs: Attributes) -> Self {
        match &mut self {
            MarkupNode::Value(node) => node.attributes = Some(attrs),
            MarkupNode::Container(node) => node.attributes = Some(attrs),
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            MarkupNode::Value(node) => node.tag.as_deref(),
            MarkupNode::Container(node) => node.tag.as_deref(),
        }
    }

    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            MarkupNode::Value(node) => node.attributes.as_ref(),
            MarkupNode::Container(node) => node.attributes.as_ref(),
        }
    }

    /// Children of a container; empty for value nodes.
    pub fn children(&self) -> &[MarkupNode] {
        match self {
            MarkupNode::Container(ContainerNode {
                children: Some(children),
                ..
            }) => children,
            _ => &[],
        }
    }

    /// Render the tree as an HTML fragment.
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        match self {
            MarkupNode::Value(node) => {
                let value = node
                    .value
                    .as_deref()
                    .ok_or(Error::InvalidNode("leaf nodes must have a value"))?;
                match &node.tag {
                    None => out.push_str(value),
                    Some(tag) => {
                        open_tag(tag, node.attributes.as_ref(), out);
                        out.push_str(value);
                        close_tag(tag, out);
                    }
                }
            }
            MarkupNode::Container(node) => {
                let tag = node
                    .tag
                    .as_deref()
                    .ok_or(Error::InvalidNode("parent nodes must have a tag"))?;
                let children = node
                    .children
                    .as_ref()
                    .ok_or(Error::InvalidNode("parent nodes must have children"))?;
                open_tag(tag, node.attributes.as_ref(), out);
                for child in children {
                    child.write_html(out)?;
                }
                close_tag(tag, out);
            }
        }
        Ok(())
    }
}

fn open_tag(tag: &str, attrs: Option<&Attributes>, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    if let Some(attrs) = attrs {
        attrs.write_to(out);
    }
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_untagged_value_is_verbatim() {
        let node = MarkupNode::text("Hello, <world> & \"friends\"");
        assert_eq!(node.to_html().unwrap(), "Hello, <world> & \"friends\"");
    }

    #[test]
    fn test_tagged_value() {
        assert_eq!(MarkupNode::leaf("b", "bold").to_html().unwrap(), "<b>bold</b>");
    }

    #[test]
    fn test_value_with_attributes() {
        let node = MarkupNode::leaf("a", "link")
            .with_attributes(Attributes::new().with("href", "https://example.com"));
        assert_eq!(
            node.to_html().unwrap(),
            r#"<a href="https://example.com">link</a>"#
        );
    }

    #[test]
    fn test_attributes_keep_insertion_order() {
        let node = MarkupNode::leaf("img", "")
            .with_attributes(Attributes::new().with("src", "/a.png").with("alt", "a \"quoted\""));
        assert_eq!(
            node.to_html().unwrap(),
            r#"<img src="/a.png" alt="a "quoted""></img>"#
        );
    }

    #[test]
    fn test_nested_containers() {
        let node = MarkupNode::container(
            "div",
            vec![
                MarkupNode::container(
                    "p",
                    vec![MarkupNode::text("Some "), MarkupNode::leaf("i", "text")],
                ),
                MarkupNode::container("ul", vec![MarkupNode::container("li", vec![])]),
            ],
        );
        assert_eq!(
            node.to_html().unwrap(),
            "<div><p>Some <i>text</i></p><ul><li></li></ul></div>"
        );
    }

    #[test]
    fn test_container_attributes() {
        let node = MarkupNode::container("div", vec![MarkupNode::text("x")])
            .with_attributes(Attributes::new().with("class", "page").with("id", "main"));
        assert_eq!(
            node.to_html().unwrap(),
            r#"<div class="page" id="main">x</div>"#
        );
    }

    #[test]
    fn test_value_without_value_fails() {
        let node = MarkupNode::Value(ValueNode {
            tag: Some("b".into()),
            ..Default::default()
        });
        assert!(matches!(
            node.to_html(),
            Err(Error::InvalidNode("leaf nodes must have a value"))
        ));
    }

    #[test]
    fn test_container_without_tag_fails() {
        let node = MarkupNode::Container(ContainerNode {
            tag: None,
            children: Some(vec![]),
            attributes: None,
        });
        assert!(matches!(
            node.to_html(),
            Err(Error::InvalidNode("parent nodes must have a tag"))
        ));
    }

    #[test]
    fn test_container_with_unset_children_fails() {
        let node = MarkupNode::Container(ContainerNode {
            tag: Some("p".into()),
            children: None,
            attributes: None,
        });
        assert!(matches!(node.to_html(), Err(Error::InvalidNode(_))));

        let empty = MarkupNode::container("p", vec![]);
        assert_eq!(empty.to_html().unwrap(), "<p></p>");
    }

    #[test]
    fn test_invalid_child_fails_whole_tree() {
        let node = MarkupNode::container(
            "div",
            vec![MarkupNode::text("ok"), MarkupNode::Value(ValueNode::default())],
        );
        assert!(matches!(node.to_html(), Err(Error::InvalidNode(_))));
    }

    #[test]
    fn test_json_round_trip_distinguishes_unset_children() {
        let unset: MarkupNode = serde_json::from_str(r#"{"type":"container","tag":"p"}"#).unwrap();
        assert!(matches!(unset.to_html(), Err(Error::InvalidNode(_))));

        let empty: MarkupNode =
            serde_json::from_str(r#"{"type":"container","tag":"p","children":[]}"#).unwrap();
        assert_eq!(empty.to_html().unwrap(), "<p></p>");
    }

    #[test]
    fn test_json_preserves_attribute_order() {
        let node = MarkupNode::leaf("img", "")
            .with_attributes(Attributes::new().with("src", "s").with("alt", "a"));
        let json = serde_json::to_string(&node).unwrap();
        let back: MarkupNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
        assert_eq!(back.to_html().unwrap(), r#"<img src="s" alt="a"></img>"#);
    }
}
