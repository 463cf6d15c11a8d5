//! Render tree and html serialization.
//!
//! The tree is built bottom-up once, never mutated, and serialized once.
//! Values and attribute values are emitted verbatim (no html escaping).

use smallvec::SmallVec;

use super::RenderError;

/// Ordered attribute list, serialized in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs(SmallVec<[(String, String); 2]>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, keeping the original position of an existing key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn write_html(&self, out: &mut String) {
        for (key, value) in self.iter() {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}

/// A node holding a single value. Without a tag it is raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub tag: Option<String>,
    pub value: String,
    pub attrs: Attrs,
}

/// A tagged node wrapping an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub tag: String,
    pub children: Vec<RenderNode>,
    pub attrs: Attrs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNode {
    Leaf(Leaf),
    Container(Container),
}

impl RenderNode {
    /// Untagged leaf, serialized as its raw value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Leaf(Leaf {
            tag: None,
            value: value.into(),
            attrs: Attrs::new(),
        })
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Leaf(Leaf {
            tag: Some(tag.into()),
            value: value.into(),
            attrs: Attrs::new(),
        })
    }

    pub fn container(tag: impl Into<String>, children: Vec<RenderNode>) -> Self {
        Self::Container(Container {
            tag: tag.into(),
            children,
            attrs: Attrs::new(),
        })
    }

    /// Replace the node's attributes.
    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        match &mut self {
            Self::Leaf(leaf) => leaf.attrs = attrs,
            Self::Container(container) => container.attrs = attrs,
        }
        self
    }

    #[cfg(test)]
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Leaf(leaf) => leaf.tag.as_deref(),
            Self::Container(container) => Some(&container.tag),
        }
    }

    #[cfg(test)]
    pub fn attrs(&self) -> &Attrs {
        match self {
            Self::Leaf(leaf) => &leaf.attrs,
            Self::Container(container) => &container.attrs,
        }
    }

    #[cfg(test)]
    pub fn children(&self) -> &[RenderNode] {
        match self {
            Self::Leaf(_) => &[],
            Self::Container(container) => &container.children,
        }
    }

    /// Serialize the tree depth-first.
    ///
    /// Fails with [`RenderError::MissingTag`] if a container (or a tagged
    /// leaf) carries an empty tag.
    pub fn to_html(&self) -> Result<String, RenderError> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<(), RenderError> {
        match self {
            Self::Leaf(Leaf { tag: None, value, .. }) => out.push_str(value),
            Self::Leaf(Leaf {
                tag: Some(tag),
                value,
                attrs,
            }) => {
                open_tag(out, tag, attrs)?;
                out.push_str(value);
                close_tag(out, tag);
            }
            Self::Container(Container {
                tag,
                children,
                attrs,
            }) => {
                open_tag(out, tag, attrs)?;
                for child in children {
                    child.write_html(out)?;
                }
                close_tag(out, tag);
            }
        }
        Ok(())
    }
}

fn open_tag(out: &mut String, tag: &str, attrs: &Attrs) -> Result<(), RenderError> {
    if tag.is_empty() {
        return Err(RenderError::MissingTag);
    }
    out.push('<');
    out.push_str(tag);
    attrs.write_html(out);
    out.push('>');
    Ok(())
}

fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
