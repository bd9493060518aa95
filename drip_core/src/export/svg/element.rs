//! Minimal SVG element tree.
//!
//! Elements keep attributes in insertion order and are serialized once, with
//! two-space indentation. Text and attribute values are escaped on output.

use crate::numfmt::num;

/// A child of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

/// One SVG element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Element {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Add a string attribute.
    pub fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((key, value.into()));
        self
    }

    /// Add a numeric attribute in shortest round-trip form.
    pub fn num(self, key: &'static str, value: f64) -> Self {
        self.attr(key, num(value))
    }

    /// Look up an attribute value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn comment(&mut self, text: impl Into<String>) {
        self.children.push(Node::Comment(text.into()));
    }

    /// Child elements, skipping text and comments.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Depth-first walk over this element and all descendants.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = vec![self];
        for child in self.elements() {
            out.extend(child.descendants());
        }
        out
    }

    pub(crate) fn write(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(self.name);
        for (key, value) in &self.attrs {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }

        if self.children.is_empty() {
            out.push_str("/>\n");
            return;
        }

        let inline = self.children.iter().all(|c| matches!(c, Node::Text(_)));
        if inline {
            out.push('>');
            for child in &self.children {
                if let Node::Text(text) = child {
                    out.push_str(&escape_text(text));
                }
            }
        } else {
            out.push_str(">\n");
            for child in &self.children {
                match child {
                    Node::Element(e) => e.write(out, depth + 1),
                    Node::Text(text) => {
                        out.push_str(&indent);
                        out.push_str("  ");
                        out.push_str(&escape_text(text));
                        out.push('\n');
                    }
                    Node::Comment(text) => {
                        out.push_str(&indent);
                        out.push_str("  <!-- ");
                        out.push_str(&text.replace("--", "- -"));
                        out.push_str(" -->\n");
                    }
                }
            }
            out.push_str(&indent);
        }
        out.push_str("</");
        out.push_str(self.name);
        out.push_str(">\n");
    }
}

/// Escape character data.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value (double-quoted).
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(e: &Element) -> String {
        let mut out = String::new();
        e.write(&mut out, 0);
        out
    }

    #[test]
    fn test_empty_element_self_closes() {
        let e = Element::new("circle").num("cx", 10.0).num("r", 4.0);
        assert_eq!(render(&e), "<circle cx=\"10\" r=\"4\"/>\n");
    }

    #[test]
    fn test_text_is_inline_and_escaped() {
        let e = Element::new("text").attr("class", "dim").text("L < 5 & W > 2");
        assert_eq!(render(&e), "<text class=\"dim\">L &lt; 5 &amp; W &gt; 2</text>\n");
    }

    #[test]
    fn test_nested_elements_indent() {
        let mut g = Element::new("g").attr("id", "a");
        g.comment("inner");
        g.push(Element::new("rect"));
        assert_eq!(render(&g), "<g id=\"a\">\n  <!-- inner -->\n  <rect/>\n</g>\n");
    }

    #[test]
    fn test_attribute_order_is_preserved() {
        let e = Element::new("line").num("x1", 1.0).num("y1", 2.0).num("x2", 3.0).num("y2", 4.0);
        assert_eq!(render(&e), "<line x1=\"1\" y1=\"2\" x2=\"3\" y2=\"4\"/>\n");
        assert_eq!(e.get("x2"), Some("3"));
    }

    #[test]
    fn test_attr_quotes_escaped() {
        assert_eq!(escape_attr("a\"b"), "a&quot;b");
    }
}
