//! Tree-to-HTML serialization.

use std::fmt::Write;

use arbor_tree::{Element, Node, Tree};

use crate::options::{ClosingSingleTag, RenderOptions};

/// Tags rendered as single (void) tags by default. The last three are
/// template-expansion tags that predate processing and must not grow
/// closing tags.
const DEFAULT_SINGLE_TAGS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "menuitem", "meta", "param", "source", "track", "wbr", "import", "include", "extend",
];

/// Render a tree to an HTML string.
///
/// Text nodes are emitted verbatim (the tree is trusted; comments and
/// directives are stored as text). Attribute values are escaped.
#[must_use]
pub fn render(tree: &Tree, options: &RenderOptions) -> String {
    let mut out = String::new();
    for node in &tree.nodes {
        render_node(node, options, &mut out);
    }
    out
}

fn render_node(node: &Node, options: &RenderOptions, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Element(el) => render_element(el, options, out),
    }
}

fn render_element(el: &Element, options: &RenderOptions, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    if let Some(attrs) = &el.attrs {
        for (name, value) in attrs {
            write!(out, r#" {name}="{}""#, escape_attr(value)).unwrap();
        }
    }

    if is_single_tag(&el.tag, options) {
        match options.closing_single_tag {
            ClosingSingleTag::Default => out.push('>'),
            ClosingSingleTag::Slash => out.push_str(" />"),
            ClosingSingleTag::Tag => {
                // Content, if any, goes inside the explicit closing tag.
                out.push('>');
                for child in &el.content {
                    render_node(child, options, out);
                }
                write!(out, "</{}>", el.tag).unwrap();
                return;
            }
        }
        // Never silently drop content a plugin attached to a single tag.
        for child in &el.content {
            render_node(child, options, out);
        }
    } else {
        out.push('>');
        for child in &el.content {
            render_node(child, options, out);
        }
        write!(out, "</{}>", el.tag).unwrap();
    }
}

fn is_single_tag(tag: &str, options: &RenderOptions) -> bool {
    DEFAULT_SINGLE_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
        || options.single_tags.iter().any(|p| p.matches(tag))
}

/// Escape an attribute value for inclusion in a double-quoted attribute.
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use arbor_tree::{Element, Node, Tree};
    use pretty_assertions::assert_eq;
    use regex::Regex;

    use super::*;
    use crate::options::TagPattern;

    fn rendered(nodes: Vec<Node>) -> String {
        render(&Tree::from_nodes(nodes), &RenderOptions::default())
    }

    #[test]
    fn test_simple_element() {
        assert_eq!(
            rendered(vec![Node::Element(Element::new("p").with_child("hi"))]),
            "<p>hi</p>"
        );
    }

    #[test]
    fn test_nested_elements() {
        assert_eq!(
            rendered(vec![
                Node::Element(
                    Element::new("div")
                        .with_child(Node::Element(Element::new("p").with_child("hi")))
                        .with_child("there"),
                ),
                Node::text("tail"),
            ]),
            "<div><p>hi</p>there</div>tail"
        );
    }

    #[test]
    fn test_attributes() {
        assert_eq!(
            rendered(vec![Node::Element(
                Element::new("p").with_attr("id", "x").with_attr("class", "y"),
            )]),
            r#"<p class="y" id="x"></p>"#
        );
    }

    #[test]
    fn test_attribute_value_escaped() {
        assert_eq!(
            rendered(vec![Node::Element(
                Element::new("a").with_attr("title", r#"a "b" & <c>"#),
            )]),
            r#"<a title="a &quot;b&quot; &amp; &lt;c&gt;"></a>"#
        );
    }

    #[test]
    fn test_empty_attribute_value() {
        assert_eq!(
            rendered(vec![Node::Element(Element::new("input").with_attr("disabled", ""))]),
            r#"<input disabled="">"#
        );
    }

    #[test]
    fn test_text_verbatim() {
        assert_eq!(
            rendered(vec![Node::text("<!DOCTYPE html>"), Node::text("a & b")]),
            "<!DOCTYPE html>a & b"
        );
    }

    #[test]
    fn test_single_tag_default() {
        assert_eq!(rendered(vec![Node::element("br")]), "<br>");
    }

    #[test]
    fn test_single_tag_slash() {
        let options = RenderOptions::new().with_closing_single_tag(ClosingSingleTag::Slash);
        assert_eq!(
            render(&Tree::from_nodes(vec![Node::element("br")]), &options),
            "<br />"
        );
    }

    #[test]
    fn test_single_tag_closing_tag_style() {
        let options = RenderOptions::new().with_closing_single_tag(ClosingSingleTag::Tag);
        assert_eq!(
            render(&Tree::from_nodes(vec![Node::element("br")]), &options),
            "<br></br>"
        );
    }

    #[test]
    fn test_custom_single_tag_by_name() {
        let options = RenderOptions::new().with_single_tag(TagPattern::name("icon"));
        assert_eq!(
            render(&Tree::from_nodes(vec![Node::element("icon")]), &options),
            "<icon>"
        );
    }

    #[test]
    fn test_custom_single_tag_by_pattern() {
        let options =
            RenderOptions::new().with_single_tag(TagPattern::Pattern(Regex::new("^x-").unwrap()));
        assert_eq!(
            render(&Tree::from_nodes(vec![Node::element("x-void")]), &options),
            "<x-void>"
        );
    }

    #[test]
    fn test_template_tags_are_single() {
        assert_eq!(
            rendered(vec![Node::Element(Element::new("include").with_attr("src", "a.html"))]),
            r#"<include src="a.html">"#
        );
    }
}
