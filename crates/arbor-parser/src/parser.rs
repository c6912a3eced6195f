//! Lenient HTML tokenizer and tree builder.
//!
//! The parser never fails: malformed markup degrades to text, unmatched
//! close tags are ignored, and anything left open at end of input is closed
//! implicitly.

use arbor_tree::{Attrs, Element, Node, Tree};

use crate::options::ParseOptions;

/// Elements that never take children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "menuitem", "meta", "param", "source", "track", "wbr",
];

/// Elements whose content is swallowed verbatim up to the matching close tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "title", "textarea"];

/// Parse an HTML document into a [`Tree`].
///
/// Parsing is lenient and infallible. Comments and directives matching
/// [`ParseOptions::directives`] are preserved as text nodes; entities are
/// left undecoded.
#[must_use]
pub fn parse(input: &str, options: &ParseOptions) -> Tree {
    Tree::from_nodes(Parser::new(input, options).run())
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    options: &'a ParseOptions,
    root: Vec<Node>,
    stack: Vec<Element>,
    // Pending character data, flushed when a node is produced or the
    // current container changes. Keeps runs split by stray `<` as one node.
    text_buf: String,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, options: &'a ParseOptions) -> Self {
        Self {
            input,
            pos: 0,
            options,
            root: Vec::new(),
            stack: Vec::new(),
            text_buf: String::new(),
        }
    }

    fn run(mut self) -> Vec<Node> {
        while self.pos < self.input.len() {
            if self.input.as_bytes()[self.pos] == b'<' {
                self.markup();
            } else {
                let end = self.input[self.pos..]
                    .find('<')
                    .map_or(self.input.len(), |off| self.pos + off);
                self.text_buf.push_str(&self.input[self.pos..end]);
                self.pos = end;
            }
        }
        // Close everything left open at end of input.
        self.flush_text();
        while let Some(el) = self.stack.pop() {
            self.push_node(Node::Element(el));
        }
        self.root
    }

    fn markup(&mut self) {
        let rest = &self.input[self.pos..];
        if rest.starts_with("<!--") {
            self.comment();
        } else if rest.starts_with("<!") {
            self.directive('!');
        } else if rest.starts_with("<?") {
            self.directive('?');
        } else if rest.starts_with("</") {
            self.close_tag();
        } else if rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
            self.open_tag();
        } else {
            // Stray '<' with no tag following, plain character data.
            self.pos += 1;
            self.text_buf.push('<');
        }
    }

    fn comment(&mut self) {
        let start = self.pos;
        let end = self.input[start + 4..]
            .find("-->")
            .map_or(self.input.len(), |off| start + 4 + off + 3);
        self.pos = end;
        self.push_node(Node::Text(self.input[start..end].to_owned()));
    }

    /// A declaration (`<!NAME …>`) or processing instruction (`<?NAME …?>`).
    ///
    /// Kept verbatim as a text node when a configured directive matches the
    /// parsed `!name` / `?name` token, dropped otherwise.
    fn directive(&mut self, marker: char) {
        let start = self.pos;
        let gt = self.input[start..]
            .find('>')
            .map_or(self.input.len(), |off| start + off);
        let inner = &self.input[start + 2..gt];
        let word: String = inner
            .chars()
            .take_while(|c| !c.is_whitespace() && *c != '?')
            .collect();
        let token = format!("{marker}{word}");
        let end = if gt < self.input.len() { gt + 1 } else { gt };
        self.pos = end;
        if self.options.directives.iter().any(|d| d.matches(&token)) {
            self.push_node(Node::Text(self.input[start..end].to_owned()));
        }
    }

    fn close_tag(&mut self) {
        let start = self.pos;
        let gt = self.input[start..]
            .find('>')
            .map_or(self.input.len(), |off| start + off);
        let name = self.input[start + 2..gt]
            .split_whitespace()
            .next()
            .unwrap_or("");
        self.pos = if gt < self.input.len() { gt + 1 } else { gt };
        if name.is_empty() {
            return;
        }
        self.flush_text();
        // Unmatched close tags are ignored; a match implicitly closes
        // anything opened inside it.
        let Some(depth) = self
            .stack
            .iter()
            .rposition(|el| el.tag.eq_ignore_ascii_case(name))
        else {
            return;
        };
        while self.stack.len() > depth {
            if let Some(el) = self.stack.pop() {
                self.push_node(Node::Element(el));
            }
        }
    }

    fn open_tag(&mut self) {
        self.pos += 1;
        let tag = self.read_name();
        let (attrs, self_closing) = self.read_attrs();
        let mut el = Element::new(tag);
        el.attrs = attrs;
        if self_closing || is_void(&el.tag) {
            self.push_node(Node::Element(el));
        } else if is_raw_text(&el.tag) {
            self.raw_text(el);
        } else {
            self.flush_text();
            self.stack.push(el);
        }
    }

    fn raw_text(&mut self, mut el: Element) {
        let close = format!("</{}", el.tag.to_ascii_lowercase());
        let rest = &self.input[self.pos..];
        // ASCII lowercasing preserves byte offsets.
        match rest.to_ascii_lowercase().find(&close) {
            Some(off) => {
                if off > 0 {
                    el.content.push(Node::Text(rest[..off].to_owned()));
                }
                let after = self.pos + off;
                self.pos = self.input[after..]
                    .find('>')
                    .map_or(self.input.len(), |o| after + o + 1);
            }
            None => {
                if !rest.is_empty() {
                    el.content.push(Node::Text(rest.to_owned()));
                }
                self.pos = self.input.len();
            }
        }
        self.push_node(Node::Element(el));
    }

    fn read_name(&mut self) -> String {
        let rest = &self.input[self.pos..];
        let end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')))
            .unwrap_or(rest.len());
        self.pos += end;
        rest[..end].to_owned()
    }

    fn read_attrs(&mut self) -> (Option<Attrs>, bool) {
        let mut attrs: Option<Attrs> = None;
        loop {
            self.skip_whitespace();
            let Some(c) = self.peek() else {
                return (attrs, false);
            };
            match c {
                '>' => {
                    self.pos += 1;
                    return (attrs, false);
                }
                '/' => {
                    self.pos += 1;
                    self.skip_whitespace();
                    if self.peek() == Some('>') {
                        self.pos += 1;
                        return (attrs, true);
                    }
                }
                _ => {
                    let name = self.read_attr_name();
                    if name.is_empty() {
                        self.pos += c.len_utf8();
                        continue;
                    }
                    self.skip_whitespace();
                    let value = if self.peek() == Some('=') {
                        self.pos += 1;
                        self.skip_whitespace();
                        self.read_attr_value()
                    } else {
                        // Bare attribute (`disabled`).
                        String::new()
                    };
                    attrs.get_or_insert_with(Attrs::new).insert(name, value);
                }
            }
        }
    }

    fn read_attr_name(&mut self) -> String {
        let rest = &self.input[self.pos..];
        let end = rest
            .find(|c: char| c.is_whitespace() || matches!(c, '=' | '/' | '>'))
            .unwrap_or(rest.len());
        self.pos += end;
        rest[..end].to_owned()
    }

    fn read_attr_value(&mut self) -> String {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let rest = &self.input[self.pos..];
                let end = rest.find(quote).unwrap_or(rest.len());
                let value = rest[..end].to_owned();
                self.pos += end + usize::from(end < rest.len());
                value
            }
            _ => {
                let rest = &self.input[self.pos..];
                let end = rest
                    .find(|c: char| c.is_whitespace() || c == '>')
                    .unwrap_or(rest.len());
                self.pos += end;
                rest[..end].to_owned()
            }
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.pos..];
        let end = rest
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(rest.len());
        self.pos += end;
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn push_node(&mut self, node: Node) {
        self.flush_text();
        let container = match self.stack.last_mut() {
            Some(el) => &mut el.content,
            None => &mut self.root,
        };
        container.push(node);
    }

    fn flush_text(&mut self) {
        if self.text_buf.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text_buf);
        let container = match self.stack.last_mut() {
            Some(el) => &mut el.content,
            None => &mut self.root,
        };
        container.push(Node::Text(text));
    }
}
