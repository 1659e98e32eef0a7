// Narrow tree view over a parsed HTML page.
//
// The extraction code only needs "find by class", "children", "next sibling"
// and "text content", so that is all this exposes.
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    pub fn parse(body: &str) -> Self {
        Self { html: Html::parse_document(body) }
    }

    /// Elements matching a CSS selector, in document order.
    pub fn select(&self, css: &str) -> Vec<Node<'_>> {
        match Selector::parse(css) {
            Ok(selector) => self.html.select(&selector).map(Node).collect(),
            Err(e) => {
                warn!("Invalid selector {:?}: {}", css, e);
                Vec::new()
            }
        }
    }

    /// Elements carrying every class in the space separated `classes`.
    pub fn find_by_class(&self, classes: &str) -> Vec<Node<'_>> {
        self.select(&class_selector(classes))
    }

    pub fn first_by_class(&self, classes: &str) -> Option<Node<'_>> {
        let css = class_selector(classes);
        match Selector::parse(&css) {
            Ok(selector) => self.html.select(&selector).next().map(Node),
            Err(e) => {
                warn!("Invalid selector {:?}: {}", css, e);
                None
            }
        }
    }
}

fn class_selector(classes: &str) -> String {
    classes
        .split_whitespace()
        .map(|c| format!(".{c}"))
        .collect()
}

#[derive(Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    pub fn has_class(&self, class: &str) -> bool {
        self.0.value().classes().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// Direct element children; text and comment nodes are skipped.
    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + use<'a> {
        self.0.children().filter_map(ElementRef::wrap).map(Node)
    }

    /// The next element after this one under the same parent.
    pub fn next_sibling(&self) -> Option<Node<'a>> {
        self.0.next_siblings().find_map(ElementRef::wrap).map(Node)
    }

    /// All descendant text, unmodified.
    pub fn text(&self) -> String {
        self.0.text().collect()
    }

    /// Each text node trimmed, then concatenated without separators.
    pub fn stripped_text(&self) -> String {
        self.0.text().map(str::trim).collect()
    }

    /// Descendant elements (excluding self) with the given tag name.
    pub fn descendants(&self, tag: &str) -> impl Iterator<Item = Node<'a>> + use<'a> {
        let tag = tag.to_ascii_lowercase();
        let root = self.0.id();
        self.0
            .descendants()
            .filter(move |n| n.id() != root)
            .filter_map(ElementRef::wrap)
            .filter(move |e| e.value().name() == tag)
            .map(Node)
    }

    pub fn first_descendant(&self, tag: &str) -> Option<Node<'a>> {
        self.descendants(tag).next()
    }

    pub fn count_descendants(&self, tag: &str) -> usize {
        self.descendants(tag).count()
    }
}
