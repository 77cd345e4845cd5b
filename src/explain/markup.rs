//! Markdown from the text service, flattened to emphasis spans
//!
//! Block structure survives only as line breaks (list items get a bullet).
//! Anything unstyled, such as links or inline code, keeps its text.

use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options, parse_document};

/// A run of text with uniform emphasis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl Span {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: false,
            italic: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Style {
    bold: bool,
    italic: bool,
}

pub fn parse(text: &str) -> Vec<Span> {
    let arena = Arena::new();
    let root = parse_document(&arena, text, &Options::default());

    let mut spans = Vec::new();
    visit(root, Style::default(), &mut spans);
    spans
}

fn visit<'a>(node: &'a AstNode<'a>, style: Style, spans: &mut Vec<Span>) {
    let mut style = style;
    match &node.data.borrow().value {
        NodeValue::Text(text) => {
            push(spans, text, style);
            return;
        }
        NodeValue::Code(code) => {
            push(spans, &code.literal, style);
            return;
        }
        NodeValue::HtmlInline(html) => {
            push(spans, html, style);
            return;
        }
        NodeValue::CodeBlock(block) => {
            separate(spans, "\n\n");
            push(spans, block.literal.trim_end(), style);
            return;
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            push(spans, "\n", style);
            return;
        }
        NodeValue::Strong => style.bold = true,
        NodeValue::Emph => style.italic = true,
        NodeValue::Heading(_) => {
            separate(spans, "\n\n");
            style.bold = true;
        }
        NodeValue::Item(_) => {
            separate(spans, "\n");
            push(spans, "• ", Style::default());
        }
        NodeValue::Paragraph => {
            let in_item = node
                .parent()
                .is_some_and(|p| matches!(p.data.borrow().value, NodeValue::Item(_)));
            if !in_item {
                separate(spans, "\n\n");
            }
        }
        NodeValue::List(_) => separate(spans, "\n\n"),
        _ => {}
    }

    for child in node.children() {
        visit(child, style, spans);
    }
}

/// Break between blocks, skipped before the first one
fn separate(spans: &mut Vec<Span>, separator: &str) {
    if !spans.is_empty() && !spans.last().is_some_and(|s| s.text.ends_with('\n')) {
        push(spans, separator, Style::default());
    }
}

/// Append, merging with the previous span when the style matches
fn push(spans: &mut Vec<Span>, text: &str, style: Style) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = spans.last_mut() {
        if last.bold == style.bold && last.italic == style.italic {
            last.text.push_str(text);
            return;
        }
    }
    spans.push(Span {
        text: text.to_string(),
        bold: style.bold,
        italic: style.italic,
    });
}
