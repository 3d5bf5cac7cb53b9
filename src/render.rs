//! Transcript rendering: markdown replies to styled, width-wrapped lines.

use chat_session::{Message, Role};
use markdown::{mdast, to_mdast, ParseOptions};
use unicode_width::UnicodeWidthChar;

use crate::theme::{StyleFn, Theme};

const LABEL_WIDTH: usize = 6;
const LABEL_SEPARATOR: &str = "› ";
const MIN_CONTENT_WIDTH: usize = 12;
const BULLET_WIDTH: usize = 2;

/// Display width of `text`, ignoring ANSI CSI sequences.
pub fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for next in chars.by_ref() {
                if ('\x40'..='\x7e').contains(&next) {
                    break;
                }
            }
            continue;
        }
        width += ch.width().unwrap_or(0);
    }
    width
}

/// Word-wrap each `\n`-separated line of `text` to `width` columns.
///
/// Words wider than `width` get a line of their own rather than being split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for line in text.split('\n') {
        if visible_width(line) <= width {
            lines.push(line.to_string());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0;
        for word in line.split(' ').filter(|word| !word.is_empty()) {
            let word_width = visible_width(word);
            if current_width > 0 && current_width + 1 + word_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }
        lines.push(current);
    }

    lines
}

/// One transcript message with its role label in the gutter.
pub fn render_message(message: &Message, width: usize, theme: &Theme) -> Vec<String> {
    let (label, style) = match message.role {
        Role::User => ("you", theme.user_label),
        Role::Assistant => ("agent", theme.assistant_label),
        Role::System => ("info", theme.system_label),
    };
    let gutter = LABEL_WIDTH + visible_width(LABEL_SEPARATOR);
    let content_width = width.saturating_sub(gutter).max(MIN_CONTENT_WIDTH);

    let body = match message.role {
        Role::Assistant => render_markdown(&message.content, content_width, theme),
        Role::User | Role::System => wrap_text(&message.content, content_width),
    };

    let head = format!(
        "{}{}",
        style(&format!("{label:<LABEL_WIDTH$}")),
        (theme.dim)(LABEL_SEPARATOR)
    );
    let mut lines = Vec::with_capacity(body.len().max(1));
    let mut body = body.into_iter();
    lines.push(format!("{head}{}", body.next().unwrap_or_default()));
    for line in body {
        if line.is_empty() {
            lines.push(line);
        } else {
            lines.push(format!("{}{line}", " ".repeat(gutter)));
        }
    }
    lines
}

pub fn render_error(error: &str, width: usize, theme: &Theme) -> Vec<String> {
    wrap_text(&format!("error: {error}"), width)
        .into_iter()
        .map(|line| (theme.error)(&line))
        .collect()
}

/// Render markdown to terminal lines. Unparseable input falls back to wrapped text.
pub fn render_markdown(text: &str, width: usize, theme: &Theme) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let normalized = text.replace('\t', "   ");
    let nodes = match to_mdast(&normalized, &ParseOptions::gfm()) {
        Ok(mdast::Node::Root(root)) => root.children,
        Ok(other) => vec![other],
        Err(_) => return wrap_text(&normalized, width),
    };

    MarkdownRenderer { theme }.render_blocks(&nodes, width.max(1))
}

struct MarkdownRenderer<'a> {
    theme: &'a Theme,
}

impl MarkdownRenderer<'_> {
    fn render_blocks(&self, nodes: &[mdast::Node], width: usize) -> Vec<String> {
        let mut lines = Vec::new();
        for node in nodes {
            let block = self.render_block(node, width);
            if block.is_empty() {
                continue;
            }
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.extend(block);
        }
        lines
    }

    fn render_block(&self, node: &mdast::Node, width: usize) -> Vec<String> {
        match node {
            mdast::Node::Heading(heading) => {
                let prefix = style_prefix(self.theme.heading);
                let text = self.render_inline(&heading.children, &prefix);
                let text = if heading.depth >= 3 {
                    format!("{} {text}", "#".repeat(heading.depth as usize))
                } else {
                    text
                };
                wrap_text(&text, width)
                    .into_iter()
                    .map(|line| (self.theme.heading)(&line))
                    .collect()
            }
            mdast::Node::Paragraph(paragraph) => {
                wrap_text(&self.render_inline(&paragraph.children, ""), width)
            }
            mdast::Node::Code(code) => self.render_code(code),
            mdast::Node::List(list) => self.render_list(list, width),
            mdast::Node::Blockquote(blockquote) => {
                let border = (self.theme.quote_border)("│ ");
                self.render_blocks(&blockquote.children, width.saturating_sub(2).max(1))
                    .into_iter()
                    .map(|line| format!("{border}{}", (self.theme.quote)(&line)))
                    .collect()
            }
            mdast::Node::ThematicBreak(_) => vec![(self.theme.hr)(&"─".repeat(width.min(80)))],
            mdast::Node::Table(table) => self.render_table(table, width),
            mdast::Node::Html(html) => wrap_text(html.value.trim(), width),
            mdast::Node::Text(text) => wrap_text(&text.value, width),
            _ => Vec::new(),
        }
    }

    fn render_inline(&self, nodes: &[mdast::Node], prefix: &str) -> String {
        let mut result = String::new();

        for node in nodes {
            match node {
                mdast::Node::Text(text) => result.push_str(&text.value),
                mdast::Node::Paragraph(paragraph) => {
                    result.push_str(&self.render_inline(&paragraph.children, prefix));
                }
                mdast::Node::Strong(strong) => {
                    self.push_styled(&mut result, self.theme.bold, &strong.children, prefix);
                }
                mdast::Node::Emphasis(emphasis) => {
                    self.push_styled(&mut result, self.theme.italic, &emphasis.children, prefix);
                }
                mdast::Node::Delete(delete) => {
                    self.push_styled(
                        &mut result,
                        self.theme.strikethrough,
                        &delete.children,
                        prefix,
                    );
                }
                mdast::Node::InlineCode(code) => {
                    result.push_str(&(self.theme.code)(&code.value));
                    result.push_str(prefix);
                }
                mdast::Node::Link(link) => {
                    let text = self.render_inline(&link.children, prefix);
                    let plain = plain_text_from_nodes(&link.children);
                    let href = link.url.as_str();
                    let href_cmp = href.strip_prefix("mailto:").unwrap_or(href);
                    result.push_str(&(self.theme.link)(&text));
                    if plain != href && plain != href_cmp {
                        result.push_str(&(self.theme.link_url)(&format!(" ({href})")));
                    }
                    result.push_str(prefix);
                }
                mdast::Node::Break(_) => result.push('\n'),
                mdast::Node::Html(html) => result.push_str(&html.value),
                mdast::Node::Image(image) => {
                    let alt = if image.alt.is_empty() {
                        image.url.as_str()
                    } else {
                        image.alt.as_str()
                    };
                    result.push_str(alt);
                }
                mdast::Node::InlineMath(math) => result.push_str(&math.value),
                _ => {}
            }
        }

        result
    }

    fn push_styled(
        &self,
        result: &mut String,
        style: StyleFn,
        children: &[mdast::Node],
        prefix: &str,
    ) {
        let content = self.render_inline(children, prefix);
        result.push_str(&style(&content));
        result.push_str(prefix);
    }

    fn render_code(&self, code: &mdast::Code) -> Vec<String> {
        let mut lines = vec![(self.theme.code_block_border)(&format!(
            "```{}",
            code.lang.clone().unwrap_or_default()
        ))];
        for line in code.value.split('\n') {
            lines.push(format!("  {}", (self.theme.code)(line)));
        }
        lines.push((self.theme.code_block_border)("```"));
        lines
    }

    fn render_list(&self, list: &mdast::List, width: usize) -> Vec<String> {
        let mut lines = Vec::new();
        let start_number = list.start.unwrap_or(1);

        for (index, node) in list.children.iter().enumerate() {
            let mdast::Node::ListItem(item) = node else {
                continue;
            };
            let bullet = if list.ordered {
                format!("{}. ", start_number + index as u32)
            } else {
                "- ".to_string()
            };
            let indent = " ".repeat(visible_width(&bullet).max(BULLET_WIDTH));
            let item_width = width.saturating_sub(indent.len()).max(1);

            let mut item_lines = Vec::new();
            for child in &item.children {
                match child {
                    mdast::Node::List(nested) => {
                        item_lines.extend(self.render_list(nested, item_width))
                    }
                    other => item_lines.extend(self.render_block(other, item_width)),
                }
            }

            let mut item_lines = item_lines.into_iter();
            let first = item_lines.next().unwrap_or_default();
            lines.push(format!("{}{first}", (self.theme.list_bullet)(&bullet)));
            for line in item_lines {
                if line.is_empty() {
                    lines.push(line);
                } else {
                    lines.push(format!("{indent}{line}"));
                }
            }
        }

        lines
    }

    fn render_table(&self, table: &mdast::Table, width: usize) -> Vec<String> {
        let mut lines = Vec::new();
        for (row_index, node) in table.children.iter().enumerate() {
            let mdast::Node::TableRow(row) = node else {
                continue;
            };
            let cells: Vec<String> = row
                .children
                .iter()
                .map(|cell| match cell {
                    mdast::Node::TableCell(cell) => self.render_inline(&cell.children, ""),
                    _ => String::new(),
                })
                .collect();
            let joined = cells.join(" │ ");
            if row_index == 0 {
                lines.extend(
                    wrap_text(&joined, width)
                        .into_iter()
                        .map(|line| (self.theme.bold)(&line)),
                );
            } else {
                lines.extend(wrap_text(&joined, width));
            }
        }
        lines
    }
}

/// Leading escape sequence a style emits before its content.
fn style_prefix(style: StyleFn) -> String {
    let sentinel = "\u{0000}";
    let styled = style(sentinel);
    styled
        .find(sentinel)
        .map(|index| styled[..index].to_string())
        .unwrap_or_default()
}

fn plain_text_from_nodes(nodes: &[mdast::Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            mdast::Node::Text(text) => out.push_str(&text.value),
            mdast::Node::InlineCode(code) => out.push_str(&code.value),
            mdast::Node::Strong(strong) => out.push_str(&plain_text_from_nodes(&strong.children)),
            mdast::Node::Emphasis(emphasis) => {
                out.push_str(&plain_text_from_nodes(&emphasis.children))
            }
            mdast::Node::Delete(delete) => out.push_str(&plain_text_from_nodes(&delete.children)),
            mdast::Node::Link(link) => out.push_str(&plain_text_from_nodes(&link.children)),
            _ => {}
        }
    }
    out
}
