//! # Markup Formatter
//!
//! Converts the journal's markdown subset into styled blocks for document
//! rendering and terminal display. Block constructs live on line boundaries
//! (`# `/`## `/`### ` headings, ``` fences, bullets, numbered lists,
//! paragraphs); inline spans (`**bold**`, `__bold__`, `*italic*`,
//! `_italic_`, `` `code` ``) live inside paragraph text.
//!
//! ## Placeholder substitution
//!
//! Inline delimiters interfere with each other: once `**x**` has been turned
//! into styled output, a later italic pass must not re-match the result, and
//! nothing may reinterpret the inside of a code span. The formatter
//! therefore works in passes:
//!
//! 1. extract every `` `code` `` span into a side list, leaving a unique
//!    positional token behind;
//! 2. the same for bold (both delimiter styles), then italic (both styles),
//!    each with its own side list;
//! 3. apply line transforms (bullet glyph, numbered-list normalization),
//!    entity unescaping and escape-character stripping to the token-bearing
//!    text;
//! 4. resolve tokens back into styled spans, code rendered fixed-width,
//!    bold/italic in their emphasis styles.
//!
//! Tokens are built from a private-use codepoint plus a monotonic index, so
//! no normal input can contain one. Pasted text that does carry the marker
//! codepoint is stripped up front; its visible text still round-trips, and
//! the emitted/resolved token counts always match.

use std::fmt;

/// Marker codepoint bracketing placeholder tokens. Private use area, not
/// producible by normal typing.
const MARK: char = '\u{E000}';

/// A unit of rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Heading with level 1-3.
    Heading { level: u8, text: String },
    Paragraph(Vec<Span>),
    /// Verbatim fenced-code region, lines joined by newlines.
    Code(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Plain,
    Bold,
    Italic,
    /// Fixed-width inline code.
    Code,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub style: SpanStyle,
    pub text: String,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            style: SpanStyle::Plain,
            text: text.into(),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Visible text of a block, styling dropped. Used by tests and terminal
/// fallback rendering.
pub fn block_text(block: &Block) -> String {
    match block {
        Block::Heading { text, .. } => text.clone(),
        Block::Paragraph(spans) => spans.iter().map(|s| s.text.as_str()).collect(),
        Block::Code(text) => text.clone(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Code,
    Bold,
    Italic,
}

impl TokenKind {
    fn style(self) -> SpanStyle {
        match self {
            TokenKind::Code => SpanStyle::Code,
            TokenKind::Bold => SpanStyle::Bold,
            TokenKind::Italic => SpanStyle::Italic,
        }
    }

    fn tag(self) -> char {
        match self {
            TokenKind::Code => 'c',
            TokenKind::Bold => 'b',
            TokenKind::Italic => 'i',
        }
    }
}

/// One extracted inline span awaiting restoration.
#[derive(Debug, Clone)]
struct SideEntry {
    kind: TokenKind,
    content: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupFormatter;

impl MarkupFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Convert raw entry text into styled blocks.
    pub fn format(&self, text: &str) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut code_lines: Option<Vec<String>> = None;

        for line in text.lines() {
            if line.trim_start().starts_with("```") {
                match code_lines.take() {
                    Some(lines) => blocks.push(Block::Code(lines.join("\n"))),
                    None => code_lines = Some(Vec::new()),
                }
                continue;
            }

            if let Some(lines) = code_lines.as_mut() {
                lines.push(line.to_string());
                continue;
            }

            if line.trim().is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix("# ") {
                blocks.push(Block::Heading {
                    level: 1,
                    text: rest.trim().to_string(),
                });
            } else if let Some(rest) = line.strip_prefix("## ") {
                blocks.push(Block::Heading {
                    level: 2,
                    text: rest.trim().to_string(),
                });
            } else if let Some(rest) = line.strip_prefix("### ") {
                blocks.push(Block::Heading {
                    level: 3,
                    text: rest.trim().to_string(),
                });
            } else {
                blocks.push(Block::Paragraph(self.format_inline(line)));
            }
        }

        // A fence left open at input end flushes as-is.
        if let Some(lines) = code_lines {
            blocks.push(Block::Code(lines.join("\n")));
        }

        blocks
    }

    /// Run one line of paragraph text through the inline pipeline.
    pub fn format_inline(&self, line: &str) -> Vec<Span> {
        // Collision strategy: the marker codepoint cannot survive into the
        // extraction passes, or user text could forge a token.
        let mut text: String = line.chars().filter(|c| *c != MARK).collect();

        let mut side: Vec<SideEntry> = Vec::new();
        text = extract(&text, "`", "`", TokenKind::Code, &mut side);
        text = extract(&text, "**", "**", TokenKind::Bold, &mut side);
        text = extract(&text, "__", "__", TokenKind::Bold, &mut side);
        text = extract(&text, "*", "*", TokenKind::Italic, &mut side);
        text = extract(&text, "_", "_", TokenKind::Italic, &mut side);

        text = transform_line(&text);

        let mut spans = Vec::new();
        let resolved = resolve(&text, SpanStyle::Plain, &side, &mut spans);
        debug_assert_eq!(resolved, side.len(), "unresolved placeholder tokens");
        spans
    }
}

/// Replace every delimited span with a positional token, recording its
/// content in the side list. Content must be non-empty and free of the
/// delimiter character, mirroring the non-greedy single-pass match.
fn extract(
    text: &str,
    open: &str,
    close: &str,
    kind: TokenKind,
    side: &mut Vec<SideEntry>,
) -> String {
    let forbidden = open.chars().next().unwrap();
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    loop {
        let Some(start) = rest.find(open) else {
            out.push_str(rest);
            return out;
        };
        let after_open = &rest[start + open.len()..];
        let Some(end) = after_open.find(close) else {
            out.push_str(rest);
            return out;
        };
        let content = &after_open[..end];
        if content.is_empty() || content.contains(forbidden) {
            // Not a well-formed span; emit the first delimiter char
            // literally and rescan from the next position.
            let skip = start + forbidden.len_utf8();
            out.push_str(&rest[..skip]);
            rest = &rest[skip..];
            continue;
        }

        out.push_str(&rest[..start]);
        out.push(MARK);
        out.push(kind.tag());
        out.push_str(&side.len().to_string());
        out.push(MARK);
        side.push(SideEntry {
            kind,
            content: content.to_string(),
        });
        rest = &after_open[end + close.len()..];
    }
}

/// Block-level line transforms and character cleanup, applied to
/// token-bearing text (step 3). Tokens contain no affected characters.
fn transform_line(line: &str) -> String {
    let trimmed = line.trim_start();

    let listed = if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        format!("• {}", rest.trim_start())
    } else if let Some((number, rest)) = split_numbered(trimmed) {
        format!("{}. {}", number, rest)
    } else {
        line.to_string()
    };

    listed
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace('\\', "")
}

/// Split a `N. text` list line into its number and remainder.
fn split_numbered(line: &str) -> Option<(u64, &str)> {
    let digits_end = line.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 {
        return None;
    }
    let rest = &line[digits_end..];
    let rest = rest.strip_prefix('.')?;
    let rest = rest.strip_prefix(' ')?;
    if rest.trim().is_empty() {
        return None;
    }
    let number: u64 = line[..digits_end].parse().ok()?;
    Some((number, rest.trim_start()))
}

/// Restore tokens into styled spans. Side-list content is emitted verbatim
/// except for nested tokens (a code span tokenized before a bold pass can
/// sit inside that bold span's content), which are resolved with their own
/// style. Returns the number of tokens resolved.
fn resolve(text: &str, style: SpanStyle, side: &[SideEntry], out: &mut Vec<Span>) -> usize {
    let mut resolved = 0;
    let mut rest = text;

    while let Some(start) = rest.find(MARK) {
        if start > 0 {
            out.push(Span {
                style,
                text: rest[..start].to_string(),
            });
        }
        let after = &rest[start + MARK.len_utf8()..];
        // The close marker always exists: tokens are machine-generated and
        // the marker cannot occur in user text.
        let end = after.find(MARK).unwrap_or(after.len());
        let token = &after[..end];
        let index: usize = token[1..].parse().unwrap_or(usize::MAX);
        if let Some(entry) = side.get(index) {
            resolved += 1;
            resolved += resolve(&entry.content, entry.kind.style(), side, out);
        }
        rest = &after[(end + MARK.len_utf8()).min(after.len())..];
    }

    if !rest.is_empty() {
        out.push(Span {
            style,
            text: rest.to_string(),
        });
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt() -> MarkupFormatter {
        MarkupFormatter::new()
    }

    fn visible(blocks: &[Block]) -> String {
        blocks
            .iter()
            .map(block_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn plain_text_is_one_unchanged_paragraph() {
        let blocks = fmt().format("Just a quiet day.");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![Span::plain("Just a quiet day.")])]
        );
    }

    #[test]
    fn bold_italic_and_code_keep_order_and_plain_text() {
        let blocks = fmt().format("**bold** and *italic* and `code`");
        let Block::Paragraph(spans) = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            spans,
            &vec![
                Span {
                    style: SpanStyle::Bold,
                    text: "bold".into()
                },
                Span::plain(" and "),
                Span {
                    style: SpanStyle::Italic,
                    text: "italic".into()
                },
                Span::plain(" and "),
                Span {
                    style: SpanStyle::Code,
                    text: "code".into()
                },
            ]
        );
    }

    #[test]
    fn underscore_delimiters_work_too() {
        let spans = fmt().format_inline("__strong__ and _soft_");
        assert_eq!(spans[0].style, SpanStyle::Bold);
        assert_eq!(spans[0].text, "strong");
        assert_eq!(spans[2].style, SpanStyle::Italic);
        assert_eq!(spans[2].text, "soft");
    }

    #[test]
    fn code_span_content_is_not_reinterpreted() {
        let spans = fmt().format_inline("run `cargo *build*` now");
        assert_eq!(
            spans,
            vec![
                Span::plain("run "),
                Span {
                    style: SpanStyle::Code,
                    text: "cargo *build*".into()
                },
                Span::plain(" now"),
            ]
        );
    }

    #[test]
    fn code_span_inside_bold_resolves_both_styles() {
        let spans = fmt().format_inline("**see `this`**");
        assert_eq!(
            spans,
            vec![
                Span {
                    style: SpanStyle::Bold,
                    text: "see ".into()
                },
                Span {
                    style: SpanStyle::Code,
                    text: "this".into()
                },
            ]
        );
    }

    #[test]
    fn headings_consume_markers_by_level() {
        let blocks = fmt().format("# Top\n## Middle\n### Small");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "Top".into()
                },
                Block::Heading {
                    level: 2,
                    text: "Middle".into()
                },
                Block::Heading {
                    level: 3,
                    text: "Small".into()
                },
            ]
        );
    }

    #[test]
    fn fenced_region_is_one_verbatim_block() {
        let input = "```\nlet a = **1**;\nlet b = 2;\nlet c = 3;\n```";
        let blocks = fmt().format(input);
        assert_eq!(
            blocks,
            vec![Block::Code(
                "let a = **1**;\nlet b = 2;\nlet c = 3;".into()
            )]
        );
    }

    #[test]
    fn unterminated_fence_flushes_at_end() {
        let blocks = fmt().format("before\n```\ntrailing code");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1], Block::Code("trailing code".into()));
    }

    #[test]
    fn bullets_and_numbers_are_normalized() {
        let blocks = fmt().format("- first\n* second\n  3.  third");
        assert_eq!(visible(&blocks), "• first\n• second\n3. third");
    }

    #[test]
    fn entities_are_unescaped_and_escape_char_stripped() {
        let spans = fmt().format_inline("&lt;tag&gt; &amp; &quot;q&apos; back\\slash");
        let text: String = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(text, "<tag> & \"q' backslash");
    }

    #[test]
    fn blank_lines_produce_no_blocks() {
        let blocks = fmt().format("one\n\n\ntwo");
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn unclosed_delimiters_stay_literal() {
        let spans = fmt().format_inline("an unclosed **bold only");
        let text: String = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(text, "an unclosed **bold only");
        assert!(spans.iter().all(|s| s.style == SpanStyle::Plain));
    }

    #[test]
    fn stray_star_pair_matches_like_a_single_pass() {
        // A pair of bare stars brackets an italic span, the same way the
        // one-pass matcher treats any two single delimiters.
        let spans = fmt().format_inline("a * lone star and * more");
        assert_eq!(
            spans,
            vec![
                Span::plain("a "),
                Span {
                    style: SpanStyle::Italic,
                    text: " lone star and ".into()
                },
                Span::plain(" more"),
            ]
        );
    }

    #[test]
    fn empty_spans_are_not_extracted() {
        let spans = fmt().format_inline("**** and `` stay put");
        let text: String = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(text, "**** and `` stay put");
    }

    #[test]
    fn forged_marker_text_cannot_smuggle_a_token() {
        // A pasted marker codepoint is stripped; the visible text around it
        // survives and no token is forged.
        let input = format!("before {}c0{} after **real**", MARK, MARK);
        let spans = fmt().format_inline(&input);
        let text: String = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(text, "before c0 after real");
        assert_eq!(spans.last().unwrap().style, SpanStyle::Bold);
    }

    #[test]
    fn bullet_line_with_inline_markup() {
        let spans = fmt().format_inline("- buy **milk**");
        assert_eq!(spans[0], Span::plain("• buy "));
        assert_eq!(
            spans[1],
            Span {
                style: SpanStyle::Bold,
                text: "milk".into()
            }
        );
    }
}
