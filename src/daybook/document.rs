//! # Document Builder
//!
//! Assembles entries into a paginated, styled HTML document: a cover block,
//! then one page per entry with title, metadata line, the body's styled
//! blocks and, when attached, the image at a fixed display size with a
//! caption.
//!
//! Image decoding goes through a per-invocation scratch directory owned by
//! the builder and removed on every exit path. A failing image never aborts
//! the document; it degrades to a visible placeholder line naming the
//! failure.

use crate::error::Result;
use crate::markup::{Block, MarkupFormatter, Span, SpanStyle};
use crate::model::Entry;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use image::imageops::FilterType;
use image::ImageFormat;
use log::warn;
use std::fmt::Write as _;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Default display size for embedded images, a 3:2 landscape box.
pub const IMAGE_DISPLAY_WIDTH: u32 = 600;
pub const IMAGE_DISPLAY_HEIGHT: u32 = 400;

/// Scratch directory with a unique per-invocation namespace. Removed on
/// drop, so every exit path of the builder cleans up.
pub(crate) struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub(crate) fn create() -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!("daybook-export-{}", Uuid::new_v4()));
        fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_dir_all(&self.path) {
            warn!("Could not remove scratch dir {}: {}", self.path.display(), e);
        }
    }
}

pub struct DocumentBuilder {
    title: String,
    image_width: u32,
    image_height: u32,
    formatter: MarkupFormatter,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new("My Journal")
    }
}

impl DocumentBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image_width: IMAGE_DISPLAY_WIDTH,
            image_height: IMAGE_DISPLAY_HEIGHT,
            formatter: MarkupFormatter::new(),
        }
    }

    pub fn with_image_size(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Build the document for an ordered sequence of entries.
    pub fn build(&self, entries: &[Entry]) -> Result<Vec<u8>> {
        let scratch = ScratchDir::create()?;
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", escape(&self.title));
        html.push_str(STYLESHEET);
        html.push_str("</head>\n<body>\n");

        self.push_cover(&mut html, entries.len());

        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                html.push_str("<div class=\"page-break\"></div>\n");
            }
            self.push_entry(&mut html, entry, &scratch);
        }

        html.push_str("</body>\n</html>\n");
        // Scratch dir dropped here, success or not.
        Ok(html.into_bytes())
    }

    fn push_cover(&self, html: &mut String, count: usize) {
        html.push_str("<section class=\"cover\">\n");
        let _ = writeln!(html, "<h1>{}</h1>", escape(&self.title));
        let _ = writeln!(
            html,
            "<p class=\"meta\">Generated on: {}</p>",
            Utc::now().format("%B %d, %Y")
        );
        let _ = writeln!(html, "<p class=\"meta\">Selected Entries: {}</p>", count);
        html.push_str("</section>\n");
    }

    fn push_entry(&self, html: &mut String, entry: &Entry, scratch: &ScratchDir) {
        html.push_str("<section class=\"entry\">\n");
        let _ = writeln!(html, "<h1>{}</h1>", escape(&entry.title));

        let tags = entry
            .tags
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            html,
            "<p class=\"meta\">Date: {} | Mood: {} | Tags: {}</p>",
            entry.date,
            entry.mood.label(),
            escape(&tags)
        );

        for block in self.formatter.format(&entry.body) {
            push_block(html, &block);
        }

        if let Some(encoded) = &entry.image {
            match self.embed_image(encoded, entry.id, scratch) {
                Ok(data_uri) => {
                    let _ = writeln!(
                        html,
                        "<img src=\"{}\" width=\"{}\" height=\"{}\" alt=\"Attached Image\">",
                        data_uri, self.image_width, self.image_height
                    );
                    html.push_str("<p class=\"caption\">Attached Image</p>\n");
                }
                Err(reason) => {
                    warn!("Image for entry {} skipped: {}", entry.id, reason);
                    let _ = writeln!(
                        html,
                        "<p class=\"image-missing\">Image could not be included: {}</p>",
                        escape(&reason)
                    );
                }
            }
        }

        html.push_str("</section>\n");
    }

    /// Decode the stored image through the scratch directory, resize it to
    /// the fixed display box, and re-embed it as a PNG data URI.
    fn embed_image(
        &self,
        encoded: &str,
        entry_id: Uuid,
        scratch: &ScratchDir,
    ) -> std::result::Result<String, String> {
        let bytes = STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| format!("invalid image encoding: {}", e))?;

        let raw_path = scratch.path().join(format!("{}.img", entry_id));
        fs::write(&raw_path, &bytes).map_err(|e| format!("scratch write failed: {}", e))?;

        let img = image::open(&raw_path).map_err(|e| format!("unreadable image: {}", e))?;
        let resized = img.resize_exact(self.image_width, self.image_height, FilterType::Triangle);

        let mut out = Vec::new();
        resized
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .map_err(|e| format!("image re-encode failed: {}", e))?;

        Ok(format!("data:image/png;base64,{}", STANDARD.encode(&out)))
    }
}

const STYLESHEET: &str = "<style>\n\
    body { font-family: serif; max-width: 42em; margin: 2em auto; }\n\
    .cover { text-align: center; padding-top: 8em; }\n\
    .page-break { page-break-after: always; break-after: page; }\n\
    .meta { color: #555; }\n\
    .caption { font-style: italic; color: #555; }\n\
    .image-missing { color: #a00; font-style: italic; }\n\
    pre { background: #eee; padding: 0.5em; font-family: monospace; }\n\
    code { font-family: monospace; background: #eee; }\n\
    </style>\n";

fn push_block(html: &mut String, block: &Block) {
    match block {
        Block::Heading { level, text } => {
            let _ = writeln!(html, "<h{lvl}>{}</h{lvl}>", escape(text), lvl = level);
        }
        Block::Paragraph(spans) => {
            html.push_str("<p>");
            for span in spans {
                push_span(html, span);
            }
            html.push_str("</p>\n");
        }
        Block::Code(text) => {
            let _ = writeln!(html, "<pre>{}</pre>", escape(text));
        }
    }
}

fn push_span(html: &mut String, span: &Span) {
    let escaped = escape(&span.text);
    let _ = match span.style {
        SpanStyle::Plain => write!(html, "{}", escaped),
        SpanStyle::Bold => write!(html, "<b>{}</b>", escaped),
        SpanStyle::Italic => write!(html, "<i>{}</i>", escaped),
        SpanStyle::Code => write!(html, "<code>{}</code>", escaped),
    };
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Export filename: the export date always, plus the entry's own date for a
/// single-entry export.
pub fn export_filename(entries: &[Entry], now: DateTime<Utc>) -> String {
    let stamp = now.format("%Y%m%d");
    match entries {
        [single] => format!("daybook-entry-{}-{}.html", single.date, stamp),
        _ => format!("daybook-export-{}.html", stamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DerivedMetrics, Mood, Tag};
    use chrono::NaiveDate;

    fn entry(title: &str, body: &str) -> Entry {
        Entry {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            created_at: Utc::now(),
            last_edited_at: None,
            title: title.to_string(),
            body: body.to_string(),
            mood: Mood::Happy,
            tags: vec![Tag::Personal, Tag::Ideas],
            image: None,
            metrics: DerivedMetrics::default(),
            passkey_hash: String::new(),
        }
    }

    fn png_base64() -> String {
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([200, 60, 60]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        STANDARD.encode(&bytes)
    }

    fn build_str(entries: &[Entry]) -> String {
        let bytes = DocumentBuilder::new("Test Journal").build(entries).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn cover_shows_title_and_count() {
        let html = build_str(&[entry("A", ""), entry("B", "")]);
        assert!(html.contains("<h1>Test Journal</h1>"));
        assert!(html.contains("Selected Entries: 2"));
    }

    #[test]
    fn two_entries_have_exactly_one_page_break() {
        let html = build_str(&[entry("A", ""), entry("B", "")]);
        assert_eq!(html.matches("class=\"page-break\"").count(), 1);
        // The break sits between the entries, not before the first.
        let first = html.find("<section class=\"entry\">").unwrap();
        let brk = html.find("class=\"page-break\"").unwrap();
        assert!(brk > first);
    }

    #[test]
    fn metadata_line_uses_portable_mood_text() {
        let html = build_str(&[entry("Day", "")]);
        assert!(html.contains("Date: 2024-03-09 | Mood: happy | Tags: Personal, Ideas"));
        assert!(!html.contains("😊"));
    }

    #[test]
    fn body_markup_renders_styled() {
        let html = build_str(&[entry("Day", "**bold** and *soft* and `mono`")]);
        assert!(html.contains("<b>bold</b>"));
        assert!(html.contains("<i>soft</i>"));
        assert!(html.contains("<code>mono</code>"));
    }

    #[test]
    fn valid_image_is_embedded_at_fixed_size() {
        let mut e = entry("Pic", "");
        e.image = Some(png_base64());
        let html = build_str(&[e]);
        assert!(html.contains("data:image/png;base64,"));
        assert!(html.contains("width=\"600\" height=\"400\""));
        assert!(html.contains("Attached Image"));
    }

    #[test]
    fn corrupt_image_degrades_to_placeholder() {
        let mut e = entry("Pic", "still here");
        e.image = Some("!!!not base64!!!".to_string());
        let html = build_str(&[e]);
        assert!(html.contains("Image could not be included:"));
        assert!(html.contains("still here"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn undecodable_image_bytes_degrade_too() {
        let mut e = entry("Pic", "");
        e.image = Some(STANDARD.encode(b"these are not image bytes"));
        let html = build_str(&[e]);
        assert!(html.contains("Image could not be included:"));
    }

    #[test]
    fn html_in_user_text_is_escaped() {
        let html = build_str(&[entry("<script>", "a <b>literal</b> tag")]);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &lt;b&gt;literal&lt;/b&gt; tag"));
    }

    #[test]
    fn scratch_dir_is_removed_on_drop() {
        let path = {
            let scratch = ScratchDir::create().unwrap();
            fs::write(scratch.path().join("probe"), b"x").unwrap();
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn filenames_encode_export_and_entry_dates() {
        let now = Utc::now();
        let stamp = now.format("%Y%m%d");
        let one = [entry("solo", "")];
        assert_eq!(
            export_filename(&one, now),
            format!("daybook-entry-2024-03-09-{}.html", stamp)
        );
        let two = [entry("a", ""), entry("b", "")];
        assert_eq!(
            export_filename(&two, now),
            format!("daybook-export-{}.html", stamp)
        );
    }
}
