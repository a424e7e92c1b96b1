//! Paginates report blocks and serializes them to a standalone PDF.
//!
//! Only the standard Helvetica fonts are referenced, so the file has no
//! external dependencies. The document carries no timestamps or IDs and lopdf
//! writes objects in id order: identical input gives identical bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::report::font_metrics::{get_metrics, Font};
use crate::report::layout::Block;
use crate::report::style::{Alignment, PanelStyle, ReportStyle, Rgb, TextStyle, TextStyleName};
use crate::report::RenderError;

const BULLET_PREFIX: &str = "\u{2022} ";
const TAB_AS_SPACES: &str = "    ";

/// Renders `blocks` into PDF bytes using `style`.
pub fn render_pdf(blocks: &[Block], style: &ReportStyle) -> Result<Vec<u8>, RenderError> {
    let mut paginator = Paginator::new(style);
    for block in blocks {
        paginator.place(block);
    }
    let pages = paginator.finish();
    serialize(pages, style)
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

struct Paginator<'a> {
    style: &'a ReportStyle,
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    /// Distance from the page bottom of the next free line, in points.
    cursor_y: f32,
    page_has_content: bool,
}

impl<'a> Paginator<'a> {
    fn new(style: &'a ReportStyle) -> Self {
        Self {
            style,
            pages: Vec::new(),
            current: Vec::new(),
            cursor_y: style.page.height_pt - style.page.margin_top_pt,
            page_has_content: false,
        }
    }

    fn place(&mut self, block: &Block) {
        let style = self.style;
        match block {
            Block::Title(text) => self.text_block(text, style.text(TextStyleName::Title)),
            Block::Heading(text) => self.text_block(text, style.text(TextStyleName::Heading)),
            Block::Paragraph(text) => self.text_block(text, style.text(TextStyleName::Body)),
            Block::Bullet(text) => self.bullet(text),
            Block::ScorePanel(text) => self.score_panel(text),
            Block::BadgeRow(skills) => self.badge_row(skills),
            Block::Spacer(height) => self.cursor_y -= height,
            Block::PageBreak => {
                if self.page_has_content {
                    self.new_page();
                }
            }
        }
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        if self.page_has_content || self.pages.is_empty() {
            self.pages.push(std::mem::take(&mut self.current));
        }
        self.pages
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.cursor_y = self.style.page.height_pt - self.style.page.margin_top_pt;
        self.page_has_content = false;
    }

    /// Starts a new page unless `height` fits above the bottom margin.
    /// A block taller than a whole page is placed at the top and allowed to overflow.
    fn ensure_space(&mut self, height: f32) {
        if self.page_has_content && self.cursor_y - height < self.style.page.margin_bottom_pt {
            self.new_page();
        }
    }

    fn text_block(&mut self, text: &str, text_style: &TextStyle) {
        let style = self.style;
        let page = &style.page;
        let metrics = get_metrics(text_style.font);
        let available = page.content_width() - text_style.indent_pt;
        let max_em = available / text_style.size_pt;

        for segment in text.split('\n') {
            let segment = segment.trim_end_matches('\r').replace('\t', TAB_AS_SPACES);
            for line in metrics.wrap_lines(&segment, max_em) {
                self.ensure_space(text_style.leading_pt);
                let line_width = metrics.measure_str(&line) * text_style.size_pt;
                let x = match text_style.alignment {
                    Alignment::Left => page.margin_left_pt + text_style.indent_pt,
                    Alignment::Center => {
                        page.margin_left_pt
                            + text_style.indent_pt
                            + (available - line_width).max(0.0) / 2.0
                    }
                };
                let baseline = self.cursor_y - text_style.size_pt;
                if !line.is_empty() {
                    draw_text(&mut self.current, &line, x, baseline, text_style);
                }
                self.cursor_y -= text_style.leading_pt;
                self.page_has_content = true;
            }
        }
    }

    /// One entry, first line prefixed with a bullet, continuation lines hanging.
    fn bullet(&mut self, text: &str) {
        let style = self.style;
        let text_style = style.text(TextStyleName::Bullet);
        let metrics = get_metrics(text_style.font);
        let prefix_width = metrics.measure_str(BULLET_PREFIX) * text_style.size_pt;
        let x = style.page.margin_left_pt + text_style.indent_pt;
        let max_em = (style.page.content_width() - text_style.indent_pt - prefix_width)
            / text_style.size_pt;

        let flattened = text.replace(['\r', '\n'], " ").replace('\t', TAB_AS_SPACES);
        for (i, line) in metrics.wrap_lines(&flattened, max_em).into_iter().enumerate() {
            self.ensure_space(text_style.leading_pt);
            let baseline = self.cursor_y - text_style.size_pt;
            if i == 0 {
                draw_text(
                    &mut self.current,
                    &format!("{BULLET_PREFIX}{line}"),
                    x,
                    baseline,
                    text_style,
                );
            } else {
                draw_text(&mut self.current, &line, x + prefix_width, baseline, text_style);
            }
            self.cursor_y -= text_style.leading_pt;
            self.page_has_content = true;
        }
    }

    fn score_panel(&mut self, label: &str) {
        let style = self.style;
        let panel = &style.score_panel;
        let text_style = style.text(TextStyleName::Heading);
        let metrics = get_metrics(text_style.font);
        let height = text_style.leading_pt + 2.0 * panel.padding_pt;
        let width = style.score_panel_width_pt;

        self.ensure_space(height);
        let left = style.page.margin_left_pt + (style.page.content_width() - width) / 2.0;
        let bottom = self.cursor_y - height;
        draw_panel(&mut self.current, panel, left, bottom, width, height);

        let label_width = metrics.measure_str(label) * text_style.size_pt;
        let baseline = self.cursor_y - panel.padding_pt - text_style.size_pt;
        draw_text(
            &mut self.current,
            label,
            left + (width - label_width).max(0.0) / 2.0,
            baseline,
            text_style,
        );

        self.cursor_y = bottom;
        self.page_has_content = true;
    }

    fn badge_row(&mut self, skills: &[String]) {
        let style = self.style;
        let panel = &style.badge_panel;
        let text_style = style.text(TextStyleName::Badge);
        let metrics = get_metrics(text_style.font);
        let per_row = style.badges_per_row.max(1) as f32;
        let gap = style.badge_gap_pt;
        let badge_width = (style.page.content_width() - gap * (per_row - 1.0)) / per_row;
        let inner_em = (badge_width - 2.0 * panel.padding_pt) / text_style.size_pt;

        let wrapped: Vec<Vec<String>> = skills
            .iter()
            .map(|s| metrics.wrap_lines(&s.replace(['\r', '\n', '\t'], " "), inner_em))
            .collect();
        let max_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1) as f32;
        let height = max_lines * text_style.leading_pt + 2.0 * panel.padding_pt;

        self.ensure_space(height);
        let top = self.cursor_y;
        let bottom = top - height;
        for (i, lines) in wrapped.iter().enumerate() {
            let left = style.page.margin_left_pt + i as f32 * (badge_width + gap);
            draw_panel(&mut self.current, panel, left, bottom, badge_width, height);
            for (n, line) in lines.iter().enumerate() {
                let line_width = metrics.measure_str(line) * text_style.size_pt;
                let baseline =
                    top - panel.padding_pt - text_style.size_pt - n as f32 * text_style.leading_pt;
                draw_text(
                    &mut self.current,
                    line,
                    left + (badge_width - line_width).max(0.0) / 2.0,
                    baseline,
                    text_style,
                );
            }
        }

        // Small gap so stacked rows do not share a border.
        self.cursor_y = bottom - gap / 2.0;
        self.page_has_content = true;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Content stream operators
// ────────────────────────────────────────────────────────────────────────────

fn real(value: f32) -> Object {
    // Two decimals keeps streams compact; rounding is deterministic.
    Object::Real((value * 100.0).round() / 100.0)
}

fn rgb_operands(color: Rgb) -> Vec<Object> {
    vec![real(color.0), real(color.1), real(color.2)]
}

fn draw_text(ops: &mut Vec<Operation>, text: &str, x: f32, baseline: f32, style: &TextStyle) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![
            Object::Name(style.font.resource_name().as_bytes().to_vec()),
            real(style.size_pt),
        ],
    ));
    ops.push(Operation::new("rg", rgb_operands(style.color)));
    ops.push(Operation::new("Td", vec![real(x), real(baseline)]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::string_literal(encode_win_ansi(text))],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn draw_panel(
    ops: &mut Vec<Operation>,
    panel: &PanelStyle,
    left: f32,
    bottom: f32,
    width: f32,
    height: f32,
) {
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("rg", rgb_operands(panel.background)));
    ops.push(Operation::new("RG", rgb_operands(panel.border)));
    ops.push(Operation::new("w", vec![real(panel.border_width_pt)]));
    ops.push(Operation::new(
        "re",
        vec![real(left), real(bottom), real(width), real(height)],
    ));
    ops.push(Operation::new("B", vec![]));
    ops.push(Operation::new("Q", vec![]));
}

/// Encodes text for a WinAnsiEncoding simple font.
///
/// Latin-1 maps directly; the typographic punctuation WinAnsi places in
/// 0x80..=0x9F is translated; anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .filter_map(|c| match c {
            ' '..='~' => Some(c as u8),
            '\u{00A0}'..='\u{00FF}' => Some(c as u32 as u8),
            c if c.is_control() => None,
            '\u{20AC}' => Some(0x80),
            '\u{201A}' => Some(0x82),
            '\u{0192}' => Some(0x83),
            '\u{201E}' => Some(0x84),
            '\u{2026}' => Some(0x85),
            '\u{2020}' => Some(0x86),
            '\u{2021}' => Some(0x87),
            '\u{02C6}' => Some(0x88),
            '\u{2030}' => Some(0x89),
            '\u{0160}' => Some(0x8A),
            '\u{2039}' => Some(0x8B),
            '\u{0152}' => Some(0x8C),
            '\u{017D}' => Some(0x8E),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '\u{2022}' => Some(0x95),
            '\u{2013}' => Some(0x96),
            '\u{2014}' => Some(0x97),
            '\u{02DC}' => Some(0x98),
            '\u{2122}' => Some(0x99),
            '\u{0161}' => Some(0x9A),
            '\u{203A}' => Some(0x9B),
            '\u{0153}' => Some(0x9C),
            '\u{017E}' => Some(0x9E),
            '\u{0178}' => Some(0x9F),
            _ => Some(b'?'),
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Serialization
// ────────────────────────────────────────────────────────────────────────────

fn font_object(doc: &mut Document, font: Font) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    })
}

fn serialize(pages: Vec<Vec<Operation>>, style: &ReportStyle) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = font_object(&mut doc, Font::Helvetica);
    let bold_id = font_object(&mut doc, Font::HelveticaBold);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Helvetica.resource_name() => regular_id,
            Font::HelveticaBold.resource_name() => bold_id,
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations }.encode()?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                real(0.0),
                real(0.0),
                real(style.page.width_pt),
                real(style.page.height_pt),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(crate::report::layout::REPORT_TITLE),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_count(bytes: &[u8]) -> usize {
        Document::load_mem(bytes).unwrap().get_pages().len()
    }

    #[test]
    fn test_encode_win_ansi_maps_typographic_characters() {
        assert_eq!(encode_win_ansi("a\u{2022}b"), vec![b'a', 0x95, b'b']);
        assert_eq!(encode_win_ansi("\u{2014}"), vec![0x97]);
        assert_eq!(encode_win_ansi("caf\u{00E9}"), b"caf\xE9".to_vec());
        assert_eq!(encode_win_ansi("\u{4E2D}"), b"?".to_vec());
        assert_eq!(encode_win_ansi("a\u{0007}b"), b"ab".to_vec());
    }

    #[test]
    fn test_render_pdf_empty_block_list_is_one_blank_page() {
        let bytes = render_pdf(&[], &ReportStyle::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_page_break_starts_new_page() {
        let blocks = vec![
            Block::Title("First".to_string()),
            Block::PageBreak,
            Block::Title("Second".to_string()),
        ];
        let bytes = render_pdf(&blocks, &ReportStyle::default()).unwrap();
        assert_eq!(page_count(&bytes), 2);
    }

    #[test]
    fn test_consecutive_page_breaks_do_not_leave_blank_pages() {
        let blocks = vec![
            Block::Paragraph("Only page".to_string()),
            Block::PageBreak,
            Block::PageBreak,
        ];
        let bytes = render_pdf(&blocks, &ReportStyle::default()).unwrap();
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_long_paragraph_flows_onto_following_pages() {
        let text = (0..120)
            .map(|i| format!("Line number {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let bytes = render_pdf(&[Block::Paragraph(text)], &ReportStyle::default()).unwrap();
        // 672pt of usable height at 16pt leading holds 42 lines per page.
        assert_eq!(page_count(&bytes), 3);
    }
}
