//! Presentation descriptor for the PDF report.
//!
//! Text blocks carry plain content only; every visual attribute lives here and
//! is looked up by `TextStyleName`.

use crate::report::font_metrics::Font;

const INCH: f32 = 72.0;

/// An RGB colour with components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    /// Builds a colour from a `0xRRGGBB` literal.
    fn hex(value: u32) -> Self {
        Rgb(
            ((value >> 16) & 0xFF) as f32 / 255.0,
            ((value >> 8) & 0xFF) as f32 / 255.0,
            (value & 0xFF) as f32 / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

/// The named text styles a report is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextStyleName {
    Title,
    Heading,
    Body,
    Bullet,
    Badge,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size_pt: f32,
    /// Baseline-to-baseline distance.
    pub leading_pt: f32,
    pub color: Rgb,
    pub alignment: Alignment,
    /// Left indent from the page margin.
    pub indent_pt: f32,
}

/// A filled, bordered box (score panel, skill badges).
#[derive(Debug, Clone, PartialEq)]
pub struct PanelStyle {
    pub background: Rgb,
    pub border: Rgb,
    pub border_width_pt: f32,
    pub padding_pt: f32,
}

/// Paper size and margins, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_left_pt: f32,
    pub margin_right_pt: f32,
    pub margin_top_pt: f32,
    pub margin_bottom_pt: f32,
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        self.width_pt - self.margin_left_pt - self.margin_right_pt
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportStyle {
    pub page: PageGeometry,
    pub title: TextStyle,
    pub heading: TextStyle,
    pub body: TextStyle,
    pub bullet: TextStyle,
    pub badge: TextStyle,
    pub score_panel: PanelStyle,
    pub score_panel_width_pt: f32,
    pub badge_panel: PanelStyle,
    /// Horizontal gap between badges in a row.
    pub badge_gap_pt: f32,
    /// Badges per row in the skills section.
    pub badges_per_row: usize,
}

impl ReportStyle {
    pub fn text(&self, name: TextStyleName) -> &TextStyle {
        match name {
            TextStyleName::Title => &self.title,
            TextStyleName::Heading => &self.heading,
            TextStyleName::Body => &self.body,
            TextStyleName::Bullet => &self.bullet,
            TextStyleName::Badge => &self.badge,
        }
    }
}

impl Default for ReportStyle {
    /// US letter report: gold title, dark headings, 12pt body.
    fn default() -> Self {
        ReportStyle {
            page: PageGeometry {
                width_pt: 8.5 * INCH,
                height_pt: 11.0 * INCH,
                margin_left_pt: 45.0,
                margin_right_pt: 45.0,
                margin_top_pt: 70.0,
                margin_bottom_pt: 50.0,
            },
            title: TextStyle {
                font: Font::HelveticaBold,
                size_pt: 26.0,
                leading_pt: 32.0,
                color: Rgb::hex(0xC9A227),
                alignment: Alignment::Center,
                indent_pt: 0.0,
            },
            heading: TextStyle {
                font: Font::HelveticaBold,
                size_pt: 18.0,
                leading_pt: 22.0,
                color: Rgb::hex(0x2E2E2E),
                alignment: Alignment::Left,
                indent_pt: 0.0,
            },
            body: TextStyle {
                font: Font::Helvetica,
                size_pt: 12.0,
                leading_pt: 16.0,
                color: Rgb::hex(0x333333),
                alignment: Alignment::Left,
                indent_pt: 0.0,
            },
            bullet: TextStyle {
                font: Font::Helvetica,
                size_pt: 12.0,
                leading_pt: 16.0,
                color: Rgb::hex(0x333333),
                alignment: Alignment::Left,
                indent_pt: 15.0,
            },
            badge: TextStyle {
                font: Font::Helvetica,
                size_pt: 11.0,
                leading_pt: 14.0,
                color: Rgb::hex(0x2E2E2E),
                alignment: Alignment::Center,
                indent_pt: 0.0,
            },
            score_panel: PanelStyle {
                background: Rgb(0.95, 0.88, 0.55),
                border: Rgb(0.8, 0.65, 0.15),
                border_width_pt: 2.0,
                padding_pt: 12.0,
            },
            score_panel_width_pt: 6.0 * INCH,
            badge_panel: PanelStyle {
                background: Rgb::hex(0xF4EBD0),
                border: Rgb(0.8, 0.65, 0.15),
                border_width_pt: 0.75,
                padding_pt: 5.0,
            },
            badge_gap_pt: 8.0,
            badges_per_row: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colour_components() {
        let gold = Rgb::hex(0xC9A227);
        assert!((gold.0 - 201.0 / 255.0).abs() < 1e-6);
        assert!((gold.1 - 162.0 / 255.0).abs() < 1e-6);
        assert!((gold.2 - 39.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_default_style_fits_score_panel_on_page() {
        let style = ReportStyle::default();
        assert!(style.score_panel_width_pt <= style.page.content_width());
        assert_eq!(style.badges_per_row, 3);
        assert_eq!(style.text(TextStyleName::Title).alignment, Alignment::Center);
    }
}
