// PDF report generation for a validated AnalysisRecord.
// Content is built as a block list (layout.rs), styled by ReportStyle (style.rs)
// and paginated/serialized with lopdf (pdf.rs). Rendering is CPU-bound: callers
// on the async runtime run it inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod handlers;
pub mod layout;
pub mod pdf;
pub mod style;

use thiserror::Error;

use crate::analysis::AnalysisRecord;

pub use style::ReportStyle;

/// Name offered to the browser for the downloaded report.
pub const REPORT_FILENAME: &str = "Resume_Analysis_Report.pdf";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders the full report for `record`.
pub fn render_report(record: &AnalysisRecord, style: &ReportStyle) -> Result<Vec<u8>, RenderError> {
    let blocks = layout::build_blocks(record, style.badges_per_row);
    pdf::render_pdf(&blocks, style)
}
