//! Report content as an ordered list of blocks.
//!
//! Blocks hold plain text; `pdf::render_pdf` decides how each kind looks.

use crate::analysis::AnalysisRecord;

pub const REPORT_TITLE: &str = "Resume Analysis Report";
pub const SUMMARY_HEADING: &str = "Professional Summary";
pub const STRENGTHS_HEADING: &str = "Key Strengths";
pub const WEAKNESSES_HEADING: &str = "Areas to Improve";
pub const SKILLS_HEADING: &str = "Detected Skills";
pub const SUGGESTIONS_HEADING: &str = "Suggestions";
pub const IMPROVED_RESUME_TITLE: &str = "AI-Optimized Resume";

const SECTION_GAP_PT: f32 = 18.0;
const TITLE_GAP_PT: f32 = 21.6;
const HEADING_GAP_PT: f32 = 7.2;

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Heading(String),
    /// Embedded newlines are explicit line breaks.
    Paragraph(String),
    Bullet(String),
    ScorePanel(String),
    /// Up to `badges_per_row` skills drawn side by side.
    BadgeRow(Vec<String>),
    Spacer(f32),
    PageBreak,
}

pub fn score_label(score: u8) -> String {
    format!("Resume Score: {score}/100")
}

/// Lays out a record in the fixed report order.
///
/// The record is assumed valid; nothing is clamped or repaired here.
pub fn build_blocks(record: &AnalysisRecord, badges_per_row: usize) -> Vec<Block> {
    let mut blocks = vec![
        Block::Title(REPORT_TITLE.to_string()),
        Block::Spacer(TITLE_GAP_PT),
        Block::ScorePanel(score_label(record.score)),
        Block::Spacer(SECTION_GAP_PT),
        Block::Heading(SUMMARY_HEADING.to_string()),
        Block::Spacer(HEADING_GAP_PT),
        Block::Paragraph(record.summary.clone()),
        Block::Spacer(SECTION_GAP_PT),
    ];

    if !record.strengths.is_empty() {
        push_bullet_section(&mut blocks, STRENGTHS_HEADING, &record.strengths);
    }
    push_bullet_section(&mut blocks, WEAKNESSES_HEADING, &record.weaknesses);

    blocks.push(Block::Heading(SKILLS_HEADING.to_string()));
    blocks.push(Block::Spacer(HEADING_GAP_PT));
    for row in record.skills.chunks(badges_per_row.max(1)) {
        blocks.push(Block::BadgeRow(row.to_vec()));
    }
    blocks.push(Block::Spacer(TITLE_GAP_PT));

    push_bullet_section(&mut blocks, SUGGESTIONS_HEADING, &record.suggestions);

    blocks.push(Block::PageBreak);
    blocks.push(Block::Title(IMPROVED_RESUME_TITLE.to_string()));
    blocks.push(Block::Spacer(TITLE_GAP_PT));
    blocks.push(Block::Paragraph(record.improved_resume.clone()));

    blocks
}

fn push_bullet_section(blocks: &mut Vec<Block>, heading: &str, entries: &[String]) {
    blocks.push(Block::Heading(heading.to_string()));
    blocks.extend(entries.iter().cloned().map(Block::Bullet));
    blocks.push(Block::Spacer(SECTION_GAP_PT));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::record::tests::sample_record;

    fn headings(blocks: &[Block]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading(h) | Block::Title(h) => Some(h.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_build_blocks_section_order() {
        let blocks = build_blocks(&sample_record(), 3);
        assert_eq!(
            headings(&blocks),
            vec![
                REPORT_TITLE,
                SUMMARY_HEADING,
                STRENGTHS_HEADING,
                WEAKNESSES_HEADING,
                SKILLS_HEADING,
                SUGGESTIONS_HEADING,
                IMPROVED_RESUME_TITLE,
            ]
        );
        let page_break = blocks.iter().position(|b| *b == Block::PageBreak).unwrap();
        let improved_title = blocks
            .iter()
            .position(|b| *b == Block::Title(IMPROVED_RESUME_TITLE.to_string()))
            .unwrap();
        assert!(page_break < improved_title);
    }

    #[test]
    fn test_build_blocks_score_panel_label() {
        let mut record = sample_record();
        record.score = 82;
        let blocks = build_blocks(&record, 3);
        assert!(blocks.contains(&Block::ScorePanel("Resume Score: 82/100".to_string())));
    }

    #[test]
    fn test_build_blocks_omits_empty_strengths_section() {
        let mut record = sample_record();
        record.strengths.clear();
        let blocks = build_blocks(&record, 3);
        assert!(!headings(&blocks).contains(&STRENGTHS_HEADING));
    }

    #[test]
    fn test_build_blocks_empty_weaknesses_keeps_header_without_bullets() {
        let mut record = sample_record();
        record.weaknesses.clear();
        let blocks = build_blocks(&record, 3);
        let idx = blocks
            .iter()
            .position(|b| *b == Block::Heading(WEAKNESSES_HEADING.to_string()))
            .unwrap();
        assert!(matches!(blocks[idx + 1], Block::Spacer(_)));
    }

    #[test]
    fn test_build_blocks_groups_skills_three_per_row_in_order() {
        let mut record = sample_record();
        record.skills = ["Rust", "Go", "Python", "SQL", "Kubernetes"]
            .map(String::from)
            .to_vec();
        let blocks = build_blocks(&record, 3);
        let rows: Vec<&Vec<String>> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::BadgeRow(row) => Some(row),
                _ => None,
            })
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], &vec!["Rust", "Go", "Python"]);
        assert_eq!(rows[1], &vec!["SQL", "Kubernetes"]);
    }

    #[test]
    fn test_build_blocks_bullets_preserve_input_order() {
        let record = sample_record();
        let blocks = build_blocks(&record, 3);
        let bullets: Vec<&str> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Bullet(t) => Some(t.as_str()),
                _ => None,
            })
            .collect();
        let expected: Vec<&str> = record
            .strengths
            .iter()
            .chain(&record.weaknesses)
            .chain(&record.suggestions)
            .map(String::as_str)
            .collect();
        assert_eq!(bullets, expected);
    }
}
