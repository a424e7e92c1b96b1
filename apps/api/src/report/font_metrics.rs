//! Static font-metric tables for the two standard PDF fonts the report uses.
//!
//! Character widths are in em units (relative to font size), taken from the
//! Adobe core font metrics for Helvetica and Helvetica-Bold. Tables cover ASCII
//! 0x20..=0x7E (95 printable characters). Index = (char as usize) - 32.

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

/// The standard Type1 fonts embedded by name in every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    /// PostScript name written into the font dictionary.
    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used by content streams (`/F1 12 Tf`).
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    pub font: Font,
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Non-ASCII characters fall back to `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }

    /// Greedy word-wrap of a single line of text at `max_width_em`.
    ///
    /// Runs of whitespace collapse to one space. A word wider than the line is
    /// broken between characters. Blank input yields one empty line so explicit
    /// line breaks survive.
    pub fn wrap_lines(&self, s: &str, max_width_em: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in s.split_whitespace() {
            let word_w = self.measure_str(word);

            if current.is_empty() {
                if word_w <= max_width_em {
                    current.push_str(word);
                    current_width = word_w;
                } else {
                    current_width = self.break_long_word(word, max_width_em, &mut lines, &mut current);
                }
                continue;
            }

            if current_width + self.space_width + word_w <= max_width_em {
                current.push(' ');
                current.push_str(word);
                current_width += self.space_width + word_w;
            } else {
                lines.push(std::mem::take(&mut current));
                if word_w <= max_width_em {
                    current.push_str(word);
                    current_width = word_w;
                } else {
                    current_width = self.break_long_word(word, max_width_em, &mut lines, &mut current);
                }
            }
        }

        if !current.is_empty() || lines.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Splits an over-wide word across lines; the tail is left in `current`
    /// and its width returned.
    fn break_long_word(
        &self,
        word: &str,
        max_width_em: f32,
        lines: &mut Vec<String>,
        current: &mut String,
    ) -> f32 {
        let mut width = 0.0_f32;
        for c in word.chars() {
            let w = self.char_width(c);
            if !current.is_empty() && width + w > max_width_em {
                lines.push(std::mem::take(current));
                width = 0.0;
            }
            current.push(c);
            width += w;
        }
        width
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica — body text, bullets, badges.
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    font: Font::Helvetica,
    widths: [
        // sp    !      "      #      $      %      &      '
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191,
        // (     )      *      +      ,      -      .      /
        0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0-9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :     ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A     B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N     O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [     \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a     b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n     o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {     |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};

/// Helvetica-Bold — titles, headings, the score panel.
static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    font: Font::HelveticaBold,
    widths: [
        // sp    !      "      #      $      %      &      '
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238,
        // (     )      *      +      ,      -      .      /
        0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0-9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :     ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A     B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N     O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [     \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a     b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n     o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {     |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.611,
    space_width: 0.278,
};

/// Returns the static metric table for a given font.
pub fn get_metrics(font: Font) -> &'static FontMetricTable {
    match font {
        Font::Helvetica => &HELVETICA_TABLE,
        Font::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(Font::Helvetica);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(Font::Helvetica);
        // "Go" = G(0.778) + o(0.556) = 1.334
        let width = metrics.measure_str("Go");
        assert!(
            (width - 1.334).abs() < 1e-3,
            "Go width should be ~1.334, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(Font::Helvetica);
        let width = metrics.measure_str("é");
        assert!(
            (width - metrics.average_char_width).abs() < 1e-4,
            "non-ASCII should use average_char_width"
        );
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Professional Summary";
        assert!(
            get_metrics(Font::HelveticaBold).measure_str(text)
                > get_metrics(Font::Helvetica).measure_str(text)
        );
    }

    #[test]
    fn test_wrap_lines_short_text_is_one_line() {
        let metrics = get_metrics(Font::Helvetica);
        assert_eq!(metrics.wrap_lines("Python", 40.0), vec!["Python"]);
    }

    #[test]
    fn test_wrap_lines_blank_input_keeps_one_empty_line() {
        let metrics = get_metrics(Font::Helvetica);
        assert_eq!(metrics.wrap_lines("   ", 40.0), vec![String::new()]);
    }

    #[test]
    fn test_wrap_lines_respects_width_and_keeps_word_order() {
        let metrics = get_metrics(Font::Helvetica);
        let text = "Architected a distributed caching layer using Redis and consistent hashing, \
                    reducing p99 latency by 40% under 50k RPS peak load";
        let lines = metrics.wrap_lines(text, 20.0);
        assert!(lines.len() >= 3, "expected wrapping, got {lines:?}");
        for line in &lines {
            assert!(
                metrics.measure_str(line) <= 20.0 + 1e-3,
                "line too wide: {line:?}"
            );
        }
        let rejoined = lines.join(" ");
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, original.join(" "));
    }

    #[test]
    fn test_wrap_lines_breaks_overlong_word() {
        let metrics = get_metrics(Font::Helvetica);
        let word = "x".repeat(100); // 100 * 0.5em = 50em
        let lines = metrics.wrap_lines(&word, 10.0);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines.concat(), word);
    }
}
