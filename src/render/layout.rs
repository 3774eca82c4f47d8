//! Page geometry, line wrapping and pagination.
//!
//! Everything here is pure: text goes in, positioned lines come out.
//! Vertical positions are measured in millimetres from the top edge.

/// A4 portrait
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 10.0;

pub const LOGO_WIDTH_MM: f32 = 25.0;

pub const INSTITUTION_FONT_PT: f32 = 16.0;
pub const INSTITUTION_Y_MM: f32 = 22.0;
pub const CONTACT_FONT_PT: f32 = 10.0;
pub const ADDRESS_Y_MM: f32 = 29.0;
pub const PHONE_Y_MM: f32 = 34.0;
pub const SEPARATOR_Y_MM: f32 = 40.0;
pub const SEPARATOR_THICKNESS_PT: f32 = 1.4;

pub const TITLE_FONT_PT: f32 = 14.0;
pub const TITLE_Y_MM: f32 = 57.0;
pub const GENERATED_ON_FONT_PT: f32 = 10.0;
pub const GENERATED_ON_Y_MM: f32 = 67.0;

pub const BODY_FONT_PT: f32 = 12.0;
pub const BODY_LEADING_MM: f32 = 8.0;
/// First body baseline on page 1, below the header and title block
pub const FIRST_PAGE_BODY_TOP_MM: f32 = 78.0;
/// First body baseline on continuation pages
pub const CONTINUATION_BODY_TOP_MM: f32 = 16.0;
/// Lowest allowed body baseline, above the footer band
pub const BODY_BOTTOM_MM: f32 = 277.0;

pub const FOOTER_FONT_PT: f32 = 8.0;
pub const FOOTER_Y_MM: f32 = 288.0;

const PT_TO_MM: f32 = 25.4 / 72.0;
/// Average Helvetica glyph advance as a fraction of the font size
const AVG_CHAR_EM: f32 = 0.55;

/// A line of text at a fixed baseline
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub y_mm: f32,
}

/// Approximate rendered width of `text` at `font_pt`.
pub fn text_width_mm(text: &str, font_pt: f32) -> f32 {
    text.chars().count() as f32 * font_pt * AVG_CHAR_EM * PT_TO_MM
}

/// Left edge that centers `text` between the margins.
pub fn centered_x_mm(text: &str, font_pt: f32) -> f32 {
    let x = (PAGE_WIDTH_MM - text_width_mm(text, font_pt)) / 2.0;
    x.max(MARGIN_MM)
}

/// How many characters fit in `width_mm` at `font_pt`.
pub fn chars_per_line(width_mm: f32, font_pt: f32) -> usize {
    let per_char = font_pt * AVG_CHAR_EM * PT_TO_MM;
    ((width_mm / per_char).floor() as usize).max(1)
}

/// Word-wrap `text` to at most `max_chars` characters per line.
///
/// Blank input lines are kept as empty strings so paragraphs stay
/// separated. Words longer than a line are split across lines.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for raw in text.lines() {
        if raw.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0;

        for word in raw.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();

            while chars.len() > max_chars {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = chars.split_off(max_chars);
                lines.push(chars.into_iter().collect());
                chars = rest;
            }

            let word_len = chars.len();
            let needed = if current_len == 0 {
                word_len
            } else {
                current_len + 1 + word_len
            };

            if needed > max_chars {
                lines.push(std::mem::take(&mut current));
                current.extend(chars);
                current_len = word_len;
            } else {
                if current_len > 0 {
                    current.push(' ');
                }
                current.extend(chars);
                current_len = needed;
            }
        }

        if current_len > 0 {
            lines.push(current);
        }
    }

    lines
}

/// Distribute wrapped body lines over pages.
///
/// Always returns at least one page, even for empty content.
pub fn paginate(lines: Vec<String>) -> Vec<Vec<PlacedLine>> {
    let mut pages = vec![Vec::new()];
    let mut y = FIRST_PAGE_BODY_TOP_MM;

    for text in lines {
        if y > BODY_BOTTOM_MM {
            pages.push(Vec::new());
            y = CONTINUATION_BODY_TOP_MM;
        }

        if let Some(page) = pages.last_mut() {
            page.push(PlacedLine { text, y_mm: y });
        }
        y += BODY_LEADING_MM;
    }

    pages
}

/// Wrap and paginate free-text body content.
pub fn layout_body(content: &str) -> Vec<Vec<PlacedLine>> {
    let width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
    paginate(wrap_text(content, chars_per_line(width, BODY_FONT_PT)))
}

/// Footer text for page `number` (1-based) of `total`.
pub fn footer_text(number: usize, total: usize, generated: &str) -> String {
    format!("Page {} of {} | Generated: {}", number, total, generated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_breaks_on_word_boundaries() {
        let lines = wrap_text("the quick brown fox jumps", 10);
        assert_eq!(lines, ["the quick", "brown fox", "jumps"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn test_wrap_splits_overlong_words() {
        let lines = wrap_text("ab abcdefghijkl cd", 5);
        assert_eq!(lines, ["ab", "abcde", "fghij", "kl cd"]);
    }

    #[test]
    fn test_wrap_keeps_paragraph_gaps() {
        let lines = wrap_text("first\n\nsecond\r\nthird", 80);
        assert_eq!(lines, ["first", "", "second", "third"]);
    }

    #[test]
    fn test_wrap_empty_input() {
        assert!(wrap_text("", 80).is_empty());
    }

    #[test]
    fn test_wrap_counts_chars_not_bytes() {
        let lines = wrap_text("ééééé ééééé", 5);
        assert_eq!(lines, ["ééééé", "ééééé"]);
    }

    #[test]
    fn test_paginate_empty_content_has_one_page() {
        let pages = paginate(Vec::new());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_paginate_respects_bottom_limit() {
        let lines: Vec<String> = (0..100).map(|i| format!("line {}", i)).collect();
        let pages = paginate(lines);

        assert!(pages.len() > 1);
        for page in &pages {
            assert!(page.iter().all(|line| line.y_mm <= BODY_BOTTOM_MM));
        }
        assert_eq!(pages[0][0].y_mm, FIRST_PAGE_BODY_TOP_MM);
        assert_eq!(pages[1][0].y_mm, CONTINUATION_BODY_TOP_MM);

        let total: usize = pages.iter().map(Vec::len).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_layout_body_fits_page_width() {
        let content = "word ".repeat(500);
        let width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

        for page in layout_body(&content) {
            for line in page {
                assert!(text_width_mm(&line.text, BODY_FONT_PT) <= width);
            }
        }
    }

    #[test]
    fn test_centered_x_never_enters_margin() {
        assert_eq!(centered_x_mm(&"W".repeat(400), INSTITUTION_FONT_PT), MARGIN_MM);
        assert!(centered_x_mm("ACME", INSTITUTION_FONT_PT) > 90.0);
    }

    #[test]
    fn test_footer_text() {
        assert_eq!(
            footer_text(2, 3, "2024-01-02 03:04:05 UTC"),
            "Page 2 of 3 | Generated: 2024-01-02 03:04:05 UTC"
        );
    }
}
