// piiguard-ner/src/dates/mod.rs
//! Calendar date recognition over tokens.
//!
//! Two families are recognised: all-numeric dates joined by one repeated
//! separator (`12/03/2024`, `2024-03-12`, `12.03.24`) and dates built around
//! a capitalized month name (`12 March 2024`, `March 12, 2024`, `Jan 2020`,
//! `5th of June`).

use alloc::vec::Vec;

use crate::engine::Candidate;
use crate::scoring::Evidence;
use crate::tokens::{gap, Shape, Token};
use crate::EntityLabel;

const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august",
    "september", "october", "november", "december",
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];

const NUMERIC_SEPARATORS: &[&str] = &["/", "-", "."];

fn parse_number(text: &str) -> Option<u32> {
    if text.is_empty() || text.len() > 4 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn is_month(token: &Token<'_>) -> bool {
    if !matches!(token.shape(), Shape::Capitalized | Shape::Upper) {
        return false;
    }
    let mut lowered = [0u8; 9];
    let bytes = token.text.as_bytes();
    if bytes.len() > lowered.len() {
        return false;
    }
    for (dst, src) in lowered.iter_mut().zip(bytes) {
        *dst = src.to_ascii_lowercase();
    }
    let lowered = &lowered[..bytes.len()];
    MONTHS.iter().any(|m| m.as_bytes() == lowered)
}

/// `12`, `3rd`, `21st`
fn parse_day(token: &Token<'_>) -> Option<u32> {
    let text = token.text;
    let digits_end = text.bytes().position(|b| !b.is_ascii_digit()).unwrap_or(text.len());
    let (digits, suffix) = text.split_at(digits_end);
    if digits.is_empty() || digits.len() > 2 {
        return None;
    }
    if !suffix.is_empty() && !matches!(suffix.to_ascii_lowercase().as_str(), "st" | "nd" | "rd" | "th") {
        return None;
    }
    parse_number(digits).filter(|d| (1..=31).contains(d))
}

fn parse_year(token: &Token<'_>) -> Option<u32> {
    if token.text.len() != 4 {
        return None;
    }
    parse_number(token.text).filter(|y| (1000..=2999).contains(y))
}

/// Spaces with at most one `,` or `.`
fn is_date_gap(gap: &str) -> bool {
    if gap.is_empty() || gap.len() > 4 {
        return false;
    }
    let punct = gap.chars().filter(|c| matches!(c, ',' | '.')).count();
    punct <= 1 && gap.chars().all(|c| matches!(c, ' ' | '\t' | ',' | '.'))
}

fn numeric_parts_valid(parts: [&str; 3]) -> bool {
    let (Some(a), Some(b), Some(c)) = (parse_number(parts[0]), parse_number(parts[1]), parse_number(parts[2])) else {
        return false;
    };

    if parts[0].len() == 4 {
        // year-month-day
        return parts[1].len() <= 2
            && parts[2].len() <= 2
            && (1..=12).contains(&b)
            && (1..=31).contains(&c);
    }

    if parts[0].len() > 2 || parts[1].len() > 2 || !(parts[2].len() == 2 || parts[2].len() == 4) {
        return false;
    }
    let day_month = (1..=31).contains(&a) && (1..=12).contains(&b);
    let month_day = (1..=12).contains(&a) && (1..=31).contains(&b);
    day_month || month_day
}

/// Finds numeric dates such as `12/03/2024`.
pub fn find_numeric_dates(input: &str, tokens: &[Token<'_>]) -> Vec<Candidate> {
    let mut out = Vec::new();
    let mut i = 0;

    while i + 2 < tokens.len() {
        let (t0, t1, t2) = (&tokens[i], &tokens[i + 1], &tokens[i + 2]);
        let sep = gap(input, t0, t1);

        let shaped = t0.is_numeric() && t1.is_numeric() && t2.is_numeric();
        let joined = NUMERIC_SEPARATORS.contains(&sep) && gap(input, t1, t2) == sep;

        if !(shaped && joined) {
            i += 1;
            continue;
        }

        // Part of a longer separator-joined number (e.g. a hyphenated account number).
        let extends_left = i > 0
            && tokens[i - 1].is_numeric()
            && gap(input, &tokens[i - 1], t0) == sep;
        let extends_right = i + 3 < tokens.len()
            && tokens[i + 3].is_numeric()
            && gap(input, t2, &tokens[i + 3]) == sep;

        if !extends_left && !extends_right && numeric_parts_valid([t0.text, t1.text, t2.text]) {
            out.push(Candidate::new(t0.start, t2.end, EntityLabel::Date, Evidence::NumericDate, 3));
            i += 3;
        } else {
            i += 1;
        }
    }
    out
}

/// Finds dates anchored on a month name.
pub fn find_month_dates(input: &str, tokens: &[Token<'_>]) -> Vec<Candidate> {
    let mut out = Vec::new();
    let mut resume_at = 0usize;

    for m in 0..tokens.len() {
        if m < resume_at || !is_month(&tokens[m]) {
            continue;
        }

        let mut first = m;
        if m >= 1 && m - 1 >= resume_at && parse_day(&tokens[m - 1]).is_some() && is_date_gap(gap(input, &tokens[m - 1], &tokens[m])) {
            first = m - 1;
        } else if m >= 2
            && m - 2 >= resume_at
            && tokens[m - 1].text == "of"
            && parse_day(&tokens[m - 2]).is_some()
            && is_date_gap(gap(input, &tokens[m - 2], &tokens[m - 1]))
            && is_date_gap(gap(input, &tokens[m - 1], &tokens[m]))
        {
            first = m - 2;
        }

        let mut last = m;
        let next_ok = |idx: usize| idx < tokens.len() && is_date_gap(gap(input, &tokens[idx - 1], &tokens[idx]));

        if first == m && next_ok(m + 1) && parse_day(&tokens[m + 1]).is_some() {
            last = m + 1;
            if next_ok(m + 2) && parse_year(&tokens[m + 2]).is_some() {
                last = m + 2;
            }
        } else if next_ok(m + 1) && parse_year(&tokens[m + 1]).is_some() {
            last = m + 1;
        }

        if first == m && last == m {
            continue;
        }

        let count = last - first + 1;
        out.push(Candidate::new(tokens[first].start, tokens[last].end, EntityLabel::Date, Evidence::MonthDate, count));
        resume_at = last + 1;
    }
    out
}
