// piiguard-ner/src/heuristics/mod.rs
//! Orthographic and cue-word rules for people, organizations and amounts.

use alloc::vec::Vec;

use crate::engine::Candidate;
use crate::scoring::Evidence;
use crate::tokens::{gap, is_inline_space, Token};
use crate::EntityLabel;

const HONORIFICS: &[&str] = &[
    "Mr", "Mrs", "Ms", "Miss", "Dr", "Prof", "Shri", "Sri", "Smt", "Kumari", "Kum",
];

const NAME_CUES: &[&str] = &["Name", "NAME", "Naam"];

const ORG_KEYWORDS: &[&str] = &[
    "Ltd", "Limited", "Pvt", "Private", "Inc", "Corp", "Corporation", "LLP", "LLC",
    "Bank", "University", "College", "Institute", "Technologies", "Solutions",
    "Industries", "Foundation", "Trust", "Company", "Group", "Hospital", "Ministry",
    "Department", "Authority", "Agency", "Council",
];

/// Lower-case words allowed inside an organization name.
const ORG_CONNECTORS: &[&str] = &["of", "and", "for", "&"];

/// Capitalized words that start sentences rather than names.
const LEADING_STOPWORDS: &[&str] = &[
    "The", "A", "An", "This", "That", "My", "Our", "Your", "His", "Her", "Their",
    "At", "In", "On", "For", "From", "To", "By", "With", "Dear", "Contact", "Name",
];

const CURRENCY_WORDS: &[&str] = &["Rs", "INR", "USD", "EUR"];
const CURRENCY_SYMBOLS: &[char] = &['₹', '$', '€', '£'];

/// Max words taken as a personal name after a cue.
const MAX_NAME_TOKENS: usize = 3;

fn is_honorific(token: &Token<'_>) -> bool {
    HONORIFICS.contains(&token.text)
}

/// Gap between an honorific and the name: optional `.` then spaces.
fn is_honorific_gap(gap: &str) -> bool {
    let rest = gap.strip_prefix('.').unwrap_or(gap);
    is_inline_space(rest)
}

fn is_name_word(token: &Token<'_>) -> bool {
    token.is_title_like() && !HONORIFICS.contains(&token.text)
}

/// Extends from `tokens[first]` over following title-case words joined by
/// inline spaces, returning the index of the last word taken.
fn extend_name(input: &str, tokens: &[Token<'_>], first: usize, max: usize) -> usize {
    let mut last = first;
    while last + 1 < tokens.len()
        && last + 1 - first < max
        && is_name_word(&tokens[last + 1])
        && !ORG_KEYWORDS.contains(&tokens[last + 1].text)
        && is_inline_space(gap(input, &tokens[last], &tokens[last + 1]))
    {
        last += 1;
    }
    last
}

/// `Mr. Rahul Sharma` -> `Rahul Sharma`
pub fn find_honorific_names(input: &str, tokens: &[Token<'_>]) -> Vec<Candidate> {
    let mut out = Vec::new();
    for i in 0..tokens.len().saturating_sub(1) {
        if !is_honorific(&tokens[i]) {
            continue;
        }
        let first = i + 1;
        if !is_name_word(&tokens[first]) || !is_honorific_gap(gap(input, &tokens[i], &tokens[first])) {
            continue;
        }
        let last = extend_name(input, tokens, first, MAX_NAME_TOKENS);
        out.push(Candidate::new(
            tokens[first].start,
            tokens[last].end,
            EntityLabel::Person,
            Evidence::Honorific,
            last - first + 1,
        ));
    }
    out
}

/// `Name: Priya Nair`, `Father's Name : RAJESH KUMAR`
pub fn find_field_names(input: &str, tokens: &[Token<'_>]) -> Vec<Candidate> {
    let mut out = Vec::new();
    for i in 0..tokens.len().saturating_sub(1) {
        if !NAME_CUES.contains(&tokens[i].text) {
            continue;
        }
        let first = i + 1;
        let cue_gap = gap(input, &tokens[i], &tokens[first]);
        let is_field = cue_gap.trim_matches(|c| c == ' ' || c == '\t') == ":";
        if !is_field || !is_name_word(&tokens[first]) {
            continue;
        }
        let last = extend_name(input, tokens, first, MAX_NAME_TOKENS + 1);
        out.push(Candidate::new(
            tokens[first].start,
            tokens[last].end,
            EntityLabel::Person,
            Evidence::FieldCue,
            last - first + 1,
        ));
    }
    out
}

/// Extends a gazetteer given-name hit with a following surname.
pub fn extend_given_name(input: &str, tokens: &[Token<'_>], start: usize, end: usize) -> Option<Candidate> {
    let first = tokens.iter().position(|t| t.start == start && t.end == end)?;
    if !tokens[first].is_title_like() {
        return None;
    }
    let last = extend_name(input, tokens, first, MAX_NAME_TOKENS);
    Some(Candidate::new(
        tokens[first].start,
        tokens[last].end,
        EntityLabel::Person,
        Evidence::GivenName,
        last - first + 1,
    ))
}

/// `Infosys Technologies Ltd`, `Bank of Baroda`
pub fn find_organizations(input: &str, tokens: &[Token<'_>]) -> Vec<Candidate> {
    let mut out = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        if !tokens[i].is_title_like() {
            i += 1;
            continue;
        }

        // Collect a run of title-case words, allowing connectors inside.
        let mut last = i;
        let mut j = i + 1;
        while j < tokens.len() {
            let joined = {
                let g = gap(input, &tokens[j - 1], &tokens[j]);
                is_inline_space(g)
                    || (g == " & ")
                    || (is_inline_space(g.strip_prefix('.').unwrap_or(g)) && ORG_KEYWORDS.contains(&tokens[j - 1].text))
            };
            if !joined {
                break;
            }
            if tokens[j].is_title_like() {
                last = j;
            } else if !ORG_CONNECTORS.contains(&tokens[j].text) {
                break;
            }
            j += 1;
        }

        let mut first = i;
        while first < last && LEADING_STOPWORDS.contains(&tokens[first].text) {
            first += 1;
        }

        let run = &tokens[first..=last];
        let has_keyword = run.iter().any(|t| ORG_KEYWORDS.contains(&t.text));
        let has_name = run.iter().any(|t| t.is_title_like() && !ORG_KEYWORDS.contains(&t.text));

        if has_keyword && has_name && !LEADING_STOPWORDS.contains(&tokens[first].text) {
            let count = run.iter().filter(|t| t.is_title_like()).count();
            out.push(Candidate::new(
                tokens[first].start,
                tokens[last].end,
                EntityLabel::Org,
                Evidence::OrgKeyword,
                count,
            ));
        }
        i = last + 1;
    }
    out
}

/// `Rs. 5,000`, `₹1200.50`, `INR 45000`
pub fn find_money(input: &str, tokens: &[Token<'_>]) -> Vec<Candidate> {
    let mut out = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let tok = &tokens[i];
        if !tok.is_numeric() {
            i += 1;
            continue;
        }

        let before = &input[..tok.start];
        let trimmed = before.trim_end_matches(|c| c == ' ' || c == '\t');
        let symbol_start = trimmed
            .chars()
            .next_back()
            .filter(|c| CURRENCY_SYMBOLS.contains(c))
            .map(|c| trimmed.len() - c.len_utf8());
        let word_start = if i > 0 && CURRENCY_WORDS.contains(&tokens[i - 1].text) {
            let g = gap(input, &tokens[i - 1], tok);
            is_honorific_gap(g).then_some(tokens[i - 1].start).or_else(|| g.is_empty().then_some(tokens[i - 1].start))
        } else {
            None
        };

        let Some(start) = symbol_start.or(word_start) else {
            i += 1;
            continue;
        };

        // Absorb `5,000` and `1200.50` style groupings.
        let mut last = i;
        while last + 1 < tokens.len() && tokens[last + 1].is_numeric() {
            let g = gap(input, &tokens[last], &tokens[last + 1]);
            if g == "," || g == "." {
                last += 1;
            } else {
                break;
            }
        }

        out.push(Candidate::new(start, tokens[last].end, EntityLabel::Money, Evidence::Currency, 1));
        i = last + 1;
    }
    out
}
