// piiguard-ner/src/gazetteer/mod.rs
//! Labelled term lists compiled into a single Aho-Corasick automaton.
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use daachorse::{DoubleArrayAhoCorasick, DoubleArrayAhoCorasickBuilder, MatchKind};

use crate::EntityLabel;

const COUNTRIES: &[&str] = &[
    "India", "United States", "United States of America", "USA", "United Kingdom", "UK",
    "Canada", "Australia", "Germany", "France", "Japan", "China", "Singapore", "Nepal",
    "Sri Lanka", "Bangladesh", "Pakistan", "Bhutan", "United Arab Emirates", "UAE",
];

const INDIAN_STATES: &[&str] = &[
    "Andhra Pradesh", "Assam", "Bihar", "Chhattisgarh", "Goa", "Gujarat", "Haryana",
    "Himachal Pradesh", "Jammu and Kashmir", "Jharkhand", "Karnataka", "Kerala",
    "Madhya Pradesh", "Maharashtra", "Odisha", "Punjab", "Rajasthan", "Tamil Nadu",
    "Telangana", "Uttar Pradesh", "Uttarakhand", "West Bengal",
];

const CITIES: &[&str] = &[
    "Mumbai", "Delhi", "New Delhi", "Bengaluru", "Bangalore", "Chennai", "Kolkata",
    "Hyderabad", "Pune", "Ahmedabad", "Jaipur", "Lucknow", "Surat", "Kanpur", "Nagpur",
    "Indore", "Bhopal", "Patna", "Noida", "Gurugram", "Gurgaon", "Kochi", "Chandigarh",
    "Mysuru", "Visakhapatnam", "Coimbatore", "London", "New York", "Paris", "Tokyo", "Dubai",
];

const LOCATIONS: &[&str] = &[
    "Himalayas", "Ganges", "Ganga", "Yamuna", "Western Ghats", "Eastern Ghats", "Deccan",
    "Thar Desert", "Bay of Bengal", "Arabian Sea", "Indian Ocean",
];

const ORGANIZATIONS: &[&str] = &[
    "Reserve Bank of India", "RBI", "State Bank of India", "SBI", "Income Tax Department",
    "Unique Identification Authority of India", "UIDAI", "Election Commission of India",
    "Infosys", "Tata Consultancy Services", "TCS", "Wipro", "Reliance Industries",
    "HDFC Bank", "ICICI Bank", "Axis Bank", "Google", "Microsoft", "Amazon",
];

const GIVEN_NAMES: &[&str] = &[
    "Aarav", "Amit", "Anjali", "Arjun", "Deepak", "Divya", "Kavita", "Meera", "Neha",
    "Pooja", "Priya", "Rahul", "Rajesh", "Ravi", "Rohan", "Sanjay", "Sneha", "Sunita",
    "Suresh", "Vikram", "John", "Mary", "David", "Sarah", "Michael", "Emma",
];

/// Failure to compile the automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GazetteerError {
    /// No usable terms were supplied.
    Empty,
    /// The automaton builder rejected the term set.
    Build(String),
}

impl fmt::Display for GazetteerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GazetteerError::Empty => write!(f, "gazetteer has no terms"),
            GazetteerError::Build(msg) => write!(f, "failed to build gazetteer automaton: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GazetteerError {}

/// A term found in text, with byte offsets into the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GazetteerHit {
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
}

/// Case-insensitive, leftmost-longest term matcher with word-boundary checks.
pub struct Gazetteer {
    automaton: DoubleArrayAhoCorasick<u32>,
    labels: Vec<EntityLabel>,
    len: usize,
}

impl fmt::Debug for Gazetteer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gazetteer")
         .field("automaton", &"<DoubleArrayAhoCorasick>")
         .field("terms", &self.len)
         .finish()
    }
}

impl Gazetteer {
    /// The built-in term lists.
    pub fn builtin() -> Result<Self, GazetteerError> {
        Self::from_terms(builtin_terms())
    }

    /// The built-in term lists plus caller-supplied terms.
    /// Built-in labels win when the same term appears twice.
    pub fn with_extra_terms<I, S>(extra: I) -> Result<Self, GazetteerError>
    where
        I: IntoIterator<Item = (S, EntityLabel)>,
        S: AsRef<str>,
    {
        let mut terms: Vec<(String, EntityLabel)> = builtin_terms()
            .map(|(t, l)| (t.to_string(), l))
            .collect();
        terms.extend(extra.into_iter().map(|(t, l)| (t.as_ref().to_string(), l)));
        Self::from_terms(terms)
    }

    /// Compiles an arbitrary labelled term list. Terms are matched ASCII
    /// case-insensitively; blank terms are ignored and the first label given
    /// for a duplicated term is kept.
    pub fn from_terms<I, S>(terms: I) -> Result<Self, GazetteerError>
    where
        I: IntoIterator<Item = (S, EntityLabel)>,
        S: AsRef<str>,
    {
        let mut unique: BTreeMap<Vec<u8>, EntityLabel> = BTreeMap::new();
        for (term, label) in terms {
            let trimmed = term.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            unique.entry(trimmed.as_bytes().to_ascii_lowercase()).or_insert(label);
        }

        if unique.is_empty() {
            return Err(GazetteerError::Empty);
        }

        let mut labels = Vec::with_capacity(unique.len());
        let mut patvals = Vec::with_capacity(unique.len());
        for (idx, (pattern, label)) in unique.into_iter().enumerate() {
            labels.push(label);
            patvals.push((pattern, idx as u32));
        }
        let len = labels.len();

        let automaton = DoubleArrayAhoCorasickBuilder::new()
            .match_kind(MatchKind::LeftmostLongest)
            .build_with_values(patvals)
            .map_err(|e| GazetteerError::Build(e.to_string()))?;

        Ok(Self { automaton, labels, len })
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Finds all whole-word term occurrences in `text`.
    /// Word-boundary aware, so "Pune" does not match inside "Punekar".
    pub fn find(&self, text: &str) -> Vec<GazetteerHit> {
        let haystack = text.as_bytes().to_ascii_lowercase();
        let mut hits = Vec::new();

        for matched in self.automaton.leftmost_find_iter(&haystack) {
            let start = matched.start();
            let end = matched.end();

            let prefix_ok = text[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric());
            let suffix_ok = text[end..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric());

            if prefix_ok && suffix_ok {
                if let Some(label) = self.labels.get(matched.value() as usize) {
                    hits.push(GazetteerHit { start, end, label: *label });
                }
            }
        }
        hits
    }
}

fn builtin_terms() -> impl Iterator<Item = (&'static str, EntityLabel)> {
    COUNTRIES.iter().map(|t| (*t, EntityLabel::Gpe))
        .chain(INDIAN_STATES.iter().map(|t| (*t, EntityLabel::Gpe)))
        .chain(CITIES.iter().map(|t| (*t, EntityLabel::Gpe)))
        .chain(LOCATIONS.iter().map(|t| (*t, EntityLabel::Loc)))
        .chain(ORGANIZATIONS.iter().map(|t| (*t, EntityLabel::Org)))
        .chain(GIVEN_NAMES.iter().map(|t| (*t, EntityLabel::Person)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_builtin_finds_cities_and_states() {
        let gaz = Gazetteer::builtin().unwrap();
        let text = "Moved from Pune to Tamil Nadu last year.";
        let hits = gaz.find(text);
        let found: Vec<&str> = hits.iter().map(|h| &text[h.start..h.end]).collect();
        assert_eq!(found, vec!["Pune", "Tamil Nadu"]);
        assert!(hits.iter().all(|h| h.label == EntityLabel::Gpe));
    }

    #[test]
    fn test_leftmost_longest_prefers_longer_term() {
        let gaz = Gazetteer::builtin().unwrap();
        let text = "Office in New Delhi";
        let hits = gaz.find(text);
        assert_eq!(hits.len(), 1);
        assert_eq!(&text[hits[0].start..hits[0].end], "New Delhi");
    }

    #[test]
    fn test_word_boundaries_are_respected() {
        let gaz = Gazetteer::builtin().unwrap();
        assert!(gaz.find("Punekar and Indiana").is_empty());
    }

    #[test]
    fn test_case_insensitive_match() {
        let gaz = Gazetteer::builtin().unwrap();
        let hits = gaz.find("lives in MUMBAI");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].label, EntityLabel::Gpe);
    }

    #[test]
    fn test_extra_terms_and_duplicates() {
        let gaz = Gazetteer::with_extra_terms(vec![("Acme Widgets", EntityLabel::Org), ("Pune", EntityLabel::Org)]).unwrap();
        let text = "Acme Widgets, Pune";
        let hits = gaz.find(text);
        assert_eq!(hits[0].label, EntityLabel::Org);
        assert_eq!(hits[1].label, EntityLabel::Gpe);
    }

    #[test]
    fn test_empty_term_list_is_rejected() {
        let terms: Vec<(&str, EntityLabel)> = vec![("  ", EntityLabel::Gpe)];
        assert_eq!(Gazetteer::from_terms(terms).unwrap_err(), GazetteerError::Empty);
    }
}
