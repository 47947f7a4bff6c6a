// File: piiguard-core/src/validators.rs
//! Programmatic validation functions for specific identifier types.
//!
//! These checks run after a regex hit for patterns that opt in with
//! `programmatic_validation: true`, rejecting strings that have the right
//! shape but cannot be a real identifier.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashSet;
use once_cell::sync::Lazy;

const VERHOEFF_D: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

const VERHOEFF_P: [[u8; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 6, 8, 7, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

const GSTIN_ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Fourth PAN character: the holder type (Person, Company, Trust, ...).
static PAN_HOLDER_TYPES: Lazy<HashSet<char>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.extend(['A', 'B', 'C', 'F', 'G', 'H', 'J', 'L', 'P', 'T']);
    set
});

/// Validates a digit string with the Verhoeff checksum (last digit is the check digit).
pub fn is_valid_verhoeff(num_str: &str) -> bool {
    if num_str.is_empty() {
        return false;
    }
    let mut c = 0usize;
    for (i, ch) in num_str.chars().rev().enumerate() {
        let Some(digit) = ch.to_digit(10) else { return false; };
        c = VERHOEFF_D[c][VERHOEFF_P[i % 8][digit as usize] as usize] as usize;
    }
    c == 0
}

/// Aadhaar: 12 digits (whitespace ignored), first digit 2-9, Verhoeff check digit.
pub fn is_valid_aadhaar_programmatically(aadhaar: &str) -> bool {
    let digits: String = aadhaar.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() != 12 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if digits.starts_with('0') || digits.starts_with('1') {
        return false;
    }
    is_valid_verhoeff(&digits)
}

/// PAN: `AAAAA9999A` with a known holder-type letter in position four.
pub fn is_valid_pan_programmatically(pan: &str) -> bool {
    let chars: Vec<char> = pan.chars().collect();
    if chars.len() != 10 {
        return false;
    }
    let letters_ok = chars[..5].iter().all(|c| c.is_ascii_uppercase());
    let digits_ok = chars[5..9].iter().all(|c| c.is_ascii_digit());
    let tail_ok = chars[9].is_ascii_uppercase();

    letters_ok && digits_ok && tail_ok && PAN_HOLDER_TYPES.contains(&chars[3])
}

/// Computes the GSTIN check character for the first 14 characters.
fn gstin_check_char(body: &str) -> Option<char> {
    let mut sum = 0u32;
    for (i, ch) in body.chars().enumerate() {
        let value = GSTIN_ALPHABET.find(ch)? as u32;
        let factor = if i % 2 == 0 { 1 } else { 2 };
        let product = value * factor;
        sum += product / 36 + product % 36;
    }
    let check = ((36 - (sum % 36)) % 36) as usize;
    GSTIN_ALPHABET.chars().nth(check)
}

/// GSTIN: state code, embedded PAN, entity number, `Z`, check character.
pub fn is_valid_gstin_programmatically(gstin: &str) -> bool {
    if gstin.len() != 15 || !gstin.is_ascii() {
        return false;
    }

    let Ok(state_code) = gstin[..2].parse::<u8>() else { return false; };
    if !((1..=38).contains(&state_code) || state_code == 97) {
        return false;
    }

    if !is_valid_pan_programmatically(&gstin[2..12]) {
        return false;
    }

    let bytes = gstin.as_bytes();
    if bytes[13] != b'Z' {
        return false;
    }

    match gstin_check_char(&gstin[..14]) {
        Some(expected) => expected as u8 == bytes[14],
        None => false,
    }
}

/// Dispatches validation by PII kind. Kinds without a validator pass.
pub fn validate_for_kind(kind: &crate::pii_match::PiiKind, value: &str) -> bool {
    use crate::pii_match::PiiKind;
    match kind {
        PiiKind::NationalId => is_valid_aadhaar_programmatically(value),
        PiiKind::TaxId => is_valid_pan_programmatically(value),
        PiiKind::BusinessId => is_valid_gstin_programmatically(value),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verhoeff_known_values() {
        assert!(is_valid_verhoeff("2363"));
        assert!(!is_valid_verhoeff("2364"));
    }

    #[test]
    fn test_aadhaar_validation() {
        // 2345 6789 012 + Verhoeff check digit
        let body = "23456789012";
        let check = (0..10)
            .map(|d| format!("{}{}", body, d))
            .find(|candidate| is_valid_verhoeff(candidate))
            .unwrap();
        let spaced = format!("{} {} {}", &check[..4], &check[4..8], &check[8..]);
        assert!(is_valid_aadhaar_programmatically(&spaced));
        assert!(!is_valid_aadhaar_programmatically("1234 5678 9012"));
    }

    #[test]
    fn test_pan_validation() {
        assert!(is_valid_pan_programmatically("ABCPE1234F"));
        assert!(!is_valid_pan_programmatically("ABCDE1234F"));
        assert!(!is_valid_pan_programmatically("ABCP1234F"));
    }

    #[test]
    fn test_gstin_validation() {
        let body = "27ABCPE1234F1Z";
        let check = gstin_check_char(body).unwrap();
        let gstin = format!("{}{}", body, check);
        assert!(is_valid_gstin_programmatically(&gstin));

        let wrong = if check == '0' { '1' } else { '0' };
        assert!(!is_valid_gstin_programmatically(&format!("{}{}", body, wrong)));
        assert!(!is_valid_gstin_programmatically("99ABCPE1234F1Z5"));
    }
}
