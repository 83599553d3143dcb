//! A1-style cell and range references

use std::fmt;

/// Zero-based cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    pub col: u32,
    pub row: u32,
}

impl CellAddress {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", col_to_letters(self.col), u64::from(self.row) + 1)
    }
}

/// Encode a zero-based (col, row) pair, e.g. (0, 0) -> "A1"
pub fn encode_cell(col: u32, row: u32) -> String {
    CellAddress::new(col, row).to_string()
}

/// Encode a range between two corners, e.g. "A1:C3"
pub fn encode_range(start: CellAddress, end: CellAddress) -> String {
    format!("{start}:{end}")
}

/// Convert a zero-based column number to letters (0 -> A, 25 -> Z, 26 -> AA)
pub fn col_to_letters(col: u32) -> String {
    // Bijective base 26: there is no zero digit
    let mut n = u64::from(col) + 1;
    let mut letters = Vec::with_capacity(3);
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Parse a reference like "AB10" back into a zero-based address
pub fn decode_cell(cell_ref: &str) -> Option<CellAddress> {
    let split = cell_ref.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cell_ref.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut col = 0u64;
    for ch in letters.chars() {
        col = col * 26 + u64::from(ch.to_ascii_uppercase() as u8 - b'A' + 1);
        if col > u64::from(u32::MAX) + 1 {
            return None;
        }
    }

    let row = digits.parse::<u64>().ok()?.checked_sub(1)?;
    Some(CellAddress {
        col: u32::try_from(col - 1).ok()?,
        row: u32::try_from(row).ok()?,
    })
}
