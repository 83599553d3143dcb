//! Unique identifier sequences

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of identifiers that are unique within a process
pub trait IdGenerator: Send + Sync {
    fn next_id(&self, prefix: &str) -> String;
}

/// Monotonic counter combined with a salt chosen at construction
///
/// Ids look like `{prefix}{salt}-{counter}`, both parts in base 36.
#[derive(Debug)]
pub struct SaltedSequence {
    salt: u32,
    counter: AtomicU64,
}

impl SaltedSequence {
    /// Sequence with a random salt
    pub fn new() -> Self {
        Self::seeded(rand::random::<u32>() % 1_000_000_000)
    }

    /// Sequence with a fixed salt, for reproducible output
    pub fn seeded(salt: u32) -> Self {
        Self {
            salt,
            counter: AtomicU64::new(0),
        }
    }

    pub fn reset(&self) {
        self.counter.store(0, Ordering::SeqCst);
    }
}

impl Default for SaltedSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SaltedSequence {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{prefix}{}-{}", to_base36(u64::from(self.salt)), to_base36(n))
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.iter().rev().map(|&b| b as char).collect()
}
