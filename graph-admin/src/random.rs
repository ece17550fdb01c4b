//! Injectable randomness for license choice, credential generation and the
//! user-pruning coin flip.

use rand::Rng;
use std::collections::VecDeque;

pub const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &[u8] = b"0123456789";
pub const PUNCTUATION: &[u8] = b"!#$%&()*+-/:;<=>?@";

pub trait Randomness {
    /// Uniform index into a collection of `len` items; `None` when empty.
    fn pick_index(&mut self, len: usize) -> Option<usize>;

    /// `len` characters drawn independently from `charset`.
    fn sample_string(&mut self, charset: &[u8], len: usize) -> String;

    /// `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool;
}

/// Production source backed by the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl Randomness for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(rand::thread_rng().gen_range(0..len))
    }

    fn sample_string(&mut self, charset: &[u8], len: usize) -> String {
        if charset.is_empty() {
            return String::new();
        }
        let mut rng = rand::thread_rng();
        (0..len)
            .map(|_| char::from(charset[rng.gen_range(0..charset.len())]))
            .collect()
    }

    fn chance(&mut self, probability: f64) -> bool {
        if !probability.is_finite() {
            return false;
        }
        rand::thread_rng().gen_bool(probability.clamp(0.0, 1.0))
    }
}

/// Deterministic source. Queued answers are consumed first; once a queue is
/// empty the defaults apply (index 0, `false`, charset walked in order).
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    indices: VecDeque<usize>,
    chances: VecDeque<bool>,
    cursor: usize
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }

    pub fn with_chances(mut self, chances: impl IntoIterator<Item = bool>) -> Self {
        self.chances.extend(chances);
        self
    }
}

impl Randomness for ScriptedRandom {
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.indices.pop_front().unwrap_or(0) % len)
    }

    fn sample_string(&mut self, charset: &[u8], len: usize) -> String {
        if charset.is_empty() {
            return String::new();
        }
        (0..len)
            .map(|_| {
                let c = charset[self.cursor % charset.len()];
                self.cursor += 1;
                char::from(c)
            })
            .collect()
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }
}

pub fn password_charset() -> Vec<u8> {
    [LETTERS, DIGITS, PUNCTUATION].concat()
}
