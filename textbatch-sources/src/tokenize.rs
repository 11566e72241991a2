//! Tokenization seam
//!
//! Document parsing is a collaborator of the pipeline, not part of it:
//! backends only need "an ordered sequence of word tokens" for a body of
//! text. The default tokenizer below covers plain-text corpora; richer
//! parsing plugs in through the trait.

/// Splits a document body into ordered word tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize `text` in reading order
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Lowercasing word tokenizer splitting on non-alphanumeric characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(str::to_lowercase)
            .collect()
    }
}
