use rust_stemmers::{Algorithm, Stemmer};

/// Pure term normalization strategy applied to every tokenized term
pub trait TermNormalizer: Send + Sync {
    fn normalize(&self, term: String) -> String;

    fn name(&self) -> &str;
}

pub struct IdentityNormalizer;

impl TermNormalizer for IdentityNormalizer {
    fn normalize(&self, term: String) -> String {
        term
    }

    fn name(&self) -> &str {
        "identity"
    }
}

pub struct LowercaseNormalizer;

impl TermNormalizer for LowercaseNormalizer {
    fn normalize(&self, term: String) -> String {
        term.to_lowercase()
    }

    fn name(&self) -> &str {
        "lowercase"
    }
}

/// Lowercases, then applies a Snowball stemmer
pub struct StemmerNormalizer {
    pub stemmer: Stemmer,
}

impl StemmerNormalizer {
    pub fn new(algorithm: Algorithm) -> Self {
        StemmerNormalizer {
            stemmer: Stemmer::create(algorithm),
        }
    }

    pub fn english() -> Self {
        StemmerNormalizer::new(Algorithm::English)
    }
}

impl TermNormalizer for StemmerNormalizer {
    fn normalize(&self, term: String) -> String {
        self.stemmer.stem(&term.to_lowercase()).to_string()
    }

    fn name(&self) -> &str {
        "stemmer"
    }
}
