use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::models::DocumentType;

pub const NUMBER_MIN: u32 = 100_000;
pub const NUMBER_MAX: u32 = 999_999;
const MAX_UNIQUE_ATTEMPTS: usize = 32;

/// Issues record numbers of the form `II-МЮ №123456`.
///
/// Numbers are random and, unless uniqueness is requested by the caller, may
/// collide with numbers already in the registry.
pub struct NumberGenerator {
    rng: StdRng,
}

impl NumberGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn generate(&mut self, doc_type: DocumentType) -> String {
        let suffix = self.rng.gen_range(NUMBER_MIN..=NUMBER_MAX);
        format_number(doc_type, suffix)
    }

    /// Retries until `taken` rejects the candidate or the attempts run out; the
    /// last candidate is returned either way.
    pub fn generate_unique(
        &mut self,
        doc_type: DocumentType,
        taken: impl Fn(&str) -> bool,
    ) -> String {
        let mut candidate = self.generate(doc_type);
        for _ in 1..MAX_UNIQUE_ATTEMPTS {
            if !taken(&candidate) {
                return candidate;
            }
            candidate = self.generate(doc_type);
        }
        if taken(&candidate) {
            warn!(number = %candidate, doc_type = %doc_type, "could not find an unused record number");
        }
        candidate
    }
}

impl Default for NumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_number(doc_type: DocumentType, suffix: u32) -> String {
    format!("{}-МЮ №{suffix}", doc_type.series())
}
