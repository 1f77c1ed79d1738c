//! # Vehicle Matcher
//!
//! Scores every catalog record against a normalized description, resolves
//! the best candidate and converts its raw score into a `0..=10` confidence.
//!
//! A field outside the partial-match set scores when its lowercase value is
//! a non-empty substring of the description. A partial-match field scores
//! its full weight as soon as one of its words appears as a word of the
//! description.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::normalizer::Normalizer;
use crate::scoring::{CONFIDENCE_SCALE, MatcherConfig};
use crate::types::{Candidate, MatchResult, VehicleRecord};

/// The winner picked among a description's candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'c> {
    pub winner: Candidate<'c>,
    /// `true` when more than one candidate shared the top score.
    pub tie: bool,
}

/// Matches free-text descriptions against a [`Catalog`].
///
/// The matcher holds only immutable configuration, so one instance can serve
/// any number of threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    config: MatcherConfig,
    normalizer: Normalizer,
}

impl Matcher {
    /// Creates a matcher with the default normalizer.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`MatcherConfig::validate`].
    pub fn new(config: MatcherConfig) -> Result<Self> {
        Self::with_normalizer(config, Normalizer::new()?)
    }

    /// Creates a matcher with a custom normalizer.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`MatcherConfig::validate`].
    pub fn with_normalizer(config: MatcherConfig, normalizer: Normalizer) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, normalizer })
    }

    #[must_use]
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    #[must_use]
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Raw score of `record` against an already normalized description.
    #[must_use]
    pub fn score(&self, record: &VehicleRecord, normalized: &str) -> u32 {
        self.score_with_words(record, normalized, &word_set(normalized))
    }

    fn score_with_words(
        &self,
        record: &VehicleRecord,
        normalized: &str,
        words: &HashSet<&str>,
    ) -> u32 {
        self.config
            .weights
            .iter()
            .filter(|entry| {
                let value = entry.field.value(record).to_lowercase();
                if self.config.is_partial(entry.field) {
                    value.split_whitespace().any(|word| words.contains(word))
                } else {
                    !value.is_empty() && normalized.contains(value.as_str())
                }
            })
            .map(|entry| entry.weight)
            .sum()
    }

    /// Every record scoring above zero, in catalog order.
    pub fn candidates<'c>(&self, catalog: &'c Catalog, normalized: &str) -> Vec<Candidate<'c>> {
        let words = word_set(normalized);
        catalog
            .records()
            .filter_map(|record| {
                let score = self.score_with_words(record, normalized, &words);
                if score == 0 {
                    return None;
                }
                let popularity = catalog.listing_count(&record.id);
                trace!(id = %record.id, score, popularity, "candidate");
                Some(Candidate {
                    id: &record.id,
                    score,
                    popularity,
                })
            })
            .collect()
    }

    /// Picks the highest-scoring candidate.
    ///
    /// Score ties go to the most listed candidate, then to the lowest
    /// identifier. Returns `None` for an empty slice.
    #[must_use]
    pub fn resolve<'c>(candidates: &[Candidate<'c>]) -> Option<Resolution<'c>> {
        let max_score = candidates.iter().map(|c| c.score).max()?;
        let best: Vec<&Candidate<'c>> =
            candidates.iter().filter(|c| c.score == max_score).collect();

        let tie = best.len() > 1;
        let winner = best.into_iter().min_by(|a, b| {
            b.popularity
                .cmp(&a.popularity)
                .then_with(|| a.id.cmp(b.id))
        })?;

        Some(Resolution {
            winner: winner.clone(),
            tie,
        })
    }

    /// Scales a raw score to `0..=10`, rounding half up, minus one on a tie.
    ///
    /// Exact halves only occur with custom weight tables and always round
    /// up (`2.5` gives 3), not to the nearest even value. Never goes below 0,
    /// and is always 0 when the weights sum to zero.
    #[must_use]
    pub fn confidence(&self, raw_score: u32, tie: bool) -> u8 {
        let total = u64::from(self.config.weights.total());
        if total == 0 {
            return 0;
        }

        let scale = u64::from(CONFIDENCE_SCALE);
        let base = ((u64::from(raw_score) * scale * 2 + total) / (2 * total)).min(scale);
        let base = if tie { base.saturating_sub(1) } else { base };
        // base <= CONFIDENCE_SCALE
        base as u8
    }

    /// Matches a single raw description.
    pub fn match_one(&self, catalog: &Catalog, description: &str) -> MatchResult {
        let normalized = self.normalizer.normalize(description);
        let candidates = self.candidates(catalog, &normalized);

        let Some(resolution) = Self::resolve(&candidates) else {
            debug!(input = description, normalized = %normalized, "no candidate");
            return MatchResult::unmatched(description);
        };

        let Resolution { winner, tie } = resolution;
        let confidence = self.confidence(winner.score, tie);
        debug!(
            input = description,
            normalized = %normalized,
            candidates = candidates.len(),
            winner = %winner.id,
            score = winner.score,
            tie,
            confidence,
            "matched"
        );

        MatchResult::matched(description, winner.id.clone(), confidence, winner.popularity)
    }

    /// Matches descriptions lazily, one at a time, in input order.
    ///
    /// Dropping the iterator abandons the rest of the batch; results already
    /// yielded stay valid.
    pub fn match_iter<'a, I>(
        &'a self,
        catalog: &'a Catalog,
        descriptions: I,
    ) -> impl Iterator<Item = MatchResult> + 'a
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        I::IntoIter: 'a,
    {
        descriptions
            .into_iter()
            .map(move |description| self.match_one(catalog, description.as_ref()))
    }

    /// Matches a batch sequentially. `result[i]` belongs to `descriptions[i]`.
    pub fn match_batch<S: AsRef<str>>(
        &self,
        catalog: &Catalog,
        descriptions: &[S],
    ) -> Vec<MatchResult> {
        self.match_iter(catalog, descriptions).collect()
    }

    /// Matches a batch on the current rayon pool.
    ///
    /// Produces exactly what [`Matcher::match_batch`] produces, in the same
    /// order.
    pub fn match_batch_parallel<S: AsRef<str> + Sync>(
        &self,
        catalog: &Catalog,
        descriptions: &[S],
    ) -> Vec<MatchResult> {
        descriptions
            .par_iter()
            .map(|description| self.match_one(catalog, description.as_ref()))
            .collect()
    }
}

fn word_set(text: &str) -> HashSet<&str> {
    text.split_whitespace().collect()
}
