//! BM25 scoring of a document against a query.
//!
//! The scorer precomputes field lengths, corpus averages and log-PageRank
//! scores when it is built, and is read-only afterwards. Each scoring call
//! only borrows those caches, so one scorer can be shared between threads.

use std::collections::BTreeMap;

use crate::{
    config::Bm25Config,
    corpus::Corpus,
    document::Query,
    error::{Error, Result},
    field::Field,
    idf::Idf,
    normalize::normalize,
    stats::CorpusStats,
    term_freqs::TermFrequencies,
    tokenizer::Tokenizer,
};

#[derive(Debug, Clone)]
pub struct Bm25Scorer {
    config: Bm25Config,
    stats: CorpusStats,
}

impl Bm25Scorer {
    pub fn new(config: Bm25Config, corpus: &Corpus) -> Result<Self> {
        config.validate()?;

        let stats = CorpusStats::compute(corpus, &Tokenizer::new()?, config.page_rank_lambda_prime);

        Ok(Self { config, stats })
    }

    pub const fn config(&self) -> &Bm25Config {
        &self.config
    }

    pub const fn stats(&self) -> &CorpusStats {
        &self.stats
    }

    /// Length-normalized copy of `raw` for the document at `url`.
    pub fn normalize(&self, url: &str, raw: &TermFrequencies) -> Result<TermFrequencies> {
        let doc = self.stats.doc(url)?;

        Ok(normalize(
            raw,
            &doc.lengths,
            self.stats.average_lengths(),
            &self.config,
        ))
    }

    /// Combines already normalized frequencies into the final score.
    ///
    /// Each distinct term in `query_counts` contributes once, however often it
    /// appears in the query.
    pub fn net_score(
        &self,
        url: &str,
        normalized: &TermFrequencies,
        query_counts: &BTreeMap<String, f64>,
        idf: &impl Idf,
    ) -> Result<f64> {
        let doc = self.stats.doc(url)?;
        let mut score = 0.0;

        for term in query_counts.keys() {
            let wdt = self.weighted_frequency(normalized, term)?;
            score += saturate(wdt, self.config.k1) * idf.idf(term);
        }

        Ok(score + self.config.page_rank_lambda * doc.page_rank_score)
    }

    /// Scores the document at `url` for `query` from its raw term frequencies.
    pub fn score(
        &self,
        url: &str,
        raw: &TermFrequencies,
        query: &Query,
        idf: &impl Idf,
    ) -> Result<f64> {
        let normalized = self.normalize(url, raw)?;
        self.net_score(url, &normalized, &query.term_counts(), idf)
    }

    fn weighted_frequency(&self, normalized: &TermFrequencies, term: &str) -> Result<f64> {
        Field::ALL.into_iter().try_fold(0.0, |wdt, field| -> Result<f64> {
            let frequency = normalized[field].get(term).ok_or_else(|| {
                Error::MissingTermFrequency {
                    field,
                    term: term.to_string(),
                }
            })?;

            Ok(self.config.field(field).weight.mul_add(*frequency, wdt))
        })
    }
}

/// `wdt / (wdt + k1)`: 0 at 0, strictly increasing, approaching 1.
pub const fn saturate(wdt: f64, k1: f64) -> f64 {
    wdt / (wdt + k1)
}
