//! Raw per-field term frequencies of a document for one query.

use std::collections::HashMap;

use crate::{
    document::{Document, Query},
    field::{Field, PerField},
    tokenizer::Tokenizer,
};

/// Field → term → frequency.
pub type TermFrequencies = PerField<HashMap<String, f64>>;

/// Runs every query term through the tokenizer so it matches document terms.
pub fn normalize_query(query: &Query, tokenizer: &Tokenizer) -> Query {
    query.terms().iter().map(|term| tokenizer.term(term)).collect()
}

/// Counts the query's terms in each field of `doc`. Every query term gets an
/// entry in every field, zero when it does not occur.
pub fn extract(doc: &Document, query: &Query, tokenizer: &Tokenizer) -> TermFrequencies {
    let mut tfs = TermFrequencies::from_fn(|_| {
        query
            .terms()
            .iter()
            .map(|term| (term.clone(), 0.0))
            .collect()
    });

    if let Some(url) = &doc.url {
        count_terms(&mut tfs[Field::Url], tokenizer.url_terms(url), 1.0);
    }

    if let Some(title) = &doc.title {
        count_terms(&mut tfs[Field::Title], tokenizer.text_terms(title), 1.0);
    }

    for (term, positions) in doc.body_hits.iter().flatten() {
        count_terms(
            &mut tfs[Field::Body],
            [tokenizer.term(term)],
            positions.len() as f64,
        );
    }

    for header in doc.headers.iter().flatten() {
        count_terms(&mut tfs[Field::Header], tokenizer.text_terms(header), 1.0);
    }

    for (text, &count) in doc.anchors.iter().flatten() {
        count_terms(
            &mut tfs[Field::Anchor],
            tokenizer.text_terms(text),
            f64::from(count),
        );
    }

    tfs
}

/// Adds `weight` for each occurrence of a term that is already tracked.
fn count_terms(
    counts: &mut HashMap<String, f64>,
    terms: impl IntoIterator<Item = String>,
    weight: f64,
) {
    for term in terms {
        if let Some(count) = counts.get_mut(&term) {
            *count += weight;
        }
    }
}
