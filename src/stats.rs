//! Per-document field lengths and corpus-wide averages, computed once.

use std::collections::HashMap;

use crate::{
    corpus::Corpus,
    document::Document,
    error::{Error, Result},
    field::{Field, PerField},
    tokenizer::{count_words, Tokenizer},
};

pub type FieldLengths = PerField<f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocStats {
    pub lengths: FieldLengths,
    /// `ln(page_rank_lambda_prime + page_rank)`.
    pub page_rank_score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct CorpusStats {
    docs: HashMap<String, DocStats>,
    average_lengths: FieldLengths,
}

impl CorpusStats {
    /// Walks every document once. A URL seen under several queries is only
    /// counted the first time.
    pub fn compute(corpus: &Corpus, tokenizer: &Tokenizer, page_rank_lambda_prime: f64) -> Self {
        let mut docs = HashMap::new();
        let mut totals = FieldLengths::default();

        for (url, doc) in corpus.documents() {
            if docs.contains_key(url) {
                continue;
            }

            let lengths = field_lengths(doc, tokenizer);
            for (field, length) in lengths.iter() {
                totals[field] += length;
            }

            docs.insert(
                url.to_string(),
                DocStats {
                    lengths,
                    page_rank_score: (page_rank_lambda_prime + doc.page_rank).ln(),
                },
            );
        }

        let average_lengths = if docs.is_empty() {
            FieldLengths::default()
        } else {
            let count = docs.len() as f64;
            totals.map(|_, total| total / count)
        };

        tracing::debug!(
            documents = docs.len(),
            avg_url = average_lengths[Field::Url],
            avg_title = average_lengths[Field::Title],
            avg_body = average_lengths[Field::Body],
            avg_header = average_lengths[Field::Header],
            avg_anchor = average_lengths[Field::Anchor],
            "computed corpus field lengths"
        );

        Self {
            docs,
            average_lengths,
        }
    }

    pub fn doc(&self, url: &str) -> Result<&DocStats> {
        self.docs
            .get(url)
            .ok_or_else(|| Error::UnknownDocument(url.to_string()))
    }

    pub const fn average_lengths(&self) -> &FieldLengths {
        &self.average_lengths
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

pub fn field_lengths(doc: &Document, tokenizer: &Tokenizer) -> FieldLengths {
    let url = doc
        .url
        .as_deref()
        .map_or(0, |url| tokenizer.count_url_tokens(url));

    let title = doc.title.as_deref().map_or(0, count_words);

    let header = doc
        .headers
        .iter()
        .flatten()
        .map(|header| count_words(header))
        .sum::<u64>();

    let anchor = doc
        .anchors
        .iter()
        .flatten()
        .map(|(text, &count)| count_words(text) * u64::from(count))
        .sum::<u64>();

    PerField::new(
        url as f64,
        title as f64,
        doc.body_length as f64,
        header as f64,
        anchor as f64,
    )
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use super::*;
    use crate::corpus::QueryResults;

    fn tokenizer() -> Tokenizer {
        Tokenizer::new().expect("Failed to create tokenizer")
    }

    fn corpus(docs: Vec<(&str, Document)>) -> Corpus {
        Corpus::new(vec![QueryResults {
            query: ["stanford"].into_iter().collect(),
            documents: docs
                .into_iter()
                .map(|(url, doc)| (url.to_string(), doc))
                .collect::<BTreeMap<_, _>>(),
        }])
    }

    #[test]
    fn lengths_of_full_document() {
        let doc = Document {
            url: Some("http://cs.stanford.edu/people/".to_string()),
            title: Some("  Stanford CS   People ".to_string()),
            body_length: 421,
            headers: Some(vec!["Faculty".to_string(), "Staff and students".to_string()]),
            anchors: Some(HashMap::from([
                ("stanford cs".to_string(), 3),
                ("people".to_string(), 2),
            ])),
            body_hits: None,
            page_rank: 4.0,
        };

        let lengths = field_lengths(&doc, &tokenizer());

        assert_eq!(lengths[Field::Url], 5.0);
        assert_eq!(lengths[Field::Title], 3.0);
        assert_eq!(lengths[Field::Body], 421.0);
        assert_eq!(lengths[Field::Header], 4.0);
        assert_eq!(lengths[Field::Anchor], 8.0);
    }

    #[test]
    fn missing_fields_have_zero_length() {
        let doc = Document {
            body_length: 10,
            ..Document::default()
        };

        let lengths = field_lengths(&doc, &tokenizer());

        assert_eq!(lengths[Field::Url], 0.0);
        assert_eq!(lengths[Field::Title], 0.0);
        assert_eq!(lengths[Field::Header], 0.0);
        assert_eq!(lengths[Field::Anchor], 0.0);
        assert_eq!(lengths[Field::Body], 10.0);
    }

    #[test]
    fn unicode_spaces_do_not_split_words() {
        let doc = Document {
            title: Some("Stanford\u{a0}University".to_string()),
            headers: Some(vec!["Gates\u{2003}Hall".to_string()]),
            anchors: Some(HashMap::from([("main\u{a0}quad tour".to_string(), 2)])),
            ..Document::default()
        };

        let lengths = field_lengths(&doc, &tokenizer());

        assert_eq!(lengths[Field::Title], 1.0);
        assert_eq!(lengths[Field::Header], 1.0);
        assert_eq!(lengths[Field::Anchor], 4.0);
    }

    #[test]
    fn averages_over_documents() {
        let a = Document {
            title: Some("one two".to_string()),
            body_length: 100,
            ..Document::default()
        };
        let b = Document {
            title: Some("one two three four".to_string()),
            body_length: 300,
            ..Document::default()
        };

        let stats = CorpusStats::compute(&corpus(vec![("a", a), ("b", b)]), &tokenizer(), 0.7);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats.average_lengths()[Field::Title], 3.0);
        assert_eq!(stats.average_lengths()[Field::Body], 200.0);
        assert_eq!(stats.average_lengths()[Field::Anchor], 0.0);
    }

    #[test]
    fn repeated_url_is_counted_once() {
        let doc = Document {
            body_length: 50,
            ..Document::default()
        };
        let mut corpus = corpus(vec![("a", doc.clone())]);
        corpus.queries.push(QueryResults {
            query: ["gates"].into_iter().collect(),
            documents: BTreeMap::from([
                ("a".to_string(), doc),
                (
                    "b".to_string(),
                    Document {
                        body_length: 150,
                        ..Document::default()
                    },
                ),
            ]),
        });

        let stats = CorpusStats::compute(&corpus, &tokenizer(), 0.7);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats.average_lengths()[Field::Body], 100.0);
    }

    #[test]
    fn caches_log_page_rank() {
        let doc = Document {
            page_rank: 0.0,
            ..Document::default()
        };

        let stats = CorpusStats::compute(&corpus(vec![("a", doc)]), &tokenizer(), 0.7);
        let page_rank_score = stats.doc("a").expect("document a").page_rank_score;

        assert!((page_rank_score - 0.7_f64.ln()).abs() < 1e-12);
        assert!((page_rank_score + 0.357).abs() < 1e-3);
    }

    #[test]
    fn empty_corpus_has_zero_averages() {
        let stats = CorpusStats::compute(&Corpus::default(), &tokenizer(), 0.7);

        assert!(stats.is_empty());
        for (_, average) in stats.average_lengths().iter() {
            assert_eq!(*average, 0.0);
        }
        assert!(matches!(stats.doc("a"), Err(Error::UnknownDocument(_))));
    }
}
