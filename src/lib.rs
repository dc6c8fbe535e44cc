pub mod config;
pub mod corpus;
pub mod document;
pub mod error;
pub mod field;
pub mod idf;
pub mod normalize;
pub mod scorer;
pub mod stats;
pub mod term_freqs;
pub mod tokenizer;

pub use config::{Bm25Config, FieldParams};
pub use corpus::{Corpus, QueryResults};
pub use document::{Document, Query};
pub use error::{Error, Result};
pub use field::{Field, PerField};
pub use idf::{Idf, IdfTable};
pub use scorer::Bm25Scorer;
pub use term_freqs::TermFrequencies;
