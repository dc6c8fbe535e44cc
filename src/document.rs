use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body_length: u64,
    #[serde(default)]
    pub headers: Option<Vec<String>>,
    /// Anchor text mapped to the number of incoming links that use it.
    #[serde(default)]
    pub anchors: Option<HashMap<String, u32>>,
    /// Body term mapped to the positions it occurs at.
    #[serde(default)]
    pub body_hits: Option<HashMap<String, Vec<u32>>>,
    #[serde(default)]
    pub page_rank: f64,
}

#[derive(Debug, PartialEq, Eq, Clone, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query {
    terms: Vec<String>,
}

impl Query {
    pub const fn new(terms: Vec<String>) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// How often each distinct term occurs in the query, ordered by term.
    pub fn term_counts(&self) -> BTreeMap<String, f64> {
        let mut counts = BTreeMap::new();
        for term in &self.terms {
            *counts.entry(term.clone()).or_insert(0.0) += 1.0;
        }
        counts
    }
}

impl<S: Into<String>> FromIterator<S> for Query {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.terms.join(" "))
    }
}
