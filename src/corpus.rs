use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::{
    document::{Document, Query},
    error::{Error, Result},
};

/// The documents returned for one query, keyed by URL.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct QueryResults {
    pub query: Query,
    pub documents: BTreeMap<String, Document>,
}

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    pub queries: Vec<QueryResults>,
}

impl Corpus {
    pub const fn new(queries: Vec<QueryResults>) -> Self {
        Self { queries }
    }

    /// Every `(url, document)` pair in query order. A URL returned for
    /// several queries is yielded once per query.
    pub fn documents(&self) -> impl Iterator<Item = (&str, &Document)> {
        self.queries.iter().flat_map(|results| {
            results
                .documents
                .iter()
                .map(|(url, doc)| (url.as_str(), doc))
        })
    }

    pub fn from_reader(reader: impl std::io::Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Loads a corpus from a JSON file, or from every `*.json` file below a
    /// directory, merged in path order.
    pub fn load(path: &Path) -> Result<Self> {
        if path.is_file() {
            return Self::from_reader(BufReader::new(File::open(path)?));
        }
        if !path.is_dir() {
            return Err(Error::IO(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Corpus path {} does not exist", path.display()),
            )));
        }

        let mut files: Vec<PathBuf> = WalkDir::new(path)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        let mut corpus = Self::default();
        for file in files {
            let part = Self::from_reader(BufReader::new(File::open(&file)?))?;
            tracing::debug!(path = %file.display(), queries = part.queries.len(), "loaded corpus file");
            corpus.queries.extend(part.queries);
        }

        Ok(corpus)
    }
}
