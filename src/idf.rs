use std::{collections::HashMap, fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Inverse document frequency lookup. The implementation decides what an
/// unseen term is worth.
pub trait Idf {
    fn idf(&self, term: &str) -> f64;
}

impl Idf for HashMap<String, f64> {
    fn idf(&self, term: &str) -> f64 {
        self.get(term).copied().unwrap_or_default()
    }
}

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct IdfTable {
    pub idfs: HashMap<String, f64>,
    /// Returned for terms missing from `idfs`.
    #[serde(default)]
    pub unseen: f64,
}

impl IdfTable {
    pub const fn new(idfs: HashMap<String, f64>, unseen: f64) -> Self {
        Self { idfs, unseen }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
    }
}

impl Idf for IdfTable {
    fn idf(&self, term: &str) -> f64 {
        self.idfs.get(term).copied().unwrap_or(self.unseen)
    }
}
