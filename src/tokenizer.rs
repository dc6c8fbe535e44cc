use crate::error::{Error, Result};
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

pub struct Tokenizer {
    stemmer: Option<Stemmer>,
    url_separator: Regex,
}

impl Tokenizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            stemmer: None,
            url_separator: Regex::new(r"[^0-9a-zA-Z]+")
                .map_err(|e| Error::Generic(format!("Failed to compile regex: {e}")))?,
        })
    }

    /// Same as [`Tokenizer::new`], but terms are also reduced to their English stem.
    pub fn stemming() -> Result<Self> {
        Ok(Self {
            stemmer: Some(Stemmer::create(Algorithm::English)),
            ..Self::new()?
        })
    }

    pub fn url_tokens<'a>(&'a self, url: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.url_separator
            .split(url)
            .filter(|token| !token.is_empty())
    }

    pub fn count_url_tokens(&self, url: &str) -> u64 {
        self.url_tokens(url).count() as u64
    }

    /// Lowercases a raw token and stems it when stemming is enabled.
    pub fn term(&self, token: &str) -> String {
        let lowered = token.to_lowercase();
        match &self.stemmer {
            Some(stemmer) => stemmer.stem(&lowered).into_owned(),
            None => lowered,
        }
    }

    pub fn url_terms(&self, url: &str) -> Vec<String> {
        self.url_tokens(url).map(|token| self.term(token)).collect()
    }

    pub fn text_terms(&self, text: &str) -> Vec<String> {
        words(text).map(|token| self.term(token)).collect()
    }
}

/// Space, tab, line feed, vertical tab, form feed and carriage return.
/// Non-breaking and other Unicode spaces stay inside a word.
const fn is_word_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_word_separator).filter(|token| !token.is_empty())
}

pub fn count_words(text: &str) -> u64 {
    words(text).count() as u64
}
