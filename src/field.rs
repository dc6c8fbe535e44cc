use std::{
    fmt::{self, Display},
    ops::{Index, IndexMut},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of the structural parts of a document that is scored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Url,
    Title,
    Body,
    Header,
    Anchor,
}

impl Field {
    pub const ALL: [Self; 5] = [
        Self::Url,
        Self::Title,
        Self::Body,
        Self::Header,
        Self::Anchor,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Title => "title",
            Self::Body => "body",
            Self::Header => "header",
            Self::Anchor => "anchor",
        }
    }

    const fn position(self) -> usize {
        self as usize
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

/// A value for every [`Field`], indexed by the field itself.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerField<T>([T; 5]);

impl<T> PerField<T> {
    pub const fn new(url: T, title: T, body: T, header: T, anchor: T) -> Self {
        Self([url, title, body, header, anchor])
    }

    pub fn from_fn(mut f: impl FnMut(Field) -> T) -> Self {
        Self(Field::ALL.map(&mut f))
    }

    pub fn each_mut(&mut self) -> [&mut T; 5] {
        self.0.each_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &T)> {
        Field::ALL.into_iter().zip(self.0.iter())
    }

    pub fn map<U>(self, mut f: impl FnMut(Field, T) -> U) -> PerField<U> {
        let [url, title, body, header, anchor] = self.0;
        PerField([
            f(Field::Url, url),
            f(Field::Title, title),
            f(Field::Body, body),
            f(Field::Header, header),
            f(Field::Anchor, anchor),
        ])
    }
}

impl<T> Index<Field> for PerField<T> {
    type Output = T;

    fn index(&self, field: Field) -> &Self::Output {
        &self.0[field.position()]
    }
}

impl<T> IndexMut<Field> for PerField<T> {
    fn index_mut(&mut self, field: Field) -> &mut Self::Output {
        &mut self.0[field.position()]
    }
}
