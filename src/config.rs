//! Tunable BM25 parameters.
//!
//! [`Bm25Config`] is an immutable value handed to the scorer at construction.
//! It can be written to and read back from a flat `name value` file that
//! external tuning tools consume.

use std::{
    fmt::Write as _,
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    error::{Error, Result},
    field::{Field, PerField},
};

/// Weight and length-normalization slope for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    /// Multiplier applied to the field's normalized term frequency.
    pub weight: f64,
    /// How strongly the field's length pulls its term frequencies, in `[0, 1]`.
    pub b: f64,
}

impl FieldParams {
    pub const fn new(weight: f64, b: f64) -> Self {
        Self { weight, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Config {
    pub fields: PerField<FieldParams>,
    /// Saturation constant for the weighted term frequency.
    pub k1: f64,
    /// Weight of the log-PageRank term in the final score.
    pub page_rank_lambda: f64,
    /// Offset added to PageRank before taking the logarithm.
    pub page_rank_lambda_prime: f64,
}

impl Default for Bm25Config {
    fn default() -> Self {
        Self {
            fields: PerField::new(
                FieldParams::new(0.2, 0.5),
                FieldParams::new(1.0, 0.7),
                FieldParams::new(0.2, 0.8),
                FieldParams::new(0.5, 0.8),
                FieldParams::new(0.5, 0.4),
            ),
            k1: 5.0,
            page_rank_lambda: 1.0,
            page_rank_lambda_prime: 0.7,
        }
    }
}

/// Parameter names in the order they are written to the parameter file.
pub const PARAMETER_NAMES: [&str; 13] = [
    "urlweight",
    "titleweight",
    "bodyweight",
    "headerweight",
    "anchorweight",
    "burl",
    "btitle",
    "bheader",
    "bbody",
    "banchor",
    "k1",
    "pageRankLambda",
    "pageRankLambdaPrime",
];

impl Bm25Config {
    pub fn field(&self, field: Field) -> FieldParams {
        self.fields[field]
    }

    pub fn validate(&self) -> Result<()> {
        let parameters = self.parameters();

        for (name, value) in parameters {
            if !value.is_finite() {
                return Err(Error::InvalidParameter {
                    name,
                    reason: format!("{value} is not finite"),
                });
            }
        }

        for (name, weight) in &parameters[..5] {
            if *weight < 0.0 {
                return Err(Error::InvalidParameter {
                    name: *name,
                    reason: "must be non-negative".to_string(),
                });
            }
        }

        for (name, b) in &parameters[5..10] {
            if !(0.0..=1.0).contains(b) {
                return Err(Error::InvalidParameter {
                    name: *name,
                    reason: "must be within [0, 1]".to_string(),
                });
            }
        }

        let [.., (k1_name, k1), (lambda_name, lambda), (prime_name, prime)] = parameters;
        if k1 <= 0.0 {
            return Err(Error::InvalidParameter {
                name: k1_name,
                reason: "must be positive".to_string(),
            });
        }
        if lambda < 0.0 {
            return Err(Error::InvalidParameter {
                name: lambda_name,
                reason: "must be non-negative".to_string(),
            });
        }
        if prime <= 0.0 {
            return Err(Error::InvalidParameter {
                name: prime_name,
                reason: "must be positive".to_string(),
            });
        }

        Ok(())
    }

    /// Every parameter as `(name, value)`, in file order.
    pub fn parameters(&self) -> [(&'static str, f64); 13] {
        let mut config = *self;
        let values = config.values_mut().map(|value| *value);

        std::array::from_fn(|i| (PARAMETER_NAMES[i], values[i]))
    }

    /// Mutable slots for every parameter, in the order of [`PARAMETER_NAMES`].
    fn values_mut(&mut self) -> [&mut f64; 13] {
        let [url, title, body, header, anchor] = self.fields.each_mut();

        [
            &mut url.weight,
            &mut title.weight,
            &mut body.weight,
            &mut header.weight,
            &mut anchor.weight,
            &mut url.b,
            &mut title.b,
            &mut header.b,
            &mut body.b,
            &mut anchor.b,
            &mut self.k1,
            &mut self.page_rank_lambda,
            &mut self.page_rank_lambda_prime,
        ]
    }

    fn set(&mut self, name: &str, value: f64) -> Result<()> {
        let index = PARAMETER_NAMES
            .iter()
            .position(|known| *known == name)
            .ok_or_else(|| Error::UnknownParameter(name.to_string()))?;
        *self.values_mut()[index] = value;

        Ok(())
    }

    /// Renders the parameter file contents, one `name value` pair per line.
    /// Whole numbers keep their fractional part (`1.0`, not `1`).
    pub fn to_params_string(&self) -> String {
        self.parameters()
            .iter()
            .fold(String::new(), |mut out, (name, value)| {
                let _ = writeln!(out, "{name} {value:?}");
                out
            })
    }

    pub fn write_params(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(self.to_params_string().as_bytes())?;
        writer.flush()?;

        Ok(())
    }

    /// Writes the parameter file, logging instead of failing.
    pub fn write_params_best_effort(&self, path: &Path) {
        if let Err(e) = self.write_params(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to write BM25 parameters");
        }
    }

    /// Parses a parameter file. Names that are absent keep their defaults.
    pub fn parse_params(reader: impl BufRead) -> Result<Self> {
        let mut config = Self::default();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (name, value) = line
                .split_once(char::is_whitespace)
                .ok_or_else(|| Error::Generic(format!("Malformed parameter line '{line}'")))?;
            let value = value.trim().parse::<f64>().map_err(|e| {
                Error::Generic(format!("Couldn't parse value of parameter {name}: {e}"))
            })?;

            config.set(name, value)?;
        }

        config.validate()?;

        Ok(config)
    }

    pub fn read_params(path: &Path) -> Result<Self> {
        Self::parse_params(BufReader::new(File::open(path)?))
    }
}
