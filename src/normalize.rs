use crate::{
    config::Bm25Config,
    stats::FieldLengths,
    term_freqs::TermFrequencies,
};

/// `1 / (1 + b * (length / average - 1))`, or 0 when the field is empty
/// across the whole corpus.
pub fn length_factor(b: f64, length: f64, average: f64) -> f64 {
    if average == 0.0 {
        return 0.0;
    }

    1.0 / b.mul_add(length / average - 1.0, 1.0)
}

/// Scales every term frequency of a field by that field's length factor for
/// the document. Returns new frequencies and leaves `raw` untouched.
pub fn normalize(
    raw: &TermFrequencies,
    lengths: &FieldLengths,
    average_lengths: &FieldLengths,
    config: &Bm25Config,
) -> TermFrequencies {
    raw.clone().map(|field, mut terms| {
        let factor = length_factor(config.field(field).b, lengths[field], average_lengths[field]);
        for frequency in terms.values_mut() {
            *frequency *= factor;
        }
        terms
    })
}
