//! Persisted per-feature scale factors

/// A named vector of per-feature scale factors.
///
/// Datasets are divided by `factors` on the way in and multiplied by them on
/// the way out, one factor per feature column.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleRecord {
    /// Denominator name the record is stored under
    pub name: String,
    /// One factor per feature
    pub factors: Vec<f64>,
}

impl ScaleRecord {
    pub fn new(name: impl Into<String>, factors: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            factors,
        }
    }

    /// Number of features the record scales.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}
