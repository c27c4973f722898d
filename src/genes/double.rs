use super::{Gene, NumericGene, MAX_GENERATE_ATTEMPTS};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::Arc;

pub type DoubleFilter = Arc<dyn Fn(f64) -> bool + Send + Sync>;

/// Floating-point gene with a half-open range and an optional value filter.
#[derive(Clone, Serialize, Deserialize)]
pub struct DoubleGene {
    value: f64,
    range: Range<f64>,
    #[serde(skip)]
    filter: Option<DoubleFilter>,
}

impl DoubleGene {
    pub fn new(value: f64, range: Range<f64>) -> Self {
        Self {
            value,
            range,
            filter: None,
        }
    }

    pub fn with_filter(value: f64, range: Range<f64>, filter: DoubleFilter) -> Self {
        Self {
            value,
            range,
            filter: Some(filter),
        }
    }

    pub fn range(&self) -> &Range<f64> {
        &self.range
    }

    fn passes_filter(&self, value: f64) -> bool {
        self.filter.as_ref().map_or(true, |f| f(value))
    }
}

impl Gene for DoubleGene {
    type Value = f64;

    fn value(&self) -> &f64 {
        &self.value
    }

    fn generate<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.range.start >= self.range.end {
            log::warn!("generate() on empty range {:?}, keeping value", self.range);
            return self.value;
        }
        let mut sample = rng.gen_range(self.range.clone());
        for _ in 1..MAX_GENERATE_ATTEMPTS {
            if self.passes_filter(sample) {
                break;
            }
            sample = rng.gen_range(self.range.clone());
        }
        sample
    }

    fn with_value(&self, value: f64) -> Self {
        Self {
            value,
            range: self.range.clone(),
            filter: self.filter.clone(),
        }
    }

    fn verify(&self) -> bool {
        self.range.contains(&self.value) && self.passes_filter(self.value)
    }
}

impl NumericGene for DoubleGene {
    fn to_i64(&self) -> i64 {
        self.value as i64
    }

    fn to_f64(&self) -> f64 {
        self.value
    }

    fn average(&self, others: &[Self]) -> Self {
        let sum: f64 = self.value + others.iter().map(|g| g.value).sum::<f64>();
        self.with_value(sum / (others.len() + 1) as f64)
    }
}

impl PartialEq for DoubleGene {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.range == other.range
    }
}

impl std::fmt::Debug for DoubleGene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoubleGene")
            .field("value", &self.value)
            .field("range", &self.range)
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}
