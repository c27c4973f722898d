use super::{Gene, NumericGene, MAX_GENERATE_ATTEMPTS};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::Arc;

pub type IntFilter = Arc<dyn Fn(i64) -> bool + Send + Sync>;

/// Integer gene with a half-open range and an optional value filter.
#[derive(Clone, Serialize, Deserialize)]
pub struct IntGene {
    value: i64,
    range: Range<i64>,
    #[serde(skip)]
    filter: Option<IntFilter>,
}

impl IntGene {
    pub fn new(value: i64, range: Range<i64>) -> Self {
        Self {
            value,
            range,
            filter: None,
        }
    }

    pub fn with_filter(value: i64, range: Range<i64>, filter: IntFilter) -> Self {
        Self {
            value,
            range,
            filter: Some(filter),
        }
    }

    pub fn range(&self) -> &Range<i64> {
        &self.range
    }

    fn passes_filter(&self, value: i64) -> bool {
        self.filter.as_ref().map_or(true, |f| f(value))
    }
}

impl Gene for IntGene {
    type Value = i64;

    fn value(&self) -> &i64 {
        &self.value
    }

    fn generate<R: Rng>(&self, rng: &mut R) -> i64 {
        if self.range.is_empty() {
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

    fn with_value(&self, value: i64) -> Self {
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

impl NumericGene for IntGene {
    fn to_i64(&self) -> i64 {
        self.value
    }

    fn to_f64(&self) -> f64 {
        self.value as f64
    }

    fn average(&self, others: &[Self]) -> Self {
        let sum: f64 = self.to_f64() + others.iter().map(Self::to_f64).sum::<f64>();
        let mean = sum / (others.len() + 1) as f64;
        self.with_value(mean.round() as i64)
    }
}

impl PartialEq for IntGene {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.range == other.range
    }
}

impl std::fmt::Debug for IntGene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntGene")
            .field("value", &self.value)
            .field("range", &self.range)
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let gene = IntGene::new(5, 0..10);
        for _ in 0..200 {
            let v = gene.generate(&mut rng);
            assert!((0..10).contains(&v));
        }
    }

    #[test]
    fn test_filter_respected() {
        let mut rng = StdRng::seed_from_u64(42);
        let gene = IntGene::with_filter(2, 0..100, Arc::new(|v| v % 2 == 0));
        for _ in 0..100 {
            assert_eq!(gene.generate(&mut rng) % 2, 0);
        }
    }

    #[test]
    fn test_verify() {
        assert!(IntGene::new(3, 0..10).verify());
        assert!(!IntGene::new(10, 0..10).verify());
        assert!(!IntGene::with_filter(3, 0..10, Arc::new(|v| v % 2 == 0)).verify());
    }

    #[test]
    fn test_mutate_returns_new_instance() {
        let mut rng = StdRng::seed_from_u64(7);
        let gene = IntGene::new(5, 0..1_000_000);
        let mutated = gene.mutate(&mut rng);
        assert_eq!(*gene.value(), 5);
        assert!(gene.range() == mutated.range());
    }

    #[test]
    fn test_average_rounds() {
        let a = IntGene::new(1, 0..10);
        let b = IntGene::new(2, 0..10);
        let c = IntGene::new(4, 0..10);
        let mean = a.average(&[b, c]);
        assert_eq!(*mean.value(), 2); // (1 + 2 + 4) / 3 = 2.33 -> 2
    }
}
