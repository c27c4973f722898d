use super::Gene;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Boolean gene; `true_rate` is the probability that a generated value is true.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoolGene {
    value: bool,
    true_rate: f64,
}

impl BoolGene {
    pub fn new(value: bool, true_rate: f64) -> Self {
        Self { value, true_rate }
    }

    pub fn true_rate(&self) -> f64 {
        self.true_rate
    }
}

impl Gene for BoolGene {
    type Value = bool;

    fn value(&self) -> &bool {
        &self.value
    }

    fn generate<R: Rng>(&self, rng: &mut R) -> bool {
        rng.gen_bool(self.true_rate)
    }

    fn with_value(&self, value: bool) -> Self {
        Self {
            value,
            true_rate: self.true_rate,
        }
    }

    fn verify(&self) -> bool {
        (0.0..=1.0).contains(&self.true_rate)
    }
}

impl PartialEq for BoolGene {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.true_rate == other.true_rate
    }
}
