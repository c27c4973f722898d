use super::{Gene, MAX_GENERATE_ATTEMPTS};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::sync::Arc;

pub type CharFilter = Arc<dyn Fn(char) -> bool + Send + Sync>;

/// Character gene over an inclusive char range with an optional filter.
#[derive(Clone, Serialize, Deserialize)]
pub struct CharGene {
    value: char,
    range: RangeInclusive<char>,
    #[serde(skip)]
    filter: Option<CharFilter>,
}

impl CharGene {
    pub fn new(value: char, range: RangeInclusive<char>) -> Self {
        Self {
            value,
            range,
            filter: None,
        }
    }

    pub fn with_filter(value: char, range: RangeInclusive<char>, filter: CharFilter) -> Self {
        Self {
            value,
            range,
            filter: Some(filter),
        }
    }

    pub fn range(&self) -> &RangeInclusive<char> {
        &self.range
    }

    fn passes_filter(&self, value: char) -> bool {
        self.filter.as_ref().map_or(true, |f| f(value))
    }
}

impl Gene for CharGene {
    type Value = char;

    fn value(&self) -> &char {
        &self.value
    }

    fn generate<R: Rng>(&self, rng: &mut R) -> char {
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

    fn with_value(&self, value: char) -> Self {
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

impl PartialEq for CharGene {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.range == other.range
    }
}

impl std::fmt::Debug for CharGene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharGene")
            .field("value", &self.value)
            .field("range", &self.range)
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}
