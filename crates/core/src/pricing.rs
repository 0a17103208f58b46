//! Price tiers
//!
//! Maps the number of distinct changed words to a price. The count itself is
//! always `distinct_changed_words(document).len()`.

use serde::{Deserialize, Serialize};

use crate::document::LyricLine;
use crate::metrics::distinct_changed_words;

/// Words up to and including `max_words` cost `price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTier {
    pub max_words: usize,
    pub price: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTable {
    /// Ascending by `max_words`.
    pub tiers: Vec<PriceTier>,
    /// Price above the last tier.
    pub overflow_price: u32,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                PriceTier { max_words: 0, price: 0 },
                PriceTier { max_words: 3, price: 45 },
                PriceTier { max_words: 10, price: 85 },
                PriceTier { max_words: 20, price: 125 },
            ],
            overflow_price: 165,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub changed_words: Vec<String>,
    pub price: u32,
}

impl Quote {
    pub fn word_count(&self) -> usize {
        self.changed_words.len()
    }
}

impl PricingTable {
    pub fn price_for(&self, word_count: usize) -> u32 {
        self.tiers
            .iter()
            .find(|tier| word_count <= tier.max_words)
            .map_or(self.overflow_price, |tier| tier.price)
    }

    pub fn quote(&self, lines: &[LyricLine]) -> Quote {
        let changed_words = distinct_changed_words(lines);
        let price = self.price_for(changed_words.len());
        Quote {
            changed_words,
            price,
        }
    }

    /// Tier boundaries must strictly increase.
    pub fn is_ascending(&self) -> bool {
        self.tiers.windows(2).all(|w| w[0].max_words < w[1].max_words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers() {
        let table = PricingTable::default();
        let prices: Vec<u32> = [0, 1, 3, 4, 10, 11, 20, 21, 500]
            .iter()
            .map(|&n| table.price_for(n))
            .collect();

        assert_eq!(prices, vec![0, 45, 45, 85, 85, 125, 125, 165, 165]);
    }

    #[test]
    fn test_prices_are_monotonic() {
        let table = PricingTable::default();
        let mut last = 0;
        for n in 0..40 {
            let price = table.price_for(n);
            assert!(price >= last);
            last = price;
        }
    }

    #[test]
    fn test_ascending_check() {
        let mut table = PricingTable::default();
        assert!(table.is_ascending());
        table.tiers.swap(1, 2);
        assert!(!table.is_ascending());
    }
}
