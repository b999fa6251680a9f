//! Enrichment run parameters

use super::category::{parse_categories, DEFAULT_CATEGORIES};
use hs_common::config::SearchConfig;
use hs_common::Result;
use serde::{Deserialize, Serialize};

/// Parameters for one enrichment run or nearby lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichParameters {
    /// Category labels in output column order
    pub categories: Vec<String>,

    /// Nearby search radius in meters (default: 1000)
    pub radius_m: u32,

    /// Places retained per category for reports and lookups (default: 5)
    pub max_results: usize,

    /// Records sent to the remote APIs before the rest pass through (0 = all)
    pub max_records: usize,

    /// Records in flight at once (default: 1)
    pub concurrency: usize,
}

impl Default for EnrichParameters {
    fn default() -> Self {
        let search = SearchConfig::default();
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            radius_m: search.radius_m,
            max_results: search.max_results,
            max_records: search.max_records,
            concurrency: search.concurrency,
        }
    }
}

impl EnrichParameters {
    /// Build parameters from the TOML search section
    ///
    /// Validates the configured categories, falling back to the default set
    /// when none are configured.
    pub fn from_search_config(search: &SearchConfig) -> Result<Self> {
        let categories = match &search.categories {
            Some(labels) => parse_categories(labels)?,
            None => parse_categories(DEFAULT_CATEGORIES)?,
        };

        Ok(Self {
            categories,
            radius_m: search.radius_m,
            max_results: search.max_results,
            max_records: search.max_records,
            concurrency: search.concurrency.max(1),
        })
    }

    /// Whether the processing cap allows another remote-bound record
    pub fn within_cap(&self, attempted: usize) -> bool {
        self.max_records == 0 || attempted < self.max_records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = EnrichParameters::default();
        assert_eq!(params.categories.len(), 6);
        assert_eq!(params.radius_m, 1000);
        assert_eq!(params.max_results, 5);
        assert_eq!(params.max_records, 0);
        assert_eq!(params.concurrency, 1);
    }

    #[test]
    fn test_from_search_config_validates_categories() {
        let search = SearchConfig {
            categories: Some(vec!["bad label".to_string()]),
            ..Default::default()
        };
        assert!(EnrichParameters::from_search_config(&search).is_err());
    }

    #[test]
    fn test_zero_concurrency_is_clamped() {
        let search = SearchConfig {
            concurrency: 0,
            ..Default::default()
        };
        let params = EnrichParameters::from_search_config(&search).unwrap();
        assert_eq!(params.concurrency, 1);
    }

    #[test]
    fn test_within_cap() {
        let mut params = EnrichParameters::default();
        assert!(params.within_cap(1_000_000));

        params.max_records = 2;
        assert!(params.within_cap(0));
        assert!(params.within_cap(1));
        assert!(!params.within_cap(2));
    }
}
