// Sampling sites, used by the exports that need a location per population.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SiteInfo {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Numeric population code, as expected by STRUCTURE.
    pub code: u32,
}

pub struct SiteTable {
    by_name: HashMap<String, SiteInfo>,
}

impl SiteTable {
    pub fn new(sites: &[SiteInfo]) -> SiteTable {
        SiteTable {
            by_name: sites.iter().map(|s| (s.name.clone(), s.clone())).collect(),
        }
    }

    pub fn get(&self, population: &str) -> Option<&SiteInfo> {
        self.by_name.get(population)
    }
}

/// The population of a canonical sample id: everything before the first `_`.
pub fn population_of(sample_id: &str) -> &str {
    match sample_id.split_once('_') {
        Some((population, _)) => population,
        None => sample_id,
    }
}
