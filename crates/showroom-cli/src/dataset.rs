//! Dataset persistence: one JSON file holding both collections.

use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use showroom_model::{Car, Customer};
use showroom_store::MemoryCollection;

/// Everything the CLI persists between invocations.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct Dataset {
    #[serde(default)]
    pub(crate) cars: Vec<Car>,
    #[serde(default)]
    pub(crate) customers: Vec<Customer>,
}

impl Dataset {
    /// Load the dataset file; a missing file is an empty dataset.
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading dataset {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing dataset {}", path.display()))
    }

    pub(crate) fn save(&self, path: &Path) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(self).context("serializing dataset")?;
        std::fs::write(path, raw).with_context(|| format!("writing dataset {}", path.display()))
    }

    pub(crate) fn car_collection(&self) -> MemoryCollection<Car> {
        MemoryCollection::from_rows(self.cars.clone())
    }

    pub(crate) fn customer_collection(&self) -> MemoryCollection<Customer> {
        MemoryCollection::from_rows(self.customers.clone())
    }
}
