use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::NetworkError;
use crate::idx_cost::GenCost;
use crate::mpc::{Branch, Bus};

/// A case as numeric tables in MATPOWER column layout. Bus numbers must
/// already be consecutive from 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    #[serde(rename = "baseMVA")]
    pub base_mva: f64,
    pub bus: Vec<Vec<f64>>,
    pub branch: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gencost: Option<Vec<Vec<f64>>>,
}

impl Case {
    pub fn buses(&self) -> Result<Vec<Bus>, NetworkError> {
        self.bus
            .iter()
            .enumerate()
            .map(|(i, row)| Bus::from_row(i, row))
            .collect()
    }

    pub fn branches(&self) -> Result<Vec<Branch>, NetworkError> {
        self.branch
            .iter()
            .enumerate()
            .map(|(i, row)| Branch::from_row(i, row))
            .collect()
    }

    pub fn gencosts(&self) -> Result<Vec<GenCost>, NetworkError> {
        self.gencost
            .iter()
            .flatten()
            .enumerate()
            .map(|(i, row)| GenCost::from_row(i, row))
            .collect()
    }
}

/// Reads a case from a JSON file.
pub fn load_case(case_path: &Path) -> Result<Case> {
    let file = File::open(case_path)
        .with_context(|| format!("opening case file {}", case_path.display()))?;
    let case: Case = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing case file {}", case_path.display()))?;
    log::debug!(
        "loaded {}: {} buses, {} branches",
        case_path.display(),
        case.bus.len(),
        case.branch.len()
    );
    Ok(case)
}
