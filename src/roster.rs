//! Customer and terminal rosters
//!
//! The two datasets are entered independently: customers through the back
//! office, terminals through the terminal-management system export. They are
//! joined only by domain matching. This module loads both rosters from JSON
//! files and resolves the legacy customer domain fields into the single
//! `main_domain` the engine expects.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::hierarchy::DomainNode;
use crate::matching::TerminalDomain;
use crate::profile::CustomerDomainProfile;

/// A customer as stored in the back office.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub id: String,
    pub name: String,
    /// Current main-domain field.
    #[serde(default)]
    pub domain: Option<String>,
    /// Legacy main-domain field from the old MyPayter import
    /// (`guncelMyPayterDomain` on the wire). Still present on older records;
    /// used only when `domain` is empty.
    #[serde(default)]
    pub guncel_my_payter_domain: Option<String>,
    #[serde(default)]
    pub ignore_main_domain: bool,
    #[serde(default)]
    pub domain_hierarchy: Vec<DomainNode>,
    /// Assigned bank / payment institution, when known.
    #[serde(default)]
    pub bank: Option<String>,
    #[serde(default)]
    pub suspended: bool,
}

impl CustomerRecord {
    /// Effective main domain: first non-empty of the current and legacy
    /// fields.
    pub fn main_domain(&self) -> Option<&str> {
        non_empty(self.domain.as_deref()).or_else(|| non_empty(self.guncel_my_payter_domain.as_deref()))
    }

    /// The match-relevant slice of this record.
    pub fn profile(&self) -> CustomerDomainProfile {
        CustomerDomainProfile {
            main_domain: self.main_domain().map(str::to_string),
            ignore_main_domain: self.ignore_main_domain,
            domain_hierarchy: self.domain_hierarchy.clone(),
        }
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

/// A terminal as exported from the terminal-management system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalRecord {
    pub serial: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    /// Device-level subscription fee, per month.
    #[serde(default)]
    pub monthly_fee: Option<f64>,
}

impl TerminalDomain for TerminalRecord {
    fn terminal_domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }
}

/// Both rosters, loaded and ready for an attribution pass.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub customers: Vec<CustomerRecord>,
    pub terminals: Vec<TerminalRecord>,
}

impl Roster {
    pub fn new(customers: Vec<CustomerRecord>, terminals: Vec<TerminalRecord>) -> Self {
        Self { customers, terminals }
    }

    /// Load both rosters from JSON files (each a top-level array of records).
    pub fn load_from_files(customers_path: &Path, terminals_path: &Path) -> Result<Self> {
        let customers = load_customers(customers_path)?;
        let terminals = load_terminals(terminals_path)?;
        info!(
            "Loaded {} customers and {} terminals",
            customers.len(),
            terminals.len()
        );
        Ok(Self::new(customers, terminals))
    }
}

pub fn load_customers(path: &Path) -> Result<Vec<CustomerRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read customer roster: {:?}", path))?;
    let customers: Vec<CustomerRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse customer roster: {:?}", path))?;
    for customer in &customers {
        if customer.main_domain().is_none() {
            // Not an error: such customers simply never match anything.
            warn!(
                "Customer '{}' ({}) has no domain and cannot be attributed terminals",
                customer.name, customer.id
            );
        }
    }
    debug!("Parsed {} customer records from {:?}", customers.len(), path);
    Ok(customers)
}

pub fn load_terminals(path: &Path) -> Result<Vec<TerminalRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read terminal roster: {:?}", path))?;
    let terminals: Vec<TerminalRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse terminal roster: {:?}", path))?;
    debug!("Parsed {} terminal records from {:?}", terminals.len(), path);
    Ok(terminals)
}
