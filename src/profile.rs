//! Match-relevant slices of customer and terminal records
//!
//! The matching engine never sees full roster records. Customers reduce to a
//! `CustomerDomainProfile` (main domain, ignore flag, hierarchy) and
//! terminals to a `TerminalDomainProfile` (one optional domain string). The
//! roster layer resolves legacy field variants before building a profile, so
//! the engine's input shape stays clean.

use serde::{Deserialize, Serialize};

use crate::hierarchy::{collect_all_domains, DomainNode};
use crate::matching::matches;

/// The subset of a customer record the matching engine cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDomainProfile {
    /// Effective main domain. Resolved upstream from the current and legacy
    /// domain fields; `None` means the customer can never match anything.
    pub main_domain: Option<String>,
    /// When true, the main domain itself is NOT a valid match target; only
    /// sub-domains (dotted or hierarchy-declared) may match.
    #[serde(default)]
    pub ignore_main_domain: bool,
    #[serde(default)]
    pub domain_hierarchy: Vec<DomainNode>,
}

impl CustomerDomainProfile {
    /// A profile matching only its main domain exactly.
    pub fn main_only(main_domain: impl Into<String>) -> Self {
        Self {
            main_domain: Some(main_domain.into()),
            ignore_main_domain: false,
            domain_hierarchy: Vec::new(),
        }
    }

    /// Whether the given terminal attributes to this customer.
    pub fn matches_terminal(&self, terminal: &TerminalDomainProfile) -> bool {
        matches(
            terminal.domain.as_deref(),
            self.main_domain.as_deref(),
            self.ignore_main_domain,
            &self.domain_hierarchy,
        )
    }

    /// Every domain this customer has declared, main domain first.
    pub fn all_domains(&self) -> Vec<String> {
        collect_all_domains(self.main_domain.as_deref(), &self.domain_hierarchy)
    }
}

/// The subset of a terminal record the matching engine cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerminalDomainProfile {
    /// Domain reported by the terminal-management system. Absent domain
    /// never matches anything.
    pub domain: Option<String>,
}

impl TerminalDomainProfile {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
        }
    }
}
