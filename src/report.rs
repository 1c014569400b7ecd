//! Attribution report
//!
//! One aggregation pass joins the customer roster against the terminal
//! roster through the match predicate and produces everything the revenue
//! and risk views need: per-customer device counts and fee rollups, terminals
//! nobody claimed, and terminals claimed by more than one customer.

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::matching::find_matching_terminals;
use crate::roster::{Roster, TerminalRecord};

/// Knobs for the aggregation pass, sourced from `[report]` in the config.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Keep customers with zero matched terminals in the per-customer rows.
    pub include_empty_customers: bool,
    /// Count suspended customers' revenue in the totals.
    pub include_suspended_in_totals: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_empty_customers: true,
            include_suspended_in_totals: false,
        }
    }
}

/// One customer's attribution result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAttribution {
    pub customer_id: String,
    pub customer_name: String,
    pub main_domain: Option<String>,
    pub bank: Option<String>,
    pub suspended: bool,
    /// Serials of matched terminals, in terminal-roster order.
    pub terminal_serials: Vec<String>,
    pub device_count: usize,
    /// Sum of matched terminals' monthly fees; terminals without a fee
    /// contribute zero.
    pub monthly_revenue: f64,
    pub yearly_revenue: f64,
}

/// Totals across all (counted) customers.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    pub customer_count: usize,
    pub attributed_device_count: usize,
    pub monthly_revenue: f64,
    pub yearly_revenue: f64,
}

/// The full output of one attribution pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributionReport {
    pub customers: Vec<CustomerAttribution>,
    /// Terminals no customer matched, including domainless ones.
    pub unattributed_terminals: Vec<TerminalRecord>,
    /// Serials of terminals matched by more than one customer. The engine is
    /// a predicate, not an index; collisions are surfaced here for callers
    /// to resolve, never silently double-counted away.
    pub multi_attributed_serials: Vec<String>,
    pub totals: ReportTotals,
}

impl AttributionReport {
    pub fn build(roster: &Roster) -> Self {
        Self::build_with_options(roster, &ReportOptions::default())
    }

    pub fn build_with_options(roster: &Roster, options: &ReportOptions) -> Self {
        let mut customers = Vec::new();
        let mut totals = ReportTotals::default();
        let mut match_counts: HashMap<&str, usize> = HashMap::new();

        for customer in &roster.customers {
            let profile = customer.profile();
            let matched = find_matching_terminals(&profile, &roster.terminals);

            let monthly_revenue: f64 = matched.iter().map(|t| t.monthly_fee.unwrap_or(0.0)).sum();
            for terminal in &matched {
                *match_counts.entry(terminal.serial.as_str()).or_insert(0) += 1;
            }

            debug!(
                "Customer '{}': {} terminals, {:.2}/month",
                customer.name,
                matched.len(),
                monthly_revenue
            );

            if matched.is_empty() && !options.include_empty_customers {
                continue;
            }

            if !customer.suspended || options.include_suspended_in_totals {
                totals.attributed_device_count += matched.len();
                totals.monthly_revenue += monthly_revenue;
            }

            customers.push(CustomerAttribution {
                customer_id: customer.id.clone(),
                customer_name: customer.name.clone(),
                main_domain: customer.main_domain().map(str::to_string),
                bank: customer.bank.clone(),
                suspended: customer.suspended,
                terminal_serials: matched.iter().map(|t| t.serial.clone()).collect(),
                device_count: matched.len(),
                monthly_revenue,
                yearly_revenue: monthly_revenue * 12.0,
            });
        }

        totals.customer_count = customers.len();
        totals.yearly_revenue = totals.monthly_revenue * 12.0;

        let unattributed_terminals: Vec<TerminalRecord> = roster
            .terminals
            .iter()
            .filter(|t| !match_counts.contains_key(t.serial.as_str()))
            .cloned()
            .collect();

        let multi_attributed_serials: Vec<String> = roster
            .terminals
            .iter()
            .filter(|t| match_counts.get(t.serial.as_str()).copied().unwrap_or(0) > 1)
            .map(|t| t.serial.clone())
            .collect();

        if !multi_attributed_serials.is_empty() {
            warn!(
                "{} terminals are attributed to more than one customer: {:?}",
                multi_attributed_serials.len(),
                multi_attributed_serials
            );
        }

        Self {
            customers,
            unattributed_terminals,
            multi_attributed_serials,
            totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::DomainNode;
    use crate::roster::CustomerRecord;

    fn customer(id: &str, domain: &str) -> CustomerRecord {
        CustomerRecord {
            id: id.to_string(),
            name: format!("Customer {id}"),
            domain: Some(domain.to_string()),
            ..Default::default()
        }
    }

    fn terminal(serial: &str, domain: Option<&str>, fee: Option<f64>) -> TerminalRecord {
        TerminalRecord {
            serial: serial.to_string(),
            domain: domain.map(str::to_string),
            model: None,
            monthly_fee: fee,
        }
    }

    #[test]
    fn test_device_counts_and_revenue() {
        let roster = Roster::new(
            vec![customer("c1", "acme.com"), customer("c2", "other.com")],
            vec![
                terminal("PT-1", Some("acme.com"), Some(10.0)),
                terminal("PT-2", Some("acme.com"), Some(2.5)),
                terminal("PT-3", Some("other.com"), None),
            ],
        );
        let report = AttributionReport::build(&roster);

        assert_eq!(report.customers.len(), 2);
        let c1 = &report.customers[0];
        assert_eq!(c1.device_count, 2);
        assert_eq!(c1.terminal_serials, vec!["PT-1", "PT-2"]);
        assert!((c1.monthly_revenue - 12.5).abs() < 1e-9);
        assert!((c1.yearly_revenue - 150.0).abs() < 1e-9);

        // Missing fee counts as zero, not as an error.
        let c2 = &report.customers[1];
        assert_eq!(c2.device_count, 1);
        assert_eq!(c2.monthly_revenue, 0.0);

        assert_eq!(report.totals.attributed_device_count, 3);
        assert!((report.totals.monthly_revenue - 12.5).abs() < 1e-9);
        assert!(report.unattributed_terminals.is_empty());
        assert!(report.multi_attributed_serials.is_empty());
    }

    #[test]
    fn test_unattributed_terminals() {
        let roster = Roster::new(
            vec![customer("c1", "acme.com")],
            vec![
                terminal("PT-1", Some("acme.com"), Some(10.0)),
                terminal("PT-2", Some("unclaimed.com"), Some(10.0)),
                terminal("PT-3", None, Some(10.0)),
            ],
        );
        let report = AttributionReport::build(&roster);
        let serials: Vec<_> = report
            .unattributed_terminals
            .iter()
            .map(|t| t.serial.as_str())
            .collect();
        assert_eq!(serials, vec!["PT-2", "PT-3"]);
    }

    #[test]
    fn test_multi_attribution_surfaced() {
        // Two customers declaring the same bare alias both claim PT-1.
        let shared = |id: &str| CustomerRecord {
            id: id.to_string(),
            name: id.to_string(),
            domain: Some(format!("{id}-main")),
            ignore_main_domain: true,
            domain_hierarchy: vec![DomainNode::leaf("tintcafe")],
            ..Default::default()
        };
        let roster = Roster::new(
            vec![shared("c1"), shared("c2")],
            vec![terminal("PT-1", Some("tintcafe"), Some(5.0))],
        );
        let report = AttributionReport::build(&roster);
        assert_eq!(report.multi_attributed_serials, vec!["PT-1"]);
        // Both customers carry the revenue in their own rows; the totals
        // double-count too, which is exactly why the collision is surfaced.
        assert_eq!(report.totals.attributed_device_count, 2);
    }

    #[test]
    fn test_suspended_customers_excluded_from_totals() {
        let mut suspended = customer("c1", "acme.com");
        suspended.suspended = true;
        let roster = Roster::new(
            vec![suspended, customer("c2", "other.com")],
            vec![
                terminal("PT-1", Some("acme.com"), Some(10.0)),
                terminal("PT-2", Some("other.com"), Some(3.0)),
            ],
        );
        let report = AttributionReport::build(&roster);
        assert!((report.totals.monthly_revenue - 3.0).abs() < 1e-9);
        assert_eq!(report.totals.attributed_device_count, 1);
        // The suspended customer's own row still shows its revenue.
        assert!((report.customers[0].monthly_revenue - 10.0).abs() < 1e-9);

        let report_all = AttributionReport::build_with_options(
            &roster,
            &ReportOptions {
                include_suspended_in_totals: true,
                ..Default::default()
            },
        );
        assert!((report_all.totals.monthly_revenue - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_customers_filtered_when_configured() {
        let roster = Roster::new(
            vec![customer("c1", "acme.com"), customer("c2", "nothing.com")],
            vec![terminal("PT-1", Some("acme.com"), Some(10.0))],
        );
        let report = AttributionReport::build_with_options(
            &roster,
            &ReportOptions {
                include_empty_customers: false,
                ..Default::default()
            },
        );
        assert_eq!(report.customers.len(), 1);
        assert_eq!(report.customers[0].customer_id, "c1");
        assert_eq!(report.totals.customer_count, 1);
    }
}
