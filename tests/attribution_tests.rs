//! End-to-end attribution over the JSON fixture rosters.

mod common;

use common::fixtures::load_roster;
use termattrib::report::{AttributionReport, ReportOptions};
use termattrib::{customer_has_any_match, find_matching_terminals};

#[test]
fn test_fixture_rosters_load() {
    let roster = load_roster();
    assert_eq!(roster.customers.len(), 4);
    assert_eq!(roster.terminals.len(), 10);
}

#[test]
fn test_default_mode_customer_matches_exact_domain_only() {
    let roster = load_roster();
    let acme = roster.customers.iter().find(|c| c.id == "c-acme").unwrap();
    let matched = find_matching_terminals(&acme.profile(), &roster.terminals);
    let serials: Vec<_> = matched.iter().map(|t| t.serial.as_str()).collect();

    // PT-1002 is the same domain in URL shape; PT-1003 is a sub-domain and
    // must NOT match in default mode.
    assert_eq!(serials, vec!["PT-1001", "PT-1002"]);
}

#[test]
fn test_ignore_main_customer_matches_aliases_and_dotted_subdomains() {
    let roster = load_roster();
    let sipay = roster.customers.iter().find(|c| c.id == "c-sipay").unwrap();
    let matched = find_matching_terminals(&sipay.profile(), &roster.terminals);
    let serials: Vec<_> = matched.iter().map(|t| t.serial.as_str()).collect();

    // PT-2001 is the main domain itself: explicitly rejected.
    // PT-2002 and PT-2003 are hierarchy-declared aliases (PT-2003 nested).
    // PT-2004 is a dotted sub-domain of the main domain.
    assert_eq!(serials, vec!["PT-2002", "PT-2003", "PT-2004"]);
}

#[test]
fn test_customer_without_domain_matches_nothing() {
    let roster = load_roster();
    let paperless = roster
        .customers
        .iter()
        .find(|c| c.id == "c-nodomain")
        .unwrap();
    assert!(!customer_has_any_match(&paperless.profile(), &roster.terminals));
}

#[test]
fn test_report_device_counts_and_revenue() {
    let roster = load_roster();
    let report = AttributionReport::build(&roster);

    let acme = report
        .customers
        .iter()
        .find(|c| c.customer_id == "c-acme")
        .unwrap();
    assert_eq!(acme.device_count, 2);
    assert!((acme.monthly_revenue - 20.0).abs() < 1e-9);
    assert!((acme.yearly_revenue - 240.0).abs() < 1e-9);
    assert_eq!(acme.bank.as_deref(), Some("Garanti"));

    let sipay = report
        .customers
        .iter()
        .find(|c| c.customer_id == "c-sipay")
        .unwrap();
    assert_eq!(sipay.device_count, 3);
    assert!((sipay.monthly_revenue - 24.0).abs() < 1e-9);
}

#[test]
fn test_report_unattributed_terminals() {
    let roster = load_roster();
    let report = AttributionReport::build(&roster);
    let serials: Vec<_> = report
        .unattributed_terminals
        .iter()
        .map(|t| t.serial.as_str())
        .collect();

    // PT-1003 (sub-domain of a default-mode customer), PT-2001 (rejected
    // main domain of an ignore-main customer), the stray domain, and the
    // domainless terminal.
    assert_eq!(serials, vec!["PT-1003", "PT-2001", "PT-9001", "PT-9002"]);
}

#[test]
fn test_report_suspended_customer_excluded_from_totals() {
    let roster = load_roster();
    let report = AttributionReport::build(&roster);

    let umbrella = report
        .customers
        .iter()
        .find(|c| c.customer_id == "c-umbrella")
        .unwrap();
    assert!(umbrella.suspended);
    assert_eq!(umbrella.device_count, 1);
    assert!((umbrella.monthly_revenue - 15.0).abs() < 1e-9);

    // Totals: acme 20.0 + sipay 24.0; umbrella suspended, excluded.
    assert!((report.totals.monthly_revenue - 44.0).abs() < 1e-9);
    assert_eq!(report.totals.attributed_device_count, 5);

    let report_all = AttributionReport::build_with_options(
        &roster,
        &ReportOptions {
            include_suspended_in_totals: true,
            ..Default::default()
        },
    );
    assert!((report_all.totals.monthly_revenue - 59.0).abs() < 1e-9);
}

#[test]
fn test_report_hides_empty_customers_when_configured() {
    let roster = load_roster();
    let report = AttributionReport::build_with_options(
        &roster,
        &ReportOptions {
            include_empty_customers: false,
            ..Default::default()
        },
    );
    assert!(report
        .customers
        .iter()
        .all(|c| c.customer_id != "c-nodomain"));
    assert_eq!(report.totals.customer_count, 3);
}

#[test]
fn test_no_fixture_terminal_is_double_attributed() {
    let roster = load_roster();
    let report = AttributionReport::build(&roster);
    assert!(report.multi_attributed_serials.is_empty());
}
