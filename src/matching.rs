//! The match decision
//!
//! This predicate is the single source of truth for attributing a terminal to
//! a customer. Every report joins customer and terminal rosters through it;
//! nothing else in the codebase is allowed to re-derive the rule, because two
//! reports disagreeing on attribution means two reports disagreeing on
//! revenue.
//!
//! The decision has two modes:
//!
//! * default: the terminal domain must equal the customer's main domain
//!   exactly (after normalization). No sub-domain matching at all.
//! * ignore-main-domain: the main domain itself is deliberately rejected;
//!   the terminal must be a dotted sub-domain of it (`shop.example.com`
//!   under `example.com`) or a bare alias declared in the customer's domain
//!   hierarchy (`tintcafe` under main domain `SIPAY34`).
//!
//! Both sub-domain shapes exist upstream and neither can be predicted from
//! the terminal string alone, so the ignore-main mode checks the cheap
//! syntactic suffix rule first and falls back to the declared hierarchy.
//!
//! Missing or malformed domain data always resolves to "no match". Ambiguity
//! must never silently attribute revenue; exclusion is the safe default.

use crate::domain::normalize;
use crate::hierarchy::{collect_subdomain_names, DomainNode};
use crate::profile::{CustomerDomainProfile, TerminalDomainProfile};

/// Whether a terminal with domain `terminal_domain` attributes to a customer
/// with the given main domain, ignore flag, and declared hierarchy.
///
/// Total over all inputs: empty and absent domains, empty hierarchies and
/// empty strings all resolve to `false`. Pure, no side effects, safe to call
/// concurrently.
pub fn matches(
    terminal_domain: Option<&str>,
    customer_main_domain: Option<&str>,
    ignore_main_domain: bool,
    hierarchy: &[DomainNode],
) -> bool {
    let p = normalize(terminal_domain);
    let c = normalize(customer_main_domain);
    if p.is_empty() || c.is_empty() {
        return false;
    }

    if !ignore_main_domain {
        return p == c;
    }

    // Ignore-main mode: an exact match against the main domain is an
    // explicit rejection, not a fall-through. The customer opted out of
    // attributing terminals to the parent domain.
    if p == c {
        return false;
    }
    // Dotted sub-domain: shop.example.com under example.com.
    if p.ends_with(&format!(".{c}")) {
        return true;
    }
    // Bare alias declared in the hierarchy tree. No syntactic relationship
    // to the main domain is required.
    if !hierarchy.is_empty() {
        let declared = collect_subdomain_names(hierarchy);
        if declared.contains(&p) {
            return true;
        }
    }
    false
}

/// Anything carrying an optional terminal domain. Lets the query helpers run
/// over both bare [`TerminalDomainProfile`]s and full roster records.
pub trait TerminalDomain {
    fn terminal_domain(&self) -> Option<&str>;
}

impl TerminalDomain for TerminalDomainProfile {
    fn terminal_domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }
}

/// Filter `terminals` to those attributed to `customer`, preserving input
/// order.
pub fn find_matching_terminals<'a, T: TerminalDomain>(
    customer: &CustomerDomainProfile,
    terminals: &'a [T],
) -> Vec<&'a T> {
    terminals
        .iter()
        .filter(|t| {
            matches(
                t.terminal_domain(),
                customer.main_domain.as_deref(),
                customer.ignore_main_domain,
                &customer.domain_hierarchy,
            )
        })
        .collect()
}

/// Whether any terminal in the roster attributes to `customer`.
///
/// Short-circuits on the first match and allocates nothing; reports use this
/// over large rosters where building the full match list would be wasted
/// work.
pub fn customer_has_any_match<T: TerminalDomain>(
    customer: &CustomerDomainProfile,
    terminals: &[T],
) -> bool {
    terminals.iter().any(|t| {
        matches(
            t.terminal_domain(),
            customer.main_domain.as_deref(),
            customer.ignore_main_domain,
            &customer.domain_hierarchy,
        )
    })
}
