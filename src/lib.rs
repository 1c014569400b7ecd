//! termattrib - terminal-to-customer domain attribution
//!
//! The core of this crate is a small pure matching engine ([`matching`],
//! [`domain`], [`hierarchy`], [`profile`]) that decides whether a payment
//! terminal's domain attributes that terminal to a customer. Around it sit
//! the roster-loading, report-aggregation, and export layers the back office
//! needs to turn two independently-entered datasets into revenue and risk
//! reports.

pub mod cli;
pub mod config;
pub mod domain;
pub mod export;
pub mod hierarchy;
pub mod matching;
pub mod profile;
pub mod report;
pub mod roster;

pub use hierarchy::DomainNode;
pub use matching::{customer_has_any_match, find_matching_terminals, matches};
pub use profile::{CustomerDomainProfile, TerminalDomainProfile};
pub use report::AttributionReport;
pub use roster::{CustomerRecord, Roster, TerminalRecord};
