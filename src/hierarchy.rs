//! Customer domain hierarchy
//!
//! A customer owns one main domain and optionally a tree of sub-domain
//! aliases. The tree exists because the upstream terminal-management system
//! hands out two incompatible shapes of sub-account identifier: proper dotted
//! sub-domains (`shop.example.com`) and bare single-word aliases with no
//! syntactic relationship to the parent at all (main domain `SIPAY34`,
//! sub-alias `TINTCAFE`). The dotted shape can be matched by suffix alone;
//! the bare shape only matches because it is declared here.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::normalize;

/// One node in a customer's domain hierarchy tree.
///
/// `name` may be a full dotted domain or a single bare token. Children are
/// owned exclusively by their parent, so the tree is acyclic by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainNode {
    pub name: String,
    #[serde(default)]
    pub children: Vec<DomainNode>,
}

impl DomainNode {
    pub fn new(name: impl Into<String>, children: Vec<DomainNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// A node with no children.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

/// Collect the normalized name of every node in the hierarchy, at any depth.
///
/// Nodes whose name normalizes to the empty string contribute nothing.
pub fn collect_subdomain_names(hierarchy: &[DomainNode]) -> HashSet<String> {
    let mut names = HashSet::new();
    for node in hierarchy {
        collect_node(node, &mut names);
    }
    names
}

fn collect_node(node: &DomainNode, names: &mut HashSet<String>) {
    let name = normalize(Some(&node.name));
    if !name.is_empty() {
        names.insert(name);
    }
    for child in &node.children {
        collect_node(child, names);
    }
}

/// Every domain a customer has declared: the normalized main domain (when
/// present and non-empty) followed by the hierarchy names in depth-first
/// traversal order. Used by diagnostic output, not by the match decision.
pub fn collect_all_domains(main_domain: Option<&str>, hierarchy: &[DomainNode]) -> Vec<String> {
    let mut all = Vec::new();
    let main = normalize(main_domain);
    if !main.is_empty() {
        all.push(main);
    }
    for node in hierarchy {
        push_node(node, &mut all);
    }
    all
}

fn push_node(node: &DomainNode, out: &mut Vec<String>) {
    let name = normalize(Some(&node.name));
    if !name.is_empty() {
        out.push(name);
    }
    for child in &node.children {
        push_node(child, out);
    }
}
