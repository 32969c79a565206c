//! Authoring-convention checks for a loaded catalog.
//!
//! None of these findings block loading. Callers get every finding at once so
//! a single pass over the catalog surfaces all of them.

use crate::catalog::{CatalogStore, Entry};
use crate::coverage::unremedied_smells;
use std::collections::BTreeSet;

// Markers match the start of a word, so "smelly" and "refactored" count.
const PROBLEM_MARKERS: &[&str] = &["problem", "before", "smell"];
const SOLUTION_MARKERS: &[&str] = &["solution", "after", "refactor", "fixed", "without"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExampleRole {
    Problem,
    Solution,
    Other,
}

fn marks(word: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| word.starts_with(m))
}

/// A marker in the first word decides ("Before refactoring" is a problem).
/// Otherwise any solution marker outranks problem markers, since solution
/// labels usually name the problem they remove ("Without the smell").
fn classify_label(label: &str) -> ExampleRole {
    let label = label.to_lowercase();
    let words: Vec<&str> = label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    if let Some(first) = words.first() {
        if marks(first, PROBLEM_MARKERS) {
            return ExampleRole::Problem;
        }
        if marks(first, SOLUTION_MARKERS) {
            return ExampleRole::Solution;
        }
    }
    if words.iter().any(|w| marks(w, SOLUTION_MARKERS)) {
        ExampleRole::Solution
    } else if words.iter().any(|w| marks(w, PROBLEM_MARKERS)) {
        ExampleRole::Problem
    } else {
        ExampleRole::Other
    }
}

pub fn lint_catalog(store: &CatalogStore) -> Vec<String> {
    let mut findings = Vec::new();
    for entry in store.all() {
        lint_prose(entry, &mut findings);
        lint_examples(entry, &mut findings);
        lint_references(entry, &mut findings);
    }
    for id in unremedied_smells(store) {
        findings.push(format!("{id}: smell references no technique"));
    }
    findings
}

fn lint_prose(entry: &Entry, findings: &mut Vec<String>) {
    if !entry.id.is_valid_slug() {
        findings.push(format!("{}: id is not a slug", entry.id));
    }
    if entry.title.trim().is_empty() {
        findings.push(format!("{}: title is blank", entry.id));
    }
    if entry.body.trim().is_empty() {
        findings.push(format!("{}: body is blank", entry.id));
    }
}

fn lint_examples(entry: &Entry, findings: &mut Vec<String>) {
    let mut problems = 0usize;
    let mut solutions = 0usize;
    for example in &entry.examples {
        match classify_label(&example.label) {
            ExampleRole::Problem => problems += 1,
            ExampleRole::Solution => {
                if problems == 0 {
                    findings.push(format!(
                        "{}: solution example '{}' appears before any problem",
                        entry.id, example.label
                    ));
                }
                solutions += 1;
            }
            ExampleRole::Other => {}
        }
    }
    if problems != solutions {
        findings.push(format!(
            "{}: {problems} problem example(s) but {solutions} solution example(s)",
            entry.id
        ));
    }
}

fn lint_references(entry: &Entry, findings: &mut Vec<String>) {
    let mut seen = BTreeSet::new();
    // Report each repeated id once.
    let mut reported = BTreeSet::new();
    for target in &entry.references {
        if !seen.insert(target) && reported.insert(target) {
            findings.push(format!("{}: references '{target}' more than once", entry.id));
        }
    }
}
