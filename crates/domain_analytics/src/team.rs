//! Team performance breakdown
//!
//! Groups collected revenue by the people named on items. A person can
//! appear in several attribution roles; the department they report under
//! follows role precedence so nobody is double-counted.

use serde::{Deserialize, Serialize};

use core_kernel::Money;
use domain_billing::{BillableItem, InvoiceType, ItemStatus};

use crate::revenue::sum_amounts;

/// Department a team member is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Sales,
    Operations,
    CustomerExperience,
}

/// Collected revenue attributed to one person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMemberStats {
    pub name: String,
    pub department: Department,
    /// Received license revenue they raised, invoice date in window
    pub license_collected: Money,
    /// Received one-time revenue they raised, invoice date in window
    pub one_time_collected: Money,
    /// Sum of the two
    pub total_collected: Money,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Resolves a person's department by role precedence
///
/// A sales credit anywhere makes them Sales; otherwise a project
/// management credit makes them Operations; anyone left is CX.
fn department_of(name: &str, items: &[&BillableItem]) -> Department {
    let holds = |field: fn(&BillableItem) -> &Option<String>| {
        items.iter().any(|item| non_blank(field(item)) == Some(name))
    };
    if holds(|i| &i.attribution.sales_manager) {
        Department::Sales
    } else if holds(|i| &i.attribution.project_manager) {
        Department::Operations
    } else {
        Department::CustomerExperience
    }
}

/// Per-person collected revenue over the filtered item set
///
/// The roster is discovered from the three manager fields in encounter
/// order; `invoice_raised_by` attributes amounts but never adds a person
/// by itself. Collected amounts only count Received items the person
/// raised whose invoice date falls inside `window_items` (the caller
/// pre-windows).
pub fn team_stats(items: &[&BillableItem], window_items: &[&BillableItem]) -> Vec<TeamMemberStats> {
    let mut names: Vec<String> = Vec::new();
    for item in items {
        for field in [
            &item.attribution.sales_manager,
            &item.attribution.project_manager,
            &item.attribution.cx_manager,
        ] {
            if let Some(name) = non_blank(field) {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
    }

    names
        .into_iter()
        .map(|name| {
            let collected = |invoice_type: InvoiceType| {
                sum_amounts(window_items.iter().copied().filter(|item| {
                    item.status == ItemStatus::Received
                        && item.invoice_type == invoice_type
                        && non_blank(&item.attribution.invoice_raised_by) == Some(name.as_str())
                }))
            };
            let license = collected(InvoiceType::License);
            let one_time = collected(InvoiceType::OneTime);
            let total = Money::new(license.amount() + one_time.amount(), license.currency());
            TeamMemberStats {
                department: department_of(&name, items),
                name,
                license_collected: license,
                one_time_collected: one_time,
                total_collected: total,
            }
        })
        .collect()
}
