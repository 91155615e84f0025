//! Top customer ranking
//!
//! Ranks clients by lifetime billed value across every item regardless of
//! status or date filters. Ties keep the snapshot's client order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use core_kernel::{ClientId, Money, ProjectId};
use domain_billing::BillableItem;
use domain_directory::Client;

use crate::revenue::sum_amounts;

/// One row of the top-customers board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopCustomer {
    pub client_id: ClientId,
    pub legal_name: String,
    /// Lifetime billed value across all items, any status
    pub total_billed: Money,
}

/// Highest-value clients by lifetime billed amount
///
/// Items that cannot be traced to a client through the project map are
/// left out. Sorting is stable, so equal totals rank in client order.
pub fn top_customers(
    clients: &[Client],
    items: &[&BillableItem],
    project_clients: &HashMap<ProjectId, ClientId>,
    limit: usize,
) -> Vec<TopCustomer> {
    let mut rows: Vec<TopCustomer> = clients
        .iter()
        .map(|client| {
            let total = sum_amounts(items.iter().copied().filter(|item| {
                project_clients.get(&item.project_id) == Some(&client.id)
            }));
            TopCustomer {
                client_id: client.id,
                legal_name: client.legal_name.clone(),
                total_billed: total,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.total_billed.amount().cmp(&a.total_billed.amount()));
    rows.truncate(limit);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain_billing::InvoiceType;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn setup(
        totals: &[i64],
    ) -> (Vec<Client>, Vec<BillableItem>, HashMap<ProjectId, ClientId>) {
        let mut clients = Vec::new();
        let mut items = Vec::new();
        let mut map = HashMap::new();
        for (n, &total) in totals.iter().enumerate() {
            let client = Client::new(format!("Client {n}"));
            let project_id = ProjectId::new();
            map.insert(project_id, client.id);
            items.push(BillableItem::new(
                project_id,
                "work",
                InvoiceType::License,
                Money::inr(Decimal::from(total)),
                NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            ));
            clients.push(client);
        }
        (clients, items, map)
    }

    #[test]
    fn test_ranks_by_lifetime_total() {
        let (clients, items, map) = setup(&[100, 300, 200]);
        let refs: Vec<&BillableItem> = items.iter().collect();
        let rows = top_customers(&clients, &refs, &map, 5);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].legal_name, "Client 1");
        assert_eq!(rows[0].total_billed.amount(), dec!(300));
        assert_eq!(rows[2].legal_name, "Client 0");
    }

    #[test]
    fn test_truncates_to_limit() {
        let (clients, items, map) = setup(&[6, 5, 4, 3, 2, 1, 7]);
        let refs: Vec<&BillableItem> = items.iter().collect();
        let rows = top_customers(&clients, &refs, &map, 5);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].total_billed.amount(), dec!(7));
        assert_eq!(rows[4].total_billed.amount(), dec!(3));
    }

    #[test]
    fn test_ties_keep_client_order() {
        let (clients, items, map) = setup(&[50, 50, 50]);
        let refs: Vec<&BillableItem> = items.iter().collect();
        let rows = top_customers(&clients, &refs, &map, 5);
        let names: Vec<&str> = rows.iter().map(|r| r.legal_name.as_str()).collect();
        assert_eq!(names, vec!["Client 0", "Client 1", "Client 2"]);
    }

    #[test]
    fn test_unmapped_projects_are_skipped() {
        let (clients, mut items, map) = setup(&[100]);
        // An item pointing at an unknown project must not distort totals
        items.push(BillableItem::new(
            ProjectId::new(),
            "orphan",
            InvoiceType::OneTime,
            Money::inr(dec!(9999)),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
        ));
        let refs: Vec<&BillableItem> = items.iter().collect();
        let rows = top_customers(&clients, &refs, &map, 5);
        assert_eq!(rows[0].total_billed.amount(), dec!(100));
    }
}
