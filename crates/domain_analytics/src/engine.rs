//! The metrics engine façade
//!
//! A [`MetricsSnapshot`] is loaded once from the stores; the
//! [`AnalyticsEngine`] then answers every dashboard question from that
//! snapshot without further I/O.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use core_kernel::{fiscal, ClientId, Money, PortError, ProjectId};
use domain_billing::{BillableItem, BillingStore, InvoiceType};
use domain_directory::{Client, DirectoryStore, Project};

use crate::config::EngineConfig;
use crate::customers::{self, TopCustomer};
use crate::filter::{DateRange, FilterSpec};
use crate::mrr::{self, MonthlyMrrPoint};
use crate::revenue::{self, RevenueBreakdown, StatusSplit};
use crate::team::{self, TeamMemberStats};

/// Point-in-time copy of everything the engine computes over
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    pub clients: Vec<Client>,
    pub projects: Vec<Project>,
    pub items: Vec<BillableItem>,
}

impl MetricsSnapshot {
    /// Loads a fresh snapshot from the stores
    #[instrument(skip_all)]
    pub async fn load(
        directory: &dyn DirectoryStore,
        billing: &dyn BillingStore,
    ) -> Result<Self, PortError> {
        let clients = directory.list_clients().await?;
        let projects = directory.list_projects().await?;
        let items = billing.list_items().await?;
        tracing::debug!(
            clients = clients.len(),
            projects = projects.len(),
            items = items.len(),
            "metrics snapshot loaded"
        );
        Ok(Self {
            clients,
            projects,
            items,
        })
    }

    /// Project to owning-client lookup used by the filter pipeline
    pub fn project_clients(&self) -> HashMap<ProjectId, ClientId> {
        self.projects
            .iter()
            .map(|project| (project.id, project.client_id))
            .collect()
    }
}

/// Everything the dashboard shows, computed in one pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub revenue: RevenueBreakdown,
    pub outstanding: Money,
    pub license_split: StatusSplit,
    pub one_time_split: StatusSplit,
    pub current_mrr: Money,
    pub net_run_rate: Money,
    pub average_collection_days: f64,
    pub mrr_trend: Vec<MonthlyMrrPoint>,
    pub top_customers: Vec<TopCustomer>,
    pub team: Vec<TeamMemberStats>,
}

/// Pure, synchronous metrics calculator over one snapshot
pub struct AnalyticsEngine {
    snapshot: MetricsSnapshot,
    project_clients: HashMap<ProjectId, ClientId>,
    config: EngineConfig,
    as_of: NaiveDate,
}

impl AnalyticsEngine {
    pub fn new(snapshot: MetricsSnapshot, config: EngineConfig, as_of: NaiveDate) -> Self {
        let project_clients = snapshot.project_clients();
        Self {
            snapshot,
            project_clients,
            config,
            as_of,
        }
    }

    /// Items passing the full filter, date range included
    pub fn filtered(&self, filter: &FilterSpec) -> Vec<&BillableItem> {
        self.snapshot
            .items
            .iter()
            .filter(|item| filter.matches(item, &self.project_clients, self.as_of))
            .collect()
    }

    /// Items passing the filter's criteria with the date range lifted
    ///
    /// Outstanding amounts, MRR, and NRR look across all time even when
    /// the dashboard shows a windowed view.
    fn criteria_filtered(&self, filter: &FilterSpec) -> Vec<&BillableItem> {
        let unwindowed = filter.clone().with_date_range(DateRange::Any);
        self.filtered(&unwindowed)
    }

    pub fn total_revenue(&self, filter: &FilterSpec) -> RevenueBreakdown {
        revenue::total_revenue(&self.filtered(filter))
    }

    pub fn outstanding(&self, filter: &FilterSpec) -> Money {
        revenue::outstanding(&self.criteria_filtered(filter))
    }

    pub fn status_split(&self, filter: &FilterSpec, invoice_type: InvoiceType) -> StatusSplit {
        revenue::by_status_for_type(&self.filtered(filter), invoice_type)
    }

    pub fn average_collection_days(&self, filter: &FilterSpec) -> f64 {
        revenue::average_collection_days(&self.filtered(filter))
    }

    pub fn current_mrr(&self, filter: &FilterSpec) -> Money {
        mrr::current_mrr(&self.criteria_filtered(filter), self.as_of)
    }

    pub fn net_run_rate(&self, filter: &FilterSpec) -> Money {
        mrr::net_run_rate(&self.criteria_filtered(filter), self.as_of, &self.config)
    }

    pub fn mrr_trend(&self, filter: &FilterSpec) -> Vec<MonthlyMrrPoint> {
        let months = fiscal::rolling_months(self.as_of, self.config.mrr_trend_months);
        mrr::mrr_trend(&self.criteria_filtered(filter), &months, self.as_of)
    }

    /// Recurring run rate of one project over the current financial year
    pub fn project_mrr(&self, project_id: ProjectId) -> Money {
        let items: Vec<&BillableItem> = self.snapshot.items.iter().collect();
        mrr::project_mrr(&items, project_id, self.as_of)
    }

    /// Recurring run rate of one client, summed across their projects
    pub fn customer_mrr(&self, client_id: ClientId) -> Money {
        let mut total = Money::zero(Default::default());
        for project in self
            .snapshot
            .projects
            .iter()
            .filter(|p| p.client_id == client_id)
        {
            let project_total = self.project_mrr(project.id);
            total = Money::new(total.amount() + project_total.amount(), project_total.currency());
        }
        total
    }

    /// Lifetime top customers, unaffected by any filter
    pub fn top_customers(&self) -> Vec<TopCustomer> {
        let items: Vec<&BillableItem> = self.snapshot.items.iter().collect();
        customers::top_customers(
            &self.snapshot.clients,
            &items,
            &self.project_clients,
            self.config.top_customer_limit,
        )
    }

    /// Per-person collected revenue over the filtered set
    pub fn team_stats(&self, filter: &FilterSpec) -> Vec<TeamMemberStats> {
        let roster = self.criteria_filtered(filter);
        let windowed = self.filtered(filter);
        team::team_stats(&roster, &windowed)
    }

    /// Computes the full dashboard in one call
    #[instrument(skip_all, fields(as_of = %self.as_of))]
    pub fn dashboard(&self, filter: &FilterSpec) -> DashboardMetrics {
        DashboardMetrics {
            revenue: self.total_revenue(filter),
            outstanding: self.outstanding(filter),
            license_split: self.status_split(filter, InvoiceType::License),
            one_time_split: self.status_split(filter, InvoiceType::OneTime),
            current_mrr: self.current_mrr(filter),
            net_run_rate: self.net_run_rate(filter),
            average_collection_days: self.average_collection_days(filter),
            mrr_trend: self.mrr_trend(filter),
            top_customers: self.top_customers(),
            team: self.team_stats(filter),
        }
    }
}
