//! Filter specification and the item filtering pipeline

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use core_kernel::{ClientId, FinancialYear, FiscalQuarter, PeriodWindow, ProjectId};
use core_kernel::fiscal::rolling_months;
use domain_billing::{BillableItem, InvoiceType};

/// Date constraint of a filter
///
/// Presets resolve to concrete windows relative to the engine's `as_of`
/// date. `Any` applies no date constraint: items without an invoice date
/// pass the date check vacuously only in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRange {
    /// No date filtering
    Any,
    /// The financial year containing `as_of`
    CurrentFinancialYear,
    /// The fiscal quarter containing `as_of`
    CurrentQuarter,
    /// The six calendar months ending at `as_of`'s month
    LastSixMonths,
    /// Caller-supplied inclusive bounds
    Custom(PeriodWindow),
}

impl DateRange {
    /// Resolves the range to a window, if it constrains dates at all
    pub fn window(&self, as_of: NaiveDate) -> Option<PeriodWindow> {
        match self {
            DateRange::Any => None,
            DateRange::CurrentFinancialYear => Some(FinancialYear::containing(as_of).window()),
            DateRange::CurrentQuarter => Some(FiscalQuarter::containing(as_of).window()),
            DateRange::LastSixMonths => {
                let months = rolling_months(as_of, 6);
                let first = months.first()?;
                let last = months.last()?;
                PeriodWindow::new(first.start, last.end).ok()
            }
            DateRange::Custom(window) => Some(*window),
        }
    }
}

impl Default for DateRange {
    fn default() -> Self {
        DateRange::Any
    }
}

/// Criteria the dashboard filters the item set by
///
/// Empty id sets mean "no filtering on that dimension"; an empty
/// invoice-type set likewise passes every type (the UI always submits the
/// full type set when nothing is deselected).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub date_range: DateRange,
    pub client_ids: HashSet<ClientId>,
    pub project_ids: HashSet<ProjectId>,
    pub invoice_types: HashSet<InvoiceType>,
}

impl FilterSpec {
    /// A filter that passes everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to the given clients
    pub fn with_clients(mut self, clients: impl IntoIterator<Item = ClientId>) -> Self {
        self.client_ids = clients.into_iter().collect();
        self
    }

    /// Restricts to the given projects (applies only alongside a client filter)
    pub fn with_projects(mut self, projects: impl IntoIterator<Item = ProjectId>) -> Self {
        self.project_ids = projects.into_iter().collect();
        self
    }

    /// Restricts to the given invoice types
    pub fn with_types(mut self, types: impl IntoIterator<Item = InvoiceType>) -> Self {
        self.invoice_types = types.into_iter().collect();
        self
    }

    /// Restricts invoice dates to the given range
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    /// Returns true if the item passes this filter
    ///
    /// The client check resolves the item's owning project through
    /// `project_clients`; when a client filter is active, items whose
    /// project is unknown cannot prove membership and are excluded. The
    /// project sub-filter only narrows within an active client filter,
    /// mirroring the dashboard's cascading selectors.
    pub fn matches(
        &self,
        item: &BillableItem,
        project_clients: &HashMap<ProjectId, ClientId>,
        as_of: NaiveDate,
    ) -> bool {
        if let Some(window) = self.date_range.window(as_of) {
            match item.invoice_date {
                Some(date) if window.contains_date(date) => {}
                _ => return false,
            }
        }

        if !self.client_ids.is_empty() {
            match project_clients.get(&item.project_id) {
                Some(client_id) if self.client_ids.contains(client_id) => {}
                _ => return false,
            }
            if !self.project_ids.is_empty() && !self.project_ids.contains(&item.project_id) {
                return false;
            }
        }

        if !self.invoice_types.is_empty() && !self.invoice_types.contains(&item.invoice_type) {
            return false;
        }

        true
    }
}
