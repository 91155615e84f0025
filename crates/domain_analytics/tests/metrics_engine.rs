//! End-to-end metrics engine scenarios

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::Money;
use domain_analytics::{AnalyticsEngine, DateRange, EngineConfig, FilterSpec, MetricsSnapshot};
use domain_billing::{BillableItem, InvoiceType, ItemStatus};
use domain_directory::{Client, Project};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct PortfolioBuilder {
    snapshot: MetricsSnapshot,
}

impl PortfolioBuilder {
    fn new() -> Self {
        Self {
            snapshot: MetricsSnapshot::default(),
        }
    }

    fn client(&mut self, name: &str) -> &Client {
        self.snapshot.clients.push(Client::new(name));
        self.snapshot.clients.last().unwrap()
    }

    fn project(&mut self, client_index: usize, name: &str) -> &Project {
        let client_id = self.snapshot.clients[client_index].id;
        self.snapshot.projects.push(Project::new(client_id, name));
        self.snapshot.projects.last().unwrap()
    }

    fn item(
        &mut self,
        project_index: usize,
        invoice_type: InvoiceType,
        status: ItemStatus,
        amount: i64,
        coverage: (NaiveDate, NaiveDate),
        invoice_date: Option<NaiveDate>,
        payment_date: Option<NaiveDate>,
    ) -> &BillableItem {
        let mut item = BillableItem::new(
            self.snapshot.projects[project_index].id,
            "item",
            invoice_type,
            Money::inr(Decimal::from(amount)),
            coverage.0,
            coverage.1,
        );
        item.status = status;
        item.invoice_date = invoice_date;
        item.payment_date = payment_date;
        self.snapshot.items.push(item);
        self.snapshot.items.last().unwrap()
    }

    fn engine(self, as_of: NaiveDate) -> AnalyticsEngine {
        AnalyticsEngine::new(self.snapshot, EngineConfig::default(), as_of)
    }
}

/// Annual 120000 license raised in April: 10000/month across the trend
#[test]
fn test_annual_license_prorates_across_trend() {
    let mut portfolio = PortfolioBuilder::new();
    portfolio.client("Acme");
    portfolio.project(0, "Platform");
    portfolio.item(
        0,
        InvoiceType::License,
        ItemStatus::Raised,
        120_000,
        (date(2024, 4, 1), date(2025, 3, 31)),
        Some(date(2024, 4, 10)),
        None,
    );

    let engine = portfolio.engine(date(2024, 9, 15));
    let trend = engine.mrr_trend(&FilterSpec::all());

    assert_eq!(trend.len(), 6);
    assert_eq!(trend[0].label, "Apr 2024");
    assert_eq!(trend[5].label, "Sep 2024");
    for point in &trend {
        assert_eq!(point.mrr.amount(), dec!(10000));
    }
}

/// Six-month 12000 license: 2000 in covered months, zero after coverage ends
#[test]
fn test_short_coverage_license_drops_out_of_trend() {
    let mut portfolio = PortfolioBuilder::new();
    portfolio.client("Acme");
    portfolio.project(0, "Platform");
    portfolio.item(
        0,
        InvoiceType::License,
        ItemStatus::Received,
        12_000,
        (date(2024, 4, 1), date(2024, 9, 30)),
        Some(date(2024, 4, 5)),
        Some(date(2024, 5, 1)),
    );

    let engine = portfolio.engine(date(2024, 12, 15));
    let trend = engine.mrr_trend(&FilterSpec::all());

    // Jul..=Dec window: Jul-Sep covered at 2000, Oct-Dec zero
    assert_eq!(trend[0].label, "Jul 2024");
    assert_eq!(trend[0].mrr.amount(), dec!(2000));
    assert_eq!(trend[2].mrr.amount(), dec!(2000));
    assert_eq!(trend[3].label, "Oct 2024");
    assert_eq!(trend[3].mrr.amount(), dec!(0));
    assert_eq!(trend[5].mrr.amount(), dec!(0));
}

#[test]
fn test_client_filter_cascades_to_revenue() {
    let mut portfolio = PortfolioBuilder::new();
    portfolio.client("Acme");
    portfolio.client("Globex");
    portfolio.project(0, "Acme Platform");
    portfolio.project(1, "Globex Rollout");
    portfolio.item(
        0,
        InvoiceType::License,
        ItemStatus::Received,
        50_000,
        (date(2024, 4, 1), date(2025, 3, 31)),
        Some(date(2024, 5, 1)),
        Some(date(2024, 5, 20)),
    );
    portfolio.item(
        1,
        InvoiceType::License,
        ItemStatus::Received,
        80_000,
        (date(2024, 4, 1), date(2025, 3, 31)),
        Some(date(2024, 5, 1)),
        Some(date(2024, 5, 10)),
    );

    let acme = portfolio.snapshot.clients[0].id;
    let engine = portfolio.engine(date(2024, 6, 1));

    let all = engine.total_revenue(&FilterSpec::all());
    assert_eq!(all.total.amount(), dec!(130000));

    let filtered = engine.total_revenue(&FilterSpec::all().with_clients([acme]));
    assert_eq!(filtered.total.amount(), dec!(50000));
}

#[test]
fn test_top_customers_rank_and_tiebreak() {
    let mut portfolio = PortfolioBuilder::new();
    for name in ["Alpha", "Beta", "Gamma"] {
        portfolio.client(name);
    }
    for n in 0..3 {
        portfolio.project(n, "project");
    }
    // Beta ahead; Alpha and Gamma tie, so directory order breaks it
    for (project, amount) in [(0usize, 100i64), (1, 400), (2, 100)] {
        portfolio.item(
            project,
            InvoiceType::OneTime,
            ItemStatus::Pending,
            amount,
            (date(2024, 4, 1), date(2024, 4, 30)),
            None,
            None,
        );
    }

    let engine = portfolio.engine(date(2024, 6, 1));
    let rows = engine.top_customers();
    let names: Vec<&str> = rows.iter().map(|r| r.legal_name.as_str()).collect();
    assert_eq!(names, vec!["Beta", "Alpha", "Gamma"]);
}

#[test]
fn test_quarter_preset_windows_revenue() {
    let mut portfolio = PortfolioBuilder::new();
    portfolio.client("Acme");
    portfolio.project(0, "Platform");
    // Inside Q1 FY2024-25
    portfolio.item(
        0,
        InvoiceType::OneTime,
        ItemStatus::Raised,
        10_000,
        (date(2024, 5, 1), date(2024, 5, 31)),
        Some(date(2024, 5, 15)),
        None,
    );
    // Prior quarter
    portfolio.item(
        0,
        InvoiceType::OneTime,
        ItemStatus::Raised,
        99_000,
        (date(2024, 2, 1), date(2024, 2, 29)),
        Some(date(2024, 2, 15)),
        None,
    );

    let engine = portfolio.engine(date(2024, 6, 1));
    let filter = FilterSpec::all().with_date_range(DateRange::CurrentQuarter);

    assert_eq!(engine.total_revenue(&filter).total.amount(), dec!(10000));
    // Outstanding looks across all time regardless of the window
    assert_eq!(engine.outstanding(&filter).amount(), dec!(109000));
}

proptest! {
    /// Applying the same filter twice never changes the result set
    #[test]
    fn prop_filtering_is_idempotent(amounts in prop::collection::vec(0i64..1_000_000, 1..20)) {
        let mut portfolio = PortfolioBuilder::new();
        portfolio.client("Acme");
        portfolio.project(0, "Platform");
        for (n, amount) in amounts.iter().enumerate() {
            let status = if n % 2 == 0 { ItemStatus::Raised } else { ItemStatus::Pending };
            let invoice_date = (n % 2 == 0).then(|| date(2024, 4, 1 + (n as u32 % 28)));
            portfolio.item(
                0,
                InvoiceType::License,
                status,
                *amount,
                (date(2024, 4, 1), date(2025, 3, 31)),
                invoice_date,
                None,
            );
        }

        let engine = portfolio.engine(date(2024, 6, 1));
        let filter = FilterSpec::all().with_date_range(DateRange::CurrentFinancialYear);

        let once = engine.total_revenue(&filter);
        let twice = engine.total_revenue(&filter);
        prop_assert_eq!(once, twice);
    }

    /// Total revenue is insensitive to item ordering in the snapshot
    #[test]
    fn prop_totals_are_order_insensitive(amounts in prop::collection::vec(0i64..1_000_000, 1..15)) {
        let build = |amounts: &[i64]| {
            let mut portfolio = PortfolioBuilder::new();
            portfolio.client("Acme");
            portfolio.project(0, "Platform");
            for amount in amounts {
                portfolio.item(
                    0,
                    InvoiceType::OneTime,
                    ItemStatus::Received,
                    *amount,
                    (date(2024, 5, 1), date(2024, 5, 31)),
                    Some(date(2024, 5, 10)),
                    Some(date(2024, 5, 20)),
                );
            }
            portfolio.engine(date(2024, 6, 1))
        };

        let forward = build(&amounts);
        let reversed: Vec<i64> = amounts.iter().rev().copied().collect();
        let backward = build(&reversed);

        let filter = FilterSpec::all();
        prop_assert_eq!(
            forward.total_revenue(&filter).total,
            backward.total_revenue(&filter).total
        );
    }
}
