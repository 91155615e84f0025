//! Analytics Domain - Revenue Metrics Engine
//!
//! Computes the dashboard's revenue figures from an in-memory snapshot of
//! clients, projects, and billable items: total/license/one-time revenue,
//! outstanding amounts, MRR and its monthly trend, NRR, average collection
//! time, top customers, and the team breakdown.
//!
//! The engine is pure and synchronous: it never mutates its snapshot,
//! never persists a result, and never errors on missing data - absent
//! dates and empty filtered sets degrade to zero or empty results. Each
//! computation runs against the snapshot fetched at call time; nothing is
//! cached between calls.

pub mod config;
pub mod filter;
pub mod engine;
pub mod revenue;
pub mod mrr;
pub mod customers;
pub mod team;

pub use config::EngineConfig;
pub use filter::{DateRange, FilterSpec};
pub use engine::{AnalyticsEngine, DashboardMetrics, MetricsSnapshot};
pub use revenue::{RevenueBreakdown, StatusSplit};
pub use mrr::MonthlyMrrPoint;
pub use customers::TopCustomer;
pub use team::{Department, TeamMemberStats};
