//! Core Kernel - Foundational types and utilities for the billing portal
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Fiscal period utilities (financial year, quarters, rolling month windows)
//! - Common identifiers and value objects
//! - Port error types shared by all store adapters

pub mod money;
pub mod fiscal;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use fiscal::{
    FinancialYear, FiscalQuarter, MonthWindow, PeriodWindow, FiscalError,
    months_spanned, rolling_months,
};
pub use identifiers::{
    ClientId, ProjectId, PurchaseOrderId, BillableItemId, DocumentId,
};
pub use ports::{PortError, DomainPort};
