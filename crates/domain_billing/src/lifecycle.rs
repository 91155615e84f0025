//! Billable item lifecycle rules
//!
//! Validation and allowed status transitions. Validation runs before any
//! write, so a failing item never reaches the store.

use crate::error::BillingError;
use crate::item::{BillableItem, ItemStatus};

/// Validates an item's invariants ahead of a write
///
/// Invoiced items (Raised/Received) must carry invoice number, invoice
/// date, and an invoice document, and the invoice date must not fall
/// after the copied PO end date.
pub fn validate_billable_item(item: &BillableItem) -> Result<(), BillingError> {
    if item.amount.is_negative() {
        return Err(BillingError::NegativeAmount);
    }

    if item.status.is_invoiced() {
        if item
            .invoice_number
            .as_deref()
            .map_or(true, |n| n.trim().is_empty())
        {
            return Err(BillingError::MissingInvoiceNumber);
        }
        if item.invoice_date.is_none() {
            return Err(BillingError::MissingInvoiceDate);
        }
        if item.invoice_document.is_none() {
            return Err(BillingError::MissingInvoiceDocument);
        }
    }

    if let (Some(invoice_date), Some(po_end_date)) = (item.invoice_date, item.po_end_date) {
        if invoice_date > po_end_date {
            return Err(BillingError::InvoiceAfterPoEnd {
                invoice_date,
                po_end_date,
            });
        }
    }

    Ok(())
}

/// Approves a pending item
///
/// Approval is only valid from `Pending`; re-approving an already
/// approved item is rejected rather than treated as idempotent, so a
/// stale screen cannot silently flip a rejected item back.
pub fn approve(item: &mut BillableItem) -> Result<(), BillingError> {
    transition_from_pending(item, ItemStatus::Approved)
}

/// Rejects a pending item
pub fn reject(item: &mut BillableItem) -> Result<(), BillingError> {
    transition_from_pending(item, ItemStatus::NotApproved)
}

fn transition_from_pending(item: &mut BillableItem, to: ItemStatus) -> Result<(), BillingError> {
    if item.status != ItemStatus::Pending {
        return Err(BillingError::InvalidStatusTransition {
            from: item.status,
            to,
        });
    }
    item.status = to;
    item.updated_at = chrono::Utc::now();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::InvoiceType;
    use chrono::NaiveDate;
    use core_kernel::{DocumentId, Money, ProjectId};
    use rust_decimal_macros::dec;

    fn raised_item() -> BillableItem {
        let mut item = BillableItem::new(
            ProjectId::new(),
            "Annual license",
            InvoiceType::License,
            Money::inr(dec!(120000)),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        );
        item.status = ItemStatus::Raised;
        item.invoice_number = Some("INV-042".to_string());
        item.invoice_date = NaiveDate::from_ymd_opt(2024, 4, 15);
        item.invoice_document = Some(DocumentId::new());
        item.po_end_date = NaiveDate::from_ymd_opt(2025, 3, 31);
        item
    }

    #[test]
    fn test_valid_raised_item_passes() {
        assert!(validate_billable_item(&raised_item()).is_ok());
    }

    #[test]
    fn test_raised_without_invoice_number() {
        let mut item = raised_item();
        item.invoice_number = None;
        assert!(matches!(
            validate_billable_item(&item),
            Err(BillingError::MissingInvoiceNumber)
        ));

        // Whitespace-only counts as empty
        item.invoice_number = Some("   ".to_string());
        assert!(matches!(
            validate_billable_item(&item),
            Err(BillingError::MissingInvoiceNumber)
        ));
    }

    #[test]
    fn test_raised_without_invoice_date() {
        let mut item = raised_item();
        item.invoice_date = None;
        assert!(matches!(
            validate_billable_item(&item),
            Err(BillingError::MissingInvoiceDate)
        ));
    }

    #[test]
    fn test_raised_without_invoice_document() {
        let mut item = raised_item();
        item.invoice_document = None;
        assert!(matches!(
            validate_billable_item(&item),
            Err(BillingError::MissingInvoiceDocument)
        ));
    }

    #[test]
    fn test_received_requires_same_fields() {
        let mut item = raised_item();
        item.status = ItemStatus::Received;
        item.invoice_document = None;
        assert!(matches!(
            validate_billable_item(&item),
            Err(BillingError::MissingInvoiceDocument)
        ));
    }

    #[test]
    fn test_invoice_after_po_end_rejected() {
        let mut item = raised_item();
        item.invoice_date = NaiveDate::from_ymd_opt(2025, 4, 10);
        assert!(matches!(
            validate_billable_item(&item),
            Err(BillingError::InvoiceAfterPoEnd { .. })
        ));
    }

    #[test]
    fn test_invoice_on_po_end_day_allowed() {
        let mut item = raised_item();
        item.invoice_date = item.po_end_date;
        assert!(validate_billable_item(&item).is_ok());
    }

    #[test]
    fn test_pending_item_needs_no_invoice_fields() {
        let item = BillableItem::new(
            ProjectId::new(),
            "Support retainer",
            InvoiceType::Others,
            Money::inr(dec!(5000)),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
        );
        assert!(validate_billable_item(&item).is_ok());
    }

    #[test]
    fn test_approve_from_pending() {
        let mut item = raised_item();
        item.status = ItemStatus::Pending;
        approve(&mut item).unwrap();
        assert_eq!(item.status, ItemStatus::Approved);
    }

    #[test]
    fn test_reject_from_pending() {
        let mut item = raised_item();
        item.status = ItemStatus::Pending;
        reject(&mut item).unwrap();
        assert_eq!(item.status, ItemStatus::NotApproved);
    }

    #[test]
    fn test_approve_outside_pending_is_rejected() {
        let mut item = raised_item();
        item.status = ItemStatus::Approved;
        assert!(matches!(
            approve(&mut item),
            Err(BillingError::InvalidStatusTransition { .. })
        ));

        item.status = ItemStatus::NotApproved;
        assert!(matches!(
            reject(&mut item),
            Err(BillingError::InvalidStatusTransition { .. })
        ));
    }
}
