use rust_decimal::Decimal;

use crate::model::{Invoice, InvoiceStatus};

use super::Totals;

/// Receivables per status. All five statuses are always present.
pub fn ar_by_status(invoices: &[Invoice]) -> Totals<InvoiceStatus> {
    let mut totals = Totals::seeded(&InvoiceStatus::ALL);
    for invoice in invoices {
        totals.add(invoice.status, invoice.total);
    }
    totals
}

fn sum_where(invoices: &[Invoice], keep: impl Fn(InvoiceStatus) -> bool) -> Decimal {
    invoices
        .iter()
        .filter(|invoice| keep(invoice.status))
        .map(|invoice| invoice.total)
        .sum()
}

/// Drafts, sent and overdue invoices.
pub fn pending_receivables(invoices: &[Invoice]) -> Decimal {
    sum_where(invoices, |status| {
        matches!(status, InvoiceStatus::Draft | InvoiceStatus::Sent | InvoiceStatus::Overdue)
    })
}

pub fn paid_total(invoices: &[Invoice]) -> Decimal {
    sum_where(invoices, |status| status == InvoiceStatus::Paid)
}

/// Everything not yet settled, void invoices excluded.
pub fn outstanding_total(invoices: &[Invoice]) -> Decimal {
    sum_where(invoices, |status| {
        !matches!(status, InvoiceStatus::Paid | InvoiceStatus::Void)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::invoice;

    #[test]
    fn ar_always_has_every_status() {
        assert_eq!(ar_by_status(&[]).len(), 5);

        let invoices = vec![
            invoice("1", InvoiceStatus::Paid, 100),
            invoice("2", InvoiceStatus::Sent, 250),
            invoice("3", InvoiceStatus::Paid, 50),
        ];
        let ar = ar_by_status(&invoices);
        let keys: Vec<InvoiceStatus> = ar.iter().map(|(status, _)| status).collect();
        assert_eq!(keys, InvoiceStatus::ALL);
        assert_eq!(ar.get(InvoiceStatus::Paid), Decimal::from(150));
        assert_eq!(ar.get(InvoiceStatus::Overdue), Decimal::ZERO);
        assert_eq!(ar.grand_total(), Decimal::from(400));
    }

    #[test]
    fn receivable_summaries() {
        let invoices = vec![
            invoice("1", InvoiceStatus::Draft, 1),
            invoice("2", InvoiceStatus::Sent, 10),
            invoice("3", InvoiceStatus::Paid, 100),
            invoice("4", InvoiceStatus::Overdue, 1_000),
            invoice("5", InvoiceStatus::Void, 10_000),
        ];
        assert_eq!(pending_receivables(&invoices), Decimal::from(1_011));
        assert_eq!(paid_total(&invoices), Decimal::from(100));
        assert_eq!(outstanding_total(&invoices), Decimal::from(1_011));
    }
}
