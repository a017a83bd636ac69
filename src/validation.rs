use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::model::{
    Client, ClientId, Currency, Invoice, InvoiceStatus, ProposalStatus, SaleLineItem,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field `{field}` is required")]
    MissingField { field: &'static str },
    #[error("Invoice needs at least one line item")]
    NoLineItems,
    #[error("Line {line} has no product")]
    MissingProduct { line: usize },
    #[error("Line {line} must have a quantity greater than zero")]
    ZeroQuantity { line: usize },
    #[error("Line {line} must not have a negative unit price")]
    NegativePrice { line: usize },
    #[error("Line {line} discount must be between 0 and 100")]
    DiscountOutOfRange { line: usize },
}

/// Client form input, before an id and creation date are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClient {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub interest: String,
    pub capture_origin: String,
    pub captured_by: String,
    pub status: ProposalStatus,
}

impl Default for NewClient {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            phone: String::new(),
            email: String::new(),
            interest: "General".to_string(),
            capture_origin: "Web".to_string(),
            captured_by: "Sistema".to_string(),
            status: ProposalStatus::Enviada,
        }
    }
}

impl NewClient {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("full_name", &self.full_name)?;
        require("phone", &self.phone)?;
        require("email", &self.email)
    }

    pub fn into_client(self, id: ClientId, created_at: NaiveDate) -> Client {
        Client {
            id,
            full_name: self.full_name.trim().to_string(),
            phone: self.phone,
            email: self.email,
            interest: self.interest,
            capture_origin: self.capture_origin,
            captured_by: self.captured_by,
            status: self.status,
            created_at,
            invoice_total: None,
            sale_type: None,
            profile_image: None,
            attachments: Vec::new(),
            interactions: Vec::new(),
        }
    }
}

/// Invoice form input. Totals are derived from the lines, tax is zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceDraft {
    pub number: String,
    pub client_id: Option<ClientId>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<InvoiceStatus>,
    pub currency: Currency,
    pub items: Vec<SaleLineItem>,
}

impl InvoiceDraft {
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(SaleLineItem::amount).sum()
    }

    pub fn into_invoice(self, id: impl Into<String>) -> Result<Invoice, ValidationError> {
        require("number", &self.number)?;
        let client_id = self
            .client_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or(ValidationError::MissingField { field: "client_id" })?;
        let issue_date = self
            .issue_date
            .ok_or(ValidationError::MissingField { field: "issue_date" })?;
        let due_date = self
            .due_date
            .ok_or(ValidationError::MissingField { field: "due_date" })?;
        if self.items.is_empty() {
            return Err(ValidationError::NoLineItems);
        }
        for (idx, item) in self.items.iter().enumerate() {
            check_line(idx + 1, item)?;
        }

        let subtotal = self.subtotal();
        let tax = Decimal::ZERO;
        Ok(Invoice {
            id: id.into(),
            number: self.number.trim().to_string(),
            client_id,
            issue_date,
            due_date,
            status: self.status.unwrap_or(InvoiceStatus::Draft),
            items: self.items,
            subtotal,
            tax,
            total: subtotal + tax,
            currency: self.currency,
        })
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(())
    }
}

fn check_line(line: usize, item: &SaleLineItem) -> Result<(), ValidationError> {
    if item.product_id.trim().is_empty() {
        return Err(ValidationError::MissingProduct { line });
    }
    if item.quantity == 0 {
        return Err(ValidationError::ZeroQuantity { line });
    }
    if item.unit_price < Decimal::ZERO {
        return Err(ValidationError::NegativePrice { line });
    }
    match item.discount_pct {
        Some(pct) if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED => {
            Err(ValidationError::DiscountOutOfRange { line })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: &str, quantity: u32, unit_price: i64) -> SaleLineItem {
        SaleLineItem {
            product_id: product_id.to_string(),
            quantity,
            unit_price: Decimal::from(unit_price),
            discount_pct: None,
        }
    }

    fn draft() -> InvoiceDraft {
        InvoiceDraft {
            number: "F-2025-001".to_string(),
            client_id: Some("acme-sa".to_string()),
            issue_date: NaiveDate::from_ymd_opt(2025, 1, 10),
            due_date: NaiveDate::from_ymd_opt(2025, 2, 9),
            items: vec![line("p-100", 3, 189_900), line("p-104", 10, 225_000)],
            ..Default::default()
        }
    }

    #[test]
    fn valid_draft_builds_invoice() {
        let invoice = draft().into_invoice("inv-1").unwrap();
        assert_eq!(invoice.id, "inv-1");
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert_eq!(invoice.currency, Currency::Eur);
        assert_eq!(invoice.subtotal, Decimal::from(2_819_700));
        assert_eq!(invoice.tax, Decimal::ZERO);
        assert_eq!(invoice.total, invoice.subtotal);
    }

    #[test]
    fn missing_fields_are_reported_in_form_order() {
        let err = InvoiceDraft::default().into_invoice("x").unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "number" });

        let err = InvoiceDraft {
            client_id: Some(" ".to_string()),
            ..draft()
        }
        .into_invoice("x")
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "client_id" });
        assert_eq!(err.to_string(), "Field `client_id` is required");

        let err = InvoiceDraft {
            due_date: None,
            ..draft()
        }
        .into_invoice("x")
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "due_date" });
    }

    #[test]
    fn line_items_are_checked() {
        let with_items = |items| InvoiceDraft { items, ..draft() }.into_invoice("x");

        assert_eq!(with_items(vec![]).unwrap_err(), ValidationError::NoLineItems);
        assert_eq!(
            with_items(vec![line("p-100", 1, 10), line("", 1, 10)]).unwrap_err(),
            ValidationError::MissingProduct { line: 2 }
        );
        assert_eq!(
            with_items(vec![line("p-100", 0, 10)]).unwrap_err(),
            ValidationError::ZeroQuantity { line: 1 }
        );
        assert_eq!(
            with_items(vec![line("p-100", 1, -1)]).unwrap_err(),
            ValidationError::NegativePrice { line: 1 }
        );
        let mut discounted = line("p-100", 1, 10);
        discounted.discount_pct = Some(Decimal::from(120));
        assert_eq!(
            with_items(vec![discounted]).unwrap_err(),
            ValidationError::DiscountOutOfRange { line: 1 }
        );
    }

    #[test]
    fn new_client_requires_contact_fields() {
        let mut input = NewClient {
            full_name: "Roberto Mendoza".to_string(),
            phone: "+34 612 345 678".to_string(),
            ..Default::default()
        };
        assert_eq!(
            input.validate(),
            Err(ValidationError::MissingField { field: "email" })
        );
        input.email = "roberto@example.com".to_string();
        assert_eq!(input.validate(), Ok(()));

        let client = input.into_client("roberto-mendoza".to_string(), NaiveDate::MIN);
        assert_eq!(client.interest, "General");
        assert_eq!(client.captured_by, "Sistema");
        assert!(client.interactions.is_empty());
    }
}
