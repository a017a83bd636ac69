use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type ClientId = String;
pub type ProductId = String;

/// Shown wherever a derived label cannot be resolved.
pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Enviada,
    Recibida,
    Leida,
    Verificada,
    Aceptada,
}

impl ProposalStatus {
    /// Pipeline order, first to last.
    pub const ALL: [Self; 5] = [
        Self::Enviada,
        Self::Recibida,
        Self::Leida,
        Self::Verificada,
        Self::Aceptada,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enviada => "enviada",
            Self::Recibida => "recibida",
            Self::Leida => "leida",
            Self::Verificada => "verificada",
            Self::Aceptada => "aceptada",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SaleType {
    Servicio,
    Producto,
}

impl SaleType {
    pub const ALL: [Self; 2] = [Self::Servicio, Self::Producto];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Servicio => "Servicio",
            Self::Producto => "Producto",
        }
    }

    /// Loose keyword match used for spreadsheet cells and free text.
    pub fn detect(text: &str) -> Option<Self> {
        let text = text.to_lowercase();
        if text.contains("serv") {
            Some(Self::Servicio)
        } else if text.contains("prod") {
            Some(Self::Producto)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Servicio,
    Producto,
}

impl ProductCategory {
    pub fn sale_type(self) -> SaleType {
        match self {
            Self::Servicio => SaleType::Servicio,
            Self::Producto => SaleType::Producto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SalesCategory {
    Bordado,
    Grabado,
    #[serde(rename = "UV")]
    Uv,
}

impl SalesCategory {
    pub const ALL: [Self; 3] = [Self::Bordado, Self::Grabado, Self::Uv];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bordado => "Bordado",
            Self::Grabado => "Grabado",
            Self::Uv => "UV",
        }
    }

    /// Keyword match against free text, checked in [`Self::ALL`] order.
    pub fn detect(text: &str) -> Option<Self> {
        let text = text.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| text.contains(&category.as_str().to_lowercase()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentCondition {
    #[default]
    Contado,
    Credito,
}

impl PaymentCondition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contado => "Contado",
            Self::Credito => "Credito",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Void,
}

impl InvoiceStatus {
    pub const ALL: [Self; 5] = [
        Self::Draft,
        Self::Sent,
        Self::Paid,
        Self::Overdue,
        Self::Void,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Void => "void",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Ars,
    Mxn,
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(ProposalStatus, SaleType, SalesCategory, PaymentCondition, InvoiceStatus);

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub url: String,
    pub uploaded_at: NaiveDateTime,
    pub uploaded_by: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Comment,
    StatusChange,
    Task,
    Document,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub id: String,
    pub kind: InteractionKind,
    pub content: String,
    pub author: String,
    pub timestamp: NaiveDateTime,
    pub mentions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub interest: String,
    pub capture_origin: String,
    pub captured_by: String,
    pub status: ProposalStatus,
    pub created_at: NaiveDate,
    pub invoice_total: Option<Decimal>,
    pub sale_type: Option<SaleType>,
    pub profile_image: Option<String>,
    pub attachments: Vec<Attachment>,
    pub interactions: Vec<Interaction>,
}

impl Client {
    /// Interactions oldest first. Stored order is whatever the producer used.
    pub fn sorted_interactions(&self) -> Vec<&Interaction> {
        let mut sorted: Vec<&Interaction> = self.interactions.iter().collect();
        sorted.sort_by_key(|interaction| interaction.timestamp);
        sorted
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductOrService {
    pub id: ProductId,
    pub name: String,
    pub category: ProductCategory,
    pub unit_price: Decimal,
    pub sku: Option<String>,
    pub taxable: bool,
    pub sales_category: Option<SalesCategory>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    pub id: String,
    pub product_id: ProductId,
    pub quantity_on_hand: u32,
    pub reorder_point: Option<u32>,
    pub updated_at: NaiveDate,
}

impl InventoryItem {
    pub fn is_low_stock(&self) -> bool {
        self.reorder_point
            .is_some_and(|reorder_point| self.quantity_on_hand <= reorder_point)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleLineItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// 0..=100. Carried but not applied by any aggregation.
    pub discount_pct: Option<Decimal>,
}

impl SaleLineItem {
    pub fn amount(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub id: String,
    pub date: NaiveDate,
    pub client_id: Option<ClientId>,
    pub items: Vec<SaleLineItem>,
    pub total: Decimal,
    pub notes: Option<String>,
    pub payment_condition: Option<PaymentCondition>,
}

impl SaleRecord {
    /// Sum of line amounts. The stored `total` is not trusted for rollups.
    pub fn amount(&self) -> Decimal {
        self.items.iter().map(SaleLineItem::amount).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: String,
    pub number: String,
    pub client_id: ClientId,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub items: Vec<SaleLineItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub currency: Currency,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity_on_hand: u32, reorder_point: Option<u32>) -> InventoryItem {
        InventoryItem {
            id: "inv".to_string(),
            product_id: "p".to_string(),
            quantity_on_hand,
            reorder_point,
            updated_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn low_stock_requires_reorder_point() {
        for qty in [0, 5, 10, 11, 500] {
            assert!(!item(qty, None).is_low_stock());
            assert_eq!(item(qty, Some(10)).is_low_stock(), qty <= 10);
        }
    }

    #[test]
    fn detect_sale_type_and_category() {
        assert_eq!(SaleType::detect("SERVICIOS"), Some(SaleType::Servicio));
        assert_eq!(SaleType::detect("Venta de productos"), Some(SaleType::Producto));
        assert_eq!(SaleType::detect("otro"), None);

        assert_eq!(SalesCategory::detect("Bordado de logo"), Some(SalesCategory::Bordado));
        assert_eq!(SalesCategory::detect("impresion uv"), Some(SalesCategory::Uv));
        assert_eq!(SalesCategory::detect("Grabado láser"), Some(SalesCategory::Grabado));
        assert_eq!(SalesCategory::detect("Derecho Civil"), None);
    }

    #[test]
    fn line_and_sale_amounts_ignore_discount() {
        let sale = SaleRecord {
            id: "s".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
            client_id: None,
            items: vec![
                SaleLineItem {
                    product_id: "a".to_string(),
                    quantity: 3,
                    unit_price: Decimal::from(189_900),
                    discount_pct: Some(Decimal::from(50)),
                },
                SaleLineItem {
                    product_id: "b".to_string(),
                    quantity: 10,
                    unit_price: Decimal::from(225_000),
                    discount_pct: None,
                },
            ],
            total: Decimal::ZERO,
            notes: None,
            payment_condition: None,
        };
        assert_eq!(sale.items[0].amount(), Decimal::from(569_700));
        assert_eq!(sale.amount(), Decimal::from(2_819_700));
    }

    #[test]
    fn interactions_sorted_on_read() {
        let at = |h| {
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        let interaction = |id: &str, hour| Interaction {
            id: id.to_string(),
            kind: InteractionKind::Comment,
            content: String::new(),
            author: "Ana".to_string(),
            timestamp: at(hour),
            mentions: vec![],
        };
        let client = Client {
            id: "1".to_string(),
            full_name: "Roberto".to_string(),
            phone: String::new(),
            email: String::new(),
            interest: String::new(),
            capture_origin: String::new(),
            captured_by: String::new(),
            status: ProposalStatus::Enviada,
            created_at: at(0).date(),
            invoice_total: None,
            sale_type: None,
            profile_image: None,
            attachments: vec![],
            interactions: vec![interaction("late", 14), interaction("early", 9)],
        };
        let ids: Vec<&str> = client
            .sorted_interactions()
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, ["early", "late"]);
        assert_eq!(client.interactions[0].id, "late");
    }
}
