use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::model::{
    Attachment, Client, Currency, Interaction, InteractionKind, InventoryItem, Invoice,
    InvoiceStatus, PaymentCondition, ProductCategory, ProductOrService, ProposalStatus,
    SaleLineItem, SaleRecord, SalesCategory,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap_or_default()
}

fn line(product_id: &str, quantity: u32, unit_price: i64) -> SaleLineItem {
    SaleLineItem {
        product_id: product_id.to_string(),
        quantity,
        unit_price: Decimal::from(unit_price),
        discount_pct: None,
    }
}

fn product(
    id: &str,
    name: &str,
    category: ProductCategory,
    unit_price: i64,
    sku: Option<&str>,
    sales_category: SalesCategory,
) -> ProductOrService {
    ProductOrService {
        id: id.to_string(),
        name: name.to_string(),
        category,
        unit_price: Decimal::from(unit_price),
        sku: sku.map(str::to_string),
        taxable: category == ProductCategory::Producto,
        sales_category: Some(sales_category),
    }
}

pub fn products() -> Vec<ProductOrService> {
    use ProductCategory::{Producto, Servicio};
    use SalesCategory::{Bordado, Grabado, Uv};
    vec![
        product("ps-1", "Diseño de logo", Servicio, 120_000, None, Grabado),
        product("ps-2", "Digitalización para bordado", Servicio, 450_000, None, Bordado),
        product("ps-3", "Impresión UV por m²", Servicio, 950_000, None, Uv),
        product("ps-4", "Parche bordado", Producto, 12_000, Some("PAR-BOR-01"), Bordado),
        product("p-100", "Kit de mate", Producto, 189_900, Some("KIT-MATE"), Grabado),
        product("p-101", "Mesita personalizada", Producto, 250_000, Some("MESA-PERS"), Grabado),
        product("p-102", "Stickers UV", Producto, 80_000, Some("STK-UV"), Uv),
        product("p-103", "Tabla de asado", Producto, 280_000, Some("TAB-ASADO"), Grabado),
        product("p-104", "Llaveros personalizados", Producto, 225_000, Some("LLA-PERS"), Grabado),
        product("p-105", "Bolso ecológico", Producto, 90_000, Some("BOL-ECO"), Bordado),
        product("p-106", "Delantal personalizado", Producto, 150_000, Some("DEL-PERS"), Bordado),
        product("p-107", "Placa de perro", Producto, 45_000, Some("PLC-DOG"), Grabado),
    ]
}

pub fn inventory() -> Vec<InventoryItem> {
    let item = |id: &str, product_id: &str, qty, reorder| InventoryItem {
        id: id.to_string(),
        product_id: product_id.to_string(),
        quantity_on_hand: qty,
        reorder_point: reorder,
        updated_at: date(2024, 1, 22),
    };
    vec![
        item("inv-1", "ps-4", 140, Some(50)),
        item("inv-2", "p-100", 18, Some(20)),
        item("inv-3", "p-101", 35, Some(10)),
        item("inv-4", "p-102", 500, Some(120)),
        item("inv-5", "p-103", 10, Some(10)),
        item("inv-6", "p-104", 200, Some(60)),
        item("inv-7", "p-105", 300, None),
        item("inv-8", "p-106", 120, Some(30)),
        item("inv-9", "p-107", 1000, Some(200)),
    ]
}

pub fn sales() -> Vec<SaleRecord> {
    let sale = |id: &str, on: NaiveDate, client: &str, items: Vec<SaleLineItem>, paid| {
        SaleRecord {
            id: id.to_string(),
            date: on,
            client_id: Some(client.to_string()),
            total: items.iter().map(SaleLineItem::amount).sum(),
            items,
            notes: None,
            payment_condition: Some(paid),
        }
    };
    use PaymentCondition::{Contado, Credito};
    vec![
        sale("sale-1", date(2024, 1, 16), "1", vec![line("ps-1", 1, 120_000), line("ps-4", 2, 12_000)], Contado),
        sale("sale-2", date(2024, 1, 25), "3", vec![line("ps-2", 1, 450_000)], Credito),
        sale("sale-3", date(2024, 1, 28), "2", vec![line("ps-3", 1, 950_000)], Contado),
        sale("sale-4", date(2024, 2, 5), "4", vec![line("p-100", 3, 189_900), line("p-104", 10, 225_000)], Contado),
        sale("sale-5", date(2024, 3, 12), "5", vec![line("p-101", 5, 250_000), line("p-103", 2, 280_000)], Credito),
        sale("sale-6", date(2024, 4, 20), "6", vec![line("p-102", 500, 80_000)], Contado),
        sale("sale-7", date(2024, 5, 3), "2", vec![line("p-106", 20, 150_000), line("p-105", 50, 90_000)], Credito),
        sale("sale-8", date(2024, 6, 18), "3", vec![line("p-107", 200, 45_000), line("p-100", 5, 189_900)], Contado),
        sale("sale-9", date(2024, 7, 22), "1", vec![line("p-103", 8, 280_000)], Credito),
        sale("sale-10", date(2025, 8, 9), "4", vec![line("p-102", 800, 80_000), line("p-104", 30, 225_000)], Contado),
    ]
}

pub fn invoices() -> Vec<Invoice> {
    let invoice = |n: u32, client: &str, issued: NaiveDate, status, items: Vec<SaleLineItem>| {
        let subtotal: Decimal = items.iter().map(SaleLineItem::amount).sum();
        Invoice {
            id: format!("inv-{n:03}"),
            number: format!("F-2024-{n:03}"),
            client_id: client.to_string(),
            issue_date: issued,
            due_date: issued + chrono::Days::new(30),
            status,
            items,
            subtotal,
            tax: Decimal::ZERO,
            total: subtotal,
            currency: Currency::Eur,
        }
    };
    use InvoiceStatus::{Draft, Overdue, Paid, Sent};
    vec![
        invoice(1, "1", date(2024, 1, 16), Paid, vec![line("ps-1", 1, 120_000), line("ps-4", 2, 12_000)]),
        invoice(2, "3", date(2024, 1, 25), Sent, vec![line("ps-2", 1, 450_000)]),
        invoice(3, "2", date(2024, 1, 28), Draft, vec![line("ps-3", 1, 950_000)]),
        invoice(4, "4", date(2024, 3, 5), Sent, vec![line("p-102", 600, 80_000), line("p-104", 20, 225_000)]),
        invoice(5, "5", date(2024, 3, 18), Overdue, vec![line("p-103", 10, 280_000), line("p-101", 8, 250_000)]),
        invoice(6, "6", date(2024, 4, 10), Paid, vec![line("p-102", 900, 80_000)]),
        invoice(7, "2", date(2024, 5, 22), Draft, vec![line("p-100", 12, 189_900), line("p-105", 100, 90_000)]),
    ]
}

pub fn clients() -> Vec<Client> {
    let client = |id: &str, name: &str, email: &str, interest: &str, by: &str, status, created| Client {
        id: id.to_string(),
        full_name: name.to_string(),
        phone: String::new(),
        email: email.to_string(),
        interest: interest.to_string(),
        capture_origin: "Web".to_string(),
        captured_by: by.to_string(),
        status,
        created_at: created,
        invoice_total: None,
        sale_type: None,
        profile_image: None,
        attachments: Vec::new(),
        interactions: Vec::new(),
    };
    use ProposalStatus::{Aceptada, Enviada, Leida, Verificada};
    let mut clients = vec![
        client("1", "Roberto Mendoza", "roberto.mendoza@email.com", "Logos bordados para uniformes", "Ana García", Enviada, date(2024, 1, 15)),
        client("2", "Sofía Herrera", "sofia.herrera@email.com", "Delantales y bolsos", "Carlos Ruiz", Leida, date(2024, 1, 18)),
        client("3", "Diego Fernández", "diego.fernandez@email.com", "Placas grabadas", "María López", Aceptada, date(2024, 1, 10)),
        client("4", "Laura Martínez", "laura.martinez@email.com", "Merchandising corporativo", "Ana García", Enviada, date(2024, 1, 20)),
        client("5", "Pedro Sánchez", "pedro.sanchez@email.com", "Regalos empresariales", "Carlos Ruiz", Enviada, date(2024, 1, 22)),
        client("6", "Carmen Jiménez", "carmen.jimenez@email.com", "Stickers UV para campaña", "Ana García", Verificada, date(2024, 1, 22)),
    ];
    clients[0].attachments.push(Attachment {
        id: "1".to_string(),
        name: "Propuesta Comercial.pdf".to_string(),
        mime_type: "application/pdf".to_string(),
        url: "#".to_string(),
        uploaded_at: at(2024, 1, 16, 9, 0),
        uploaded_by: "Ana García".to_string(),
    });
    clients[0].interactions = vec![
        Interaction {
            id: "1".to_string(),
            kind: InteractionKind::Comment,
            content: "Primera reunión programada.".to_string(),
            author: "Ana García".to_string(),
            timestamp: at(2024, 1, 15, 10, 30),
            mentions: Vec::new(),
        },
        Interaction {
            id: "2".to_string(),
            kind: InteractionKind::StatusChange,
            content: "Propuesta comercial enviada".to_string(),
            author: "Ana García".to_string(),
            timestamp: at(2024, 1, 16, 14, 20),
            mentions: Vec::new(),
        },
    ];
    clients
}
