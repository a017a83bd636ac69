//! Bootstraps [`dynamo_dashboard`](crate) for the binary: loads the client
//! export over the demo data set and prints one report as CSV.

use std::{
    io::{Read, Write},
    str::FromStr,
};

use anyhow::{Result, bail};
use chrono::NaiveDate;

use crate::{
    analytics::{
        categories::{CategoryPolicy, category_breakdown, category_order_counts, category_totals},
        classify::classify_clients,
        inventory::stock_rows,
        invoices::ar_by_status,
        payments::sales_by_payment,
        products::product_sales,
        ranking::{TOP_CLIENTS, top_clients},
        timeline::{annual_sales, monthly_sales},
    },
    import::{ImportOptions, load_clients},
    store::Store,
    view::{ClientQuery, view},
};
use csv_printer::{
    BucketRow, CategoryRow, ClientRow, InventoryRow, PaymentRow, ProductRow, RankedRow, StatusRow,
    print_rows,
};

pub mod csv_printer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Report {
    #[default]
    Clients,
    Categories,
    Monthly,
    Annual,
    TopClients,
    Inventory,
    Ar,
    Products,
    Payments,
}

impl FromStr for Report {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "clients" => Self::Clients,
            "categories" => Self::Categories,
            "monthly" => Self::Monthly,
            "annual" => Self::Annual,
            "top-clients" => Self::TopClients,
            "inventory" => Self::Inventory,
            "ar" => Self::Ar,
            "products" => Self::Products,
            "payments" => Self::Payments,
            other => bail!("Unknown report `{other}`"),
        })
    }
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub report: Report,
    /// Creation date for imported rows without a usable date.
    pub today: NaiveDate,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(self) -> Result<()> {
        let mut store = Store::demo();
        let options = ImportOptions { today: self.today };
        // a failed import keeps the demo clients
        store.apply_import(load_clients(self.input, &options));

        print_report(&store, self.report, self.output)
    }
}

pub fn print_report<W: Write>(store: &Store, report: Report, output: &mut W) -> Result<()> {
    let policy = CategoryPolicy::default();
    match report {
        Report::Clients => {
            let labels = classify_clients(store.clients(), store.sales(), store);
            let query = ClientQuery {
                page_size: store.clients().len().max(1),
                ..Default::default()
            };
            let page = view(store.clients(), &labels, &query);
            print_rows(
                output,
                page.rows
                    .into_iter()
                    .map(|client| ClientRow::new(client, labels.get(&client.id).copied())),
            )
        }
        Report::Categories => {
            let totals = category_totals(store.sales(), store, policy);
            let orders = category_order_counts(store.sales(), store, policy);
            print_rows(
                output,
                category_breakdown(&totals).into_iter().map(|share| CategoryRow {
                    category: share.category,
                    amount: share.amount,
                    percent: share.percent,
                    orders: orders.get(&share.category).copied().unwrap_or_default(),
                }),
            )
        }
        Report::Monthly => print_rows(output, monthly_sales(store.sales()).into_iter().map(BucketRow::from)),
        Report::Annual => print_rows(output, annual_sales(store.sales()).into_iter().map(BucketRow::from)),
        Report::TopClients => print_rows(
            output,
            top_clients(store.sales(), store, TOP_CLIENTS)
                .into_iter()
                .map(RankedRow::from),
        ),
        Report::Inventory => print_rows(
            output,
            stock_rows(store.inventory(), store).iter().map(InventoryRow::from),
        ),
        Report::Ar => print_rows(
            output,
            ar_by_status(store.invoices())
                .iter()
                .map(|(status, amount)| StatusRow { status, amount }),
        ),
        Report::Products => {
            let (rows, _) = product_sales(store.products(), store.sales());
            print_rows(output, rows.iter().map(ProductRow::from))
        }
        Report::Payments => print_rows(
            output,
            sales_by_payment(store.sales()).into_iter().map(|total| PaymentRow {
                condition: total.condition,
                amount: total.amount,
            }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_names() {
        assert_eq!("top-clients".parse::<Report>().unwrap(), Report::TopClients);
        assert_eq!("ar".parse::<Report>().unwrap(), Report::Ar);
        assert!("nope".parse::<Report>().is_err());
    }

    #[test]
    fn payments_report_over_demo_data() {
        let mut output = Vec::new();
        print_report(&Store::demo(), Report::Payments, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "condition,amount");
        assert!(lines[1].starts_with("Contado,"));
        assert!(lines[2].starts_with("Credito,"));
        assert_eq!(lines.len(), 3);
    }
}
