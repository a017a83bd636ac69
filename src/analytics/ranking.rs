use rust_decimal::Decimal;

use crate::{
    model::{ClientId, SaleRecord},
    store::Catalog,
};

use super::OrderedSums;

pub const TOP_CLIENTS: usize = 10;
pub const NO_CLIENT_LABEL: &str = "Sin cliente";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedClient {
    /// `None` for the bucket of sales without a client.
    pub client_id: Option<ClientId>,
    pub name: String,
    pub amount: Decimal,
}

/// Clients by revenue, highest first, at most `limit` entries.
///
/// Equal amounts keep the order in which the client first appears in
/// `sales`. Unknown client ids keep their own bucket but are labelled like
/// unattributed sales.
pub fn top_clients<C: Catalog>(sales: &[SaleRecord], catalog: &C, limit: usize) -> Vec<RankedClient> {
    let mut sums = OrderedSums::default();
    for sale in sales {
        sums.add(sale.client_id.as_deref(), sale.amount());
    }

    let mut ranked: Vec<RankedClient> = sums
        .into_entries()
        .into_iter()
        .map(|(client_id, amount)| RankedClient {
            name: client_id
                .and_then(|id| catalog.client(id))
                .map_or_else(|| NO_CLIENT_LABEL.to_string(), |c| c.full_name.clone()),
            client_id: client_id.map(str::to_string),
            amount,
        })
        .collect();
    // stable: ties stay in first-seen order
    ranked.sort_by(|a, b| b.amount.cmp(&a.amount));
    ranked.truncate(limit);
    ranked
}
