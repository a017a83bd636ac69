use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::{
    fixtures,
    import::{ImportError, mapper::FALLBACK_ID},
    model::{
        Client, ClientId, Interaction, InventoryItem, Invoice, ProductId, ProductOrService,
        ProposalStatus, SaleRecord,
    },
    text::{slugify, unique_id},
    validation::{NewClient, ValidationError},
};

/// Read-only id lookups the aggregations resolve foreign keys through.
pub trait Catalog {
    fn product(&self, id: &str) -> Option<&ProductOrService>;

    fn client(&self, id: &str) -> Option<&Client>;
}

/// In-memory record collections, built once and handed to whoever needs them.
///
/// Records are replaced whole; nothing is patched in place.
#[derive(Debug, Default)]
pub struct Store {
    products: Vec<ProductOrService>,
    inventory: Vec<InventoryItem>,
    sales: Vec<SaleRecord>,
    invoices: Vec<Invoice>,
    clients: Vec<Client>,
    product_index: HashMap<ProductId, usize>,
    client_index: HashMap<ClientId, usize>,
}

impl Store {
    pub fn new(
        products: Vec<ProductOrService>,
        inventory: Vec<InventoryItem>,
        sales: Vec<SaleRecord>,
        invoices: Vec<Invoice>,
        clients: Vec<Client>,
    ) -> Self {
        let mut store = Self {
            products,
            inventory,
            sales,
            invoices,
            clients,
            ..Default::default()
        };
        store.product_index = index_by(&store.products, |p| &p.id);
        store.reindex_clients();
        store
    }

    /// Demo data set used until a real import succeeds.
    pub fn demo() -> Self {
        Self::new(
            fixtures::products(),
            fixtures::inventory(),
            fixtures::sales(),
            fixtures::invoices(),
            fixtures::clients(),
        )
    }

    pub fn products(&self) -> &[ProductOrService] {
        &self.products
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn replace_clients(&mut self, clients: Vec<Client>) {
        self.clients = clients;
        self.reindex_clients();
    }

    /// Swaps in imported clients. A failed or empty import leaves the current
    /// collection untouched. Returns whether the clients were replaced.
    pub fn apply_import(&mut self, imported: Result<Vec<Client>, ImportError>) -> bool {
        match imported {
            Ok(clients) if !clients.is_empty() => {
                info!(count = clients.len(), "replacing clients with imported list");
                self.replace_clients(clients);
                true
            }
            Ok(_) => {
                warn!("import produced no clients, keeping existing data");
                false
            }
            Err(err) => {
                warn!(%err, "import failed, keeping existing data");
                false
            }
        }
    }

    /// Replaces the client with the same id, or appends a new one.
    pub fn upsert_client(&mut self, client: Client) {
        match self.client_index.get(&client.id).copied() {
            Some(idx) => self.clients[idx] = client,
            None => {
                self.client_index.insert(client.id.clone(), self.clients.len());
                self.clients.push(client);
            }
        }
    }

    /// Validates the form input and stores it as a new client.
    ///
    /// The id is the slug of the name, suffixed with a counter when taken.
    pub fn add_client(
        &mut self,
        new_client: NewClient,
        created_at: NaiveDate,
    ) -> Result<&Client, ValidationError> {
        new_client.validate()?;
        let base = match slugify(&new_client.full_name) {
            slug if slug.is_empty() => FALLBACK_ID.to_string(),
            slug => slug,
        };
        let id = unique_id(&base, |id| self.client_index.contains_key(id));
        let client = new_client.into_client(id, created_at);
        let idx = self.clients.len();
        self.client_index.insert(client.id.clone(), idx);
        self.clients.push(client);
        Ok(&self.clients[idx])
    }

    pub fn set_client_status(&mut self, id: &str, status: ProposalStatus) -> Option<&Client> {
        let current = self.client(id)?;
        let updated = Client {
            status,
            ..current.clone()
        };
        self.upsert_client(updated);
        self.client(id)
    }

    pub fn push_interaction(&mut self, id: &str, interaction: Interaction) -> Option<&Client> {
        let current = self.client(id)?;
        let mut interactions = current.interactions.clone();
        interactions.push(interaction);
        let updated = Client {
            interactions,
            ..current.clone()
        };
        self.upsert_client(updated);
        self.client(id)
    }

    pub fn remove_client(&mut self, id: &str) -> Option<Client> {
        let idx = self.client_index.get(id).copied()?;
        let removed = self.clients.remove(idx);
        self.reindex_clients();
        Some(removed)
    }

    /// Clients grouped by pipeline stage, in [`ProposalStatus::ALL`] order.
    pub fn clients_by_status(&self) -> Vec<(ProposalStatus, Vec<&Client>)> {
        ProposalStatus::ALL
            .into_iter()
            .map(|status| {
                let column = self.clients.iter().filter(|c| c.status == status).collect();
                (status, column)
            })
            .collect()
    }

    fn reindex_clients(&mut self) {
        self.client_index = index_by(&self.clients, |c| &c.id);
    }
}

impl Catalog for Store {
    fn product(&self, id: &str) -> Option<&ProductOrService> {
        self.product_index.get(id).map(|&idx| &self.products[idx])
    }

    fn client(&self, id: &str) -> Option<&Client> {
        self.client_index.get(id).map(|&idx| &self.clients[idx])
    }
}

/// First occurrence of an id wins, matching a linear `find`.
fn index_by<T>(records: &[T], id: impl Fn(&T) -> &String) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        index.entry(id(record).clone()).or_insert(idx);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InteractionKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
    }

    fn new_client(name: &str) -> NewClient {
        NewClient {
            full_name: name.to_string(),
            phone: "+595 981 000 000".to_string(),
            email: "contacto@example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn demo_store_resolves_references() {
        let store = Store::demo();
        assert!(!store.products().is_empty());
        for item in store.inventory() {
            assert!(store.product(&item.product_id).is_some(), "{}", item.product_id);
        }
        assert!(store.product("missing").is_none());
        assert!(store.client("1").is_some());
    }

    #[test]
    fn apply_import_keeps_fixtures_on_failure() {
        let mut store = Store::demo();
        let before = store.clients().len();

        assert!(!store.apply_import(Err(ImportError::NoDataRows { rows: 1 })));
        assert_eq!(store.clients().len(), before);

        assert!(!store.apply_import(Ok(vec![])));
        assert_eq!(store.clients().len(), before);

        let imported = store.clients()[..1].to_vec();
        assert!(store.apply_import(Ok(imported)));
        assert_eq!(store.clients().len(), 1);
        assert!(store.client("1").is_some());
        assert!(store.client("2").is_none());
    }

    #[test]
    fn add_client_generates_unique_ids() {
        let mut store = Store::default();
        let first = store.add_client(new_client("Acme SA"), today()).unwrap().id.clone();
        let second = store.add_client(new_client("ACME sa"), today()).unwrap().id.clone();
        assert_eq!(first, "acme-sa");
        assert_eq!(second, "acme-sa-2");
        let third = store.add_client(new_client("***"), today()).unwrap();
        assert_eq!(third.id, "cliente");
        assert_eq!(third.status, ProposalStatus::Enviada);
        assert_eq!(third.created_at, today());

        let err = store.add_client(new_client("  "), today()).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField { field: "full_name" }));
        assert_eq!(store.clients().len(), 3);
    }

    #[test]
    fn whole_record_updates() {
        let mut store = Store::demo();
        let before = store.client("1").unwrap().clone();

        let updated = store.set_client_status("1", ProposalStatus::Aceptada).unwrap();
        assert_eq!(updated.status, ProposalStatus::Aceptada);
        assert_eq!(updated.full_name, before.full_name);

        let interaction = Interaction {
            id: "new".to_string(),
            kind: InteractionKind::Task,
            content: "Llamar".to_string(),
            author: "Ana García".to_string(),
            timestamp: today().and_hms_opt(9, 30, 0).unwrap(),
            mentions: vec![],
        };
        let updated = store.push_interaction("1", interaction).unwrap();
        assert_eq!(updated.interactions.len(), before.interactions.len() + 1);

        assert!(store.set_client_status("missing", ProposalStatus::Leida).is_none());

        let removed = store.remove_client("1").unwrap();
        assert_eq!(removed.id, "1");
        assert!(store.client("1").is_none());
        // indexes shift after removal
        for client in store.clients() {
            assert_eq!(store.client(&client.id).unwrap().id, client.id);
        }
    }

    #[test]
    fn pipeline_columns_cover_all_statuses() {
        let store = Store::demo();
        let columns = store.clients_by_status();
        let statuses: Vec<ProposalStatus> = columns.iter().map(|(s, _)| *s).collect();
        assert_eq!(statuses, ProposalStatus::ALL);
        let total: usize = columns.iter().map(|(_, c)| c.len()).sum();
        assert_eq!(total, store.clients().len());
    }
}
