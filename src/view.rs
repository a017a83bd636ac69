//! Client table: search, filters, two-key sort and fixed-size pages.

use std::{cmp::Ordering, collections::HashMap, ops::Range};

use chrono::NaiveDate;

use crate::{
    analytics::classify::ClientClassification,
    model::{Client, ClientId, ProposalStatus, SaleType, SalesCategory},
    text::compare_names,
};

pub const PAGE_SIZE: usize = 25;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    Name,
    #[default]
    Amount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortState {
    /// Header click: the active key flips direction, another key starts
    /// ascending.
    pub fn click(self, key: SortKey) -> Self {
        if key == self.key {
            Self {
                key,
                order: self.order.toggled(),
            }
        } else {
            Self {
                key,
                order: SortOrder::Asc,
            }
        }
    }

    fn compare(self, a: &Client, b: &Client) -> Ordering {
        let ordering = match self.key {
            SortKey::Name => compare_names(&a.full_name, &b.full_name),
            SortKey::Amount => a
                .invoice_total
                .unwrap_or_default()
                .cmp(&b.invoice_total.unwrap_or_default()),
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Everything the table needs to produce one page. `None` filters and an
/// empty search do not constrain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientQuery {
    pub search: String,
    pub status: Option<ProposalStatus>,
    pub sale_type: Option<SaleType>,
    pub job_type: Option<SalesCategory>,
    pub sort: SortState,
    /// 1-based; clamped when the view is computed.
    pub page: usize,
    pub page_size: usize,
}

impl Default for ClientQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: None,
            sale_type: None,
            job_type: None,
            sort: SortState::default(),
            page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

impl ClientQuery {
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_status(&mut self, status: Option<ProposalStatus>) {
        self.status = status;
        self.page = 1;
    }

    pub fn set_sale_type(&mut self, sale_type: Option<SaleType>) {
        self.sale_type = sale_type;
        self.page = 1;
    }

    pub fn set_job_type(&mut self, job_type: Option<SalesCategory>) {
        self.job_type = job_type;
        self.page = 1;
    }

    pub fn click_sort(&mut self, key: SortKey) {
        self.sort = self.sort.click(key);
    }

    /// Stays on the last page; the caller passes the page count it rendered.
    pub fn next_page(&mut self, total_pages: usize) {
        self.page = (self.page + 1).min(total_pages.max(1));
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    fn matches(&self, client: &Client, labels: ClientClassification) -> bool {
        let needle = self.search.to_lowercase();
        let found = needle.is_empty()
            || [&client.full_name, &client.email, &client.interest]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
        found
            && self.status.is_none_or(|status| status == client.status)
            && self.sale_type.is_none_or(|t| labels.sale_type == Some(t))
            && self.job_type.is_none_or(|t| labels.job_type == Some(t))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub rows: Vec<&'a Client>,
    pub total_count: usize,
    pub total_pages: usize,
    /// The page actually shown after clamping.
    pub page: usize,
}

impl Page<'_> {
    /// Index range of `rows` within the filtered list.
    pub fn range(&self, page_size: usize) -> Range<usize> {
        let start = self.page.saturating_sub(1) * page_size;
        start..start + self.rows.len()
    }
}

/// Filter, sort and slice `clients`. Clients missing from `classifications`
/// have no labels and only pass unconstrained label filters.
pub fn view<'a>(
    clients: &'a [Client],
    classifications: &HashMap<ClientId, ClientClassification>,
    query: &ClientQuery,
) -> Page<'a> {
    let mut matching: Vec<&Client> = clients
        .iter()
        .filter(|client| {
            let labels = classifications.get(&client.id).copied().unwrap_or_default();
            query.matches(client, labels)
        })
        .collect();
    matching.sort_by(|a, b| query.sort.compare(a, b));

    let page_size = query.page_size.max(1);
    let total_count = matching.len();
    let total_pages = total_count.div_ceil(page_size).max(1);
    let page = query.page.clamp(1, total_pages);
    let rows = matching
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();
    Page {
        rows,
        total_count,
        total_pages,
        page,
    }
}

/// Filter for the plain client list. Dates are inclusive bounds on
/// `created_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    pub status: Option<ProposalStatus>,
    pub captured_by: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl ClientFilter {
    pub fn matches(&self, client: &Client) -> bool {
        self.status.is_none_or(|status| status == client.status)
            && self
                .captured_by
                .as_deref()
                .is_none_or(|by| by == client.captured_by)
            && self.date_from.is_none_or(|from| client.created_at >= from)
            && self.date_to.is_none_or(|to| client.created_at <= to)
    }

    pub fn apply<'a>(&self, clients: &'a [Client]) -> Vec<&'a Client> {
        clients.iter().filter(|client| self.matches(client)).collect()
    }
}
