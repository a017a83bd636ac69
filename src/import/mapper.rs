use std::{collections::HashSet, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    model::{Client, ClientId, PLACEHOLDER, ProposalStatus, SaleType},
    text::{slugify, unique_id},
};

use super::{ImportError, parser::Row};

pub const CAPTURE_ORIGIN: &str = "CSV";
pub const CAPTURED_BY: &str = "Importado";
/// Id base for names with no letters or digits.
pub const FALLBACK_ID: &str = "cliente";

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Semantic columns recognised in an invoice export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Client,
    Ruc,
    Date,
    JobType,
    SaleType,
    TotalAmount,
}

impl Column {
    fn needle(self) -> &'static str {
        match self {
            Self::Client => "cliente",
            Self::Ruc => "ruc",
            Self::Date => "fecha",
            Self::JobType => "tipo de trabajo",
            Self::SaleType => "tipo de venta",
            Self::TotalAmount => "monto total",
        }
    }

    pub fn matches(self, header: &str) -> bool {
        header.to_lowercase().contains(self.needle())
    }
}

/// Header positions resolved once per import. `None` means the column is
/// absent and the field is treated as empty on every row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub client: Option<usize>,
    pub ruc: Option<usize>,
    pub date: Option<usize>,
    pub job_type: Option<usize>,
    pub sale_type: Option<usize>,
    pub total_amount: Option<usize>,
}

impl ColumnMap {
    /// First header cell containing the column's keyword wins.
    pub fn resolve(header: &[String]) -> Self {
        let find = |column: Column| header.iter().position(|cell| column.matches(cell));
        Self {
            client: find(Column::Client),
            ruc: find(Column::Ruc),
            date: find(Column::Date),
            job_type: find(Column::JobType),
            sale_type: find(Column::SaleType),
            total_amount: find(Column::TotalAmount),
        }
    }

    pub fn index(&self, column: Column) -> Option<usize> {
        match column {
            Column::Client => self.client,
            Column::Ruc => self.ruc,
            Column::Date => self.date,
            Column::JobType => self.job_type,
            Column::SaleType => self.sale_type,
            Column::TotalAmount => self.total_amount,
        }
    }

    fn cell<'r>(&self, row: &'r [String], column: Column) -> &'r str {
        self.index(column)
            .and_then(|idx| row.get(idx))
            .map_or("", String::as_str)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    /// Creation date for rows whose date cell cannot be parsed.
    pub today: NaiveDate,
}

impl ImportOptions {
    pub fn now() -> Self {
        Self {
            today: chrono::Local::now().date_naive(),
        }
    }
}

/// Builds the client list from parsed rows; the first row is the header.
///
/// Rows without a client name are skipped and only the first row of each
/// name is kept. Distinct names sharing a slug get `-2`, `-3`, ... suffixed
/// ids in row order. Unparseable cells degrade to `None` (or the import date)
/// without dropping the row.
pub fn map_to_clients(rows: &[Row], options: &ImportOptions) -> Result<Vec<Client>, ImportError> {
    let [header, data @ ..] = rows else {
        return Err(ImportError::NoDataRows { rows: 0 });
    };
    if data.is_empty() {
        return Err(ImportError::NoDataRows { rows: 1 });
    }
    let columns = ColumnMap::resolve(header);
    debug!(?columns, "resolved CSV header");

    let mut seen = HashSet::new();
    let mut ids: HashSet<String> = HashSet::new();
    let mut clients = Vec::new();
    for (offset, row) in data.iter().enumerate() {
        let line = offset + 2;
        let full_name = columns.cell(row, Column::Client).trim();
        if full_name.is_empty() {
            debug!(line, "skipping row without client name");
            continue;
        }
        if !seen.insert(full_name) {
            debug!(line, full_name, "skipping repeated client");
            continue;
        }
        let base = match slugify(full_name) {
            slug if slug.is_empty() => FALLBACK_ID.to_string(),
            slug => slug,
        };
        let id = unique_id(&base, |id| ids.contains(id));
        if id != base {
            debug!(line, full_name, %id, "client slug already taken");
        }
        ids.insert(id.clone());
        clients.push(map_row(&columns, row, id, full_name, options));
    }
    Ok(clients)
}

fn map_row(
    columns: &ColumnMap,
    row: &[String],
    id: ClientId,
    full_name: &str,
    options: &ImportOptions,
) -> Client {
    let ruc = columns.cell(row, Column::Ruc).trim();
    let job_type = columns.cell(row, Column::JobType).trim();
    let interest = if !job_type.is_empty() {
        job_type.to_string()
    } else if !ruc.is_empty() {
        format!("RUC {ruc}")
    } else {
        PLACEHOLDER.to_string()
    };

    Client {
        id,
        full_name: full_name.to_string(),
        phone: String::new(),
        email: String::new(),
        interest,
        capture_origin: CAPTURE_ORIGIN.to_string(),
        captured_by: CAPTURED_BY.to_string(),
        status: ProposalStatus::Enviada,
        created_at: parse_date(columns.cell(row, Column::Date).trim()).unwrap_or(options.today),
        invoice_total: parse_amount(columns.cell(row, Column::TotalAmount)),
        sale_type: SaleType::detect(columns.cell(row, Column::SaleType).trim()),
        profile_image: None,
        attachments: Vec::new(),
        interactions: Vec::new(),
    }
}

/// Accepts ISO-like and `MM/DD/YYYY` dates, then the `Mon-YY` shorthand
/// (day 1 of that month, year 2000 + YY).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt.date());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| parse_month_year(value))
}

fn parse_month_year(value: &str) -> Option<NaiveDate> {
    let (month, year) = value.split_once('-')?;
    if year.len() != 2 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month = MONTH_ABBREVIATIONS
        .iter()
        .position(|abbr| abbr.eq_ignore_ascii_case(month))?;
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month as u32 + 1, 1)
}

/// Reads a Guaraní-style amount: whitespace, `.` and `,` are all treated as
/// grouping and removed before parsing. Exponent forms such as `1e5` are
/// accepted.
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let cleaned: String = value
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '.' && *ch != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}
