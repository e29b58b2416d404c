use crate::normalize;
use crate::types::{RawRow, Record};
use crate::util::parse_f64_safe;
use csv::ReaderBuilder;
use once_cell::sync::OnceCell;
use std::fmt;

/// Source columns the pipeline needs. Extra columns in the file are ignored;
/// any of these missing is a schema error.
const REQUIRED_COLUMNS: [&str; 13] = [
    "SKU",
    "Product type",
    "Location",
    "Transportation modes",
    "Shipping carriers",
    "Customer demographics",
    "Production volumes",
    "Number of products sold",
    "Shipping costs",
    "Manufacturing costs",
    "Costs",
    "Revenue generated",
    "Defect rates",
];

/// Loader failure taxonomy. Both variants are fatal for the current render
/// and short-circuit the pipeline; an empty *filter result* downstream is a
/// normal outcome, never a `LoadError`.
#[derive(Debug)]
pub enum LoadError {
    /// File missing, unreadable, or not parseable as a CSV table.
    Unavailable(String),
    /// The header row lacks an expected source column.
    MissingColumn(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Unavailable(msg) => write!(f, "cannot load data: {}", msg),
            LoadError::MissingColumn(col) => {
                write!(f, "cannot load data: missing column \"{}\"", col)
            }
        }
    }
}

impl std::error::Error for LoadError {}

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub kept_rows: usize,
    pub parse_errors: usize,
}

// Memoized dataset: loaded and normalized once per session, immutable after
// that. Repeated loads return the same instance without touching the file.
static DATASET: OnceCell<(Vec<Record>, LoadReport)> = OnceCell::new();

/// Load, normalize, and cache the dataset. The first successful call reads
/// the file; subsequent calls return the cached instance. A failed load is
/// not cached, so a fixed file can be retried within the same session.
pub fn dataset(path: &str) -> Result<&'static (Vec<Record>, LoadReport), LoadError> {
    DATASET.get_or_try_init(|| {
        let (data, report) = load(path)?;
        Ok((normalize::normalize(&data), report))
    })
}

/// Read and parse the source file without caching or label normalization.
pub fn load(path: &str) -> Result<(Vec<Record>, LoadReport), LoadError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| LoadError::Unavailable(e.to_string()))?;

    let headers = rdr
        .headers()
        .map_err(|e| LoadError::Unavailable(e.to_string()))?
        .clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(LoadError::MissingColumn(col.to_string()));
        }
    }

    let mut total_rows = 0usize;
    let mut parse_errors = 0usize;
    let mut records: Vec<Record> = Vec::new();

    for result in rdr.deserialize::<RawRow>() {
        total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(_) => {
                parse_errors += 1;
                continue;
            }
        };

        // A row without a SKU has no identity; skip it. Numeric fields fall
        // back to 0.0 the way the dashboard filled NaNs before aggregating.
        let sku = match row.sku.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => {
                parse_errors += 1;
                continue;
            }
        };

        let text = |v: Option<String>| v.unwrap_or_default().trim().to_string();
        let num = |v: Option<&str>| parse_f64_safe(v).unwrap_or(0.0);

        records.push(Record {
            sku,
            category: text(row.product_type),
            location: text(row.location),
            transport_mode: text(row.transportation_modes),
            carrier: text(row.shipping_carriers),
            segment: text(row.customer_demographics),
            production_volume: num(row.production_volumes.as_deref()),
            units_sold: num(row.number_of_products_sold.as_deref()),
            shipping_cost: num(row.shipping_costs.as_deref()),
            manufacturing_cost: num(row.manufacturing_costs.as_deref()),
            total_cost: num(row.costs.as_deref()),
            revenue: num(row.revenue_generated.as_deref()),
            defect_rate: num(row.defect_rates.as_deref()),
        });
    }

    let kept_rows = records.len();
    let report = LoadReport {
        total_rows,
        kept_rows,
        parse_errors,
    };
    Ok((records, report))
}
