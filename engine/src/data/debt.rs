use crate::data::csv_parser::{self, brazilian_format, normalize_header, ColumnSpec};
use crate::error::EngineError;
use shared::models::DebtStockRecord;
use std::path::Path;

/// Column heuristics for the monthly debt-stock export.
const DEBT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        field: "date",
        patterns: &["mes do estoque", "mes", "data"],
        required: true,
    },
    ColumnSpec {
        field: "stock_value",
        patterns: &["valor do estoque", "valor estoque", "valor"],
        required: true,
    },
    ColumnSpec {
        field: "debt_type",
        patterns: &["tipo de divida", "tipo divida", "tipo"],
        required: false,
    },
    ColumnSpec { field: "holder", patterns: &["detentor"], required: false },
];

pub struct DebtCsvLoader;

impl DebtCsvLoader {
    /// Loads and cleans the debt-stock CSV. Rows with unparseable dates or
    /// values are dropped and counted. Aggregate "Total" rows are excluded
    /// up front so later sums over `debt_type` never double-count.
    pub fn load_records(path: &Path) -> Result<(Vec<DebtStockRecord>, usize), EngineError> {
        let table = csv_parser::read_table(path)?;
        let resolved = csv_parser::resolve_columns(&table.headers, DEBT_COLUMNS)?;

        let mut records = Vec::with_capacity(table.rows.len());
        let mut dropped = 0usize;
        let mut aggregates = 0usize;

        for row in &table.rows {
            let debt_type = csv_parser::get_field(row, &resolved, "debt_type").map(str::to_string);

            // Substring heuristic: the source offers no leaf/aggregate flag,
            // so a renamed subtotal row would silently reintroduce
            // double-counting.
            if let Some(t) = &debt_type {
                if normalize_header(t).contains("total") {
                    aggregates += 1;
                    continue;
                }
            }

            let date = match csv_parser::get_field(row, &resolved, "date")
                .and_then(|d| brazilian_format::parse_month(d).ok())
            {
                Some(d) => d,
                None => {
                    dropped += 1;
                    continue;
                }
            };
            let stock_value = match csv_parser::get_field(row, &resolved, "stock_value")
                .and_then(|v| brazilian_format::parse_decimal(v).ok())
            {
                Some(v) => v,
                None => {
                    dropped += 1;
                    continue;
                }
            };

            let holder = csv_parser::get_field(row, &resolved, "holder").map(str::to_string);
            records.push(DebtStockRecord::new(date, debt_type, holder, stock_value));
        }

        if dropped > 0 || aggregates > 0 {
            tracing::warn!(
                path = %path.display(),
                dropped,
                aggregates_excluded = aggregates,
                kept = records.len(),
                "Cleaned debt-stock rows"
            );
        }
        Ok((records, dropped))
    }
}
