use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One budget line item for the reference year, after cleaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingRecord {
    /// Government function name, e.g. "Saúde" or "Encargos Especiais".
    pub function: String,
    pub superior_agency: Option<String>,
    pub subordinate_agency: Option<String>,
    pub budget_unit: Option<String>,
    /// Expense group, only needed to split amortization from interest
    /// inside debt-service functions.
    pub expense_group: Option<String>,
    /// Realized budget value in Reais.
    pub realized_value: f64,
    pub macro_category: MacroCategory,
}

/// Coarse classification of a spending line, derived from the function
/// and expense-group text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MacroCategory {
    /// Amortization or refinancing of public-debt principal.
    DebtPrincipal,
    /// Interest and other debt-service charges.
    DebtInterest,
    /// Everything else (health, education, pensions, ...).
    Social,
}

/// One public-debt stock observation: the outstanding balance of one debt
/// type at the end of one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtStockRecord {
    /// Month-precision date (always the first day of the month).
    pub date: NaiveDate,
    pub debt_type: Option<String>,
    pub holder: Option<String>,
    /// Outstanding stock in Reais.
    pub stock_value: f64,
    pub year: i32,
}

impl DebtStockRecord {
    pub fn new(
        date: NaiveDate,
        debt_type: Option<String>,
        holder: Option<String>,
        stock_value: f64,
    ) -> Self {
        let year = date.year();
        DebtStockRecord { date, debt_type, holder, stock_value, year }
    }
}

/// Whether a dataset snapshot holds real rows or is an empty stand-in for a
/// load that failed at file level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DatasetStatus {
    Loaded,
    /// The dataset could not be loaded; the reason is user-facing text.
    Unavailable(String),
}

/// Immutable cleaned spending snapshot. Replaced wholesale on each cache
/// refresh, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingDataset {
    pub records: Vec<SpendingRecord>,
    /// Rows dropped during cleaning because the value failed to parse.
    pub rows_dropped: usize,
    pub status: DatasetStatus,
}

impl SpendingDataset {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        SpendingDataset {
            records: Vec::new(),
            rows_dropped: 0,
            status: DatasetStatus::Unavailable(reason.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Grand total of realized spending.
    pub fn total_realized(&self) -> f64 {
        self.records.iter().map(|r| r.realized_value).sum()
    }
}

/// Immutable cleaned debt-stock snapshot. "Total" aggregate rows are already
/// excluded by the loader, so summing over `debt_type` is safe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtDataset {
    pub records: Vec<DebtStockRecord>,
    pub rows_dropped: usize,
    pub status: DatasetStatus,
}

impl DebtDataset {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        DebtDataset {
            records: Vec::new(),
            rows_dropped: 0,
            status: DatasetStatus::Unavailable(reason.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent month present in the series.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.date).max()
    }

    /// Stock total for one month, summed across debt types.
    pub fn stock_at(&self, date: NaiveDate) -> f64 {
        self.records
            .iter()
            .filter(|r| r.date == date)
            .map(|r| r.stock_value)
            .sum()
    }
}
