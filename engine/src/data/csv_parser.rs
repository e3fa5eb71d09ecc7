use crate::error::EngineError;
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::path::Path;

// Module for Brazilian number and month formats as used by the
// Transparency Portal and Tesouro Nacional exports.
pub mod brazilian_format {
    use anyhow::{anyhow, Result};
    use chrono::NaiveDate;
    use std::str::FromStr;

    /// Three-letter Portuguese month abbreviations, in calendar order.
    pub const MONTH_ABBREVS: [&str; 12] = [
        "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
    ];

    // Parses decimals like "1.234,56" or "123,45" into f64
    pub fn parse_decimal(s: &str) -> Result<f64> {
        let normalized = s.trim()
            .replace('.', "")  // Remove thousand separators
            .replace(',', "."); // Replace decimal separator

        f64::from_str(&normalized)
            .map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))
    }

    /// Parses a month indicator into a month-precision date (day = 1).
    ///
    /// Accepted surface forms: numeric "MM/YYYY" and Portuguese abbreviation
    /// "mon/YY" or "mon/YYYY" (e.g. "jan/23"). Two-digit years are read as
    /// 2000 + YY; years before 2000 are not representable on that path.
    pub fn parse_month(s: &str) -> Result<NaiveDate> {
        let trimmed = s.trim();
        let (month_part, year_part) = trimmed
            .split_once('/')
            .ok_or_else(|| anyhow!("Failed to parse month '{}': missing '/'", s))?;

        let month: u32 = if month_part.chars().all(|c| c.is_ascii_digit()) {
            month_part
                .parse()
                .map_err(|e| anyhow!("Failed to parse month '{}': {}", s, e))?
        } else {
            let abbrev = month_part.to_lowercase();
            MONTH_ABBREVS
                .iter()
                .position(|m| *m == abbrev)
                .map(|i| i as u32 + 1)
                .ok_or_else(|| anyhow!("Failed to parse month '{}': unknown abbreviation '{}'", s, month_part))?
        };

        let year: i32 = match year_part.len() {
            2 => {
                let yy: i32 = year_part
                    .parse()
                    .map_err(|e| anyhow!("Failed to parse year in '{}': {}", s, e))?;
                2000 + yy
            }
            4 => year_part
                .parse()
                .map_err(|e| anyhow!("Failed to parse year in '{}': {}", s, e))?,
            _ => return Err(anyhow!("Failed to parse year in '{}': expected YY or YYYY", s)),
        };

        NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| anyhow!("Failed to parse month '{}': no calendar month {}/{}", s, month, year))
    }

    /// Abbreviation for a month number (1-based), for report text.
    pub fn month_abbrev(month: u32) -> &'static str {
        MONTH_ABBREVS[(month as usize - 1) % 12]
    }

}

/// Raw `;`-delimited table: headers plus data rows, still untyped.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

/// Reads a semicolon-delimited CSV, decoding as UTF-8 first and retrying the
/// whole file as Latin-1 (the portal's legacy encoding) when that fails.
/// Exactly one retry; if both attempts fail the dataset-level
/// `EncodingOrParse` error is returned.
pub fn read_table(path: &Path) -> Result<RawTable, EngineError> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EngineError::FileNotFound { path: path.to_path_buf() }
        } else {
            EngineError::IoError { source: e }
        }
    })?;

    let utf8_err = match std::str::from_utf8(&bytes) {
        Ok(text) => match parse_table(text) {
            Ok(table) => return Ok(table),
            Err(e) => e.to_string(),
        },
        Err(e) => e.to_string(),
    };

    tracing::warn!(
        path = %path.display(),
        reason = %utf8_err,
        "UTF-8 read failed, retrying as Latin-1"
    );

    let text = encoding_rs::mem::decode_latin1(&bytes);
    parse_table(&text).map_err(|e| EngineError::EncodingOrParse {
        path: path.to_path_buf(),
        reason: format!("utf-8: {}; latin-1: {}", utf8_err, e),
    })
}

fn parse_table(text: &str) -> Result<RawTable, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true) // ragged rows become row-level drops, not load failures
        .from_reader(text.as_bytes());

    let headers = rdr.headers()?.clone();
    let rows = rdr.records().collect::<Result<Vec<_>, _>>()?;
    Ok(RawTable { headers, rows })
}

/// One canonical field of a dataset and the header substrings that identify
/// its column, in priority order.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub field: &'static str,
    pub patterns: &'static [&'static str],
    pub required: bool,
}

/// Field name -> column index, as resolved against one concrete header row.
pub type ResolvedColumns = HashMap<&'static str, usize>;

/// Heuristic column resolution: headers drift year to year ("NOME FUNÇÃO"
/// vs "Nome Função" vs "FUNCAO"), so each field is matched by case- and
/// accent-insensitive substring search instead of exact equality. A pattern
/// with spaces matches when every word occurs somewhere in the header.
/// Unresolvable optional fields are simply absent; an unresolvable required
/// field is a `SchemaMismatch` for the whole dataset.
pub fn resolve_columns(
    headers: &StringRecord,
    specs: &[ColumnSpec],
) -> Result<ResolvedColumns, EngineError> {
    let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
    let mut resolved = ResolvedColumns::new();

    for spec in specs {
        let hit = spec.patterns.iter().find_map(|pattern| {
            let words: Vec<String> = pattern.split_whitespace().map(normalize_header).collect();
            normalized
                .iter()
                .position(|h| words.iter().all(|w| h.contains(w.as_str())))
        });
        match hit {
            Some(idx) => {
                resolved.insert(spec.field, idx);
            }
            None if spec.required => {
                return Err(EngineError::SchemaMismatch {
                    field: spec.field,
                    headers: headers.iter().map(str::to_string).collect(),
                });
            }
            None => {}
        }
    }
    Ok(resolved)
}

/// Field accessor over a resolved row; empty cells read as absent.
pub fn get_field<'a>(
    record: &'a StringRecord,
    resolved: &ResolvedColumns,
    field: &'static str,
) -> Option<&'a str> {
    resolved
        .get(field)
        .and_then(|&idx| record.get(idx))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Lowercases and strips the Portuguese accents that show up in portal
/// headers, so "ÓRGÃO" matches "orgao".
pub fn normalize_header(s: impl AsRef<str>) -> String {
    s.as_ref()
        .chars()
        .map(|c| match c.to_lowercase().next().unwrap_or(c) {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' => 'e',
            'í' | 'ì' | 'î' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            lower => lower,
        })
        .collect()
}
