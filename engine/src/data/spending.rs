use crate::data::csv_parser::{
    self, brazilian_format, normalize_header, ColumnSpec,
};
use crate::error::EngineError;
use shared::models::{MacroCategory, SpendingRecord};
use std::path::Path;

/// Column heuristics for the yearly spending export. Exact header text has
/// drifted across portal versions, hence substring patterns.
const SPENDING_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec { field: "function", patterns: &["nome funcao", "funcao"], required: true },
    ColumnSpec {
        field: "realized_value",
        patterns: &["orcamento realizado", "valor realizado", "realizado"],
        required: true,
    },
    ColumnSpec {
        field: "superior_agency",
        patterns: &["orgao superior"],
        required: false,
    },
    ColumnSpec {
        field: "subordinate_agency",
        patterns: &["orgao subordinado"],
        required: false,
    },
    ColumnSpec {
        field: "budget_unit",
        patterns: &["unidade orcamentaria"],
        required: false,
    },
    ColumnSpec {
        field: "expense_group",
        patterns: &["grupo de despesa", "grupo despesa"],
        required: false,
    },
];

pub struct SpendingCsvLoader;

impl SpendingCsvLoader {
    /// Loads and cleans the spending CSV. Rows whose function is blank or
    /// whose value fails Brazilian-decimal parsing are dropped and counted;
    /// row-level problems never abort the load.
    pub fn load_records(path: &Path) -> Result<(Vec<SpendingRecord>, usize), EngineError> {
        let table = csv_parser::read_table(path)?;
        let resolved = csv_parser::resolve_columns(&table.headers, SPENDING_COLUMNS)?;

        let mut records = Vec::with_capacity(table.rows.len());
        let mut dropped = 0usize;

        for row in &table.rows {
            let function = match csv_parser::get_field(row, &resolved, "function") {
                Some(f) => f.to_string(),
                None => {
                    dropped += 1;
                    continue;
                }
            };
            let realized_value = match csv_parser::get_field(row, &resolved, "realized_value")
                .and_then(|v| brazilian_format::parse_decimal(v).ok())
            {
                Some(v) => v,
                None => {
                    dropped += 1;
                    continue;
                }
            };

            let expense_group =
                csv_parser::get_field(row, &resolved, "expense_group").map(str::to_string);
            let macro_category = classify(&function, expense_group.as_deref());

            records.push(SpendingRecord {
                function,
                superior_agency: csv_parser::get_field(row, &resolved, "superior_agency")
                    .map(str::to_string),
                subordinate_agency: csv_parser::get_field(row, &resolved, "subordinate_agency")
                    .map(str::to_string),
                budget_unit: csv_parser::get_field(row, &resolved, "budget_unit")
                    .map(str::to_string),
                expense_group,
                realized_value,
                macro_category,
            });
        }

        if dropped > 0 {
            tracing::warn!(
                path = %path.display(),
                dropped,
                kept = records.len(),
                "Dropped spending rows with unparseable values"
            );
        }
        Ok((records, dropped))
    }
}

/// Splits debt-service lines from everything else. Within debt service the
/// expense group decides principal (amortization/refinancing) vs interest;
/// a debt-service line without a recognizable group counts as principal,
/// since refinancing dominates the "Encargos Especiais" function.
pub fn classify(function: &str, expense_group: Option<&str>) -> MacroCategory {
    let func = normalize_header(function);
    let is_debt_service =
        func.contains("encargos especiais") || func.contains("divida") || func.contains("refinanciamento");
    if !is_debt_service {
        return MacroCategory::Social;
    }
    let group = expense_group.map(normalize_header).unwrap_or_default();
    if group.contains("juros") || group.contains("encargos") {
        MacroCategory::DebtInterest
    } else {
        MacroCategory::DebtPrincipal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_records_valid_data() {
        let csv_content = "\
NOME FUNÇÃO;NOME ÓRGÃO SUPERIOR;NOME UNIDADE ORÇAMENTÁRIA;ORÇAMENTO REALIZADO (R$)
Saúde;Ministério da Saúde;Fundo Nacional de Saúde;1.234.567,89
Educação;Ministério da Educação;FNDE;987,65";
        let tmp = create_test_csv(csv_content);
        let (records, dropped) = SpendingCsvLoader::load_records(tmp.path()).unwrap();
        assert_eq!(dropped, 0);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].function, "Saúde");
        assert_eq!(records[0].realized_value, 1234567.89);
        assert_eq!(records[0].superior_agency.as_deref(), Some("Ministério da Saúde"));
        assert_eq!(records[0].budget_unit.as_deref(), Some("Fundo Nacional de Saúde"));
        assert_eq!(records[0].macro_category, MacroCategory::Social);
        assert_eq!(records[1].realized_value, 987.65);
    }

    #[test]
    fn test_load_records_drops_bad_rows_keeps_good_ones() {
        let csv_content = "\
NOME FUNÇÃO;ORÇAMENTO REALIZADO (R$)
Saúde;100,00
Educação;NOT_A_NUMBER
;50,00
Defesa;200,00";
        let tmp = create_test_csv(csv_content);
        let (records, dropped) = SpendingCsvLoader::load_records(tmp.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(dropped, 2);
        assert_eq!(records[1].function, "Defesa");
    }

    #[test]
    fn test_load_records_missing_value_column_is_schema_mismatch() {
        let csv_content = "\
NOME FUNÇÃO;CODIGO
Saúde;10";
        let tmp = create_test_csv(csv_content);
        let err = SpendingCsvLoader::load_records(tmp.path()).unwrap_err();
        assert!(matches!(err, EngineError::SchemaMismatch { field: "realized_value", .. }));
    }

    #[test]
    fn test_load_records_same_row_count_after_latin1_fallback() {
        // Same rows as the UTF-8 happy path, but written in Latin-1.
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"NOME FUN\xC7\xC3O;OR\xC7AMENTO REALIZADO (R$)\nSa\xFAde;100,00\nEduca\xE7\xE3o;50,00\n",
        )
        .unwrap();
        file.flush().unwrap();
        let (records, dropped) = SpendingCsvLoader::load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(dropped, 0);
        assert_eq!(records[1].function, "Educação");
    }

    #[test]
    fn test_classify_debt_principal_vs_interest() {
        assert_eq!(
            classify("Encargos Especiais", Some("Amortização/Refinanciamento da Dívida")),
            MacroCategory::DebtPrincipal
        );
        assert_eq!(
            classify("Encargos Especiais", Some("Juros e Encargos da Dívida")),
            MacroCategory::DebtInterest
        );
        // No group information: treated as principal rollover.
        assert_eq!(classify("Encargos Especiais", None), MacroCategory::DebtPrincipal);
        assert_eq!(classify("Saúde", Some("Pessoal e Encargos Sociais")), MacroCategory::Social);
        assert_eq!(classify("Previdência Social", None), MacroCategory::Social);
    }
}
