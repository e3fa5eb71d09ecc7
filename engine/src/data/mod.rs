// Data ingestion and cleaning.
pub mod csv_parser;
pub mod debt;
pub mod spending;
