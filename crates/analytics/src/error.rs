use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("No rows to analyze: the active filters matched no sales")]
    EmptyTable,
}
