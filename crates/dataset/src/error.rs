use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read sales file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed sales file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Required column '{0}' is missing from the sales file")]
    MissingColumn(String),
}
