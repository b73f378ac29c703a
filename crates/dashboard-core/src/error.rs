use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Input file not found: {0}")]
    MissingInput(String),

    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Data integrity fault: {0}")]
    DataIntegrity(String),
}
