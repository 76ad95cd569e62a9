use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Arithmetic overflow while computing {0}")]
    ArithmeticOverflow(&'static str),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LoanError>;
