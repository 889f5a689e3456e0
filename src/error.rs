use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElectorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Excel file not found: {0}")]
    FileNotFound(String),

    #[error("Sheet '{0}' not found in Excel file")]
    MissingSheet(String),

    #[error("Column '{column}' not found in sheet '{sheet}'")]
    MissingColumn { column: String, sheet: String },

    #[error("Failed to read workbook: {0}")]
    WorkbookRead(String),

    #[error("Excel generation error: {0}")]
    ExcelGeneration(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ElectorError>;
