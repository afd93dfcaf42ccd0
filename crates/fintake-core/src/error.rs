//! Error types for the fintake-core library.

use thiserror::Error;

/// Main error type for the fintake library.
#[derive(Error, Debug)]
pub enum FintakeError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Receipt extraction error.
    #[error("receipt error: {0}")]
    Receipt(#[from] ReceiptError),

    /// Inference error from the inference layer.
    #[error("inference error: {0}")]
    Inference(#[from] fintake_inference::InferenceError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to receipt extraction.
#[derive(Error, Debug)]
pub enum ReceiptError {
    /// No line carried a usable total. The full OCR text rides along so the
    /// caller can surface it for manual correction.
    #[error("unable to extract a total amount from receipt text")]
    AmountNotFound { text: String },
}

/// An amount string with no parsable numeric content, or one that rounds to
/// zero minor units.
#[derive(Error, Debug)]
#[error("no parsable amount in {raw:?}")]
pub struct InvalidAmount {
    pub raw: String,
}

/// Opaque failure raised by a storage collaborator for a single record.
#[derive(Error, Debug)]
#[error("storage error: {0}")]
pub struct StoreError(pub String);

/// Result type for the fintake library.
pub type Result<T> = std::result::Result<T, FintakeError>;
