use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("PDF name `{0}` must not contain whitespace")]
    NameWithWhitespace(String),
    #[error("number `{0}` cannot be written in PDF syntax")]
    UnsupportedReal(f64),
}
