use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("template `{0}` does not exist or is not a regular file")]
    TemplateNotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read template: {0}")]
    Reader(#[from] lopdf::Error),
}
