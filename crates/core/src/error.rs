use thiserror::Error;

use crate::model::{CatalogError, SectionError, SessionError};

/// Crate-level error aggregating the model error types.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Section(#[from] SectionError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
