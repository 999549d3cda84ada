use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// A store write or fetch failed. The operation was abandoned; prior
    /// in-memory state is retained and the caller decides whether to retry.
    #[error("The reminder store is unavailable. Error message: `{0}`")]
    StoreUnavailable(#[source] anyhow::Error),
    #[error("No reminder found with id: {0}")]
    NotFound(String),
}
