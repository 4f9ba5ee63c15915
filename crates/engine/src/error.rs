// In crates/engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] core_types::Error),

    #[error("Pipeline task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::Core(core_types::Error::Configuration(message.into()))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
