#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("invalid shortcut direction tag: {0}")]
    InvalidDirectionTag(i64),

    #[error("no shortcuts found in {0}")]
    EmptyShortcutSet(String),

    #[error("no usable edge metadata in {0}")]
    EmptyEdgeMetadata(String),
}
