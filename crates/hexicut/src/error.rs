#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid shortcut direction tag: {0}")]
    InvalidDirectionTag(i8),
}
