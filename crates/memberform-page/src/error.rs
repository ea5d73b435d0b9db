use thiserror::Error;

/// Errors from page wiring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// A panel id that the switch was never configured with.
    #[error("unknown panel: {id}")]
    UnknownPanel { id: String },
}
