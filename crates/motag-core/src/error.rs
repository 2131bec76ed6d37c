//! Crate-level error type.

use motag_xhtml::ParseError;

use crate::config::ConfigError;
use crate::id_format::FormatError;

/// Anything that can stop an annotate or de-annotate call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration could not be compiled.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The markup could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The id format could not render an id.
    #[error(transparent)]
    Format(#[from] FormatError),
}
