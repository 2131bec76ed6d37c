//! Media-overlay annotation for XHTML documents.
//!
//! Reading systems that synchronize audio with text address fragments by
//! id. This crate gives every eligible element (by default paragraphs,
//! headings, list items and spans) a managed class and a generated id, and
//! takes them off again, without disturbing ids or classes the author
//! wrote.
//!
//! ```
//! use motag_core::{annotate, deannotate, Config, DeannotateOptions};
//!
//! let config = Config::default();
//! let marked = annotate(&config, "<body><p>Hi</p></body>").unwrap();
//! assert_eq!(marked.markup, r#"<body><p id="mo_id_1" class="mo">Hi</p></body>"#);
//!
//! let plain = deannotate(&config, &marked.markup, DeannotateOptions::default()).unwrap();
//! assert_eq!(plain.markup, "<body><p>Hi</p></body>");
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod id_format;
pub mod reconcile;
pub mod report;
pub mod void_tags;

pub use backend::{MarkupBackend, XhtmlBackend};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use id_format::{FormatError, IdFormat};
pub use reconcile::{Classification, DeannotateOptions, Reconciler};
pub use report::{LogEntry, Outcome, Severity};
pub use void_tags::{SELF_CLOSING_TAGS, close_void_tags};

/// Annotate `markup` with the bundled XHTML backend.
///
/// # Errors
///
/// [`Error::Config`] for an unusable configuration, otherwise as
/// [`Reconciler::annotate`].
pub fn annotate(config: &Config, markup: &str) -> Result<Outcome, Error> {
    Reconciler::new(config)?.annotate(markup)
}

/// De-annotate `markup` with the bundled XHTML backend.
///
/// # Errors
///
/// [`Error::Config`] for an unusable configuration, otherwise as
/// [`Reconciler::deannotate`].
pub fn deannotate(
    config: &Config,
    markup: &str,
    options: DeannotateOptions,
) -> Result<Outcome, Error> {
    Reconciler::new(config)?.deannotate(markup, options)
}
