//! Class and id reconciliation.
//!
//! [`Reconciler::annotate`] marks every eligible element with the managed
//! class and a generated id. [`Reconciler::deannotate`] takes them off
//! again. Ids the author wrote are never touched, and elements carrying the
//! opt-out class are never mutated.

use motag_dom::{DomTree, ElementData, NodeId};
use regex::Regex;

use crate::backend::{MarkupBackend, XhtmlBackend};
use crate::config::{Config, ConfigError};
use crate::error::Error;
use crate::id_format::IdFormat;
use crate::report::{LogEntry, Outcome};
use crate::void_tags::close_void_tags;

/// Where an eligible element stands before annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Carries the opt-out class.
    Excluded,
    /// Has an id the tool did not generate.
    ForeignId,
    /// Has an id matching the managed pattern.
    ManagedId,
    /// No id and no opt-out class.
    Unmanaged,
}

/// Which markers [`Reconciler::deannotate`] strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeannotateOptions {
    /// Remove the managed class token.
    pub remove_class: bool,
    /// Remove ids matching the managed pattern.
    pub remove_id: bool,
}

impl DeannotateOptions {
    const fn is_noop(self) -> bool {
        !self.remove_class && !self.remove_id
    }
}

impl Default for DeannotateOptions {
    fn default() -> Self {
        Self {
            remove_class: true,
            remove_id: true,
        }
    }
}

/// A validated configuration bound to a markup backend.
///
/// Immutable once built; one reconciler can serve any number of calls.
#[derive(Debug, Clone)]
pub struct Reconciler<B = XhtmlBackend> {
    tags: Vec<String>,
    mo_class: String,
    nomo_class: String,
    id_pattern: Regex,
    id_format: IdFormat,
    backend: B,
}

impl Reconciler {
    /// Build a reconciler on the bundled XHTML backend.
    ///
    /// # Errors
    ///
    /// See [`Reconciler::with_backend`].
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Self::with_backend(config, XhtmlBackend)
    }
}

impl<B: MarkupBackend> Reconciler<B> {
    /// Build a reconciler on `backend`.
    ///
    /// The id pattern is compiled here. The id format is not checked until
    /// the first id is generated.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidIdPattern`] if `id_pattern` does not compile,
    /// [`ConfigError::InvalidClass`] if either class is empty or holds
    /// whitespace.
    pub fn with_backend(config: &Config, backend: B) -> Result<Self, ConfigError> {
        check_class("mo_class", &config.mo_class)?;
        check_class("nomo_class", &config.nomo_class)?;
        let id_pattern =
            Regex::new(&config.id_pattern).map_err(|source| ConfigError::InvalidIdPattern {
                pattern: config.id_pattern.clone(),
                source,
            })?;

        Ok(Self {
            tags: config.tags.iter().map(|t| t.to_ascii_lowercase()).collect(),
            mo_class: config.mo_class.clone(),
            nomo_class: config.nomo_class.clone(),
            id_pattern,
            id_format: IdFormat::new(config.id_format.clone()),
            backend,
        })
    }

    /// True if the element's tag is one of the configured tags.
    #[must_use]
    pub fn is_target(&self, elem: &ElementData) -> bool {
        self.tags.iter().any(|t| elem.has_tag_name(t))
    }

    /// True if the element carries the opt-out class.
    #[must_use]
    pub fn has_excluded_class(&self, elem: &ElementData) -> bool {
        elem.has_class(&self.nomo_class)
    }

    /// True if the element carries the managed class.
    #[must_use]
    pub fn has_managed_class(&self, elem: &ElementData) -> bool {
        elem.has_class(&self.mo_class)
    }

    /// True if the element has an id the pattern does not recognize.
    #[must_use]
    pub fn has_foreign_id(&self, elem: &ElementData) -> bool {
        elem.id().is_some_and(|id| !self.is_managed_id(id))
    }

    /// True if the element has an id the pattern recognizes.
    #[must_use]
    pub fn has_managed_id(&self, elem: &ElementData) -> bool {
        elem.id().is_some_and(|id| self.is_managed_id(id))
    }

    /// True if `id` matches the managed pattern starting at its first byte.
    #[must_use]
    pub fn is_managed_id(&self, id: &str) -> bool {
        self.id_pattern.find(id).is_some_and(|m| m.start() == 0)
    }

    /// Place an element in one of the four annotation states.
    ///
    /// The opt-out class wins over any id.
    #[must_use]
    pub fn classify(&self, elem: &ElementData) -> Classification {
        if self.has_excluded_class(elem) {
            Classification::Excluded
        } else if self.has_foreign_id(elem) {
            Classification::ForeignId
        } else if self.has_managed_id(elem) {
            Classification::ManagedId
        } else {
            Classification::Unmanaged
        }
    }

    /// Mark every eligible element in `markup`.
    ///
    /// Eligible elements are numbered from 1 in document order, and every
    /// one of them consumes a number even when it ends up skipped.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] if the backend rejects the markup,
    /// [`Error::Format`] if the id format cannot render the first id.
    pub fn annotate(&self, markup: &str) -> Result<Outcome, Error> {
        let mut tree = self.backend.parse(markup)?;
        let log = self.annotate_tree(&mut tree)?;
        Ok(Outcome {
            log,
            markup: self.render(&tree),
        })
    }

    /// [`Reconciler::annotate`] on an already parsed tree.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] if the id format cannot be rendered.
    pub fn annotate_tree(&self, tree: &mut DomTree) -> Result<Vec<LogEntry>, Error> {
        let mut log = Vec::new();
        let mut counter: u64 = 1;

        for id in self.targets(tree) {
            let Some(elem) = tree.as_element_mut(id) else {
                continue;
            };
            let new_id = self.id_format.render(counter)?;
            counter += 1;

            match self.classify(elem) {
                Classification::Excluded => log.push(LogEntry::warn(
                    &elem.tag_name,
                    format!(
                        "element '{}' with class '{}' => ignoring (it would be '{new_id}')",
                        elem.tag_name, self.nomo_class
                    ),
                )),
                Classification::ForeignId => {
                    let current = elem.id().unwrap_or_default().to_string();
                    log.push(LogEntry::warn(
                        &elem.tag_name,
                        format!(
                            "element '{}' with id '{current}' => not changing (it would be '{new_id}')",
                            elem.tag_name
                        ),
                    ));
                    elem.class_list().add(&self.mo_class);
                }
                Classification::ManagedId | Classification::Unmanaged => {
                    log.push(LogEntry::info(
                        &elem.tag_name,
                        format!("element '{}' => setting id '{new_id}'", elem.tag_name),
                    ));
                    elem.attrs.set("id", new_id);
                    elem.class_list().add(&self.mo_class);
                }
            }
        }

        Ok(log)
    }

    /// Strip the markers from every eligible element that carries the
    /// managed class.
    ///
    /// With both options off the input is returned as is and the backend
    /// is not called.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] if the backend rejects the markup.
    pub fn deannotate(&self, markup: &str, options: DeannotateOptions) -> Result<Outcome, Error> {
        if options.is_noop() {
            return Ok(Outcome {
                log: Vec::new(),
                markup: markup.to_string(),
            });
        }

        let mut tree = self.backend.parse(markup)?;
        let log = self.deannotate_tree(&mut tree, options);
        Ok(Outcome {
            log,
            markup: self.render(&tree),
        })
    }

    /// [`Reconciler::deannotate`] on an already parsed tree.
    pub fn deannotate_tree(&self, tree: &mut DomTree, options: DeannotateOptions) -> Vec<LogEntry> {
        let mut log = Vec::new();

        for id in self.targets(tree) {
            let Some(elem) = tree.as_element_mut(id) else {
                continue;
            };
            if !self.has_managed_class(elem) {
                continue;
            }

            if options.remove_class {
                let _ = elem.class_list().remove(&self.mo_class);
                log.push(LogEntry::info(
                    &elem.tag_name,
                    format!(
                        "removed class '{}' from element '{}'",
                        self.mo_class, elem.tag_name
                    ),
                ));
            }

            if options.remove_id {
                let Some(current) = elem.id().map(str::to_string) else {
                    continue;
                };
                if self.is_managed_id(&current) {
                    let _ = elem.attrs.remove("id");
                    log.push(LogEntry::info(
                        &elem.tag_name,
                        format!("removed id '{current}' from element '{}'", elem.tag_name),
                    ));
                } else {
                    log.push(LogEntry::warn(
                        &elem.tag_name,
                        format!(
                            "element '{}' with id '{current}' => not removing",
                            elem.tag_name
                        ),
                    ));
                }
            }
        }

        log
    }

    fn targets(&self, tree: &DomTree) -> Vec<NodeId> {
        tree.elements()
            .into_iter()
            .filter(|&id| tree.as_element(id).is_some_and(|e| self.is_target(e)))
            .collect()
    }

    fn render(&self, tree: &DomTree) -> String {
        close_void_tags(&self.backend.serialize(tree))
    }
}

fn check_class(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() || value.chars().any(|c| c.is_ascii_whitespace()) {
        return Err(ConfigError::InvalidClass {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
