//! The parse/serialize capability the reconciler runs on.

use motag_dom::DomTree;
use motag_xhtml::ParseError;

/// Turns markup into a [`DomTree`] and back.
///
/// The reconciler only edits attributes on the tree; everything about how
/// text becomes a tree, and how a tree becomes text again, lives behind
/// this trait.
pub trait MarkupBackend {
    /// Parse a complete document.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for malformed input. No partial tree is
    /// returned.
    fn parse(&self, markup: &str) -> Result<DomTree, ParseError>;

    /// Serialize a document. Void elements may come out as `<img ...></img>`.
    fn serialize(&self, tree: &DomTree) -> String;
}

impl<B: MarkupBackend + ?Sized> MarkupBackend for &B {
    fn parse(&self, markup: &str) -> Result<DomTree, ParseError> {
        (**self).parse(markup)
    }

    fn serialize(&self, tree: &DomTree) -> String {
        (**self).serialize(tree)
    }
}

/// The bundled XHTML tokenizer, tree builder and serializer.
#[derive(Debug, Clone, Copy, Default)]
pub struct XhtmlBackend;

impl MarkupBackend for XhtmlBackend {
    fn parse(&self, markup: &str) -> Result<DomTree, ParseError> {
        motag_xhtml::parse(markup)
    }

    fn serialize(&self, tree: &DomTree) -> String {
        motag_xhtml::serialize(tree)
    }
}
