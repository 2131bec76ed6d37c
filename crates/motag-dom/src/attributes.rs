//! Element attributes and the class-token view over them.
//!
//! [§ 4.9.2 Interface NamedNodeMap](https://dom.spec.whatwg.org/#interface-namednodemap)
//!
//! "An element has an associated attribute list", and that list is ordered.
//! Order matters here because documents are written back out after editing,
//! and attributes nobody touched must come out where they went in.

/// A single `name="value"` pair on an element.
///
/// Equality compares name and decoded value only; two attributes that
/// differ just in how the source spelled the value are equal.
#[derive(Debug, Clone)]
pub struct Attribute {
    /// Qualified attribute name as written (e.g. `id`, `epub:type`).
    pub name: String,
    /// Decoded attribute value.
    pub value: String,
    /// The value exactly as it appeared between the quotes, references
    /// undecoded. `None` once the value has been set by code.
    pub raw: Option<String>,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            raw: None,
        }
    }

    /// Create an attribute read from source, keeping its original spelling.
    #[must_use]
    pub fn with_raw(
        name: impl Into<String>,
        value: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            raw: Some(raw.into()),
        }
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.value == other.value
    }
}

impl Eq for Attribute {}

/// Ordered attribute list of an element.
///
/// Names are unique; setting an existing name replaces its value in place
/// and new names are appended at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    list: Vec<Attribute>,
}

impl Attributes {
    /// Create an empty attribute list.
    #[must_use]
    pub const fn new() -> Self {
        Self { list: Vec::new() }
    }

    /// Number of attributes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.list.len()
    }

    /// True if the element carries no attributes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Look up an attribute value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.list
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// True if an attribute with this name is present (even with an empty value).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.list.iter().any(|attr| attr.name == name)
    }

    /// Set `name` to `value`, replacing in place or appending. The source
    /// spelling of a replaced value is dropped.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.list.iter_mut().find(|attr| attr.name == name) {
            Some(existing) => {
                existing.value = value;
                existing.raw = None;
            }
            None => self.list.push(Attribute::new(name, value)),
        }
    }

    /// Append an attribute unless one with the same name already exists.
    ///
    /// Returns `false` for a duplicate; the first occurrence wins, as in
    /// [§ 13.2.5.33](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state).
    pub fn insert_if_absent(&mut self, attr: Attribute) -> bool {
        if self.contains(&attr.name) {
            return false;
        }
        self.list.push(attr);
        true
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.list.iter().position(|attr| attr.name == name)?;
        Some(self.list.remove(index).value)
    }

    /// Iterate attributes in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.list.iter()
    }

    /// Mutable view of the `class` attribute as a token set.
    pub const fn class_list(&mut self) -> ClassList<'_> {
        ClassList { attrs: self }
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for attr in iter {
            let _ = attrs.insert_if_absent(attr);
        }
        attrs
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

/// Split a class attribute value into its unique tokens, first occurrence first.
///
/// [§ 2.3.7 Space-separated tokens](https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#space-separated-tokens)
///
/// A value holding one bare token and a value holding several are read
/// the same way; an empty or all-whitespace value has no tokens.
#[must_use]
pub fn class_tokens(value: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = Vec::new();
    for token in value.split_ascii_whitespace() {
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

/// [§ 4.9 `classList`](https://dom.spec.whatwg.org/#dom-element-classlist)
///
/// Read/write adapter over the `class` attribute. Every write stores the
/// canonical form: unique tokens joined by a single space.
pub struct ClassList<'a> {
    attrs: &'a mut Attributes,
}

impl ClassList<'_> {
    /// Current tokens, in order.
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        self.attrs
            .get("class")
            .map(|value| class_tokens(value).into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// True if `token` is one of the classes.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.attrs
            .get("class")
            .is_some_and(|value| class_tokens(value).contains(&token))
    }

    /// "The add(tokens…) method steps are: ... append token to this's token set."
    ///
    /// Union semantics; the attribute is always rewritten and never left empty.
    pub fn add(&mut self, token: &str) {
        let mut tokens = self.tokens();
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
        self.attrs.set("class", tokens.join(" "));
    }

    /// "The remove(tokens…) method steps are: ... remove token from this's token set."
    ///
    /// When no token is left the attribute itself is dropped, so no
    /// `class=""` is ever written. Returns whether `token` was present.
    pub fn remove(&mut self, token: &str) -> bool {
        let mut tokens = self.tokens();
        let before = tokens.len();
        tokens.retain(|t| t != token);
        let removed = tokens.len() != before;
        if tokens.is_empty() {
            let _ = self.attrs.remove("class");
        } else {
            self.attrs.set("class", tokens.join(" "));
        }
        removed
    }
}
