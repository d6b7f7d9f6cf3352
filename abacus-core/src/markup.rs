//! # Markup Normalization
//!
//! Strips the editorial markup of the digitized sermons down to the entity
//! spans the labeling pipeline cares about. Every element that does not
//! match an allow rule is *unwrapped*: replaced by its own children, in
//! document order, with all text content preserved.
//!
//! The actual tree parsing lives outside this crate. The normalizer only
//! needs the small [`MarkupTree`] capability: enumerate elements, query
//! name/parent/attributes, unwrap in place, and flatten back to a string.
//!
//! ## Allow-list variants
//!
//! - [`AllowList::EntityNames`]: keeps `persName`/`placeName` elements,
//!   except when such an element sits directly inside another element of
//!   the same name: only the outermost name of a given kind survives.
//! - [`AllowList::RegisterLinks`]: keeps only anchors whose `href` points
//!   into the person/place registers (target starts with one of the
//!   configured prefixes, `E01`/`E03` by default). Anchors without an
//!   `href` are treated as not matching, never as an error.

/// Read/mutate capability over a parsed markup tree, supplied by an
/// external markup-parsing collaborator.
///
/// `Id`s identify elements and must stay valid across [`unwrap_element`]
/// calls for elements that have not themselves been unwrapped.
///
/// [`unwrap_element`]: MarkupTree::unwrap_element
pub trait MarkupTree {
    type Id: Copy;

    /// All elements of the tree in document order (ancestors before their
    /// descendants).
    fn elements(&self) -> Vec<Self::Id>;

    /// Tag name of an element.
    fn name(&self, id: Self::Id) -> &str;

    /// Tag name of the element's current parent, `None` at the root.
    fn parent_name(&self, id: Self::Id) -> Option<&str>;

    /// Attribute lookup; `None` when the attribute is absent.
    fn attr(&self, id: Self::Id, name: &str) -> Option<&str>;

    /// Replaces the element with its own children, preserving order and
    /// all text content.
    fn unwrap_element(&mut self, id: Self::Id);

    /// String form of the (possibly mutated) tree.
    fn flatten(&self) -> String;
}

/// Which elements survive a normalization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowList {
    /// Keep outermost `persName`/`placeName` elements.
    EntityNames,
    /// Keep anchors whose `href` starts with one of these prefixes.
    RegisterLinks(Vec<String>),
}

impl AllowList {
    /// The register-link variant with the prefixes used by the sermon
    /// editions ("E01" person register, "E03" place register).
    pub fn register_links() -> Self {
        AllowList::RegisterLinks(vec!["E01".to_string(), "E03".to_string()])
    }

    fn keeps<T: MarkupTree>(&self, tree: &T, id: T::Id) -> bool {
        match self {
            AllowList::EntityNames => {
                let name = tree.name(id);
                (name == "persName" || name == "placeName")
                    && tree.parent_name(id) != Some(name)
            }
            AllowList::RegisterLinks(prefixes) => {
                tree.name(id) == "a"
                    && tree
                        .attr(id, "href")
                        .map(|href| prefixes.iter().any(|p| href.starts_with(p)))
                        .unwrap_or(false)
            }
        }
    }
}

/// Removes every element not matching the allow-list by unwrapping it and
/// returns the flattened string form of the tree.
///
/// Elements are visited in document order, so an outer `persName` is kept
/// before a nested one is seen; unwrapping intermediate elements re-parents
/// their children, which is exactly what makes the same-name nesting check
/// work on indirect nesting too.
pub fn strip_markup<T: MarkupTree>(tree: &mut T, allow: &AllowList) -> String {
    for id in tree.elements() {
        if !allow.keeps(tree, id) {
            tree.unwrap_element(id);
        }
    }
    tree.flatten()
}

/// Renames the surviving name elements to the `<PERSON>`/`<LOCATION>`
/// pseudo-tags consumed by the cleaner, dropping any attributes.
pub fn rename_entity_tags(text: &str) -> String {
    use regex::Regex;
    use std::sync::LazyLock;

    static OPEN_PERS: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<persName[^>]*>").unwrap());
    static OPEN_PLACE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<placeName[^>]*>").unwrap());

    let text = OPEN_PERS.replace_all(text, "<PERSON>");
    let text = OPEN_PLACE.replace_all(&text, "<LOCATION>");
    text.replace("</persName>", "</PERSON>")
        .replace("</placeName>", "</LOCATION>")
}
