//! Tag query descriptors and the matching predicate.

use std::fmt;

use regex::Regex;
use scraper::ElementRef;

/// Expected value of an attribute.
#[derive(Debug, Clone)]
pub enum AttrValue {
    /// Value must equal this string.
    Exact(String),
    /// Value must contain a match of this pattern.
    Pattern(Regex),
}

impl AttrValue {
    fn accepts(&self, candidate: &str) -> bool {
        match self {
            Self::Exact(want) => candidate == want,
            Self::Pattern(re) => re.is_match(candidate),
        }
    }
}

/// One attribute constraint of a [`TagQuery`].
#[derive(Debug, Clone)]
pub struct AttrFilter {
    pub name: String,
    pub value: AttrValue,
}

impl AttrFilter {
    /// Whether the attribute value satisfies this filter.
    ///
    /// `class` is multi-valued: the filter matches the whole attribute or
    /// any single class name.
    fn matches(&self, element: &ElementRef<'_>) -> bool {
        let Some(raw) = element.value().attr(&self.name) else {
            return false;
        };

        if self.value.accepts(raw) {
            return true;
        }

        self.name == "class" && raw.split_whitespace().any(|token| self.value.accepts(token))
    }
}

/// Description of the element(s) to look up.
///
/// # Examples
/// ```
/// use pydocs_parser::html::TagQuery;
///
/// let query = TagQuery::tag("li").attr("class", "toctree-l1").many();
/// assert_eq!(query.to_string(), r#"<li class="toctree-l1"> (all)"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TagQuery {
    pub name: Option<String>,
    pub attrs: Vec<AttrFilter>,
    pub text: Option<String>,
    pub multiple: bool,
}

impl TagQuery {
    /// Query for elements with the given tag name.
    pub fn tag(name: &str) -> Self {
        Self {
            name: Some(name.to_ascii_lowercase()),
            ..Self::default()
        }
    }

    /// Query for elements of any tag name.
    pub fn any() -> Self {
        Self::default()
    }

    /// Require an attribute with exactly this value.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push(AttrFilter {
            name: name.to_string(),
            value: AttrValue::Exact(value.to_string()),
        });
        self
    }

    /// Require an attribute whose value matches `pattern`.
    pub fn attr_matching(mut self, name: &str, pattern: Regex) -> Self {
        self.attrs.push(AttrFilter {
            name: name.to_string(),
            value: AttrValue::Pattern(pattern),
        });
        self
    }

    /// Require a direct text child equal to `text` (surrounding whitespace
    /// ignored).
    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Ask for every match instead of the first.
    pub fn many(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Pure matching predicate over a single element.
    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        if let Some(name) = &self.name {
            if element.value().name() != name {
                return false;
            }
        }

        if !self.attrs.iter().all(|filter| filter.matches(element)) {
            return false;
        }

        match &self.text {
            Some(want) => element
                .children()
                .filter_map(|child| child.value().as_text())
                .any(|text| text.trim() == want),
            None => true,
        }
    }
}

impl fmt::Display for TagQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name.as_deref().unwrap_or("*"))?;
        for filter in &self.attrs {
            match &filter.value {
                AttrValue::Exact(value) => write!(f, " {}=\"{value}\"", filter.name)?,
                AttrValue::Pattern(re) => write!(f, " {}~=/{}/", filter.name, re.as_str())?,
            }
        }
        if let Some(text) = &self.text {
            write!(f, " text=\"{text}\"")?;
        }
        write!(f, ">")?;
        if self.multiple {
            write!(f, " (all)")?;
        }
        Ok(())
    }
}
