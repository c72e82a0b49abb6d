//! Fully qualified class names.

use std::fmt;

use serde::{Serialize, Serializer};

/// A fully qualified, possibly nested, class name.
///
/// `package` is dot separated and may be empty (default package).
/// `simple_names` lists the enclosing chain outermost first, so
/// `com.example.Outer.Inner` has simple names `["Outer", "Inner"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    package: String,
    simple_names: Vec<String>,
}

impl ClassName {
    /// Create a class name from a package and its simple-name chain.
    pub fn new(package: impl Into<String>, simple_names: Vec<String>) -> Self {
        Self {
            package: package.into(),
            simple_names,
        }
    }

    /// Create a class name from a package and a dotted simple-name chain
    /// (`"Outer.Inner"`).
    pub fn get(package: &str, dotted_simple_names: &str) -> Self {
        Self::new(
            package,
            dotted_simple_names.split('.').map(str::to_string).collect(),
        )
    }

    /// Guess the package / simple-name split of a canonical name.
    ///
    /// Leading lower-case segments form the package, the first upper-case
    /// segment starts the simple names. Returns `None` for names that do not
    /// follow that convention or contain invalid identifiers.
    pub fn best_guess(canonical: &str) -> Option<Self> {
        let segments: Vec<&str> = canonical.split('.').collect();
        if segments.iter().any(|s| !is_identifier(s)) {
            return None;
        }
        let first_class = segments
            .iter()
            .position(|s| s.starts_with(|c: char| c.is_ascii_uppercase()))?;
        let simple_names = &segments[first_class..];
        if simple_names
            .iter()
            .any(|s| !s.starts_with(|c: char| c.is_ascii_uppercase() || c == '$'))
        {
            return None;
        }
        Some(Self {
            package: segments[..first_class].join("."),
            simple_names: simple_names.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn simple_names(&self) -> &[String] {
        &self.simple_names
    }

    /// The innermost simple name.
    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map(String::as_str).unwrap_or_default()
    }

    /// The enclosing class, if this is a nested class.
    pub fn enclosing(&self) -> Option<ClassName> {
        if self.simple_names.len() < 2 {
            return None;
        }
        Some(Self {
            package: self.package.clone(),
            simple_names: self.simple_names[..self.simple_names.len() - 1].to_vec(),
        })
    }

    /// The outermost class of the nesting chain.
    pub fn top_level(&self) -> ClassName {
        Self {
            package: self.package.clone(),
            simple_names: self.simple_names.iter().take(1).cloned().collect(),
        }
    }

    /// A class nested inside this one.
    pub fn nested(&self, simple_name: impl Into<String>) -> ClassName {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(simple_name.into());
        Self {
            package: self.package.clone(),
            simple_names,
        }
    }

    /// A top-level class in the same package.
    pub fn peer(&self, simple_name: impl Into<String>) -> ClassName {
        Self {
            package: self.package.clone(),
            simple_names: vec![simple_name.into()],
        }
    }

    pub fn is_nested(&self) -> bool {
        self.simple_names.len() > 1
    }

    /// Dotted source name, e.g. `com.example.Outer.Inner`.
    pub fn canonical_name(&self) -> String {
        self.to_string()
    }

    /// Binary name as seen by reflection, e.g. `com.example.Outer$Inner`.
    pub fn reflection_name(&self) -> String {
        let nested = self.simple_names.join("$");
        if self.package.is_empty() {
            nested
        } else {
            format!("{}.{}", self.package, nested)
        }
    }

    /// Simple names joined with `.`, e.g. `Outer.Inner`.
    pub fn nested_name(&self) -> String {
        self.simple_names.join(".")
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.package.is_empty() {
            write!(f, "{}.", self.package)?;
        }
        write!(f, "{}", self.simple_names.join("."))
    }
}

impl Serialize for ClassName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
