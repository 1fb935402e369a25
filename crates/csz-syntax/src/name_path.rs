//! Dotted name paths with optional alias qualifiers and type arguments.

use std::fmt;

use smallvec::SmallVec;

/// One segment of a dotted name, optionally carrying type arguments
/// (`List<System.Int32>` is a single segment named `List` with one argument).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NameSegment {
    pub name: String,
    pub type_args: Vec<NamePath>,
}

impl NameSegment {
    #[must_use]
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    #[must_use]
    pub fn generic(name: impl Into<String>, type_args: Vec<NamePath>) -> Self {
        Self {
            name: name.into(),
            type_args,
        }
    }
}

/// A possibly alias-qualified dotted name: `alias::Seg1.Seg2<...>.Seg3`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamePath {
    /// The `alias` in `alias::Name`. Resolved only against alias tables.
    pub alias_qualifier: Option<String>,
    pub segments: SmallVec<[NameSegment; 4]>,
}

impl NamePath {
    /// Build a path from a dotted string with no alias qualifier and no
    /// type arguments: `"System.Collections.Generic"`.
    #[must_use]
    pub fn dotted(text: &str) -> Self {
        Self {
            alias_qualifier: None,
            segments: text.split('.').map(NameSegment::simple).collect(),
        }
    }

    /// Build an alias-qualified path: `qualified("Lib", "Widgets.Widget")`
    /// models `Lib::Widgets.Widget`.
    #[must_use]
    pub fn qualified(alias: impl Into<String>, text: &str) -> Self {
        Self {
            alias_qualifier: Some(alias.into()),
            ..Self::dotted(text)
        }
    }

    /// Append type arguments to the final segment.
    #[must_use]
    pub fn with_type_args(mut self, args: Vec<NamePath>) -> Self {
        if let Some(last) = self.segments.last_mut() {
            last.type_args = args;
        }
        self
    }

    /// The rightmost segment's simple name, or empty for a degenerate path.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.segments.last().map_or("", |s| s.name.as_str())
    }

    /// Approximate textual length, used by the builder when laying out spans.
    #[must_use]
    pub fn text_len(&self) -> u32 {
        self.to_string().len() as u32
    }
}

impl fmt::Display for NamePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(alias) = &self.alias_qualifier {
            write!(f, "{alias}::")?;
        }
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", seg.name)?;
            if !seg.type_args.is_empty() {
                write!(f, "<")?;
                for (j, arg) in seg.type_args.iter().enumerate() {
                    if j > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ">")?;
            }
        }
        Ok(())
    }
}
