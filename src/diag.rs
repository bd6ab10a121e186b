//! Positioned, severity-tagged diagnostics.
//!
//! Diagnostics are the user-facing form of validation output. Each one
//! carries the full [`AttributePath`] of the value it describes so the
//! reporting layer can point at the offending configuration.

use std::fmt;

// ============================================================================
// Attribute Paths
// ============================================================================

/// One step of an [`AttributePath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// A named attribute or nested block
    Attribute(String),
    /// An element of a list, by position
    Index(u64),
    /// An element of a map, by key
    Key(String),
}

/// Location of a value inside a nested configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AttributePath {
    steps: Vec<PathStep>,
}

impl AttributePath {
    /// Creates an empty path.
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Creates a path with a single attribute step.
    pub fn root(name: impl Into<String>) -> Self {
        Self::new().attribute(name)
    }

    /// Returns this path extended with an attribute step.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.steps.push(PathStep::Attribute(name.into()));
        self
    }

    /// Returns this path extended with a list index step.
    #[must_use]
    pub fn index(mut self, index: u64) -> Self {
        self.steps.push(PathStep::Index(index));
        self
    }

    /// Returns this path extended with a map key step.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.steps.push(PathStep::Key(key.into()));
        self
    }

    /// Returns the steps in order.
    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Returns the final step, if any.
    #[must_use]
    pub fn last(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    /// Returns `true` if the path has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

impl FromIterator<PathStep> for AttributePath {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

/// Renders as `resource.tags["env"].rules[0].name`.
impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Attribute(name) if idx == 0 => f.write_str(name)?,
                PathStep::Attribute(name) => write!(f, ".{name}")?,
                PathStep::Index(i) => write!(f, "[{i}]")?,
                PathStep::Key(k) => write!(f, "[{k:?}]")?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Error - the configuration cannot be used as written
    Error,
    /// Warning - potential issue that does not block the configuration
    Warning,
}

/// A single diagnostic for one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Short human-readable description
    pub summary: String,
    /// Location of the value the diagnostic describes
    pub attribute_path: AttributePath,
}

impl Diagnostic {
    /// Creates a warning diagnostic.
    pub fn warning(summary: impl Into<String>, attribute_path: AttributePath) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            attribute_path,
        }
    }

    /// Creates an error diagnostic.
    pub fn error(summary: impl Into<String>, attribute_path: AttributePath) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            attribute_path,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.summary, self.attribute_path)
    }
}

/// Ordered diagnostics, in emission order.
pub type Diagnostics = Vec<Diagnostic>;

/// Convenience queries over a slice of diagnostics.
pub trait DiagnosticsExt {
    /// Returns `true` if any diagnostic is an error.
    fn has_errors(&self) -> bool;

    /// Iterates the warnings, in order.
    fn warnings(&self) -> impl Iterator<Item = &Diagnostic>;

    /// Iterates the errors, in order.
    fn errors(&self) -> impl Iterator<Item = &Diagnostic>;
}

impl DiagnosticsExt for [Diagnostic] {
    fn has_errors(&self) -> bool {
        self.iter().any(|d| d.severity == Severity::Error)
    }

    fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(|d| d.severity == Severity::Warning)
    }

    fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(|d| d.severity == Severity::Error)
    }
}
