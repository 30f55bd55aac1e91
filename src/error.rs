//! Error types for template parsing and rendering.
//!
//! The taxonomy is deliberately small:
//! - [`TemplateError`] - malformed template text, fatal at parse time
//! - [`RenderError`] - a render pass that cannot complete
//!
//! None of these are retried. A render pass either produces a complete tree
//! or fails as a whole; the caller's error boundary decides what the user
//! sees.

use thiserror::Error;

use crate::template::Position;

/// A template source text that cannot be parsed.
///
/// Templates are static, so these errors are never recoverable by retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder that is neither `{{strings.NAME}}` nor
    /// `{{components.NAME}}`.
    #[error("unrecognized placeholder '{{{{{token}}}}}' at line {}, column {}", position.line, position.column)]
    Syntax { token: String, position: Position },

    /// A `{{` with no matching `}}` before the end of the source.
    #[error("unterminated placeholder at line {}, column {}", position.line, position.column)]
    Unterminated { position: Position },
}

/// A render pass that cannot produce a complete tree.
///
/// All variants propagate out of the pass. A configuration that names an
/// unsupported widget type fails the whole group rather than silently
/// rendering a subset of it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The group template itself failed to parse.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The template requires a placeholder name the binding context does
    /// not supply. This is a programming error, not a user-recoverable one.
    #[error("no binding supplied for placeholder '{name}'")]
    UnboundPlaceholder { name: String },

    /// The configuration names a widget type outside the known set.
    ///
    /// Distinct from the recognized-but-stubbed case, which renders a
    /// placeholder unit instead of failing.
    #[error("unknown component type '{name}'")]
    UnknownComponentType { name: String },
}
