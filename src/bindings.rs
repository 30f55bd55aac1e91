//! Binding contexts and template resolution.
//!
//! A [`Bindings`] value is built fresh for every render pass and maps
//! placeholder names to either a literal string or a producer of rendered
//! units. Producers are invoked lazily, exactly once, at resolution time -
//! constructing a context without resolving it has no rendering side
//! effects.
//!
//! # Example
//!
//! ```ignore
//! use glint_bar::bindings::{resolve, Bindings};
//! use glint_bar::template::Template;
//! use glint_bar::tree::RenderedUnit;
//!
//! let template = Template::parse(
//!     r#"<div {{strings.root_props}}>{{components.components}}</div>"#,
//! )?;
//!
//! let bindings = Bindings::new()
//!     .string("root_props", r#"id="bar""#)
//!     .list("components", || Ok(vec![RenderedUnit::new("c0", "<p>hi</p>")]));
//!
//! let tree = resolve(&template, bindings)?;
//! ```

use std::collections::HashMap;

use crate::error::RenderError;
use crate::template::{Segment, Template};
use crate::tree::{Fragment, RenderedTree, RenderedUnit};

/// Producer for a list placeholder: runs once, at resolution time, and
/// yields the ordered units to splice in. A failing producer fails the
/// whole pass.
pub type ListProducer = Box<dyn FnOnce() -> Result<Vec<RenderedUnit>, RenderError>>;

// =============================================================================
// Bindings
// =============================================================================

/// The per-render mapping from placeholder names to values.
///
/// Owned by the render pass that built it and consumed by [`resolve`];
/// contexts are never reused across reactive triggers.
#[derive(Default)]
pub struct Bindings {
    strings: HashMap<String, String>,
    lists: HashMap<String, ListProducer>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a string placeholder to a literal value.
    pub fn string(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.strings.insert(name.into(), value.into());
        self
    }

    /// Bind a list placeholder to a producer of rendered units.
    pub fn list(
        mut self,
        name: impl Into<String>,
        producer: impl FnOnce() -> Result<Vec<RenderedUnit>, RenderError> + 'static,
    ) -> Self {
        self.lists.insert(name.into(), Box::new(producer));
        self
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolve a template against a binding context, producing a concrete tree.
///
/// Literal runs are copied verbatim; string placeholders are substituted
/// from the context; list placeholders invoke their producer exactly once
/// and splice the units in sequence order. Any name the context does not
/// supply fails with [`RenderError::UnboundPlaceholder`].
///
/// Resolution is idempotent for structurally equal inputs, but each
/// reactive trigger is expected to build a fresh context and resolve once.
pub fn resolve(template: &Template, mut bindings: Bindings) -> Result<RenderedTree, RenderError> {
    let mut fragments = Vec::with_capacity(template.segments().len());

    for segment in template.segments() {
        match segment {
            Segment::Literal(text) => fragments.push(Fragment::Markup(text.clone())),
            Segment::StringSlot(name) => {
                let value = bindings.strings.get(name.as_str()).ok_or_else(|| {
                    RenderError::UnboundPlaceholder { name: name.clone() }
                })?;
                fragments.push(Fragment::Markup(value.clone()));
            }
            Segment::ListSlot(name) => {
                let producer = bindings.lists.remove(name.as_str()).ok_or_else(|| {
                    RenderError::UnboundPlaceholder { name: name.clone() }
                })?;
                for unit in producer()? {
                    fragments.push(Fragment::Unit(unit));
                }
            }
        }
    }

    Ok(RenderedTree::new(fragments))
}

// =============================================================================
// Tests
// =============================================================================
