//! Resolved trees and rendered units.
//!
//! Resolution turns a template plus bindings into a [`RenderedTree`]: an
//! ordered list of fragments where literal runs stay as markup text and list
//! placeholders are spliced with [`RenderedUnit`]s. The tree is what a
//! [`RenderTarget`](crate::target::RenderTarget) receives, and it owns the
//! disposal side of every unit mounted into it.
//!
//! # Disposal
//!
//! Every unit's cleanup runs exactly once. `dispose()` takes the cleanup out
//! of the unit; a unit dropped without an explicit `dispose()` still runs it.
//! Replacement and final teardown can therefore never double-invoke, and a
//! render pass that fails halfway drops its partial fragments and unwinds
//! their side effects automatically.

use crate::types::Cleanup;
use std::fmt;

// =============================================================================
// Rendered Unit
// =============================================================================

/// Opaque handle to one mounted sub-tree, produced by the component type
/// registry for a single configuration entry.
///
/// Identity is per-entry and per-render: a full rebuild produces entirely
/// new units.
pub struct RenderedUnit {
    id: String,
    markup: String,
    cleanup: Option<Cleanup>,
}

impl RenderedUnit {
    /// Create a unit with no cleanup action.
    pub fn new(id: impl Into<String>, markup: impl Into<String>) -> Self {
        RenderedUnit {
            id: id.into(),
            markup: markup.into(),
            cleanup: None,
        }
    }

    /// Attach the cleanup that reverses this unit's mount side effects.
    pub fn on_dispose(mut self, cleanup: impl FnOnce() + 'static) -> Self {
        self.cleanup = Some(Box::new(cleanup));
        self
    }

    /// The entry identifier this unit was rendered for.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The unit's rendered markup.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Run the cleanup now.
    pub fn dispose(mut self) {
        self.run_cleanup();
    }

    fn run_cleanup(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl Drop for RenderedUnit {
    fn drop(&mut self) {
        self.run_cleanup();
    }
}

impl fmt::Debug for RenderedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedUnit")
            .field("id", &self.id)
            .field("markup", &self.markup)
            .field("cleanup", &self.cleanup.is_some())
            .finish()
    }
}

// =============================================================================
// Fragments
// =============================================================================

/// One ordered piece of a resolved tree.
pub enum Fragment {
    /// Literal or string-substituted markup text.
    Markup(String),
    /// A mounted sub-tree spliced in at a list placeholder.
    Unit(RenderedUnit),
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Markup(text) => f.debug_tuple("Markup").field(text).finish(),
            Fragment::Unit(unit) => f.debug_tuple("Unit").field(unit).finish(),
        }
    }
}

// =============================================================================
// Rendered Tree
// =============================================================================

/// The concrete tree a render pass produces, ready for insertion at a host
/// location.
pub struct RenderedTree {
    fragments: Vec<Fragment>,
}

impl fmt::Debug for RenderedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedTree")
            .field("fragments", &self.fragments)
            .finish()
    }
}

impl RenderedTree {
    pub fn new(fragments: Vec<Fragment>) -> Self {
        RenderedTree { fragments }
    }

    /// Flatten the tree to markup for handoff to a render target.
    pub fn to_markup(&self) -> String {
        let mut markup = String::new();
        for fragment in &self.fragments {
            match fragment {
                Fragment::Markup(text) => markup.push_str(text),
                Fragment::Unit(unit) => markup.push_str(unit.markup()),
            }
        }
        markup
    }

    /// Number of fragments, units and markup runs combined.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Number of mounted units in the tree.
    pub fn unit_count(&self) -> usize {
        self.fragments
            .iter()
            .filter(|fragment| matches!(fragment, Fragment::Unit(_)))
            .count()
    }

    /// Run every unit's cleanup, in reverse mount order.
    pub fn dispose(mut self) {
        while let Some(fragment) = self.fragments.pop() {
            if let Fragment::Unit(unit) = fragment {
                unit.dispose();
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
