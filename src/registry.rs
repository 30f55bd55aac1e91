//! Component type registry - configuration variants to renderable units.
//!
//! Dispatch is a closed match over the known discriminants. Two failure
//! tiers are deliberately distinct:
//!
//! - recognized but unimplemented (`cpu`): renders a fixed placeholder unit
//! - unknown discriminant: fails the render pass with
//!   [`RenderError::UnknownComponentType`], never silently skipped
//!
//! Adding a widget kind means adding an enum variant and a match arm here,
//! not reopening a string-keyed dictionary.
//!
//! This module also allocates host location identifiers. Uniqueness per
//! controller instance is the requirement - unpredictability is not - so a
//! per-thread counter is enough.

use std::cell::RefCell;

use crate::config::ComponentConfig;
use crate::error::RenderError;
use crate::tree::RenderedUnit;
use crate::types::HostId;
use crate::widgets;

// =============================================================================
// Dispatch
// =============================================================================

/// Render one configuration entry into a unit.
///
/// `entry_id` identifies the entry within its group for this render pass;
/// identity does not persist across rebuilds.
pub fn render_component(
    entry_id: &str,
    config: &ComponentConfig,
) -> Result<RenderedUnit, RenderError> {
    match config {
        ComponentConfig::Clock(clock) => Ok(widgets::clock::render(entry_id, clock)),
        ComponentConfig::Cpu(cpu) => Ok(widgets::cpu::render(entry_id, cpu)),
        ComponentConfig::Unknown(unknown) => Err(RenderError::UnknownComponentType {
            name: unknown.kind.clone(),
        }),
    }
}

// =============================================================================
// Host Id Allocation
// =============================================================================

thread_local! {
    /// Counter for generating unique host location identifiers.
    static HOST_COUNTER: RefCell<usize> = const { RefCell::new(0) };
}

/// Allocate a fresh host identifier with the given prefix, e.g. `group-0`.
pub fn next_host_id(prefix: &str) -> HostId {
    HOST_COUNTER.with(|counter| {
        let mut counter = counter.borrow_mut();
        let host = HostId::new(format!("{prefix}-{}", *counter));
        *counter += 1;
        host
    })
}

/// Reset the host id counter (for testing).
pub fn reset_host_ids() {
    HOST_COUNTER.with(|counter| *counter.borrow_mut() = 0);
}

// =============================================================================
// Tests
// =============================================================================
