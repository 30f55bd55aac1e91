//! Component group - a reactive bar section driven by configuration.
//!
//! This is the composition of the whole engine: a group owns one host
//! location, watches a [`GroupConfig`] signal, and on every change rebuilds
//! its bindings (running each entry through the component type registry),
//! resolves the group template, and swaps the result in.
//!
//! ```text
//! config signal -> bindings (registry per entry) -> template resolve
//!   -> host location insert -> disposal deferred to the next trigger
//! ```

use std::rc::Rc;

use spark_signals::Signal;

use crate::bindings::{resolve, Bindings};
use crate::config::GroupConfig;
use crate::error::RenderError;
use crate::mount::{mount_dynamic, MountController, MountHooks};
use crate::registry::{next_host_id, render_component};
use crate::target::SharedTarget;
use crate::template::parse_cached;
use crate::types::HostId;

/// The group's template: a root element carrying the generated host
/// attributes, with one slot for the rendered components.
pub const GROUP_TEMPLATE: &str =
    r#"<div {{strings.root_props}}>{{components.components}}</div>"#;

// =============================================================================
// Props
// =============================================================================

/// Properties for mounting a component group.
pub struct GroupProps {
    /// Optional host id prefix; defaults to `group`. The generated host id
    /// is unique per controller either way.
    pub id: Option<String>,

    /// The driving configuration. The group subscribes exactly once.
    pub config: Signal<GroupConfig>,

    /// Fires once, after the first successful render.
    pub on_mount: Option<Rc<dyn Fn()>>,

    /// Fires once, at teardown.
    pub on_cleanup: Option<Rc<dyn Fn()>>,

    /// Error boundary for failed render passes.
    pub on_render_error: Option<Rc<dyn Fn(&RenderError)>>,
}

impl GroupProps {
    /// Create props with the given config signal and no observers.
    pub fn new(config: Signal<GroupConfig>) -> Self {
        GroupProps {
            id: None,
            config,
            on_mount: None,
            on_cleanup: None,
            on_render_error: None,
        }
    }
}

// =============================================================================
// Mounting
// =============================================================================

/// Mount a component group into `target`.
///
/// Every configuration change replaces the whole group: entries are
/// rendered fresh through the registry, so unit identity does not persist
/// across rebuilds. An entry with an unknown `type` fails the entire pass -
/// the group never silently renders a subset of its components.
pub fn mount_group(props: GroupProps, target: SharedTarget) -> MountController {
    let GroupProps {
        id,
        config,
        on_mount,
        on_cleanup,
        on_render_error,
    } = props;

    let host = next_host_id(id.as_deref().unwrap_or("group"));

    let render = {
        let host = host.clone();
        move || {
            let group = config.get(); // reactive dependency
            let template = parse_cached(GROUP_TEMPLATE)?;
            resolve(&template, group_bindings(&host, &group))
        }
    };

    mount_dynamic(
        host,
        target,
        render,
        MountHooks {
            on_mount,
            on_cleanup,
            on_render_error,
        },
    )
}

/// Build the per-render binding context for a group.
///
/// The components producer is lazy: the registry only runs when the
/// template's list slot is resolved, after the enclosing structure exists.
fn group_bindings(host: &HostId, group: &GroupConfig) -> Bindings {
    let entries = group.components.clone();
    let prefix = host.to_string();

    Bindings::new()
        .string("root_props", format!(r#"id="{host}" data-root="true""#))
        .list("components", move || {
            entries
                .iter()
                .enumerate()
                .map(|(index, entry)| render_component(&format!("{prefix}-{index}"), entry))
                .collect()
        })
}

// =============================================================================
// Tests
// =============================================================================
