//! Reactive mount controller - swap trees into a host location.
//!
//! A controller owns one stable host location for its whole lifetime and
//! subscribes exactly once to whatever signals its render pass reads. On
//! every trigger it runs the pass, and on success replaces the previously
//! mounted tree; the old tree's disposal always runs to completion before
//! the replacement is inserted.
//!
//! # Pattern: EffectScope-based Cleanup
//!
//! The controller runs its render effect inside a spark-signals EffectScope:
//! 1. Create the scope to manage the render effect's lifetime
//! 2. Register the effect inside `scope.run()`
//! 3. Register final teardown with `on_scope_dispose()`
//! 4. Keep `scope.stop()` as the controller's single teardown trigger
//!
//! # State machine
//!
//! ```text
//! Idle --first successful render--> Mounted --trigger--> Mounted (replace)
//!   \                                  |
//!    `---------- dispose() -----------'--> Disposed (terminal)
//! ```
//!
//! At most one tree occupies the host location at any instant, and at most
//! one disposal handle is outstanding. A handle is invoked exactly once:
//! either when a replacement lands or at teardown, never both.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{effect, effect_scope, on_scope_dispose};

use crate::error::RenderError;
use crate::target::SharedTarget;
use crate::tree::RenderedTree;
use crate::types::{Cleanup, HostId};

// =============================================================================
// Mount State
// =============================================================================

/// Lifecycle state of a [`MountController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountState {
    /// Constructed; nothing successfully rendered yet.
    Idle,
    /// A tree currently occupies the host location.
    Mounted,
    /// Terminal: the host location is released and no further reactions run.
    Disposed,
}

// =============================================================================
// Hooks
// =============================================================================

/// Optional lifecycle observers.
///
/// `on_mount` fires once, after the first successful render. `on_cleanup`
/// fires once, at teardown. `on_render_error` is the caller's error
/// boundary: it receives every failed render pass instead of the failure
/// being swallowed.
#[derive(Default)]
pub struct MountHooks {
    pub on_mount: Option<Rc<dyn Fn()>>,
    pub on_cleanup: Option<Rc<dyn Fn()>>,
    pub on_render_error: Option<Rc<dyn Fn(&RenderError)>>,
}

// =============================================================================
// Controller
// =============================================================================

/// Handle to a mounted reactive tree. Dropping it tears the tree down.
pub struct MountController {
    host: HostId,
    state: Rc<Cell<MountState>>,
    stop: Option<Cleanup>,
}

impl MountController {
    /// The host location this controller owns.
    pub fn host(&self) -> &HostId {
        &self.host
    }

    pub fn state(&self) -> MountState {
        self.state.get()
    }

    pub fn is_mounted(&self) -> bool {
        self.state.get() == MountState::Mounted
    }

    /// Tear down: dispose the current tree, release the host location, and
    /// stop reacting. Happens exactly once; dropping the controller after
    /// an explicit dispose is a no-op.
    pub fn dispose(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

impl Drop for MountController {
    fn drop(&mut self) {
        self.teardown();
    }
}

// =============================================================================
// Mounting
// =============================================================================

/// Mount a reactive render pass at `host`.
///
/// `render` runs once immediately and again whenever any signal it reads
/// changes; the subscription is established exactly once, here. Each run
/// builds a complete tree in memory first. On success the previous tree is
/// disposed and the new one inserted in a single replacement; on failure
/// the previous tree stays mounted untouched and the error goes to the
/// hooks' error boundary.
///
/// # Example
///
/// ```ignore
/// use glint_bar::mount::{mount_dynamic, MountHooks};
/// use spark_signals::signal;
///
/// let label = signal("ready".to_string());
/// let controller = mount_dynamic(
///     next_host_id("badge"),
///     target,
///     move || {
///         let text = label.get(); // reactive dependency
///         Ok(RenderedTree::new(vec![Fragment::Markup(text)]))
///     },
///     MountHooks::default(),
/// );
///
/// label.set("busy".to_string()); // replaces the mounted tree
/// controller.dispose();
/// ```
pub fn mount_dynamic(
    host: HostId,
    target: SharedTarget,
    mut render: impl FnMut() -> Result<RenderedTree, RenderError> + 'static,
    hooks: MountHooks,
) -> MountController {
    let state = Rc::new(Cell::new(MountState::Idle));

    // The one outstanding disposal handle: the currently mounted tree.
    let current: Rc<RefCell<Option<RenderedTree>>> = Rc::new(RefCell::new(None));

    let scope = effect_scope(false);

    // Clones for move into the effect closure
    let state_effect = state.clone();
    let current_effect = current.clone();
    let target_effect = target.clone();
    let host_effect = host.clone();

    // Clones for move into the dispose callback
    let state_dispose = state.clone();
    let current_dispose = current.clone();
    let target_dispose = target;
    let host_dispose = host.clone();
    let on_cleanup = hooks.on_cleanup.clone();

    scope.run(move || {
        // The effect is registered with the scope and stops when the scope
        // stops; signals read inside `render` become its dependencies.
        let _effect_cleanup = effect(move || {
            if state_effect.get() == MountState::Disposed {
                return;
            }

            match render() {
                Ok(tree) => {
                    // Old tree's disposal runs to completion before the
                    // replacement becomes visible.
                    if let Some(previous) = current_effect.borrow_mut().take() {
                        previous.dispose();
                        tracing::debug!(host = %host_effect, "previous tree disposed");
                    }

                    target_effect.borrow_mut().insert(&host_effect, &tree.to_markup());
                    *current_effect.borrow_mut() = Some(tree);

                    if state_effect.get() == MountState::Idle {
                        state_effect.set(MountState::Mounted);
                        if let Some(on_mount) = &hooks.on_mount {
                            on_mount();
                        }
                    }
                    tracing::debug!(host = %host_effect, "tree mounted");
                }
                Err(error) => {
                    // The previously mounted tree stays in place; the
                    // failure is surfaced, never swallowed.
                    tracing::error!(host = %host_effect, %error, "render pass failed");
                    if let Some(on_render_error) = &hooks.on_render_error {
                        on_render_error(&error);
                    }
                }
            }
        });

        on_scope_dispose(move || {
            if let Some(previous) = current_dispose.borrow_mut().take() {
                previous.dispose();
            }
            target_dispose.borrow_mut().remove(&host_dispose);
            state_dispose.set(MountState::Disposed);
            if let Some(on_cleanup) = &on_cleanup {
                on_cleanup();
            }
            tracing::debug!(host = %host_dispose, "controller disposed");
        });
    });

    MountController {
        host,
        state,
        stop: Some(Box::new(move || scope.stop())),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Fragment, RenderedUnit};
    use spark_signals::signal;
    use std::cell::Cell;

    /// Render pass producing one markup fragment and one unit whose
    /// disposal bumps `disposals`.
    fn counting_render(
        version: spark_signals::Signal<u32>,
        disposals: Rc<Cell<u32>>,
    ) -> impl FnMut() -> Result<RenderedTree, RenderError> + 'static {
        move || {
            let value = version.get();
            let disposals = disposals.clone();
            Ok(RenderedTree::new(vec![
                Fragment::Markup(format!("<span>v{value}</span>")),
                Fragment::Unit(RenderedUnit::new("u", "U").on_dispose(move || {
                    disposals.set(disposals.get() + 1);
                })),
            ]))
        }
    }

    #[test]
    fn test_mounts_immediately_on_construction() {
        let version = signal(0u32);
        let target = MemoryTargetHandle::new();

        let controller = mount_dynamic(
            HostId::new("host-a"),
            target.shared(),
            counting_render(version, Rc::new(Cell::new(0))),
            MountHooks::default(),
        );

        assert_eq!(controller.state(), MountState::Mounted);
        assert_eq!(
            target.contents(&HostId::new("host-a")).as_deref(),
            Some("<span>v0</span>U")
        );
    }

    #[test]
    fn test_n_renders_mean_n_minus_one_intermediate_disposals() {
        let version = signal(0u32);
        let disposals = Rc::new(Cell::new(0u32));
        let target = MemoryTargetHandle::new();

        let controller = mount_dynamic(
            HostId::new("host-b"),
            target.shared(),
            counting_render(version.clone(), disposals.clone()),
            MountHooks::default(),
        );

        version.set(1);
        version.set(2);

        assert_eq!(target.insert_count(), 3, "three renders, three mounts");
        assert_eq!(
            disposals.get(),
            2,
            "the first mount has no prior tree to dispose"
        );

        controller.dispose();
        assert_eq!(disposals.get(), 3, "teardown runs exactly one final disposal");
        assert!(
            !target.contains(&HostId::new("host-b")),
            "teardown releases the host location"
        );
    }

    #[test]
    fn test_replacement_is_visible_in_the_target() {
        let version = signal(7u32);
        let target = MemoryTargetHandle::new();

        let _controller = mount_dynamic(
            HostId::new("host-c"),
            target.shared(),
            counting_render(version.clone(), Rc::new(Cell::new(0))),
            MountHooks::default(),
        );

        version.set(8);

        assert_eq!(
            target.contents(&HostId::new("host-c")).as_deref(),
            Some("<span>v8</span>U")
        );
    }

    #[test]
    fn test_failed_render_keeps_previous_tree() {
        let version = signal(0u32);
        let errors: Rc<RefCell<Vec<RenderError>>> = Rc::new(RefCell::new(Vec::new()));
        let errors_hook = errors.clone();
        let disposals = Rc::new(Cell::new(0u32));
        let target = MemoryTargetHandle::new();

        let disposals_render = disposals.clone();
        let render = {
            let version = version.clone();
            move || {
                let value = version.get();
                if value % 2 == 1 {
                    return Err(RenderError::UnknownComponentType {
                        name: "gpu".to_string(),
                    });
                }
                let disposals = disposals_render.clone();
                Ok(RenderedTree::new(vec![Fragment::Unit(
                    RenderedUnit::new("u", format!("v{value}"))
                        .on_dispose(move || disposals.set(disposals.get() + 1)),
                )]))
            }
        };

        let controller = mount_dynamic(
            HostId::new("host-d"),
            target.shared(),
            render,
            MountHooks {
                on_render_error: Some(Rc::new(move |error: &RenderError| {
                    errors_hook.borrow_mut().push(error.clone());
                })),
                ..Default::default()
            },
        );

        version.set(1); // fails

        assert_eq!(errors.borrow().len(), 1, "the failure reaches the boundary");
        assert_eq!(
            target.contents(&HostId::new("host-d")).as_deref(),
            Some("v0"),
            "a failed pass leaves the previous tree mounted"
        );
        assert_eq!(disposals.get(), 0, "the live tree was not disposed");

        version.set(2); // recovers
        assert_eq!(target.contents(&HostId::new("host-d")).as_deref(), Some("v2"));
        assert_eq!(disposals.get(), 1);

        controller.dispose();
        assert_eq!(disposals.get(), 2);
    }

    #[test]
    fn test_mount_and_cleanup_hooks_fire_once_each() {
        let version = signal(0u32);
        let mounts = Rc::new(Cell::new(0u32));
        let cleanups = Rc::new(Cell::new(0u32));
        let mounts_hook = mounts.clone();
        let cleanups_hook = cleanups.clone();
        let target = MemoryTargetHandle::new();

        let controller = mount_dynamic(
            HostId::new("host-e"),
            target.shared(),
            counting_render(version.clone(), Rc::new(Cell::new(0))),
            MountHooks {
                on_mount: Some(Rc::new(move || mounts_hook.set(mounts_hook.get() + 1))),
                on_cleanup: Some(Rc::new(move || cleanups_hook.set(cleanups_hook.get() + 1))),
                on_render_error: None,
            },
        );

        version.set(1);
        version.set(2);

        assert_eq!(mounts.get(), 1, "on_mount fires only for the first render");
        assert_eq!(cleanups.get(), 0);

        controller.dispose();
        assert_eq!(cleanups.get(), 1);
    }

    #[test]
    fn test_disposed_controller_stops_reacting() {
        let version = signal(0u32);
        let target = MemoryTargetHandle::new();

        let controller = mount_dynamic(
            HostId::new("host-f"),
            target.shared(),
            counting_render(version.clone(), Rc::new(Cell::new(0))),
            MountHooks::default(),
        );

        assert_eq!(controller.state(), MountState::Mounted);
        controller.dispose();

        let inserts_after_dispose = target.insert_count();
        version.set(9);
        assert_eq!(
            target.insert_count(),
            inserts_after_dispose,
            "a disposed controller must not react to further changes"
        );
    }

    #[test]
    fn test_drop_tears_down_like_dispose() {
        let version = signal(0u32);
        let disposals = Rc::new(Cell::new(0u32));
        let target = MemoryTargetHandle::new();

        {
            let _controller = mount_dynamic(
                HostId::new("host-g"),
                target.shared(),
                counting_render(version, disposals.clone()),
                MountHooks::default(),
            );
        }

        assert_eq!(disposals.get(), 1);
        assert!(!target.contains(&HostId::new("host-g")));
    }

    // =========================================================================
    // Test target plumbing
    // =========================================================================

    use crate::target::{MemoryTarget, SharedTarget as SharedDynTarget};

    /// Keeps a concrete handle on a [`MemoryTarget`] while handing the
    /// controller the `dyn` form.
    struct MemoryTargetHandle {
        inner: Rc<RefCell<MemoryTarget>>,
    }

    impl MemoryTargetHandle {
        fn new() -> Self {
            MemoryTargetHandle {
                inner: MemoryTarget::shared(),
            }
        }

        fn shared(&self) -> SharedDynTarget {
            self.inner.clone()
        }

        fn contents(&self, host: &HostId) -> Option<String> {
            self.inner.borrow().contents(host).map(str::to_string)
        }

        fn contains(&self, host: &HostId) -> bool {
            self.inner.borrow().contains(host)
        }

        fn insert_count(&self) -> usize {
            self.inner.borrow().insert_count()
        }
    }
}
