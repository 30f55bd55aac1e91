//! # glint-bar
//!
//! Reactive status bar widget engine for Rust.
//!
//! Built on [spark-signals](https://crates.io/crates/spark-signals) for
//! fine-grained reactivity: a widget group is driven by a configuration
//! signal, and every change swaps a freshly resolved tree into the group's
//! host location.
//!
//! ## Architecture
//!
//! ```text
//! GroupConfig signal → Bindings (registry per entry) → Template resolve
//!     → RenderedTree → host location insert → deferred disposal
//! ```
//!
//! The engine is four small pieces:
//!
//! - [`template`] - parses template text into literal runs and named
//!   placeholders (`{{strings.NAME}}`, `{{components.NAME}}`)
//! - [`bindings`] - the per-render context mapping placeholder names to
//!   strings or lazy producers of rendered units
//! - [`registry`] - closed dispatch from a configuration variant to a
//!   renderable unit; unknown discriminants fail loudly
//! - [`mount`] - the reactive controller owning a host location, with
//!   exactly one subscription and exactly one outstanding disposal handle
//!
//! [`group`] composes them into the bar's component group; [`widgets`]
//! holds the individual renderers the registry dispatches to.

pub mod bindings;
pub mod config;
pub mod error;
pub mod group;
pub mod mount;
pub mod registry;
pub mod target;
pub mod template;
pub mod tree;
pub mod types;
pub mod widgets;

// Re-export commonly used items
pub use types::{Cleanup, HostId};

pub use error::{RenderError, TemplateError};

pub use template::{parse_cached, Position, Segment, Template};

pub use bindings::{resolve, Bindings, ListProducer};

pub use tree::{Fragment, RenderedTree, RenderedUnit};

pub use config::{ClockConfig, ComponentConfig, CpuConfig, GroupConfig, UnknownConfig};

pub use registry::{next_host_id, render_component, reset_host_ids};

pub use target::{MemoryTarget, RenderTarget, SharedTarget};

pub use mount::{mount_dynamic, MountController, MountHooks, MountState};

pub use group::{mount_group, GroupProps, GROUP_TEMPLATE};
