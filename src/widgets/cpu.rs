//! CPU widget - recognized but not implemented yet.
//!
//! Renders a fixed placeholder unit so a configuration that names `cpu`
//! degrades gracefully instead of failing the whole group. This is distinct
//! from the unknown-discriminant path, which is fatal to the render pass.

use crate::config::CpuConfig;
use crate::tree::RenderedUnit;

/// Render the placeholder for one `cpu` entry.
pub fn render(id: &str, _config: &CpuConfig) -> RenderedUnit {
    RenderedUnit::new(id, r#"<p class="cpu">Not implemented.</p>"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_fixed_placeholder() {
        let unit = render("bar-1", &CpuConfig::default());
        assert_eq!(unit.markup(), r#"<p class="cpu">Not implemented.</p>"#);
    }
}
