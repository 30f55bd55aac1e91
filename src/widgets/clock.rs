//! Clock widget - displays the local time.

use chrono::Local;

use crate::config::ClockConfig;
use crate::tree::RenderedUnit;

/// Render the clock for one configuration entry.
///
/// The displayed time is formatted with the entry's strftime-style format
/// at render time; each reactive trigger re-renders the unit from scratch.
pub fn render(id: &str, config: &ClockConfig) -> RenderedUnit {
    let time = Local::now().format(&config.format);
    let markup = format!(r#"<p id="{id}" class="clock">{time}</p>"#);

    tracing::debug!(id, "clock widget mounted");

    let unit_id = id.to_string();
    RenderedUnit::new(id, markup).on_dispose(move || {
        tracing::debug!(id = %unit_id, "clock widget cleanup");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_carries_entry_id_and_class() {
        let unit = render("bar-0", &ClockConfig::default());

        assert!(unit.markup().starts_with(r#"<p id="bar-0" class="clock">"#));
        assert!(unit.markup().ends_with("</p>"));
    }

    #[test]
    fn test_custom_format_is_honored() {
        let config = ClockConfig {
            format: "always".to_string(),
        };
        let unit = render("bar-0", &config);

        // a format with no specifiers passes through chrono verbatim
        assert!(unit.markup().contains(">always<"));
    }
}
