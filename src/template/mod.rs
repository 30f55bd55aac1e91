//! Template parsing - source text to resolvable segments.
//!
//! A template is plain markup text with two placeholder forms:
//!
//! - `{{strings.NAME}}` - replaced by one literal string at render time
//!   (typically an attribute position)
//! - `{{components.NAME}}` - replaced by an ordered list of rendered
//!   sub-trees (the children slot)
//!
//! Everything outside placeholders passes through verbatim, whitespace
//! included. Parsing is pure: it never touches a binding context and has no
//! side effects, so a [`Template`] can be parsed once and resolved against a
//! fresh context on every reactive trigger.
//!
//! # Example
//!
//! ```ignore
//! use glint_bar::template::Template;
//!
//! let template = Template::parse(
//!     r#"<div {{strings.root_props}}>{{components.components}}</div>"#,
//! )?;
//! ```

mod scanner;

pub use scanner::Position;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::TemplateError;
use scanner::Scanner;

// =============================================================================
// Segments
// =============================================================================

/// One parsed piece of a template, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A run of literal markup, copied verbatim at resolution.
    Literal(String),
    /// A `{{strings.NAME}}` placeholder.
    StringSlot(String),
    /// A `{{components.NAME}}` placeholder.
    ListSlot(String),
}

// =============================================================================
// Template
// =============================================================================

/// An immutable parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template source text.
    ///
    /// Total for well-formed input. Any placeholder outside the two known
    /// forms fails with [`TemplateError::Syntax`] carrying the offending
    /// token and its position; an unclosed `{{` fails with
    /// [`TemplateError::Unterminated`].
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut scanner = Scanner::new(source);
        let mut segments = Vec::new();
        let mut literal = String::new();

        while !scanner.is_at_end() {
            if scanner.current_is('{') && scanner.peek_is('{') {
                let open = scanner.position();
                scanner.advance();
                scanner.advance();

                let token = scan_placeholder(&mut scanner, open)?;

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(classify(token.trim(), open)?);
            } else if let Some(grapheme) = scanner.advance() {
                literal.push_str(grapheme);
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Template { segments })
    }

    /// The parsed segments, in source order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of every placeholder in the template, in source order.
    pub fn placeholder_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Literal(_) => None,
            Segment::StringSlot(name) | Segment::ListSlot(name) => Some(name.as_str()),
        })
    }
}

/// Consume graphemes up to the closing `}}`, returning the inner token.
fn scan_placeholder(scanner: &mut Scanner, open: Position) -> Result<String, TemplateError> {
    let mut token = String::new();
    loop {
        if scanner.current_is('}') && scanner.peek_is('}') {
            scanner.advance();
            scanner.advance();
            return Ok(token);
        }
        match scanner.advance() {
            Some(grapheme) => token.push_str(grapheme),
            None => return Err(TemplateError::Unterminated { position: open }),
        }
    }
}

/// Map a placeholder token to its segment kind.
fn classify(token: &str, position: Position) -> Result<Segment, TemplateError> {
    if let Some((namespace, name)) = token.split_once('.') {
        if is_valid_name(name) {
            match namespace {
                "strings" => return Ok(Segment::StringSlot(name.to_string())),
                "components" => return Ok(Segment::ListSlot(name.to_string())),
                _ => {}
            }
        }
    }
    Err(TemplateError::Syntax {
        token: token.to_string(),
        position,
    })
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

// =============================================================================
// Parse Cache
// =============================================================================

thread_local! {
    /// Parsed templates keyed by source text. Templates are static, so each
    /// distinct source is parsed at most once per thread.
    static TEMPLATE_CACHE: RefCell<HashMap<String, Rc<Template>>> = RefCell::new(HashMap::new());
}

/// Parse `source`, reusing the cached result for previously seen sources.
///
/// Only successful parses are cached; a malformed source fails on every call.
pub fn parse_cached(source: &str) -> Result<Rc<Template>, TemplateError> {
    let cached = TEMPLATE_CACHE.with(|cache| cache.borrow().get(source).cloned());
    if let Some(template) = cached {
        return Ok(template);
    }

    let template = Rc::new(Template::parse(source)?);
    TEMPLATE_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .insert(source.to_string(), template.clone());
    });
    Ok(template)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_only_source() {
        let template = Template::parse("<div>status</div>").unwrap();
        assert_eq!(
            template.segments(),
            &[Segment::Literal("<div>status</div>".to_string())]
        );
    }

    #[test]
    fn test_parses_both_placeholder_kinds() {
        let template = Template::parse(
            r#"<div {{strings.root_props}}>{{components.components}}</div>"#,
        )
        .unwrap();

        assert_eq!(
            template.segments(),
            &[
                Segment::Literal("<div ".to_string()),
                Segment::StringSlot("root_props".to_string()),
                Segment::Literal(">".to_string()),
                Segment::ListSlot("components".to_string()),
                Segment::Literal("</div>".to_string()),
            ]
        );
    }

    #[test]
    fn test_whitespace_inside_braces_is_ignored() {
        let template = Template::parse("{{ strings.title }}").unwrap();
        assert_eq!(
            template.segments(),
            &[Segment::StringSlot("title".to_string())]
        );
    }

    #[test]
    fn test_unknown_namespace_is_a_syntax_error() {
        let error = Template::parse("<b>{{widgets.clock}}</b>").unwrap_err();
        assert_eq!(
            error,
            TemplateError::Syntax {
                token: "widgets.clock".to_string(),
                position: Position {
                    line: 1,
                    column: 4,
                    offset: 3,
                },
            }
        );
    }

    #[test]
    fn test_bare_name_is_a_syntax_error() {
        let error = Template::parse("{{components}}").unwrap_err();
        assert!(matches!(error, TemplateError::Syntax { token, .. } if token == "components"));
    }

    #[test]
    fn test_empty_name_is_a_syntax_error() {
        let error = Template::parse("{{strings.}}").unwrap_err();
        assert!(matches!(error, TemplateError::Syntax { token, .. } if token == "strings."));
    }

    #[test]
    fn test_unterminated_placeholder_reports_open_position() {
        let error = Template::parse("<div>\n{{strings.x").unwrap_err();
        assert_eq!(
            error,
            TemplateError::Unterminated {
                position: Position {
                    line: 2,
                    column: 1,
                    offset: 6,
                },
            }
        );
    }

    #[test]
    fn test_lone_brace_passes_through() {
        let template = Template::parse("a { b } c").unwrap();
        assert_eq!(
            template.segments(),
            &[Segment::Literal("a { b } c".to_string())]
        );
    }

    #[test]
    fn test_placeholder_names_in_source_order() {
        let template = Template::parse(
            "{{strings.a}}{{components.b}}{{strings.c}}",
        )
        .unwrap();
        let names: Vec<&str> = template.placeholder_names().collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_cache_returns_same_parse_for_same_source() {
        let first = parse_cached("<i>{{strings.x}}</i>").unwrap();
        let second = parse_cached("<i>{{strings.x}}</i>").unwrap();
        assert!(
            Rc::ptr_eq(&first, &second),
            "identical sources should share one parsed template"
        );
    }

    #[test]
    fn test_cache_does_not_mask_errors() {
        assert!(parse_cached("{{oops").is_err());
        assert!(parse_cached("{{oops").is_err(), "errors are not cached");
    }
}
