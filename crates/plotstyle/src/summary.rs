//! Human-readable summary of an applied style.
//!
//! Printed after application unless the caller asks for silence. The text is
//! rendered with MiniJinja; the heading is bold when the terminal supports it.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::apply::AppliedStyle;
use crate::error::StyleError;
use crate::record::format_decimal;

const SUMMARY_TEMPLATE: &str = r#"{{ heading }}
   Font: {{ font }}
   Size: {{ fontsize }} pt
   Line width: {{ linewidth }}
   Figure widths: {% for w in widths %}"{{ w.label }}" ({{ w.width }} in){% if not loop.last %}, {% endif %}{% endfor %}
   Default figure size: {{ figsize }}
   Standard colors: {% for c in standard %}"{{ c }}"{% if not loop.last %}, {% endif %}{% endfor %}
{%- if accents %}
   Style-specific colors: {% for c in accents %}"{{ c }}"{% if not loop.last %}, {% endif %}{% endfor %}
{%- endif %}"#;

#[derive(Serialize)]
struct Width<'a> {
    label: &'a str,
    width: String,
}

/// Renders the summary for `applied`.
pub fn render(applied: &AppliedStyle) -> Result<String, StyleError> {
    let record = applied.record();
    let mode = if applied.presentation() {
        "(presentation) "
    } else {
        ""
    };
    let heading = console::style(format!("Setting {} {}style...", record.name(), mode))
        .bold()
        .to_string();

    let widths: Vec<Width> = record
        .figure_widths()
        .iter()
        .map(|(label, width)| Width {
            label,
            width: format_decimal(width),
        })
        .collect();
    let palette = applied.colors();
    let accents: Vec<&str> = palette.accent_names().collect();
    let standard: Vec<&str> = palette
        .iter()
        .map(|(name, _)| name)
        .filter(|name| !accents.contains(name))
        .collect();

    let mut env = Environment::new();
    env.add_template("summary", SUMMARY_TEMPLATE)?;
    let output = env.get_template("summary")?.render(context! {
        heading,
        font => applied.font(),
        fontsize => applied.fontsize().to_string(),
        linewidth => record.linewidth().to_string(),
        widths,
        figsize => record.default_figure_size().to_string(),
        standard,
        accents,
    })?;
    Ok(output)
}
