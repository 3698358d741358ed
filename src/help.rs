//! Help text formatting.
//!
//! Pure functions: help sections in, viewport text out. No I/O.

use crate::types::HelpSection;

/// Shown when the configuration carries no help sections at all.
const NO_HELP: &str = "No help available.\n";

/// Render help sections as `section:\n  line\n  line\n\n`, in order.
pub fn format_help(sections: &[HelpSection]) -> String {
    if sections.is_empty() {
        return NO_HELP.to_string();
    }

    let mut out = String::new();
    for section in sections {
        out.push_str(&section.section);
        out.push_str(":\n");
        for line in &section.content {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}
