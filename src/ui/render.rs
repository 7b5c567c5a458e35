//! Text rendering of view models.
//!
//! Output is a `String` so the caller decides where it goes. Column widths are
//! computed from visible characters before any colour is applied, which keeps
//! alignment intact when ANSI sequences are added.
//!
//! ```text
//! Tier Management
//! ! Failed to fetch tiers
//! Tier Code  Tier Name
//! ---------  ---------
//! GOLD       Gold
//! Page 1 of 1 (1 total)
//! ```

use crate::app::shell::{NavItem, Route};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FormView, TableView};
use std::fmt::Write;

const COLUMN_GAP: &str = "  ";

/// Renders a table view.
#[must_use]
pub fn render_table(view: &TableView, theme: &Theme) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", theme.header(&view.title));

    if let Some(banner) = &view.banner {
        let _ = writeln!(out, "{}", theme.paint(&format!("! {banner}"), crate::ui::format::Tone::Error));
    }

    if view.rows.is_empty() {
        if !view.empty_message.is_empty() {
            let _ = writeln!(out, "{}", theme.dimmed(&view.empty_message));
        }
    } else {
        let widths = column_widths(view);

        let header: Vec<String> = view
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| theme.header(&pad(c, *w)))
            .collect();
        let _ = writeln!(out, "{}", header.join(COLUMN_GAP).trim_end());

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let _ = writeln!(out, "{}", theme.border(&rule.join(COLUMN_GAP)));

        for row in &view.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| theme.paint(&pad(&cell.text, *w), cell.tone))
                .collect();
            let _ = writeln!(out, "{}", cells.join(COLUMN_GAP).trim_end());
        }
    }

    if let Some(footer) = &view.footer {
        let _ = writeln!(out, "{}", theme.dimmed(footer));
    }
    out
}

/// Renders a dialog as `label: value` lines.
#[must_use]
pub fn render_form(view: &FormView, theme: &Theme) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", theme.header(&view.title));

    let label_width = view.fields.iter().map(|f| f.label.chars().count()).max().unwrap_or(0);
    for field in &view.fields {
        let lock = if field.locked { " (locked)" } else { "" };
        let _ = writeln!(
            out,
            "  {}  {}{}",
            pad(field.label, label_width),
            field.value,
            theme.dimmed(lock)
        );
    }
    out
}

/// Renders the navigation frame, marking `current`.
#[must_use]
pub fn render_nav(items: &[NavItem], current: Route, theme: &Theme) -> String {
    let mut out = String::new();
    for item in items {
        let marker = if item.route == current { ">" } else { " " };
        let line = format!("{marker} {:<20} {}", item.label, item.route.path());
        if item.route == current {
            let _ = writeln!(out, "{}", theme.header(&line));
        } else {
            let _ = writeln!(out, "{line}");
        }
    }
    out
}

fn column_widths(view: &TableView) -> Vec<usize> {
    view.columns
        .iter()
        .enumerate()
        .map(|(i, title)| {
            view.rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.text.chars().count())
                .chain(std::iter::once(title.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::Cell;

    fn tiers() -> TableView {
        TableView {
            title: "Tier Management".into(),
            columns: vec!["Tier Code".into(), "Tier Name".into()],
            rows: vec![
                vec![Cell::plain("GOLD"), Cell::plain("Gold")],
                vec![Cell::plain("PLATINUM-PLUS"), Cell::plain("Platinum")],
            ],
            banner: Some("Failed to fetch tiers".into()),
            footer: Some("Page 1 of 1 (2 total)".into()),
            empty_message: "No tiers found".into(),
        }
    }

    #[test]
    fn aligns_columns_on_widest_cell() {
        let text = render_table(&tiers(), &Theme::plain());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Tier Management");
        assert_eq!(lines[1], "! Failed to fetch tiers");
        assert_eq!(lines[2], "Tier Code      Tier Name");
        assert_eq!(lines[4], "GOLD           Gold");
        assert_eq!(lines[6], "Page 1 of 1 (2 total)");
    }

    #[test]
    fn empty_table_shows_message() {
        let mut view = tiers();
        view.rows.clear();
        view.banner = None;
        let text = render_table(&view, &Theme::plain());
        assert!(text.contains("No tiers found"));
        assert!(!text.contains("Tier Code"));
    }
}
