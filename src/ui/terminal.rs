//! Plain-text proficiency window for the command-line harness

use ahash::AHashMap;

use crate::core::types::TextRef;
use crate::profs::{ProfsWindow, RowView};
use crate::tables::ProficiencyTable;

/// Stars drawn per row
const INDICATOR_WIDTH: u8 = 5;

/// Collects draw calls and prints them as a text block
#[derive(Debug, Default)]
pub struct TerminalWindow {
    strings: AHashMap<TextRef, String>,
    rows: Vec<RowView>,
    points_left: u32,
    description: Option<TextRef>,
    scroll: Option<(usize, usize)>,
}

impl TerminalWindow {
    pub fn new(strings: AHashMap<TextRef, String>) -> Self {
        Self {
            strings,
            ..Self::default()
        }
    }

    /// Label every name and description ref with its table row name
    pub fn from_table(table: &ProficiencyTable) -> Self {
        let mut strings = AHashMap::new();
        for row in table.rows() {
            if row.name_ref >= 0 && row.name_ref <= u32::MAX as i64 {
                strings.insert(TextRef(row.name_ref as u32), row.name.clone());
            }
            strings
                .entry(row.desc_ref)
                .or_insert_with(|| format!("{}: no description text loaded", row.name));
        }
        Self::new(strings)
    }

    fn text(&self, text: TextRef) -> String {
        self.strings
            .get(&text)
            .cloned()
            .unwrap_or_else(|| format!("<string {}>", text.0))
    }

    /// Render the window's current contents
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Points left: {}\n", self.points_left));
        for row in &self.rows {
            let label = row
                .name
                .map(|name| self.text(name))
                .unwrap_or_else(|| "-".into());
            let stars: String = (0..INDICATOR_WIDTH)
                .map(|i| if row.stars > i { '*' } else { '.' })
                .collect();
            let buttons = if row.enabled {
                format!(
                    "{}{}",
                    if row.can_decrement { '-' } else { ' ' },
                    if row.can_increment { '+' } else { ' ' }
                )
            } else {
                "  ".into()
            };
            out.push_str(&format!("  [{}] {:<16} {} {}\n", row.slot, label, stars, buttons));
        }
        if let Some((max_top, top)) = self.scroll {
            out.push_str(&format!("Scroll: {}/{}\n", top, max_top));
        }
        if let Some(description) = self.description {
            out.push_str(&self.text(description));
            out.push('\n');
        }
        out
    }
}

impl ProfsWindow for TerminalWindow {
    fn draw_rows(&mut self, rows: &[RowView]) {
        self.rows = rows.to_vec();
    }

    fn set_points_left(&mut self, points: u32) {
        self.points_left = points;
    }

    fn set_description(&mut self, text: TextRef) {
        self.description = Some(text);
    }

    fn set_scroll_range(&mut self, max_top: usize, top: usize) {
        self.scroll = Some((max_top, top));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(slot: usize, name: Option<TextRef>, enabled: bool, stars: u8) -> RowView {
        RowView {
            slot,
            index: slot,
            name,
            enabled,
            stars,
            can_increment: enabled,
            can_decrement: enabled && stars > 0,
        }
    }

    #[test]
    fn test_render_rows() {
        let mut strings = AHashMap::new();
        strings.insert(TextRef(1), "LONGSWORD".to_string());
        strings.insert(TextRef(2), "Long swords are long.".to_string());
        let mut window = TerminalWindow::new(strings);

        window.set_points_left(3);
        window.draw_rows(&[row(0, Some(TextRef(1)), true, 2), row(1, None, false, 0)]);
        window.set_description(TextRef(2));
        window.set_scroll_range(4, 1);

        let text = window.render();
        assert!(text.contains("Points left: 3"));
        assert!(text.contains("LONGSWORD"));
        assert!(text.contains("**..."));
        assert!(text.contains("-+"));
        assert!(text.contains("Scroll: 1/4"));
        assert!(text.contains("Long swords are long."));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Points left: 3");
        assert!(lines[1].starts_with("  [0] LONGSWORD"));
        assert!(lines[2].starts_with("  [1] -"));
        assert_eq!(lines[4], "Long swords are long.");
    }

    #[test]
    fn test_unknown_string_ref() {
        let mut window = TerminalWindow::default();
        window.draw_rows(&[row(0, Some(TextRef(77)), true, 0)]);
        assert!(window.render().contains("<string 77>"));
    }
}
