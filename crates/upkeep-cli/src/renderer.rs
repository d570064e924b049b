//! Terminal rendering of markdown output
//!
//! Rich mode styles the markdown with termimad and highlights overdue
//! checklists; plain mode prints the markdown as is.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Marker the display layer puts on overdue checklists.
const OVERDUE_MARKER: &str = "OVERDUE";

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
    alert_skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_fg(Color::Green);

        let mut alert_skin = skin.clone();
        alert_skin.paragraph.set_fg(Color::Red);
        alert_skin.bold.set_fg(Color::Red);

        Self {
            rich_enabled,
            skin,
            alert_skin,
        }
    }

    /// Render markdown text to the terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            if line.starts_with('#') {
                println!("\x1b[36m{line}\x1b[0m");
            } else {
                self.skin_for(line).print_inline(line);
                println!();
            }
        }
        Ok(())
    }

    fn skin_for(&self, line: &str) -> &MadSkin {
        if line.contains(OVERDUE_MARKER) {
            &self.alert_skin
        } else {
            &self.skin
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
        assert!(renderer.render("- **Daily** [2024-03-05]: OVERDUE\n").is_ok());
    }

    #[test]
    fn test_overdue_lines_use_alert_skin() {
        let renderer = TerminalRenderer::new(true);
        assert!(std::ptr::eq(
            renderer.skin_for("- **Daily** [2024-03-05]: OVERDUE"),
            &renderer.alert_skin
        ));
        assert!(std::ptr::eq(
            renderer.skin_for("- **Weekly** [2024-03-03_week]: 4d 2h remaining"),
            &renderer.skin
        ));
    }
}
