use crossterm::{
    cursor::MoveToPreviousLine,
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io;

/// Single-line progress display for the page loop. The line is rewritten
/// in place as pages complete; diagnostic only, never part of the data
/// contract.
pub struct PageProgress {
    line_printed: bool,
}

impl PageProgress {
    pub fn new() -> Self {
        Self {
            line_printed: false,
        }
    }

    pub fn start(&mut self, total_pages: usize) -> io::Result<()> {
        execute!(
            io::stdout(),
            SetForegroundColor(Color::White),
            Print(format!("⏳ Fetching listing pages (0/{})...\n", total_pages)),
            ResetColor
        )?;
        self.line_printed = true;
        Ok(())
    }

    /// Rewrite the progress line after one page was filtered.
    pub fn page_done(
        &mut self,
        page: usize,
        total_pages: usize,
        page_kept: usize,
        kept_total: usize,
    ) -> io::Result<()> {
        if !self.line_printed {
            return Ok(());
        }

        let spinner = match page % 4 {
            0 => "⠋",
            1 => "⠙",
            2 => "⠹",
            _ => "⠸",
        };

        execute!(
            io::stdout(),
            MoveToPreviousLine(1),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::White),
            Print(format!(
                "{} Fetching listing pages ({}/{}) - {} kept on page, {} total\n",
                spinner, page, total_pages, page_kept, kept_total
            )),
            ResetColor
        )
    }

    pub fn finish(&mut self, unique_listings: usize) -> io::Result<()> {
        if !self.line_printed {
            return Ok(());
        }

        execute!(
            io::stdout(),
            MoveToPreviousLine(1),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::DarkGrey),
            Print(format!("✓ Collected {} unique listings\n", unique_listings)),
            ResetColor
        )?;
        self.line_printed = false;
        Ok(())
    }
}

impl Default for PageProgress {
    fn default() -> Self {
        Self::new()
    }
}
