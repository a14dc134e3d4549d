//! Terminal pager over a fixed block of text.
//!
//! A scrolling window into a line array with less-style key bindings.
//! Paging keeps a fixed overlap of lines between consecutive pages so the
//! reader keeps their place.

use crate::error::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, event, execute, terminal};
use std::io::Write;

/// Lines shared between consecutive pages.
pub const PAGE_OVERLAP: usize = 3;

/// Transcript of a scripted Converge run, shown by `converge pitch`.
pub const PITCH_TRANSCRIPT: &str = include_str!("../assets/pitch/transcript.txt");

pub struct Pager {
    lines: Vec<String>,
    page_size: usize,
    position: usize,
}

impl Pager {
    pub fn new(content: &str, page_size: usize) -> Self {
        Self {
            lines: content.lines().map(str::to_string).collect(),
            page_size: page_size.max(1),
            position: 0,
        }
    }

    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.page_size)
    }

    fn page_step(&self) -> usize {
        self.page_size.saturating_sub(PAGE_OVERLAP).max(1)
    }

    pub fn scroll_to(&mut self, position: usize) {
        self.position = position.min(self.max_scroll());
    }

    pub fn page_down(&mut self) {
        self.scroll_to(self.position + self.page_step());
    }

    pub fn page_up(&mut self) {
        self.position = self.position.saturating_sub(self.page_step());
    }

    pub fn scroll_down(&mut self) {
        self.scroll_to(self.position + 1);
    }

    pub fn scroll_up(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    pub fn go_to_start(&mut self) {
        self.position = 0;
    }

    pub fn go_to_end(&mut self) {
        self.position = self.max_scroll();
    }

    pub fn at_start(&self) -> bool {
        self.position == 0
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.max_scroll()
    }

    pub fn visible_lines(&self) -> &[String] {
        let end = (self.position + self.page_size).min(self.lines.len());
        &self.lines[self.position..end]
    }

    /// Percentage of the document covered by the bottom of the window.
    pub fn progress(&self) -> u8 {
        if self.lines.len() <= self.page_size {
            return 100;
        }
        let covered = (self.position + self.page_size) as f64;
        ((covered / self.lines.len() as f64) * 100.0).round() as u8
    }

    /// Header label in the form `1-20 of 100`.
    pub fn position_label(&self) -> String {
        let last = (self.position + self.page_size).min(self.lines.len());
        format!("{}-{} of {}", self.position + 1, last, self.lines.len())
    }

    /// Apply a key binding. Returns false for keys the pager does not handle.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(' ') | KeyCode::PageDown => self.page_down(),
            KeyCode::Char('b') | KeyCode::PageUp => self.page_up(),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_up(),
            KeyCode::Char('g') => self.go_to_start(),
            KeyCode::Char('G') => self.go_to_end(),
            _ => return false,
        }
        true
    }
}

/// Run the pager full screen until the user quits with `q` or Escape.
pub fn run_interactive(mut pager: Pager, title: &str) -> Result<()> {
    let mut stdout = std::io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let result = event_loop(&mut pager, title, &mut stdout);

    let _ = execute!(stdout, cursor::Show, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    result
}

fn event_loop(pager: &mut Pager, title: &str, stdout: &mut std::io::Stdout) -> Result<()> {
    loop {
        draw(pager, title, stdout)?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                code => {
                    pager.handle_key(code);
                }
            }
        }
    }
}

fn draw(pager: &Pager, title: &str, stdout: &mut std::io::Stdout) -> Result<()> {
    execute!(stdout, cursor::MoveTo(0, 0), Clear(ClearType::All))?;

    // Raw mode: explicit carriage returns.
    write!(stdout, "{}  [{}]\r\n\r\n", title, pager.position_label())?;
    for line in pager.visible_lines() {
        write!(stdout, "{}\r\n", line)?;
    }
    write!(
        stdout,
        "\r\n({}%)  space/b page  j/k scroll  g/G jump  q quit\r\n",
        pager.progress()
    )?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hundred_lines() -> String {
        (0..100).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_page_down_keeps_overlap() {
        let mut pager = Pager::new(&hundred_lines(), 20);
        pager.page_down();
        // 20-line page with a 3-line overlap advances 17 lines.
        assert_eq!(pager.position(), 17);
        pager.page_down();
        assert_eq!(pager.position(), 34);
    }

    #[test]
    fn test_go_to_end_clamps_to_last_page() {
        let mut pager = Pager::new(&hundred_lines(), 20);
        pager.go_to_end();
        assert_eq!(pager.position(), 80);
        assert!(pager.at_end());

        // Further paging cannot move past the clamp.
        pager.page_down();
        assert_eq!(pager.position(), 80);
    }

    #[test]
    fn test_page_up_at_start_stays_put() {
        let mut pager = Pager::new(&hundred_lines(), 20);
        pager.page_up();
        assert_eq!(pager.position(), 0);
        assert!(pager.at_start());
    }

    #[test]
    fn test_line_scroll_clamps_both_ends() {
        let mut pager = Pager::new(&hundred_lines(), 20);
        pager.scroll_up();
        assert_eq!(pager.position(), 0);

        pager.go_to_end();
        pager.scroll_down();
        assert_eq!(pager.position(), 80);
    }

    #[test]
    fn test_short_document_never_scrolls() {
        let mut pager = Pager::new("one\ntwo\nthree", 20);
        pager.page_down();
        assert_eq!(pager.position(), 0);
        assert_eq!(pager.progress(), 100);
        assert_eq!(pager.visible_lines().len(), 3);
    }

    #[test]
    fn test_position_label_and_progress() {
        let mut pager = Pager::new(&hundred_lines(), 20);
        assert_eq!(pager.position_label(), "1-20 of 100");
        assert_eq!(pager.progress(), 20);

        pager.go_to_end();
        assert_eq!(pager.position_label(), "81-100 of 100");
        assert_eq!(pager.progress(), 100);
    }

    #[test]
    fn test_key_bindings() {
        let mut pager = Pager::new(&hundred_lines(), 20);
        assert!(pager.handle_key(KeyCode::Char(' ')));
        assert_eq!(pager.position(), 17);
        assert!(pager.handle_key(KeyCode::Char('b')));
        assert_eq!(pager.position(), 0);
        assert!(pager.handle_key(KeyCode::Char('j')));
        assert_eq!(pager.position(), 1);
        assert!(pager.handle_key(KeyCode::Char('G')));
        assert_eq!(pager.position(), 80);
        assert!(pager.handle_key(KeyCode::Char('g')));
        assert_eq!(pager.position(), 0);
        assert!(!pager.handle_key(KeyCode::Char('x')));
    }

    #[test]
    fn test_bundled_transcript_is_pageable() {
        let pager = Pager::new(PITCH_TRANSCRIPT, 20);
        assert!(pager.total_lines() > 20);
    }
}
