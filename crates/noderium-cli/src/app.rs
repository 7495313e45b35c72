use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use noderium_config::EditorSettings;
use noderium_editor::{
    Change, ClickOutcome, Decoration, EditorOptions, MarkdownEditor, Selection, Transaction,
    Viewport,
};

use crate::render::{RenderedLine, render_line};

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    editor: MarkdownEditor,
    path: PathBuf,
    dirty: Rc<Cell<bool>>,
    /// First visible line, 1-based
    top_line: usize,
    height: usize,
    /// Rows drawn by the last frame, for mapping clicks
    rows: Vec<RenderedLine>,
    pub status: String,
}

impl App {
    pub fn new(path: PathBuf, content: String, settings: &EditorSettings) -> Self {
        let dirty = Rc::new(Cell::new(false));
        let on_change = {
            let dirty = dirty.clone();
            Box::new(move |_: &str| dirty.set(true))
        };
        let editor = MarkdownEditor::mount(EditorOptions {
            value: Some(content),
            config: settings.editor_config(),
            on_change: Some(on_change),
            ..Default::default()
        });

        Self {
            editor,
            path,
            dirty,
            top_line: 1,
            height: 1,
            rows: Vec::new(),
            status: String::from("Ctrl-S save | Ctrl-Q quit | Ctrl-B/I/E format"),
        }
    }

    pub fn editor(&self) -> &MarkdownEditor {
        &self.editor
    }

    pub fn title(&self) -> String {
        let marker = if self.dirty.get() { " [+]" } else { "" };
        format!("{}{marker}", self.path.display())
    }

    fn cursor(&self) -> usize {
        self.editor.view().state().selection().head
    }

    fn select(&mut self, pos: usize) {
        self.editor
            .dispatch(Transaction::select(Selection::cursor(pos)));
    }

    /// Replace the selection with `text`, leaving the cursor after it.
    pub fn insert(&mut self, text: &str) {
        let state = self.editor.view().state();
        if state.is_read_only() {
            return;
        }
        let selection = state.selection();
        let from = selection.from();
        self.editor.dispatch(
            Transaction::change(Change::new(from, selection.to(), text))
                .with_selection(Selection::cursor(from + text.len())),
        );
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        let doc = self.editor.view().state().doc();
        let line = doc.line_at(pos);
        if pos <= line.from {
            return pos.saturating_sub(1);
        }
        let before = &line.text[..(pos - line.from).min(line.text.len())];
        pos - before.chars().next_back().map_or(1, char::len_utf8)
    }

    fn next_boundary(&self, pos: usize) -> usize {
        let doc = self.editor.view().state().doc();
        let line = doc.line_at(pos);
        let column = pos - line.from;
        match line.text.get(column..).and_then(|rest| rest.chars().next()) {
            Some(ch) => pos + ch.len_utf8(),
            None => (line.to + 1).min(doc.len()),
        }
    }

    fn delete_range(&mut self, from: usize, to: usize) {
        if from < to && !self.editor.view().state().is_read_only() {
            self.editor.dispatch(
                Transaction::change(Change::delete(from, to))
                    .with_selection(Selection::cursor(from)),
            );
        }
    }

    pub fn backspace(&mut self) {
        let selection = self.editor.view().state().selection();
        if selection.is_empty() {
            let head = selection.head;
            self.delete_range(self.prev_boundary(head), head);
        } else {
            self.delete_range(selection.from(), selection.to());
        }
    }

    pub fn delete(&mut self) {
        let selection = self.editor.view().state().selection();
        if selection.is_empty() {
            let head = selection.head;
            self.delete_range(head, self.next_boundary(head));
        } else {
            self.delete_range(selection.from(), selection.to());
        }
    }

    fn move_vertically(&mut self, lines: isize) {
        let doc = self.editor.view().state().doc();
        let current = doc.line_at(self.cursor());
        let column = current.text[..(self.cursor() - current.from).min(current.text.len())]
            .chars()
            .count();
        let target = current
            .number
            .saturating_add_signed(lines)
            .clamp(1, doc.lines());
        let line = doc.line(target);
        let offset = line
            .text
            .char_indices()
            .nth(column)
            .map_or(line.text.len(), |(index, _)| index);
        self.select(line.from + offset);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Flow> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Ok(Flow::Quit),
            KeyCode::Char('q') if ctrl => return Ok(Flow::Quit),
            KeyCode::Char('s') if ctrl => self.save()?,
            KeyCode::Char(c @ ('b' | 'i' | 'e')) if ctrl => {
                self.editor.handle_key(&format!("Mod-{c}"));
            }
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Char(c) => self.insert(c.encode_utf8(&mut [0u8; 4])),
            KeyCode::Enter => {
                self.editor.handle_key("Enter");
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                let pos = self.prev_boundary(self.cursor());
                self.select(pos);
            }
            KeyCode::Right => {
                let pos = self.next_boundary(self.cursor());
                self.select(pos);
            }
            KeyCode::Up => self.move_vertically(-1),
            KeyCode::Down => self.move_vertically(1),
            KeyCode::Home => {
                let line = self.editor.view().state().cursor_line();
                self.select(line.from);
            }
            KeyCode::End => {
                let line = self.editor.view().state().cursor_line();
                self.select(line.to);
            }
            KeyCode::PageUp => self.move_vertically(-(self.height as isize)),
            KeyCode::PageDown => self.move_vertically(self.height as isize),
            _ => {}
        }
        self.follow_cursor();
        Ok(Flow::Continue)
    }

    pub fn save(&mut self) -> Result<()> {
        let bytes = self.editor.view().state().doc().to_bytes();
        std::fs::write(&self.path, &bytes)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        self.dirty.set(false);
        self.status = format!("Saved {} bytes", bytes.len());
        log::info!("saved {}", self.path.display());
        Ok(())
    }

    /// Scroll the window by `lines`, keeping the cursor where it is.
    pub fn scroll(&mut self, lines: isize) {
        let last = self.editor.view().state().doc().lines();
        self.top_line = self.top_line.saturating_add_signed(lines).clamp(1, last);
        self.sync_viewport();
    }

    /// Click at a row and column of the text area.
    pub fn click(&mut self, row: usize, column: usize) {
        let Some(rendered) = self.rows.get(row) else {
            return;
        };
        let offset = rendered.offset_at(column);
        if let ClickOutcome::Widget { widget, .. } = self.editor.click(offset) {
            self.status = format!("Opening {}", widget.url);
        }
    }

    pub fn resize(&mut self, height: usize) {
        self.height = height.max(1);
        self.follow_cursor();
    }

    fn follow_cursor(&mut self) {
        let line = self.editor.view().state().cursor_line().number;
        if line < self.top_line {
            self.top_line = line;
        } else if line >= self.top_line + self.height {
            self.top_line = line + 1 - self.height;
        }
        self.sync_viewport();
    }

    fn bottom_line(&self) -> usize {
        let last = self.editor.view().state().doc().lines();
        (self.top_line + self.height - 1).min(last)
    }

    fn sync_viewport(&mut self) {
        let doc = self.editor.view().state().doc();
        let viewport = Viewport::new(doc.line(self.top_line).from, doc.line(self.bottom_line()).to);
        self.editor.set_viewport(viewport);
    }

    /// Render the visible lines and remember them for click mapping.
    /// Returns the cursor's row and column when it is on screen.
    pub fn render_rows(&mut self) -> (Vec<RenderedLine>, Option<(usize, usize)>) {
        let view = self.editor.view();
        let doc = view.state().doc();
        let decorations: Vec<&Decoration> = view
            .decorations()
            .flat_map(|(_, set)| set.iter())
            .collect();

        let cursor = self.cursor();
        let mut cursor_at = None;
        let rows: Vec<RenderedLine> = (self.top_line..=self.bottom_line())
            .enumerate()
            .map(|(row, number)| {
                let line = doc.line(number);
                let rendered = render_line(&line, decorations.iter().copied());
                if line.from <= cursor && cursor <= line.to {
                    cursor_at = Some((row, rendered.column_of(cursor)));
                }
                rendered
            })
            .collect();

        self.rows = rows.clone();
        (rows, cursor_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn app(content: &str) -> App {
        let mut app = App::new(PathBuf::from("note.md"), content.to_string(), &EditorSettings::default());
        app.resize(10);
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn ctrl(app: &mut App, c: char) -> Flow {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
            .unwrap()
    }

    fn text(app: &App) -> String {
        app.editor().value()
    }

    #[test]
    fn test_typing_and_deleting() {
        let mut app = app("");
        for c in "héllo".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Delete);
        assert_eq!(text(&app), "hél");
        assert!(app.title().ends_with("[+]"));
    }

    #[test]
    fn test_enter_continues_lists() {
        let mut app = app("");
        for c in "- a".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(text(&app), "- a\n- ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(text(&app), "- a\n");
    }

    #[test]
    fn test_ctrl_b_wraps() {
        let mut app = app("");
        assert_eq!(ctrl(&mut app, 'b'), Flow::Continue);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(text(&app), "**x**");
        assert_eq!(ctrl(&mut app, 'q'), Flow::Quit);
    }

    #[test]
    fn test_vertical_moves_clamp_column() {
        let mut app = app("abcd\nx\nefgh");
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor(), 6);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor(), 8);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.cursor(), 1);
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut app = app("a\nb");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(text(&app), "ab");
    }

    #[test]
    fn test_save_writes_bytes_and_clears_dirty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("note.md");
        let mut app = App::new(path.clone(), "# T".into(), &EditorSettings::default());
        app.insert("!");
        assert!(app.title().ends_with("[+]"));

        assert_eq!(ctrl(&mut app, 's'), Flow::Continue);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "!# T");
        assert!(!app.title().ends_with("[+]"));
    }

    #[test]
    fn test_render_rows_and_click() {
        let mut app = app("one\n\ntwo");
        let (rows, cursor) = app.render_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(cursor, Some((0, 0)));

        app.click(2, 2);
        assert_eq!(app.cursor(), 7);
        app.click(2, 40);
        assert_eq!(app.cursor(), 8);
    }

    #[test]
    fn test_cursor_follows_scroll_window() {
        let content: String = (0..30).map(|i| format!("line {i}\n")).collect();
        let mut app = app(&content);
        for _ in 0..15 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.top_line, 7);
        assert_eq!(app.editor().view().viewport().from, app.editor().view().state().doc().line(7).from);
    }
}
