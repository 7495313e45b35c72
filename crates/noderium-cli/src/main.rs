mod app;
mod render;

use anyhow::Result;
use app::{App, Flow};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use noderium_config::Config;
use noderium_editor::DEFAULT_CONTENT;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use std::{env, io::stdout, path::PathBuf, process};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let path = match args.as_slice() {
        [_] => PathBuf::from("untitled.md"),
        [_, file] => PathBuf::from(file),
        _ => {
            eprintln!("Usage: {} [FILE]", args[0]);
            process::exit(1);
        }
    };
    let path = config.resolve_note_path(&path);

    let content = if path.exists() {
        std::fs::read_to_string(&path)?
    } else {
        log::info!("{} does not exist yet, starting a new note", path.display());
        config
            .editor
            .default_content
            .clone()
            .unwrap_or_else(|| DEFAULT_CONTENT.to_string())
    };

    let mut app = App::new(path, content, &config.editor);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut text_area = Rect::default();
    loop {
        terminal.draw(|f| text_area = ui(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key)? == Flow::Quit {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    if let Some((row, column)) = area_position(text_area, mouse.row, mouse.column) {
                        app.click(row, column);
                    }
                }
                MouseEventKind::ScrollDown => app.scroll(3),
                MouseEventKind::ScrollUp => app.scroll(-3),
                _ => {}
            },
            _ => {}
        }
    }
}

/// Row and column inside `area`, if the point falls in it.
fn area_position(area: Rect, row: u16, column: u16) -> Option<(usize, usize)> {
    let inside = row >= area.y
        && row < area.y + area.height
        && column >= area.x
        && column < area.x + area.width;
    inside.then(|| ((row - area.y) as usize, (column - area.x) as usize))
}

fn ui(f: &mut Frame, app: &mut App) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)].as_ref())
        .split(f.area());

    let block = Block::default().borders(Borders::ALL).title(app.title());
    let text_area = block.inner(chunks[0]);
    app.resize(text_area.height as usize);

    let (rows, cursor) = app.render_rows();
    let lines: Vec<Line> = rows.into_iter().map(|row| row.text).collect();
    f.render_widget(Paragraph::new(lines).block(block), chunks[0]);

    let status = Paragraph::new(Line::from(app.status.clone()))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(status, chunks[1]);

    if let Some((row, column)) = cursor {
        f.set_cursor_position((
            text_area.x + column as u16,
            text_area.y + row as u16,
        ));
    }

    text_area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_position() {
        let area = Rect::new(1, 1, 10, 5);
        assert_eq!(area_position(area, 1, 1), Some((0, 0)));
        assert_eq!(area_position(area, 3, 4), Some((2, 3)));
        assert_eq!(area_position(area, 0, 4), None);
        assert_eq!(area_position(area, 6, 4), None);
        assert_eq!(area_position(area, 3, 11), None);
    }
}
