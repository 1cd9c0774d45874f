//! Terminal front end for the [`Navigator`].
//!
//! A blocking draw, read key, mutate loop. Only an explicit quit ends it.

mod keys;

pub use keys::Action;

use std::io::{self, Write};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal, TerminalOptions, Viewport,
};
use tracing::debug;

use crate::format::Formatter;
use crate::navigator::{LineView, NavState, Navigator, COLOR_CLASSES};

const PALETTE: [Color; COLOR_CLASSES] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Blue,
    Color::Red,
];

fn depth_color(class: usize) -> Color {
    PALETTE[class % COLOR_CLASSES]
}

/// Owns the terminal while the UI runs. Restored on drop, so a panic in the
/// loop still leaves the shell usable.
struct TerminalSession<W: Write> {
    terminal: Terminal<CrosstermBackend<W>>,
    raw_mode: bool,
    restored: bool,
}

impl<W: Write> TerminalSession<W> {
    fn enter(writer: W, raw_mode: bool, options: TerminalOptions) -> io::Result<Self> {
        if raw_mode {
            enable_raw_mode()?;
        }
        let terminal = match Terminal::with_options(CrosstermBackend::new(writer), options) {
            Ok(terminal) => terminal,
            Err(err) => {
                if raw_mode {
                    let _ = disable_raw_mode();
                }
                return Err(err);
            }
        };
        let mut session = Self {
            terminal,
            raw_mode,
            restored: false,
        };
        execute!(session.terminal.backend_mut(), EnterAlternateScreen)?;
        Ok(session)
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        if self.raw_mode {
            disable_raw_mode()?;
        }
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }
}

impl<W: Write> Drop for TerminalSession<W> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Take over the terminal until the user quits. Returns the number of
/// actions applied.
pub fn run(navigator: &mut Navigator, formatter: &dyn Formatter, page_size: Option<usize>) -> io::Result<usize> {
    let options = TerminalOptions {
        viewport: Viewport::Fullscreen,
    };
    let mut session = TerminalSession::enter(io::stdout(), true, options)?;
    let result = event_loop(&mut session.terminal, navigator, formatter, page_size);
    session.restore()?;
    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    navigator: &mut Navigator,
    formatter: &dyn Formatter,
    page_size: Option<usize>,
) -> io::Result<usize> {
    let mut applied = 0;
    loop {
        terminal.draw(|frame| render(frame, navigator, formatter, page_size))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(action) = Action::from_key(key) else {
            continue;
        };
        debug!(?action, "key");
        if !action.apply(navigator) {
            break;
        }
        applied += 1;
    }
    Ok(applied)
}

fn render(frame: &mut Frame<'_>, navigator: &mut Navigator, formatter: &dyn Formatter, page_size: Option<usize>) {
    let outer = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    render_tree(frame, navigator, formatter, page_size, outer[0]);
    render_statusbar(frame, navigator, outer[1]);
}

fn render_tree(
    frame: &mut Frame<'_>,
    navigator: &mut Navigator,
    formatter: &dyn Formatter,
    page_size: Option<usize>,
    area: Rect,
) {
    let rows = usize::from(area.height.saturating_sub(2));
    let rows = page_size.map_or(rows, |size| size.min(rows));
    navigator.set_viewport(rows);

    let title = match navigator.state() {
        NavState::Browsing => " Call tree ".to_string(),
        NavState::ZoomedIn { depth } => format!(" Call tree (zoom {}) ", depth),
    };
    let lines: Vec<Line> = navigator.window(formatter).iter().map(tree_line).collect();

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn tree_line(view: &LineView) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = view
        .connectors
        .iter()
        .map(|c| Span::styled(c.glyph, Style::default().fg(depth_color(c.color))))
        .collect();
    spans.push(Span::styled(
        view.indicator.glyph(),
        Style::default().fg(depth_color(view.color)),
    ));

    let content_style = if view.selected {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        Style::default()
    };
    spans.push(Span::styled(view.content.clone(), content_style));
    if let Some(location) = &view.location {
        spans.push(Span::styled(format!("  {}", location), Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

fn render_statusbar(frame: &mut Frame<'_>, navigator: &Navigator, area: Rect) {
    let position = navigator
        .cursor_position()
        .map(|p| format!(" {}/{} ", p + 1, navigator.visible_lines().len()))
        .unwrap_or_else(|| " empty ".to_string());
    let bar = Paragraph::new(Line::from(vec![
        Span::raw(position),
        Span::styled(" ↑↓ ", Style::default().fg(Color::Cyan)),
        Span::raw("move  "),
        Span::styled("Enter ", Style::default().fg(Color::Cyan)),
        Span::raw("toggle  "),
        Span::styled("→/← ", Style::default().fg(Color::Cyan)),
        Span::raw("zoom in/out  "),
        Span::styled("e/c ", Style::default().fg(Color::Cyan)),
        Span::raw("expand/collapse all  "),
        Span::styled("q ", Style::default().fg(Color::Cyan)),
        Span::raw("quit"),
    ]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PlainFormatter;
    use crate::navigator::{Connector, Indicator};
    use crate::types::{Event as NodeEvent, Node};
    use ratatui::backend::TestBackend;
    use rstest::rstest;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn navigator() -> Navigator {
        Navigator::new(vec![
            Node::new(NodeEvent::Call, "a", 0),
            Node::new(NodeEvent::CallReturn, "b", 1),
            Node::new(NodeEvent::Return, "a", 0),
        ])
    }

    #[rstest]
    fn test_render_sets_viewport_from_area() {
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        let mut navigator = navigator();
        let formatter = PlainFormatter::new();
        terminal
            .draw(|frame| render(frame, &mut navigator, &formatter, None))
            .unwrap();
        // 8 rows minus the status bar and the two border rows
        assert_eq!(navigator.viewport(), 5);
        let text = screen(&terminal);
        assert!(text.contains("Call tree"));
        assert!(text.contains("a()"));
        assert!(text.contains("b()"));
        assert!(text.contains("1/3"));
    }

    #[rstest]
    fn test_page_size_caps_viewport() {
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        let mut navigator = navigator();
        let formatter = PlainFormatter::new();
        terminal
            .draw(|frame| render(frame, &mut navigator, &formatter, Some(2)))
            .unwrap();
        assert_eq!(navigator.viewport(), 2);
    }

    #[rstest]
    fn test_zoom_shows_in_title() {
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        let mut navigator = navigator();
        navigator.enter_subtree(0);
        let formatter = PlainFormatter::new();
        terminal
            .draw(|frame| render(frame, &mut navigator, &formatter, None))
            .unwrap();
        assert!(screen(&terminal).contains("zoom 1"));
    }

    #[rstest]
    fn test_tree_line_spans() {
        let view = LineView {
            index: 1,
            depth: 1,
            event: NodeEvent::CallReturn,
            indicator: Indicator::Leaf,
            connectors: vec![Connector::for_level(0)],
            color: 1,
            content: "b()".to_string(),
            location: Some("b.rb:3".to_string()),
            selected: true,
        };
        let line = tree_line(&view);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "│ ─ b()  b.rb:3");
        assert_eq!(line.spans[0].style.fg, Some(Color::Cyan));
        assert_eq!(line.spans[1].style.fg, Some(Color::Green));
        assert!(line.spans[2].style.add_modifier.contains(Modifier::REVERSED));
    }
    fn fixed_viewport() -> TerminalOptions {
        TerminalOptions {
            viewport: Viewport::Fixed(Rect::new(0, 0, 20, 5)),
        }
    }

    #[rstest]
    fn test_session_restores_screen_on_panic() {
        let mut out: Vec<u8> = Vec::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _session = TerminalSession::enter(&mut out, false, fixed_viewport()).unwrap();
            panic!("render failed");
        }));
        assert!(result.is_err());
        let written = String::from_utf8_lossy(&out);
        assert!(written.contains("\x1b[?1049h"));
        assert!(written.contains("\x1b[?1049l"));
        assert!(written.contains("\x1b[?25h"));
    }

    #[rstest]
    fn test_session_restores_only_once() {
        let mut out: Vec<u8> = Vec::new();
        {
            let mut session = TerminalSession::enter(&mut out, false, fixed_viewport()).unwrap();
            session.restore().unwrap();
        }
        let written = String::from_utf8_lossy(&out);
        assert_eq!(written.matches("\x1b[?1049l").count(), 1);
    }
}
