use std::{io, time::Duration};

use color_eyre::Result;
use crossterm::{
    event::{self, DisableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use famhub_core::{
    model::{Task, TaskStatus},
    views::DashboardSummary,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Terminal,
};

/// Minimal TUI that renders the dashboard counts and the task list
/// (view-only; `d` marks the first open task done in the view).
/// Press `q` or `Esc` to exit.
pub fn launch(tasks: &[Task], summary: &DashboardSummary) -> Result<()> {
    // Guard restores the terminal even if we early-return.
    let _guard = TerminalGuard::enter()?;
    let mut terminal = _guard.terminal()?;
    let mut tasks = tasks.to_owned();

    loop {
        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(2)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Length(2),
                ])
                .split(frame.area());

            let header = Paragraph::new(Line::from(vec![
                Span::styled(
                    "FamHub",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    " — {} pending, {} done, ${:.2} spent, {} upcoming",
                    summary.pending_tasks,
                    summary.completed_tasks,
                    summary.total_expenses,
                    summary.upcoming_events
                )),
            ]))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(Span::styled(
                        "Family dashboard",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )),
            );
            frame.render_widget(header, chunks[0]);

            let items: Vec<ListItem> = tasks
                .iter()
                .map(|t| {
                    let mut line = vec![
                        Span::styled(
                            status_tag(t.status),
                            Style::default()
                                .fg(status_color(t.status))
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(" "),
                        Span::styled(&t.title, Style::default().add_modifier(Modifier::BOLD)),
                    ];
                    if !t.assigned_to.is_empty() {
                        line.push(Span::raw(format!(" — {}", t.assigned_to)));
                    }
                    ListItem::new(Line::from(line))
                })
                .collect();

            let body = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Tasks & chores"),
            );
            frame.render_widget(body, chunks[1]);

            let footer = Paragraph::new(Line::from(vec![
                Span::raw("Press "),
                Span::styled("q", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("Esc", Style::default().fg(Color::Cyan)),
                Span::raw(" to quit."),
            ]))
            .block(Block::default().borders(Borders::ALL).title("Controls"));
            frame.render_widget(footer, chunks[2]);
        })?;

        if event::poll(Duration::from_millis(150))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('d') => {
                        if let Some(next) = tasks
                            .iter_mut()
                            .find(|t| t.status != TaskStatus::Completed)
                        {
                            next.status = TaskStatus::Completed;
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

fn status_tag(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "[pending]",
        TaskStatus::InProgress => "[doing]",
        TaskStatus::Completed => "[done]",
    }
}

fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Pending => Color::Yellow,
        TaskStatus::InProgress => Color::Cyan,
        TaskStatus::Completed => Color::Green,
    }
}

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        // Enter alternate screen to avoid polluting the shell buffer.
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }

    fn terminal(&self) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
        let backend = CrosstermBackend::new(io::stdout());
        Ok(Terminal::new(backend)?)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best-effort cleanup; errors are logged but not propagated from Drop.
        if let Err(err) = disable_raw_mode() {
            eprintln!("failed to disable raw mode: {err}");
        }
        if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture) {
            eprintln!("failed to restore terminal: {err}");
        }
    }
}
