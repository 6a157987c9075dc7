use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use kanal::{AsyncReceiver, AsyncSender};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use wordlens_client::WordnikClient;
use wordlens_config::ui::UiConfig;
use wordlens_core::resolve::Resolver;
use wordlens_core::session::SessionCache;
use wordlens_core::types::ResolutionResult;

use crate::events::AppEvent;

/// TUI application state. The session cache is owned here and only ever
/// touched from the UI loop; background tasks hand results back over the
/// channel instead of mutating shared state.
struct App {
    session: SessionCache,
    current: Option<String>,
    list_state: ListState,
    scroll: u16,
    status: String,
    client: WordnikClient,
    resolver: Arc<Resolver>,
    event_rx: AsyncReceiver<AppEvent>,
    event_tx: AsyncSender<AppEvent>,
}

impl App {
    fn new(client: WordnikClient, resolver: Arc<Resolver>) -> Self {
        let (tx, rx) = kanal::unbounded_async();
        Self {
            session: SessionCache::new(),
            current: None,
            list_state: ListState::default(),
            scroll: 0,
            status: "loading...".to_string(),
            client,
            resolver,
            event_rx: rx,
            event_tx: tx,
        }
    }

    /// Kick off a resolution run in the background. The resolver's
    /// single-flight flag silently drops this trigger if a run is already
    /// in flight, so manual and timer refreshes need no extra coordination.
    fn refresh(&self) {
        let resolver = self.resolver.clone();
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match resolver.resolve(&client, None).await {
                Ok(Some(result)) => {
                    let _ = tx.send(AppEvent::Resolved(result)).await;
                }
                Ok(None) => {
                    tracing::debug!("refresh dropped, resolution in flight");
                }
                Err(err) => {
                    let _ = tx.send(AppEvent::RefreshFailed(err.to_string())).await;
                }
            }
        });
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Resolved(ResolutionResult {
                word,
                definitions,
                attempts,
            }) => {
                self.session.upsert(&word, definitions);
                self.list_state.select(self.session.position_of(&word));
                self.status = format!("{word} (resolved in {attempts} attempt(s))");
                self.current = Some(word);
                self.scroll = 0;
            }
            AppEvent::RefreshFailed(msg) => {
                // Keep whatever was on screen; a failed refresh only
                // changes the status line.
                self.status = format!("refresh failed: {msg}");
            }
        }
    }

    /// Show the session word at a list position, from cache, no refetch.
    fn show_selected(&mut self) {
        if let Some(index) = self.list_state.selected() {
            if let Some(word) = self.session.word_at(index) {
                self.current = Some(word.to_string());
                self.status = word.to_string();
                self.scroll = 0;
            }
        }
    }

    fn select_previous(&mut self) {
        if self.session.is_empty() {
            return;
        }
        let index = self.list_state.selected().unwrap_or(0).saturating_sub(1);
        self.list_state.select(Some(index));
    }

    fn select_next(&mut self) {
        if self.session.is_empty() {
            return;
        }
        let last = self.session.len() - 1;
        let index = match self.list_state.selected() {
            Some(i) => (i + 1).min(last),
            None => 0,
        };
        self.list_state.select(Some(index));
    }
}

pub async fn run(ui_config: UiConfig, client: WordnikClient, resolver: Arc<Resolver>) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = event_loop(&mut terminal, ui_config, client, resolver).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ui_config: UiConfig,
    client: WordnikClient,
    resolver: Arc<Resolver>,
) -> Result<()> {
    let mut app = App::new(client, resolver);
    let refresh_interval = Duration::from_secs(ui_config.refresh_secs);
    let tick_rate = Duration::from_millis(100);

    // Initial load behaves exactly like a manual refresh.
    app.refresh();
    let mut last_refresh = Instant::now();

    loop {
        terminal.draw(|f| draw(f, &mut app))?;

        while let Ok(Some(event)) = app.event_rx.try_recv() {
            app.handle_event(event);
        }

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => break,
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break;
                        }
                        KeyCode::Char('r') => {
                            app.refresh();
                            last_refresh = Instant::now();
                        }
                        KeyCode::Up => app.select_previous(),
                        KeyCode::Down => app.select_next(),
                        KeyCode::Enter => app.show_selected(),
                        KeyCode::PageUp => app.scroll = app.scroll.saturating_sub(5),
                        KeyCode::PageDown => app.scroll = app.scroll.saturating_add(5),
                        _ => {}
                    }
                }
            }
        }

        if last_refresh.elapsed() >= refresh_interval {
            app.refresh();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(f.area());

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[0]);

    f.render_widget(definition_pane(app), main_chunks[0]);

    let words: Vec<ListItem> = app
        .session
        .ordered_words()
        .iter()
        .map(|w| ListItem::new(w.as_str()))
        .collect();
    let word_list = List::new(words)
        .block(Block::default().borders(Borders::ALL).title(" Words "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(word_list, main_chunks[1], &mut app.list_state);

    let banner = Paragraph::new(Line::from(vec![
        Span::styled(" [Esc/Q]", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" Quit "),
        Span::styled("[R]", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" Refresh "),
        Span::styled("[Enter]", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" Select  "),
        Span::styled(&app.status, Style::default().fg(Color::DarkGray)),
    ]))
    .style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_widget(banner, chunks[1]);
}

fn definition_pane(app: &App) -> Paragraph<'_> {
    let mut lines = Vec::new();

    if let Some(definitions) = app
        .current
        .as_deref()
        .and_then(|word| app.session.get(word))
    {
        let word = app.current.as_deref().unwrap_or_default();
        lines.push(Line::from(Span::styled(
            word,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
        for (i, def) in definitions.iter().enumerate() {
            let tag = match def.part_of_speech.as_deref() {
                Some(pos) => format!("{}. [{}] - ", i + 1, pos),
                None => format!("{}. - ", i + 1),
            };
            lines.push(Line::from(vec![
                Span::styled(tag, Style::default().fg(Color::DarkGray)),
                Span::raw(def.text.as_str()),
            ]));
        }
    } else {
        lines.push(Line::from("fetching a word..."));
    }

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Definitions "))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0))
}
