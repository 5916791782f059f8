//! Application state and event loop

use std::cell::Cell;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
    DefaultTerminal, Frame,
};

use crate::config::Config;
use crate::services::{load_dashboard, Dashboard, GitHubClient, MetricsRequest};

use super::theme::Theme;
use super::widgets::{
    acceptance::{AcceptanceView, VISIBLE_ROWS},
    editors::EditorsView,
    help::HelpPopup,
    landing::LandingView,
    languages::LanguagesView,
    spinner::Spinner,
    tabs::Tab,
    users::UsersView,
};

type FetchResult = Result<Box<Dashboard>, String>;

/// Application state
pub enum AppState {
    /// No account or token configured
    Landing,
    /// Fetch in flight with spinner animation
    Loading { spinner_frame: usize },
    /// Ready with aggregated data
    Ready { data: Box<Dashboard> },
    /// Fetch failed
    Error { message: String },
}

/// Main application
pub struct App {
    state: AppState,
    should_quit: bool,
    current_tab: Tab,
    acceptance_scroll: usize,
    /// Acceptance table rows that fit on screen, updated on every draw
    acceptance_rows: Cell<usize>,
    show_help: bool,
    refresh_requested: bool,
    /// Account being displayed; `None` means fetching is impossible
    account: Option<String>,
    theme: Theme,
}

impl App {
    /// Start loading metrics for `account`, or show the landing view when there is none
    pub fn new(account: Option<String>, theme: Theme) -> Self {
        let state = if account.is_some() {
            AppState::Loading { spinner_frame: 0 }
        } else {
            AppState::Landing
        };
        Self {
            refresh_requested: account.is_some(),
            state,
            should_quit: false,
            current_tab: Tab::default(),
            acceptance_scroll: 0,
            acceptance_rows: Cell::new(VISIBLE_ROWS),
            show_help: false,
            account,
            theme,
        }
    }

    /// Start in the error view (configuration present but unusable)
    pub fn failed(message: String, theme: Theme) -> Self {
        let mut app = Self::new(None, theme);
        app.state = AppState::Error { message };
        app
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                if key.code == KeyCode::Char('c') {
                    self.should_quit = true;
                }
                return;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Tab => {
                    self.current_tab = self.current_tab.next();
                }
                KeyCode::BackTab => {
                    self.current_tab = self.current_tab.prev();
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.scroll_up();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.scroll_down();
                }
                KeyCode::Char(c @ '1'..='4') => {
                    if let Some(tab) = Tab::from_number(c as u8 - b'0') {
                        self.current_tab = tab;
                    }
                }
                KeyCode::Char('?') => {
                    self.show_help = !self.show_help;
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    self.request_refresh();
                }
                _ => {}
            }
        }
    }

    /// Queue a refetch unless one is already running or there is nothing to fetch
    fn request_refresh(&mut self) {
        if self.account.is_none() || matches!(self.state, AppState::Loading { .. }) {
            return;
        }
        self.state = AppState::Loading { spinner_frame: 0 };
        self.refresh_requested = true;
    }

    /// Consume a pending refresh request
    pub fn take_refresh(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }

    /// Apply a finished fetch to app state
    pub fn apply_result(&mut self, result: FetchResult) {
        match result {
            Ok(data) => {
                self.acceptance_scroll = 0;
                self.state = AppState::Ready { data };
            }
            Err(message) => self.state = AppState::Error { message },
        }
    }

    /// Largest acceptance offset for the last drawn table height
    fn max_acceptance_scroll(&self) -> usize {
        match &self.state {
            AppState::Ready { data } => AcceptanceView::max_scroll_offset(
                data.acceptance.len(),
                self.acceptance_rows.get(),
            ),
            _ => 0,
        }
    }

    fn scroll_up(&mut self) {
        if self.current_tab == Tab::Acceptance {
            // The terminal may have grown since the last scroll
            let max = self.max_acceptance_scroll();
            self.acceptance_scroll = self.acceptance_scroll.min(max).saturating_sub(1);
        }
    }

    fn scroll_down(&mut self) {
        if self.current_tab == Tab::Acceptance {
            let max = self.max_acceptance_scroll();
            self.acceptance_scroll = (self.acceptance_scroll + 1).min(max);
        }
    }

    /// Update spinner animation
    pub fn tick(&mut self) {
        if let AppState::Loading { spinner_frame } = &self.state {
            self.state = AppState::Loading {
                spinner_frame: Spinner::next_frame(*spinner_frame),
            };
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    fn render_ready(&self, data: &Dashboard, area: Rect, buf: &mut Buffer) {
        match self.current_tab {
            Tab::Users => UsersView::new(&data.users, self.theme).render(area, buf),
            Tab::Editors => EditorsView::new(&data.editors, self.theme).render(area, buf),
            Tab::Languages => LanguagesView::new(&data.languages, self.theme).render(area, buf),
            Tab::Acceptance => {
                self.acceptance_rows
                    .set(AcceptanceView::table_rows(area, data.acceptance.len()));
                AcceptanceView::new(&data.acceptance, self.acceptance_scroll, self.theme)
                    .render(area, buf)
            }
        }
    }

    fn error_hint(&self) -> &'static str {
        if self.account.is_some() {
            "Press r to retry, q to quit"
        } else {
            "Press q to quit"
        }
    }

    fn render_error(&self, message: &str, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(Span::styled(
                format!("Error: {}", message),
                Style::default().fg(self.theme.error()),
            )),
            Line::default(),
            Line::from(Span::styled(
                self.error_hint(),
                Style::default().fg(self.theme.muted()),
            )),
        ];
        let y = area.y + area.height.saturating_sub(3) / 2;
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(
                Rect {
                    x: area.x,
                    y,
                    width: area.width,
                    height: area.height - (y - area.y),
                },
                buf,
            );
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.state {
            AppState::Landing => LandingView::new(self.theme).render(area, buf),
            AppState::Loading { spinner_frame } => {
                let account = self.account.as_deref().unwrap_or_default();
                Spinner::new(*spinner_frame, account, self.theme).render(area, buf);
            }
            AppState::Ready { data } => self.render_ready(data, area, buf),
            AppState::Error { message } => self.render_error(message, area, buf),
        }

        // Help popup overlay
        if self.show_help {
            let popup_area = HelpPopup::centered_area(area);
            HelpPopup::new(self.theme).render(popup_area, buf);
        }
    }
}

/// Run the TUI application
pub fn run(config: Config) -> anyhow::Result<()> {
    // Query the terminal background before raw mode takes over stdin
    let theme = Theme::detect();

    let (app, request) = match config.request() {
        Ok(request) => (App::new(Some(request.account.clone()), theme), Some(request)),
        Err(e) if config.is_complete() => (App::failed(e.to_string(), theme), None),
        Err(_) => (App::new(None, theme), None),
    };

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, app, request);
    ratatui::restore();
    result
}

/// Fetch and aggregate on a worker thread
fn spawn_fetch(request: MetricsRequest) -> Receiver<FetchResult> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = GitHubClient::new()
            .and_then(|client| load_dashboard(&client, &request))
            .map(Box::new)
            .map_err(|e| {
                tracing::warn!(error = %e, "metrics fetch failed");
                e.to_string()
            });
        let _ = tx.send(result);
    });
    rx
}

fn run_app(
    terminal: &mut DefaultTerminal,
    mut app: App,
    request: Option<MetricsRequest>,
) -> anyhow::Result<()> {
    let mut pending: Option<Receiver<FetchResult>> = None;

    loop {
        if app.take_refresh() {
            if let Some(request) = &request {
                tracing::debug!(account = %request.account, "starting fetch");
                pending = Some(spawn_fetch(request.clone()));
            }
        }

        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        // Check for fetch completion (non-blocking)
        if let Some(rx) = &pending {
            match rx.try_recv() {
                Ok(result) => {
                    app.apply_result(result);
                    pending = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    app.apply_result(Err("metrics worker stopped unexpectedly".to_string()));
                    pending = None;
                }
            }
        }

        // Poll for events with 100ms timeout for spinner animation
        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        } else {
            app.tick();
        }
    }

    Ok(())
}
