use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::algorithms::merge_sort;
use crate::config::{clamp_speed, Config, MAX_ARRAY_SIZE, MIN_ARRAY_SIZE};
use crate::ui::action::Action;
use crate::ui::components::theme::{ACCENT_PRIMARY, TEXT_MUTED, TEXT_PRIMARY};
use crate::ui::components::{BarCanvas, GlobalFooter, StatsBar};
use crate::ui::events::AppEvent;
use crate::ui::terminal_guard::TerminalGuard;
use crate::util::random_array_with;
use crate::viz::{PlaybackState, Player, SetupError, VizState};

/// Frame period of the main loop
const FRAME: Duration = Duration::from_millis(16);

/// Screen regions, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub stats: Rect,
    pub chart: Rect,
    pub complexity: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn split(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: chunks[0],
            stats: chunks[1],
            chart: chunks[2],
            complexity: chunks[3],
            footer: chunks[4],
        }
    }
}

/// Main application state
pub struct App {
    /// Application configuration
    config: Config,
    /// Whether the app should quit
    should_quit: bool,
    player: Player<BarCanvas>,
    /// Source of generated arrays
    rng: StdRng,
    /// Current array size
    size: usize,
    footer: GlobalFooter,
    /// Event channel sender
    event_tx: mpsc::UnboundedSender<AppEvent>,
    /// Event channel receiver
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Runs that reached their end since launch
    completed_runs: u32,
}

impl App {
    /// Build the app for a terminal of size `viewport`.
    ///
    /// Fails when the viewport leaves no room for the chart.
    pub fn new(config: Config, viewport: Rect) -> Result<Self, SetupError> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let size = config.array.size;
        let array = random_array_with(&mut rng, size, config.array.min, config.array.max);

        let canvas = BarCanvas::new(AppLayout::split(viewport).chart, config.palette);
        let done_tx = event_tx.clone();
        let mut player = Player::new(canvas, VizState::new(array), move || {
            if done_tx.send(AppEvent::SortFinished).is_err() {
                tracing::debug!("App channel closed before run completion");
            }
        })?;
        player.set_speed(config.playback.speed);

        let footer = GlobalFooter::from_keybindings(&config.keybindings);
        let autoplay = config.playback.autoplay;

        let mut app = Self {
            config,
            should_quit: false,
            player,
            rng,
            size,
            footer,
            event_tx,
            event_rx,
            completed_runs: 0,
        };

        if autoplay {
            app.handle_action(Action::Restart);
        }

        Ok(app)
    }

    /// Set up the terminal, run the main loop, and restore the terminal
    pub async fn launch(config: Config) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut guard = TerminalGuard::new();
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let size = terminal.size()?;
        let viewport = Rect::new(0, 0, size.width, size.height);
        let mut app = App::new(config, viewport).context("Terminal too small to draw the chart")?;

        let result = app.event_loop(&mut terminal).await;

        guard.cleanup()?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                // Terminal input + frame tick
                _ = tokio::time::sleep(FRAME) => {
                    while event::poll(Duration::from_millis(0))? {
                        // Resize is picked up by the next draw
                        if let Event::Key(key) = event::read()? {
                            self.handle_key_event(key);
                        }
                    }
                    self.tick(Instant::now());
                }

                Some(event) = self.event_rx.recv() => {
                    self.handle_app_event(event);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let Some(action) = self.config.keybindings.action_for_event(&key) {
            self.handle_action(action);
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        tracing::debug!(action = action.name(), "Handling action");
        match action {
            Action::Quit => self.should_quit = true,
            Action::TogglePlay => {
                if self.needs_new_run() {
                    self.arm();
                }
                self.player.toggle_play();
            }
            Action::Step => {
                if self.needs_new_run() {
                    self.arm();
                }
                self.player.step_once();
            }
            Action::Restart => {
                self.arm();
                self.player.toggle_play();
            }
            Action::NewArray => self.new_array(),
            Action::SpeedUp => self.change_speed(self.config.playback.speed_step),
            Action::SpeedDown => self.change_speed(-self.config.playback.speed_step),
            Action::SizeUp => self.change_size(true),
            Action::SizeDown => self.change_size(false),
        }
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SortFinished => {
                self.completed_runs += 1;
                let stats = self.player.instrumentation();
                tracing::debug!(
                    run = self.completed_runs,
                    comparisons = stats.comparisons,
                    writes = stats.writes,
                    "Run completed"
                );
            }
        }
    }

    /// Advance playback for the frame at `now`, then handle queued app events
    pub fn tick(&mut self, now: Instant) {
        self.player.tick(now);
        self.drain_events();
    }

    /// Handle every app event already queued
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_app_event(event);
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let layout = AppLayout::split(frame.area());

        if layout.chart != self.player.renderer().area() {
            self.player.renderer_mut().resize(layout.chart);
            self.player.redraw();
        }

        self.render_header(frame, layout.header);

        StatsBar::new(
            self.player.playback(),
            self.player.state().len(),
            self.player.speed(),
            self.player.instrumentation(),
        )
        .render(layout.stats, frame.buffer_mut());

        frame.render_widget(self.player.renderer(), layout.chart);

        let complexity = Paragraph::new(Line::from(Span::styled(
            " time O(n log n) · space O(n) · stable · not in place",
            Style::default().fg(TEXT_MUTED),
        )));
        frame.render_widget(complexity, layout.complexity);

        self.footer.render(layout.footer, frame.buffer_mut());
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                " mergeviz",
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" · merge sort", Style::default().fg(TEXT_PRIMARY)),
        ];
        if let Some(seed) = self.config.seed {
            spans.push(Span::styled(
                format!(" · seed {}", seed),
                Style::default().fg(TEXT_MUTED),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Toggle and step start over when nothing is in progress
    fn needs_new_run(&self) -> bool {
        matches!(
            self.player.playback(),
            PlaybackState::Idle | PlaybackState::Finished
        )
    }

    /// Arm a fresh run over the current array
    fn arm(&mut self) {
        let steps = merge_sort(&self.player.state().array);
        tracing::debug!(size = self.player.state().len(), "Arming merge sort run");
        self.player.set_steps(steps);
    }

    fn new_array(&mut self) {
        let array = random_array_with(
            &mut self.rng,
            self.size,
            self.config.array.min,
            self.config.array.max,
        );
        self.player.replace_state(VizState::new(array));
    }

    fn change_speed(&mut self, delta: f64) {
        let speed = clamp_speed(self.player.speed() + delta);
        self.player.set_speed(speed);
    }

    fn change_size(&mut self, grow: bool) {
        let step = self.config.playback.size_step;
        let size = if grow {
            self.size.saturating_add(step)
        } else {
            self.size.saturating_sub(step)
        };
        self.size = size.clamp(MIN_ARRAY_SIZE, MAX_ARRAY_SIZE);
        self.new_array();
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn player(&self) -> &Player<BarCanvas> {
        &self.player
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn completed_runs(&self) -> u32 {
        self.completed_runs
    }

    /// Sender for the app event channel
    pub fn event_sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.event_tx.clone()
    }
}
