//! App driven through key events and rendered to a TestBackend

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mergeviz::config::{Config, MAX_ARRAY_SIZE, MIN_ARRAY_SIZE};
use mergeviz::ui::{Action, AppEvent};
use mergeviz::viz::{MAX_SPEED, MIN_SPEED};
use mergeviz::{App, PlaybackState};
use ratatui::layout::Rect;

use super::common::terminal::{buffer_contains, create_test_terminal, create_test_terminal_sized};

fn seeded_config() -> Config {
    Config::default().with_seed(Some(7)).with_size(8)
}

fn app() -> App {
    App::new(seeded_config(), Rect::new(0, 0, 80, 24)).unwrap()
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
}

/// Tick well past the interval until the run ends
fn play_out(app: &mut App) {
    let mut now = Instant::now();
    for _ in 0..10_000 {
        if app.player().playback() != PlaybackState::Playing {
            return;
        }
        app.tick(now);
        now += Duration::from_millis(100);
    }
    panic!("run never finished");
}

fn is_ascending(values: &[i64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

#[test]
fn test_initial_screen() {
    let mut app = app();
    let mut terminal = create_test_terminal();
    terminal.draw(|f| app.draw(f)).unwrap();

    let buffer = terminal.backend().buffer();
    assert!(buffer_contains(buffer, "mergeviz"));
    assert!(buffer_contains(buffer, "seed 7"));
    assert!(buffer_contains(buffer, "IDLE"));
    assert!(buffer_contains(buffer, "n 8"));
    assert!(buffer_contains(buffer, "speed 1.00x"));
    assert!(buffer_contains(buffer, "O(n log n)"));
    assert!(buffer_contains(buffer, "play/pause"));
    assert!(buffer_contains(buffer, "█"));
    assert_eq!(app.player().playback(), PlaybackState::Idle);
}

#[test]
fn test_space_plays_a_full_run() {
    let mut app = app();
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.player().playback(), PlaybackState::Playing);

    play_out(&mut app);

    assert_eq!(app.player().playback(), PlaybackState::Finished);
    assert_eq!(app.completed_runs(), 1);
    assert!(is_ascending(&app.player().state().array));
    assert_eq!(app.player().state().sorted.len(), 8);

    let mut terminal = create_test_terminal();
    terminal.draw(|f| app.draw(f)).unwrap();
    assert!(buffer_contains(terminal.backend().buffer(), "DONE"));
}

#[test]
fn test_toggle_after_finish_starts_a_new_run() {
    let mut app = app();
    press(&mut app, KeyCode::Char(' '));
    play_out(&mut app);

    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.player().playback(), PlaybackState::Playing);
    assert_eq!(app.player().instrumentation().comparisons, 0);
    assert!(app.player().state().sorted.is_empty());

    play_out(&mut app);
    assert_eq!(app.completed_runs(), 2);
}

#[test]
fn test_step_key_arms_and_applies_one_step() {
    let mut app = app();
    press(&mut app, KeyCode::Right);
    assert_eq!(app.player().playback(), PlaybackState::Armed);
    assert!(app.player().state().is_sorted(0));

    press(&mut app, KeyCode::Char('s'));
    assert!(app.player().state().is_sorted(1));
    assert_eq!(app.player().playback(), PlaybackState::Armed);
}

#[test]
fn test_pause_and_resume() {
    let mut app = app();
    press(&mut app, KeyCode::Char(' '));
    app.tick(Instant::now());
    press(&mut app, KeyCode::Char('p'));
    assert_eq!(app.player().playback(), PlaybackState::Paused);
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.player().playback(), PlaybackState::Playing);
}

#[test]
fn test_new_array_returns_to_idle() {
    let mut app = app();
    press(&mut app, KeyCode::Char(' '));
    let now = Instant::now();
    for i in 0..5 {
        app.tick(now + Duration::from_millis(100 * i));
    }

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.player().playback(), PlaybackState::Idle);
    assert_eq!(app.player().instrumentation().comparisons, 0);
    assert!(app.player().state().sorted.is_empty());
    assert_eq!(app.player().state().len(), 8);
}

#[test]
fn test_idle_clock_stays_at_zero() {
    let mut app = app();
    std::thread::sleep(Duration::from_millis(50));
    let mut terminal = create_test_terminal();
    terminal.draw(|f| app.draw(f)).unwrap();
    assert!(buffer_contains(terminal.backend().buffer(), "IDLE"));
    assert!(buffer_contains(terminal.backend().buffer(), "time 0ms"));

    press(&mut app, KeyCode::Char(' '));
    app.tick(Instant::now());
    press(&mut app, KeyCode::Char('n'));
    std::thread::sleep(Duration::from_millis(50));
    terminal.draw(|f| app.draw(f)).unwrap();
    assert_eq!(app.player().playback(), PlaybackState::Idle);
    assert!(buffer_contains(terminal.backend().buffer(), "time 0ms"));
}

#[test]
fn test_restart_replays_current_array() {
    let mut app = app();
    let before = app.player().state().array.clone();
    press(&mut app, KeyCode::Char('r'));
    assert_eq!(app.player().playback(), PlaybackState::Playing);
    assert_eq!(app.player().state().array, before);
}

#[test]
fn test_size_keys_clamp_and_regenerate() {
    let mut app = app();
    press(&mut app, KeyCode::Char('['));
    assert_eq!(app.size(), MIN_ARRAY_SIZE);

    press(&mut app, KeyCode::Char(']'));
    assert_eq!(app.size(), 16);
    assert_eq!(app.player().state().len(), 16);
    assert_eq!(app.player().playback(), PlaybackState::Idle);

    let config = Config::default().with_size(MAX_ARRAY_SIZE);
    let mut app = App::new(config, Rect::new(0, 0, 80, 24)).unwrap();
    press(&mut app, KeyCode::Char(']'));
    assert_eq!(app.size(), MAX_ARRAY_SIZE);
}

#[test]
fn test_speed_keys_clamp() {
    let mut app = app();
    press(&mut app, KeyCode::Char('+'));
    assert_eq!(app.player().speed(), 1.25);

    for _ in 0..20 {
        press(&mut app, KeyCode::Char('='));
    }
    assert_eq!(app.player().speed(), MAX_SPEED);

    for _ in 0..20 {
        press(&mut app, KeyCode::Char('-'));
    }
    assert_eq!(app.player().speed(), MIN_SPEED);
}

#[test]
fn test_autoplay_starts_playing() {
    let config = seeded_config().with_autoplay(true);
    let app = App::new(config, Rect::new(0, 0, 80, 24)).unwrap();
    assert_eq!(app.player().playback(), PlaybackState::Playing);
}

#[test]
fn test_same_seed_same_array() {
    let a = app();
    let b = app();
    assert_eq!(a.player().state().array, b.player().state().array);
}

#[test]
fn test_quit_keys() {
    let mut app = app();
    assert!(!app.should_quit());
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit());

    let mut app = self::app();
    app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit());
}

#[test]
fn test_rebound_key_from_config() {
    let config = Config::from_toml_str("[keys]\nstep = \".\"\n")
        .unwrap()
        .with_seed(Some(7));
    let mut app = App::new(config, Rect::new(0, 0, 80, 24)).unwrap();

    press(&mut app, KeyCode::Char('s'));
    assert_eq!(app.player().playback(), PlaybackState::Idle);

    press(&mut app, KeyCode::Char('.'));
    assert_eq!(app.player().playback(), PlaybackState::Armed);
}

#[test]
fn test_canvas_follows_terminal_size() {
    let mut app = app();
    let mut terminal = create_test_terminal();
    terminal.draw(|f| app.draw(f)).unwrap();
    assert_eq!(app.player().renderer().area(), Rect::new(0, 2, 80, 20));

    let mut terminal = create_test_terminal_sized(100, 30);
    terminal.draw(|f| app.draw(f)).unwrap();
    assert_eq!(app.player().renderer().area(), Rect::new(0, 2, 100, 26));
    assert!(buffer_contains(terminal.backend().buffer(), "█"));
}

#[test]
fn test_completion_events_are_counted() {
    let mut app = app();
    let tx = app.event_sender();
    tx.send(AppEvent::SortFinished).unwrap();
    app.drain_events();
    assert_eq!(app.completed_runs(), 1);

    app.handle_action(Action::Quit);
    assert!(app.should_quit());
}
