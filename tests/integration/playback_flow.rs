//! Player driven end to end over the real sorter

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use mergeviz::viz::BASE_INTERVAL;
use mergeviz::{merge_sort, Active, PlaybackState, Player, SetupError, Step, VizState};

use super::common::recording::RecordingRenderer;

fn player_for(values: &[i64]) -> (Player<RecordingRenderer>, Rc<Cell<u32>>) {
    let fired = Rc::new(Cell::new(0));
    let counter = fired.clone();
    let player = Player::new(
        RecordingRenderer::new(),
        VizState::new(values.to_vec()),
        move || counter.set(counter.get() + 1),
    )
    .unwrap();
    (player, fired)
}

#[test]
fn test_broken_surface_fails_construction() {
    let result = Player::new(RecordingRenderer::broken(), VizState::new(vec![1]), || {});
    assert!(matches!(result, Err(SetupError::EmptySurface { .. })));
}

#[test]
fn test_stepping_reference_input_draws_every_step() {
    let (mut player, fired) = player_for(&[5, 3, 8, 1]);
    player.set_steps(merge_sort(&[5, 3, 8, 1]));

    // Initial draw plus the re-arm redraw
    assert_eq!(player.renderer().frames.len(), 2);

    for _ in 0..26 {
        player.step_once();
    }

    assert_eq!(player.playback(), PlaybackState::Finished);
    assert_eq!(fired.get(), 1);
    assert_eq!(player.state().array, vec![1, 3, 5, 8]);
    assert_eq!(player.state().sorted.len(), 4);
    assert_eq!(player.instrumentation().comparisons, 5);
    assert_eq!(player.instrumentation().writes, 8);
    assert!(player.instrumentation().is_finished());
    assert_eq!(player.renderer().frames.len(), 2 + 26);

    // Further steps do nothing once finished
    player.step_once();
    assert_eq!(fired.get(), 1);
    assert_eq!(player.renderer().frames.len(), 28);
}

#[test]
fn test_drawn_frames_show_compare_then_write() {
    let (mut player, _) = player_for(&[5, 3]);
    player.set_steps(merge_sort(&[5, 3]));
    for _ in 0..4 {
        player.step_once();
    }

    let frames = &player.renderer().frames;
    // frames[0] initial, [1] arm, then MarkSorted(0), MarkSorted(1), Compare, Write
    assert_eq!(frames[4].active, Active::Pair(0, 1));
    assert_eq!(frames[5].active, Active::Single(0));
    assert_eq!(frames[5].array, vec![3, 3]);
}

#[test]
fn test_timed_playback_runs_to_completion() {
    let values = [9, 2, 7, 4, 4, 1, 8, 3];
    let (mut player, fired) = player_for(&values);
    player.set_speed(2.0);
    player.set_steps(merge_sort(&values));
    player.toggle_play();

    let interval = player.interval();
    let expected = (BASE_INTERVAL / 2).as_secs_f64();
    assert!((interval.as_secs_f64() - expected).abs() < 1e-6);

    let mut now = Instant::now();
    let mut pulls = 0;
    while player.playback() == PlaybackState::Playing {
        // Half-interval ticks are skipped
        assert!(player.tick(now));
        assert!(!player.tick(now + interval / 2));
        now += interval;
        pulls += 1;
        assert!(pulls < 1_000, "playback never finished");
    }

    assert_eq!(fired.get(), 1);
    assert_eq!(player.state().array, vec![1, 2, 3, 4, 4, 7, 8, 9]);
    let expected_events = merge_sort(&values).count();
    assert_eq!(pulls, expected_events);
}

#[test]
fn test_pause_holds_position() {
    let (mut player, _) = player_for(&[3, 1, 2]);
    player.set_steps(merge_sort(&[3, 1, 2]));
    player.toggle_play();

    let now = Instant::now();
    assert!(player.tick(now));
    player.toggle_play();
    assert_eq!(player.playback(), PlaybackState::Paused);

    let frames = player.renderer().frames.len();
    assert!(!player.tick(now + Duration::from_secs(5)));
    assert_eq!(player.renderer().frames.len(), frames);

    // Manual stepping still works while paused
    player.step_once();
    assert_eq!(player.renderer().frames.len(), frames + 1);
    assert_eq!(player.playback(), PlaybackState::Paused);
}

#[test]
fn test_rearming_mid_run_restarts_cleanly() {
    let values = [4, 3, 2, 1];
    let (mut player, fired) = player_for(&values);
    player.set_steps(merge_sort(&values));
    for _ in 0..10 {
        player.step_once();
    }
    assert!(player.instrumentation().comparisons > 0);

    // New sequence over the partially sorted array
    let current = player.state().array.clone();
    player.set_steps(merge_sort(&current));
    assert_eq!(player.playback(), PlaybackState::Armed);
    assert_eq!(player.instrumentation().comparisons, 0);
    assert!(player.state().sorted.is_empty());
    assert_eq!(player.state().active, Active::None);

    for _ in 0..100 {
        player.step_once();
    }
    assert_eq!(fired.get(), 1);
    assert_eq!(player.state().array, vec![1, 2, 3, 4]);
}

#[test]
fn test_out_of_range_sequence_is_tolerated() {
    let (mut player, fired) = player_for(&[1, 2]);
    player.set_steps(vec![
        Step::Compare { i: 0, j: 5 },
        Step::Write { index: 1, value: 7 },
        Step::Done,
    ]);
    for _ in 0..3 {
        player.step_once();
    }

    assert_eq!(player.state().array, vec![1, 7]);
    assert_eq!(player.instrumentation().comparisons, 0);
    assert_eq!(player.instrumentation().writes, 1);
    assert_eq!(fired.get(), 1);
}
