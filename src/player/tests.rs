use super::*;
use crate::playlist::{TrackSeed, TrackSource};
use std::time::Duration;

/// Records every command the controller issues, in order.
#[derive(Debug, Default)]
struct RecordingSink {
    log: Vec<SinkCall>,
}

#[derive(Debug, Clone, PartialEq)]
enum SinkCall {
    Load(TrackSource),
    Play,
    Pause,
    Seek(Duration),
    Volume(f32),
}

impl Sink for RecordingSink {
    fn load(&mut self, source: &TrackSource) {
        self.log.push(SinkCall::Load(source.clone()));
    }
    fn play(&mut self) {
        self.log.push(SinkCall::Play);
    }
    fn pause(&mut self) {
        self.log.push(SinkCall::Pause);
    }
    fn seek(&mut self, position: Duration) {
        self.log.push(SinkCall::Seek(position));
    }
    fn set_volume(&mut self, volume: f32) {
        self.log.push(SinkCall::Volume(volume));
    }
}

fn seeds(n: usize) -> Vec<TrackSeed> {
    (0..n)
        .map(|i| TrackSeed::remote(format!("track{i}"), format!("https://example.com/{i}.mp3")))
        .collect()
}

fn player_with(n: usize, sink: &mut RecordingSink) -> Player {
    let mut player = Player::new(false, RepeatMode::Off, 1.0);
    player.replace(seeds(n), sink);
    player
}

#[test]
fn replace_loads_track_zero_without_playing() {
    let mut sink = RecordingSink::default();
    let player = player_with(3, &mut sink);

    assert_eq!(player.playlist.len(), 3);
    assert_eq!(player.playlist.current(), Some(0));
    assert!(!player.playing);
    assert_eq!(sink.log.len(), 1);
    assert!(matches!(sink.log[0], SinkCall::Load(_)));
}

#[test]
fn select_out_of_range_is_an_error_and_touches_nothing() {
    let mut sink = RecordingSink::default();
    let mut player = player_with(2, &mut sink);
    sink.log.clear();

    assert!(player.select(2, &mut sink).is_err());
    assert_eq!(player.playlist.current(), Some(0));
    assert!(sink.log.is_empty());
}

#[test]
fn repeat_one_always_reselects_the_same_index() {
    for start in 0..4 {
        let mut sink = RecordingSink::default();
        let mut player = player_with(4, &mut sink);
        player.repeat = RepeatMode::One;
        player.select(start, &mut sink).unwrap();

        for _ in 0..3 {
            player.advance(&mut sink);
            assert_eq!(player.playlist.current(), Some(start));
            assert!(player.playing);
        }
    }
}

#[test]
fn shuffle_never_picks_the_current_index_again() {
    let mut sink = RecordingSink::default();
    let mut player = player_with(5, &mut sink);
    player.shuffle = true;
    player.select(2, &mut sink).unwrap();

    for _ in 0..100 {
        let before = player.playlist.current();
        player.advance(&mut sink);
        assert_ne!(player.playlist.current(), before);
    }
}

#[test]
fn shuffle_with_a_single_track_replays_it() {
    let mut sink = RecordingSink::default();
    let mut player = player_with(1, &mut sink);
    player.shuffle = true;

    player.advance(&mut sink);
    assert_eq!(player.playlist.current(), Some(0));
    assert!(player.playing);
}

#[test]
fn advance_past_end_with_repeat_off_parks_on_zero_paused() {
    let mut sink = RecordingSink::default();
    let mut player = player_with(3, &mut sink);
    player.select(2, &mut sink).unwrap();
    player.play(&mut sink);
    sink.log.clear();

    player.advance(&mut sink);

    assert_eq!(player.playlist.current(), Some(0));
    assert!(!player.playing);
    // Transport is stopped first, then track 0 is loaded, never played.
    assert_eq!(
        sink.log,
        vec![
            SinkCall::Pause,
            SinkCall::Load(TrackSource::Remote {
                url: "https://example.com/0.mp3".into()
            }),
        ]
    );
}

#[test]
fn advance_past_end_with_repeat_all_wraps_and_plays() {
    let mut sink = RecordingSink::default();
    let mut player = player_with(3, &mut sink);
    player.repeat = RepeatMode::All;
    player.select(2, &mut sink).unwrap();
    sink.log.clear();

    player.advance(&mut sink);

    assert_eq!(player.playlist.current(), Some(0));
    assert!(player.playing);
    assert!(matches!(sink.log[0], SinkCall::Load(_)));
    assert_eq!(sink.log[1], SinkCall::Play);
}

#[test]
fn retreat_from_zero_wraps_to_last() {
    let mut sink = RecordingSink::default();
    let mut player = player_with(4, &mut sink);
    player.select(0, &mut sink).unwrap();

    player.retreat(&mut sink);
    assert_eq!(player.playlist.current(), Some(3));
    assert!(player.playing);
}

#[test]
fn retreat_wraps_even_under_repeat_one() {
    let mut sink = RecordingSink::default();
    let mut player = player_with(3, &mut sink);
    player.repeat = RepeatMode::One;
    player.select(0, &mut sink).unwrap();

    player.retreat(&mut sink);
    assert_eq!(player.playlist.current(), Some(2));
}

#[test]
fn operations_on_an_empty_playlist_are_noops() {
    let mut sink = RecordingSink::default();
    let mut player = Player::new(false, RepeatMode::Off, 1.0);
    player.replace(Vec::new(), &mut sink);

    player.play(&mut sink);
    player.toggle(&mut sink);
    player.advance(&mut sink);
    player.retreat(&mut sink);
    player.seek_relative(5, &mut sink);
    player.seek_to_fraction(0.5, &mut sink);

    assert_eq!(player.playlist.current(), None);
    assert!(!player.playing);
    assert!(sink.log.is_empty());
}

#[test]
fn local_load_walkthrough_stops_back_at_zero() {
    // Load 3 tracks, play through them sequentially with repeat off.
    let mut sink = RecordingSink::default();
    let mut player = Player::new(false, RepeatMode::Off, 1.0);

    player.replace(seeds(3), &mut sink);
    assert_eq!(player.playlist.len(), 3);
    assert_eq!(player.playlist.current(), Some(0));

    player.advance(&mut sink);
    player.advance(&mut sink);
    assert_eq!(player.playlist.current(), Some(2));
    assert!(player.playing);

    player.advance(&mut sink);
    assert_eq!(player.playlist.current(), Some(0));
    assert!(!player.playing);
}

#[test]
fn repeat_mode_cycles_three_states() {
    let mut player = Player::new(false, RepeatMode::Off, 1.0);
    player.cycle_repeat();
    assert_eq!(player.repeat, RepeatMode::All);
    player.cycle_repeat();
    assert_eq!(player.repeat, RepeatMode::One);
    player.cycle_repeat();
    assert_eq!(player.repeat, RepeatMode::Off);
}

#[test]
fn completed_event_advances_like_natural_end() {
    let mut sink = RecordingSink::default();
    let mut player = player_with(2, &mut sink);
    player.play(&mut sink);

    player.handle_sink_event(SinkEvent::Completed, &mut sink);
    assert_eq!(player.playlist.current(), Some(1));
    assert!(player.playing);
}

#[test]
fn failed_event_stops_transport_and_surfaces_a_message() {
    let mut sink = RecordingSink::default();
    let mut player = player_with(2, &mut sink);
    player.play(&mut sink);
    sink.log.clear();

    let message = player.handle_sink_event(SinkEvent::Failed("decode error".into()), &mut sink);
    assert!(message.unwrap().contains("decode error"));
    assert!(!player.playing);
    // No auto-advance: nothing new was loaded.
    assert!(sink.log.is_empty());
}

#[test]
fn duration_event_fills_progress_and_patches_the_current_track() {
    let mut sink = RecordingSink::default();
    let mut player = player_with(2, &mut sink);

    player.handle_sink_event(SinkEvent::DurationKnown(Duration::from_secs(180)), &mut sink);
    assert_eq!(player.duration, Some(Duration::from_secs(180)));
    assert_eq!(
        player.playlist.tracks()[0].duration,
        Some(Duration::from_secs(180))
    );
}

#[test]
fn select_resets_progress_until_the_sink_reports_again() {
    let mut sink = RecordingSink::default();
    let mut player = player_with(2, &mut sink);
    player.handle_sink_event(SinkEvent::DurationKnown(Duration::from_secs(100)), &mut sink);
    player.handle_sink_event(SinkEvent::Position(Duration::from_secs(40)), &mut sink);

    player.select(1, &mut sink).unwrap();
    assert_eq!(player.position, Duration::ZERO);
    assert_eq!(player.duration, None);
}

#[test]
fn seek_to_fraction_needs_a_known_duration() {
    let mut sink = RecordingSink::default();
    let mut player = player_with(1, &mut sink);
    sink.log.clear();

    player.seek_to_fraction(0.5, &mut sink);
    assert!(sink.log.is_empty());

    player.handle_sink_event(SinkEvent::DurationKnown(Duration::from_secs(200)), &mut sink);
    player.seek_to_fraction(0.5, &mut sink);
    assert_eq!(sink.log, vec![SinkCall::Seek(Duration::from_secs(100))]);
    assert_eq!(player.position, Duration::from_secs(100));
}

#[test]
fn seek_relative_clamps_to_track_bounds() {
    let mut sink = RecordingSink::default();
    let mut player = player_with(1, &mut sink);
    player.handle_sink_event(SinkEvent::DurationKnown(Duration::from_secs(60)), &mut sink);
    player.handle_sink_event(SinkEvent::Position(Duration::from_secs(5)), &mut sink);
    sink.log.clear();

    player.seek_relative(-30, &mut sink);
    assert_eq!(sink.log, vec![SinkCall::Seek(Duration::ZERO)]);

    player.seek_relative(500, &mut sink);
    assert_eq!(player.position, Duration::from_secs(60));
}

#[test]
fn volume_is_clamped_to_unit_range() {
    let mut sink = RecordingSink::default();
    let mut player = player_with(1, &mut sink);
    sink.log.clear();

    player.set_volume(1.7, &mut sink);
    assert_eq!(player.volume(), 1.0);
    player.adjust_volume(-0.3, &mut sink);
    assert!((player.volume() - 0.7).abs() < f32::EPSILON);
    player.adjust_volume(-2.0, &mut sink);
    assert_eq!(player.volume(), 0.0);
}
