use super::container::*;
use super::events::*;
use crate::control::volume::{Volume, VolumeLevel};
use crate::types::PlaybackState;

fn snapshot() -> PlayerSnapshot {
    PlayerSnapshot::initial("http://a", 3, Volume::new(0.8))
}

#[test]
fn test_initial_snapshot() {
    let s = snapshot();
    assert_eq!(s.state, PlaybackState::Idle);
    assert_eq!(s.current_index, 0);
    assert_eq!(s.endpoint_count, 3);
    assert!(!s.is_muted);
    assert_eq!(s.primary_action(), PrimaryAction::Play);

    let silent = PlayerSnapshot::initial("http://a", 1, Volume::MIN);
    assert!(silent.is_muted);
    assert_eq!(silent.volume_level(), VolumeLevel::Muted);
}

#[test]
fn test_primary_action_priority() {
    let mut s = snapshot();

    s.is_playing = true;
    assert_eq!(s.primary_action(), PrimaryAction::Pause);

    s.is_playing = false;
    s.has_error = true;
    assert_eq!(s.primary_action(), PrimaryAction::Retry);

    // loading wins over everything else
    s.is_loading = true;
    assert_eq!(s.primary_action(), PrimaryAction::Connecting);
}

#[test]
fn test_volume_level() {
    let mut s = snapshot();
    assert_eq!(s.volume_level(), VolumeLevel::High);

    s.volume = Volume::new(0.2);
    assert_eq!(s.volume_level(), VolumeLevel::Low);

    s.is_muted = true;
    assert_eq!(s.volume_level(), VolumeLevel::Muted);
}

#[tokio::test]
async fn test_state_update() {
    let container = StateContainer::new(snapshot());

    container.update(|s| s.current_index = 2);
    assert_eq!(container.get().current_index, 2);
}

#[tokio::test]
async fn test_state_subscription() {
    let container = StateContainer::new(snapshot());
    let mut rx = container.subscribe();

    assert_eq!(rx.borrow().state, PlaybackState::Idle);

    container.update(|s| s.state = PlaybackState::Loading);

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().state, PlaybackState::Loading);
}

#[tokio::test]
async fn test_unchanged_update_does_not_notify() {
    let container = StateContainer::new(snapshot());
    let mut rx = container.subscribe();

    container.update(|s| s.current_index = 0);
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
async fn test_event_bus() {
    let bus = EventBus::default();
    let mut rx = bus.subscribe();
    assert_eq!(bus.subscriber_count(), 1);

    bus.emit(PlayerEvent::VolumeChanged { volume: 0.5 });

    let event = rx.recv().await.unwrap();
    if let PlayerEvent::VolumeChanged { volume } = event {
        assert!((volume - 0.5).abs() < f32::EPSILON);
    } else {
        panic!("Wrong event type");
    }
}

#[tokio::test]
async fn test_event_filter() {
    let bus = EventBus::new(16);
    let mut filter = EventFilter::playback_events(&bus);

    // Emit non-playback event
    bus.emit(PlayerEvent::MuteChanged { muted: true });
    // Emit playback event
    bus.emit(PlayerEvent::StateChanged {
        old: PlaybackState::Idle,
        new: PlaybackState::Loading,
    });

    let event = filter.recv().await.unwrap();
    assert!(matches!(event, PlayerEvent::StateChanged { .. }));
}

#[tokio::test]
async fn test_error_filter() {
    let bus = EventBus::new(16);
    let mut filter = EventFilter::error_events(&bus);

    bus.emit(PlayerEvent::VolumeChanged { volume: 0.1 });
    bus.emit(PlayerEvent::ControlFailed {
        operation: "pause",
        message: "gone".to_string(),
    });

    let event = filter.recv().await.unwrap();
    assert!(matches!(
        event,
        PlayerEvent::ControlFailed {
            operation: "pause",
            ..
        }
    ));
}

#[tokio::test]
async fn test_filter_ends_when_bus_dropped() {
    let bus = EventBus::new(4);
    let mut filter = EventFilter::volume_events(&bus);
    drop(bus);

    assert!(filter.recv().await.is_none());
}
