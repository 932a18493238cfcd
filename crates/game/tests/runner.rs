//! Async runner tests with real timers via the embassy-time `std` driver.
//!
//! Timings are shrunk to a few milliseconds so a round finishes in about a
//! second of wall-clock time.
//!
//! Run with: cargo test -p game --test runner

// Integration test file: expect/unwrap/panic are intentional test mechanisms.
#![allow(clippy::arithmetic_side_effects, clippy::indexing_slicing)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use embassy_futures::join::join;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::pubsub::{DynSubscriber, WaitResult};
use embassy_time::Duration;
use game::runner::{self, Action, SnapshotChannel, ACTION_QUEUE_DEPTH};
use game::{
    generate, Color, Difficulty, Display, GameConfig, Mode, Phase, Prompt, Session, Snapshot,
    Verdict,
};
use platform::mocks::{MockCamera, MockPrompts};
use platform::FrameSource;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn fast_config() -> GameConfig {
    GameConfig::default()
        .with_mode(Mode::Speed)
        .with_difficulty(Difficulty::new(Difficulty::FLOOR_MS))
        .with_countdown(3, Duration::from_millis(10))
        .with_symbol_gap(Duration::from_millis(5))
        .with_detection_window(3, Duration::from_millis(10))
}

async fn wait_for<F>(snapshots: &mut DynSubscriber<'_, Snapshot>, mut pred: F) -> Snapshot
where
    F: FnMut(&Snapshot) -> bool,
{
    loop {
        let snap = snapshots.next_message_pure().await;
        if pred(&snap) {
            return snap;
        }
    }
}

#[tokio::test]
async fn test_runner_drives_round_and_stops() {
    let actions: Channel<NoopRawMutex, Action, ACTION_QUEUE_DEPTH> = Channel::new();
    let snapshots: SnapshotChannel<NoopRawMutex> = SnapshotChannel::new();
    let mut screen = snapshots.dyn_subscriber().unwrap();
    let session = Session::new(
        fast_config(),
        MockCamera::with_size(4, 4),
        MockPrompts::new(),
        SmallRng::seed_from_u64(21),
    )
    .unwrap();

    let script = async {
        let first = screen.next_message_pure().await;
        assert_eq!(first.phase, Phase::Idle);

        actions.send(Action::StartGame).await;
        let awaiting = wait_for(&mut screen, |s| s.phase == Phase::AwaitingDetectionStart).await;
        assert_eq!(awaiting.progress.total, 3);
        assert_eq!(awaiting.display, game::Display::Blank);

        // black camera: the closed window reports unknown
        actions.send(Action::StartDetection).await;
        wait_for(&mut screen, |s| {
            s.phase == Phase::Detecting && s.countdown.is_none() && s.detected.is_some()
        })
        .await;

        actions.send(Action::ConfirmColor).await;
        let rejected = wait_for(&mut screen, |s| s.notice.is_some()).await;
        assert_eq!(rejected.notice, Some(Prompt::NoColorDetected));
        assert_eq!(rejected.detected, Some(Verdict::Unknown));
        assert_eq!(rejected.progress.done, 0);

        actions.send(Action::Shutdown).await;
    };

    let run = runner::run(session, actions.receiver(), &snapshots);
    let (session, ()) = tokio::time::timeout(std::time::Duration::from_secs(10), join(run, script))
        .await
        .expect("runner finished in time");

    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.input().is_empty());
    assert!(!session.camera().is_streaming());
    assert!(session
        .prompts()
        .spoken()
        .iter()
        .any(|s| s == "Show your cards"));
}

#[tokio::test]
async fn test_runner_rejects_busy_actions_without_stalling() {
    let actions: Channel<NoopRawMutex, Action, ACTION_QUEUE_DEPTH> = Channel::new();
    let snapshots: SnapshotChannel<NoopRawMutex> = SnapshotChannel::new();
    let mut screen = snapshots.dyn_subscriber().unwrap();
    let session = Session::new(
        fast_config(),
        MockCamera::with_size(4, 4),
        MockPrompts::new(),
        SmallRng::seed_from_u64(22),
    )
    .unwrap();

    let script = async {
        actions.send(Action::StartGame).await;
        // ignored while counting down
        actions.send(Action::ConfirmColor).await;
        actions.send(Action::StartGame).await;
        actions.send(Action::SetMode(Mode::Length)).await;
        let snap = wait_for(&mut screen, |s| s.phase == Phase::AwaitingDetectionStart).await;
        assert_eq!(snap.mode, Mode::Length);
        assert_eq!(snap.progress.total, 5);
        actions.send(Action::Shutdown).await;
    };

    let run = runner::run(session, actions.receiver(), &snapshots);
    let (session, ()) = tokio::time::timeout(std::time::Duration::from_secs(10), join(run, script))
        .await
        .expect("runner finished in time");
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.state().mode, Mode::Length);
}

#[tokio::test]
async fn test_subscriber_sees_every_flash_in_order() {
    let seed = 23;
    let config = fast_config().with_symbol_gap(Duration::from_millis(50));
    let expected = generate(config.mode, &mut SmallRng::seed_from_u64(seed));

    let actions: Channel<NoopRawMutex, Action, ACTION_QUEUE_DEPTH> = Channel::new();
    let snapshots: SnapshotChannel<NoopRawMutex> = SnapshotChannel::new();
    let mut screen = snapshots.dyn_subscriber().unwrap();
    let session = Session::new(
        config,
        MockCamera::with_size(4, 4),
        MockPrompts::new(),
        SmallRng::seed_from_u64(seed),
    )
    .unwrap();

    let script = async {
        actions.send(Action::StartGame).await;
        let mut flashes: Vec<Color> = Vec::new();
        let mut shown = Display::Blank;
        loop {
            let snap = match screen.next_message().await {
                WaitResult::Message(snap) => snap,
                WaitResult::Lagged(n) => panic!("missed {n} snapshots"),
            };
            if let (Display::Color(color), true) = (snap.display, snap.display != shown) {
                flashes.push(color);
            }
            shown = snap.display;
            if snap.phase == Phase::AwaitingDetectionStart {
                break;
            }
        }
        actions.send(Action::Shutdown).await;
        flashes
    };

    let run = runner::run(session, actions.receiver(), &snapshots);
    let (_, flashes) = tokio::time::timeout(std::time::Duration::from_secs(10), join(run, script))
        .await
        .expect("runner finished in time");
    assert_eq!(flashes.as_slice(), expected.as_slice());
}
