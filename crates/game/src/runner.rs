//! Async driver: waits on the next deadline or the next player action,
//! whichever comes first.
//!
//! ```text
//! rendering layer ──Action──▶ Channel ──▶ run() ──Snapshot──▶ PubSubChannel ──▶ rendering layer
//!                                            ▲
//!                                  Timer::at(next_deadline)
//! ```
//!
//! This is the only place in the engine that waits on a clock. The host
//! supplies the embassy-time driver (a HAL on hardware, the `std` driver on
//! the desktop).

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;
use embassy_sync::pubsub::PubSubChannel;
use embassy_time::{Instant, Timer};
use platform::{FrameSource, PromptSink};
use rand::RngCore;

use crate::error::GameError;
use crate::mode::Mode;
use crate::session::Session;
use crate::snapshot::Snapshot;

/// Depth of the action queue used by the desktop trainer.
pub const ACTION_QUEUE_DEPTH: usize = 8;

/// Snapshots kept per subscriber before the oldest is overwritten.
pub const SNAPSHOT_QUEUE_DEPTH: usize = 16;

/// Subscribers a [`SnapshotChannel`] accepts.
pub const SNAPSHOT_SUBSCRIBERS: usize = 2;

/// Every published snapshot, in order, to each subscriber.
///
/// [`run`] publishes without waiting, so a subscriber more than
/// [`SNAPSHOT_QUEUE_DEPTH`] snapshots behind gets
/// `WaitResult::Lagged` instead of stalling the session. Subscribe before
/// the runner starts to see the initial snapshot.
pub type SnapshotChannel<M> =
    PubSubChannel<M, Snapshot, SNAPSHOT_QUEUE_DEPTH, SNAPSHOT_SUBSCRIBERS, 1>;

/// A player request, as sent by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// [`Session::start_game`]
    StartGame,
    /// [`Session::toggle_camera`]
    ToggleCamera,
    /// [`Session::set_mode`]
    SetMode(Mode),
    /// [`Session::start_detection`]
    StartDetection,
    /// [`Session::confirm_color`]
    ConfirmColor,
    /// [`Session::exit_game`]
    ExitGame,
    /// [`Session::advance_after_result`]
    AdvanceAfterResult(bool),
    /// Exit the game and stop [`run`]
    Shutdown,
}

impl Action {
    /// Short name for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StartGame => "start",
            Self::ToggleCamera => "toggle camera",
            Self::SetMode(_) => "set mode",
            Self::StartDetection => "start detection",
            Self::ConfirmColor => "confirm",
            Self::ExitGame => "exit",
            Self::AdvanceAfterResult(true) => "continue",
            Self::AdvanceAfterResult(false) => "quit",
            Self::Shutdown => "shutdown",
        }
    }
}

/// Apply one action to the session at `now`.
pub fn dispatch<C, P, R>(
    session: &mut Session<C, P, R>,
    action: Action,
    now: Instant,
) -> Result<(), GameError>
where
    C: FrameSource,
    P: PromptSink,
    R: RngCore,
{
    match action {
        Action::StartGame => session.start_game(now),
        Action::ToggleCamera => {
            session.toggle_camera();
            Ok(())
        }
        Action::SetMode(mode) => {
            session.set_mode(mode);
            Ok(())
        }
        Action::StartDetection => session.start_detection(now),
        Action::ConfirmColor => session.confirm_color(now),
        Action::ExitGame | Action::Shutdown => {
            session.exit_game();
            Ok(())
        }
        Action::AdvanceAfterResult(accepted) => session.advance_after_result(accepted, now),
    }
}

/// Drive `session` until an [`Action::Shutdown`] arrives, then hand it back.
///
/// A snapshot is published after start-up and after every step. Rejected
/// actions are logged and otherwise dropped; the rejection notice, if any,
/// is part of the next snapshot.
pub async fn run<C, P, R, M, S, const N: usize>(
    mut session: Session<C, P, R>,
    actions: Receiver<'_, M, Action, N>,
    snapshots: &SnapshotChannel<S>,
) -> Session<C, P, R>
where
    C: FrameSource,
    P: PromptSink,
    R: RngCore,
    M: RawMutex,
    S: RawMutex,
{
    let publisher = snapshots.immediate_publisher();
    tracing::info!("session runner started");
    publisher.publish_immediate(session.snapshot());

    loop {
        let action = match session.next_deadline() {
            Some(deadline) => match select(Timer::at(deadline), actions.receive()).await {
                Either::First(()) => None,
                Either::Second(action) => Some(action),
            },
            None => Some(actions.receive().await),
        };
        let now = Instant::now();

        match action {
            None => session.tick(now),
            Some(action) => {
                tracing::debug!(action = action.as_str(), phase = session.phase().as_str(), "action");
                if let Err(e) = dispatch(&mut session, action, now) {
                    tracing::debug!(action = action.as_str(), error = %e, "action rejected");
                }
                if action == Action::Shutdown {
                    publisher.publish_immediate(session.snapshot());
                    tracing::info!("session runner stopped");
                    return session;
                }
            }
        }
        publisher.publish_immediate(session.snapshot());
    }
}
