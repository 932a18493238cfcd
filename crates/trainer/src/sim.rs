//! Simulated camera and player.
//!
//! The player watches published snapshots the way a person watches the
//! screen: it memorises the flashed tokens, then holds cards up to the
//! camera and confirms them. It subscribes to every snapshot, so two
//! publishes in a row never hide a flash. The card "in hand" is shared with the camera,
//! which paints it into every captured frame.

use std::cell::Cell;
use std::rc::Rc;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;
use embassy_sync::pubsub::{DynSubscriber, WaitResult};
use game::{Action, Color, Display, Outcome, Phase, Snapshot, Verdict};
use platform::config::{FRAME_HEIGHT, FRAME_WIDTH};
use platform::{CaptureError, Facing, Frame, FrameSource, FRAME_BYTES};
use rand::Rng;

/// The card currently held up to the camera, if any.
pub type Hand = Rc<Cell<Option<Color>>>;

const BACKGROUND: [u8; 3] = [20, 20, 28];
const GLARE: [u8; 3] = [255, 255, 250];
const GLARE_EVERY: usize = 97;

/// Printed card colours: off-palette on purpose, like a real camera sees them.
fn card_rgb(color: Color) -> [u8; 3] {
    match color {
        Color::Red => [190, 40, 45],
        Color::Green => [45, 170, 60],
        Color::Blue => [40, 60, 190],
    }
}

/// Camera that films whatever card is in the shared [`Hand`].
pub struct SimCamera {
    hand: Hand,
    pixels: Vec<u8>,
    streaming: bool,
}

impl SimCamera {
    pub fn new(hand: Hand) -> Self {
        Self {
            hand,
            pixels: vec![0; FRAME_BYTES],
            streaming: false,
        }
    }

    /// Card in the middle of the frame, dark background, specks of glare.
    #[allow(clippy::arithmetic_side_effects)]
    fn paint(&mut self) {
        let card = self.hand.get().map(card_rgb);
        let xs = FRAME_WIDTH / 5..FRAME_WIDTH * 4 / 5;
        let ys = FRAME_HEIGHT / 5..FRAME_HEIGHT * 4 / 5;
        for (i, px) in self.pixels.chunks_exact_mut(4).enumerate() {
            let (x, y) = (i % FRAME_WIDTH, i / FRAME_WIDTH);
            let [r, g, b] = match card {
                _ if i % GLARE_EVERY == 0 => GLARE,
                Some(rgb) if xs.contains(&x) && ys.contains(&y) => rgb,
                _ => BACKGROUND,
            };
            px.copy_from_slice(&[r, g, b, 255]);
        }
    }
}

impl FrameSource for SimCamera {
    fn acquire(&mut self, facing: Facing) -> Result<(), CaptureError> {
        let rear = facing == Facing::Environment;
        tracing::debug!(rear, "sim camera: stream started");
        self.streaming = true;
        Ok(())
    }

    fn release(&mut self) {
        if self.streaming {
            tracing::debug!("sim camera: stream stopped");
        }
        self.streaming = false;
    }

    fn is_streaming(&self) -> bool {
        self.streaming
    }

    fn capture(&mut self) -> Result<Frame<'_>, CaptureError> {
        if !self.streaming {
            return Err(CaptureError::NoFrame);
        }
        self.paint();
        Frame::new(FRAME_WIDTH as u32, FRAME_HEIGHT as u32, &self.pixels)
    }
}

/// What the simulated player is asked to do.
#[derive(Debug, Clone, Copy)]
pub struct PlayerPlan {
    pub rounds: u32,
    /// Percent chance of holding up the wrong card for a token
    pub mistake_percent: u8,
    /// Press "start detection" after playback (otherwise the session opens it)
    pub manual_detection: bool,
}

/// Tally of a simulated run.
#[derive(Debug, Default, Clone, Copy)]
pub struct Report {
    pub rounds: u32,
    pub wins: u32,
    pub losses: u32,
    /// Windows that closed on an unknown verdict and were re-sampled
    pub retries: u32,
    /// Flashed tokens memorised over all rounds
    pub flashes_seen: u32,
    pub level: u32,
    pub stars: u32,
    pub difficulty_ms: u32,
}

pub struct SimPlayer<R> {
    plan: PlayerPlan,
    hand: Hand,
    rng: R,
    memory: Vec<Color>,
    answer: Vec<Color>,
    report: Report,
}

impl<R: Rng> SimPlayer<R> {
    pub fn new(plan: PlayerPlan, hand: Hand, rng: R) -> Self {
        Self {
            plan,
            hand,
            rng,
            memory: Vec::new(),
            answer: Vec::new(),
            report: Report::default(),
        }
    }

    /// Play until the planned number of rounds is done, then shut the runner down.
    pub async fn play<M, const N: usize>(
        mut self,
        actions: Sender<'_, M, Action, N>,
        mut snapshots: DynSubscriber<'_, Snapshot>,
    ) -> Report
    where
        M: RawMutex,
    {
        let mut prev: Option<Snapshot> = None;
        loop {
            let snap = match snapshots.next_message().await {
                WaitResult::Message(snap) => snap,
                WaitResult::Lagged(missed) => {
                    tracing::warn!(missed, "player fell behind the screen");
                    continue;
                }
            };
            if let Some(action) = self.react(prev.as_ref(), &snap) {
                tracing::debug!(action = action.as_str(), "player");
                actions.send(action).await;
                if action == Action::Shutdown {
                    return self.report;
                }
            }
            prev = Some(snap);
        }
    }

    fn react(&mut self, prev: Option<&Snapshot>, snap: &Snapshot) -> Option<Action> {
        let entered = prev.map_or(true, |p| p.phase != snap.phase);
        match snap.phase {
            Phase::Idle => entered.then(|| self.next_round_or_stop(Action::StartGame)),
            Phase::PreCountdown => {
                if entered {
                    self.memory.clear();
                    self.hand.set(None);
                }
                None
            }
            Phase::Playback => {
                let changed = prev.map_or(true, |p| p.display != snap.display);
                if let (true, Display::Color(color)) = (changed, snap.display) {
                    self.memory.push(color);
                }
                None
            }
            Phase::AwaitingDetectionStart => {
                if !entered {
                    return None;
                }
                self.prepare_answer();
                self.hold_up(0);
                self.plan.manual_detection.then_some(Action::StartDetection)
            }
            Phase::Detecting => {
                self.hold_up(usize::from(snap.progress.done));
                let closed = snap.countdown.is_none() && prev.is_some_and(|p| p.countdown.is_some());
                if !closed {
                    return None;
                }
                match snap.detected {
                    Some(Verdict::Color(_)) => Some(Action::ConfirmColor),
                    _ => {
                        self.report.retries = self.report.retries.saturating_add(1);
                        Some(Action::StartDetection)
                    }
                }
            }
            Phase::Result => {
                if !entered {
                    return None;
                }
                self.hand.set(None);
                self.report.rounds = self.report.rounds.saturating_add(1);
                match snap.outcome {
                    Some(Outcome::Win) => self.report.wins = self.report.wins.saturating_add(1),
                    Some(Outcome::Lose) => self.report.losses = self.report.losses.saturating_add(1),
                    None => {}
                }
                self.report.level = snap.level;
                self.report.stars = snap.stars;
                self.report.difficulty_ms = snap.difficulty.get();
                Some(self.next_round_or_stop(Action::AdvanceAfterResult(true)))
            }
        }
    }

    fn next_round_or_stop(&self, next: Action) -> Action {
        if self.report.rounds >= self.plan.rounds {
            Action::Shutdown
        } else {
            next
        }
    }

    /// Recall the flashed sequence, slipping up now and then.
    fn prepare_answer(&mut self) {
        let percent = self.plan.mistake_percent;
        let rng = &mut self.rng;
        self.answer = self
            .memory
            .iter()
            .map(|&color| {
                if rng.gen_range(0..100) < percent {
                    confuse(color)
                } else {
                    color
                }
            })
            .collect();
        let seen = u32::try_from(self.memory.len()).unwrap_or(u32::MAX);
        self.report.flashes_seen = self.report.flashes_seen.saturating_add(seen);
        tracing::debug!(seen, "player memorised sequence");
    }

    fn hold_up(&self, step: usize) {
        self.hand.set(self.answer.get(step).copied());
    }
}

fn confuse(color: Color) -> Color {
    match color {
        Color::Red => Color::Blue,
        Color::Green => Color::Red,
        Color::Blue => Color::Green,
    }
}
