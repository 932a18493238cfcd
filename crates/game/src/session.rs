//! The game session: one owner for every piece of round state.
//!
//! ```text
//!          start                 countdown done          playback done
//!  Idle ─────────────▶ PreCountdown ───────────▶ Playback ───────────▶ AwaitingDetectionStart
//!   ▲                       ▲                                                  │ start_detection
//!   │ exit (any phase)      │ continue                                         ▼ (or auto delay)
//!   └──────────────────── Result ◀──────── input full ◀──── confirm ◀──── Detecting ◀─┐
//!                                                              │ input not full        │
//!                                                              └───────────────────────┘
//! ```
//!
//! Player actions are plain method calls that return immediately. Timed
//! behaviour lives in a single process slot that [`Session::tick`]
//! advances; starting a new process overwrites the previous one, so two
//! timers can never act on the session at once.

use embassy_time::Instant;
use platform::{Facing, FrameSource, PromptSink};
use rand::RngCore;

use crate::classifier;
use crate::config::{DetectionStart, GameConfig, ResultPolicy};
use crate::countdown::{Countdown, CountdownStep, CountdownTick};
use crate::detection::{DetectionWindow, WindowTick};
use crate::difficulty::effective_delay;
use crate::error::{ConfigError, GameError};
use crate::mode::Mode;
use crate::palette::{Color, Verdict};
use crate::playback::{PlaybackScheduler, PlaybackStatus};
use crate::prompt::Prompt;
use crate::sequence::{self, Sequence};
use crate::snapshot::{Display, Progress, Snapshot};
use crate::state::{Outcome, Phase, SessionState};
use crate::timer::later;

/// The one timed process allowed to run.
#[derive(Debug, Default)]
enum Process {
    /// Waiting on the player only
    #[default]
    Idle,
    Countdown(Countdown),
    Playback(PlaybackScheduler),
    /// Open detection by itself at this instant
    AutoDetection(Instant),
    Detection(DetectionWindow),
    /// Start the next round by itself at this instant
    AutoContinue(Instant),
}

impl Process {
    fn deadline(&self) -> Option<Instant> {
        match self {
            Self::Idle => None,
            Self::Countdown(c) => Some(c.next_deadline()),
            Self::Playback(p) => p.next_deadline(),
            Self::AutoDetection(at) | Self::AutoContinue(at) => Some(*at),
            Self::Detection(w) => w.next_deadline(),
        }
    }
}

/// A running game bound to a camera, a prompt sink and a random source.
pub struct Session<C, P, R> {
    config: GameConfig,
    state: SessionState,
    camera: C,
    prompts: P,
    rng: R,
    camera_on: bool,
    pending_mode: Option<Mode>,
    target: Sequence,
    input: Sequence,
    process: Process,
    display: Display,
    detected: Option<Verdict>,
    outcome: Option<Outcome>,
    notice: Option<Prompt>,
}

impl<C, P, R> Session<C, P, R>
where
    C: FrameSource,
    P: PromptSink,
    R: RngCore,
{
    /// Create an idle session. The camera is not started until a round begins.
    pub fn new(config: GameConfig, camera: C, prompts: P, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut state = SessionState::new(config.mode);
        state.difficulty = config.difficulty;
        Ok(Self {
            state,
            camera_on: config.camera_on,
            config,
            camera,
            prompts,
            rng,
            pending_mode: None,
            target: Sequence::new(),
            input: Sequence::new(),
            process: Process::Idle,
            display: Display::Blank,
            detected: None,
            outcome: None,
            notice: None,
        })
    }

    // ── Player actions ──────────────────────────────────────────────────────

    /// Begin a round with a fresh countdown.
    ///
    /// Accepted from `Idle`, and as a restart while the round waits on the
    /// player (`AwaitingDetectionStart`, `Detecting`, `Result`). Ignored
    /// during the countdown and playback.
    pub fn start_game(&mut self, now: Instant) -> Result<(), GameError> {
        match self.state.phase {
            Phase::PreCountdown | Phase::Playback => Err(GameError::Busy(self.state.phase)),
            Phase::Idle | Phase::AwaitingDetectionStart | Phase::Detecting | Phase::Result => {
                self.begin_round(now);
                Ok(())
            }
        }
    }

    /// Flip the camera switch.
    ///
    /// Switching off releases the stream straight away and cancels the timers
    /// that lead to sampling: an open detection window or a pending automatic
    /// start. Countdown and playback keep running since they never touch the
    /// camera. Switching on restarts the stream if a round is in progress
    /// (from `Idle` it waits for the next round); a failure is logged and
    /// leaves the switch on with no frames.
    pub fn toggle_camera(&mut self) {
        self.camera_on = !self.camera_on;
        if self.camera_on {
            tracing::info!("camera on");
            if self.state.phase != Phase::Idle {
                self.acquire_camera();
            }
        } else {
            tracing::info!("camera off");
            self.camera.release();
            if matches!(self.process, Process::Detection(_) | Process::AutoDetection(_)) {
                self.process = Process::Idle;
                self.detected = None;
            }
        }
    }

    /// Choose the mode for the next sequence.
    ///
    /// Applied immediately unless a sequence is being shown or reproduced, in
    /// which case it waits for the next generated sequence.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.state.phase.has_active_sequence() {
            tracing::debug!(mode = mode.as_str(), "mode change deferred");
            self.pending_mode = Some(mode);
        } else {
            self.pending_mode = None;
            self.state.mode = mode;
        }
    }

    /// Open a detection window.
    ///
    /// Accepted after playback, and in `Detecting` once the previous window
    /// has closed (to sample again after an unusable verdict).
    pub fn start_detection(&mut self, now: Instant) -> Result<(), GameError> {
        match self.state.phase {
            Phase::AwaitingDetectionStart => {
                self.begin_detection(now);
                Ok(())
            }
            Phase::Detecting if matches!(self.process, Process::Detection(_)) => {
                Err(GameError::DetectionInProgress)
            }
            Phase::Detecting => {
                self.begin_detection(now);
                Ok(())
            }
            phase => Err(GameError::Busy(phase)),
        }
    }

    /// Commit the final verdict of the closed window as the next input token.
    ///
    /// An `Unknown` (or missing) verdict is rejected with
    /// [`GameError::NoColorDetected`]: input and phase stay as they are and
    /// the player is told to try again.
    pub fn confirm_color(&mut self, now: Instant) -> Result<(), GameError> {
        if self.state.phase != Phase::Detecting {
            return Err(GameError::Busy(self.state.phase));
        }
        if matches!(self.process, Process::Detection(_)) {
            return Err(GameError::DetectionInProgress);
        }
        let Some(color) = self.detected.and_then(Verdict::color) else {
            tracing::debug!(step = self.input.len(), "confirm rejected: no colour");
            self.notice = Some(Prompt::NoColorDetected);
            self.say(Prompt::NoColorDetected);
            return Err(GameError::NoColorDetected);
        };

        if self.input.push(color).is_err() {
            tracing::warn!("input already full");
        }
        self.detected = None;
        self.notice = None;
        tracing::info!(
            color = color.as_str(),
            step = self.input.len(),
            of = self.target.len(),
            "colour confirmed"
        );

        if self.input.len() >= self.target.len() {
            self.finish_round(now);
        } else {
            self.begin_detection(now);
        }
        Ok(())
    }

    /// Leave the game from any phase.
    ///
    /// Cancels the running timer, releases the camera and clears the round.
    /// Progression (level, stars, difficulty) is kept.
    pub fn exit_game(&mut self) {
        self.process = Process::Idle;
        self.camera.release();
        self.target.clear();
        self.input.clear();
        self.display = Display::Blank;
        self.detected = None;
        self.outcome = None;
        self.notice = None;
        if let Some(mode) = self.pending_mode.take() {
            self.state.mode = mode;
        }
        self.set_phase(Phase::Idle);
    }

    /// Answer the result screen: `true` plays another round, `false` exits.
    pub fn advance_after_result(&mut self, accepted: bool, now: Instant) -> Result<(), GameError> {
        if self.state.phase != Phase::Result {
            return Err(GameError::Busy(self.state.phase));
        }
        if accepted {
            self.begin_round(now);
        } else {
            self.exit_game();
        }
        Ok(())
    }

    // ── Scheduling ──────────────────────────────────────────────────────────

    /// When [`tick`](Self::tick) next has work to do. `None` means the session
    /// is waiting on the player.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.process.deadline()
    }

    /// Run the timed process up to `now`.
    pub fn tick(&mut self, now: Instant) {
        match core::mem::take(&mut self.process) {
            Process::Idle => {}
            Process::Countdown(mut countdown) => match countdown.advance(now) {
                CountdownTick::Pending => self.process = Process::Countdown(countdown),
                CountdownTick::Stepped(step) => {
                    self.show_countdown(step);
                    self.process = Process::Countdown(countdown);
                }
                CountdownTick::Finished => self.begin_playback(now),
            },
            Process::Playback(mut scheduler) => {
                let status = scheduler.advance(now);
                self.display = scheduler.displayed().map_or(Display::Blank, Display::Color);
                match status {
                    PlaybackStatus::Running => self.process = Process::Playback(scheduler),
                    PlaybackStatus::Finished => self.finish_playback(now),
                }
            }
            Process::AutoDetection(at) => {
                if now >= at {
                    self.begin_detection(now);
                } else {
                    self.process = Process::AutoDetection(at);
                }
            }
            Process::Detection(mut window) => {
                let camera = &mut self.camera;
                let camera_on = self.camera_on;
                match window.advance(now, || sample_camera(camera, camera_on)) {
                    WindowTick::Pending => self.process = Process::Detection(window),
                    WindowTick::Sampled(verdict) => {
                        self.detected = Some(verdict);
                        self.process = Process::Detection(window);
                    }
                    WindowTick::Closed(verdict) => {
                        tracing::debug!(verdict = verdict.as_str(), "detection window closed");
                        self.detected = Some(verdict);
                    }
                }
            }
            Process::AutoContinue(at) => {
                if now >= at {
                    self.begin_round(now);
                } else {
                    self.process = Process::AutoContinue(at);
                }
            }
        }
    }

    // ── Observation ─────────────────────────────────────────────────────────

    /// Everything the rendering layer needs.
    pub fn snapshot(&self) -> Snapshot {
        let countdown = match &self.process {
            Process::Countdown(c) => Some(c.remaining()),
            Process::Detection(w) => Some(w.remaining()),
            _ => None,
        };
        Snapshot {
            phase: self.state.phase,
            level: self.state.level,
            stars: self.state.stars,
            difficulty: self.state.difficulty,
            mode: self.state.mode,
            display: self.display,
            detected: self.detected,
            countdown,
            progress: self.progress(),
            outcome: self.outcome,
            camera_on: self.camera_on,
            notice: self.notice,
        }
    }

    /// Confirmed tokens out of the target length (0/0 without a sequence).
    pub fn progress(&self) -> Progress {
        Progress {
            done: u8::try_from(self.input.len()).unwrap_or(u8::MAX),
            total: u8::try_from(self.target.len()).unwrap_or(u8::MAX),
        }
    }

    /// Active phase.
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Progression fields.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Configuration the session was built with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Sequence being reproduced (empty outside a round).
    pub fn target(&self) -> &[Color] {
        self.target.as_slice()
    }

    /// Tokens confirmed so far this round.
    pub fn input(&self) -> &[Color] {
        self.input.as_slice()
    }

    /// Mode waiting to take effect at the next sequence.
    pub fn pending_mode(&self) -> Option<Mode> {
        self.pending_mode
    }

    /// Whether the camera switch is on.
    pub fn camera_on(&self) -> bool {
        self.camera_on
    }

    /// The camera device.
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// The camera device, mutably.
    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    /// The prompt sink.
    pub fn prompts(&self) -> &P {
        &self.prompts
    }

    // ── Transitions ─────────────────────────────────────────────────────────

    fn begin_round(&mut self, now: Instant) {
        self.process = Process::Idle;
        self.target.clear();
        self.input.clear();
        self.detected = None;
        self.outcome = None;
        self.notice = None;
        if self.camera_on && !self.camera.is_streaming() {
            self.acquire_camera();
        }

        let countdown = Countdown::start(now, self.config.countdown_from, self.config.countdown_tick);
        self.set_phase(Phase::PreCountdown);
        self.show_countdown(countdown.step());
        self.process = Process::Countdown(countdown);
    }

    fn begin_playback(&mut self, now: Instant) {
        if let Some(mode) = self.pending_mode.take() {
            tracing::debug!(mode = mode.as_str(), "deferred mode applied");
            self.state.mode = mode;
        }
        self.target = sequence::generate(self.state.mode, &mut self.rng);
        self.input.clear();

        let flash = effective_delay(self.state.difficulty, self.state.mode);
        let scheduler =
            PlaybackScheduler::start(self.target.clone(), flash, self.config.symbol_gap, now);
        self.display = scheduler.displayed().map_or(Display::Blank, Display::Color);
        self.set_phase(Phase::Playback);
        tracing::debug!(
            len = self.target.len(),
            flash_ms = flash.as_millis(),
            "playback started"
        );
        self.process = Process::Playback(scheduler);
    }

    fn finish_playback(&mut self, now: Instant) {
        self.display = Display::Blank;
        self.set_phase(Phase::AwaitingDetectionStart);
        self.say(Prompt::ShowCards);
        self.process = match self.config.detection_start {
            DetectionStart::Manual => Process::Idle,
            DetectionStart::Auto(delay) => Process::AutoDetection(later(now, delay)),
        };
    }

    fn begin_detection(&mut self, now: Instant) {
        self.detected = None;
        self.set_phase(Phase::Detecting);
        self.process = Process::Detection(DetectionWindow::start(
            now,
            self.config.detection_ticks,
            self.config.detection_tick,
        ));
    }

    fn finish_round(&mut self, now: Instant) {
        let outcome = Outcome::judge(self.target.as_slice(), self.input.as_slice());
        self.state.apply(outcome);
        self.outcome = Some(outcome);
        self.set_phase(Phase::Result);
        tracing::info!(
            outcome = outcome.as_str(),
            level = self.state.level,
            stars = self.state.stars,
            difficulty_ms = self.state.difficulty.get(),
            "round over"
        );

        let prompt = match outcome {
            Outcome::Win => Prompt::LevelComplete,
            Outcome::Lose => Prompt::WrongSequence,
        };
        self.notice = Some(prompt);
        self.say(prompt);
        self.process = match self.config.result_policy {
            ResultPolicy::WaitForPlayer => Process::Idle,
            ResultPolicy::AutoContinue(delay) => Process::AutoContinue(later(now, delay)),
        };
    }

    // ── Helpers ─────────────────────────────────────────────────────────────

    fn show_countdown(&mut self, step: CountdownStep) {
        let (display, prompt) = match step {
            CountdownStep::Digit(n) => (Display::Countdown(n), Prompt::Countdown(n)),
            CountdownStep::Go => (Display::Go, Prompt::Go),
        };
        self.display = display;
        self.say(prompt);
    }

    fn acquire_camera(&mut self) {
        if let Err(e) = self.camera.acquire(Facing::Environment) {
            tracing::warn!(error = %e, "camera unavailable, detection will report unknown");
            self.notice = Some(Prompt::CameraUnavailable);
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.state.phase != phase {
            tracing::info!(
                from = self.state.phase.as_str(),
                to = phase.as_str(),
                level = self.state.level,
                "phase"
            );
        }
        self.state.phase = phase;
    }

    fn say(&mut self, prompt: Prompt) {
        if let Err(e) = self.prompts.say(prompt.text()) {
            tracing::debug!(error = %e, text = prompt.text(), "prompt dropped");
        }
    }
}

/// Take one classifier sample. Anything short of a usable frame is `Unknown`.
fn sample_camera<C: FrameSource>(camera: &mut C, camera_on: bool) -> Verdict {
    if !camera_on {
        return Verdict::Unknown;
    }
    match camera.capture() {
        Ok(frame) => classifier::classify(&frame),
        Err(e) => {
            tracing::debug!(error = %e, "no frame");
            Verdict::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_time::Duration;
    use platform::mocks::{MockCamera, MockPrompts};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    type TestSession = Session<MockCamera, MockPrompts, SmallRng>;

    fn session(config: GameConfig) -> TestSession {
        Session::new(
            config,
            MockCamera::with_size(4, 4),
            MockPrompts::new(),
            SmallRng::seed_from_u64(7),
        )
        .unwrap()
    }

    /// Tick at each deadline until `phase` is reached.
    fn run_to(s: &mut TestSession, now: &mut Instant, phase: Phase) {
        for _ in 0..64 {
            if s.phase() == phase {
                return;
            }
            let at = s.next_deadline().expect("session stalled");
            *now = at;
            s.tick(at);
        }
        panic!("never reached {phase}");
    }

    fn card(color: Color) -> [u8; 3] {
        match color {
            Color::Red => [200, 50, 50],
            Color::Green => [50, 200, 50],
            Color::Blue => [50, 50, 200],
        }
    }

    #[test]
    fn test_countdown_shows_and_says_each_step() {
        let mut s = session(GameConfig::default());
        let t0 = Instant::from_millis(0);
        s.start_game(t0).unwrap();
        assert_eq!(s.phase(), Phase::PreCountdown);
        assert_eq!(s.snapshot().display, Display::Countdown(3));
        assert_eq!(s.snapshot().countdown, Some(3));

        s.tick(Instant::from_millis(1000));
        assert_eq!(s.snapshot().display, Display::Countdown(2));
        s.tick(Instant::from_millis(2000));
        assert_eq!(s.snapshot().display, Display::Countdown(1));
        s.tick(Instant::from_millis(3000));
        assert_eq!(s.snapshot().display, Display::Go);
        s.tick(Instant::from_millis(4000));
        assert_eq!(s.phase(), Phase::Playback);
        assert_eq!(s.prompts().spoken(), ["3", "2", "1", "GO"]);
    }

    #[test]
    fn test_playback_flashes_the_target_in_order() {
        let mut s = session(GameConfig::default());
        let mut now = Instant::from_millis(0);
        s.start_game(now).unwrap();
        run_to(&mut s, &mut now, Phase::Playback);

        let target = s.target().to_vec();
        assert_eq!(target.len(), 3);
        // every flash is followed by a blank, so each token shows up once
        let mut shown = Vec::new();
        if let Display::Color(c) = s.snapshot().display {
            shown.push(c);
        }
        while s.phase() == Phase::Playback {
            let at = s.next_deadline().unwrap();
            s.tick(at);
            if let Display::Color(c) = s.snapshot().display {
                shown.push(c);
            }
        }
        assert_eq!(shown.as_slice(), target.as_slice());
        assert_eq!(s.phase(), Phase::AwaitingDetectionStart);
        assert_eq!(s.snapshot().display, Display::Blank);
        assert_eq!(s.prompts().spoken().last().map(String::as_str), Some("Show your cards"));
    }

    #[test]
    fn test_player_actions_ignored_during_playback() {
        let mut s = session(GameConfig::default());
        let mut now = Instant::from_millis(0);
        s.start_game(now).unwrap();
        run_to(&mut s, &mut now, Phase::Playback);
        let target = s.target().to_vec();

        assert_eq!(s.start_game(now), Err(GameError::Busy(Phase::Playback)));
        assert_eq!(s.confirm_color(now), Err(GameError::Busy(Phase::Playback)));
        assert_eq!(s.start_detection(now), Err(GameError::Busy(Phase::Playback)));
        assert_eq!(s.phase(), Phase::Playback);
        assert_eq!(s.target(), target.as_slice());
    }

    #[test]
    fn test_confirm_rejected_while_window_open() {
        let mut s = session(GameConfig::default());
        let mut now = Instant::from_millis(0);
        s.start_game(now).unwrap();
        run_to(&mut s, &mut now, Phase::AwaitingDetectionStart);
        s.start_detection(now).unwrap();
        assert_eq!(s.snapshot().countdown, Some(5));
        assert_eq!(s.confirm_color(now), Err(GameError::DetectionInProgress));
        assert_eq!(s.start_detection(now), Err(GameError::DetectionInProgress));
    }

    #[test]
    fn test_confirm_unknown_is_a_no_op_with_notice() {
        let mut s = session(GameConfig::default());
        let mut now = Instant::from_millis(0);
        s.start_game(now).unwrap();
        run_to(&mut s, &mut now, Phase::AwaitingDetectionStart);
        s.start_detection(now).unwrap();
        // mock camera shows black: every sample is unknown
        while let Some(at) = s.next_deadline() {
            now = at;
            s.tick(at);
        }
        assert_eq!(s.snapshot().detected, Some(Verdict::Unknown));

        assert_eq!(s.confirm_color(now), Err(GameError::NoColorDetected));
        assert_eq!(s.phase(), Phase::Detecting);
        assert!(s.input().is_empty());
        assert_eq!(s.snapshot().notice, Some(Prompt::NoColorDetected));

        // re-sampling is allowed once the window has closed
        s.start_detection(now).unwrap();
        assert_eq!(s.snapshot().detected, None);
    }

    #[test]
    fn test_camera_off_cancels_window_and_releases() {
        let mut s = session(GameConfig::default());
        let mut now = Instant::from_millis(0);
        s.start_game(now).unwrap();
        assert!(s.camera().is_streaming());
        run_to(&mut s, &mut now, Phase::AwaitingDetectionStart);
        s.start_detection(now).unwrap();

        s.toggle_camera();
        assert!(!s.camera_on());
        assert!(!s.camera().is_streaming());
        assert_eq!(s.next_deadline(), None);
        assert_eq!(s.phase(), Phase::Detecting);

        s.toggle_camera();
        assert!(s.camera().is_streaming());
    }

    #[test]
    fn test_camera_off_keeps_countdown_and_playback_running() {
        let mut s = session(GameConfig::default());
        let mut now = Instant::from_millis(0);
        s.start_game(now).unwrap();
        let countdown_due = s.next_deadline();
        s.toggle_camera();
        assert!(!s.camera().is_streaming());
        assert_eq!(s.phase(), Phase::PreCountdown);
        assert_eq!(s.next_deadline(), countdown_due);

        s.toggle_camera();
        assert!(s.camera().is_streaming());
        run_to(&mut s, &mut now, Phase::Playback);
        let flash_due = s.next_deadline();
        s.toggle_camera();
        assert!(!s.camera().is_streaming());
        assert_eq!(s.phase(), Phase::Playback);
        assert_eq!(s.next_deadline(), flash_due);

        run_to(&mut s, &mut now, Phase::AwaitingDetectionStart);
        assert_eq!(s.target().len(), 3);
    }

    #[test]
    fn test_camera_off_cancels_pending_auto_detection() {
        let config = GameConfig::default()
            .with_detection_start(DetectionStart::Auto(Duration::from_millis(500)));
        let mut s = session(config);
        let mut now = Instant::from_millis(0);
        s.start_game(now).unwrap();
        run_to(&mut s, &mut now, Phase::AwaitingDetectionStart);
        assert_eq!(s.next_deadline(), Some(now + Duration::from_millis(500)));

        s.toggle_camera();
        assert!(!s.camera().is_streaming());
        assert_eq!(s.next_deadline(), None);
        assert_eq!(s.phase(), Phase::AwaitingDetectionStart);

        // the player can still open the window by hand
        s.toggle_camera();
        s.start_detection(now).unwrap();
        assert_eq!(s.phase(), Phase::Detecting);
    }

    #[test]
    fn test_camera_on_in_idle_waits_for_round() {
        let mut s = session(GameConfig::default());
        s.toggle_camera();
        s.toggle_camera();
        assert!(s.camera_on());
        assert!(!s.camera().is_streaming());
        assert_eq!(s.camera().acquire_count(), 0);

        s.start_game(Instant::from_millis(0)).unwrap();
        assert!(s.camera().is_streaming());
        assert_eq!(s.camera().acquire_count(), 1);
    }

    #[test]
    fn test_camera_off_samples_unknown() {
        let mut s = session(GameConfig::default().with_camera(false));
        s.camera_mut().fill(card(Color::Red));
        let mut now = Instant::from_millis(0);
        s.start_game(now).unwrap();
        assert!(!s.camera().is_streaming());
        run_to(&mut s, &mut now, Phase::AwaitingDetectionStart);
        s.start_detection(now).unwrap();
        while let Some(at) = s.next_deadline() {
            s.tick(at);
        }
        assert_eq!(s.snapshot().detected, Some(Verdict::Unknown));
    }

    #[test]
    fn test_auto_detection_and_auto_continue() {
        let config = GameConfig::default()
            .with_detection_window(3, Duration::from_secs(1))
            .with_detection_start(DetectionStart::Auto(Duration::from_millis(500)))
            .with_result_policy(ResultPolicy::AutoContinue(Duration::from_secs(2)));
        let mut s = session(config);
        let mut now = Instant::from_millis(0);
        s.start_game(now).unwrap();
        run_to(&mut s, &mut now, Phase::Detecting);

        for _ in 0..s.target().len() {
            let wanted = s.target()[s.input().len()];
            s.camera_mut().fill(card(wanted));
            while let Some(at) = s.next_deadline() {
                now = at;
                s.tick(at);
            }
            s.confirm_color(now).unwrap();
        }
        assert_eq!(s.phase(), Phase::Result);
        assert_eq!(s.snapshot().outcome, Some(Outcome::Win));
        assert_eq!(s.next_deadline(), Some(now + Duration::from_secs(2)));

        s.tick(now + Duration::from_secs(2));
        assert_eq!(s.phase(), Phase::PreCountdown);
        assert_eq!(s.state().level, 2);
        assert!(s.target().is_empty());
    }

    #[test]
    fn test_mode_change_deferred_during_sequence() {
        let mut s = session(GameConfig::default().with_mode(Mode::Mix));
        let mut now = Instant::from_millis(0);
        s.start_game(now).unwrap();
        run_to(&mut s, &mut now, Phase::Playback);

        s.set_mode(Mode::Length);
        assert_eq!(s.state().mode, Mode::Mix);
        assert_eq!(s.pending_mode(), Some(Mode::Length));
        assert_eq!(s.target().len(), 3);

        run_to(&mut s, &mut now, Phase::AwaitingDetectionStart);
        s.start_game(now).unwrap();
        run_to(&mut s, &mut now, Phase::Playback);
        assert_eq!(s.state().mode, Mode::Length);
        assert_eq!(s.target().len(), 5);
        assert_eq!(s.pending_mode(), None);
    }

    #[test]
    fn test_mode_change_immediate_when_idle() {
        let mut s = session(GameConfig::default());
        s.set_mode(Mode::Speed);
        assert_eq!(s.snapshot().mode, Mode::Speed);
        assert_eq!(s.pending_mode(), None);
    }

    #[test]
    fn test_restart_from_awaiting_detection() {
        let mut s = session(GameConfig::default());
        let mut now = Instant::from_millis(0);
        s.start_game(now).unwrap();
        run_to(&mut s, &mut now, Phase::AwaitingDetectionStart);
        s.start_game(now).unwrap();
        assert_eq!(s.phase(), Phase::PreCountdown);
        assert!(s.target().is_empty());
        assert_eq!(s.progress(), Progress::default());
    }

    #[test]
    fn test_advance_after_result_only_in_result() {
        let mut s = session(GameConfig::default());
        let now = Instant::from_millis(0);
        assert_eq!(
            s.advance_after_result(true, now),
            Err(GameError::Busy(Phase::Idle))
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let r = Session::new(
            GameConfig::default().with_detection_window(0, Duration::from_secs(1)),
            MockCamera::new(),
            MockPrompts::new(),
            SmallRng::seed_from_u64(1),
        );
        assert!(matches!(r, Err(ConfigError::EmptyDetectionWindow)));
    }
}
