// Desktop binary: unwrap/expect/panic acceptable outside the no_std crates.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(missing_docs)]

mod cli;
mod sim;
mod speech;

use std::cell::Cell;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use clap::Parser;
use embassy_futures::join::join;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use game::runner::{self, Action, SnapshotChannel, ACTION_QUEUE_DEPTH};
use game::{DetectionStart, Session};
use platform::config::{dev_banner, APP_NAME, APP_TYPE, APP_VERSION};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::Cli;
use crate::sim::{Hand, PlayerPlan, SimCamera, SimPlayer};
use crate::speech::LoggedSpeech;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = cli.game_config();
    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::info!(
        version = APP_VERSION,
        kind = APP_TYPE,
        seed,
        mode = config.mode.as_str(),
        "{}",
        dev_banner()
    );

    let hand: Hand = Rc::new(Cell::new(None));
    let session = Session::new(
        config,
        SimCamera::new(Rc::clone(&hand)),
        LoggedSpeech::default(),
        StdRng::seed_from_u64(seed),
    )
    .map_err(|e| anyhow!("invalid configuration: {e}"))?;

    let plan = PlayerPlan {
        rounds: cli.rounds,
        mistake_percent: cli.mistakes,
        manual_detection: config.detection_start == DetectionStart::Manual,
    };
    let player = SimPlayer::new(plan, hand, StdRng::seed_from_u64(seed.wrapping_add(1)));

    let actions: Channel<NoopRawMutex, Action, ACTION_QUEUE_DEPTH> = Channel::new();
    let snapshots: SnapshotChannel<NoopRawMutex> = SnapshotChannel::new();
    let screen = snapshots
        .dyn_subscriber()
        .map_err(|_| anyhow!("no free snapshot subscriber slot"))?;

    let (session, report) = join(
        runner::run(session, actions.receiver(), &snapshots),
        player.play(actions.sender(), screen),
    )
    .await;

    println!();
    println!("{APP_NAME} v{APP_VERSION}");
    println!("Rounds played : {}", report.rounds);
    println!("Wins / losses : {} / {}", report.wins, report.losses);
    println!("Re-samples    : {}", report.retries);
    println!("Flashes seen  : {}", report.flashes_seen);
    println!("Final level   : {}", report.level);
    println!("Stars         : {}", report.stars);
    println!("Flash (ms)    : {}", report.difficulty_ms);
    println!("Prompts spoken: {}", session.prompts().spoken());

    Ok(())
}
