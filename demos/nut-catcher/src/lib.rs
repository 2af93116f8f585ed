//! A timed nut-catching mini-game on the acorn runtime.
//!
//! A robot sits in the middle of an AR scene; nuts pop up around it on a
//! fixed cadence and disappear again if nobody taps them. Tapping one
//! sends the robot rolling over to collect it. Catches early in the
//! session are worth more than late ones, gold nuts are worth double,
//! and a sixty-second clock decides when it is all over.
//!
//! The binary runs the whole game headless against the simulator
//! backend, with an auto-clicking player bot chasing every nut.

pub mod clock;
pub mod components;
pub mod config;
pub mod game_context;
pub mod score;
pub mod spawn;
pub mod systems;

use acorn::{
    simulator::RecordingScene, AcornResult, EventKind, Experience, SdkEvent,
};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::{
    config::GameConfig,
    game_context::GameContext,
    systems::{run_session, GameEvent},
};

/// Forward the SDK events the game cares about from the bus onto a
/// channel the session loop can await.
pub fn bridge_sdk_events(experience: &mut Experience) -> UnboundedReceiver<SdkEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    for kind in [EventKind::SceneLoadEnd, EventKind::ElementClick] {
        let tx = tx.clone();
        experience.events.subscribe(kind, move |event| {
            let _ = tx.send(event.clone());
        });
    }
    rx
}

pub fn real_main() -> AcornResult<()> {
    // The simulator plays both sides: the scene loads immediately, the
    // "player" taps in, and the auto-clicker chases every nut it sees.
    let mut backend = RecordingScene::new();
    backend.auto_click = true;
    backend.queue_event(SdkEvent::SceneLoadEnd);
    backend.queue_event(SdkEvent::ElementClick {
        name: "robot".into(),
    });

    let mut experience = Experience::new(Box::new(backend));
    let sdk_events = bridge_sdk_events(&mut experience);
    let mut game = GameContext::new(&mut experience, GameConfig::default(), StdRng::from_entropy());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();

    let (score, caught) = runtime.block_on(local.run_until(async {
        run_session(&mut experience, &mut game, sdk_events, |event| match event {
            GameEvent::Started => info!("[NUT_CATCHER] game on!"),
            GameEvent::ClockTicked { remaining } => info!("[NUT_CATCHER] {remaining}s left"),
            GameEvent::ClockWarning { .. } => info!("[NUT_CATCHER] final stretch!"),
            GameEvent::ScoreChanged { score, caught } => {
                info!("[NUT_CATCHER] {score} pts, {caught} nuts")
            }
            GameEvent::Ended { .. } => {}
        })
        .await
    }));

    info!("[NUT_CATCHER] game over: {score} points from {caught} nuts");
    Ok(())
}
