use std::time::Duration;

use acorn::{
    components::{Info, LocalTransform, Visible},
    contexts::play_clip,
    hecs::Entity,
    systems::sync_system,
    Experience, SdkEvent,
};
use glam::Quat;
use log::{debug, info};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    time::{interval_at, sleep_until, Instant},
};

use crate::{
    clock::ClockTick,
    components::{Clicked, Nut},
    game_context::GameContext,
    spawn::{spawn_position, SpawnTarget},
    systems::pickup::pickup_choreography,
};

/// How often the SDK event queues are drained.
const PUMP_PERIOD: Duration = Duration::from_millis(50);

/// Messages completing asynchronous choreography back on the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMessage {
    /// A spawn activation clip finished: arm the expiry deadline and
    /// free the spawner for the next tick.
    SpawnFinished { nut: Entity, special: bool },
    /// The robot finished collecting: despawn the nut, score the catch
    /// and free the robot.
    PickupFinished { nut: Entity, special: bool },
}

/// Progress notifications for whatever chrome hosts the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    ScoreChanged { score: u32, caught: u32 },
    ClockTicked { remaining: u32 },
    /// The clock entered its final stretch. Fired at most once.
    ClockWarning { remaining: u32 },
    /// The session is over. Fired exactly once, with the final tally.
    Ended { score: u32, caught: u32 },
}

/// Drive a whole session to completion and return the final tally.
///
/// The loop idles until the scene reports loaded and the player taps,
/// then multiplexes the clock, the spawner, the expiry deadlines, the
/// bridged SDK events and the choreography completions. Everything runs
/// on the calling thread and every mutation of session state happens
/// here, one event at a time; the spawned choreography tasks only talk
/// to the scene engine and report back through messages.
///
/// Must be called inside a [`tokio::task::LocalSet`].
pub async fn run_session(
    experience: &mut Experience,
    game: &mut GameContext,
    mut sdk_events: UnboundedReceiver<SdkEvent>,
    mut on_event: impl FnMut(&GameEvent),
) -> (u32, u32) {
    let (messages_tx, mut messages) = mpsc::unbounded_channel();
    let mut pump = tokio::time::interval(PUMP_PERIOD);

    // Idle until the scene is up and the player taps in.
    let mut loaded = false;
    while !game.started {
        tokio::select! {
            _ = pump.tick() => {
                experience.update();
            }
            Some(event) = sdk_events.recv() => match event {
                SdkEvent::SceneLoadEnd => {
                    loaded = true;
                    experience
                        .scene
                        .borrow_mut()
                        .play_sound(&game.config.sounds.background);
                    info!("[GAME] scene loaded, waiting for the first tap");
                }
                SdkEvent::ElementClick { .. } if loaded => {
                    game.started = true;
                }
                _ => {}
            },
        }
    }

    game.clock.start();
    on_event(&GameEvent::Started);
    info!(
        "[GAME] session started: {}s on the clock, {} golds hidden in the schedule",
        game.config.session_seconds,
        game.scheduler.gold_indices().len()
    );

    let second = Duration::from_secs(1);
    let mut clock_interval = interval_at(Instant::now() + second, second);
    let mut spawn_interval = interval_at(
        Instant::now() + game.config.spawn_period(),
        game.config.spawn_period(),
    );

    loop {
        let next_expiry = game.expiry.next_deadline();
        tokio::select! {
            _ = clock_interval.tick() => {
                match game.clock.tick() {
                    ClockTick::Running { remaining } => {
                        on_event(&GameEvent::ClockTicked { remaining });
                    }
                    ClockTick::Warning { remaining } => {
                        on_event(&GameEvent::ClockTicked { remaining });
                        on_event(&GameEvent::ClockWarning { remaining });
                    }
                    ClockTick::Ended => {
                        experience
                            .scene
                            .borrow_mut()
                            .pause_sound(&game.config.sounds.background);
                        let (score, caught) = (game.score.score, game.score.caught);
                        on_event(&GameEvent::Ended { score, caught });
                        info!("[GAME] session over: {score} points from {caught} nuts");
                        return (score, caught);
                    }
                    ClockTick::Idle => {}
                }
            }
            _ = spawn_interval.tick(), if !game.spawning => {
                handle_spawn_tick(experience, game, &messages_tx);
            }
            _ = sleep_until(next_expiry.unwrap_or_else(far_future)), if next_expiry.is_some() => {
                while let Some(nut) = game.expiry.pop_due(Instant::now()) {
                    handle_expiry(experience, nut);
                }
            }
            Some(event) = sdk_events.recv() => {
                if let SdkEvent::ElementClick { name } = event {
                    handle_element_click(experience, game, &messages_tx, &name);
                }
            }
            Some(message) = messages.recv() => {
                handle_message(experience, game, message, &mut on_event);
            }
            _ = pump.tick() => {
                experience.update();
            }
        }
    }
}

fn far_future() -> Instant {
    Instant::now() + Duration::from_secs(86_400)
}

/// Bring one nut into play, per the scheduler's decision.
fn handle_spawn_tick(
    experience: &mut Experience,
    game: &mut GameContext,
    messages: &UnboundedSender<GameMessage>,
) {
    let pool_active = game.pool_active(experience);
    let Some(target) = game.scheduler.select(&pool_active) else {
        return;
    };

    let (nut, special) = match target {
        SpawnTarget::Gold => (game.gold_nut, true),
        SpawnTarget::Ordinary(index) => (game.nuts[index], false),
    };

    // Reset the pose and drop the nut somewhere new.
    {
        let mut transform = experience.world.get::<&mut LocalTransform>(nut).unwrap();
        transform.rotation = Quat::IDENTITY;
        transform.translation = spawn_position(&mut game.rng);
    }
    let _ = experience.world.remove_one::<Clicked>(nut);
    experience.world.insert_one(nut, Visible {}).unwrap();

    // Push the new pose and visibility before the spawn clip starts.
    sync_system(&mut experience.world, &mut experience.scene.borrow_mut());

    let name = experience.world.get::<&Info>(nut).unwrap().name.clone();
    debug!("[GAME] spawning {name}");

    game.spawning = true;
    let scene = experience.scene.clone();
    let clip = game.config.nut_clips.spawn.clone();
    let messages = messages.clone();
    tokio::task::spawn_local(async move {
        play_clip(&scene, &name, &clip, false).await;
        let _ = messages.send(GameMessage::SpawnFinished { nut, special });
    });
}

/// A spawn deadline fired. Despawn only if the nut is still out and
/// nobody claimed it; anything else means the deadline was defused.
fn handle_expiry(experience: &mut Experience, nut: Entity) {
    let on_screen = experience.world.get::<&Visible>(nut).is_ok();
    let clicked = experience.world.get::<&Clicked>(nut).is_ok();
    if !on_screen || clicked {
        return;
    }

    experience.world.remove_one::<Visible>(nut).unwrap();
    sync_system(&mut experience.world, &mut experience.scene.borrow_mut());
    debug!("[GAME] a nut expired unclaimed");
}

/// A tap arrived. Send the robot out if it is free and the tap names a
/// nut that is actually up for grabs.
fn handle_element_click(
    experience: &mut Experience,
    game: &mut GameContext,
    messages: &UnboundedSender<GameMessage>,
    name: &str,
) {
    let Some(nut) = experience.entity(name) else {
        return;
    };
    let special = match experience.world.get::<&Nut>(nut) {
        Ok(nut) => nut.special,
        Err(_) => return, // the robot, or scenery
    };

    if game.going_for_nut {
        debug!("[GAME] ignoring tap on {name}: the robot is busy");
        return;
    }
    if experience.world.get::<&Visible>(nut).is_err()
        || experience.world.get::<&Clicked>(nut).is_ok()
    {
        // Expired or already claimed; interleaved timers make this a
        // normal occurrence, not an error.
        return;
    }

    game.going_for_nut = true;
    experience.world.insert_one(nut, Clicked {}).unwrap();

    {
        let mut scene = experience.scene.borrow_mut();
        scene.play_sound(&game.config.sounds.roll);
        scene.move_to_element(
            &game.config.elements.robot,
            name,
            game.config.robot_travel_secs,
        );
        scene.start_animation(
            &game.config.elements.robot,
            &game.config.robot_clips.start_up,
            false,
        );
    }

    debug!("[GAME] robot heading for {name}");
    tokio::task::spawn_local(pickup_choreography(
        experience.scene.clone(),
        game.config.clone(),
        nut,
        name.to_owned(),
        special,
        messages.clone(),
    ));
}

/// A choreography task completed; apply its outcome to the session.
fn handle_message(
    experience: &mut Experience,
    game: &mut GameContext,
    message: GameMessage,
    on_event: &mut impl FnMut(&GameEvent),
) {
    match message {
        GameMessage::SpawnFinished { nut, special } => {
            game.spawning = false;
            let ttl = if special {
                game.config.gold_ttl()
            } else {
                game.config.nut_ttl()
            };
            game.expiry.arm(Instant::now() + ttl, nut);
        }
        GameMessage::PickupFinished { nut, special } => {
            let _ = experience.world.remove_one::<Visible>(nut);
            let _ = experience.world.remove_one::<Clicked>(nut);
            sync_system(&mut experience.world, &mut experience.scene.borrow_mut());

            game.going_for_nut = false;
            game.register_catch(special);
            on_event(&GameEvent::ScoreChanged {
                score: game.score.score,
                caught: game.score.caught,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bridge_sdk_events, config::GameConfig};
    use acorn::simulator::{RecordingScene, SceneOp};
    use rand::{rngs::StdRng, SeedableRng};
    use tokio::task::LocalSet;

    fn short_config() -> GameConfig {
        GameConfig {
            session_seconds: 5,
            gold_count: 1,
            warning_seconds: 1,
            ..Default::default()
        }
    }

    fn session_over(
        backend: RecordingScene,
        config: GameConfig,
    ) -> (Experience, GameContext) {
        let mut experience = Experience::new(Box::new(backend));
        let game = GameContext::new(&mut experience, config, StdRng::seed_from_u64(3));
        (experience, game)
    }

    #[test]
    pub fn expiry_is_guarded_test() {
        let backend = RecordingScene::new();
        let ops = backend.ops.clone();
        let (mut experience, mut game) = session_over(backend, short_config());
        let nut = game.nuts[0];

        // An unclaimed, on-screen nut gets hidden.
        experience.world.insert_one(nut, Visible {}).unwrap();
        experience.update();
        handle_expiry(&mut experience, nut);
        assert!(experience.world.get::<&Visible>(nut).is_err());
        assert_eq!(
            ops.borrow().last(),
            Some(&SceneOp::Disable {
                element: "nut_0".into()
            })
        );

        // Firing again is a no-op.
        let ops_before = ops.borrow().len();
        handle_expiry(&mut experience, nut);
        assert_eq!(ops.borrow().len(), ops_before);

        // A claimed nut is left alone.
        experience.world.insert_one(nut, Visible {}).unwrap();
        experience.world.insert_one(nut, Clicked {}).unwrap();
        experience.update();
        let ops_before = ops.borrow().len();
        handle_expiry(&mut experience, nut);
        assert!(experience.world.get::<&Visible>(nut).is_ok());
        assert_eq!(ops.borrow().len(), ops_before);
    }

    #[tokio::test(start_paused = true)]
    pub async fn spawn_ticks_are_serialized_test() {
        LocalSet::new()
            .run_until(async {
                let backend = RecordingScene::new();
                let (mut experience, mut game) = session_over(backend, short_config());
                let (tx, mut rx) = mpsc::unbounded_channel();

                handle_spawn_tick(&mut experience, &mut game, &tx);
                assert!(game.spawning);

                // Exactly one nut came out.
                let out = game
                    .pool_active(&experience)
                    .iter()
                    .filter(|active| **active)
                    .count()
                    + experience.world.get::<&Visible>(game.gold_nut).is_ok() as usize;
                assert_eq!(out, 1);

                // The loop's guard skips spawn ticks while one is in
                // flight; once the clip ends the slot opens up again.
                let message = rx.recv().await.unwrap();
                assert!(matches!(message, GameMessage::SpawnFinished { .. }));
                handle_message(&mut experience, &mut game, message, &mut |_| {});
                assert!(!game.spawning);
                assert!(game.expiry.next_deadline().is_some());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    pub async fn taps_while_the_robot_is_busy_are_ignored_test() {
        LocalSet::new()
            .run_until(async {
                let backend = RecordingScene::new();
                let ops = backend.ops.clone();
                let (mut experience, mut game) = session_over(backend, short_config());
                let (tx, _rx) = mpsc::unbounded_channel();
                game.clock.start();

                let (first, second) = (game.nuts[0], game.nuts[1]);
                experience.world.insert_one(first, Visible {}).unwrap();
                experience.world.insert_one(second, Visible {}).unwrap();

                handle_element_click(&mut experience, &mut game, &tx, "nut_0");
                assert!(game.going_for_nut);
                assert!(experience.world.get::<&Clicked>(first).is_ok());

                handle_element_click(&mut experience, &mut game, &tx, "nut_1");
                assert!(experience.world.get::<&Clicked>(second).is_err());

                // Only one robot dispatch went out.
                let dispatches = ops
                    .borrow()
                    .iter()
                    .filter(|op| matches!(op, SceneOp::MoveToElement { .. }))
                    .count();
                assert_eq!(dispatches, 1);

                // Taps on hidden nuts are ignored too.
                game.going_for_nut = false;
                handle_element_click(&mut experience, &mut game, &tx, "nut_3");
                assert!(!game.going_for_nut);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    pub async fn full_session_smoke_test() {
        LocalSet::new()
            .run_until(async {
                let mut backend = RecordingScene::new();
                backend.auto_click = true;
                backend.queue_event(SdkEvent::SceneLoadEnd);
                backend.queue_event(SdkEvent::ElementClick {
                    name: "robot".into(),
                });
                let ops = backend.ops.clone();

                let (mut experience, mut game) = session_over(backend, short_config());
                let sdk_events = bridge_sdk_events(&mut experience);

                let mut events = Vec::new();
                let (score, caught) =
                    run_session(&mut experience, &mut game, sdk_events, |event| {
                        events.push(*event)
                    })
                    .await;

                // The auto-clicking player caught at least one nut, and
                // the tally in the end event matches the return value.
                assert!(caught >= 1, "the player bot never caught anything");
                assert!(score >= 50 * caught);
                assert_eq!(
                    events.last(),
                    Some(&GameEvent::Ended { score, caught })
                );

                // End-of-game fires exactly once, the warning at most
                // once, and the clock never goes negative.
                let ended = events
                    .iter()
                    .filter(|event| matches!(event, GameEvent::Ended { .. }))
                    .count();
                assert_eq!(ended, 1);
                let warnings = events
                    .iter()
                    .filter(|event| matches!(event, GameEvent::ClockWarning { .. }))
                    .count();
                assert_eq!(warnings, 1);

                // The background music started with the scene and paused
                // with the end of the game.
                assert!(ops.borrow().contains(&SceneOp::PlaySound {
                    sound: "workshop-theme".into()
                }));
                assert_eq!(
                    ops.borrow()
                        .iter()
                        .filter(|op| matches!(
                            op,
                            SceneOp::PauseSound { sound } if sound == "workshop-theme"
                        ))
                        .count(),
                    1
                );
            })
            .await;
    }
}
