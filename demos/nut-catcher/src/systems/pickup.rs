use std::{cell::RefCell, rc::Rc};

use acorn::{
    contexts::{play_clip, SceneContext},
    hecs::Entity,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{config::GameConfig, systems::game::GameMessage};

/// The robot's collection choreography, from the moment it rolls off to
/// the moment the nut is gone.
///
/// The click handler has already marked the nut, started the roll sound,
/// sent the robot on its way and played its start-up clip. This runs as
/// a spawned local task so the clock, the spawner and the expiry
/// deadlines keep firing while the robot is busy; the session loop hears
/// about completion through a [`GameMessage::PickupFinished`].
pub async fn pickup_choreography(
    scene: Rc<RefCell<SceneContext>>,
    config: GameConfig,
    nut: Entity,
    nut_name: String,
    special: bool,
    messages: UnboundedSender<GameMessage>,
) {
    tokio::time::sleep(config.robot_travel()).await;

    {
        let mut scene = scene.borrow_mut();
        scene.pause_sound(&config.sounds.roll);
        let catch_sound = if special {
            &config.sounds.gold_catch
        } else {
            &config.sounds.metal_catch
        };
        scene.play_sound(catch_sound);

        // The brake is fire-and-forget; the pick-up clip is what gates
        // the rest of the sequence.
        scene.stop_animation(&config.elements.robot, &config.robot_clips.start_up.name);
        scene.start_animation(&config.elements.robot, &config.robot_clips.brake, false);
    }

    play_clip(&scene, &nut_name, &config.nut_clips.pick_up, false).await;
    scene
        .borrow_mut()
        .stop_animation(&nut_name, &config.nut_clips.pick_up.name);

    let _ = messages.send(GameMessage::PickupFinished { nut, special });
}

#[cfg(test)]
mod tests {
    use super::*;
    use acorn::simulator::{RecordingScene, SceneOp};
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    pub async fn choreography_runs_in_order_test() {
        let backend = RecordingScene::new();
        let ops = backend.ops.clone();
        let scene = Rc::new(RefCell::new(SceneContext::new(Box::new(backend))));
        let config = GameConfig::default();

        let mut world = acorn::hecs::World::new();
        let nut = world.spawn(());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let started = tokio::time::Instant::now();
        pickup_choreography(scene, config.clone(), nut, "nut_2".into(), false, tx).await;

        // Travel time plus the pick-up clip, nothing more.
        assert_eq!(
            started.elapsed(),
            Duration::from_secs_f32(config.robot_travel_secs)
                + config.nut_clips.pick_up.duration()
        );

        assert_eq!(
            *ops.borrow(),
            vec![
                SceneOp::PauseSound {
                    sound: "roll".into()
                },
                SceneOp::PlaySound {
                    sound: "metal-nut-catch".into()
                },
                SceneOp::StopAnimation {
                    element: "robot".into(),
                    clip: "Animation.Start".into()
                },
                SceneOp::PlayAnimation {
                    element: "robot".into(),
                    clip: "Animation.Stop".into(),
                    looped: false
                },
                SceneOp::PlayAnimation {
                    element: "nut_2".into(),
                    clip: "PickUp.1".into(),
                    looped: false
                },
                SceneOp::StopAnimation {
                    element: "nut_2".into(),
                    clip: "PickUp.1".into()
                },
            ]
        );

        assert_eq!(
            rx.recv().await,
            Some(GameMessage::PickupFinished {
                nut,
                special: false
            })
        );
    }

    #[tokio::test(start_paused = true)]
    pub async fn gold_catches_play_the_gold_sound_test() {
        let backend = RecordingScene::new();
        let ops = backend.ops.clone();
        let scene = Rc::new(RefCell::new(SceneContext::new(Box::new(backend))));

        let mut world = acorn::hecs::World::new();
        let nut = world.spawn(());
        let (tx, _rx) = mpsc::unbounded_channel();

        pickup_choreography(scene, GameConfig::default(), nut, "nut_gold".into(), true, tx).await;

        assert!(ops.borrow().contains(&SceneOp::PlaySound {
            sound: "golden-nut-catch".into()
        }));
    }
}
