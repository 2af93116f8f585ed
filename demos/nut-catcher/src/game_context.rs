use std::fmt::Debug;

use acorn::{
    components::{LocalTransform, Visible},
    hecs::Entity,
    Experience,
};
use rand::rngs::StdRng;

use crate::{
    clock::GameClock,
    components::Nut,
    config::GameConfig,
    score::ScoreTracker,
    spawn::{ExpiryQueue, SpawnScheduler},
};

/// All state for one nut-catcher session.
pub struct GameContext {
    pub config: GameConfig,
    pub score: ScoreTracker,
    pub clock: GameClock,
    pub scheduler: SpawnScheduler,
    pub expiry: ExpiryQueue,
    pub rng: StdRng,
    /// The robot is on its way to a nut; clicks and catch registration
    /// are gated on this
    pub going_for_nut: bool,
    /// A spawn activation animation is still playing; the next spawn
    /// tick waits for it
    pub spawning: bool,
    /// The first tap arrived and the session is live
    pub started: bool,
    pub robot: Entity,
    pub gold_nut: Entity,
    /// The ordinary pool, in the fixed order spawn scans it
    pub nuts: Vec<Entity>,
}

impl Debug for GameContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameContext")
            .field("score", &self.score.score)
            .field("caught", &self.score.caught)
            .field("clock", &self.clock)
            .field("going_for_nut", &self.going_for_nut)
            .field("spawning", &self.spawning)
            .field("started", &self.started)
            .finish()
    }
}

impl GameContext {
    /// Register the game's elements in the experience and precompute the
    /// session's gold spawn slots.
    pub fn new(experience: &mut Experience, config: GameConfig, mut rng: StdRng) -> Self {
        let world = &mut experience.world;

        let robot = world.spawn((
            acorn::components::Info::named(&config.elements.robot),
            LocalTransform::default(),
            Visible {},
        ));

        let gold_nut = world.spawn((
            acorn::components::Info::named(&config.elements.gold_nut),
            LocalTransform::default(),
            Nut { special: true },
        ));

        let nuts = config
            .elements
            .nuts
            .iter()
            .map(|name| {
                world.spawn((
                    acorn::components::Info::named(name),
                    LocalTransform::default(),
                    Nut { special: false },
                ))
            })
            .collect();

        let scheduler =
            SpawnScheduler::new(config.total_spawn_slots(), config.gold_count, &mut rng);
        let score = ScoreTracker::new(&config.chunks, config.default_points, config.session_seconds);
        let clock = GameClock::new(config.session_seconds, config.warning_seconds);

        Self {
            score,
            clock,
            scheduler,
            expiry: ExpiryQueue::new(),
            rng,
            going_for_nut: false,
            spawning: false,
            started: false,
            robot,
            gold_nut,
            nuts,
            config,
        }
    }

    /// Seconds of play so far.
    pub fn elapsed(&self) -> u32 {
        self.config.session_seconds - self.clock.remaining()
    }

    /// On-screen flag of each ordinary nut, in pool order.
    pub fn pool_active(&self, experience: &Experience) -> Vec<bool> {
        self.nuts
            .iter()
            .map(|nut| experience.world.get::<&Visible>(*nut).is_ok())
            .collect()
    }

    /// Register one catch against the session tally. No-op once the
    /// clock has run out or while the robot is still busy.
    pub fn register_catch(&mut self, special: bool) {
        if !self.clock.is_running() {
            return;
        }
        let elapsed = self.elapsed();
        self.score
            .register_catch(special, elapsed, self.going_for_nut);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acorn::simulator::RecordingScene;
    use rand::SeedableRng;

    fn session() -> (Experience, GameContext) {
        let mut experience = Experience::new(Box::new(RecordingScene::new()));
        let game = GameContext::new(
            &mut experience,
            GameConfig::default(),
            StdRng::seed_from_u64(1),
        );
        (experience, game)
    }

    #[test]
    pub fn elements_are_registered_test() {
        let (experience, game) = session();

        assert_eq!(experience.entity("robot"), Some(game.robot));
        assert_eq!(experience.entity("nut_gold"), Some(game.gold_nut));
        assert_eq!(experience.entity("nut_3"), Some(game.nuts[3]));

        // Only the robot starts on screen.
        assert!(experience.world.get::<&Visible>(game.robot).is_ok());
        assert_eq!(game.pool_active(&experience), vec![false; 5]);
    }

    #[test]
    pub fn catches_are_gated_test() {
        let (_, mut game) = session();

        // Nothing counts before the clock starts.
        game.register_catch(false);
        assert_eq!(game.score.caught, 0);

        game.clock.start();
        game.register_catch(false);
        assert_eq!((game.score.score, game.score.caught), (50, 1));

        // Nothing counts while the robot is already collecting.
        game.going_for_nut = true;
        game.register_catch(true);
        assert_eq!((game.score.score, game.score.caught), (50, 1));
    }
}
