use std::time::Duration;

use acorn::contexts::AnimationClip;
use serde::{Deserialize, Serialize};

/// Point value for one slice of the session. `percent` is the end of the
/// slice as a percentage of the session duration, so `{ percent: 100,
/// points: 50 }` covers the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreChunk {
    pub percent: u32,
    pub points: u32,
}

/// Names of the scene elements the game drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementNames {
    pub robot: String,
    /// The gold nut is a single element, so at most one gold is ever in
    /// play.
    pub gold_nut: String,
    /// The ordinary pool, scanned in this order on every spawn tick
    pub nuts: Vec<String>,
}

/// Names of the sounds the scene engine mixes for us.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundNames {
    pub background: String,
    pub metal_catch: String,
    pub gold_catch: String,
    /// Played while the robot rolls towards a nut
    pub roll: String,
}

/// Robot animation clips, with the durations declared in the asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotClips {
    pub start_up: AnimationClip,
    pub brake: AnimationClip,
}

/// Nut animation clips, with the durations declared in the asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutClips {
    pub spawn: AnimationClip,
    pub pick_up: AnimationClip,
}

/// Typed configuration for a nut-catcher session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Session length, in seconds
    pub session_seconds: u32,
    /// Interval between spawn ticks, in milliseconds
    pub spawn_period_ms: u64,
    /// Gold spawns per session
    pub gold_count: u32,
    /// How long an unclicked nut stays on screen, in milliseconds
    pub nut_ttl_ms: u64,
    /// How long an unclicked gold nut stays on screen, in milliseconds
    pub gold_ttl_ms: u64,
    /// Remaining seconds at which the clock highlight fires
    pub warning_seconds: u32,
    /// Seconds the robot takes to reach a clicked nut
    pub robot_travel_secs: f32,
    /// Points table, as slices of the session
    pub chunks: Vec<ScoreChunk>,
    /// Catch value once every slice has passed
    pub default_points: u32,
    pub elements: ElementNames,
    pub sounds: SoundNames,
    pub robot_clips: RobotClips,
    pub nut_clips: NutClips,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            session_seconds: 60,
            spawn_period_ms: 1000,
            gold_count: 6,
            nut_ttl_ms: 5000,
            gold_ttl_ms: 3000,
            warning_seconds: 10,
            robot_travel_secs: 1.,
            chunks: vec![ScoreChunk {
                percent: 100,
                points: 50,
            }],
            default_points: 50,
            elements: ElementNames {
                robot: "robot".into(),
                gold_nut: "nut_gold".into(),
                nuts: (0..5).map(|i| format!("nut_{i}")).collect(),
            },
            sounds: SoundNames {
                background: "workshop-theme".into(),
                metal_catch: "metal-nut-catch".into(),
                gold_catch: "golden-nut-catch".into(),
                roll: "roll".into(),
            },
            robot_clips: RobotClips {
                start_up: AnimationClip::new("Animation.Start", 1.),
                brake: AnimationClip::new("Animation.Stop", 2.),
            },
            nut_clips: NutClips {
                spawn: AnimationClip::new("Spawn.1", 1.3333334),
                pick_up: AnimationClip::new("PickUp.1", 1.),
            },
        }
    }
}

impl GameConfig {
    pub fn spawn_period(&self) -> Duration {
        Duration::from_millis(self.spawn_period_ms)
    }

    pub fn nut_ttl(&self) -> Duration {
        Duration::from_millis(self.nut_ttl_ms)
    }

    pub fn gold_ttl(&self) -> Duration {
        Duration::from_millis(self.gold_ttl_ms)
    }

    pub fn robot_travel(&self) -> Duration {
        Duration::from_secs_f32(self.robot_travel_secs)
    }

    /// Spawn slots in a full session.
    pub fn total_spawn_slots(&self) -> u32 {
        (self.session_seconds as u64 * 1000 / self.spawn_period_ms) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn default_config_is_coherent_test() {
        let config = GameConfig::default();
        assert_eq!(config.total_spawn_slots(), 60);
        assert!(config.gold_ttl() < config.nut_ttl());
        assert_eq!(config.elements.nuts.len(), 5);
    }

    #[test]
    pub fn config_overrides_parse_test() {
        // Deployments tweak the session through JSON embedded in the
        // experience page; unknown keys are rejected by structure, not
        // silently dropped into an untyped bag.
        let config: GameConfig = serde_json::from_str(
            r#"{
                "session_seconds": 30,
                "spawn_period_ms": 500,
                "gold_count": 3,
                "nut_ttl_ms": 4000,
                "gold_ttl_ms": 2000,
                "warning_seconds": 5,
                "robot_travel_secs": 0.5,
                "chunks": [{ "percent": 50, "points": 100 }, { "percent": 100, "points": 50 }],
                "default_points": 50,
                "elements": { "robot": "robot", "gold_nut": "nut_gold", "nuts": ["nut_0"] },
                "sounds": {
                    "background": "workshop-theme",
                    "metal_catch": "metal-nut-catch",
                    "gold_catch": "golden-nut-catch",
                    "roll": "roll"
                },
                "robot_clips": {
                    "start_up": { "name": "Animation.Start", "duration_secs": 1.0 },
                    "brake": { "name": "Animation.Stop", "duration_secs": 2.0 }
                },
                "nut_clips": {
                    "spawn": { "name": "Spawn.1", "duration_secs": 1.3 },
                    "pick_up": { "name": "PickUp.1", "duration_secs": 1.0 }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.total_spawn_slots(), 60);
        assert_eq!(config.chunks.len(), 2);
    }
}
