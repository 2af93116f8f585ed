//! An AR product viewer on the acorn runtime.
//!
//! The tracker finds a surface, hit-test results drag the product along
//! it until the user taps to place, and the page's sliders and buttons
//! scale it, spin it and swap its colour variants. The binary runs a
//! scripted session against the simulator backend.

pub mod ui;
pub mod viewer;

use acorn::{simulator::{RecordingScene, SimulatedTracking}, AcornResult, Experience, SdkEvent};

use crate::{
    ui::UiState,
    viewer::{Viewer, ViewerConfig},
};

/// Frames of scripted camera motion the simulator replays.
const SCRIPT_FRAMES: usize = 240;

pub fn real_main() -> AcornResult<()> {
    let mut ui = UiState::new();
    let config = ViewerConfig::default();

    // Startup is the only place an error reaches the user: map the SDK's
    // taxonomy onto the panel once and stop. No retry.
    let tracking = SimulatedTracking::scripted_orbit(SCRIPT_FRAMES);
    let mut experience = match Experience::with_tracker(
        Box::new(RecordingScene::new()),
        Box::new(tracking),
        &config.tracking,
    ) {
        Ok(experience) => experience,
        Err(error) => {
            let (title, message) = error.user_facing();
            ui.show_error(title, message);
            return Ok(());
        }
    };

    let mut viewer = Viewer::new(&mut experience, &config);
    ui.hide_loading();

    // A scripted hand stands in for the page's buttons and sliders.
    let mut frame = 0usize;
    loop {
        let events = experience.update();
        if events.is_empty() && frame > 0 {
            break;
        }

        for event in &events {
            if matches!(event, SdkEvent::HitTestResult { .. }) && !viewer.is_placed() {
                ui.show_controls();
            }
            viewer.handle_event(&mut experience, event);
        }

        frame += 1;
        match frame {
            30 => {
                viewer.place(&mut experience);
                ui.show_variant_selector();
                ui.log_status("placed the product");
            }
            60 => viewer.set_scale(&mut experience, UiState::scale_input(75)),
            90 => viewer.set_rotation(&mut experience, UiState::rotation_input(45.)),
            120 => {
                viewer.set_active_variant(&mut experience, "silver");
                ui.log_status("swapped to the silver variant");
            }
            _ => {}
        }
    }

    ui.log_status(&format!("session finished after {frame} updates"));
    Ok(())
}
