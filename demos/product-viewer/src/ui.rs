use log::{error, info};

/// Page chrome for the viewer: loading screen, error panel, transform
/// controls and variant buttons. Pure glue: state flags plus log lines
/// standing in for the real page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UiState {
    pub loading_hidden: bool,
    pub controls_visible: bool,
    pub variant_selector_visible: bool,
    /// Title and message of the error panel, if it is up
    pub error: Option<(String, String)>,
}

impl UiState {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn hide_loading(&mut self) {
        self.loading_hidden = true;
    }

    /// Show the place/scale/rotate controls.
    pub fn show_controls(&mut self) {
        self.controls_visible = true;
    }

    /// Show the variant buttons; the transform controls make way.
    pub fn show_variant_selector(&mut self) {
        self.variant_selector_visible = true;
        self.controls_visible = false;
    }

    /// Put up the error panel. Shown once, at startup; there is no retry.
    pub fn show_error(&mut self, title: &str, message: &str) {
        error!("[VIEWER] {title}: {message}");
        self.error = Some((title.to_owned(), message.to_owned()));
    }

    pub fn log_status(&self, status: &str) {
        info!("[VIEWER] {status}");
    }

    /// The scale slider reports 0..=100; the model wants a factor.
    pub fn scale_input(percent: u32) -> f32 {
        percent as f32 / 100.
    }

    /// The rotation slider reports degrees; the model wants radians.
    pub fn rotation_input(degrees: f32) -> f32 {
        degrees.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    pub fn selector_replaces_controls_test() {
        let mut ui = UiState::new();
        ui.show_controls();
        assert!(ui.controls_visible);

        ui.show_variant_selector();
        assert!(ui.variant_selector_visible);
        assert!(!ui.controls_visible);
    }

    #[test]
    pub fn slider_conversions_test() {
        assert_relative_eq!(UiState::scale_input(75), 0.75);
        assert_relative_eq!(UiState::rotation_input(180.), std::f32::consts::PI);
    }
}
