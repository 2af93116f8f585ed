use thiserror::Error;

/// Errors surfaced by the SDK seams or the runtime itself.
///
/// The first four variants are the flat taxonomy the tracking SDK reports
/// at startup. They are caught exactly once, mapped through
/// [`AcornError::user_facing`] and shown in the error panel; no retry is
/// attempted. Anything that goes wrong after startup is logged and
/// swallowed so the session degrades instead of crashing.
#[derive(Error, Debug)]
pub enum AcornError {
    #[error("an unspecified tracking failure occurred")]
    Internal,
    #[error("the device camera could not be accessed")]
    Camera,
    #[error("the device motion sensors could not be accessed")]
    Sensors,
    #[error("this experience does not exist or has been unpublished")]
    License,
    #[error("the scene has no element named `{0}`")]
    MissingElement(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AcornError {
    /// Title and message pair for the startup error panel.
    pub fn user_facing(&self) -> (&'static str, &'static str) {
        match self {
            AcornError::Internal => (
                "Internal Error",
                "An unspecified error has occurred. Your device might not be compatible with this experience.",
            ),
            AcornError::Camera => (
                "Camera Error",
                "Could not access your device's camera. Please ensure you have given required permissions from your browser settings.",
            ),
            AcornError::Sensors => (
                "Sensors Error",
                "Could not access your device's motion sensors. Please ensure you have given required permissions from your browser settings.",
            ),
            AcornError::License => (
                "License Error",
                "This experience does not exist or has been unpublished.",
            ),
            _ => (
                "Error",
                "Something went wrong while starting the experience.",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn user_facing_mapping_test() {
        assert_eq!(AcornError::Camera.user_facing().0, "Camera Error");
        assert_eq!(AcornError::Sensors.user_facing().0, "Sensors Error");
        assert_eq!(AcornError::License.user_facing().0, "License Error");
        assert_eq!(AcornError::Internal.user_facing().0, "Internal Error");

        // Runtime errors fall back to the generic panel.
        let (title, _) = AcornError::MissingElement("robot".into()).user_facing();
        assert_eq!(title, "Error");
    }
}
