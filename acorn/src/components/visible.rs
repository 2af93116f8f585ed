/// Marker component: the entity's scene element is currently shown.
///
/// Visibility is toggled by inserting or removing this component; the
/// sync system translates the change into an enable/disable call on the
/// scene backend.
#[derive(Debug, Clone, Copy)]
pub struct Visible {}
