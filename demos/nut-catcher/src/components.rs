/// A collectible. The gold variant is worth double points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nut {
    pub special: bool,
}

/// Marker component: the nut was selected and the robot is (or was) on
/// its way to collect it. An expiry deadline that fires on a clicked nut
/// is a no-op.
#[derive(Debug, Clone, Copy)]
pub struct Clicked {}
