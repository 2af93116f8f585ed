/// Component that names the scene element an entity mirrors.
///
/// All communication with the scene engine is by element name, so every
/// entity the runtime controls carries one of these.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct Info {
    /// The element name, as declared in the scene's asset tables
    pub name: String,
}

impl Info {
    pub fn named(name: &str) -> Self {
        Self { name: name.into() }
    }
}
