pub mod game;
pub mod pickup;

pub use game::{run_session, GameEvent, GameMessage};
pub use pickup::pickup_choreography;
