pub mod command;
pub mod goal;

pub use command::{ApplicableContext, Command};
pub use goal::Goal;
