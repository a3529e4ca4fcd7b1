mod common;
mod control;
mod daemon;
mod settings;
mod status;

pub use control::{next, pause, resume, start, stop};
pub use daemon::execute as daemon;
pub use settings::execute as settings;
pub use status::execute as status;
