mod notifier;
mod presenter;
mod reminders;
mod timer;

pub use notifier::{NotifierActor, NotifierHandle};
pub use presenter::Presenter;
pub use reminders::ReminderCoordinator;
pub use timer::{TimerActor, TimerHandle};
