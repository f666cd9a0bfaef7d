pub mod dialogs;
pub mod state;
pub mod ui;
pub mod view;

pub use dialogs::{Dialogs, RfdDialogs};
pub use state::DeliveryApp;
pub use view::WINDOW_TITLE;
