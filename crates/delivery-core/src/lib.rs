//! Page state for the data delivery front end.
//!
//! This crate holds the settings store, the value holders bound to form
//! widgets, the file selection model and the CTD page controller. Front ends
//! render [`page::CtdPage`] and feed user input back through its methods or
//! through the [`actions`] dispatcher; dialogs and pickers are requested via
//! the [`commands`] queue.

pub mod actions;
pub mod commands;
pub mod fields;
pub mod page;
pub mod saves;
pub mod selection;
pub mod validation;

pub use actions::*;
pub use commands::*;
pub use fields::*;
pub use page::*;
pub use saves::*;
pub use selection::*;
pub use validation::*;
