//! Small rendering helpers shared by the screens.

pub mod badge;
pub mod bars;
pub mod filters;
pub mod log_table;
pub mod sub_tabs;
pub mod text_edit;
pub mod tiles;
