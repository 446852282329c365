//! UI layer for the reaction form: page model, rendering, and the session shell.

pub mod app;
pub mod page;
pub mod render;

pub use app::FormSession;
