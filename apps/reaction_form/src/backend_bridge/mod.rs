//! Bridge between the UI thread and the worker that talks to `/predict`.

pub mod commands;
pub mod runtime;
