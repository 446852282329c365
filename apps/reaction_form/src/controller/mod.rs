//! Controller layer: UI events, the event dispatch table, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
