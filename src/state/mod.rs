//! State management and events

mod container;
mod events;
#[cfg(test)]
mod tests;

pub use container::{PlayerSnapshot, PrimaryAction, StateContainer};
pub use events::{EventBus, EventFilter, PlayerEvent};
