//! Persisted display preference

mod store;
mod theme;

#[cfg(test)]
mod tests;

pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use theme::{THEME_KEY, ThemeController, ThemeMode};
