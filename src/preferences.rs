//! Key-value preference persistence (selected root, theme, favorites).

pub mod contract;
pub mod memory;
pub mod xdg;

pub use contract::{PreferenceStore, KEY_FAVORITES, KEY_SELECTED_ROOT, KEY_THEME};
pub use memory::MemoryPreferenceStore;
pub use xdg::XdgPreferenceStore;
