//! Discovery and loading of upstream detector output.

mod loader;
mod walk;

pub use loader::load_contacts;
pub use walk::{discover, LeafCsv};
