//! Leptos rendering of a collection page.
//!
//! The page owns one `RwSignal<CollectionState<E>>` and one controller kept in
//! a `StoredValue`. Views read the signal; event handlers go through the
//! controller.

mod dialogs;
mod filter_panel;
mod page;
mod state;
mod table_view;

pub use page::collection_page;
pub use state::{spawn_action, PageController, PageHandle};
