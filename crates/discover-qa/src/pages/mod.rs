// Page objects - named operations over the app's UI and URL conventions

pub mod base;
pub mod discover;

pub use base::{BasePage, LoadState};
pub use discover::DiscoverPage;
