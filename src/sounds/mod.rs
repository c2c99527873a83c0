mod loader;

pub use loader::{fetch_sounds, load};
