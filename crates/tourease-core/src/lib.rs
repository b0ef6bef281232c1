// Core business logic lives here - favorites, catalog, contact form
pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod favorites;
pub mod models;
pub mod profile;
pub mod providers;

pub use catalog::Catalog;
pub use config::Config;
pub use contact::{ContactForm, ContactOutcome, ContactService, ContactSubmitter, ValidationError};
pub use error::Error;
pub use favorites::{load_favorites, FavoritesCollection, FavoritesStore, SubscriptionId};
pub use models::{Category, Destination, FavoriteId};
pub use profile::{load_profile, welcome_message, UserProfile};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
