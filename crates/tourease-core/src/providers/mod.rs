// Bridges between core traits and the API clients
pub mod contact;

pub use contact::HttpContactProvider;
