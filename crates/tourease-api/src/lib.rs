// HTTP clients for the services TourEase talks to
// Right now that's just the contact form backend
pub mod contact;

// Re-export common types
pub use contact::{
    ContactAck, ContactClient, ContactError, ContactRequest, ContactResponse, DEFAULT_API_BASE,
};
