//! Gallery domain: collection types, the remote API client, client-side
//! filtering, and the cached operation surface the UI talks to.

pub mod client;
pub mod filter;
pub mod service;
pub mod types;

pub use client::ApiClient;
pub use filter::{parse_size, ImageFilter};
pub use service::Gallery;
pub use types::{Category, CategoryPatch, Image, ImageMetadata, NewCategory, NewImage};
