pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;

pub use router::registry_router;
