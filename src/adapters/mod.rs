pub mod fs_blob;
pub mod rest_store;

pub use fs_blob::FsBlobStore;
pub use rest_store::RestDirectory;
