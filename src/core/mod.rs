pub mod normalizer;
pub mod registry;
