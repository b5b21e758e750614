pub mod cli;
pub mod file;

pub use cli::ServerConfig;
pub use file::FileConfig;
