// Command handlers module
pub mod cache;
pub mod config;
pub mod run;
pub mod search;
pub mod version;

// Re-exports for cleaner imports
pub use run::execute as run;
pub use search::execute as search;
pub use version::execute as version;
