//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! process arguments
//!     → options.rs (clap parse)
//!     → ProcessOptions (immutable)
//!
//! <serverdir>/profiles/DatabaseOptions.json
//!     → loader.rs (existence checks, read, deserialize)
//!     → DatabaseConfig (immutable)
//! ```
//!
//! # Design Decisions
//! - Both values are read once at startup and never mutated
//! - No defaults are substituted for a missing or malformed file

pub mod loader;
pub mod options;
pub mod schema;

pub use loader::{database_options_path, load_database_config, load_database_config_at, validate_layout, ConfigError};
pub use options::ProcessOptions;
pub use schema::DatabaseConfig;
