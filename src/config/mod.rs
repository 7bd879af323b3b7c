pub mod loader;
pub mod schema;

pub use loader::{discover, load_from_path, load_from_str, ConfigError, CONFIG_ENV, CONFIG_FILE_NAME};
pub use schema::{ParseSettings, PruneSettings, SolqConfig, ValidationError, ValidationIssue};
