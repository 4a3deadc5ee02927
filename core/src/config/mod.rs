pub mod load;
pub mod types;

pub use load::{get_n1ght_data_dir, load_default, load_from_path};
pub use types::{
    AppConfig, DatabaseConfig, DecompileConfig, LoggingConfig, RunnerConfig, ScanConfig,
    ToolsConfig,
};
