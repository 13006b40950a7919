pub mod config_loader;

pub use config_loader::{
    find_config_files, is_config_file, load_work_config, load_work_configs, parse_work_config,
    ConfigFormat,
};
