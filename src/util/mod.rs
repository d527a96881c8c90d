//! Utility modules

pub mod paths;
pub mod random;

pub use paths::{config_path, data_dir, init_data_dir, log_file_path, logs_dir};
pub use random::{random_array, random_array_with};
