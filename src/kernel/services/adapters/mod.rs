//! Service adapters: OS specific implementations (filesystem, paths).

pub mod paths;
pub mod settings;
pub mod storage;

pub use paths::{ensure_log_dir, ensure_state_dir, get_log_dir, get_state_dir};
pub use settings::{
    ensure_settings_file, ensure_settings_file_at, get_settings_path, load_settings_from,
};
pub use storage::{FileStorage, MemoryStorage};
