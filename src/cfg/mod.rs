//! cfg 模块 - 配置加载
//!
//! 从本地文件加载配置，支持 JSON/JSON5/YAML/TOML 格式

pub mod file_source;

pub use file_source::{expand_env_vars, load, load_value, ConfigFormat};
