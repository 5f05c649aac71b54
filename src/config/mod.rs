//! 配置管理
//!
//! 配置按 `config.toml` → `config.{APP_ENV}.toml` → `SCHOOL_*` 环境变量的顺序叠加，
//! 所有字段都有默认值，无配置文件时也能启动。

mod r#impl;
mod structs;

pub use structs::*;
