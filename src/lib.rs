//! School Admin - 学校教务管理后端服务
//!
//! 基于 Actix Web 构建，覆盖班级、教职工、学生、监护人、课表、收费、考勤、考试与批量导入。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis），监护人绑定码存放于此
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
