//! 配置管理
//!
//! `AppConfig` 只在启动阶段通过 `AppConfig::get()` 读取，
//! 业务组件在构造时接收各自的配置段。

mod loader;
mod structs;

pub use structs::*;
