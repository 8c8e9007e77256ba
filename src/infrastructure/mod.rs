//! 基础设施层：日志、ID 生成

pub mod id_generator;
pub mod logger;
