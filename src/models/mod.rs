//! # 数据模型模块
//!
//! 定义统一的晶体结构和体积场数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `profile/`, `commands/` 使用
//! - 子模块: structure, field

pub mod field;
pub mod structure;

pub use field::VolumetricField;
pub use structure::{Atom, Crystal, Lattice};
