//! # 解析器模块
//!
//! 提供 VASP 输入/输出文件格式的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: poscar, chgcar, outcar, xdatcar

pub mod chgcar;
pub mod outcar;
pub mod poscar;
pub mod xdatcar;
