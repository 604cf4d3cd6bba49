//! # 平面平均模块
//!
//! 提供体积场的方向平均、真空能级检测与剖面输出。
//!
//! ## 子模块
//! - `averager`: 方向平均与功函数计算核心
//! - `export`: 剖面数据导出
//! - `plot`: 剖面图表生成
//!
//! ## 依赖关系
//! - 被 `commands/wf.rs` 使用
//! - 使用 `models/field.rs`, `models/structure.rs`

pub mod averager;
pub mod export;
pub mod plot;

pub use averager::{
    compute_profiles, Axis, AxisChoice, DirectionalProfile, PlanarAverage, SHE_REFERENCE_EV,
};
