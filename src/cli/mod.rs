//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `wf`: 平面平均电势/电荷分析，计算功函数与 HER 电位
//! - `extract`: 从 XDATCAR 轨迹抽取帧为 POSCAR 计算目录
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: wf, extract

pub mod extract;
pub mod wf;

use clap::{Parser, Subcommand};

/// Vutility - VASP 表面计算工作流工具箱
#[derive(Parser)]
#[command(name = "vutility")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "A unified VASP surface-workflow toolkit", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Average LOCPOT/CHGCAR along an axis and report work function / HER potential
    Wf(wf::WfArgs),

    /// Extract trajectory frames from XDATCAR into POSCAR calculation folders
    Extract(extract::ExtractArgs),
}
