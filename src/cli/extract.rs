//! # extract 子命令 CLI 定义
//!
//! 从 XDATCAR 轨迹抽取帧，生成 POSCAR 计算目录。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/extract.rs`

use clap::Args;
use std::path::PathBuf;

/// extract 子命令参数
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Zero-based frame indices to extract
    #[arg(required = true)]
    pub frames: Vec<usize>,

    /// Directory containing the trajectory and sidecar files
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Trajectory file name inside the directory
    #[arg(long, default_value = "XDATCAR")]
    pub xdatcar: String,

    /// SYSTEM tag for the generated INCAR
    #[arg(long)]
    pub system: Option<String>,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite existing frame folders
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
