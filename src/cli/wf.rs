//! # wf 子命令 CLI 定义
//!
//! 平面平均分析：沿晶格轴平均 LOCPOT/CHGCAR，定位真空能级，
//! 计算功函数与 HER 电位。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/wf.rs`

use clap::Args;
use std::path::PathBuf;

/// wf 子命令参数
#[derive(Args, Debug)]
pub struct WfArgs {
    /// Averaging direction: x, y or z (anything else falls back to z with a warning)
    pub direction: String,

    /// Charge-density cutoff defining the vacuum boundary (e/Ang)
    pub cutoff: f64,

    /// Directory containing the calculation files
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Potential file name inside the calculation directory
    #[arg(long, default_value = "LOCPOT")]
    pub locpot: String,

    /// Charge-density file name inside the calculation directory
    #[arg(long, default_value = "CHGCAR")]
    pub chgcar: String,

    /// Output file name for the Fermi level inside the calculation directory
    #[arg(long, default_value = "OUTCAR")]
    pub outcar: String,

    /// Also write the profiles as CSV files
    #[arg(long, default_value_t = false)]
    pub csv: bool,

    /// Plot the averaged potential profile to a PNG file
    #[arg(long)]
    pub plot: Option<PathBuf>,
}
