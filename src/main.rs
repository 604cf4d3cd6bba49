//! # Vutility - VASP 表面计算工作流工具箱
//!
//! 将分散的表面计算辅助脚本用 Rust 重构，统一成单一可执行文件。
//!
//! ## 子命令
//! - `wf` - 平面平均电势/电荷分析，计算功函数与 HER 电位
//! - `extract` - 从 XDATCAR 轨迹抽取帧为 POSCAR 计算目录
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (格式解析器)
//!   │     ├── profile/   (平面平均核心)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod profile;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
