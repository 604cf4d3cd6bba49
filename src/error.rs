//! # 统一错误处理模块
//!
//! 定义 Vutility 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// Vutility 统一错误类型
#[derive(Error, Debug)]
pub enum VutilityError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Directory already exists: {path} (use --overwrite to replace)")]
    DirectoryExists { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("No 'E-fermi' entry found in: {path}")]
    FermiNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 平面平均错误
    // ─────────────────────────────────────────────────────────────
    #[error("Grid dimensions differ between potential {potential:?} and charge {charge:?}")]
    GridMismatch {
        potential: [usize; 3],
        charge: [usize; 3],
    },

    #[error("Charge density never drops below cutoff {cutoff:e}; no vacuum region found")]
    VacuumNotFound { cutoff: f64 },

    // ─────────────────────────────────────────────────────────────
    // 轨迹错误
    // ─────────────────────────────────────────────────────────────
    #[error("Frame {frame} out of range: trajectory holds {available} frame(s)")]
    FrameOutOfRange { frame: usize, available: usize },

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, VutilityError>;
