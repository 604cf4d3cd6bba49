//! # extract 命令实现
//!
//! 从 XDATCAR 轨迹抽取指定帧，生成可直接提交的计算目录。
//!
//! ## 功能
//! - 解析 XDATCAR，校验帧序号
//! - 每帧建立 `<目录名>_<帧号>` 文件夹并写入 POSCAR
//! - 复制 KPOINTS / POTCAR / sub.sh / SELECTED_ATOMS_LIST
//! - 生成默认单点 INCAR
//! - 支持并行处理
//!
//! ## 依赖关系
//! - 使用 `cli/extract.rs` 定义的参数
//! - 使用 `parsers/xdatcar.rs`, `parsers/poscar.rs`
//! - 使用 `utils/incar.rs`, `utils/output.rs`, `utils/progress.rs`

use crate::cli::extract::ExtractArgs;
use crate::error::{Result, VutilityError};
use crate::parsers::{poscar, xdatcar};
use crate::utils::incar::{generate_incar, IncarConfig};
use crate::utils::{output, progress};

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 每帧尝试复制的辅助文件；缺失只警告不中断
const SIDECAR_FILES: [&str; 3] = ["KPOINTS", "POTCAR", "sub.sh"];

/// 可选辅助文件；缺失时静默跳过
const OPTIONAL_SIDECAR_FILES: [&str; 1] = ["SELECTED_ATOMS_LIST"];

/// 执行 extract 命令
pub fn execute(args: ExtractArgs) -> Result<()> {
    output::print_header("Extracting Trajectory Frames");

    // 验证目录
    if !args.dir.exists() {
        return Err(VutilityError::DirectoryNotFound {
            path: args.dir.display().to_string(),
        });
    }

    let xdatcar_path = args.dir.join(&args.xdatcar);
    if !xdatcar_path.exists() {
        return Err(VutilityError::FileNotFound {
            path: xdatcar_path.display().to_string(),
        });
    }

    output::print_info(&format!("Reading trajectory from '{}'", args.xdatcar));
    let trajectory = xdatcar::parse_xdatcar_file(&xdatcar_path)?;
    output::print_info(&format!(
        "Trajectory holds {} frame(s); extracting {:?}",
        trajectory.len(),
        args.frames
    ));

    // 先整体校验帧序号，越界立即失败而不是写到一半
    for &frame in &args.frames {
        if frame >= trajectory.len() {
            return Err(VutilityError::FrameOutOfRange {
                frame,
                available: trajectory.len(),
            });
        }
    }

    // 辅助文件只检查一次，缺失统一警告
    let sidecars = collect_sidecars(&args.dir);
    if args.system.is_none() {
        output::print_warning("INCAR is set to the default single-point template (override SYSTEM with --system)");
    }

    let incar_config = IncarConfig {
        system: args
            .system
            .clone()
            .unwrap_or_else(|| IncarConfig::default().system),
        ..Default::default()
    };
    let incar_content = generate_incar(&incar_config);

    let folder_stem = folder_stem(&args.dir);

    // 设置并行度
    let num_threads = if args.jobs == 0 {
        num_cpus::get()
    } else {
        args.jobs
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok();

    let pb = progress::create_progress_bar(args.frames.len() as u64, "Extracting");
    let success_count = AtomicUsize::new(0);

    // 并行处理各帧
    args.frames.par_iter().for_each(|&frame| {
        let result = extract_frame(
            &trajectory,
            frame,
            &args.dir,
            &folder_stem,
            &sidecars,
            &incar_content,
            args.overwrite,
        );

        match result {
            Ok(()) => {
                success_count.fetch_add(1, Ordering::SeqCst);
            }
            Err(e) => {
                pb.suspend(|| {
                    output::print_error(&format!("Frame {}: {}", frame, e));
                });
            }
        }
        pb.inc(1);
    });

    pb.finish_and_clear();

    output::print_done(&format!(
        "Extracted {} of {} frame(s) from '{}'",
        success_count.load(Ordering::SeqCst),
        args.frames.len(),
        args.xdatcar
    ));

    Ok(())
}

/// 抽取单帧到自己的计算目录
fn extract_frame(
    trajectory: &xdatcar::Trajectory,
    frame: usize,
    base_dir: &Path,
    folder_stem: &str,
    sidecars: &[PathBuf],
    incar_content: &str,
    overwrite: bool,
) -> Result<()> {
    let crystal = trajectory.frame(frame)?;

    let folder = base_dir.join(format!("{}_{}", folder_stem, frame));
    if folder.exists() && !overwrite {
        return Err(VutilityError::DirectoryExists {
            path: folder.display().to_string(),
        });
    }
    fs::create_dir_all(&folder).map_err(|e| VutilityError::FileWriteError {
        path: folder.display().to_string(),
        source: e,
    })?;

    // POSCAR
    let poscar_path = folder.join("POSCAR");
    fs::write(&poscar_path, poscar::to_poscar_string(&crystal)).map_err(|e| {
        VutilityError::FileWriteError {
            path: poscar_path.display().to_string(),
            source: e,
        }
    })?;

    // 辅助文件
    for sidecar in sidecars {
        let file_name = sidecar.file_name().unwrap_or_default();
        let target = folder.join(file_name);
        fs::copy(sidecar, &target).map_err(|e| VutilityError::FileWriteError {
            path: target.display().to_string(),
            source: e,
        })?;
    }

    // INCAR
    let incar_path = folder.join("INCAR");
    fs::write(&incar_path, incar_content).map_err(|e| VutilityError::FileWriteError {
        path: incar_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 收集存在的辅助文件，对缺失的必备项发出警告
fn collect_sidecars(dir: &Path) -> Vec<PathBuf> {
    let mut present = Vec::new();

    for name in SIDECAR_FILES {
        let path = dir.join(name);
        if path.exists() {
            present.push(path);
        } else {
            output::print_warning(&format!("{} not found!", name));
        }
    }

    for name in OPTIONAL_SIDECAR_FILES {
        let path = dir.join(name);
        if path.exists() {
            present.push(path);
        }
    }

    present
}

/// 帧目录的名称前缀：分析目录的基名
fn folder_stem(dir: &Path) -> String {
    dir.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| "frame".to_string())
}
