//! # VASP CHGCAR/LOCPOT 体积数据解析器
//!
//! CHGCAR 和 LOCPOT 共用同一布局：POSCAR 头、空行、`NGX NGY NGZ` 维度行、
//! 随后 nx·ny·nz 个空白分隔的格点值（x 变化最快）。
//!
//! ## 单位约定
//! 返回的场值是文件值除以晶胞体积（与原脚本依赖的 ASE 读取器一致）。
//! CHGCAR 由此直接得到 e/Å³ 电荷密度；LOCPOT 的调用方需要先乘回体积
//! 才能恢复 eV 电势，见 `profile/averager.rs`。
//!
//! ## 依赖关系
//! - 被 `commands/wf.rs` 使用
//! - 使用 `parsers/poscar.rs`, `models/`

use crate::error::{Result, VutilityError};
use crate::models::{Crystal, VolumetricField};
use crate::parsers::poscar;
use std::fs;
use std::path::Path;

/// 一次体积文件读取的结果：晶体结构 + 标量场
#[derive(Debug, Clone)]
pub struct VolumetricData {
    pub crystal: Crystal,
    pub field: VolumetricField,
}

/// 解析 CHGCAR/LOCPOT 文件
pub fn parse_volumetric_file(path: &Path) -> Result<VolumetricData> {
    let content = fs::read_to_string(path).map_err(|e| VutilityError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_volumetric_content(
        &content,
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("CHGCAR"),
    )
}

/// 从字符串内容解析 CHGCAR/LOCPOT 格式
pub fn parse_volumetric_content(content: &str, source_name: &str) -> Result<VolumetricData> {
    let lines: Vec<&str> = content.lines().collect();

    // 头部以第一个空行结束
    let blank = lines
        .iter()
        .position(|l| l.trim().is_empty())
        .ok_or_else(|| VutilityError::ParseError {
            format: "chgcar".to_string(),
            path: source_name.to_string(),
            reason: "Missing blank line after structure header".to_string(),
        })?;

    let header = lines[..blank].join("\n");
    let crystal = poscar::parse_poscar_content(&header, source_name)?;

    // 空行后的第一个非空行是网格维度
    let mut idx = blank;
    while idx < lines.len() && lines[idx].trim().is_empty() {
        idx += 1;
    }
    if idx >= lines.len() {
        return Err(VutilityError::ParseError {
            format: "chgcar".to_string(),
            path: source_name.to_string(),
            reason: "Missing grid dimension line".to_string(),
        });
    }

    let dims: Vec<usize> = lines[idx]
        .split_whitespace()
        .filter_map(|s| s.parse().ok())
        .collect();
    if dims.len() != 3 || dims.contains(&0) {
        return Err(VutilityError::ParseError {
            format: "chgcar".to_string(),
            path: source_name.to_string(),
            reason: format!("Invalid grid dimension line: '{}'", lines[idx].trim()),
        });
    }
    let shape = [dims[0], dims[1], dims[2]];
    let total = shape[0] * shape[1] * shape[2];

    // 只读第一个数据块；自旋分量和 augmentation occupancies 被忽略
    let mut data = Vec::with_capacity(total);
    'outer: for line in &lines[idx + 1..] {
        for token in line.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| VutilityError::ParseError {
                format: "chgcar".to_string(),
                path: source_name.to_string(),
                reason: format!("Invalid grid value: '{}'", token),
            })?;
            data.push(value);
            if data.len() == total {
                break 'outer;
            }
        }
    }

    if data.len() != total {
        return Err(VutilityError::ParseError {
            format: "chgcar".to_string(),
            path: source_name.to_string(),
            reason: format!("Expected {} grid values, found {}", total, data.len()),
        });
    }

    // ASE 单位约定：存储值 = 文件值 / 晶胞体积
    let volume = crystal.lattice.volume().abs();
    for v in &mut data {
        *v /= volume;
    }

    let field = VolumetricField::new(shape, data).ok_or_else(|| VutilityError::ParseError {
        format: "chgcar".to_string(),
        path: source_name.to_string(),
        reason: "Grid data length mismatch".to_string(),
    })?;

    Ok(VolumetricData { crystal, field })
}
