//! # VASP XDATCAR 轨迹解析器
//!
//! 解析定胞分子动力学轨迹：POSCAR 式头部一次（无坐标类型行），随后每帧
//! 一个 `Direct configuration=  N` 块，包含 natoms 行分数坐标。
//!
//! 变胞轨迹（每帧重复头部）不受支持，会作为解析错误报告。
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs` 使用
//! - 使用 `models/structure.rs`

use crate::error::{Result, VutilityError};
use crate::models::{Atom, Crystal, Lattice};
use std::fs;
use std::path::Path;

/// 已解析的定胞轨迹
#[derive(Debug, Clone)]
pub struct Trajectory {
    /// 结构名称（头部注释行）
    pub name: String,

    /// 晶格，整条轨迹共享
    pub lattice: Lattice,

    /// 按原子顺序展开的元素符号，长度即原子数
    elements: Vec<String>,

    /// 每帧的分数坐标，每帧长度等于原子数
    frames: Vec<Vec<[f64; 3]>>,
}

impl Trajectory {
    /// 轨迹帧数
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// 取出第 `index` 帧（从 0 开始计数）作为完整结构
    pub fn frame(&self, index: usize) -> Result<Crystal> {
        let positions = self
            .frames
            .get(index)
            .ok_or(VutilityError::FrameOutOfRange {
                frame: index,
                available: self.frames.len(),
            })?;

        let atoms: Vec<Atom> = self
            .elements
            .iter()
            .zip(positions.iter())
            .map(|(el, &pos)| Atom::new(el.clone(), pos))
            .collect();

        Ok(Crystal::new(self.name.clone(), self.lattice.clone(), atoms))
    }
}

/// 解析 XDATCAR 文件
pub fn parse_xdatcar_file(path: &Path) -> Result<Trajectory> {
    let content = fs::read_to_string(path).map_err(|e| VutilityError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_xdatcar_content(
        &content,
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("XDATCAR"),
    )
}

/// 从字符串内容解析 XDATCAR 格式
pub fn parse_xdatcar_content(content: &str, source_name: &str) -> Result<Trajectory> {
    let parse_error = |reason: String| VutilityError::ParseError {
        format: "xdatcar".to_string(),
        path: source_name.to_string(),
        reason,
    };

    let lines: Vec<&str> = content.lines().collect();

    // 头部: 注释行、缩放因子、3 个晶格向量、元素行、计数行
    if lines.len() < 7 {
        return Err(parse_error("File too short".to_string()));
    }

    let name = lines[0].trim().to_string();
    let scale: f64 = lines[1].trim().parse().unwrap_or(1.0);

    let mut matrix = [[0.0; 3]; 3];
    for i in 0..3 {
        let parts: Vec<f64> = lines[2 + i]
            .split_whitespace()
            .filter_map(|s| s.parse().ok())
            .collect();
        if parts.len() < 3 {
            return Err(parse_error(format!("Invalid lattice vector at line {}", 3 + i)));
        }
        matrix[i] = [parts[0] * scale, parts[1] * scale, parts[2] * scale];
    }
    let lattice = Lattice::from_vectors(matrix);

    let symbols: Vec<&str> = lines[5].split_whitespace().collect();
    let counts: Vec<usize> = lines[6]
        .split_whitespace()
        .filter_map(|s| s.parse().ok())
        .collect();
    if symbols.is_empty() || symbols.len() != counts.len() {
        return Err(parse_error(
            "Element symbols and counts do not match".to_string(),
        ));
    }

    let mut elements: Vec<String> = Vec::new();
    for (sym, &count) in symbols.iter().zip(counts.iter()) {
        for _ in 0..count {
            elements.push(sym.to_string());
        }
    }
    let natoms = elements.len();
    if natoms == 0 {
        return Err(parse_error("Header declares no atoms".to_string()));
    }

    // 逐帧读取坐标块
    let mut frames: Vec<Vec<[f64; 3]>> = Vec::new();
    let mut idx = 7;

    while idx < lines.len() {
        if lines[idx].trim().is_empty() {
            idx += 1;
            continue;
        }
        if !is_configuration_marker(lines[idx]) {
            // 帧之间出现头部行说明是变胞轨迹
            return Err(parse_error(format!(
                "Unexpected line between frames (variable-cell trajectory?): '{}'",
                lines[idx].trim()
            )));
        }

        let mut positions = Vec::with_capacity(natoms);
        for offset in 0..natoms {
            let line = lines
                .get(idx + 1 + offset)
                .ok_or_else(|| parse_error(format!("Frame {} is truncated", frames.len() + 1)))?;
            let parts: Vec<f64> = line
                .split_whitespace()
                .take(3)
                .filter_map(|s| s.parse().ok())
                .collect();
            if parts.len() < 3 {
                return Err(parse_error(format!(
                    "Invalid coordinate line: '{}'",
                    line.trim()
                )));
            }
            positions.push([parts[0], parts[1], parts[2]]);
        }
        frames.push(positions);
        idx += 1 + natoms;
    }

    if frames.is_empty() {
        return Err(parse_error(
            "No 'Direct configuration=' marker found".to_string(),
        ));
    }

    Ok(Trajectory {
        name,
        lattice,
        elements,
        frames,
    })
}

fn is_configuration_marker(line: &str) -> bool {
    line.trim_start().starts_with("Direct configuration=")
}
