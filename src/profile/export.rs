//! # 剖面数据导出
//!
//! 导出方向剖面到两列文本和 CSV 格式。
//!
//! ## 支持格式
//! - 文本: `#  Distance(Ang)     <量纲>` 头行 + 每格点一行 `距离 值`，
//!   数值按 8 位有效数字排版（%15.8g 等价）
//! - CSV: distance_ang + 值列
//!
//! ## 依赖关系
//! - 被 `commands/wf.rs` 调用
//! - 使用 `profile/averager.rs` 的 DirectionalProfile 结构
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{Result, VutilityError};
use crate::profile::DirectionalProfile;

use std::fs::File;
use std::io::Write;
use std::path::Path;

/// 剖面的值列类型，决定表头与列名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileColumn {
    /// 平面平均电势 (eV)
    Potential,
    /// 线电荷密度 (e/Å)
    ChargeDensity,
}

impl ProfileColumn {
    /// 文本输出的头行
    pub fn text_header(self) -> &'static str {
        match self {
            ProfileColumn::Potential => "#  Distance(Ang)     Potential(eV)",
            ProfileColumn::ChargeDensity => "#  Distance(Ang)     Chg. density (e/Ang)",
        }
    }

    /// CSV 输出的值列名
    pub fn csv_label(self) -> &'static str {
        match self {
            ProfileColumn::Potential => "potential_ev",
            ProfileColumn::ChargeDensity => "charge_e_per_ang",
        }
    }
}

/// 导出剖面为两列文本格式
pub fn write_profile(
    profile: &DirectionalProfile,
    column: ProfileColumn,
    output_path: &Path,
) -> Result<()> {
    let write_error = |e: std::io::Error| VutilityError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let mut file = File::create(output_path).map_err(write_error)?;

    writeln!(file, "{}", column.text_header()).map_err(write_error)?;
    for (distance, value) in profile.points() {
        writeln!(file, "{} {}", format_g(distance, 15, 8), format_g(value, 15, 8))
            .map_err(write_error)?;
    }

    Ok(())
}

/// 导出剖面为 CSV 格式
pub fn write_profile_csv(
    profile: &DirectionalProfile,
    column: ProfileColumn,
    output_path: &Path,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(|e| VutilityError::CsvError(e))?;

    wtr.write_record(["distance_ang", column.csv_label()])
        .map_err(|e| VutilityError::CsvError(e))?;

    for (distance, value) in profile.points() {
        wtr.write_record([format!("{:.8}", distance), format!("{:.8}", value)])
            .map_err(|e| VutilityError::CsvError(e))?;
    }

    wtr.flush().map_err(|e| VutilityError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 按 C 的 %*.{precision}g 规则排版浮点数：`precision` 位有效数字，
/// 指数超出 [-4, precision) 时切换科学计数，右对齐补足 `width`
pub fn format_g(value: f64, width: usize, precision: usize) -> String {
    let body = if value == 0.0 {
        "0".to_string()
    } else {
        let exp = value.abs().log10().floor() as i32;
        if exp < -4 || exp >= precision as i32 {
            format_exponential(value, precision)
        } else {
            let decimals = (precision as i32 - 1 - exp).max(0) as usize;
            trim_trailing_zeros(&format!("{:.*}", decimals, value))
        }
    };

    format!("{:>width$}", body, width = width)
}

fn format_exponential(value: f64, precision: usize) -> String {
    // Rust 产生 "1.2345678e-5"，补成 C 风格的 "1.2345678e-05"
    let raw = format!("{:.*e}", precision - 1, value);
    let (mantissa, exp) = raw.split_once('e').unwrap();
    let exp_val: i32 = exp.parse().unwrap();

    format!(
        "{}e{}{:02}",
        trim_trailing_zeros(mantissa),
        if exp_val < 0 { '-' } else { '+' },
        exp_val.abs()
    )
}

fn trim_trailing_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::DirectionalProfile;

    #[test]
    fn test_format_g_fixed() {
        assert_eq!(format_g(0.0, 15, 8), format!("{:>15}", "0"));
        assert_eq!(format_g(15.0, 15, 8), format!("{:>15}", "15"));
        assert_eq!(format_g(-2.5, 15, 8), format!("{:>15}", "-2.5"));
        assert_eq!(
            format_g(3.14159265358979, 15, 8),
            format!("{:>15}", "3.1415927")
        );
    }

    #[test]
    fn test_format_g_exponential() {
        assert_eq!(format_g(1e-6, 15, 8), format!("{:>15}", "1e-06"));
        assert_eq!(format_g(123456789.0, 15, 8), format!("{:>15}", "1.2345679e+08"));
        assert_eq!(format_g(-4.4e-5, 15, 8), format!("{:>15}", "-4.4e-05"));
    }

    #[test]
    fn test_format_g_significant_digits() {
        // 8 位有效数字，小数位随指数移动
        assert_eq!(format_g(0.00012345678, 15, 8).trim(), "0.00012345678");
        assert_eq!(format_g(1234.5678, 15, 8).trim(), "1234.5678");
    }

    #[test]
    fn test_write_profile_text() {
        let profile = DirectionalProfile {
            distances: vec![0.0, 5.0, 10.0],
            values: vec![1.0, 2.5, -0.125],
        };

        let dir = std::env::temp_dir().join("vutility_export_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("LOCPOT_Z");

        write_profile(&profile, ProfileColumn::Potential, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "#  Distance(Ang)     Potential(eV)");
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[1].split_whitespace().collect::<Vec<_>>(),
            vec!["0", "1"]
        );
        assert_eq!(
            lines[3].split_whitespace().collect::<Vec<_>>(),
            vec!["10", "-0.125"]
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_profile_csv() {
        let profile = DirectionalProfile {
            distances: vec![0.0, 1.0],
            values: vec![0.5, 0.25],
        };

        let dir = std::env::temp_dir().join("vutility_export_csv_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("profile.csv");

        write_profile_csv(&profile, ProfileColumn::ChargeDensity, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "distance_ang,charge_e_per_ang");
        assert_eq!(lines[1], "0.00000000,0.50000000");

        std::fs::remove_dir_all(&dir).ok();
    }
}
