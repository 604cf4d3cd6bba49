//! # VASP OUTCAR 解析器
//!
//! 解析 VASP 计算输出文件 OUTCAR，提取费米能级。
//!
//! ## 依赖关系
//! - 被 `commands/wf.rs` 使用
//! - 使用 `regex` crate

use crate::error::{Result, VutilityError};
use regex::Regex;
use std::fs;
use std::path::Path;

/// 从 OUTCAR 提取费米能级 (eV)
///
/// 自洽循环每一步都会写一行 `E-fermi :  <value>`，取最后一次出现的值。
pub fn parse_fermi_energy(path: &Path) -> Result<f64> {
    let content = fs::read_to_string(path).map_err(|e| VutilityError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    extract_fermi_energy(&content).ok_or_else(|| VutilityError::FermiNotFound {
        path: path.display().to_string(),
    })
}

/// 从 OUTCAR 文本内容提取费米能级
pub fn extract_fermi_energy(content: &str) -> Option<f64> {
    // "E-fermi :  -2.7657     XC(G=0): ..."
    let re = Regex::new(r"E-fermi\s*:\s*([-\d.]+)").unwrap();

    re.captures_iter(content)
        .filter_map(|cap| cap.get(1)?.as_str().parse::<f64>().ok())
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_fermi_energy() {
        let content = "\
 FREE ENERGIE OF THE ION-ELECTRON SYSTEM (eV)
 E-fermi :  -2.7657     XC(G=0): -12.1705     alpha+bet : -11.8821
";
        let e = extract_fermi_energy(content).unwrap();
        assert!((e - (-2.7657)).abs() < 1e-10);
    }

    #[test]
    fn test_extract_fermi_energy_takes_last() {
        let content = "\
 E-fermi :   1.0000     XC(G=0): -12.0
 some unrelated line
 E-fermi :  -3.5000     XC(G=0): -12.1
";
        let e = extract_fermi_energy(content).unwrap();
        assert!((e - (-3.5)).abs() < 1e-10);
    }

    #[test]
    fn test_extract_fermi_energy_missing() {
        assert!(extract_fermi_energy("no fermi level here").is_none());
    }
}
