//! # 体积场数据模型
//!
//! 定义三维网格标量场 (LOCPOT 电势 / CHGCAR 电荷密度)。
//!
//! ## 存储布局
//! 与 CHGCAR 记录顺序一致：x 变化最快，z 变化最慢，
//! `data[i + nx*(j + ny*k)]` 对应格点 (i, j, k)。
//!
//! ## 依赖关系
//! - 被 `parsers/chgcar.rs`, `profile/` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};

/// 均匀网格上的三维标量场
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumetricField {
    /// 网格维度 [nx, ny, nz]
    pub shape: [usize; 3],

    /// 标量值，x 变化最快
    pub data: Vec<f64>,
}

impl VolumetricField {
    /// 创建标量场；数据长度必须等于 nx*ny*nz
    pub fn new(shape: [usize; 3], data: Vec<f64>) -> Option<Self> {
        if shape[0] * shape[1] * shape[2] != data.len() {
            return None;
        }
        Some(VolumetricField { shape, data })
    }

    /// 网格点总数
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 取格点 (i, j, k) 处的值
    #[inline]
    pub fn at(&self, i: usize, j: usize, k: usize) -> f64 {
        let [nx, ny, _] = self.shape;
        self.data[i + nx * (j + ny * k)]
    }

    /// 原地整体缩放
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.data {
            *v *= factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_length_mismatch() {
        assert!(VolumetricField::new([2, 2, 2], vec![0.0; 7]).is_none());
        assert!(VolumetricField::new([2, 2, 2], vec![0.0; 8]).is_some());
    }

    #[test]
    fn test_indexing_x_fastest() {
        // data[i + nx*(j + ny*k)]
        let data: Vec<f64> = (0..24).map(|v| v as f64).collect();
        let field = VolumetricField::new([2, 3, 4], data).unwrap();

        assert_eq!(field.at(0, 0, 0), 0.0);
        assert_eq!(field.at(1, 0, 0), 1.0);
        assert_eq!(field.at(0, 1, 0), 2.0);
        assert_eq!(field.at(0, 0, 1), 6.0);
        assert_eq!(field.at(1, 2, 3), 23.0);
    }

    #[test]
    fn test_scale() {
        let mut field = VolumetricField::new([1, 1, 3], vec![1.0, 2.0, 3.0]).unwrap();
        field.scale(2.5);

        assert_eq!(field.data, vec![2.5, 5.0, 7.5]);
    }
}
