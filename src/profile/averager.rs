//! # 方向平均计算核心
//!
//! 将电势场和电荷密度场沿指定晶格轴收缩为一维剖面，并由电荷密度
//! 阈值定位真空区，导出功函数与 HER 电位。
//!
//! ## 算法概述
//! 1. 对沿平均轴的每个格点，求面内切片的总和
//! 2. 电势除以面内格点数得到平面平均 (eV)
//! 3. 电荷乘以面积元 dA 得到线电荷密度 (e/Å)，对距离积分还原总电荷
//! 4. 沿剖面找到第一个严格低于阈值的格点作为真空位置
//!
//! ## 单位约定
//! 电荷场取解析器输出 (e/Å³)；电势场必须由调用方预先乘以晶胞体积，
//! 将解析器的归一化值还原为 eV，见 `parsers/chgcar.rs`。
//!
//! ## 依赖关系
//! - 被 `commands/wf.rs` 调用
//! - 使用 `models/field.rs`, `models/structure.rs`

use crate::error::{Result, VutilityError};
use crate::models::{Lattice, VolumetricField};

/// 标准氢电极相对真空能级的参考值 (eV)
pub const SHE_REFERENCE_EV: f64 = 4.44;

/// 平均方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// 在 (x, y, z) 中的序号
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// 大写轴标记，用于输出文件后缀
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }

    /// 宽容解析用户输入的方向
    ///
    /// 接受 x/y/z 大小写单字符；其余输入一律纠正为 Z 并置 `corrected`，
    /// 由调用方打印警告，解析本身从不失败。
    pub fn from_user_input(input: &str) -> AxisChoice {
        match input.trim() {
            "x" | "X" => AxisChoice {
                axis: Axis::X,
                corrected: false,
            },
            "y" | "Y" => AxisChoice {
                axis: Axis::Y,
                corrected: false,
            },
            "z" | "Z" => AxisChoice {
                axis: Axis::Z,
                corrected: false,
            },
            _ => AxisChoice {
                axis: Axis::Z,
                corrected: true,
            },
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// 方向输入的解析结果
#[derive(Debug, Clone, Copy)]
pub struct AxisChoice {
    pub axis: Axis,

    /// 输入不合法，已被纠正为默认的 Z
    pub corrected: bool,
}

/// 一维方向剖面：(距离, 值) 对的有序序列
#[derive(Debug, Clone)]
pub struct DirectionalProfile {
    /// 距离坐标 (Å)，等间距覆盖整个晶格边长
    pub distances: Vec<f64>,

    /// 剖面值，与 `distances` 一一对应
    pub values: Vec<f64>,
}

impl DirectionalProfile {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 按序迭代 (距离, 值) 对
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.distances.iter().copied().zip(self.values.iter().copied())
    }
}

/// 平面平均结果
#[derive(Debug, Clone)]
pub struct PlanarAverage {
    /// 平面平均电势剖面 (eV)
    pub potential: DirectionalProfile,

    /// 线电荷密度剖面 (e/Å)
    pub charge: DirectionalProfile,

    /// 真空格点序号（沿剖面第一个电荷密度严格低于阈值的点）
    pub vacuum_index: usize,

    /// 真空位置 (Å)
    pub vacuum_distance: f64,

    /// 真空能级 E_vac (eV)
    pub vacuum_potential: f64,
}

impl PlanarAverage {
    /// 功函数 = E_vac - E_fermi (eV)
    pub fn work_function(&self, fermi_energy: f64) -> f64 {
        self.vacuum_potential - fermi_energy
    }

    /// HER 电位 = 功函数 - 4.44 eV（标准氢电极对齐）
    pub fn her_potential(&self, fermi_energy: f64) -> f64 {
        self.work_function(fermi_energy) - SHE_REFERENCE_EV
    }
}

/// 计算方向平均剖面
///
/// `potential` 必须已乘以晶胞体积（eV·格点归一化约定），`charge` 为
/// e/Å³ 电荷密度；两场网格必须一致。纯内存计算，无 I/O。
pub fn compute_profiles(
    potential: &VolumetricField,
    charge: &VolumetricField,
    lattice: &Lattice,
    axis: Axis,
    density_cutoff: f64,
) -> Result<PlanarAverage> {
    if potential.shape != charge.shape {
        return Err(VutilityError::GridMismatch {
            potential: potential.shape,
            charge: charge.shape,
        });
    }
    if potential.is_empty() {
        return Err(VutilityError::Other("Empty volumetric grid".to_string()));
    }

    let idir = axis.index();
    // 面内两轴取循环顺序，面积叉积项依赖这个次序
    let a = (idir + 1) % 3;
    let b = (idir + 2) % 3;

    let n = potential.shape;
    let plane_points = (n[a] * n[b]) as f64;

    // 电势：面内求和后除以格点数 → 平面平均 (eV)
    let mut potential_values = directional_sums(potential, idir);
    for v in &mut potential_values {
        *v /= plane_points;
    }

    // 电荷：乘以面积元 dA → 线密度 (e/Å)，面内面积是 2x2 子块行列式
    let m = lattice.matrix;
    let plane_area = m[a][a] * m[b][b] - m[a][b] * m[b][a];
    let d_area = plane_area / plane_points;
    let mut charge_values = directional_sums(charge, idir);
    for v in &mut charge_values {
        *v *= d_area;
    }

    // 距离轴：n-1 个等步长覆盖整个晶格边长
    let length = lattice.lengths()[idir];
    let steps = (n[idir] - 1).max(1) as f64;
    let distances: Vec<f64> = (0..n[idir]).map(|i| i as f64 * length / steps).collect();

    // 真空判据：第一个严格低于阈值的格点
    let vacuum_index = charge_values
        .iter()
        .position(|&c| c < density_cutoff)
        .ok_or(VutilityError::VacuumNotFound {
            cutoff: density_cutoff,
        })?;

    let vacuum_distance = distances[vacuum_index];
    let vacuum_potential = potential_values[vacuum_index];

    Ok(PlanarAverage {
        potential: DirectionalProfile {
            distances: distances.clone(),
            values: potential_values,
        },
        charge: DirectionalProfile {
            distances,
            values: charge_values,
        },
        vacuum_index,
        vacuum_distance,
        vacuum_potential,
    })
}

/// 沿 `idir` 的每个格点，对面内切片求和
fn directional_sums(field: &VolumetricField, idir: usize) -> Vec<f64> {
    let n = field.shape;
    let mut sums = vec![0.0; n[idir]];

    for k in 0..n[2] {
        for j in 0..n[1] {
            for i in 0..n[0] {
                let idx = [i, j, k];
                sums[idx[idir]] += field.at(i, j, k);
            }
        }
    }

    sums
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic_lattice(a: f64) -> Lattice {
        Lattice::from_vectors([[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]])
    }

    fn uniform_field(shape: [usize; 3], value: f64) -> VolumetricField {
        let total = shape[0] * shape[1] * shape[2];
        VolumetricField::new(shape, vec![value; total]).unwrap()
    }

    #[test]
    fn test_axis_from_user_input() {
        assert_eq!(Axis::from_user_input("x").axis, Axis::X);
        assert_eq!(Axis::from_user_input("Y").axis, Axis::Y);
        assert!(!Axis::from_user_input("z").corrected);

        let bad = Axis::from_user_input("q");
        assert_eq!(bad.axis, Axis::Z);
        assert!(bad.corrected);

        // 多字符输入同样回退到 Z
        let multi = Axis::from_user_input("zz");
        assert_eq!(multi.axis, Axis::Z);
        assert!(multi.corrected);
    }

    #[test]
    fn test_uniform_potential_average_is_value() {
        // 均匀场的平面平均在每个格点都等于该值（缩放的退化检验）
        let lattice = cubic_lattice(4.0);
        let potential = uniform_field([3, 4, 5], 7.5);
        let charge = uniform_field([3, 4, 5], 0.0);

        let result = compute_profiles(&potential, &charge, &lattice, Axis::Z, 1.0).unwrap();

        assert_eq!(result.potential.len(), 5);
        for &v in &result.potential.values {
            assert!((v - 7.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_vacuum_detection_is_strictly_below() {
        // 恰好等于阈值的格点不算真空，第一个严格低于阈值的才算
        let lattice = Lattice::from_vectors([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 4.0]]);
        let charge = VolumetricField::new([1, 1, 4], vec![1.0, 0.6, 0.6, 0.4]).unwrap();
        let potential = uniform_field([1, 1, 4], 0.0);

        let result = compute_profiles(&potential, &charge, &lattice, Axis::Z, 0.6).unwrap();

        assert_eq!(result.vacuum_index, 3);
    }

    #[test]
    fn test_vacuum_not_found() {
        let lattice = cubic_lattice(2.0);
        let potential = uniform_field([2, 2, 2], 0.0);
        let charge = uniform_field([2, 2, 2], 5.0);

        let err = compute_profiles(&potential, &charge, &lattice, Axis::Z, 1e-3).unwrap_err();
        assert!(matches!(err, VutilityError::VacuumNotFound { .. }));
    }

    #[test]
    fn test_grid_mismatch() {
        let lattice = cubic_lattice(2.0);
        let potential = uniform_field([2, 2, 2], 0.0);
        let charge = uniform_field([2, 2, 3], 0.0);

        let err = compute_profiles(&potential, &charge, &lattice, Axis::Z, 1.0).unwrap_err();
        assert!(matches!(err, VutilityError::GridMismatch { .. }));
    }

    #[test]
    fn test_distance_axis_spans_lattice_length() {
        // 端点 0 和全长，n-1 个等步长
        let lattice = Lattice::from_vectors([[6.0, 0.0, 0.0], [0.0, 6.0, 0.0], [0.0, 0.0, 12.0]]);
        let potential = uniform_field([2, 2, 7], 1.0);
        let charge = uniform_field([2, 2, 7], 0.0);

        let result = compute_profiles(&potential, &charge, &lattice, Axis::Z, 1.0).unwrap();
        let d = &result.potential.distances;

        assert_eq!(d.len(), 7);
        assert!((d[0]).abs() < 1e-12);
        assert!((d[6] - 12.0).abs() < 1e-12);
        let step = 12.0 / 6.0;
        for i in 1..7 {
            assert!((d[i] - d[i - 1] - step).abs() < 1e-12);
        }
    }

    #[test]
    fn test_work_function_identity() {
        let result = PlanarAverage {
            potential: DirectionalProfile {
                distances: vec![0.0],
                values: vec![4.3],
            },
            charge: DirectionalProfile {
                distances: vec![0.0],
                values: vec![0.0],
            },
            vacuum_index: 0,
            vacuum_distance: 0.0,
            vacuum_potential: 4.3,
        };

        let e_fermi = -2.7657;
        let wf = result.work_function(e_fermi);
        let her = result.her_potential(e_fermi);

        assert!((wf - (4.3 - e_fermi)).abs() < 1e-15);
        assert!((her - (wf - SHE_REFERENCE_EV)).abs() < 1e-15);
    }

    #[test]
    fn test_charge_profile_integrates_to_total_charge() {
        // Σ profile[i] * dx ≈ ∫ρ dV，步长细分时收敛
        let nz = 200;
        let lattice = Lattice::from_vectors([[3.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 10.0]]);
        let rho = 0.5;
        let charge = uniform_field([4, 4, nz], rho);
        let potential = uniform_field([4, 4, nz], 0.0);

        // cutoff 取大于剖面值 (rho * 面内面积)，index 0 即真空，不影响积分检验
        let profile_value = rho * 3.0 * 5.0;
        let result =
            compute_profiles(&potential, &charge, &lattice, Axis::Z, profile_value + 1.0).unwrap();

        let dx = 10.0 / (nz as f64 - 1.0);
        let integral: f64 = result.charge.values.iter().map(|v| v * dx).sum();
        let total_charge = rho * lattice.volume().abs();

        let rel_err = ((integral - total_charge) / total_charge).abs();
        assert!(rel_err < 0.01, "relative error {}", rel_err);
    }

    #[test]
    fn test_worked_example_vacuum_distance() {
        // cell diag(10,10,20), 轴 Z, 网格 (1,1,5), 线密度剖面 [1,1,1,0.5,0.1],
        // cutoff 0.6 → 真空序号 3, 距离 3*20/4 = 15.0
        let lattice =
            Lattice::from_vectors([[10.0, 0.0, 0.0], [0.0, 10.0, 0.0], [0.0, 0.0, 20.0]]);
        // dA = 10*10/1 = 100，场值 = 目标剖面 / dA
        let charge =
            VolumetricField::new([1, 1, 5], vec![0.01, 0.01, 0.01, 0.005, 0.001]).unwrap();
        let potential = uniform_field([1, 1, 5], 0.0);

        let result = compute_profiles(&potential, &charge, &lattice, Axis::Z, 0.6).unwrap();

        assert_eq!(result.vacuum_index, 3);
        assert!((result.vacuum_distance - 15.0).abs() < 1e-12);
        for (expected, &got) in [1.0, 1.0, 1.0, 0.5, 0.1].iter().zip(&result.charge.values) {
            assert!((expected - got).abs() < 1e-12);
        }
    }

    #[test]
    fn test_average_along_x_axis() {
        // 沿 X 平均时面内轴为 (y, z)，剖面长度为 nx
        let lattice = Lattice::from_vectors([[8.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]]);
        let mut data = vec![0.0; 3 * 2 * 2];
        // x = 2 的切片置为 4.0，其余为 0
        for k in 0..2 {
            for j in 0..2 {
                data[2 + 3 * (j + 2 * k)] = 4.0;
            }
        }
        let potential = VolumetricField::new([3, 2, 2], data).unwrap();
        let charge = uniform_field([3, 2, 2], 0.0);

        let result = compute_profiles(&potential, &charge, &lattice, Axis::X, 1.0).unwrap();

        assert_eq!(result.potential.len(), 3);
        assert!((result.potential.values[0]).abs() < 1e-12);
        assert!((result.potential.values[2] - 4.0).abs() < 1e-12);
        assert!((result.potential.distances[2] - 8.0).abs() < 1e-12);
    }
}
