//! # 晶体结构数据模型
//!
//! 定义统一的晶体结构表示，被 POSCAR/CHGCAR/XDATCAR 解析器共享。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `commands/` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};

/// 晶格参数表示
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lattice {
    /// 晶格向量矩阵 (3x3)，行向量表示 a, b, c
    /// [[a1, a2, a3], [b1, b2, b3], [c1, c2, c3]]
    pub matrix: [[f64; 3]; 3],
}

impl Lattice {
    /// 从晶格向量矩阵创建
    pub fn from_vectors(matrix: [[f64; 3]; 3]) -> Self {
        Lattice { matrix }
    }

    /// 三个晶格向量的长度 (Å)
    pub fn lengths(&self) -> [f64; 3] {
        let norm = |v: &[f64; 3]| (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        [
            norm(&self.matrix[0]),
            norm(&self.matrix[1]),
            norm(&self.matrix[2]),
        ]
    }

    /// 获取晶格参数 (a, b, c, alpha, beta, gamma)
    pub fn parameters(&self) -> (f64, f64, f64, f64, f64, f64) {
        let a_vec = self.matrix[0];
        let b_vec = self.matrix[1];
        let c_vec = self.matrix[2];

        let [a, b, c] = self.lengths();

        let dot_bc: f64 = b_vec.iter().zip(c_vec.iter()).map(|(x, y)| x * y).sum();
        let dot_ac: f64 = a_vec.iter().zip(c_vec.iter()).map(|(x, y)| x * y).sum();
        let dot_ab: f64 = a_vec.iter().zip(b_vec.iter()).map(|(x, y)| x * y).sum();

        let alpha = (dot_bc / (b * c)).acos().to_degrees();
        let beta = (dot_ac / (a * c)).acos().to_degrees();
        let gamma = (dot_ab / (a * b)).acos().to_degrees();

        (a, b, c, alpha, beta, gamma)
    }

    /// 计算晶格体积
    pub fn volume(&self) -> f64 {
        let a = self.matrix[0];
        let b = self.matrix[1];
        let c = self.matrix[2];

        // 行列式计算
        a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0])
            + a[2] * (b[0] * c[1] - b[1] * c[0])
    }
}

/// 原子信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Atom {
    /// 元素符号
    pub element: String,

    /// 分数坐标 [x, y, z]
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(element: impl Into<String>, position: [f64; 3]) -> Self {
        Atom {
            element: element.into(),
            position,
        }
    }
}

/// 晶体结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crystal {
    /// 结构名称
    pub name: String,

    /// 晶格
    pub lattice: Lattice,

    /// 原子列表
    pub atoms: Vec<Atom>,
}

impl Crystal {
    pub fn new(name: impl Into<String>, lattice: Lattice, atoms: Vec<Atom>) -> Self {
        Crystal {
            name: name.into(),
            lattice,
            atoms,
        }
    }

    /// 计算化学式
    pub fn formula(&self) -> String {
        use std::collections::BTreeMap;
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

        for atom in &self.atoms {
            *counts.entry(atom.element.as_str()).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .map(|(el, count)| {
                if count == 1 {
                    el.to_string()
                } else {
                    format!("{}{}", el, count)
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// 按解析顺序给出元素分组 (元素, 个数)，保持原子排列不变
    pub fn element_groups(&self) -> Vec<(String, usize)> {
        let mut groups: Vec<(String, usize)> = Vec::new();

        for atom in &self.atoms {
            match groups.last_mut() {
                Some((el, count)) if *el == atom.element => *count += 1,
                _ => groups.push((atom.element.clone(), 1)),
            }
        }

        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_lengths() {
        let lattice = Lattice::from_vectors([[3.0, 4.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 20.0]]);
        let [a, b, c] = lattice.lengths();

        assert!((a - 5.0).abs() < 1e-12);
        assert!((b - 5.0).abs() < 1e-12);
        assert!((c - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_lattice_volume_cubic() {
        let lattice = Lattice::from_vectors([[5.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 5.0]]);
        let vol = lattice.volume().abs();

        // 5^3 = 125
        assert!((vol - 125.0).abs() < 1e-6);
    }

    #[test]
    fn test_lattice_parameters_orthorhombic() {
        let lattice = Lattice::from_vectors([[4.0, 0.0, 0.0], [0.0, 6.0, 0.0], [0.0, 0.0, 8.0]]);
        let (a, b, c, alpha, beta, gamma) = lattice.parameters();

        assert!((a - 4.0).abs() < 1e-6);
        assert!((b - 6.0).abs() < 1e-6);
        assert!((c - 8.0).abs() < 1e-6);
        assert!((alpha - 90.0).abs() < 1e-6);
        assert!((beta - 90.0).abs() < 1e-6);
        assert!((gamma - 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_crystal_formula() {
        let lattice = Lattice::from_vectors([[5.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 5.0]]);
        let atoms = vec![
            Atom::new("Pt", [0.0, 0.0, 0.0]),
            Atom::new("Pt", [0.5, 0.5, 0.0]),
            Atom::new("H", [0.5, 0.5, 0.5]),
        ];
        let crystal = Crystal::new("Pt111", lattice, atoms);

        assert_eq!(crystal.formula(), "HPt2");
    }

    #[test]
    fn test_element_groups_preserve_order() {
        let lattice = Lattice::from_vectors([[5.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 5.0]]);
        let atoms = vec![
            Atom::new("Pt", [0.0, 0.0, 0.0]),
            Atom::new("Pt", [0.5, 0.5, 0.0]),
            Atom::new("O", [0.2, 0.2, 0.2]),
            Atom::new("Pt", [0.5, 0.0, 0.5]),
        ];
        let crystal = Crystal::new("slab", lattice, atoms);

        // 不合并隔开的同元素组，写回 POSCAR 时保持原顺序
        assert_eq!(
            crystal.element_groups(),
            vec![
                ("Pt".to_string(), 2),
                ("O".to_string(), 1),
                ("Pt".to_string(), 1)
            ]
        );
    }
}
