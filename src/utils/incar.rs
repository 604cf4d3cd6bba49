//! # INCAR 模板生成工具
//!
//! 为抽取的轨迹帧生成单点计算 INCAR。
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs` 使用
//! - 无外部模块依赖

/// 单点计算 INCAR 配置
pub struct IncarConfig {
    pub system: String,
    pub encut: u32,
    pub sigma: f64,
    pub gga: String,
    pub ediff: String,
    pub nelm: u32,
    pub ncore: u32,
    /// 写出 LVHAR 电势（平面平均分析需要 LOCPOT）
    pub write_potential: bool,
}

impl Default for IncarConfig {
    fn default() -> Self {
        IncarConfig {
            system: "Pt111".to_string(),
            encut: 400,
            sigma: 0.2,
            gga: "RP".to_string(),
            ediff: "1E-6".to_string(),
            nelm: 500,
            ncore: 10,
            write_potential: true,
        }
    }
}

/// 生成 INCAR 文件内容
pub fn generate_incar(config: &IncarConfig) -> String {
    let lvhar = if config.write_potential {
        "LVHAR =.TRUE.\n"
    } else {
        ""
    };

    format!(
        r#"System={}
ISTART=1
ICHARG=1
ISMEAR=1
SIGMA={}
NWRITE=0
GGA={}
ENCUT={}
NSW=0
EDIFF={}
LREAL=Auto
NELM={}
NELMIN=8
ALGO=N
EDIFFG=-0.05
POTIM=0.5
ISIF=2
LWAVE=FALSE
LCHARG=T
IBRION=-1
NCORE={}
ISYM=0
{}IVDW=11"#,
        config.system,
        config.sigma,
        config.gga,
        config.encut,
        config.ediff,
        config.nelm,
        config.ncore,
        lvhar,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_incar_defaults() {
        let content = generate_incar(&IncarConfig::default());

        assert!(content.starts_with("System=Pt111\n"));
        assert!(content.contains("ENCUT=400\n"));
        assert!(content.contains("GGA=RP\n"));
        assert!(content.contains("LVHAR =.TRUE.\n"));
        // 单点计算: 不做离子弛豫
        assert!(content.contains("NSW=0\n"));
        assert!(content.contains("IBRION=-1\n"));
        assert!(content.ends_with("IVDW=11"));
    }

    #[test]
    fn test_generate_incar_without_potential() {
        let config = IncarConfig {
            write_potential: false,
            ..Default::default()
        };
        let content = generate_incar(&config);

        assert!(!content.contains("LVHAR"));
    }

    #[test]
    fn test_generate_incar_custom_system() {
        let config = IncarConfig {
            system: "Au111".to_string(),
            encut: 520,
            ..Default::default()
        };
        let content = generate_incar(&config);

        assert!(content.starts_with("System=Au111\n"));
        assert!(content.contains("ENCUT=520\n"));
    }
}
