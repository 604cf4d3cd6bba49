//! # wf 命令实现
//!
//! 平面平均分析管线。
//!
//! ## 功能
//! - 读取 LOCPOT/CHGCAR/OUTCAR
//! - 沿指定轴做方向平均，定位真空能级
//! - 打印晶格参数、网格规模和结果表格
//! - 写出电势/电荷剖面（文本，可选 CSV 与 PNG）
//!
//! ## 依赖关系
//! - 使用 `cli/wf.rs` 定义的参数
//! - 使用 `parsers/chgcar.rs`, `parsers/outcar.rs`
//! - 使用 `profile/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::wf::WfArgs;
use crate::error::{Result, VutilityError};
use crate::parsers::{chgcar, outcar};
use crate::profile::export::{self, ProfileColumn};
use crate::profile::{self, plot, Axis};
use crate::utils::{output, progress};

use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 结果表格行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// 执行 wf 命令
pub fn execute(args: WfArgs) -> Result<()> {
    output::print_header("Planar-Average Analysis");

    // 验证目录
    if !args.dir.exists() {
        return Err(VutilityError::DirectoryNotFound {
            path: args.dir.display().to_string(),
        });
    }

    // 方向解析是宽容的：非法输入回退到 z 并警告
    let choice = Axis::from_user_input(&args.direction);
    if choice.corrected {
        output::print_warning(&format!(
            "The direction '{}' was input incorrectly. Setting to z-direction by default.",
            args.direction
        ));
    }
    let axis = choice.axis;

    let locpot_path = resolve_input(&args.dir, &args.locpot)?;
    let chgcar_path = resolve_input(&args.dir, &args.chgcar)?;
    let outcar_path = resolve_input(&args.dir, &args.outcar)?;

    output::print_info(&format!(
        "Reading {}, {}, {}",
        args.locpot, args.chgcar, args.outcar
    ));
    output::print_info(&format!("Performing average in {} direction", axis));
    output::print_info(&format!("Cutoff density is {:.6} e/Ang", args.cutoff));

    // 体积文件可能有几百 MB，读取期间给出反馈
    let spinner = progress::create_spinner("Reading volumetric data...");
    let potential_data = chgcar::parse_volumetric_file(&locpot_path)?;
    let charge_data = chgcar::parse_volumetric_file(&chgcar_path)?;
    spinner.finish_and_clear();

    let fermi_energy = outcar::parse_fermi_energy(&outcar_path)?;

    let crystal = charge_data.crystal;
    let lattice = crystal.lattice.clone();

    let [a, b, c] = lattice.lengths();
    output::print_info("Lattice parameters:");
    println!("    a = {:10.6} Ang", a);
    println!("    b = {:10.6} Ang", b);
    println!("    c = {:10.6} Ang", c);

    let shape = potential_data.field.shape;
    output::print_info(&format!(
        "Potential stored on a {}x{}x{} grid ({} points)",
        shape[0],
        shape[1],
        shape[2],
        potential_data.field.len()
    ));

    // 解析器按 ASE 约定将场值除以体积，电势要先乘回去才是 eV
    let mut potential = potential_data.field;
    potential.scale(lattice.volume().abs());

    let average = profile::compute_profiles(
        &potential,
        &charge_data.field,
        &lattice,
        axis,
        args.cutoff,
    )?;

    // 结果汇总
    let work_function = average.work_function(fermi_energy);
    let her_potential = average.her_potential(fermi_energy);

    output::print_header("Results");

    let rows = vec![
        SummaryRow {
            quantity: "Vacuum distance (Ang)".to_string(),
            value: format!("{:10.6}", average.vacuum_distance),
        },
        SummaryRow {
            quantity: "E_vac (eV)".to_string(),
            value: format!("{:10.6}", average.vacuum_potential),
        },
        SummaryRow {
            quantity: "E_fermi (eV)".to_string(),
            value: format!("{:10.6}", fermi_energy),
        },
        SummaryRow {
            quantity: "Work function (eV)".to_string(),
            value: format!("{:10.6}", work_function),
        },
        SummaryRow {
            quantity: "HER potential (eV)".to_string(),
            value: format!("{:10.6}", her_potential),
        },
    ];
    println!("{}", Table::new(&rows));

    // 写出剖面
    let suffix = format!("_{}", axis.letter());
    let potential_out = args.dir.join(format!("{}{}", args.locpot, suffix));
    let charge_out = args.dir.join(format!("{}{}", args.chgcar, suffix));

    export::write_profile(&average.potential, ProfileColumn::Potential, &potential_out)?;
    export::write_profile(&average.charge, ProfileColumn::ChargeDensity, &charge_out)?;
    output::print_success(&format!(
        "Averaged data written to '{}' and '{}'",
        potential_out.display(),
        charge_out.display()
    ));

    if args.csv {
        let potential_csv = potential_out.with_extension("csv");
        let charge_csv = charge_out.with_extension("csv");
        export::write_profile_csv(&average.potential, ProfileColumn::Potential, &potential_csv)?;
        export::write_profile_csv(&average.charge, ProfileColumn::ChargeDensity, &charge_csv)?;
        output::print_success(&format!(
            "CSV profiles written to '{}' and '{}'",
            potential_csv.display(),
            charge_csv.display()
        ));
    }

    if let Some(ref plot_path) = args.plot {
        let title = format!("Planar-averaged potential ({})", crystal.formula());
        plot::plot_potential_profile(&average, &title, plot_path)?;
        output::print_success(&format!("Profile plot saved to '{}'", plot_path.display()));
    }

    output::print_done("Planar-average analysis finished");

    Ok(())
}

/// 在分析目录下定位输入文件
fn resolve_input(dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    if !path.exists() {
        return Err(VutilityError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(path)
}
