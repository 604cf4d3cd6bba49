//! # 剖面图表生成
//!
//! 将平面平均电势剖面绘制为 PNG，标记真空能级位置。
//!
//! ## 依赖关系
//! - 被 `commands/wf.rs` 调用
//! - 使用 `profile/averager.rs` 的 PlanarAverage 结构
//! - 使用 `plotters` 库

use crate::error::{Result, VutilityError};
use crate::profile::PlanarAverage;

use plotters::prelude::*;
use std::path::Path;

/// 绘制平面平均电势剖面
pub fn plot_potential_profile(
    average: &PlanarAverage,
    title: &str,
    output_path: &Path,
) -> Result<()> {
    let profile = &average.potential;
    if profile.is_empty() {
        return Err(VutilityError::Other("No data to plot".to_string()));
    }

    let x_max = profile.distances.last().copied().unwrap_or(1.0);

    let y_min = profile
        .values
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    let y_max = profile
        .values
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let y_margin = ((y_max - y_min).abs() * 0.1).max(0.1);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| VutilityError::Other(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, (y_min - y_margin)..(y_max + y_margin))
        .map_err(|e| VutilityError::Other(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Distance (Ang)")
        .y_desc("Potential (eV)")
        .draw()
        .map_err(|e| VutilityError::Other(e.to_string()))?;

    // 电势曲线
    chart
        .draw_series(LineSeries::new(profile.points(), RED.stroke_width(2)))
        .map_err(|e| VutilityError::Other(e.to_string()))?
        .label("Planar average")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    // 标记真空位置
    chart
        .draw_series(std::iter::once(Circle::new(
            (average.vacuum_distance, average.vacuum_potential),
            6,
            GREEN.filled(),
        )))
        .map_err(|e| VutilityError::Other(e.to_string()))?
        .label("Vacuum level")
        .legend(|(x, y)| Circle::new((x + 10, y), 5, GREEN.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| VutilityError::Other(e.to_string()))?;

    root.present()
        .map_err(|e| VutilityError::Other(e.to_string()))?;

    Ok(())
}
