//! Chart rendering with plotters.

use crate::dataset::{CleanRecord, Month, monthly_totals, stage_counts};
use plotters::prelude::*;
use salesbrief_core::{BriefError, Result};
use std::path::{Path, PathBuf};

/// Directory all chart files land in, relative to the pipeline working
/// directory.
pub const CHART_DIR: &str = "charts_sales_performance";

/// File name of the monthly sales line chart.
pub const SALES_OVER_TIME_FILE: &str = "total_sales_over_time.png";

/// File name of the stage distribution pie chart.
pub const STAGE_DISTRIBUTION_FILE: &str = "opportunity_stage_distribution.png";

const CHART_SIZE: (u32, u32) = (1000, 600);

const SLICE_COLORS: [RGBColor; 8] = [
    RGBColor(66, 133, 244),
    RGBColor(219, 68, 55),
    RGBColor(244, 180, 0),
    RGBColor(15, 157, 88),
    RGBColor(171, 71, 188),
    RGBColor(0, 172, 193),
    RGBColor(255, 112, 67),
    RGBColor(158, 157, 36),
];

fn chart_err(e: impl std::fmt::Display) -> BriefError {
    BriefError::Chart(e.to_string())
}

/// Render both charts under `base_dir`, creating the chart directory when
/// absent. File names are fixed, so reruns overwrite. Returns the paths in
/// render order.
pub fn render_charts(base_dir: &Path, records: &[CleanRecord]) -> Result<Vec<PathBuf>> {
    let chart_dir = base_dir.join(CHART_DIR);
    std::fs::create_dir_all(&chart_dir)?;

    let monthly: Vec<(Month, f64)> = monthly_totals(records).into_iter().collect();
    let sales_path = chart_dir.join(SALES_OVER_TIME_FILE);
    render_sales_over_time(&sales_path, &monthly)?;

    let counts = stage_counts(records);
    let stage_path = chart_dir.join(STAGE_DISTRIBUTION_FILE);
    render_stage_distribution(&stage_path, &counts)?;

    Ok(vec![sales_path, stage_path])
}

fn render_sales_over_time(path: &Path, monthly: &[(Month, f64)]) -> Result<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let y_max = monthly.iter().map(|(_, total)| *total).fold(0.0f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption("Total Sales Over Time", ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5f64..monthly.len() as f64 - 0.5, 0.0f64..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Month")
        .y_desc("Total Sales Amount")
        .x_labels(monthly.len().min(12))
        .x_label_formatter(&|x| {
            let idx = x.round();
            if idx < 0.0 {
                return String::new();
            }
            monthly
                .get(idx as usize)
                .map(|((year, month), _)| format!("{:04}-{:02}", year, month))
                .unwrap_or_default()
        })
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            monthly.iter().enumerate().map(|(i, (_, total))| (i as f64, *total)),
            &BLUE,
        ))
        .map_err(chart_err)?;

    chart
        .draw_series(
            monthly
                .iter()
                .enumerate()
                .map(|(i, (_, total))| Circle::new((i as f64, *total), 4, BLUE.filled())),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

fn render_stage_distribution(path: &Path, counts: &[(String, usize)]) -> Result<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let root =
        root.titled("Opportunity Stage Distribution", ("sans-serif", 32)).map_err(chart_err)?;

    let sizes: Vec<f64> = counts.iter().map(|(_, count)| *count as f64).collect();
    let labels: Vec<&str> = counts.iter().map(|(stage, _)| stage.as_str()).collect();
    let colors: Vec<RGBColor> =
        (0..counts.len()).map(|i| SLICE_COLORS[i % SLICE_COLORS.len()]).collect();

    let (width, height) = (CHART_SIZE.0 as i32, CHART_SIZE.1 as i32);
    let center = (width / 2, height / 2 + 20);
    let radius = 200.0;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    // First slice starts at 12 o'clock and fans clockwise.
    pie.start_angle(270.0);
    pie.label_style(("sans-serif", 20));
    pie.percentages(("sans-serif", 18).into_font().color(&BLACK));

    root.draw(&pie).map_err(chart_err)?;
    root.present().map_err(chart_err)?;
    Ok(())
}
