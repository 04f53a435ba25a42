use std::ops::Range;
use std::path::Path;

use anyhow::{bail, Context, Result};
use plotters::prelude::*;
use tracing::debug;

use crate::models::{group_by_size, BenchmarkRecord};
use crate::paths;

/// 10x6 inches at 300 dpi.
const IMG_SIZE: (u32, u32) = (3000, 1800);

const TITLE_FONT_SIZE: u32 = 72;
const AXIS_LABEL_FONT_SIZE: u32 = 48;
const TICK_LABEL_FONT_SIZE: u32 = 38;
const LEGEND_FONT_SIZE: u32 = 40;
const LINE_WIDTH: u32 = 6;
const MARKER_SIZE: i32 = 12;

/// Series colors, one per matrix-size group.
const COLORS: &[RGBColor] = &[
    RGBColor(31, 119, 180),  // blue
    RGBColor(255, 127, 14),  // orange
    RGBColor(44, 160, 44),   // green
    RGBColor(214, 39, 40),   // red
    RGBColor(148, 103, 189), // purple
    RGBColor(140, 86, 75),   // brown
    RGBColor(227, 119, 194), // pink
    RGBColor(127, 127, 127), // gray
];

fn series_color(index: usize) -> RGBColor {
    COLORS[index % COLORS.len()]
}

/// One labeled line of (process count, value) points, in input row order.
type Series = (String, Vec<(f64, f64)>);

/// Extract one series per matrix-size group, applying `value` to each row.
fn size_series<F>(records: &[BenchmarkRecord], value: F) -> Vec<Series>
where
    F: Fn(&BenchmarkRecord) -> f64,
{
    group_by_size(records)
        .into_iter()
        .map(|(size, rows)| {
            let points = rows
                .iter()
                .map(|r| (f64::from(r.process_count), value(r)))
                .collect();
            (format!("Matrix {size}"), points)
        })
        .collect()
}

fn line_bounds(series: &[Series]) -> (Range<f64>, Range<f64>) {
    let points = series.iter().flat_map(|(_, points)| points.iter());
    let mut x_min = f64::MAX;
    let mut x_max = f64::MIN;
    let mut y_max = 0.0_f64;
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_max = y_max.max(y);
    }
    if x_min > x_max {
        return (0.0..1.0, 0.0..1.0);
    }
    (x_min - 0.5..x_max + 0.5, 0.0..(y_max * 1.1).max(1.0))
}

/// Render all four charts into `dir`, creating it if needed. Existing files
/// are overwritten; on failure, charts already written stay on disk.
pub fn render_all(records: &[BenchmarkRecord], dir: &Path) -> Result<()> {
    paths::ensure_dir(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    speedup_vs_processes(records, dir)?;
    execution_time_vs_processes(records, dir)?;
    efficiency_vs_processes(records, dir)?;
    sequential_vs_parallel(records, dir)?;
    Ok(())
}

/// Chart 1: speedup vs process count, one line per matrix size.
pub fn speedup_vs_processes(records: &[BenchmarkRecord], dir: &Path) -> Result<()> {
    let series = size_series(records, |r| r.speedup);
    line_chart(
        &paths::plots_file(dir, "speedup_vs_processes.png"),
        "Speedup vs. Number of Processes",
        "Speedup",
        &series,
    )
}

/// Chart 2: parallel execution time vs process count.
pub fn execution_time_vs_processes(records: &[BenchmarkRecord], dir: &Path) -> Result<()> {
    let series = size_series(records, |r| r.parallel_time);
    line_chart(
        &paths::plots_file(dir, "execution_time_vs_processes.png"),
        "Execution Time vs. Number of Processes",
        "Execution Time (seconds)",
        &series,
    )
}

/// Chart 3: efficiency (speedup / processes) vs process count, derived
/// per row.
pub fn efficiency_vs_processes(records: &[BenchmarkRecord], dir: &Path) -> Result<()> {
    let series = size_series(records, BenchmarkRecord::efficiency);
    line_chart(
        &paths::plots_file(dir, "efficiency_vs_processes.png"),
        "Parallel Efficiency vs. Number of Processes",
        "Efficiency (Speedup/Processes)",
        &series,
    )
}

fn line_chart(path: &Path, caption: &str, y_desc: &str, series: &[Series]) -> Result<()> {
    let root = BitMapBackend::new(path, IMG_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_range, y_range) = line_bounds(series);
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", TITLE_FONT_SIZE))
        .margin(40)
        .x_label_area_size(130)
        .y_label_area_size(170)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Number of Processes")
        .y_desc(y_desc)
        .x_label_formatter(&|x| format!("{x:.0}"))
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    for (index, (label, points)) in series.iter().enumerate() {
        let color = series_color(index);
        chart
            .draw_series(LineSeries::new(
                points.clone(),
                color.stroke_width(LINE_WIDTH),
            ))?
            .label(label.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 60, y)], color.stroke_width(LINE_WIDTH))
            });

        chart.draw_series(PointSeries::of_element(
            points.clone(),
            MARKER_SIZE,
            color.filled(),
            &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
        ))?;
    }

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", LEGEND_FONT_SIZE))
            .draw()?;
    }

    root.present()
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!(chart = %path.display(), "chart rendered");
    Ok(())
}

/// Chart 4: sequential vs parallel time as grouped bars, for the last
/// distinct matrix size encountered in the input (not necessarily the
/// numeric maximum).
pub fn sequential_vs_parallel(records: &[BenchmarkRecord], dir: &Path) -> Result<()> {
    let Some((size, rows)) = group_by_size(records).into_iter().last() else {
        bail!("no benchmark records in input");
    };

    let path = paths::plots_file(dir, "sequential_vs_parallel.png");
    let root = BitMapBackend::new(&path, IMG_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let count = rows.len();
    let process_counts: Vec<u32> = rows.iter().map(|r| r.process_count).collect();
    let y_max = rows
        .iter()
        .flat_map(|r| [r.sequential_time, r.parallel_time])
        .fold(0.0_f64, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Sequential vs. Parallel Time (Matrix {size})"),
            ("sans-serif", TITLE_FONT_SIZE),
        )
        .margin(40)
        .x_label_area_size(130)
        .y_label_area_size(170)
        .build_cartesian_2d(-0.5..(count as f64 - 0.5), 0.0..(y_max * 1.15).max(1.0))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(count)
        .x_label_formatter(&|x| {
            let index = x.round() as usize;
            if index < count && (x - index as f64).abs() < 0.3 {
                process_counts[index].to_string()
            } else {
                String::new()
            }
        })
        .x_desc("Number of Processes")
        .y_desc("Execution Time (seconds)")
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    // Two bars per process count, offset by a fixed fraction of unit width.
    const BAR_WIDTH: f64 = 0.35;
    let sequential_color = series_color(0);
    let parallel_color = series_color(1);

    for (index, row) in rows.iter().enumerate() {
        let center = index as f64;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(center - BAR_WIDTH, 0.0), (center, row.sequential_time)],
            sequential_color.filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(center, 0.0), (center + BAR_WIDTH, row.parallel_time)],
            parallel_color.filled(),
        )))?;
    }

    for (label, color) in [("Sequential", sequential_color), ("Parallel", parallel_color)] {
        chart
            .draw_series(std::iter::once(Circle::new(
                (count as f64 - 1.0, y_max),
                0,
                color.filled(),
            )))?
            .label(label)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 10), (x + 40, y + 10)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", LEGEND_FONT_SIZE))
        .draw()?;

    root.present()
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!(chart = %path.display(), "chart rendered");
    Ok(())
}
