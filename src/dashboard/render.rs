//! Draws the seven dashboard panels with `plotters`.

use std::f64::consts::PI;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::dashboard::panels::DashboardData;
use crate::dashboard::style::{
    CELL_BORDER, DashboardStyle, PIE_COLORS, RED_YELLOW_GREEN, SET2, SUMMARY_BACKGROUND,
    TREND_COLOR, VIRIDIS, gradient, spread,
};

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

const GRADE_SCALE: (f64, f64) = (2.0, 5.0);

/// Renders the dashboard into a PNG at `path`, creating parent directories.
pub fn render_dashboard(path: &Path, data: &DashboardData, style: &DashboardStyle) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    draw_dashboard(&root, data, style).map_err(|e| anyhow!("failed to draw dashboard: {e}"))?;
    root.present()
        .map_err(|e| anyhow!("failed to save dashboard to {}: {e}", path.display()))?;

    Ok(())
}

/// Lays out all panels on `root`: a 3x3 grid whose middle row is the heatmap.
pub fn draw_dashboard<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    data: &DashboardData,
    style: &DashboardStyle,
) -> DrawResult<DB> {
    root.fill(&style.background_color())?;
    let body = root.titled("CLASS PERFORMANCE DASHBOARD", style.title_font())?;

    let rows = body.split_evenly((3, 1));
    let top = rows[0].split_evenly((1, 3));
    let bottom = rows[2].split_evenly((1, 3));

    draw_subject_means(&top[0], data, style)?;
    draw_grade_pie(&top[1], data, style)?;
    draw_top_students(&top[2], data, style)?;
    draw_heatmap(&rows[1], data, style)?;
    draw_trend(&bottom[0], data, style)?;
    draw_boxplot(&bottom[1], data, style)?;
    draw_summary(&bottom[2], data, style)?;

    Ok(())
}

fn draw_subject_means<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    data: &DashboardData,
    style: &DashboardStyle,
) -> DrawResult<DB> {
    let names: Vec<String> = data.subject_means.iter().map(|(s, _)| s.clone()).collect();
    let n = names.len();

    let mut chart = ChartBuilder::on(area)
        .caption("Subject averages", style.panel_title_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..5.5)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .max_light_lines(0)
        .bold_line_style(style.grid_style())
        .x_labels(n)
        .x_label_formatter(&|x| index_label(*x, &names))
        .y_desc("Average")
        .label_style(style.label_font())
        .axis_desc_style(style.annotation_font())
        .draw()?;

    chart.draw_series(data.subject_means.iter().enumerate().map(|(i, (_, mean))| {
        let x = i as f64;
        Rectangle::new(
            [(x - 0.4, 0.0), (x + 0.4, *mean)],
            gradient(&VIRIDIS, spread(i, n)).filled(),
        )
    }))?;
    chart.draw_series(data.subject_means.iter().enumerate().map(|(i, (_, mean))| {
        let x = i as f64;
        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *mean)], BLACK.stroke_width(1))
    }))?;
    chart.draw_series(data.subject_means.iter().enumerate().map(|(i, (_, mean))| {
        Text::new(
            format!("{mean:.2}"),
            (i as f64, mean + 0.05),
            style
                .annotation_font()
                .pos(Pos::new(HPos::Center, VPos::Bottom)),
        )
    }))?;

    Ok(())
}

fn draw_grade_pie<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    data: &DashboardData,
    style: &DashboardStyle,
) -> DrawResult<DB> {
    let area = area.titled("Grade distribution", style.panel_title_font())?;
    let total: usize = data.grade_distribution.iter().map(|s| s.count).sum();
    if total == 0 {
        return Ok(());
    }

    let (w, h) = area.dim_in_pixel();
    let (cx, cy) = (w as f64 / 2.0, h as f64 / 2.0);
    let radius = w.min(h) as f64 * 0.38;
    let explode = radius * 0.05;
    let point = |angle: f64, r: f64, (ox, oy): (f64, f64)| {
        (
            (cx + ox + r * angle.cos()).round() as i32,
            (cy + oy - r * angle.sin()).round() as i32,
        )
    };

    // counter-clockwise from twelve o'clock
    let mut start = PI / 2.0;
    for (k, share) in data.grade_distribution.iter().enumerate() {
        let sweep = 2.0 * PI * share.count as f64 / total as f64;
        let mid = start + sweep / 2.0;
        let offset = (explode * mid.cos(), -explode * mid.sin());
        let color = PIE_COLORS[k % PIE_COLORS.len()];

        let steps = ((sweep * 40.0).ceil() as usize).max(2);
        let mut wedge = vec![point(0.0, 0.0, offset)];
        wedge.extend((0..=steps).map(|s| point(start + sweep * s as f64 / steps as f64, radius, offset)));

        area.draw(&Polygon::new(wedge.clone(), color.filled()))?;
        area.draw(&PathElement::new(wedge, WHITE.stroke_width(2)))?;

        let centered = Pos::new(HPos::Center, VPos::Center);
        area.draw(&Text::new(
            share.grade.to_string(),
            point(mid, radius * 1.15, offset),
            style.annotation_font().pos(centered),
        ))?;
        area.draw(&Text::new(
            format!("{:.1}%", share.percent),
            point(mid, radius * 0.6, offset),
            style.annotation_font().pos(centered),
        ))?;

        start += sweep;
    }

    Ok(())
}

fn draw_top_students<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    data: &DashboardData,
    style: &DashboardStyle,
) -> DrawResult<DB> {
    let n = data.top_students.len();
    // bottom-up, so the best student ends on top
    let names: Vec<String> = data.top_students.iter().rev().map(|(s, _)| s.clone()).collect();

    let mut chart = ChartBuilder::on(area)
        .caption(
            format!("Top {n} students"),
            style.panel_title_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(110)
        .build_cartesian_2d(0.0..5.5, -0.5..(n as f64 - 0.5))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .max_light_lines(0)
        .bold_line_style(style.grid_style())
        .y_labels(n)
        .y_label_formatter(&|y| index_label(*y, &names))
        .x_desc("Average")
        .label_style(style.label_font())
        .axis_desc_style(style.annotation_font())
        .draw()?;

    let bars: Vec<(f64, f64, RGBColor)> = data
        .top_students
        .iter()
        .rev()
        .enumerate()
        .map(|(j, (_, avg))| {
            let color = gradient(&RED_YELLOW_GREEN, 0.3 + 0.7 * spread(j, n));
            (j as f64, *avg, color)
        })
        .collect();

    chart.draw_series(
        bars.iter()
            .map(|&(y, avg, color)| Rectangle::new([(0.0, y - 0.4), (avg, y + 0.4)], color.filled())),
    )?;
    chart.draw_series(
        bars.iter()
            .map(|&(y, avg, _)| Rectangle::new([(0.0, y - 0.4), (avg, y + 0.4)], BLACK.stroke_width(1))),
    )?;
    chart.draw_series(bars.iter().map(|&(y, avg, _)| {
        Text::new(
            format!("{avg:.2}"),
            (avg + 0.05, y),
            style.annotation_font().pos(Pos::new(HPos::Left, VPos::Center)),
        )
    }))?;

    Ok(())
}

fn draw_heatmap<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    data: &DashboardData,
    style: &DashboardStyle,
) -> DrawResult<DB> {
    let cols = data.subjects.len();
    let rows = data.grade_matrix.len();
    let names: Vec<String> = data.grade_matrix.iter().rev().map(|(s, _)| s.clone()).collect();
    let (low, high) = GRADE_SCALE;

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Grades by student and subject (red = 2, green = 5)",
            style.panel_title_font(),
        )
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(110)
        .build_cartesian_2d(-0.5..(cols as f64 - 0.5), -0.5..(rows as f64 - 0.5))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(cols)
        .y_labels(rows)
        .x_label_formatter(&|x| index_label(*x, &data.subjects))
        .y_label_formatter(&|y| index_label(*y, &names))
        .label_style(style.label_font())
        .draw()?;

    let cells: Vec<(f64, f64, f64)> = data
        .grade_matrix
        .iter()
        .enumerate()
        .flat_map(|(i, (_, grades))| {
            let y = (rows - 1 - i) as f64;
            grades.iter().enumerate().map(move |(j, g)| (j as f64, y, *g))
        })
        .collect();

    chart.draw_series(cells.iter().map(|&(x, y, g)| {
        let color = gradient(&RED_YELLOW_GREEN, (g - low) / (high - low));
        Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], color.filled())
    }))?;
    chart.draw_series(cells.iter().map(|&(x, y, _)| {
        Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], CELL_BORDER.stroke_width(1))
    }))?;
    chart.draw_series(cells.iter().map(|&(x, y, g)| {
        Text::new(
            format!("{g:.0}"),
            (x, y),
            style.label_font().pos(Pos::new(HPos::Center, VPos::Center)),
        )
    }))?;

    Ok(())
}

fn draw_trend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    data: &DashboardData,
    style: &DashboardStyle,
) -> DrawResult<DB> {
    let labels: Vec<String> = data.trend.iter().map(|(q, _)| q.clone()).collect();
    let n = labels.len();

    let mut chart = ChartBuilder::on(area)
        .caption("Class average by quarter", style.panel_title_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 3.5..4.5)?;

    chart
        .configure_mesh()
        .max_light_lines(0)
        .bold_line_style(style.grid_style())
        .x_labels(n)
        .x_label_formatter(&|x| index_label(*x, &labels))
        .y_desc("Class average")
        .label_style(style.label_font())
        .axis_desc_style(style.annotation_font())
        .draw()?;

    let points: Vec<(f64, f64)> = data
        .trend
        .iter()
        .enumerate()
        .map(|(i, (_, v))| (i as f64, *v))
        .collect();

    chart.draw_series(LineSeries::new(points.iter().copied(), TREND_COLOR.stroke_width(3)))?;
    chart.draw_series(points.iter().map(|&p| Circle::new(p, 8, TREND_COLOR.filled())))?;
    chart.draw_series(points.iter().map(|&(x, y)| {
        Text::new(
            format!("{y:.1}"),
            (x, y + 0.05),
            style
                .annotation_font()
                .pos(Pos::new(HPos::Center, VPos::Bottom)),
        )
    }))?;

    Ok(())
}

fn draw_boxplot<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    data: &DashboardData,
    style: &DashboardStyle,
) -> DrawResult<DB> {
    let names: Vec<String> = data.boxes.iter().map(|(s, _)| s.clone()).collect();
    let n = names.len();

    let lowest = data
        .boxes
        .iter()
        .flat_map(|(_, b)| b.outliers.iter().copied().chain([b.lower_whisker]))
        .fold(f64::INFINITY, f64::min);
    let highest = data
        .boxes
        .iter()
        .flat_map(|(_, b)| b.outliers.iter().copied().chain([b.upper_whisker]))
        .fold(f64::NEG_INFINITY, f64::max);
    let (y_min, y_max) = if lowest.is_finite() && highest.is_finite() {
        (lowest - 0.5, highest + 0.5)
    } else {
        (0.0, 5.5)
    };

    let mut chart = ChartBuilder::on(area)
        .caption("Grade spread by subject", style.panel_title_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .max_light_lines(0)
        .bold_line_style(style.grid_style())
        .x_labels(n)
        .x_label_formatter(&|x| index_label(*x, &names))
        .y_desc("Grade")
        .label_style(style.label_font())
        .axis_desc_style(style.annotation_font())
        .draw()?;

    for (i, (_, b)) in data.boxes.iter().enumerate() {
        let x = i as f64;
        let color = SET2[i % SET2.len()];
        let edge = BLACK.stroke_width(1);

        chart.draw_series([
            Rectangle::new([(x - 0.3, b.q1), (x + 0.3, b.q3)], color.filled()),
            Rectangle::new([(x - 0.3, b.q1), (x + 0.3, b.q3)], edge),
        ])?;
        chart.draw_series([
            PathElement::new(vec![(x - 0.3, b.median), (x + 0.3, b.median)], BLACK.stroke_width(2)),
            PathElement::new(vec![(x, b.q3), (x, b.upper_whisker)], edge),
            PathElement::new(vec![(x, b.q1), (x, b.lower_whisker)], edge),
            PathElement::new(
                vec![(x - 0.15, b.upper_whisker), (x + 0.15, b.upper_whisker)],
                edge,
            ),
            PathElement::new(
                vec![(x - 0.15, b.lower_whisker), (x + 0.15, b.lower_whisker)],
                edge,
            ),
        ])?;
        chart.draw_series(
            b.outliers
                .iter()
                .map(|&v| Circle::new((x, v), 4, BLACK.stroke_width(1))),
        )?;
    }

    Ok(())
}

fn draw_summary<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    data: &DashboardData,
    style: &DashboardStyle,
) -> DrawResult<DB> {
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);

    area.draw(&Rectangle::new(
        [(10, 10), (w - 10, h - 10)],
        SUMMARY_BACKGROUND.mix(0.8).filled(),
    ))?;

    let line_height = (style.label_size as i32 * 5) / 4;
    for (i, line) in data.summary.iter().enumerate() {
        area.draw(&Text::new(
            line.as_str(),
            (24, 20 + i as i32 * line_height),
            style.mono_font(),
        ))?;
    }

    Ok(())
}

/// Label for an integral axis position, blank between positions.
fn index_label(value: f64, labels: &[String]) -> String {
    let nearest = value.round();
    if (value - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    labels.get(nearest as usize).cloned().unwrap_or_default()
}
