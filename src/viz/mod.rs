// src/viz/mod.rs
//! Chart rendering for envelope comparison and group results
//!
//! A side-effect sink around precomputed series: nothing here feeds back into
//! the pipeline. Charts are rasterized to PNG with the plotters bitmap
//! backend.

use std::path::Path;

use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use tracing::info;

use crate::config::{chart, symmetry::DEFAULT_DEFICIT_THRESHOLD_PCT};
use crate::error::{LsiError, LsiResult};
use crate::stats::{Cohort, GroupRow};
use crate::symmetry::RepresentativeResult;

fn render_err<E: std::fmt::Display>(e: E) -> LsiError {
    LsiError::Render(e.to_string())
}

/// Render the two-limb envelope comparison for one participant.
///
/// Involved limb in red with the area under its envelope shaded, uninvolved
/// in blue, time in seconds on the x axis.
pub fn render_comparison(path: &Path, result: &RepresentativeResult) -> LsiResult<()> {
    let root = BitMapBackend::new(
        path,
        (chart::COMPARISON_WIDTH_PX, chart::COMPARISON_HEIGHT_PX),
    )
    .into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let (t_min, t_max) = span(
        result
            .involved
            .time
            .iter()
            .chain(result.uninvolved.time.iter()),
    );
    let (_, y_max) = span(
        result
            .involved
            .envelope
            .iter()
            .chain(result.uninvolved.envelope.iter()),
    );
    // Headroom above the tallest envelope; degenerate flat series still get
    // a drawable range.
    let y_top = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let mut chart_ctx = ChartBuilder::on(&root)
        .caption(
            format!("Final Biomechanical Comparison: {}", result.participant),
            ("sans-serif", 28),
        )
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(t_min..t_max, 0.0..y_top)
        .map_err(render_err)?;

    chart_ctx
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc("sEMG Amplitude (V)")
        .draw()
        .map_err(render_err)?;

    chart_ctx
        .draw_series(AreaSeries::new(
            paired(&result.involved.time, &result.involved.envelope),
            0.0,
            RED.mix(chart::FILL_ALPHA),
        ))
        .map_err(render_err)?;

    chart_ctx
        .draw_series(LineSeries::new(
            paired(&result.involved.time, &result.involved.envelope),
            RED.stroke_width(2),
        ))
        .map_err(render_err)?
        .label("Involved (Surgical)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart_ctx
        .draw_series(LineSeries::new(
            paired(&result.uninvolved.time, &result.uninvolved.envelope),
            BLUE.stroke_width(2),
        ))
        .map_err(render_err)?
        .label("Uninvolved (Healthy)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    chart_ctx
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    info!(path = %path.display(), participant = %result.participant, "comparison chart written");
    Ok(())
}

/// Render the grouped per-speed LSI chart: side-by-side cohort boxes with the
/// individual measurements overlaid and the clinical threshold marked.
pub fn render_group_chart(path: &Path, rows: &[GroupRow]) -> LsiResult<()> {
    let mut speeds: Vec<String> = Vec::new();
    for row in rows {
        if !speeds.contains(&row.speed) {
            speeds.push(row.speed.clone());
        }
    }
    if speeds.is_empty() {
        return Err(LsiError::Render("no rows to chart".to_string()));
    }

    let root = BitMapBackend::new(path, (chart::GROUP_WIDTH_PX, chart::GROUP_HEIGHT_PX))
        .into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let speed_labels = speeds.clone();
    let mut chart_ctx = ChartBuilder::on(&root)
        .caption(
            "Final LSI Comparison: Patients vs Healthy Controls",
            ("sans-serif", 28),
        )
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (0..speeds.len()).into_segmented(),
            // The boxplot element works in f32 coordinates.
            0f32..chart::GROUP_Y_MAX_PCT as f32,
        )
        .map_err(render_err)?;

    chart_ctx
        .configure_mesh()
        .x_desc("Speed")
        .y_desc("Limb Symmetry Index (%)")
        .x_label_formatter(&move |v| match v {
            SegmentValue::CenterOf(i) if *i < speed_labels.len() => speed_labels[*i].clone(),
            _ => String::new(),
        })
        .draw()
        .map_err(render_err)?;

    for (cohort, color, offset) in [
        (Cohort::Patient, RED, -22i32),
        (Cohort::Healthy, BLUE, 22i32),
    ] {
        for (i, speed) in speeds.iter().enumerate() {
            let values: Vec<f64> = rows
                .iter()
                .filter(|r| r.cohort == cohort && &r.speed == speed)
                .map(|r| r.lsi)
                .collect();
            if values.is_empty() {
                continue;
            }

            let quartiles = Quartiles::new(&values);
            chart_ctx
                .draw_series([Boxplot::new_vertical(SegmentValue::CenterOf(i), &quartiles)
                    .width(30)
                    .whisker_width(0.5)
                    .style(color)
                    .offset(offset)])
                .map_err(render_err)?;

            // Individual measurements over the box.
            chart_ctx
                .draw_series(values.iter().map(|&v| {
                    Circle::new((SegmentValue::CenterOf(i), v as f32), 3, color.mix(0.5).filled())
                }))
                .map_err(render_err)?;
        }
    }

    chart_ctx
        .draw_series(DashedLineSeries::new(
            [
                (SegmentValue::Exact(0), DEFAULT_DEFICIT_THRESHOLD_PCT as f32),
                (SegmentValue::Last, DEFAULT_DEFICIT_THRESHOLD_PCT as f32),
            ],
            6,
            4,
            RED.stroke_width(1),
        ))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    info!(path = %path.display(), speeds = speeds.len(), "group chart written");
    Ok(())
}

fn paired<'a>(x: &'a [f64], y: &'a [f64]) -> impl Iterator<Item = (f64, f64)> + 'a {
    x.iter().cloned().zip(y.iter().cloned())
}

fn span<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if min > max {
        (0.0, 1.0)
    } else if min == max {
        (min, max + 1.0)
    } else {
        (min, max)
    }
}
