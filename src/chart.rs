//! Bar-chart rendering of per-year summaries.

use anyhow::{Result, bail};
use plotters::prelude::*;

use crate::aggregate::GroupSummary;

/// Which per-year value the chart plots on the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMetric {
    Count,
    AverageMagnitude,
}

impl ChartMetric {
    fn y_label(self) -> &'static str {
        match self {
            ChartMetric::Count => "Number of Earthquakes",
            ChartMetric::AverageMagnitude => "Average Magnitude",
        }
    }

    fn title(self) -> &'static str {
        match self {
            ChartMetric::Count => "Number of Earthquakes per Year",
            ChartMetric::AverageMagnitude => "Average Earthquake Magnitude per Year",
        }
    }
}

/// Projects summaries onto the selected metric and sorts by year.
///
/// Grouping preserves first-seen order; the chart axis needs an ascending
/// year range, so ordering happens here rather than in the aggregation.
pub fn metric_rows(metric: ChartMetric, summaries: &[(i32, GroupSummary)]) -> Vec<(i32, f64)> {
    let mut rows: Vec<(i32, f64)> = summaries
        .iter()
        .map(|(year, summary)| {
            let value = match metric {
                ChartMetric::Count => summary.count as f64,
                ChartMetric::AverageMagnitude => summary.avg_magnitude,
            };
            (*year, value)
        })
        .collect();
    rows.sort_by_key(|(year, _)| *year);
    rows
}

/// Renders a bar chart of the selected metric to an SVG file, one bar per
/// year with integer year labels on the x axis.
pub fn render_year_chart(
    path: &str,
    metric: ChartMetric,
    summaries: &[(i32, GroupSummary)],
) -> Result<()> {
    let rows = metric_rows(metric, summaries);
    let Some(((min_year, _), (max_year, _))) = rows.first().zip(rows.last()) else {
        bail!("no per-year data to chart");
    };

    let y_max = rows.iter().map(|(_, v)| *v).fold(0.0, f64::max) * 1.1;
    let y_max = if y_max > 0.0 { y_max } else { 1.0 };

    let root = SVGBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(metric.title(), ("sans-serif", 24))
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((*min_year..*max_year + 1).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Year")
        .y_desc(metric.y_label())
        .draw()?;

    chart.draw_series(rows.iter().map(|(year, value)| {
        let x0 = SegmentValue::Exact(*year);
        let x1 = SegmentValue::Exact(*year + 1);
        Rectangle::new([(x0, 0.0), (x1, *value)], BLUE.mix(0.6).filled())
    }))?;

    root.present()?;
    Ok(())
}
