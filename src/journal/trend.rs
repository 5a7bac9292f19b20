use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use plotters::prelude::*;
use serde::Serialize;

use super::row::LogTable;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: DateTime<Utc>,
    pub post_phi: f64,
}

/// Post-session Φ in insertion order. No resampling or gap filling.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TrendSeries {
    pub points: Vec<TrendPoint>,
}

pub fn render_trend(table: &LogTable) -> TrendSeries {
    TrendSeries {
        points: table
            .rows()
            .iter()
            .map(|row| TrendPoint {
                date: row.date,
                post_phi: row.post_phi,
            })
            .collect(),
    }
}

impl TrendSeries {
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.post_phi).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Draw the series as an SVG line chart, x = entry index, y = post Φ.
    pub fn to_svg(&self, width: u32, height: u32) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| anyhow!("backend error: {e}"))?;

            if !self.is_empty() {
                let (y_min, y_max) = self.y_range();
                let x_max = (self.len().max(2) - 1) as f64;

                let mut chart = ChartBuilder::on(&root)
                    .margin(10)
                    .build_cartesian_2d(0.0..x_max, y_min..y_max)
                    .map_err(|e| anyhow!("chart build error: {e}"))?;

                chart
                    .draw_series(LineSeries::new(
                        self.points
                            .iter()
                            .enumerate()
                            .map(|(i, p)| (i as f64, p.post_phi)),
                        &BLUE,
                    ))
                    .map_err(|e| anyhow!("draw error: {e}"))?;
            }

            root.present()
                .map_err(|e| anyhow!("render error: {e}"))?;
        }
        Ok(svg)
    }

    fn y_range(&self) -> (f64, f64) {
        let (min, max) = self
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.post_phi), hi.max(p.post_phi))
            });
        let pad = ((max - min) * 0.1).max(1.0);
        (min - pad, max + pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::LogRow;
    use approx::assert_abs_diff_eq;
    use chrono::{Duration, TimeZone};

    fn table(posts: &[f64]) -> LogTable {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        LogTable::from(
            posts
                .iter()
                .enumerate()
                .map(|(i, &post)| LogRow::new(start + Duration::minutes(i as i64), post / 1.5, post, ""))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn series_keeps_insertion_order() {
        let series = render_trend(&table(&[80.0, 60.0, 95.5]));
        assert_eq!(series.values(), vec![80.0, 60.0, 95.5]);
        assert!(series.points.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn svg_contains_a_polyline() {
        let svg = render_trend(&table(&[80.0, 60.0, 95.5])).to_svg(640, 320).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn empty_and_single_point_series_render() {
        let empty = render_trend(&LogTable::new()).to_svg(200, 100).unwrap();
        assert!(empty.contains("<svg"));

        let single = render_trend(&table(&[70.0])).to_svg(200, 100).unwrap();
        assert!(single.contains("<svg"));
    }

    #[test]
    fn y_range_pads_around_extremes() {
        let series = render_trend(&table(&[60.0, 100.0, 80.0]));
        let (lo, hi) = series.y_range();
        assert_abs_diff_eq!(lo, 56.0, epsilon = 1e-9);
        assert_abs_diff_eq!(hi, 104.0, epsilon = 1e-9);

        // flat series still gets a visible band
        let flat = render_trend(&table(&[70.0, 70.0]));
        assert_eq!(flat.y_range(), (69.0, 71.0));
    }
}
