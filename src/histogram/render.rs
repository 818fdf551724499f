use super::{BIN_COUNT, Histogram, SeriesColor};
use anyhow::{Context, Result, anyhow};
use plotters::prelude::*;
use std::path::Path;

/// Turns a computed histogram into an image file
pub trait HistogramRenderer {
    /// # Errors
    ///
    /// Returns an error if the image cannot be drawn or written
    fn render(&self, histogram: &Histogram, path: &Path) -> Result<()>;
}

/// PNG charts drawn with `plotters`
#[derive(Debug, Clone, Copy)]
pub struct PlottersRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

fn plot_color(color: SeriesColor) -> RGBColor {
    match color {
        SeriesColor::Red => RED,
        SeriesColor::Green => GREEN,
        SeriesColor::Blue => BLUE,
        SeriesColor::Black => BLACK,
    }
}

impl HistogramRenderer for PlottersRenderer {
    fn render(&self, histogram: &Histogram, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| anyhow!("Failed to clear canvas: {e}"))?;

        let range = histogram.range;
        // Headroom so the tallest bin does not touch the frame
        let y_max = (histogram.max_count().max(1) as f64) * 1.05;

        let mut chart = ChartBuilder::on(&root)
            .caption(histogram.title.as_str(), ("sans-serif", 22))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(64)
            .build_cartesian_2d(range.start..range.end, 0.0..y_max)
            .map_err(|e| anyhow!("Failed to build chart: {e}"))?;

        chart
            .configure_mesh()
            .x_desc(histogram.x_label.as_str())
            .y_desc("Frequency")
            .light_line_style(BLACK.mix(0.08))
            .bold_line_style(BLACK.mix(0.2))
            .draw()
            .map_err(|e| anyhow!("Failed to draw axes: {e}"))?;

        if histogram.is_per_channel() {
            for series in &histogram.series {
                let color = plot_color(series.color);
                let points = series
                    .counts
                    .iter()
                    .enumerate()
                    .map(|(bin, &count)| (histogram.bin_start(bin), count as f64));

                chart
                    .draw_series(LineSeries::new(points, color.stroke_width(2)))
                    .map_err(|e| anyhow!("Failed to draw {}: {e}", series.label))?
                    .label(series.label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            }

            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(|e| anyhow!("Failed to draw legend: {e}"))?;
        } else if let Some(series) = histogram.series.first() {
            let color = plot_color(series.color);
            let bars = (0..BIN_COUNT).map(|bin| {
                Rectangle::new(
                    [
                        (histogram.bin_start(bin), 0.0),
                        (histogram.bin_start(bin + 1), series.counts[bin] as f64),
                    ],
                    color.filled(),
                )
            });
            chart
                .draw_series(bars)
                .map_err(|e| anyhow!("Failed to draw bars: {e}"))?;
        }

        root.present()
            .map_err(|e| anyhow!("Failed to write {}: {e}", path.display()))?;
        Ok(())
    }
}
