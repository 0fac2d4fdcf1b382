//! Plotters-powered multi-dataset chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// One dataset as drawn on the chart.
pub struct ChartSeries<'a> {
    /// Sampled fitted curve (may be empty).
    pub curve: &'a [(f64, f64)],
    /// Observed points.
    pub points: &'a [(f64, f64)],
    pub color: (u8, u8, u8),
}

/// A render-only chart description.
///
/// All series and bounds are computed outside the render call so `render()`
/// only draws.
pub struct CurvePlottersChart<'a> {
    pub series: &'a [ChartSeries<'a>],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for CurvePlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("x")
                .y_desc("y")
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // Curves first so the points stay visible on top.
            for s in self.series {
                let (r, g, b) = s.color;
                if s.curve.len() > 1 {
                    chart.draw_series(LineSeries::new(s.curve.iter().copied(), &RGBColor(r, g, b)))?;
                }
            }

            // `Circle` radii are mapped incorrectly by the ratatui backend, so
            // points are drawn as pixels.
            for s in self.series {
                let (r, g, b) = s.color;
                chart.draw_series(
                    s.points
                        .iter()
                        .map(|&(x, y)| Pixel::new((x, y), RGBColor(r, g, b))),
                )?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
