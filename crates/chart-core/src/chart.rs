// File: crates/chart-core/src/chart.rs
// Summary: Chart struct and headless rendering pipeline using Skia CPU raster surfaces.

use anyhow::{Context, Result};
use skia_safe as skia;

use crate::geometry::RectI32;
use crate::grid::{format_tick, nice_step, nice_ticks};
use crate::scale::LinearScale;
use crate::series::Series;
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, LABEL_SIZE, LEGEND_SIZE, TICK_SIZE, WIDTH};
use crate::view::ViewState;
use crate::Axis;

/// Approximate tick count per axis.
const X_TICKS: usize = 8;
const Y_TICKS: usize = 6;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Axis titles, tick labels and legend. Off for pixel-exact snapshots.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::default(),
            draw_labels: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Chart {
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Fit both axes to the data; `margin` is an extra fraction of the y span
    /// on top of the default view margin.
    pub fn autoscale_axes(&mut self, margin: f64) {
        let mut view = ViewState::from_chart(self);
        let pad = (view.y_max - view.y_min) * margin.max(0.0);
        view.y_min -= pad;
        view.y_max += pad;
        view.apply_to_chart(self);
    }

    /// Draw the full chart onto `canvas`, which covers `opts.width` x `opts.height`.
    pub fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let theme = &opts.theme;
        canvas.clear(theme.background);

        let plot = RectI32::plot_area(opts.width, opts.height, &opts.insets);
        let sx = LinearScale::x(&self.x_axis, &plot);
        let sy = LinearScale::y(&self.y_axis, &plot);

        let mut bg = skia::Paint::default();
        bg.set_color(theme.plot_background);
        canvas.draw_rect(plot_rect(&plot), &bg);

        let x_ticks = nice_ticks(self.x_axis.min, self.x_axis.max, X_TICKS);
        let y_ticks = nice_ticks(self.y_axis.min, self.y_axis.max, Y_TICKS);
        draw_grid(canvas, &plot, &sx, &sy, &x_ticks, &y_ticks, theme);

        canvas.save();
        canvas.clip_rect(plot_rect(&plot), skia::ClipOp::Intersect, true);
        // Roughly two samples per horizontal pixel is all a stroke can show.
        let budget = (plot.width().max(1) as usize) * 2;
        for (i, s) in self.series.iter().enumerate() {
            let color = s.color.unwrap_or_else(|| theme.series_color(i));
            if s.len() > budget {
                draw_line_series(canvas, &sx, &sy, &s.downsample_xy_lttb(budget), color);
            } else {
                draw_line_series(canvas, &sx, &sy, s, color);
            }
        }
        canvas.restore();

        draw_axes(canvas, &plot, &sx, &sy, &x_ticks, &y_ticks, theme);

        if opts.draw_labels {
            let shaper = TextShaper::new();
            draw_tick_labels(canvas, &shaper, &plot, &sx, &sy, &self.x_axis, &self.y_axis, &x_ticks, &y_ticks, theme);
            draw_axis_titles(canvas, &shaper, &plot, &self.x_axis, &self.y_axis, theme);
            draw_legend(canvas, &shaper, &plot, &self.series, theme);
        }
    }

    /// Render to a tightly packed, unpremultiplied RGBA8 buffer.
    /// Returns `(pixels, width, height, stride)`.
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        anyhow::ensure!(opts.width > 0 && opts.height > 0, "surface size must be positive, got {}x{}", opts.width, opts.height);
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create {}x{} raster surface", opts.width, opts.height))?;
        self.draw(surface.canvas(), opts);

        let info = skia::ImageInfo::new(
            (opts.width, opts.height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = opts.width as usize * 4;
        let mut pixels = vec![0u8; stride * opts.height as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            anyhow::bail!("failed to read back raster surface");
        }
        Ok((pixels, opts.width as u32, opts.height as u32, stride))
    }

    /// Render and encode as PNG in memory.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let (pixels, w, h, _) = self.render_to_rgba8(opts)?;
        let img = image::RgbaImage::from_raw(w, h, pixels)
            .ok_or_else(|| anyhow::anyhow!("pixel buffer does not match {}x{}", w, h))?;
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).context("encode PNG")?;
        Ok(out.into_inner())
    }

    /// Render the chart to a PNG at `output_png_path`, creating parent directories.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output directory {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}

// ---- helpers ----------------------------------------------------------------

fn plot_rect(plot: &RectI32) -> skia::Rect {
    skia::Rect::from_ltrb(plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32)
}

fn draw_grid(
    canvas: &skia::Canvas,
    plot: &RectI32,
    sx: &LinearScale,
    sy: &LinearScale,
    x_ticks: &[f64],
    y_ticks: &[f64],
    theme: &Theme,
) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    let (t, b) = (plot.top as f32, plot.bottom as f32);
    let (l, r) = (plot.left as f32, plot.right as f32);
    // verticals
    for &x in x_ticks {
        let px = sx.to_px(x);
        canvas.draw_line((px, t), (px, b), &paint);
    }
    // horizontals
    for &y in y_ticks {
        let py = sy.to_px(y);
        canvas.draw_line((l, py), (r, py), &paint);
    }
}

fn draw_axes(
    canvas: &skia::Canvas,
    plot: &RectI32,
    sx: &LinearScale,
    sy: &LinearScale,
    x_ticks: &[f64],
    y_ticks: &[f64],
    theme: &Theme,
) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_style(skia::paint::Style::Stroke);
    axis_paint.set_stroke_width(1.0);

    // Frame around the plot area
    canvas.draw_rect(plot_rect(plot), &axis_paint);

    let mut tick_paint = axis_paint.clone();
    tick_paint.set_color(theme.tick);
    let (l, b) = (plot.left as f32, plot.bottom as f32);
    for &x in x_ticks {
        let px = sx.to_px(x);
        canvas.draw_line((px, b), (px, b + 5.0), &tick_paint);
    }
    for &y in y_ticks {
        let py = sy.to_px(y);
        canvas.draw_line((l - 5.0, py), (l, py), &tick_paint);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_tick_labels(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    plot: &RectI32,
    sx: &LinearScale,
    sy: &LinearScale,
    x_axis: &Axis,
    y_axis: &Axis,
    x_ticks: &[f64],
    y_ticks: &[f64],
    theme: &Theme,
) {
    let x_step = nice_step(x_axis.max - x_axis.min, X_TICKS);
    let y_step = nice_step(y_axis.max - y_axis.min, Y_TICKS);
    let b = plot.bottom as f32;
    let l = plot.left as f32;
    for &x in x_ticks {
        shaper.draw_centered(canvas, &format_tick(x, x_step), sx.to_px(x), b + 8.0 + TICK_SIZE, TICK_SIZE, theme.tick, true);
    }
    for &y in y_ticks {
        shaper.draw_right(canvas, &format_tick(y, y_step), l - 8.0, sy.to_px(y) + TICK_SIZE * 0.35, TICK_SIZE, theme.tick, true);
    }
}

fn draw_axis_titles(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    plot: &RectI32,
    x: &Axis,
    y: &Axis,
    theme: &Theme,
) {
    let cx = (plot.left + plot.right) as f32 * 0.5;
    let cy = (plot.top + plot.bottom) as f32 * 0.5;
    shaper.draw_centered(canvas, &x.label, cx, plot.bottom as f32 + 24.0 + LABEL_SIZE, LABEL_SIZE, theme.axis_label, false);
    shaper.draw_vertical(canvas, &y.label, plot.left as f32 - 64.0, cy, LABEL_SIZE, theme.axis_label);
}

/// Legend box in the top-right corner, one swatch + name per series.
fn draw_legend(canvas: &skia::Canvas, shaper: &TextShaper, plot: &RectI32, series: &[Series], theme: &Theme) {
    let named: Vec<(usize, &Series)> = series.iter().enumerate().filter(|(_, s)| !s.name.is_empty()).collect();
    if named.is_empty() {
        return;
    }
    let swatch = 24.0f32;
    let pad = 8.0f32;
    let row_h = LEGEND_SIZE + 6.0;
    let text_w = named
        .iter()
        .map(|(_, s)| shaper.measure_width(&s.name, LEGEND_SIZE, false))
        .fold(0.0f32, f32::max);
    let box_w = pad * 3.0 + swatch + text_w;
    let box_h = pad * 2.0 + row_h * named.len() as f32;
    let right = plot.right as f32 - 10.0;
    let top = plot.top as f32 + 10.0;
    let rect = skia::Rect::from_ltrb(right - box_w, top, right, top + box_h);

    let mut fill = skia::Paint::default();
    fill.set_color(theme.legend_background);
    fill.set_anti_alias(true);
    canvas.draw_round_rect(rect, 3.0, 3.0, &fill);
    let mut border = skia::Paint::default();
    border.set_color(theme.legend_border);
    border.set_anti_alias(true);
    border.set_style(skia::paint::Style::Stroke);
    border.set_stroke_width(1.0);
    canvas.draw_round_rect(rect, 3.0, 3.0, &border);

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(2.0);
    for (row, (i, s)) in named.iter().enumerate() {
        let baseline = top + pad + row_h * (row as f32 + 1.0) - 5.0;
        let mid = baseline - LEGEND_SIZE * 0.35;
        stroke.set_color(s.color.unwrap_or_else(|| theme.series_color(*i)));
        let x0 = rect.left + pad;
        canvas.draw_line((x0, mid), (x0 + swatch, mid), &stroke);
        shaper.draw_left(canvas, &s.name, x0 + swatch + pad, baseline, LEGEND_SIZE, theme.axis_label, false);
    }
}

/// Stroke `series` as a polyline; non-finite samples split it into runs.
fn draw_line_series(
    canvas: &skia::Canvas,
    sx: &LinearScale,
    sy: &LinearScale,
    series: &Series,
    color: skia::Color,
) {
    let mut path = skia::Path::new();
    let mut pen_down = false;
    let mut singles: Vec<(f32, f32)> = Vec::new();
    let mut run_len = 0usize;
    let mut last = (0.0f32, 0.0f32);

    for &(x, y) in &series.data_xy {
        if !x.is_finite() || !y.is_finite() {
            if run_len == 1 { singles.push(last); }
            pen_down = false;
            run_len = 0;
            continue;
        }
        let p = (sx.to_px(x), sy.to_px(y));
        if pen_down {
            path.line_to(p);
        } else {
            path.move_to(p);
            pen_down = true;
        }
        run_len += 1;
        last = p;
    }
    if run_len == 1 { singles.push(last); }

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(1.75);
    stroke.set_stroke_join(skia::paint::Join::Round);
    stroke.set_color(color);
    canvas.draw_path(&path, &stroke);

    // Isolated samples have no segment to stroke; mark them with a dot.
    if !singles.is_empty() {
        let mut dot = skia::Paint::default();
        dot.set_anti_alias(true);
        dot.set_color(color);
        for (px, py) in singles {
            canvas.draw_circle((px, py), 2.0, &dot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autoscale_covers_all_series() {
        let mut chart = Chart::new();
        chart.add_series(Series::line("a", vec![(0.0, 1.0), (5.0, 3.0)]));
        chart.add_series(Series::line("b", vec![(2.0, -1.0), (7.0, 0.0)]));
        chart.autoscale_axes(0.0);
        assert_eq!(chart.x_axis.min, 0.0);
        assert_eq!(chart.x_axis.max, 7.0);
        assert!(chart.y_axis.min < -1.0);
        assert!(chart.y_axis.max > 3.0);
    }

    #[test]
    fn rejects_empty_surface() {
        let mut opts = RenderOptions::default();
        opts.width = 0;
        assert!(Chart::new().render_to_rgba8(&opts).is_err());
    }
}
