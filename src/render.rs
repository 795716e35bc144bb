//! Chart rendering for benchmark series.
//!
//! One marked line per benchmark, input size on a logarithmic x-axis and the
//! metric on a linear y-axis, drawn with `plotters`. SVG and raster charts use
//! the matching `plotters` backend; PDF charts are drawn as SVG and converted
//! with `svg2pdf`.

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{info, warn};

use crate::aggregate::{BenchmarkSeries, SeriesPoint};
use crate::config::PlotConfig;
use crate::errors::Error;

// ---------------------------------------------------------------------------
// Palette — 7 distinguishable colors, cycled when there are more benchmarks
// ---------------------------------------------------------------------------

const PALETTE: [RGBColor; 7] = [
    RGBColor(52, 152, 219), //  blue
    RGBColor(230, 160, 0),  //  amber
    RGBColor(46, 204, 113), //  emerald
    RGBColor(231, 76, 60),  //  red
    RGBColor(155, 89, 182), //  amethyst
    RGBColor(26, 188, 156), //  turquoise
    RGBColor(44, 62, 80),   //  dark slate
];

const CHART_SIZE: (u32, u32) = (800, 500);
const LINE_WIDTH: u32 = 2;
const MARKER_RADIUS: u32 = 4;

/// Fallback x range when no point has a positive size.
const EMPTY_X_RANGE: (f64, f64) = (1.0, 10.0);

fn series_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

// ---------------------------------------------------------------------------
// Axis formatting
// ---------------------------------------------------------------------------

fn y_fmt(y: &f64) -> String {
    let v = y.abs();
    if v >= 1_000_000_000.0 {
        format!("{:.1}G", y / 1_000_000_000.0)
    } else if v >= 1_000_000.0 {
        format!("{:.1}M", y / 1_000_000.0)
    } else if v >= 1_000.0 {
        format!("{:.1}K", y / 1_000.0)
    } else if v >= 1.0 || v == 0.0 {
        format!("{y:.0}")
    } else {
        format!("{y:.2}")
    }
}

fn x_fmt(x: &f64) -> String {
    format!("{}", x.round())
}

// ---------------------------------------------------------------------------
// Ranges
// ---------------------------------------------------------------------------

/// Points that can be placed on a log axis.
fn plottable(points: &[SeriesPoint]) -> Vec<(f64, f64)> {
    points
        .iter()
        .filter(|p| p.size > 0)
        .map(|p| (p.size as f64, p.value))
        .collect()
}

/// Log-axis range covering every positive size, padded so that a single
/// size still spans a visible interval.
fn x_range(lines: &[(&str, Vec<(f64, f64)>)]) -> (f64, f64) {
    let (lo, hi) = lines
        .iter()
        .flat_map(|(_, pts)| pts.iter().map(|(x, _)| *x))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return EMPTY_X_RANGE;
    }
    (lo / 1.5, hi * 1.5)
}

/// Linear y range including zero, with headroom above the largest value.
fn y_range(lines: &[(&str, Vec<(f64, f64)>)]) -> (f64, f64) {
    let (lo, hi) = lines
        .iter()
        .flat_map(|(_, pts)| pts.iter().map(|(_, y)| *y))
        .filter(|y| y.is_finite())
        .fold((0.0f64, 0.0f64), |(lo, hi), y| (lo.min(y), hi.max(y)));
    if hi - lo <= f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * 0.1;
    (if lo < 0.0 { lo - pad } else { lo }, hi + pad)
}

// ---------------------------------------------------------------------------
// Chart
// ---------------------------------------------------------------------------

/// Chart title, e.g. `simInsts in region 'in' (Line per Benchmark)`.
#[must_use]
pub fn chart_title(metric: &str, region: &str) -> String {
    format!("{metric} in region '{region}' (Line per Benchmark)")
}

/// File format of a chart, chosen from the output file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    /// `.svg`, written directly by the SVG backend.
    Svg,
    /// `.png`, `.jpg`, `.jpeg` or `.bmp`, written by the bitmap backend.
    Raster,
    /// `.pdf`, drawn as SVG and converted.
    Pdf,
}

impl ChartFormat {
    /// Format for `path`, matching the extension case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] when the extension is missing or names a
    /// format no backend can write.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let unsupported = |message: &str| Error::Render {
            path: path.to_path_buf(),
            message: message.to_string(),
        };
        // `Path::extension` ignores a trailing separator, the file system does not.
        if path
            .as_os_str()
            .to_string_lossy()
            .chars()
            .last()
            .is_some_and(std::path::is_separator)
        {
            return Err(unsupported("chart path names a directory"));
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("svg") => Ok(Self::Svg),
            Some("png" | "jpg" | "jpeg" | "bmp") => Ok(Self::Raster),
            Some("pdf") => Ok(Self::Pdf),
            _ => Err(unsupported(
                "unsupported chart format, expected .pdf, .svg, .png, .jpg or .bmp",
            )),
        }
    }
}

/// Renders `series` to [`PlotConfig::chart_path`], creating the output
/// directory if needed. The file extension selects the format.
///
/// Returns the written path, or `None` when there is nothing to draw.
///
/// # Errors
///
/// Returns [`Error::Render`] for an unsupported extension or a backend
/// failure, and [`Error::Io`] if the output cannot be written.
pub fn render(series: &BenchmarkSeries, config: &PlotConfig) -> Result<Option<PathBuf>, Error> {
    if series.is_empty() {
        warn!("no series to plot, skipping chart");
        return Ok(None);
    }

    let output = config.chart_path();
    let format = ChartFormat::from_path(&output)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let chart = Chart {
        series,
        title: chart_title(&config.metric, config.region.label()),
        y_label: &config.metric,
    };
    let render_err = |e: Box<dyn std::error::Error>| Error::Render {
        path: output.clone(),
        message: e.to_string(),
    };
    match format {
        ChartFormat::Svg => {
            let root = SVGBackend::new(&output, CHART_SIZE).into_drawing_area();
            chart.draw(root).map_err(render_err)?;
        }
        ChartFormat::Raster => {
            let root = BitMapBackend::new(&output, CHART_SIZE).into_drawing_area();
            chart.draw(root).map_err(render_err)?;
        }
        ChartFormat::Pdf => {
            let mut svg = String::new();
            {
                let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
                chart.draw(root).map_err(render_err)?;
            }
            let pdf = svg_to_pdf(&svg).map_err(|message| Error::Render {
                path: output.clone(),
                message,
            })?;
            std::fs::write(&output, pdf).map_err(|e| Error::io(&output, e))?;
        }
    }

    info!(path = %output.display(), ?format, benchmarks = series.len(), "chart saved");
    Ok(Some(output))
}

/// Converts an SVG document into a single-page PDF.
fn svg_to_pdf(svg: &str) -> Result<Vec<u8>, String> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| e.to_string())?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| format!("{e:?}"))
}

/// Everything drawn on a chart, independent of the backend.
struct Chart<'a> {
    series: &'a BenchmarkSeries,
    title: String,
    y_label: &'a str,
}

impl Chart<'_> {
    /// Draws the line chart onto `root` and flushes it.
    fn draw<DB>(&self, root: DrawingArea<DB, Shift>) -> Result<(), Box<dyn std::error::Error>>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let mut lines: Vec<(&str, Vec<(f64, f64)>)> = Vec::new();
        for (benchmark, points) in self.series.iter() {
            let xy = plottable(points);
            let dropped = points.len() - xy.len();
            if dropped > 0 {
                warn!(benchmark, dropped, "points with size 0 cannot be shown on a log axis");
            }
            lines.push((benchmark, xy));
        }

        let (x_lo, x_hi) = x_range(&lines);
        let (y_lo, y_hi) = y_range(&lines);

        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 18))
            .margin(14)
            .x_label_area_size(40)
            .y_label_area_size(80)
            .build_cartesian_2d((x_lo..x_hi).log_scale(), y_lo..y_hi)?;

        chart
            .configure_mesh()
            .x_desc("Input Size")
            .y_desc(self.y_label)
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .draw()?;

        for (i, (benchmark, xy)) in lines.iter().enumerate() {
            let color = series_color(i);
            chart
                .draw_series(LineSeries::new(xy.clone(), color.stroke_width(LINE_WIDTH)))?
                .label(*benchmark)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
                });
            chart.draw_series(
                xy.iter()
                    .map(|&(x, y)| Circle::new((x, y), MARKER_RADIUS, color.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .margin(12)
            .background_style(WHITE.mix(0.9))
            .border_style(BLACK.mix(0.3))
            .label_font(("sans-serif", 13))
            .draw()?;

        root.present()?;
        Ok(())
    }
}
