//! Plotting adapter: render a [`ChartSpec`] to **SVG** or **PNG**.
//!
//! The chart spec is renderer-agnostic; this module is the bundled plotters
//! collaborator. The backend is chosen by file extension (`.svg` vs.
//! bitmap), as in the rest of the crate's file outputs.
//!
//! Unlocated categories of a geographic spec are never drawn at (0, 0);
//! they are written as a footnote line below the map.

use crate::chart::{BarChart, ChartSpec, GeoChart, HeatmapChart};
use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;

/// Render a chart spec to `out_path` (`.svg` or bitmap by extension).
pub fn render<P: AsRef<Path>>(
    spec: &ChartSpec,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw(root, spec)
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw(root, spec)
    }
}

fn draw<DB>(root: DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    match spec {
        ChartSpec::Bar(bar) => draw_bar(&root, bar)?,
        ChartSpec::Heatmap(heatmap) => draw_heatmap(&root, heatmap)?,
        ChartSpec::Geo(geo) => draw_geo(&root, geo)?,
    }
    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Continuous color scale used by all three kinds: light → saturated blue.
fn value_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(lerp(198, 8), lerp(219, 81), lerp(239, 156))
}

/// Position of `v` within [min, max] of the series; 1.0 for a flat series.
fn color_position(v: f64, min: f64, max: f64) -> f64 {
    if (max - min).abs() < f64::EPSILON {
        1.0
    } else {
        (v - min) / (max - min)
    }
}

fn value_bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;
    for v in values {
        bounds = Some(match bounds {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        });
    }
    bounds
}

fn draw_bar<DB>(root: &DrawingArea<DB, Shift>, bar: &BarChart) -> Result<()>
where
    DB: DrawingBackend,
{
    if bar.bars.is_empty() {
        return Err(anyhow!("no data to plot"));
    }
    let n = bar.bars.len() as i32;
    let (min_v, max_v) = value_bounds(bar.bars.iter().map(|b| b.value))
        .ok_or_else(|| anyhow!("no numeric values to plot"))?;
    let y_max = if max_v > 0.0 { max_v * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption(bar.title.as_str(), ("sans-serif", 24))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 80)
        .build_cartesian_2d((0..n).into_segmented(), 0f64..y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    let categories: Vec<&str> = bar.bars.iter().map(|b| b.category.as_str()).collect();
    let format = bar.format;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(bar.category_label.as_str())
        .y_desc(bar.value_label.as_str())
        .x_labels(categories.len())
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(i) => categories
                .get(*i as usize)
                .map(|c| c.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|v| format.render(*v))
        .label_style(("sans-serif", 12))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .draw_series(bar.bars.iter().enumerate().map(|(i, b)| {
            let color = value_color(color_position(b.value, min_v, max_v));
            Rectangle::new(
                [
                    (SegmentValue::Exact(i as i32), 0.0),
                    (SegmentValue::Exact(i as i32 + 1), b.value),
                ],
                color.filled(),
            )
        }))
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

fn draw_heatmap<DB>(root: &DrawingArea<DB, Shift>, heatmap: &HeatmapChart) -> Result<()>
where
    DB: DrawingBackend,
{
    if heatmap.cells.is_empty() {
        return Err(anyhow!("no data to plot"));
    }
    let n = heatmap.cells.len() as i32;
    let (min_v, max_v) = value_bounds(heatmap.cells.iter().map(|c| c.value))
        .ok_or_else(|| anyhow!("no numeric values to plot"))?;

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption(heatmap.title.as_str(), ("sans-serif", 24))
        .set_label_area_size(LabelAreaPosition::Left, 160)
        .build_cartesian_2d(0f64..1f64, (0..n).into_segmented())
        .map_err(|e| anyhow!("{:?}", e))?;

    // Cell 0 goes on top; plotters' y axis grows upward.
    let categories: Vec<&str> = heatmap.cells.iter().map(|c| c.category.as_str()).collect();
    let row_of = |i: i32| n - 1 - i;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_desc(heatmap.column_label.as_str())
        .y_labels(categories.len())
        .y_label_formatter(&|y| match y {
            SegmentValue::CenterOf(j) => categories
                .get(row_of(*j) as usize)
                .map(|c| c.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .label_style(("sans-serif", 12))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .draw_series(heatmap.cells.iter().enumerate().map(|(i, cell)| {
            let row = row_of(i as i32);
            let color = value_color(color_position(cell.value, min_v, max_v));
            Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(row)),
                    (1.0, SegmentValue::Exact(row + 1)),
                ],
                color.filled(),
            )
        }))
        .map_err(|e| anyhow!("{:?}", e))?;

    // Formatted value overlaid on each cell.
    chart
        .draw_series(heatmap.cells.iter().enumerate().map(|(i, cell)| {
            Text::new(
                cell.text.clone(),
                (0.45, SegmentValue::CenterOf(row_of(i as i32))),
                ("sans-serif", 14).into_font().color(&BLACK),
            )
        }))
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

fn draw_geo<DB>(root: &DrawingArea<DB, Shift>, geo: &GeoChart) -> Result<()>
where
    DB: DrawingBackend,
{
    if geo.points.is_empty() {
        return Err(anyhow!("no located data to plot"));
    }
    let (min_v, max_v) = value_bounds(geo.points.iter().map(|p| p.value))
        .ok_or_else(|| anyhow!("no numeric values to plot"))?;
    let (min_lon, max_lon) = value_bounds(geo.points.iter().map(|p| p.lon))
        .ok_or_else(|| anyhow!("no coordinates to plot"))?;
    let (min_lat, max_lat) = value_bounds(geo.points.iter().map(|p| p.lat))
        .ok_or_else(|| anyhow!("no coordinates to plot"))?;
    let pad = 2.0;

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption(geo.title.as_str(), ("sans-serif", 24))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 44)
        .build_cartesian_2d(min_lon - pad..max_lon + pad, min_lat - pad..max_lat + pad)
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .x_desc("Longitude")
        .y_desc("Latitude")
        .label_style(("sans-serif", 12))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .draw_series(geo.points.iter().map(|p| {
            let t = color_position(p.value, min_v, max_v);
            let radius = (4.0 + t * 8.0).round() as i32;
            Circle::new((p.lon, p.lat), radius, value_color(t).filled())
        }))
        .map_err(|e| anyhow!("{:?}", e))?;

    if !geo.unlocated.is_empty() {
        let names: Vec<&str> = geo.unlocated.iter().map(|c| c.label.as_str()).collect();
        let note = format!("Sem coordenada: {}", names.join(", "));
        let (_w, h) = root.dim_in_pixel();
        root.draw(&Text::new(
            note,
            (10, h as i32 - 18),
            ("sans-serif", 14).into_font().color(&RED),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}
