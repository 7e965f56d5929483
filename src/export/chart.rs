//! Current-vs-voltage chart rendering.
//!
//! The chart is drawn into an RGBA frame: a light grid, two axes anchored at
//! the origin, a Catmull-Rom smoothed curve through the points in recording
//! order, and a filled marker on each point.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::config::ChartParameters;
use crate::state::MeasurementPoint;

/// Headroom above the largest value on each axis
const AXIS_HEADROOM: f64 = 1.1;

/// Pixel size assigned to the surface by layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width_px: u32,
    pub height_px: u32,
}

/// Off-screen surface holding the most recent chart frame.
///
/// The surface is "laid out" once it has a viewport and has drawn a non-empty
/// series; until then there is nothing to capture.
#[derive(Debug, Clone)]
pub struct ChartSurface {
    style: ChartParameters,
    viewport: Option<Viewport>,
    frame: Option<RgbaImage>,
}

impl ChartSurface {
    pub fn new(style: ChartParameters) -> Self {
        Self {
            style,
            viewport: None,
            frame: None,
        }
    }

    /// Assign a size. A zero dimension unmounts the surface.
    pub fn mount(&mut self, width_px: u32, height_px: u32) {
        if width_px == 0 || height_px == 0 {
            self.unmount();
            return;
        }
        self.viewport = Some(Viewport {
            width_px,
            height_px,
        });
        log::debug!("Chart surface mounted at {}x{}", width_px, height_px);
    }

    /// Mount at the size configured in the chart parameters
    pub fn mount_default(&mut self) {
        self.mount(self.style.width_px, self.style.height_px);
    }

    pub fn unmount(&mut self) {
        self.viewport = None;
        self.frame = None;
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// A frame exists and can be captured
    pub fn is_ready(&self) -> bool {
        self.frame.is_some()
    }

    pub fn frame(&self) -> Option<&RgbaImage> {
        self.frame.as_ref()
    }

    /// Re-render from the given points. An empty series clears the frame.
    pub fn redraw(&mut self, points: &[MeasurementPoint]) {
        self.frame = match self.viewport {
            Some(viewport) if !points.is_empty() => Some(render_chart(points, viewport, &self.style)),
            _ => None,
        };
    }
}

/// Maps data coordinates onto the plot rectangle
struct PlotArea {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
    max_voltage_v: f64,
    max_current_a: f64,
}

impl PlotArea {
    fn new(points: &[MeasurementPoint], viewport: Viewport, margin_px: u32) -> Self {
        // Keep at least a one pixel plot even on tiny surfaces
        let margin_x = margin_px.min(viewport.width_px.saturating_sub(2) / 2) as f32;
        let margin_y = margin_px.min(viewport.height_px.saturating_sub(2) / 2) as f32;

        let max_voltage_v = points.iter().map(|p| p.voltage_v()).fold(0.0, f64::max);
        let max_current_a = points.iter().map(|p| p.current_a()).fold(0.0, f64::max);

        Self {
            left: margin_x,
            top: margin_y,
            right: viewport.width_px as f32 - 1.0 - margin_x,
            bottom: viewport.height_px as f32 - 1.0 - margin_y,
            max_voltage_v: axis_limit(max_voltage_v),
            max_current_a: axis_limit(max_current_a),
        }
    }

    fn to_pixel(&self, voltage_v: f64, current_a: f64) -> (f32, f32) {
        let fx = (voltage_v / self.max_voltage_v) as f32;
        let fy = (current_a / self.max_current_a) as f32;
        (
            self.left + fx * (self.right - self.left),
            self.bottom - fy * (self.bottom - self.top),
        )
    }
}

fn axis_limit(max: f64) -> f64 {
    if max > 0.0 && max.is_finite() {
        max * AXIS_HEADROOM
    } else {
        1.0
    }
}

fn rgba([r, g, b]: [u8; 3]) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

/// Render the series into a fresh frame of the viewport's size
pub fn render_chart(points: &[MeasurementPoint], viewport: Viewport, style: &ChartParameters) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(viewport.width_px, viewport.height_px, rgba(style.background_rgb));
    let area = PlotArea::new(points, viewport, style.margin_px);

    draw_grid(&mut canvas, &area, style);

    // Axes
    let axis = rgba(style.axis_rgb);
    draw_line_segment_mut(&mut canvas, (area.left, area.bottom), (area.right, area.bottom), axis);
    draw_line_segment_mut(&mut canvas, (area.left, area.top), (area.left, area.bottom), axis);

    let pixels: Vec<(f32, f32)> = points
        .iter()
        .map(|p| area.to_pixel(p.voltage_v(), p.current_a()))
        .collect();

    let line = rgba(style.line_rgb);
    let curve = smooth_curve(&pixels, style.curve_samples.max(1));
    for pair in curve.windows(2) {
        draw_thick_segment(&mut canvas, pair[0], pair[1], line);
    }

    let marker = rgba(style.marker_rgb);
    for &(x, y) in &pixels {
        draw_filled_circle_mut(
            &mut canvas,
            (x.round() as i32, y.round() as i32),
            style.marker_radius_px.max(1),
            marker,
        );
    }

    canvas
}

fn draw_grid(canvas: &mut RgbaImage, area: &PlotArea, style: &ChartParameters) {
    let divisions = style.grid_divisions.max(1);
    let grid = rgba(style.grid_rgb);

    for i in 1..=divisions {
        let f = i as f32 / divisions as f32;
        let x = area.left + f * (area.right - area.left);
        let y = area.bottom - f * (area.bottom - area.top);
        draw_line_segment_mut(canvas, (x, area.top), (x, area.bottom), grid);
        draw_line_segment_mut(canvas, (area.left, y), (area.right, y), grid);
    }

    // Tick marks below the x axis and left of the y axis
    let axis = rgba(style.axis_rgb);
    for i in 0..=divisions {
        let f = i as f32 / divisions as f32;
        let x = (area.left + f * (area.right - area.left)).round() as i32;
        let y = (area.bottom - f * (area.bottom - area.top)).round() as i32;
        draw_filled_rect_mut(canvas, Rect::at(x, area.bottom as i32).of_size(1, 4), axis);
        draw_filled_rect_mut(canvas, Rect::at(area.left as i32 - 3, y).of_size(4, 1), axis);
    }
}

/// Two-pixel wide line made of two parallel one-pixel segments
fn draw_thick_segment(canvas: &mut RgbaImage, start: (f32, f32), end: (f32, f32), color: Rgba<u8>) {
    draw_line_segment_mut(canvas, start, end, color);
    let steep = (end.1 - start.1).abs() > (end.0 - start.0).abs();
    let (dx, dy) = if steep { (1.0, 0.0) } else { (0.0, 1.0) };
    draw_line_segment_mut(canvas, (start.0 + dx, start.1 + dy), (end.0 + dx, end.1 + dy), color);
}

/// Sample a Catmull-Rom spline through `points`.
///
/// End segments reuse their endpoint as the missing neighbour, so the curve
/// passes through every point and starts and ends exactly on the data.
pub fn smooth_curve(points: &[(f32, f32)], samples_per_segment: u32) -> Vec<(f32, f32)> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let mut curve = Vec::with_capacity((points.len() - 1) * samples_per_segment as usize + 1);
    for i in 0..points.len() - 1 {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(points.len() - 1)];

        for s in 0..samples_per_segment {
            let t = s as f32 / samples_per_segment as f32;
            curve.push(catmull_rom(p0, p1, p2, p3, t));
        }
    }
    curve.push(points[points.len() - 1]);
    curve
}

fn catmull_rom(p0: (f32, f32), p1: (f32, f32), p2: (f32, f32), p3: (f32, f32), t: f32) -> (f32, f32) {
    let t2 = t * t;
    let t3 = t2 * t;
    let blend = |a: f32, b: f32, c: f32, d: f32| {
        0.5 * ((2.0 * b)
            + (-a + c) * t
            + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
            + (-a + 3.0 * b - 3.0 * c + d) * t3)
    };
    (blend(p0.0, p1.0, p2.0, p3.0), blend(p0.1, p1.1, p2.1, p3.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{ResistancePair, Topology};
    use crate::state::Experiment;

    fn points() -> Vec<MeasurementPoint> {
        let mut exp = Experiment::new(Topology::Series);
        exp.set_resistances(ResistancePair::new(10.0, 10.0)).unwrap();
        exp.commit(5.0).unwrap();
        exp.commit(10.0).unwrap();
        exp.commit(7.5).unwrap();
        exp.series().all().to_vec()
    }

    #[test]
    fn test_surface_not_ready_until_mounted_and_drawn() {
        let mut surface = ChartSurface::new(ChartParameters::default());
        surface.redraw(&points());
        assert!(!surface.is_ready());

        surface.mount(320, 200);
        assert!(!surface.is_ready());
        surface.redraw(&[]);
        assert!(!surface.is_ready());

        surface.redraw(&points());
        assert!(surface.is_ready());

        surface.unmount();
        assert!(!surface.is_ready());
    }

    #[test]
    fn test_zero_size_mount_unmounts() {
        let mut surface = ChartSurface::new(ChartParameters::default());
        surface.mount(0, 100);
        assert_eq!(surface.viewport(), None);
    }

    #[test]
    fn test_frame_matches_viewport_and_has_markers() {
        let style = ChartParameters::default();
        let frame = render_chart(
            &points(),
            Viewport {
                width_px: 300,
                height_px: 150,
            },
            &style,
        );
        assert_eq!(frame.dimensions(), (300, 150));

        let marker = rgba(style.marker_rgb);
        let line = rgba(style.line_rgb);
        assert!(frame.pixels().any(|p| *p == marker));
        assert!(frame.pixels().any(|p| *p == line));
    }

    #[test]
    fn test_smooth_curve_hits_every_point() {
        let pts = [(0.0, 0.0), (10.0, 5.0), (20.0, 0.0)];
        let curve = smooth_curve(&pts, 8);
        assert_eq!(curve.len(), 2 * 8 + 1);
        assert_eq!(curve[0], pts[0]);
        assert_eq!(curve[8], pts[1]);
        assert_eq!(*curve.last().unwrap(), pts[2]);
    }

    #[test]
    fn test_single_point_has_no_curve() {
        assert_eq!(smooth_curve(&[(3.0, 4.0)], 8), vec![(3.0, 4.0)]);
    }

    #[test]
    fn test_tiny_surface_does_not_panic() {
        let frame = render_chart(
            &points(),
            Viewport {
                width_px: 2,
                height_px: 2,
            },
            &ChartParameters::default(),
        );
        assert_eq!(frame.dimensions(), (2, 2));
    }
}
