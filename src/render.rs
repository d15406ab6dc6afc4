// render.rs - Frame pass over an abstract drawing surface
//
// Per-frame order is fixed: clear, proximity lines, then point halos/cores,
// so the points overlay any line endpoints touching them.

use crate::sim::{Pointer, Points};

/// Pointer link radius in logical pixels.
pub const MOUSE_LINK_R: f32 = 90.0;
/// Opacity of a zero-distance link line; falls off linearly to the radius.
pub const LINE_OPACITY_MAX: f32 = 0.65;
/// Pulse rate, radians per millisecond of frame timestamp.
pub const PULSE_FREQ: f64 = 0.002;

const POINT_CORE_ALPHA: f32 = 0.8;
const HALO_ALPHA: f32 = 0.18;
const HALO_RADIUS_FACTOR: f32 = 3.0;

const HALO_TINT: Rgba = Rgba::new(168, 199, 255, HALO_ALPHA);
const CORE_WHITE: Rgba = Rgba::new(255, 255, 255, POINT_CORE_ALPHA);

/// Straight-alpha sRGB color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Minimal immediate-mode drawing surface.
///
/// The canvas backend implements this over `CanvasRenderingContext2d`; tests
/// implement it with a recording fake. `clear` erases the entire physical
/// backing store; how a backend avoids scaling seams while doing so is its
/// own concern, not part of this contract.
pub trait Surface {
    fn clear(&mut self);
    fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Rgba);
    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba);
}

/// Link line alpha at distance `d` from the pointer: `LINE_OPACITY_MAX` at
/// zero, linearly down to zero at `MOUSE_LINK_R`.
#[inline]
pub fn link_alpha(d: f32) -> f32 {
    (1.0 - d / MOUSE_LINK_R) * LINE_OPACITY_MAX
}

/// Core pulsation factor at timestamp `t` (ms), oscillating in [0.60, 1.10].
/// The per-point phase keeps the field from pulsing in unison.
#[inline]
pub fn pulse(t: f64, phase: f32) -> f32 {
    (0.85 + 0.25 * (t * PULSE_FREQ + phase as f64).sin()) as f32
}

/// Draw a line from each in-range point to the pointer. Does nothing while
/// the pointer is outside the viewport.
pub fn draw_links<S: Surface>(points: &Points, pointer: &Pointer, surface: &mut S) {
    let Some((mx, my)) = pointer.position() else {
        return;
    };

    for i in 0..points.n {
        let dx = points.x[i] - mx;
        let dy = points.y[i] - my;
        let d2 = dx * dx + dy * dy;
        // Squared test first; the sqrt is only paid for points in range.
        if d2 < MOUSE_LINK_R * MOUSE_LINK_R {
            let a = link_alpha(d2.sqrt());
            surface.stroke_line(points.x[i], points.y[i], mx, my, Rgba::new(255, 255, 255, a));
        }
    }
}

/// Draw every point: a soft tinted halo under a brighter pulsing core.
pub fn draw_points<S: Surface>(points: &Points, t: f64, surface: &mut S) {
    for i in 0..points.n {
        let (x, y, r) = (points.x[i], points.y[i], points.r[i]);
        surface.fill_circle(x, y, r * HALO_RADIUS_FACTOR, HALO_TINT);
        surface.fill_circle(x, y, r * pulse(t, points.phase[i]), CORE_WHITE);
    }
}
