// sim/ - Constellation field simulation
//
// Pure state and math, no browser types. The web layer feeds events in and
// drives frames; tests drive the same entry points with their own surface.

mod point;
mod pointer;

pub use point::{Points, DRIFT_SPEED, POINT_RADIUS, WRAP_MARGIN};
pub use pointer::Pointer;

use crate::render::{self, Surface};

/// Point count for a full-viewport field.
pub const BASE_POINTS: usize = 888;

/// Owns everything the animation needs: logical bounds, the point set, the
/// last known pointer position, and the RNG state.
pub struct NetWorld {
    w: f32,
    h: f32,
    points: Points,
    pointer: Pointer,
    rng: u32,
}

impl NetWorld {
    pub fn new(w: f32, h: f32, seed: u32) -> Self {
        let mut world = Self {
            w,
            h,
            points: Points::new(),
            pointer: Pointer::new(),
            // xorshift32 has no zero state
            rng: if seed == 0 { 0xDEADBEEF } else { seed },
        };
        world.reseed();
        world
    }

    /// Adopt new logical bounds after a viewport change. Existing points
    /// keep drifting; wrap uses the new edges from the next tick on.
    pub fn resize(&mut self, w: f32, h: f32) {
        self.w = w;
        self.h = h;
    }

    /// Replace the whole field with a fresh one inside the current bounds.
    /// Runs at startup and whenever the page regains visibility.
    pub fn reseed(&mut self) {
        self.points.seed(BASE_POINTS, self.w, self.h, &mut self.rng);
    }

    /// Advance every point by one frame of drift.
    pub fn tick(&mut self) {
        self.points.update(self.w, self.h);
    }

    /// One animation frame at timestamp `t` (milliseconds): clear, advance,
    /// then paint proximity links under the points.
    pub fn frame<S: Surface>(&mut self, t: f64, surface: &mut S) {
        surface.clear();
        self.tick();
        render::draw_links(&self.points, &self.pointer, surface);
        render::draw_points(&self.points, t, surface);
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer.move_to(x, y);
    }

    pub fn pointer_left(&mut self) {
        self.pointer.clear();
    }

    pub fn points(&self) -> &Points {
        &self.points
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    pub fn width(&self) -> f32 {
        self.w
    }

    pub fn height(&self) -> f32 {
        self.h
    }

    // Random number generator (xorshift32)
    #[inline(always)]
    pub fn rand(rng: &mut u32) -> f32 {
        *rng ^= *rng << 13;
        *rng ^= *rng >> 17;
        *rng ^= *rng << 5;
        (*rng >> 8) as f32 * (1.0 / 16777216.0)
    }

    /// Uniform sample in `[lo, hi)`.
    #[inline]
    pub fn rand_range(rng: &mut u32, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * Self::rand(rng)
    }
}
