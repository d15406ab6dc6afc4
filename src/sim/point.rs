// point.rs - Drifting field points
//
// Structure-of-Arrays layout for cache-friendly iteration. Radius and phase
// are assigned at seed time and never change; only positions mutate.

use std::f32::consts::TAU;

use super::NetWorld;

/// Base drift speed, scaled per point by a random factor.
pub const DRIFT_SPEED: f32 = 0.055;
/// Point core radius range.
pub const POINT_RADIUS: (f32, f32) = (1.0, 1.8);
/// How far outside the visible bounds a point may travel before wrapping
/// to the opposite edge.
pub const WRAP_MARGIN: f32 = 10.0;

// Per-point multiplier on DRIFT_SPEED; a uniform speed looks mechanical.
const SPEED_FACTOR: (f32, f32) = (0.4, 1.2);

pub struct Points {
    // Position
    pub x: Vec<f32>,
    pub y: Vec<f32>,

    // Velocity, applied once per frame
    pub vx: Vec<f32>,
    pub vy: Vec<f32>,

    // Fixed at seed time
    pub r: Vec<f32>,
    pub phase: Vec<f32>,

    // Count
    pub n: usize,
}

impl Points {
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            vx: Vec::new(),
            vy: Vec::new(),
            r: Vec::new(),
            phase: Vec::new(),
            n: 0,
        }
    }

    /// Discard the current set and generate `count` fresh points inside the
    /// logical bounds: uniform position, uniform heading, jittered speed.
    pub fn seed(&mut self, count: usize, w: f32, h: f32, rng: &mut u32) {
        self.x.clear();
        self.y.clear();
        self.vx.clear();
        self.vy.clear();
        self.r.clear();
        self.phase.clear();

        for _ in 0..count {
            let ang = NetWorld::rand_range(rng, 0.0, TAU);
            let spd = DRIFT_SPEED * NetWorld::rand_range(rng, SPEED_FACTOR.0, SPEED_FACTOR.1);

            self.x.push(NetWorld::rand_range(rng, 0.0, w));
            self.y.push(NetWorld::rand_range(rng, 0.0, h));
            self.vx.push(ang.cos() * spd);
            self.vy.push(ang.sin() * spd);
            self.r.push(NetWorld::rand_range(rng, POINT_RADIUS.0, POINT_RADIUS.1));
            self.phase.push(NetWorld::rand_range(rng, 0.0, TAU));
        }

        self.n = count;
    }

    /// Drift every point by its velocity, wrapping across the margin so a
    /// point leaving one edge reappears at the other (torus topology).
    pub fn update(&mut self, w: f32, h: f32) {
        for i in 0..self.n {
            self.x[i] += self.vx[i];
            self.y[i] += self.vy[i];

            if self.x[i] < -WRAP_MARGIN {
                self.x[i] = w + WRAP_MARGIN;
            } else if self.x[i] > w + WRAP_MARGIN {
                self.x[i] = -WRAP_MARGIN;
            }
            if self.y[i] < -WRAP_MARGIN {
                self.y[i] = h + WRAP_MARGIN;
            } else if self.y[i] > h + WRAP_MARGIN {
                self.y[i] = -WRAP_MARGIN;
            }
        }
    }
}
