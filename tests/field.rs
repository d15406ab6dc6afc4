// Field simulation and render pass, driven headlessly frame-by-frame
// against a recording surface.

use constellation_engine::render::{
    self, link_alpha, pulse, Rgba, Surface, LINE_OPACITY_MAX, MOUSE_LINK_R,
};
use constellation_engine::sim::{
    NetWorld, Pointer, Points, BASE_POINTS, DRIFT_SPEED, POINT_RADIUS, WRAP_MARGIN,
};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Op {
    Clear,
    Circle { r: f32, alpha: f32 },
    Line { x0: f32, y0: f32, alpha: f32 },
}

/// Records draw calls instead of rasterizing them.
#[derive(Default)]
struct RecordingSurface {
    ops: Vec<Op>,
}

impl RecordingSurface {
    fn lines(&self) -> Vec<(f32, f32, f32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Line { x0, y0, alpha } => Some((*x0, *y0, *alpha)),
                _ => None,
            })
            .collect()
    }

    fn circle_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Circle { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn fill_circle(&mut self, _x: f32, _y: f32, r: f32, color: Rgba) {
        self.ops.push(Op::Circle { r, alpha: color.a });
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, _x1: f32, _y1: f32, color: Rgba) {
        self.ops.push(Op::Line {
            x0,
            y0,
            alpha: color.a,
        });
    }
}

/// One hand-placed point, for scenarios where seeding randomness would get
/// in the way.
fn single_point(x: f32, y: f32, vx: f32, vy: f32) -> Points {
    let mut points = Points::new();
    points.x.push(x);
    points.y.push(y);
    points.vx.push(vx);
    points.vy.push(vy);
    points.r.push(1.0);
    points.phase.push(0.0);
    points.n = 1;
    points
}

#[test]
fn seeding_stays_inside_configured_ranges() {
    let mut rng = 1u32;
    let mut points = Points::new();
    points.seed(3, 100.0, 100.0, &mut rng);

    assert_eq!(points.n, 3);
    for i in 0..points.n {
        assert!((0.0..100.0).contains(&points.x[i]), "x out of bounds");
        assert!((0.0..100.0).contains(&points.y[i]), "y out of bounds");
        assert!(points.r[i] >= POINT_RADIUS.0 && points.r[i] < POINT_RADIUS.1);
        assert!(points.phase[i] >= 0.0 && points.phase[i] < std::f32::consts::TAU);

        let speed = (points.vx[i] * points.vx[i] + points.vy[i] * points.vy[i]).sqrt();
        assert!(
            speed >= DRIFT_SPEED * 0.4 - 1e-4 && speed <= DRIFT_SPEED * 1.2 + 1e-4,
            "speed {speed} outside jitter range"
        );
    }
}

#[test]
fn positions_stay_within_wrap_margin_over_many_frames() {
    let mut world = NetWorld::new(320.0, 180.0, 7);
    for _ in 0..1000 {
        world.tick();
        let points = world.points();
        for i in 0..points.n {
            assert!(points.x[i] >= -WRAP_MARGIN && points.x[i] <= 320.0 + WRAP_MARGIN);
            assert!(points.y[i] >= -WRAP_MARGIN && points.y[i] <= 180.0 + WRAP_MARGIN);
        }
    }
}

#[test]
fn crossing_the_right_margin_wraps_to_the_left() {
    let mut points = single_point(110.5, 50.0, 1.0, 0.0);
    points.update(100.0, 100.0);
    assert_eq!(points.x[0], -WRAP_MARGIN);
    assert_eq!(points.y[0], 50.0);
}

#[test]
fn crossing_the_top_margin_wraps_to_the_bottom() {
    let mut points = single_point(50.0, -10.5, 0.0, -1.0);
    points.update(100.0, 100.0);
    assert_eq!(points.y[0], 100.0 + WRAP_MARGIN);
    assert_eq!(points.x[0], 50.0);
}

#[test]
fn radius_and_phase_never_change_after_seeding() {
    let mut rng = 99u32;
    let mut points = Points::new();
    points.seed(50, 640.0, 480.0, &mut rng);

    let radii = points.r.clone();
    let phases = points.phase.clone();
    let start_x = points.x.clone();

    for _ in 0..200 {
        points.update(640.0, 480.0);
    }

    assert_eq!(points.r, radii);
    assert_eq!(points.phase, phases);
    assert_ne!(points.x, start_x, "positions should have drifted");
}

#[test]
fn link_alpha_falls_off_linearly() {
    assert!((link_alpha(0.0) - LINE_OPACITY_MAX).abs() < 1e-6);
    assert!(link_alpha(MOUSE_LINK_R).abs() < 1e-6);

    // Strictly decreasing with distance.
    assert!(link_alpha(10.0) > link_alpha(20.0));
    assert!(link_alpha(20.0) > link_alpha(89.0));

    // d=10, R=90: (1 - 10/90) * 0.65
    assert!((link_alpha(10.0) - 0.5778).abs() < 1e-3);
}

#[test]
fn only_points_inside_the_link_radius_get_lines() {
    let mut points = single_point(50.0, 40.0, 0.0, 0.0); // d = 10
    points.x.push(50.0); // d = 90 exactly: excluded
    points.y.push(140.0);
    points.vx.push(0.0);
    points.vy.push(0.0);
    points.r.push(1.0);
    points.phase.push(0.0);
    points.x.push(50.0); // d = 95: excluded
    points.y.push(145.0);
    points.vx.push(0.0);
    points.vy.push(0.0);
    points.r.push(1.0);
    points.phase.push(0.0);
    points.n = 3;

    let mut pointer = Pointer::new();
    pointer.move_to(50.0, 50.0);

    let mut surface = RecordingSurface::default();
    render::draw_links(&points, &pointer, &mut surface);

    let lines = surface.lines();
    assert_eq!(lines.len(), 1);
    let (x0, y0, alpha) = lines[0];
    assert_eq!((x0, y0), (50.0, 40.0));
    assert!((alpha - 0.5778).abs() < 1e-3);
}

#[test]
fn no_lines_at_all_while_the_pointer_is_outside() {
    let points = single_point(50.0, 49.0, 0.0, 0.0); // d = 1, trivially in range
    let mut pointer = Pointer::new();
    pointer.move_to(50.0, 50.0);
    pointer.clear();

    let mut surface = RecordingSurface::default();
    render::draw_links(&points, &pointer, &mut surface);
    assert!(surface.lines().is_empty());
}

#[test]
fn frame_clears_first_and_draws_lines_under_points() {
    let mut world = NetWorld::new(200.0, 200.0, 3);
    world.pointer_moved(100.0, 100.0);

    let mut surface = RecordingSurface::default();
    world.frame(16.0, &mut surface);

    assert_eq!(surface.ops[0], Op::Clear);
    // Halo + core per point.
    assert_eq!(surface.circle_count(), world.points().n * 2);

    let last_line = surface
        .ops
        .iter()
        .rposition(|op| matches!(op, Op::Line { .. }));
    let first_circle = surface
        .ops
        .iter()
        .position(|op| matches!(op, Op::Circle { .. }))
        .expect("points were drawn");
    // A 200x200 field with the pointer centered always has in-range points.
    let last_line = last_line.expect("some links were drawn");
    assert!(last_line < first_circle, "links must render under points");
}

#[test]
fn reseed_replaces_the_field_instead_of_growing_it() {
    let mut world = NetWorld::new(100.0, 100.0, 7);
    assert_eq!(world.points().n, BASE_POINTS);

    let before = world.points().x.clone();
    world.reseed();

    assert_eq!(world.points().n, BASE_POINTS);
    assert_ne!(before, world.points().x, "reseed must produce new points");
}

#[test]
fn pulse_oscillates_inside_its_band() {
    // sin(0) = 0: factor sits at the midpoint.
    assert!((pulse(0.0, 0.0) - 0.85).abs() < 1e-6);

    let mut t = 0.0;
    while t < 10_000.0 {
        let v = pulse(t, 1.3);
        assert!((0.6 - 1e-3..=1.1 + 1e-3).contains(&v));
        t += 37.0;
    }

    // Two points with different phases pulse out of step.
    let a = pulse(500.0, 0.0);
    let b = pulse(500.0, std::f32::consts::PI);
    assert!((a - b).abs() > 1e-3);
}
