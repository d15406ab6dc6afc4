// pointer.rs - Last known input position
//
// Mutated by mouse/touch handlers, read by the render pass. Handlers never
// draw; the frame owns when drawing happens.

pub struct Pointer {
    x: f32,
    y: f32,
    inside: bool,
}

impl Pointer {
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            inside: false,
        }
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.inside = true;
    }

    /// The device left tracking range; stored coordinates are stale from
    /// here on and must not be read.
    pub fn clear(&mut self) {
        self.inside = false;
        self.x = 0.0;
        self.y = 0.0;
    }

    pub fn inside(&self) -> bool {
        self.inside
    }

    /// Coordinates, only while the device is inside the viewport.
    pub fn position(&self) -> Option<(f32, f32)> {
        self.inside.then_some((self.x, self.y))
    }
}
