use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, dir: Point, distance: f64) -> Self {
        Self::new(self.x + dir.x * distance, self.y + dir.y * distance)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicBezier {
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;
        Point::new(
            b0 * self.p0.x + b1 * self.p1.x + b2 * self.p2.x + b3 * self.p3.x,
            b0 * self.p0.y + b1 * self.p1.y + b2 * self.p2.y + b3 * self.p3.y,
        )
    }

    /// First derivative `B'(t)`.
    #[must_use]
    pub fn derivative_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let d0 = 3.0 * u * u;
        let d1 = 6.0 * u * t;
        let d2 = 3.0 * t * t;
        Point::new(
            d0 * (self.p1.x - self.p0.x) + d1 * (self.p2.x - self.p1.x) + d2 * (self.p3.x - self.p2.x),
            d0 * (self.p1.y - self.p0.y) + d1 * (self.p2.y - self.p1.y) + d2 * (self.p3.y - self.p2.y),
        )
    }

    /// Unit tangent; a degenerate derivative falls back to pointing up the canvas.
    #[must_use]
    pub fn unit_tangent_at(&self, t: f64) -> Point {
        let d = self.derivative_at(t);
        let len = d.x.hypot(d.y);
        if len <= f64::EPSILON {
            Point::new(0.0, -1.0)
        } else {
            Point::new(d.x / len, d.y / len)
        }
    }

    /// Tangent rotated 90 degrees.
    #[must_use]
    pub fn unit_normal_at(&self, t: f64) -> Point {
        let tangent = self.unit_tangent_at(t);
        Point::new(-tangent.y, tangent.x)
    }

    /// Closed ribbon around the curve: left edge tee to green, then the right
    /// edge back to the tee. `steps` parametric intervals give `steps + 1` samples per edge.
    #[must_use]
    pub fn ribbon(&self, steps: usize, half_width: f64) -> Vec<Point> {
        let steps = steps.max(1);
        let mut left = Vec::with_capacity(steps + 1);
        let mut right = Vec::with_capacity(steps + 1);
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let p = self.point_at(t);
            let n = self.unit_normal_at(t);
            left.push(p.offset(n, half_width));
            right.push(p.offset(n, -half_width));
        }
        right.reverse();
        left.extend(right);
        left
    }
}
