//! Procedural hole layout.
//!
//! Every client derives the same layout from `(hole_number, par)` alone, so
//! the order of generator draws below is part of the output format. Adding,
//! removing or reordering a draw changes every feature placed after it.

use super::bezier::{CubicBezier, Point};
use super::rng::SeededRng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use thiserror::Error;

pub const CANVAS_WIDTH: f64 = 340.0;
pub const CANVAS_HEIGHT: f64 = 480.0;
pub const SEED_MULTIPLIER: u32 = 2_654_435_761;
pub const FAIRWAY_STEPS: usize = 24;

const TEE: Point = Point::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT - 40.0);
const ROUGH_EXTRA_WIDTH: f64 = 40.0;
const EDGE_MARGIN: f64 = 12.0;
const DOGLEG_PAR4: f64 = 70.0;
const DOGLEG_PAR5: f64 = 100.0;
const WATER_CHANCE_PAR4: f64 = 0.35;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid par {0}: expected 3, 4 or 5")]
pub struct InvalidParError(pub i32);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Par {
    Three,
    Four,
    Five,
}

impl Par {
    #[must_use]
    pub fn strokes(self) -> i32 {
        match self {
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
        }
    }

    fn fairway_width(self) -> f64 {
        match self {
            Self::Three => 36.0,
            Self::Four => 56.0,
            Self::Five => 68.0,
        }
    }

    fn green_y(self) -> f64 {
        match self {
            Self::Three => 140.0,
            Self::Four => 80.0,
            Self::Five => 60.0,
        }
    }

    fn greenside_bunkers(self) -> usize {
        match self {
            Self::Three => 3,
            Self::Four | Self::Five => 2,
        }
    }

    fn tee_box_size(self) -> (f64, f64) {
        match self {
            Self::Three => (24.0, 14.0),
            Self::Four | Self::Five => (20.0, 13.0),
        }
    }
}

impl TryFrom<i32> for Par {
    type Error = InvalidParError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            5 => Ok(Self::Five),
            other => Err(InvalidParError(other)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Hazard {
    pub center: Point,
    pub polygon: Vec<Point>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HoleGeometry {
    pub hole_number: u32,
    pub par: i32,
    pub seed: u32,
    pub width: f64,
    pub height: f64,
    pub tee: Point,
    pub tee_box: Rect,
    pub green: Ellipse,
    pub guide: CubicBezier,
    pub fairway: Vec<Point>,
    pub rough: Vec<Point>,
    pub greenside_bunkers: Vec<Ellipse>,
    pub fairway_bunker: Ellipse,
    pub hazard: Option<Hazard>,
}

#[must_use]
pub fn hole_seed(hole_number: u32) -> u32 {
    hole_number.wrapping_mul(SEED_MULTIPLIER)
}

/// Builds the layout for one hole.
///
/// # Errors
///
/// Returns `InvalidParError` when `par` is not 3, 4 or 5.
pub fn generate_hole(hole_number: u32, par: i32) -> Result<HoleGeometry, InvalidParError> {
    let par_kind = Par::try_from(par)?;
    let seed = hole_seed(hole_number);
    let mut rng = SeededRng::new(seed);

    // 1. dogleg
    let dogleg = match par_kind {
        Par::Three => 0.0,
        Par::Four => {
            let magnitude = rng.range(0.0, DOGLEG_PAR4);
            magnitude * rng.sign()
        }
        Par::Five => {
            let magnitude = rng.range(0.0, DOGLEG_PAR5);
            magnitude * rng.sign()
        }
    };

    let green_center = Point::new(TEE.x + dogleg, par_kind.green_y());
    let guide = CubicBezier {
        p0: TEE,
        p1: Point::new(TEE.x + 0.2 * dogleg, TEE.y - 0.30 * CANVAS_HEIGHT),
        p2: Point::new(TEE.x + 1.1 * dogleg, green_center.y + 0.25 * CANVAS_HEIGHT),
        p3: green_center,
    };

    let fairway_half = par_kind.fairway_width() / 2.0;
    let rough_half = (par_kind.fairway_width() + ROUGH_EXTRA_WIDTH) / 2.0;
    let fairway = guide.ribbon(FAIRWAY_STEPS, fairway_half);
    let rough = guide.ribbon(FAIRWAY_STEPS, rough_half);

    // 2. green
    let green_rx = rng.range(24.0, 32.0);
    let green_ry = rng.range(16.0, 20.0);
    let green = Ellipse {
        center: green_center,
        rx: green_rx,
        ry: green_ry,
    };

    // 3. greenside bunkers
    let greenside_bunkers = (0..par_kind.greenside_bunkers())
        .map(|_| {
            let angle = rng.range(0.0, TAU);
            let rx = rng.range(12.0, 20.0);
            let ry = rng.range(7.0, 12.0);
            let center = Point::new(
                green_center.x + (green_rx + 14.0) * angle.cos(),
                green_center.y + (green_ry + 10.0) * angle.sin(),
            );
            Ellipse {
                center: clamp_to_canvas(center),
                rx,
                ry,
            }
        })
        .collect();

    // 4. fairway bunker
    let fairway_bunker = {
        let t = rng.range(0.45, 0.65);
        let side = rng.sign();
        let rx = rng.range(14.0, 20.0);
        let ry = rng.range(8.0, 12.0);
        let center = guide
            .point_at(t)
            .offset(guide.unit_normal_at(t), side * fairway_half);
        Ellipse {
            center: clamp_to_canvas(center),
            rx,
            ry,
        }
    };

    // 5. water
    let has_hazard = match par_kind {
        Par::Three => false,
        Par::Four => rng.chance(WATER_CHANCE_PAR4),
        Par::Five => true,
    };
    let hazard = if has_hazard {
        let t = rng.range(0.30, 0.55);
        let side = rng.sign();
        let w = rng.range(50.0, 70.0);
        let h = rng.range(60.0, 90.0);
        let skew = rng.range(0.0, 12.0);
        let center = clamp_to_canvas(
            guide
                .point_at(t)
                .offset(guide.unit_normal_at(t), side * (rough_half + 30.0)),
        );
        Some(Hazard {
            center,
            polygon: vec![
                clamp_to_canvas(Point::new(center.x - w / 2.0, center.y - h / 2.0 + skew)),
                clamp_to_canvas(Point::new(center.x + w / 2.0, center.y - h / 2.0)),
                clamp_to_canvas(Point::new(center.x + w / 2.0 + skew / 2.0, center.y + h / 2.0)),
                clamp_to_canvas(Point::new(center.x - w / 2.0, center.y + h / 2.0 - skew)),
            ],
        })
    } else {
        None
    };

    let (tee_w, tee_h) = par_kind.tee_box_size();
    let tee_box = Rect {
        x: TEE.x - tee_w / 2.0,
        y: TEE.y - tee_h / 2.0,
        width: tee_w,
        height: tee_h,
    };

    Ok(HoleGeometry {
        hole_number,
        par,
        seed,
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
        tee: TEE,
        tee_box,
        green,
        guide,
        fairway,
        rough,
        greenside_bunkers,
        fairway_bunker,
        hazard,
    })
}

fn clamp_to_canvas(p: Point) -> Point {
    Point::new(
        p.x.clamp(EDGE_MARGIN, CANVAS_WIDTH - EDGE_MARGIN),
        p.y.clamp(EDGE_MARGIN, CANVAS_HEIGHT - EDGE_MARGIN),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn par_three_is_straight() {
        let hole = generate_hole(3, 3).unwrap();
        assert!((hole.green.center.x - hole.tee.x).abs() < f64::EPSILON);
        assert!(hole.hazard.is_none());
        assert_eq!(hole.greenside_bunkers.len(), 3);
    }

    #[test]
    fn par_five_always_has_water() {
        for n in 1..=18 {
            assert!(generate_hole(n, 5).unwrap().hazard.is_some());
        }
    }

    #[test]
    fn ribbon_has_two_edges_of_samples() {
        let hole = generate_hole(1, 4).unwrap();
        assert_eq!(hole.fairway.len(), 2 * (FAIRWAY_STEPS + 1));
        assert_eq!(hole.rough.len(), hole.fairway.len());
    }

    #[test]
    fn rejects_par_outside_three_to_five() {
        assert_eq!(generate_hole(1, 2), Err(InvalidParError(2)));
        assert_eq!(generate_hole(1, 6), Err(InvalidParError(6)));
    }
}
