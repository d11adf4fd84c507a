use crate::geometry::{Ellipse, HoleGeometry, Point};
use maud::{Markup, html};
use std::fmt::Write;

/// SVG `points` attribute, one decimal place per coordinate.
#[must_use]
pub fn points_attr(points: &[Point]) -> String {
    let mut out = String::with_capacity(points.len() * 12);
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{:.1},{:.1}", p.x, p.y);
    }
    out
}

fn bunker(b: &Ellipse) -> Markup {
    html! {
        g class="bunker" {
            ellipse cx=(fmt1(b.center.x)) cy=(fmt1(b.center.y)) rx=(fmt1(b.rx + 4.0)) ry=(fmt1(b.ry + 3.0))
                fill="#7a5e1a" fill-opacity="0.35" {}
            ellipse cx=(fmt1(b.center.x)) cy=(fmt1(b.center.y)) rx=(fmt1(b.rx)) ry=(fmt1(b.ry)) fill="#e8d49a" {}
        }
    }
}

fn fmt1(v: f64) -> String {
    format!("{v:.1}")
}

/// Overhead map of a generated hole. Layers are painted rough, fairway, water,
/// bunkers, green, tee box.
#[must_use]
pub fn render_hole_map(hole: &HoleGeometry) -> Markup {
    let green = &hole.green;
    let flag_x = green.center.x + 8.0;
    let flag_y = green.center.y;
    html! {
        svg xmlns="http://www.w3.org/2000/svg"
            viewBox=(format!("0 0 {} {}", hole.width, hole.height))
            class="hole-map"
            data-hole=(hole.hole_number)
            data-par=(hole.par) {
            rect x="0" y="0" width=(hole.width) height=(hole.height) fill="#0d3018" fill-opacity="0.92" {}
            polygon class="rough" points=(points_attr(&hole.rough)) fill="#184d2a" fill-opacity="0.8" {}
            polygon class="fairway" points=(points_attr(&hole.fairway)) fill="#267a43" fill-opacity="0.9" {}
            @if let Some(hazard) = &hole.hazard {
                polygon class="water" points=(points_attr(&hazard.polygon))
                    fill="#0f2d4a" fill-opacity="0.88" stroke="#1a4a6a" stroke-width="2" {}
            }
            (bunker(&hole.fairway_bunker))
            @for b in &hole.greenside_bunkers {
                (bunker(b))
            }
            g class="green" {
                ellipse cx=(fmt1(green.center.x)) cy=(fmt1(green.center.y)) rx=(fmt1(green.rx + 8.0)) ry=(fmt1(green.ry + 6.0))
                    fill="#217a3c" fill-opacity="0.85" {}
                ellipse cx=(fmt1(green.center.x)) cy=(fmt1(green.center.y)) rx=(fmt1(green.rx)) ry=(fmt1(green.ry)) fill="#3dba6a" {}
                line x1=(fmt1(flag_x)) y1=(fmt1(flag_y)) x2=(fmt1(flag_x)) y2=(fmt1(flag_y - 28.0)) stroke="#ddd" stroke-width="1.5" {}
                path d=(format!("M{:.1} {:.1} L{:.1} {:.1} L{:.1} {:.1}Z", flag_x, flag_y - 28.0, flag_x + 14.0, flag_y - 20.0, flag_x, flag_y - 12.0))
                    fill="#c0392b" {}
            }
            rect class="tee-box" x=(fmt1(hole.tee_box.x)) y=(fmt1(hole.tee_box.y))
                width=(fmt1(hole.tee_box.width)) height=(fmt1(hole.tee_box.height))
                rx="3" fill="#2d9c52" stroke="#1a6030" stroke-width="1.5" {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::generate_hole;

    #[test]
    fn points_are_space_separated_pairs() {
        let pts = [Point::new(1.0, 2.3), Point::new(3.5, 4.0)];
        assert_eq!(points_attr(&pts), "1.0,2.3 3.5,4.0");
    }

    #[test]
    fn map_draws_every_layer() {
        let hole = generate_hole(5, 5).unwrap();
        let svg = render_hole_map(&hole).into_string();
        assert!(svg.contains("viewBox=\"0 0 340 480\""));
        for class in ["rough", "fairway", "water", "green", "tee-box"] {
            assert!(svg.contains(&format!("class=\"{class}\"")), "missing {class}");
        }
        assert_eq!(svg.matches("class=\"bunker\"").count(), 3);
    }
}
