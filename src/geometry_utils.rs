use nalgebra::Vector2;

use crate::Point2D;

pub fn distance_points(a: &Point2D, b: &Point2D) -> f32 {
    let (x1, y1) = *a;
    let (x2, y2) = *b;

    Vector2::new(x1 - x2, y1 - y2).magnitude()
}

/// Every edge of the path, including the virtual edge from the last point
/// back to the first.
pub fn closed_edges(path: &[Point2D]) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
    path.iter()
        .zip(path.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
}

/// Positive if `p` is left of the line through `a` and `b`, negative if right,
/// zero if the three are collinear. Computed in f64 so that thin shapes drawn
/// in f32 screen space still resolve.
fn is_left(a: Point2D, b: Point2D, p: Point2D) -> f64 {
    let (ax, ay) = (a.0 as f64, a.1 as f64);
    let (bx, by) = (b.0 as f64, b.1 as f64);
    let (px, py) = (p.0 as f64, p.1 as f64);
    (bx - ax) * (py - ay) - (px - ax) * (by - ay)
}

/// Winding number of the closed path around `point`; zero means outside
/// under the non-zero rule.
pub fn winding_number(point: &Point2D, path: &[Point2D]) -> i32 {
    let (_, py) = *point;
    closed_edges(path).fold(0, |wn, (a, b)| {
        if a.1 <= py {
            if b.1 > py && is_left(a, b, *point) > 0. {
                return wn + 1;
            }
        } else if b.1 <= py && is_left(a, b, *point) < 0. {
            return wn - 1;
        }
        wn
    })
}

/// Number of closed-path edges crossed by a ray cast from `point` towards +x;
/// odd means inside under the even-odd rule.
pub fn crossing_count(point: &Point2D, path: &[Point2D]) -> usize {
    let (px, py) = (point.0 as f64, point.1 as f64);
    closed_edges(path)
        .filter(|(a, b)| {
            let (ax, ay) = (a.0 as f64, a.1 as f64);
            let (bx, by) = (b.0 as f64, b.1 as f64);
            (ay > py) != (by > py) && px < (bx - ax) * (py - ay) / (by - ay) + ax
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: [Point2D; 4] = [(0., 0.), (10., 0.), (10., 10.), (0., 10.)];

    #[test]
    fn test_distance_points() {
        assert_eq!(distance_points(&(0., 0.), &(3., 4.)), 5.);
        assert_eq!(distance_points(&(-1., -1.), &(-1., -1.)), 0.);
    }

    #[test]
    fn test_closed_edges_include_closing_edge() {
        let edges: Vec<_> = closed_edges(&SQUARE).collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3], ((0., 10.), (0., 0.)));
        assert_eq!(closed_edges(&[]).count(), 0);
    }

    #[test]
    fn test_winding_square() {
        assert_eq!(winding_number(&(5., 5.), &SQUARE).abs(), 1);
        assert_eq!(winding_number(&(15., 5.), &SQUARE), 0);
        assert_eq!(winding_number(&(5., -5.), &SQUARE), 0);
    }

    #[test]
    fn test_winding_direction() {
        let mut reversed = SQUARE;
        reversed.reverse();
        assert_eq!(
            winding_number(&(5., 5.), &SQUARE),
            -winding_number(&(5., 5.), &reversed)
        );
    }

    #[test]
    fn test_crossings_square() {
        assert_eq!(crossing_count(&(5., 5.), &SQUARE) % 2, 1);
        assert_eq!(crossing_count(&(15., 5.), &SQUARE) % 2, 0);
        assert_eq!(crossing_count(&(-5., 5.), &SQUARE) % 2, 0);
    }
}
