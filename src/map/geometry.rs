use glam::DVec2;

use crate::braille::BrailleCanvas;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let (mut x, mut y) = (x0, y0);

    loop {
        canvas.set(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw a line `weight` pixels wide by stacking offset copies
/// across the minor axis
pub fn draw_weighted_line(canvas: &mut BrailleCanvas, p0: (i32, i32), p1: (i32, i32), weight: i32) {
    let steep = (p1.1 - p0.1).abs() > (p1.0 - p0.0).abs();
    let lo = -(weight - 1) / 2;
    for offset in lo..lo + weight.max(1) {
        let (ox, oy) = if steep { (offset, 0) } else { (0, offset) };
        draw_line(canvas, p0.0 + ox, p0.1 + oy, p1.0 + ox, p1.1 + oy);
    }
}

/// Draw a filled circle
pub fn draw_circle(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                canvas.set(cx + dx, cy + dy);
            }
        }
    }
}

/// Draw a dotted circle outline, one dot every `gap` degrees
pub fn draw_dotted_ring(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: f64, gap: f64) {
    let mut deg = 0.0;
    while deg < 360.0 {
        let rad = f64::to_radians(deg);
        canvas.set(
            cx + (radius * rad.cos()).round() as i32,
            cy - (radius * rad.sin()).round() as i32,
        );
        deg += gap;
    }
}

/// Fill a polygon with a sparse dot pattern so outlines and other
/// fills underneath stay readable
pub fn fill_polygon_stippled(canvas: &mut BrailleCanvas, polygon: &[(i32, i32)], spacing: i32) {
    if polygon.len() < 3 {
        return;
    }
    let spacing = spacing.max(1);
    let min_x = polygon.iter().map(|p| p.0).min().unwrap_or(0);
    let max_x = polygon.iter().map(|p| p.0).max().unwrap_or(0);
    let min_y = polygon.iter().map(|p| p.1).min().unwrap_or(0);
    let max_y = polygon.iter().map(|p| p.1).max().unwrap_or(0);

    for y in min_y..=max_y {
        // Offset alternate rows for a checkered look
        let shift = if (y / spacing) % 2 == 0 { 0 } else { spacing / 2 };
        for x in min_x..=max_x {
            if y % spacing != 0 || (x - shift).rem_euclid(spacing) != 0 {
                continue;
            }
            if point_in_polygon(x as f64, y as f64, polygon) {
                canvas.set(x, y);
            }
        }
    }
}

/// Even-odd rule containment test
pub fn point_in_polygon(x: f64, y: f64, polygon: &[(i32, i32)]) -> bool {
    let mut inside = false;
    let mut j = polygon.len().wrapping_sub(1);
    for i in 0..polygon.len() {
        let (xi, yi) = (polygon[i].0 as f64, polygon[i].1 as f64);
        let (xj, yj) = (polygon[j].0 as f64, polygon[j].1 as f64);
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Pixel distance from a point to the segment a-b
pub fn distance_to_segment(p: (i32, i32), a: (i32, i32), b: (i32, i32)) -> f64 {
    let p = DVec2::new(p.0 as f64, p.1 as f64);
    let a = DVec2::new(a.0 as f64, a.1 as f64);
    let b = DVec2::new(b.0 as f64, b.1 as f64);

    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        assert_eq!(canvas.lit(), 10);
        assert_eq!(canvas.to_string(), "⠉⠉⠉⠉⠉");
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert_eq!(canvas.lit(), 8);
    }

    #[test]
    fn test_weighted_line_is_thicker() {
        let mut thin = BrailleCanvas::new(10, 4);
        let mut thick = BrailleCanvas::new(10, 4);
        draw_weighted_line(&mut thin, (0, 8), (19, 8), 1);
        draw_weighted_line(&mut thick, (0, 8), (19, 8), 3);
        assert_eq!(thin.lit(), 20);
        assert_eq!(thick.lit(), 60);
        assert!(thick.is_set(5, 7) && thick.is_set(5, 9));
    }

    #[test]
    fn test_stipple_stays_inside() {
        let mut canvas = BrailleCanvas::new(20, 10);
        let square = [(4, 4), (20, 4), (20, 20), (4, 20)];
        fill_polygon_stippled(&mut canvas, &square, 3);
        assert!(canvas.lit() > 0);
        assert!(!canvas.is_set(0, 0));
        assert!(!canvas.is_set(30, 30));
    }

    #[test]
    fn test_distance_to_segment() {
        assert_eq!(distance_to_segment((5, 3), (0, 0), (10, 0)), 3.0);
        assert_eq!(distance_to_segment((-4, 3), (0, 0), (10, 0)), 5.0);
        assert_eq!(distance_to_segment((1, 1), (1, 1), (1, 1)), 0.0);
    }
}
