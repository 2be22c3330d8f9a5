use crate::braille::BrailleCanvas;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Filled circle (land quakes)
pub fn fill_circle(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                canvas.set_pixel_signed(cx + dx, cy + dy);
            }
        }
    }
}

/// Filled square of half-extent `half` (ocean quakes, custom pin)
pub fn fill_square(canvas: &mut BrailleCanvas, cx: i32, cy: i32, half: i32) {
    for dy in -half..=half {
        for dx in -half..=half {
            canvas.set_pixel_signed(cx + dx, cy + dy);
        }
    }
}

/// Filled upward triangle with apex at (cx, cy - size) and base at cy + size (cities)
pub fn fill_triangle(canvas: &mut BrailleCanvas, cx: i32, cy: i32, size: i32) {
    for dy in -size..=size {
        let half_width = (dy + size) / 2;
        for dx in -half_width..=half_width {
            canvas.set_pixel_signed(cx + dx, cy + dy);
        }
    }
}
