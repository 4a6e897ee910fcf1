/*
 * Renderer Module
 *
 * Rasterizes a read-only snapshot of the flock into an RGBA image the size
 * of the viewport. Each boid is drawn as a filled disc with a tapered tail
 * pointing back along its velocity. Anything outside the canvas is clipped.
 */

use image::{Rgba, RgbaImage};

use crate::boid::Boid;

// Render the flock onto a fresh transparent canvas
pub fn render_frame(boids: &[Boid], width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::new(width, height);
    for boid in boids {
        draw_boid(&mut canvas, boid);
    }
    canvas
}

pub fn draw_boid(canvas: &mut RgbaImage, boid: &Boid) {
    let c = boid.color();
    let color = Rgba([c.red, c.green, c.blue, 255]);
    let head = boid.position;
    let tail = boid.tail();
    let radius = boid.radius();

    // Walk from the head to the tail, shrinking the disc as we go
    let length = head.distance(tail);
    let steps = length.ceil() as usize;
    for s in 1..=steps {
        let t = s as f32 / steps as f32;
        let p = head.lerp(tail, t);
        fill_disc(canvas, p.x, p.y, radius * (1.0 - t), color);
    }

    fill_disc(canvas, head.x, head.y, radius, color);
}

pub fn fill_disc(canvas: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    let (width, height) = canvas.dimensions();
    let r = radius.max(0.5);
    let r_sq = r * r;

    let min_x = (cx - r).floor().max(0.0) as i64;
    let max_x = (cx + r).ceil().min(width as f32 - 1.0) as i64;
    let min_y = (cy - r).floor().max(0.0) as i64;
    let max_y = (cy + r).ceil().min(height as f32 - 1.0) as i64;

    for y in min_y..=max_y {
        let dy = y as f32 - cy;
        for x in min_x..=max_x {
            let dx = x as f32 - cx;
            if dx * dx + dy * dy <= r_sq {
                canvas.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}
