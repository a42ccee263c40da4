use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use prodmix_plan::FeasibleRegion;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;
const MARGIN: u32 = 40;

pub const TIME_COLOR: Rgb<u8> = Rgb([31, 119, 180]);
pub const MATERIAL_COLOR: Rgb<u8> = Rgb([255, 127, 14]);
/// Magenta at half opacity over white
pub const REGION_COLOR: Rgb<u8> = Rgb([255, 128, 255]);
pub const OPTIMUM_COLOR: Rgb<u8> = Rgb([214, 39, 40]);
const AXIS_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Maps data coordinates onto the plot area inside the margins
struct Frame {
    x_max: f64,
    y_max: f64,
}

impl Frame {
    fn plot_width(&self) -> f64 {
        (WIDTH - 2 * MARGIN) as f64
    }

    fn plot_height(&self) -> f64 {
        (HEIGHT - 2 * MARGIN) as f64
    }

    fn px(&self, x: f64) -> f64 {
        MARGIN as f64 + x / self.x_max * self.plot_width()
    }

    fn py(&self, y: f64) -> f64 {
        (HEIGHT - MARGIN) as f64 - y / self.y_max * self.plot_height()
    }

    /// Data x for a pixel column
    fn data_x(&self, col: u32) -> f64 {
        (col - MARGIN) as f64 / self.plot_width() * self.x_max
    }
}

/// Draw the region, both boundary lines and the optimum into a PNG
pub fn render(region: &FeasibleRegion, path: &Path) -> image::ImageResult<()> {
    let mut img: RgbImage = ImageBuffer::from_pixel(WIDTH, HEIGHT, Rgb([255, 255, 255]));
    let frame = Frame {
        x_max: region.x_max,
        y_max: region.y_max() * 1.05,
    };

    fill_region(&mut img, &frame, region);

    for pair in region.samples.windows(2) {
        if let (Some(a), Some(b)) = (pair[0].time_bound, pair[1].time_bound) {
            draw_segment(&mut img, &frame, (pair[0].x1, a), (pair[1].x1, b), TIME_COLOR);
        }
        if let (Some(a), Some(b)) = (pair[0].material_bound, pair[1].material_bound) {
            draw_segment(&mut img, &frame, (pair[0].x1, a), (pair[1].x1, b), MATERIAL_COLOR);
        }
    }

    // Axes last so the lines don't cover them
    for x in MARGIN..=WIDTH - MARGIN {
        img.put_pixel(x, HEIGHT - MARGIN, AXIS_COLOR);
    }
    for y in MARGIN..=HEIGHT - MARGIN {
        img.put_pixel(MARGIN, y, AXIS_COLOR);
    }

    let (ox, oy) = region.optimum;
    draw_dot(&mut img, frame.px(ox), frame.py(oy), 4, OPTIMUM_COLOR);

    img.save(path)
}

fn fill_region(img: &mut RgbImage, frame: &Frame, region: &FeasibleRegion) {
    let bottom = HEIGHT - MARGIN;
    for col in MARGIN..=WIDTH - MARGIN {
        let x = frame.data_x(col);
        let Some(top) = envelope_at(region, x) else {
            continue;
        };
        let top_px = frame.py(top.min(frame.y_max)).max(MARGIN as f64).round() as u32;
        for row in top_px..bottom {
            img.put_pixel(col, row, REGION_COLOR);
        }
    }
}

/// Envelope height at `x`, interpolated between the shaded samples around it
fn envelope_at(region: &FeasibleRegion, x: f64) -> Option<f64> {
    region.samples.windows(2).find_map(|pair| {
        let (a, b) = (&pair[0], &pair[1]);
        if x < a.x1 || x > b.x1 || !(a.is_shaded() || b.is_shaded()) {
            return None;
        }
        match (a.envelope, b.envelope) {
            (Some(ya), Some(yb)) => {
                let t = if b.x1 > a.x1 { (x - a.x1) / (b.x1 - a.x1) } else { 0.0 };
                Some(ya + (yb - ya) * t)
            }
            _ => Some(f64::INFINITY),
        }
    })
}

fn draw_segment(img: &mut RgbImage, frame: &Frame, from: (f64, f64), to: (f64, f64), color: Rgb<u8>) {
    let (x0, y0) = (frame.px(from.0), frame.py(from.1));
    let (x1, y1) = (frame.px(to.0), frame.py(to.1));
    let steps = (x1 - x0)
        .abs()
        .max((y1 - y0).abs())
        .ceil()
        .clamp(1.0, (4 * (WIDTH + HEIGHT)) as f64) as u32;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let y = y0 + (y1 - y0) * t;
        // Lines leave the plot once they drop below zero or above the frame
        if y >= MARGIN as f64 && y <= (HEIGHT - MARGIN) as f64 {
            put_clipped(img, x0 + (x1 - x0) * t, y, color);
        }
    }
}

fn draw_dot(img: &mut RgbImage, cx: f64, cy: f64, radius: i32, color: Rgb<u8>) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                put_clipped(img, cx + dx as f64, cy + dy as f64, color);
            }
        }
    }
}

fn put_clipped(img: &mut RgbImage, x: f64, y: f64, color: Rgb<u8>) {
    let (x, y) = (x.round(), y.round());
    if x >= 0.0 && y >= 0.0 && x < WIDTH as f64 && y < HEIGHT as f64 {
        img.put_pixel(x as u32, y as u32, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodmix_plan::{DEFAULT_SAMPLES, Product, ResourceBudget, solve};

    fn region() -> FeasibleRegion {
        let products = vec![
            Product::with_time("A", 3.0, 1.0, 1.0).unwrap(),
            Product::with_time("B", 5.0, 1.0, 3.0).unwrap(),
        ];
        let budget = ResourceBudget::new(4.0, 6.0).unwrap();
        let plan = solve(&products, &budget).unwrap();
        FeasibleRegion::compute(&products, &budget, &plan, DEFAULT_SAMPLES).unwrap()
    }

    #[test]
    fn test_envelope_interpolation() {
        let region = region();
        // At x = 0 both lines allow y <= 2 (material) and 4 (time)
        assert!((envelope_at(&region, 0.0).unwrap() - 2.0).abs() < 1e-9);
        // Far right of the time intercept nothing is shaded
        assert_eq!(envelope_at(&region, region.x_max), None);
    }

    #[test]
    fn test_render_writes_png() {
        let path = std::env::temp_dir().join(format!("prodmix-chart-{}.png", std::process::id()));
        render(&region(), &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (WIDTH, HEIGHT));
        // Just above the origin is inside the region
        assert_eq!(*img.get_pixel(MARGIN + 2, HEIGHT - MARGIN - 2), REGION_COLOR);

        let _ = std::fs::remove_file(&path);
    }
}
