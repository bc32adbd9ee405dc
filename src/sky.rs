use noise::{NoiseFn, Perlin};

use crate::fireworks::Rgb;
use crate::show::{GROUND_Y, WORLD_H};

// Night-sky backdrop: a seeded scatter of stars above the ground line,
// each twinkling on slow Perlin noise. Composited under the trails.

const STAR_CELLS_PER: usize = 110;
const STAR_TINT: [f32; 3] = [205.0, 215.0, 255.0];

pub struct Sky {
    width: usize,
    brightness: Vec<f32>,
    perlin: Perlin,
    bg: [f32; 3],
}

impl Sky {
    pub fn new(width: usize, height: usize, bg: Rgb) -> Self {
        let mut brightness = vec![0.0f32; width * height];
        let horizon = ((GROUND_Y / WORLD_H) * height as f64) as usize;

        if width > 0 && horizon > 0 {
            let count = (width * height) / STAR_CELLS_PER;
            for _ in 0..count {
                let x = fastrand::usize(0..width);
                let y = fastrand::usize(0..horizon);
                // Two uniform draws keep most stars faint.
                let b = 0.2 + 0.8 * fastrand::f32() * fastrand::f32();
                brightness[y * width + x] = b;
            }
        }

        Self {
            width,
            brightness,
            perlin: Perlin::new(fastrand::u32(0..1000)),
            bg: [bg.0 as f32, bg.1 as f32, bg.2 as f32],
        }
    }

    pub fn shade(&self, x: usize, y: usize, time: f32) -> [f32; 3] {
        let b = self.brightness[y * self.width + x];
        if b <= 0.0 {
            return self.bg;
        }
        let idx = y * self.width + x;
        let tw = self
            .perlin
            .get([idx as f64 * 0.913, time as f64 * 0.35]) as f32;
        let v = (b * (0.72 + 0.28 * tw)).clamp(0.0, 1.0);
        [
            self.bg[0].max(STAR_TINT[0] * v),
            self.bg[1].max(STAR_TINT[1] * v),
            self.bg[2].max(STAR_TINT[2] * v),
        ]
    }
}
