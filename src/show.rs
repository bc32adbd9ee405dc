use crate::fireworks::{Firework, RenderSink, Rgb};

// The simulation runs in a fixed world the canvas scales to the terminal,
// so physics constants stay meaningful at any window size.
pub const WORLD_W: f64 = 768.0;
pub const WORLD_H: f64 = 768.0;
pub const GROUND_Y: f64 = 580.0;

const FIREWORK_COUNT: usize = 12;

// Owns the firework pool and the relaunch protocol: a firework never
// restarts itself, the show observes finished and re-randomizes it.
pub struct FireworksShow {
    fireworks: Vec<Firework>,
}

impl FireworksShow {
    pub fn new() -> Self {
        let mut fireworks = Vec::with_capacity(FIREWORK_COUNT);
        for _ in 0..FIREWORK_COUNT {
            let mut fw = Firework::new();
            relaunch(&mut fw);
            fireworks.push(fw);
        }
        Self { fireworks }
    }

    // One fixed simulation step for the whole pool.
    pub fn tick(&mut self) {
        for fw in &mut self.fireworks {
            fw.update();
            if fw.is_finished() {
                relaunch(fw);
            }
        }
    }

    pub fn render(&self, sink: &mut impl RenderSink) {
        for fw in &self.fireworks {
            fw.render(sink);
        }
    }
}

// Gives a firework fresh random timings, color, launch velocity and a
// launch point on the ground line, then resets its cycle state.
fn relaunch(fw: &mut Firework) {
    let (wait, rise, bloom) = random_durations();
    fw.set_stage_durations(wait, rise, bloom);
    fw.set_color(hsv_to_rgb(fastrand::f64() * 360.0, 1.0, 1.0));

    let (vx, vy) = random_launch_velocity();
    fw.set_velocity(vx, vy);
    fw.set_position(random_launch_x(), GROUND_Y);

    fw.reset();
}

fn random_durations() -> (u32, u32, u32) {
    let wait = 120 + fastrand::u32(0..500);
    let rise = 160 + fastrand::u32(0..40);
    let bloom = 150 + fastrand::u32(0..20);
    (wait, rise, bloom)
}

// A slight horizontal lean and an upward launch speed.
fn random_launch_velocity() -> (f64, f64) {
    let vx = -0.25 + fastrand::f64() * 0.5;
    let vy = -3.0 + fastrand::f64() * 0.8;
    (vx, vy)
}

fn random_launch_x() -> f64 {
    300.0 + fastrand::f64() * 450.0
}

// Sector-based HSV conversion, h in degrees, s and v in [0, 1].
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let h = h.rem_euclid(360.0);
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingSink(usize);

    impl RenderSink for CountingSink {
        fn fill_square(&mut self, _x: f64, _y: f64, _color: Rgb) {
            self.0 += 1;
        }
    }

    #[test]
    fn randomized_ranges_hold() {
        fastrand::seed(42);
        for _ in 0..200 {
            let (wait, rise, bloom) = random_durations();
            assert!((120..620).contains(&wait));
            assert!((160..200).contains(&rise));
            assert!((150..170).contains(&bloom));

            let (vx, vy) = random_launch_velocity();
            assert!((-0.25..0.25).contains(&vx));
            assert!((-3.0..-2.2).contains(&vy));

            let x = random_launch_x();
            assert!((300.0..750.0).contains(&x));
        }
    }

    #[test]
    fn relaunch_restarts_the_cycle() {
        fastrand::seed(1);
        let mut fw = Firework::new();
        relaunch(&mut fw);
        assert!(!fw.is_finished());

        // Back in the wait stage, so nothing is drawn.
        let mut sink = CountingSink(0);
        fw.render(&mut sink);
        assert_eq!(sink.0, 0);
    }

    #[test]
    fn pool_never_stays_finished() {
        fastrand::seed(3);
        let mut show = FireworksShow::new();
        assert_eq!(show.fireworks.len(), FIREWORK_COUNT);

        // Longest possible cycle is 619 + 199 + 169 ticks, so every
        // firework finishes and relaunches at least once in here.
        for _ in 0..2000 {
            show.tick();
            for fw in &show.fireworks {
                assert!(!fw.is_finished());
            }
        }
        assert_eq!(show.fireworks.len(), FIREWORK_COUNT);
    }

    #[test]
    fn pool_becomes_visible() {
        fastrand::seed(9);
        let mut show = FireworksShow::new();
        // Every wait stage ends within 620 ticks and every rise stage
        // lasts at least 160, so the pool must draw something in here.
        let mut sink = CountingSink(0);
        for _ in 0..700 {
            show.tick();
            show.render(&mut sink);
        }
        assert!(sink.0 > 0);
    }

    #[test]
    fn hsv_sector_anchors() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(60.0, 1.0, 1.0), (255, 255, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), (0, 255, 0));
        assert_eq!(hsv_to_rgb(180.0, 1.0, 1.0), (0, 255, 255));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), (0, 0, 255));
        assert_eq!(hsv_to_rgb(300.0, 1.0, 1.0), (255, 0, 255));
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), (255, 0, 0));
    }

    #[test]
    fn hsv_zero_value_is_black() {
        assert_eq!(hsv_to_rgb(123.0, 1.0, 0.0), (0, 0, 0));
    }
}
