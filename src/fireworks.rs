use std::f64::consts::TAU;

// One firework cycles wait -> rise -> bloom, then reports finished and
// waits for its owner to re-randomize and reset it. All physics runs in
// fixed ticks, one per call to update().

pub type Rgb = (u8, u8, u8);

// Downward acceleration applied to the shell while rising and to every
// particle while blooming, in world units per tick squared.
pub const GRAVITY: f64 = 0.007;

// Per-tick velocity damping for bloom particles, both components.
pub const DRAG: f64 = 0.982;

pub const PARTICLE_MIN: usize = 160;
pub const PARTICLE_MAX: usize = 240;

const BURST_SPEED_MIN: f64 = 2.5;
const BURST_SPEED_SPAN: f64 = 0.5;

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy)]
struct Particle {
    pos: Vec2,
    vel: Vec2,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Stage {
    Wait,
    Rise,
    Bloom,
}

impl Stage {
    fn index(self) -> usize {
        match self {
            Stage::Wait => 0,
            Stage::Rise => 1,
            Stage::Bloom => 2,
        }
    }
}

// Where fireworks draw themselves. The canvas implements this; tests use
// a recording sink.
pub trait RenderSink {
    fn fill_square(&mut self, x: f64, y: f64, color: Rgb);
}

pub struct Firework {
    pos: Vec2,
    vel: Vec2,
    color: Rgb,
    // Cumulative tick counts at which wait, rise and bloom end.
    end_times: [u32; 3],
    time: u32,
    stage: Stage,
    finished: bool,
    particles: Vec<Particle>,
}

impl Firework {
    pub fn new() -> Self {
        Self {
            pos: Vec2::default(),
            vel: Vec2::default(),
            color: (255, 255, 255),
            end_times: [0; 3],
            time: 0,
            stage: Stage::Wait,
            finished: false,
            particles: Vec::with_capacity(PARTICLE_MAX),
        }
    }

    // Stores the three durations as cumulative end times and restarts the
    // tick counter. Call before the first update() of a cycle.
    pub fn set_stage_durations(&mut self, wait: u32, rise: u32, bloom: u32) {
        self.end_times = [wait, wait + rise, wait + rise + bloom];
        self.time = 0;
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.pos = Vec2 { x, y };
    }

    pub fn set_velocity(&mut self, x: f64, y: f64) {
        self.vel = Vec2 { x, y };
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    // Clears cycle state only. Position, velocity, color and stage times
    // keep their old values until the owner sets them again.
    pub fn reset(&mut self) {
        self.particles.clear();
        self.time = 0;
        self.stage = Stage::Wait;
        self.finished = false;
    }

    pub fn update(&mut self) {
        if self.finished {
            return;
        }

        self.time += 1;

        match self.stage {
            Stage::Wait => {}
            Stage::Rise => {
                self.pos.x += self.vel.x;
                self.pos.y += self.vel.y;
                self.vel.y += GRAVITY;
            }
            Stage::Bloom => {
                for p in &mut self.particles {
                    p.pos.x += p.vel.x;
                    p.pos.y += p.vel.y;
                    p.vel.y += GRAVITY;
                    p.vel.x *= DRAG;
                    p.vel.y *= DRAG;
                }
            }
        }

        self.check_stage();
    }

    // Strict > keeps a stage alive for exactly its duration: the boundary
    // tick still runs that stage's physics above.
    fn check_stage(&mut self) {
        if self.time <= self.end_times[self.stage.index()] {
            return;
        }
        match self.stage {
            Stage::Wait => self.stage = Stage::Rise,
            Stage::Rise => {
                let origin = self.pos;
                self.spawn_burst(origin);
                self.stage = Stage::Bloom;
            }
            // Bloom is terminal for the cycle.
            Stage::Bloom => self.finished = true,
        }
    }

    // Fills the particle buffer with a fresh burst centered on origin.
    // Velocities come in pairs with exact negation, so the burst's net
    // momentum is zero at creation. An odd count leaves the last particle
    // unpaired.
    fn spawn_burst(&mut self, origin: Vec2) {
        let count = PARTICLE_MIN + fastrand::usize(0..=PARTICLE_MAX - PARTICLE_MIN);
        debug_assert!(count <= self.particles.capacity());

        self.particles.clear();
        let mut i = 0;
        while i < count {
            // Two random angles give a uniform direction on a sphere
            // seen edge-on: the speed is projected through the vertical
            // angle onto the plane, then split by the level angle.
            let level = fastrand::f64() * TAU;
            let vertical = fastrand::f64() * TAU;
            let speed = BURST_SPEED_MIN + fastrand::f64() * BURST_SPEED_SPAN;

            let planar = speed * vertical.cos();
            let vel = Vec2 {
                x: planar * level.cos(),
                y: planar * level.sin(),
            };

            self.particles.push(Particle { pos: origin, vel });
            if i + 1 < count {
                self.particles.push(Particle {
                    pos: origin,
                    vel: Vec2 { x: -vel.x, y: -vel.y },
                });
            }
            i += 2;
        }
    }

    pub fn render(&self, sink: &mut impl RenderSink) {
        if self.finished {
            return;
        }
        match self.stage {
            Stage::Wait => {}
            Stage::Rise => sink.fill_square(self.pos.x, self.pos.y, self.color),
            Stage::Bloom => {
                for p in &self.particles {
                    sink.fill_square(p.pos.x, p.pos.y, self.color);
                }
            }
        }
    }
}
