// Simple particle struct to keep track of individual position, velocity,
// size and opacity

use crate::config::FieldConfig;
use crate::field::Viewport;
use rand::Rng;
use vecmath::{vec2_add, Vector2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    pub fn new(
        pos_x: f64,
        pos_y: f64,
        vel_x: f64,
        vel_y: f64,
        radius: f64,
        opacity: f64,
    ) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
            opacity,
        }
    }

    pub fn random<R: Rng>(rng: &mut R, viewport: Viewport, config: &FieldConfig) -> Particle {
        let max_vel = config.velocity_range;
        let pos_x = rng.gen::<f64>() * viewport.width;
        let pos_y = rng.gen::<f64>() * viewport.height;
        let vel_x = uniform(rng, [-max_vel, max_vel]);
        let vel_y = uniform(rng, [-max_vel, max_vel]);
        let radius = uniform(rng, config.radius_range);
        let opacity = uniform(rng, config.opacity_range);
        Particle::new(pos_x, pos_y, vel_x, vel_y, radius, opacity)
    }

    // Advance by one velocity step, then reflect off any boundary the new
    // position is past. Reflection points the component back toward the
    // interior, so a particle left outside by a shrink heads back in.
    pub fn step(&mut self, viewport: Viewport) {
        self.pos = vec2_add(self.pos, self.vel);
        let bounds = [viewport.width, viewport.height];
        for axis in 0..2 {
            if self.pos[axis] < 0.0 {
                self.vel[axis] = self.vel[axis].abs();
            } else if self.pos[axis] > bounds[axis] {
                self.vel[axis] = -self.vel[axis].abs();
            }
        }
    }

    #[cfg(test)]
    fn is_inside(&self, viewport: Viewport) -> bool {
        (0.0..=viewport.width).contains(&self.pos[0])
            && (0.0..=viewport.height).contains(&self.pos[1])
    }
}

// Uniform in [min, max), degenerate ranges return `min`
fn uniform<R: Rng>(rng: &mut R, [min, max]: [f64; 2]) -> f64 {
    rng.gen::<f64>() * (max - min) + min
}
