//! The particle field: a fixed set of particles drifting inside a viewport.
//!
//! `FieldState` is owned by whoever drives the frame loop and is passed to
//! [`render`](crate::render::render) each frame. There is no hidden global
//! state, and randomness is injected so a seeded generator reproduces a field
//! exactly.

use crate::config::FieldConfig;
use crate::particle::Particle;
use rand::Rng;
use tracing::debug;
use vecmath::{vec2_len, vec2_sub};

/// Pixel-space bounds particles move and reflect within.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Viewport { width, height }
    }
}

pub struct FieldState {
    viewport: Viewport,
    particles: Vec<Particle>,
}

impl FieldState {
    pub fn initialize<R: Rng>(viewport: Viewport, config: &FieldConfig, rng: &mut R) -> Self {
        let mut particles = Vec::with_capacity(config.particle_count);
        for _ in 0..config.particle_count {
            particles.push(Particle::random(rng, viewport, config));
        }
        debug!(
            count = particles.len(),
            width = viewport.width,
            height = viewport.height,
            "particle field initialized"
        );
        FieldState {
            viewport,
            particles,
        }
    }

    /// Builds a field from explicit particles, mostly useful for tests.
    pub fn from_particles(viewport: Viewport, particles: Vec<Particle>) -> Self {
        FieldState {
            viewport,
            particles,
        }
    }

    /// Replaces the bounds. Particles keep their positions even if they end
    /// up outside; they are steered back in by the next tick.
    pub fn resize(&mut self, viewport: Viewport) {
        debug!(
            width = viewport.width,
            height = viewport.height,
            "particle field resized"
        );
        self.viewport = viewport;
    }

    pub fn tick(&mut self) {
        let viewport = self.viewport;
        for particle in &mut self.particles {
            particle.step(viewport);
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Every unordered pair `(i, j)` with `i < j`, with its distance.
    ///
    /// Yields exactly `n * (n - 1) / 2` items. This is quadratic in the
    /// particle count, which is fine for the few dozen particles a page uses.
    pub fn pairs(&self) -> Pairs<'_> {
        Pairs {
            particles: &self.particles,
            i: 0,
            j: 1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pair {
    pub i: usize,
    pub j: usize,
    pub distance: f64,
}

pub struct Pairs<'a> {
    particles: &'a [Particle],
    i: usize,
    j: usize,
}

impl<'a> Iterator for Pairs<'a> {
    type Item = Pair;

    fn next(&mut self) -> Option<Pair> {
        if self.j >= self.particles.len() {
            self.i += 1;
            self.j = self.i + 1;
            if self.j >= self.particles.len() {
                return None;
            }
        }
        let (i, j) = (self.i, self.j);
        self.j += 1;
        let distance = vec2_len(vec2_sub(self.particles[i].pos, self.particles[j].pos));
        Some(Pair { i, j, distance })
    }
}
