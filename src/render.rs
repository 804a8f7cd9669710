//! Draws one frame of a particle field onto a [`Surface`].

use crate::config::FieldConfig;
use crate::field::FieldState;
use crate::surface::Surface;

/// What a single `render` call did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles_drawn: usize,
    pub pairs_checked: usize,
    pub connections_drawn: usize,
}

/// Alpha of the line joining two particles `distance` apart, or `None` when
/// they are too far apart to be connected. Fades linearly from `max_alpha`
/// at distance zero to nothing at `threshold`.
pub fn connection_alpha(distance: f64, threshold: f64, max_alpha: f64) -> Option<f64> {
    if distance < threshold {
        Some(max_alpha * (1.0 - distance / threshold))
    } else {
        None
    }
}

/// Clears the viewport, draws every particle, then joins each close pair.
///
/// Reads the field without changing it, so rendering twice without a tick in
/// between issues identical commands.
pub fn render<S: Surface>(
    state: &FieldState,
    config: &FieldConfig,
    surface: &mut S,
) -> Result<FrameStats, S::Error> {
    let mut stats = FrameStats::default();
    let viewport = state.viewport();
    let color = config.base_color();
    let particles = state.particles();

    surface.clear_rect(0.0, 0.0, viewport.width, viewport.height)?;

    for p in particles {
        surface.fill_circle(p.pos[0], p.pos[1], p.radius, color.with_alpha(p.opacity))?;
        stats.particles_drawn += 1;
    }

    for pair in state.pairs() {
        stats.pairs_checked += 1;
        let alpha = match connection_alpha(
            pair.distance,
            config.connection_distance,
            config.max_line_alpha,
        ) {
            Some(alpha) => alpha,
            None => continue,
        };
        surface.stroke_line(
            particles[pair.i].pos,
            particles[pair.j].pos,
            color.with_alpha(alpha),
            config.line_width,
        )?;
        stats.connections_drawn += 1;
    }

    Ok(stats)
}
