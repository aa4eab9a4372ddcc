//! Spawn positions that keep new creatures clear of the outer walls.

use gevo_core::{Position, WorldBounds};
use rand::Rng;

/// Pick a spawn position for a creature of the given diameter.
///
/// Each axis draws a fraction in `[0, 1)`. Fractions below one half are scaled
/// by the full extent and pushed one tile away from the near wall; the rest are
/// scaled by the extent minus one tile and the diameter, keeping the body off
/// the far wall. This biases creatures towards the centre.
pub fn place<R: Rng>(bounds: &WorldBounds, diameter: f32, rng: &mut R) -> Position {
    let rx = rng.gen::<f32>();
    let ry = rng.gen::<f32>();

    Position::new(
        place_axis(rx, bounds.extent_x(), bounds.tile_width as f32, diameter),
        place_axis(ry, bounds.extent_y(), bounds.tile_height as f32, diameter),
    )
}

fn place_axis(fraction: f32, extent: f32, tile: f32, diameter: f32) -> f32 {
    if fraction < 0.5 {
        fraction * extent + tile
    } else {
        fraction * (extent - tile - diameter)
    }
}
