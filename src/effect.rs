use std::f32::consts::TAU;
use std::time::Duration;

use rand::Rng;

use crate::snake::Position;

/// How long debris stays visible after a crash.
pub const EFFECT_LIFETIME: Duration = Duration::from_millis(1_500);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Debris {
    origin: (f32, f32),
    velocity: (f32, f32),
}

/// Cosmetic burst of body segments flung away from the crash point.
///
/// Has no effect on gameplay; it only produces positions to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionEffect {
    debris: Vec<Debris>,
    elapsed: Duration,
}

impl CollisionEffect {
    /// Builds one piece of debris per segment, pushed radially from `impact`.
    ///
    /// Speed in cells per second is `force` scaled by a random factor in
    /// `[0.5, 1.0)`. The segment sitting on `impact` gets a random heading.
    pub fn new<R, I>(impact: Position, segments: I, force: f32, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = Position>,
    {
        let debris = segments
            .into_iter()
            .map(|segment| {
                let dx = (segment.x - impact.x) as f32;
                let dy = (segment.y - impact.y) as f32;
                let length = dx.hypot(dy);
                let (ux, uy) = if length > 0.0 {
                    (dx / length, dy / length)
                } else {
                    let angle = rng.gen_range(0.0..TAU);
                    (angle.cos(), angle.sin())
                };
                let speed = force * rng.gen_range(0.5..1.0);

                Debris {
                    origin: (segment.x as f32, segment.y as f32),
                    velocity: (ux * speed, uy * speed),
                }
            })
            .collect();

        Self {
            debris,
            elapsed: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.elapsed = self.elapsed.saturating_add(elapsed);
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= EFFECT_LIFETIME
    }

    /// Current debris cells, rounded to the grid.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let t = self.elapsed.as_secs_f32();
        let finished = self.is_finished();
        self.debris
            .iter()
            .filter(move |_| !finished)
            .map(move |debris| Position {
                x: (debris.origin.0 + debris.velocity.0 * t).round() as i32,
                y: (debris.origin.1 + debris.velocity.1 * t).round() as i32,
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.debris.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.debris.is_empty()
    }
}
