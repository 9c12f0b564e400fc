//! Night landscape: sky, sun, clouds, stars, mountains, river with boats, windmills, trees,
//! bushes, a house and a car.
//!
//! Every object starts from identity and draws its parts in sibling branches, so parts never
//! see each other's local transforms. Coordinates are clip space (`[-1, 1]`, +Y up).

use meadow_engine::driver::Scene;
use meadow_engine::paint::Color;
use meadow_engine::scene::PrimitiveKind::{self, BladeFan, Circle, RayFan, Square, Triangle};
use meadow_engine::scene::Canvas;
use meadow_engine::transform::{TransformError, Vec3};

use crate::anim::AnimationState;

type DrawResult = Result<(), TransformError>;

/// Just past a full turn; visually a hair of counter-clockwise tilt.
const NEAR_FULL_TURN: f32 = 6.285;

#[derive(Debug, Default)]
pub struct Landscape {
    anim: AnimationState,
}

impl Landscape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(anim: AnimationState) -> Self {
        Self { anim }
    }

    #[inline]
    pub fn state(&self) -> &AnimationState {
        &self.anim
    }
}

impl Scene for Landscape {
    fn advance(&mut self) {
        self.anim.tick();
    }

    fn draw(&self, c: &mut Canvas<'_>) -> DrawResult {
        let AnimationState {
            angle,
            translation_x,
            ..
        } = self.anim;

        sky(c)?;
        sun(c, angle)?;
        cloud(c)?;

        star(c, 0.4, 0.8, 0.015, 0.025, 0.0, 1.2)?;
        star(c, 0.55, 0.95, 0.012, 0.02, 0.0, 0.8)?;
        star(c, -0.15, 0.75, 0.01, 0.015, 0.0, 1.2)?;
        star(c, 0.02, 0.65, 0.005, 0.01, 0.0, 1.7)?;
        star(c, -0.03, 0.5, 0.003, 0.006, 0.0, 2.0)?;

        mountain(c, (-0.69, 0.097), (1.1, 0.25), Some((-0.665, 0.1)))?;
        mountain(c, (-0.054, 0.1), (1.5, 0.5), Some((0.0, 0.106)))?;
        mountain(c, (0.83, 0.075), (0.8, 0.2), None)?;

        ground(c)?;
        road(c)?;
        river(c)?;

        tree(c, (0.35, 0.01), (0.86, 0.85))?;
        tree(c, (0.0, 0.005), (1.0, 1.0))?;
        tree(c, (-0.15, 0.01), (0.8, 0.8))?;

        boat(c, translation_x, (0.08, 0.055), 0.75, Color::rgba(0.2, 0.2, 0.5, 0.9))?;
        boat(c, translation_x, (0.0, 0.0), 1.0, Color::rgba(1.0, 0.0, 0.0, 0.9))?;

        windmill(c, -angle, (0.0, 0.045), 0.7)?;
        windmill(c, -angle, (-0.04, 0.05), 1.0)?;

        bush(c, None)?;
        bush(c, Some(((0.7, 0.0), 1.02)))?;
        bush(c, Some(((1.46, -0.18), 1.6)))?;
        bush(c, Some(((2.15, 0.25), 1.3)))?;

        house(c)?;
        car(c)
    }
}

// ── helpers ───────────────────────────────────────────────────────────────

#[inline]
fn v(x: f32, y: f32) -> Vec3 {
    Vec3::new(x, y, 0.0)
}

#[inline]
fn s(x: f32, y: f32) -> Vec3 {
    Vec3::new(x, y, 1.0)
}

/// One part: translate to `at`, scale by `size`, draw; in its own branch.
fn part(c: &mut Canvas<'_>, kind: PrimitiveKind, color: Color, at: Vec3, size: Vec3) -> DrawResult {
    c.branch(|c| {
        c.translate(at).scale(size).draw(kind, color);
        Ok(())
    })
}

/// Like [`part`] with a rotation between translation and scale.
fn turned(
    c: &mut Canvas<'_>,
    kind: PrimitiveKind,
    color: Color,
    at: Vec3,
    angle: f32,
    size: Vec3,
) -> DrawResult {
    c.branch(|c| {
        c.translate(at).rotate(angle).scale(size).draw(kind, color);
        Ok(())
    })
}

// ── sky ───────────────────────────────────────────────────────────────────

fn sky(c: &mut Canvas<'_>) -> DrawResult {
    c.reset();
    part(c, Square, Color::black(), v(0.0, 0.6), s(3.0, 1.2))
}

fn sun(c: &mut Canvas<'_>, angle: f32) -> DrawResult {
    c.reset();
    let white = Color::white();
    part(c, Circle, white, v(-0.68, 0.84), s(0.09, 0.09))?;
    c.branch(|c| {
        c.translate(v(-0.68, 0.84))
            .scale(s(0.135, 0.135))
            .rotate(angle)
            .draw(RayFan, white);
        Ok(())
    })
}

fn cloud(c: &mut Canvas<'_>) -> DrawResult {
    c.reset();
    let dark = Color::rgb(0.7, 0.7, 0.7);
    part(c, Circle, dark, v(-0.82, 0.55), s(0.23, 0.13))?;
    part(c, Circle, Color::rgb(0.9, 0.9, 0.9), v(-0.6, 0.514), s(0.17, 0.095))?;
    part(c, Circle, dark, v(-0.39, 0.515), s(0.09, 0.055))
}

/// Four triangles arranged in a cross. `size` multiplies both triangle scales.
fn star(c: &mut Canvas<'_>, tx: f32, ty: f32, sx: f32, sy: f32, angle: f32, size: f32) -> DrawResult {
    use std::f32::consts::{FRAC_PI_2, PI};

    let (sx, sy) = (sx * size, sy * size);
    let arms = [
        (v(tx, ty), 0.0),
        (v(tx - 0.8 * sx, ty - 0.5 * sy), FRAC_PI_2),
        (v(tx, ty - sy), PI),
        (v(tx + 0.8 * sx, ty - 0.5 * sy), PI * 3.0 / 2.0),
    ];

    for (at, turn) in arms {
        c.reset();
        turned(c, Triangle, Color::white(), at, angle + turn, s(sx, sy))?;
    }
    Ok(())
}

// ── land ──────────────────────────────────────────────────────────────────

/// A mountain is a lit triangle plus an optional shaded one tilted by 6.5 rad.
fn mountain(c: &mut Canvas<'_>, at: (f32, f32), size: (f32, f32), shade: Option<(f32, f32)>) -> DrawResult {
    c.reset();
    let shaded = Color::rgb(0.65, 0.46, 0.16);
    let lit = match shade {
        Some(_) => Color::rgb(0.57, 0.36, 0.15),
        None => shaded,
    };

    part(c, Triangle, lit, v(at.0, at.1), s(size.0, size.1))?;
    if let Some((x, y)) = shade {
        turned(c, Triangle, shaded, v(x, y), 6.5, s(size.0, size.1))?;
    }
    Ok(())
}

fn ground(c: &mut Canvas<'_>) -> DrawResult {
    c.reset();
    part(c, Square, Color::rgba(0.15, 0.61, 0.0, 0.7), v(0.0, -0.6), s(3.0, 1.2))
}

fn road(c: &mut Canvas<'_>) -> DrawResult {
    c.reset();
    turned(c, Triangle, Color::rgba(0.30, 0.40, 0.0, 0.9), v(0.568, -0.8), 7.2, s(1.6, 2.1))
}

fn river(c: &mut Canvas<'_>) -> DrawResult {
    c.reset();
    part(c, Square, Color::rgba(0.0, 0.0, 0.8, 0.8), v(0.0, -0.14), s(3.0, 0.23))?;

    ripple(c, None)?;
    ripple(c, Some(v(0.85, 0.1)))?;
    ripple(c, Some(v(1.5, -0.06)))
}

/// A thin line on the water, drawn as a square squashed to 0.003 and turned 4.71 rad.
fn ripple(c: &mut Canvas<'_>, offset: Option<Vec3>) -> DrawResult {
    c.reset();
    if let Some(o) = offset {
        c.translate(o);
    }
    turned(c, Square, Color::rgba(0.9, 0.9, 0.9, 0.8), v(-0.7, -0.19), 4.71, s(0.003, 0.4))
}

fn tree(c: &mut Canvas<'_>, at: (f32, f32), size: (f32, f32)) -> DrawResult {
    c.reset();
    // z scale 0 flattens the group.
    c.translate(v(at.0, at.1)).scale(Vec3::new(size.0, size.1, 0.0));

    part(c, Triangle, Color::rgba(0.30, 0.41, 0.0, 0.9), v(0.55, 0.45), s(0.35, 0.3))?;
    part(c, Triangle, Color::rgba(0.38, 0.51, 0.0, 0.9), v(0.55, 0.5), s(0.375, 0.3))?;
    part(c, Triangle, Color::rgba(0.45, 0.60, 0.0, 0.9), v(0.55, 0.55), s(0.4, 0.3))?;
    // trunk
    part(c, Square, Color::rgb(0.57, 0.36, 0.15), v(0.55, 0.14), s(0.04, 0.33))
}

fn bush(c: &mut Canvas<'_>, placement: Option<((f32, f32), f32)>) -> DrawResult {
    c.reset();
    if let Some(((x, y), k)) = placement {
        c.translate(v(x, y)).scale(Vec3::new(k, k, 0.0));
    }

    part(c, Circle, Color::rgba(0.0, 0.7, 0.0, 0.9), v(-1.0, -0.55), s(0.075, 0.055))?;
    part(c, Circle, Color::rgba(0.0, 0.4, 0.0, 0.9), v(-0.72, -0.55), s(0.07, 0.05))?;
    part(c, Circle, Color::rgba(0.0, 0.51, 0.0, 0.9), v(-0.86, -0.53), s(0.13, 0.09))
}

// ── animated ──────────────────────────────────────────────────────────────

/// Sailboat of relative size `k`, shifted along X by the animated `translation_x`.
fn boat(c: &mut Canvas<'_>, translation_x: f32, at: (f32, f32), k: f32, sail: Color) -> DrawResult {
    let (tx, ty) = at;
    let hull = Color::rgb(0.83, 0.83, 0.83);
    let black = Color::black();

    c.reset();
    c.translate(v(translation_x / k - (1.0 - k) * 0.3, 0.0));

    part(c, Square, hull, v(tx, ty - 0.15 * k), s(0.18 * k, 0.06 * k))?;
    turned(c, Triangle, hull, v(tx - 0.09 * k, ty - 0.15 * k), -3.15, s(0.1 * k, 0.06 * k))?;
    turned(c, Triangle, hull, v(tx + 0.09 * k, ty - 0.15 * k), -3.15, s(0.1 * k, 0.06 * k))?;
    // mast and stay
    part(c, Square, black, v(tx + 0.01 * k, ty + 0.006 * k), s(0.01 * k, 0.25 * k))?;
    turned(c, Square, black, v(tx - 0.03 * k, ty - 0.01 * k), 5.9, s(0.005 * k, 0.23 * k))?;
    turned(c, Triangle, sail, v(tx + 0.115 * k, ty + 0.006 * k), 4.72, s(0.2 * k, 0.2 * k))
}

/// Pole, blades spun by `angle`, hub. `k` scales the placement offsets and sizes.
fn windmill(c: &mut Canvas<'_>, angle: f32, at: (f32, f32), k: f32) -> DrawResult {
    c.reset();
    c.translate(v(at.0, at.1));

    part(c, Square, Color::rgb(0.3, 0.0, 0.0), v(0.7 * k, -0.25 * k), s(0.03 * k, 0.55 * k))?;
    c.branch(|c| {
        c.translate(v(0.7 * k, 0.06 * k))
            .scale(s(0.2 * k, 0.2 * k))
            .rotate(angle)
            .draw(BladeFan, Color::rgb(0.8, 0.65, 0.0));
        Ok(())
    })?;
    part(c, Circle, Color::black(), v(0.7 * k, 0.053 * k), s(0.03 * k, 0.03 * k))
}

// ── buildings & vehicles ──────────────────────────────────────────────────

fn house(c: &mut Canvas<'_>) -> DrawResult {
    c.reset();

    let roof = Color::rgb(0.8, 0.3, 0.1);
    part(c, Square, roof, v(-0.57, -0.29), s(0.4, 0.2))?;
    turned(c, Triangle, roof, v(-0.77, -0.29), NEAR_FULL_TURN, s(0.25, 0.2))?;
    turned(c, Triangle, roof, v(-0.37, -0.29), NEAR_FULL_TURN, s(0.25, 0.2))?;

    part(c, Square, Color::rgb(0.83, 0.83, 0.83), v(-0.57, -0.515), s(0.5, 0.25))?;

    let openings = Color::rgba(0.8, 0.55, 0.1, 0.9);
    part(c, Square, openings, v(-0.715, -0.46), s(0.07, 0.07))?;
    part(c, Square, openings, v(-0.425, -0.46), s(0.07, 0.07))?;
    part(c, Square, openings, v(-0.57, -0.55), s(0.08, 0.18))
}

fn wheel(c: &mut Canvas<'_>, offset_x: f32) -> DrawResult {
    c.reset();
    c.translate(v(offset_x, 0.0));
    part(c, Circle, Color::black(), v(-0.652, -0.88), s(0.055, 0.055))?;
    part(c, Circle, Color::rgb(0.51, 0.51, 0.51), v(-0.652, -0.88), s(0.04, 0.04))
}

fn car(c: &mut Canvas<'_>) -> DrawResult {
    c.reset();
    turned(c, Circle, Color::rgba(0.0, 0.0, 1.0, 0.9), v(-0.501, -0.73), NEAR_FULL_TURN, s(0.18, 0.10))?;
    part(c, Square, Color::rgb(0.9, 0.9, 0.9), v(-0.5, -0.73), s(0.198, 0.10))?;

    wheel(c, 0.0)?;
    wheel(c, 0.3)?;

    c.reset();
    let body = Color::rgba(0.0, 0.0, 0.8, 0.7);
    part(c, Square, body, v(-0.5, -0.8), s(0.429, 0.10))?;
    turned(c, Triangle, body, v(-0.285, -0.8), NEAR_FULL_TURN, s(0.154, 0.10))?;
    turned(c, Triangle, body, v(-0.716, -0.8), NEAR_FULL_TURN, s(0.154, 0.10))
}

#[cfg(test)]
mod tests {
    use super::*;
    use meadow_engine::scene::DrawList;
    use meadow_engine::transform::{Transform, TransformStack};

    const EPS: f32 = 1e-5;

    fn draw(scene: &Landscape) -> (DrawList, TransformStack) {
        let mut list = DrawList::new();
        let mut stack = TransformStack::new();
        {
            let mut canvas = Canvas::new(&mut stack, &mut list);
            scene.draw(&mut canvas).unwrap();
        }
        (list, stack)
    }

    #[test]
    fn frame_draws_every_part_with_a_balanced_stack() {
        let (list, stack) = draw(&Landscape::new());
        assert_eq!(list.len(), 95);
        assert!(stack.is_balanced());
        assert_eq!(stack.finish_frame(), Ok(()));
    }

    #[test]
    fn primitive_mix() {
        let (list, _) = draw(&Landscape::new());
        assert_eq!(list.count_of(Square), 24);
        assert_eq!(list.count_of(Triangle), 45);
        assert_eq!(list.count_of(Circle), 23);
        assert_eq!(list.count_of(RayFan), 1);
        assert_eq!(list.count_of(BladeFan), 2);
    }

    #[test]
    fn sky_is_drawn_first_and_car_last() {
        let (list, _) = draw(&Landscape::new());
        let first = list.items()[0];
        assert_eq!(first.kind, Square);
        assert_eq!(first.color, Color::black());
        let expected = Transform::identity().translate(v(0.0, 0.6)).scale(s(3.0, 1.2));
        assert!(first.transform.abs_diff_eq(expected, EPS));

        let last = list.items()[list.len() - 1];
        assert_eq!(last.kind, Triangle);
    }

    #[test]
    fn sun_rays_spin_with_the_angle() {
        let anim = AnimationState {
            angle: 0.5,
            ..AnimationState::new()
        };
        let (list, _) = draw(&Landscape::with_state(anim));
        let rays = list.items().iter().find(|d| d.kind == RayFan).unwrap();
        let expected = Transform::identity()
            .translate(v(-0.68, 0.84))
            .scale(s(0.135, 0.135))
            .rotate_z(0.5);
        assert!(rays.transform.abs_diff_eq(expected, EPS));
    }

    #[test]
    fn windmill_blades_spin_backwards() {
        let anim = AnimationState {
            angle: 0.25,
            ..AnimationState::new()
        };
        let (list, _) = draw(&Landscape::with_state(anim));
        let blades: Vec<_> = list.items().iter().filter(|d| d.kind == BladeFan).collect();
        assert_eq!(blades.len(), 2);

        let k = 1.0;
        let expected = Transform::identity()
            .translate(v(-0.04, 0.05))
            .translate(v(0.7 * k, 0.06 * k))
            .scale(s(0.2 * k, 0.2 * k))
            .rotate_z(-0.25);
        assert!(blades[1].transform.abs_diff_eq(expected, EPS));
    }

    #[test]
    fn boats_follow_translation() {
        let at_rest = draw(&Landscape::new()).0;
        let moved = draw(&Landscape::with_state(AnimationState {
            translation_x: 0.3,
            ..AnimationState::new()
        }))
        .0;

        // Second hull-colored square: the full-size boat.
        let hull = |list: &DrawList| {
            list.items()
                .iter()
                .filter(|d| d.kind == Square && d.color == Color::rgb(0.83, 0.83, 0.83))
                .nth(1)
                .map(|d| d.transform.transform_point(Vec3::ZERO))
                .unwrap()
        };

        let delta = hull(&moved) - hull(&at_rest);
        assert!(delta.abs_diff_eq(v(0.3, 0.0), EPS), "got {delta:?}");
    }

    #[test]
    fn advance_ticks_the_animation() {
        let mut scene = Landscape::new();
        scene.advance();
        scene.advance();
        assert!((scene.state().angle - 0.02).abs() < 1e-7);
    }

    #[test]
    fn tree_groups_flatten_z() {
        let (list, _) = draw(&Landscape::new());
        let foliage = Color::rgba(0.30, 0.41, 0.0, 0.9);
        let trees: Vec<_> = list.items().iter().filter(|d| d.color == foliage).collect();
        assert_eq!(trees.len(), 3);
        for d in trees {
            assert!(d.transform.transform_point(Vec3::Z).z.abs() < EPS);
        }

        let sky = list.items()[0].transform;
        assert!((sky.transform_point(Vec3::Z).z - 1.0).abs() < EPS);
    }
}
