//! # Projector — One Component, One Quad
//!
//! Turns a single [`Component`] of a [`GameObject`] into six world-space
//! vertices (two triangles). The transform chain, in order:
//!
//! 1. Build the four corners of the component's rectangle in the X/Z plane
//!    (Z is height off the ground), at its position within the object.
//! 2. Rotate the corners about the component's own pivot by its spin plus
//!    its facing (sprite-forward is re-based by −π/2 so a facing of 0 points
//!    along +X).
//! 3. Rotate the result about the object's center by the caller's camera
//!    normalization — this is what stands the panel up toward the fixed
//!    viewing angle.
//! 4. Flatten: add the caller's world offset, fold the object's elevation
//!    into Y, zero out Z. From here on the world is a flat painter's canvas.
//!
//! Steps 2 and 3 both go through [`rotate_about_pivot`], so the sequential
//! X→Y→Z axis ordering applies throughout.
//!
//! A component with no sprite, or a directional sprite with no art for the
//! current facing, contributes nothing — never a degenerate quad.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::atlas::{Facing, SpriteSheet};
use crate::math::{Vec2, Vec3, rotate_about_pivot};
use crate::world::{Component, GameObject};

use super::vertex::QuadVertex;
use super::Color;

/// Normalization for the regular top-down passes: stands each X/Z panel up
/// into the X/Y plane, height pointing toward +Y (up the screen).
pub const CAMERA_NORMALIZATION: Vec3 = Vec3::new(-FRAC_PI_2, 0.0, 0.0);

/// Shadow normalization: a π/4 diagonal fold, so the silhouette lies half
/// collapsed toward −Y instead of standing up.
pub const SHADOW_NORMALIZATION: Vec3 = Vec3::new(FRAC_PI_4, 0.0, 0.0);

/// Project one component and append its two triangles to `out`.
///
/// Emits in the fixed winding `{BL, TL, BR, TL, TR, BR}`. Appends nothing
/// when the component has no sprite or no art for its current facing.
pub fn project_component(
    object: &GameObject,
    component: &Component,
    normalization: Vec3,
    world_offset: Vec3,
    sheet: &SpriteSheet,
    color: Color,
    out: &mut Vec<QuadVertex>,
) {
    let Some(sprite) = &component.sprite else {
        return;
    };
    let facing = component.facing(object.direction);
    let Some(uvs) = sheet.sprite_uvs(&sprite.def, Facing::from_angle(facing), sprite.frame())
    else {
        return;
    };

    let corners = transformed_corners(object, component, facing, normalization, world_offset);
    push_quad(out, corners, uvs, color);
}

/// The component's center after the full transform chain; the batch renderer
/// sorts an object's components back-to-front by this point's Y.
pub fn projected_center(object: &GameObject, component: &Component, normalization: Vec3) -> Vec3 {
    let facing = component.facing(object.direction);
    let base = component_base(object, component);
    let center = base + component.size * 0.5;
    transform_point(object, component, facing, normalization, Vec3::ZERO, base, center)
}

/// Corner order: bottom-left, top-left, bottom-right, top-right — matching
/// the atlas mapper's UV order.
fn transformed_corners(
    object: &GameObject,
    component: &Component,
    facing: f32,
    normalization: Vec3,
    world_offset: Vec3,
) -> [Vec3; 4] {
    let base = component_base(object, component);
    let size = component.size;

    [
        base,
        base + Vec3::new(0.0, 0.0, size.z),
        base + Vec3::new(size.x, 0.0, 0.0),
        base + Vec3::new(size.x, 0.0, size.z),
    ]
    .map(|corner| transform_point(object, component, facing, normalization, world_offset, base, corner))
}

/// World-space bottom-left of the component's box. The object's elevation is
/// deliberately left out — it gets folded into Y after flattening.
fn component_base(object: &GameObject, component: &Component) -> Vec3 {
    Vec3::new(
        object.position.x + component.position.x,
        object.position.y + component.position.y,
        component.position.z,
    )
}

fn transform_point(
    object: &GameObject,
    component: &Component,
    facing: f32,
    normalization: Vec3,
    world_offset: Vec3,
    base: Vec3,
    point: Vec3,
) -> Vec3 {
    let pivot = base + component.rotation_point * component.size;
    let spin = Vec3::new(
        component.relative_rotation.x + component.rotation_offset.x,
        component.relative_rotation.y + component.rotation_offset.y,
        facing - FRAC_PI_2,
    );

    // Normalization pivots about the object's center at mid-height, in the
    // same elevation-free frame as the corners.
    let center = Vec3::new(
        object.position.x + object.size.x * 0.5,
        object.position.y + object.size.y * 0.5,
        object.size.z * 0.5,
    );

    let spun = rotate_about_pivot(point, pivot, spin);
    let normalized = rotate_about_pivot(spun, center, normalization);
    let offset = normalized + world_offset;

    // Elevation-as-depth: the object's height off the ground shifts it up
    // the Y axis, then true depth is discarded.
    Vec3::new(offset.x, offset.y + object.position.z, 0.0)
}

/// Append one quad (six vertices, winding `{0,1,2,1,3,2}` over BL/TL/BR/TR).
pub(crate) fn push_quad(
    out: &mut Vec<QuadVertex>,
    corners: [Vec3; 4],
    uvs: [Vec2; 4],
    color: Color,
) {
    let color = color.to_array();
    let vertex = |i: usize| QuadVertex {
        position: corners[i].to_array(),
        uv: uvs[i].to_array(),
        color,
    };
    for i in [0, 1, 2, 1, 3, 2] {
        out.push(vertex(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationPlayer;
    use crate::atlas::SpriteDef;
    use crate::render::TextureHandle;
    use crate::world::SpriteInstance;

    fn sheet() -> SpriteSheet {
        SpriteSheet::new(TextureHandle::WHITE, (512, 512), 64).unwrap()
    }

    fn sprite(directional: bool, directions: Vec<Facing>) -> SpriteInstance {
        SpriteInstance {
            def: SpriteDef {
                row: 0,
                col: 0,
                width: 1,
                height: 1,
                directional,
                directions,
                frame_count: 1,
            },
            player: AnimationPlayer::still(),
        }
    }

    fn object_with(component: Component) -> GameObject {
        GameObject::new("test", Vec3::ZERO, Vec3::ONE).with_component(component)
    }

    #[test]
    fn emits_six_vertices_in_fixed_winding() {
        let object = object_with(
            Component::new("body", Vec3::ZERO, Vec3::new(1.0, 0.0, 2.0))
                .sprite(sprite(false, Vec::new())),
        );
        let mut out = Vec::new();
        project_component(
            &object,
            &object.components()[0],
            CAMERA_NORMALIZATION,
            Vec3::ZERO,
            &sheet(),
            Color::WHITE,
            &mut out,
        );
        assert_eq!(out.len(), 6);

        // {BL, TL, BR, TL, TR, BR}: vertices 1 and 3 share TL, 2 and 5 share BR.
        assert_eq!(out[1], out[3]);
        assert_eq!(out[2], out[5]);
        // The four distinct corners really are distinct.
        assert_ne!(out[0], out[1]);
        assert_ne!(out[0], out[2]);
        assert_ne!(out[0], out[4]);
        assert_ne!(out[1], out[4]);
    }

    #[test]
    fn no_sprite_emits_nothing() {
        let object = object_with(Component::new("bare", Vec3::ZERO, Vec3::ONE));
        let mut out = Vec::new();
        project_component(
            &object,
            &object.components()[0],
            CAMERA_NORMALIZATION,
            Vec3::ZERO,
            &sheet(),
            Color::WHITE,
            &mut out,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn unmatched_facing_emits_nothing() {
        // Facing 0 buckets to Right; the sprite only has Front art.
        let object = object_with(
            Component::new("head", Vec3::ZERO, Vec3::ONE)
                .sprite(sprite(true, vec![Facing::Front])),
        );
        let mut out = Vec::new();
        project_component(
            &object,
            &object.components()[0],
            CAMERA_NORMALIZATION,
            Vec3::ZERO,
            &sheet(),
            Color::WHITE,
            &mut out,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn flattening_zeroes_depth_and_stands_height_up() {
        // A 1×2 panel facing right (angle 0), no spin: after normalization
        // its height should run along +Y and every Z should be exactly 0.
        let object = object_with(
            Component::new("body", Vec3::ZERO, Vec3::new(1.0, 0.0, 2.0))
                .sprite(sprite(false, Vec::new())),
        );
        let mut out = Vec::new();
        project_component(
            &object,
            &object.components()[0],
            CAMERA_NORMALIZATION,
            Vec3::ZERO,
            &sheet(),
            Color::WHITE,
            &mut out,
        );
        for v in &out {
            assert_eq!(v.position[2], 0.0);
        }
        let bl_y = out[0].position[1];
        let tl_y = out[1].position[1];
        assert!((tl_y - bl_y - 2.0).abs() < 1e-5, "height should span +Y");
    }

    #[test]
    fn elevation_folds_into_y() {
        let make = |elevation: f32| {
            let mut object = object_with(
                Component::new("body", Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0))
                    .sprite(sprite(false, Vec::new())),
            );
            object.position.z = elevation;
            let mut out = Vec::new();
            project_component(
                &object,
                &object.components()[0],
                CAMERA_NORMALIZATION,
                Vec3::ZERO,
                &sheet(),
                Color::WHITE,
                &mut out,
            );
            out[0].position[1]
        };
        assert!((make(3.0) - make(0.0) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn world_offset_translates_every_vertex() {
        let object = object_with(
            Component::new("body", Vec3::ZERO, Vec3::ONE).sprite(sprite(false, Vec::new())),
        );
        let run = |offset: Vec3| {
            let mut out = Vec::new();
            project_component(
                &object,
                &object.components()[0],
                SHADOW_NORMALIZATION,
                offset,
                &sheet(),
                Color::BLACK,
                &mut out,
            );
            out
        };
        let plain = run(Vec3::ZERO);
        let moved = run(Vec3::new(2.0, -1.0, 0.0));
        for (a, b) in plain.iter().zip(&moved) {
            assert!((b.position[0] - a.position[0] - 2.0).abs() < 1e-5);
            assert!((b.position[1] - a.position[1] + 1.0).abs() < 1e-5);
        }
    }
}
