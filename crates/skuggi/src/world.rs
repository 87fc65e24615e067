//! # World — Game Objects and Their Components
//!
//! A [`GameObject`] is a positioned, facing-aware thing in the world: a
//! character, a prop, a projectile, a light. Its visuals are a stack of
//! [`Component`]s — independently rotatable rectangular panels (head, body,
//! weapon, flame) each carrying its own sprite, pivot, and optional light
//! emission. Components belong to exactly one object and die with it.
//!
//! The renderer treats all of this as read-only input: a [`Scene`] is handed
//! to the render passes by reference each frame, nothing here is mutated
//! during drawing. The only mutation entry point is
//! [`Scene::advance_animations`], which ticks every sprite's frame clock.

use serde::Deserialize;

use crate::animation::AnimationPlayer;
use crate::atlas::{SpriteDef, TileOrientation};
use crate::math::{Vec2, Vec3};
use crate::render::Color;

/// A sprite definition paired with its frame clock.
#[derive(Debug, Clone)]
pub struct SpriteInstance {
    pub def: SpriteDef,
    pub player: AnimationPlayer,
}

impl SpriteInstance {
    pub fn new(def: SpriteDef, frame_time: f32) -> Self {
        Self {
            def,
            player: AnimationPlayer::new(frame_time),
        }
    }

    /// A non-animating instance stuck on frame 0.
    pub fn still(def: SpriteDef) -> Self {
        Self {
            def,
            player: AnimationPlayer::still(),
        }
    }

    /// Current animation frame.
    pub fn frame(&self) -> u32 {
        self.player.frame()
    }
}

/// Light emission attached to a component.
#[derive(Debug, Clone, Copy)]
pub struct Light {
    /// Intensity of the additive glow: the diffuse pass draws every light
    /// once regardless, and the bright pass stacks `brightness - 1` extra
    /// copies on top (saturating, so 0 and 1 add none).
    pub brightness: u32,
    pub color: Color,
}

/// One rotatable, textured rectangular panel of a game object.
///
/// Positions and sizes are in the owning object's local space. The pivot
/// ([`rotation_point`](Self::rotation_point)) is a normalized 0–1 weight
/// inside the component's own box, so `(0.5, 0.5, 0.5)` spins it about its
/// middle and `(0.0, 0.0, 0.0)` about its bottom-left corner.
#[derive(Debug, Clone)]
pub struct Component {
    pub name: String,
    /// Offset within the owning object.
    pub position: Vec3,
    /// Local extents; the quad spans X/Z (Z is height off the ground).
    pub size: Vec3,
    /// The component's own spin on the X/Y axes.
    pub relative_rotation: Vec2,
    /// Extra rotation applied on top of the spin (pose offsets).
    pub rotation_offset: Vec2,
    /// Normalized 0–1 pivot within the component's box.
    pub rotation_point: Vec3,
    /// Facing override in radians; `None` inherits the object's direction.
    pub direction: Option<f32>,
    pub sprite: Option<SpriteInstance>,
    pub light: Option<Light>,
}

impl Component {
    pub fn new(name: impl Into<String>, position: Vec3, size: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            size,
            relative_rotation: Vec2::ZERO,
            rotation_offset: Vec2::ZERO,
            rotation_point: Vec3::splat(0.5),
            direction: None,
            sprite: None,
            light: None,
        }
    }

    /// Set the sprite (builder pattern).
    pub fn sprite(mut self, sprite: SpriteInstance) -> Self {
        self.sprite = Some(sprite);
        self
    }

    /// Mark as light-emitting (builder pattern).
    pub fn light(mut self, brightness: u32, color: Color) -> Self {
        self.light = Some(Light { brightness, color });
        self
    }

    /// Set the normalized pivot (builder pattern).
    pub fn pivot(mut self, point: Vec3) -> Self {
        self.rotation_point = point;
        self
    }

    /// Set the spin rotation (builder pattern).
    pub fn rotation(mut self, relative: Vec2) -> Self {
        self.relative_rotation = relative;
        self
    }

    /// The facing this component renders with, given its owner's direction.
    pub fn facing(&self, object_direction: f32) -> f32 {
        self.direction.unwrap_or(object_direction)
    }
}

/// A composite game object: world placement plus an ordered component stack.
#[derive(Debug, Clone)]
pub struct GameObject {
    pub name: String,
    /// World position of the object's local origin. `z` is elevation.
    pub position: Vec3,
    /// World extents.
    pub size: Vec3,
    /// Facing in radians.
    pub direction: f32,
    /// Insertion-ordered; looked up by name.
    components: Vec<Component>,
}

impl GameObject {
    pub fn new(name: impl Into<String>, position: Vec3, size: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            size,
            direction: 0.0,
            components: Vec::new(),
        }
    }

    /// Derived center point, the pivot for camera normalization.
    pub fn center(&self) -> Vec3 {
        self.position + self.size * 0.5
    }

    /// Append a component. Names are expected to be unique per object;
    /// lookup returns the first match.
    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Builder-style [`add_component`](Self::add_component).
    pub fn with_component(mut self, component: Component) -> Self {
        self.add_component(component);
        self
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn component_mut(&mut self, name: &str) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.name == name)
    }

    /// All components, insertion order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Light-emitting components only.
    pub fn light_components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(|c| c.light.is_some())
    }
}

/// One cell of a [`TileMap`].
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TileCell {
    pub id: u32,
    #[serde(default)]
    pub orientation: TileOrientation,
}

/// A rectangular grid of tiles on the ground plane.
///
/// Cells are stored row-major with `(0, 0)` at `origin`; cell `(x, y)`
/// occupies the world square from `origin + (x, y) * tile_size`.
#[derive(Debug, Clone, Deserialize)]
pub struct TileMap {
    pub width: u32,
    pub height: u32,
    /// World-unit edge length of one tile.
    pub tile_size: f32,
    pub origin: Vec2,
    pub cells: Vec<TileCell>,
}

impl TileMap {
    pub fn cell(&self, x: u32, y: u32) -> Option<&TileCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get((y * self.width + x) as usize)
    }

    /// World position of a cell's bottom-left corner.
    pub fn cell_origin(&self, x: u32, y: u32) -> Vec2 {
        self.origin + Vec2::new(x as f32, y as f32) * self.tile_size
    }
}

/// The visible world handed to the renderer each frame.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub objects: Vec<GameObject>,
    pub tile_map: Option<TileMap>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tick every sprite's frame clock by `dt` seconds.
    pub fn advance_animations(&mut self, dt: f32) {
        for object in &mut self.objects {
            for component in &mut object.components {
                if let Some(sprite) = &mut component.sprite {
                    let frames = sprite.def.frame_count;
                    sprite.player.advance(dt, frames);
                }
            }
        }
    }
}
