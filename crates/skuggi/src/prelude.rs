//! Convenience re-exports — `use skuggi::prelude::*` for the common items.

pub use crate::animation::AnimationPlayer;
pub use crate::app::{App, Engine, Game};
pub use crate::atlas::{
    Facing, SheetConfig, SheetError, SpriteDef, SpriteSheet, Tile, TileOrientation, TileSheet,
    load_sheet_config,
};
pub use crate::camera::Camera;
pub use crate::math::{Mat4, Vec2, Vec3, angle_between, coordinates_in_disc, modulo};
pub use crate::render::{
    BlendMode, Color, DrawSpace, FrameRenderer, GpuContext, QuadVertex, RenderContext, Renderer,
    TextureHandle, TextureStore, render_scene,
};
#[cfg(feature = "text")]
pub use crate::text::{Font, TextAlign, TextParams, draw_text, measure, wrap_lines};
pub use crate::time::Time;
pub use crate::world::{
    Component, GameObject, Light, Scene, SpriteInstance, TileCell, TileMap,
};
