//! # Atlas — Sprite and Tile Sheets
//!
//! An atlas is one texture holding many images at fixed grid cells. This
//! module turns "sprite at cell (row, col), facing left, animation frame 2"
//! into the four normalized UV corners the projector stamps onto a quad.
//!
//! ```text
//!  ┌────┬────┬────┐  cell grid = texture pixels / cell pixels
//!  │    │ ▒▒ │    │  sprite: base cell + frame column offset
//!  ├────┼────┼────┤          + facing row offset (directional sprites
//!  │ ▒▒ │    │    │            stack one row per declared direction)
//!  └────┴────┴────┘
//! ```
//!
//! Corner order everywhere is **bottom-left, top-left, bottom-right,
//! top-right** — the projector's winding depends on it.
//!
//! Tile UVs are inset by [`UV_EPSILON`] on every edge so linear filtering at
//! cell borders doesn't bleed the neighboring tile in. This is an
//! acknowledged hack, not a guaranteed fix for every atlas size; a
//! border-padded atlas would be the real solution but changes the asset
//! pipeline.

use serde::Deserialize;

use crate::math::{Vec2, modulo};
use crate::render::TextureHandle;

use std::collections::HashMap;
use std::f32::consts::{PI, TAU};
use std::fmt;
use std::path::Path;

/// Inset applied to every tile UV edge to avoid sampling the adjacent cell.
pub const UV_EPSILON: f32 = 0.001;

/// The four cardinal facings a directional sprite can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Facing {
    Front,
    Back,
    Left,
    Right,
}

impl Facing {
    /// Bucket a world angle (radians, any range) into a cardinal facing.
    ///
    /// `[π/4, 3π/4)` → Back, `[3π/4, 5π/4)` → Left, `[5π/4, 7π/4)` → Front,
    /// everything else → Right.
    pub fn from_angle(angle: f32) -> Self {
        let a = modulo(angle, TAU);
        if (PI / 4.0..3.0 * PI / 4.0).contains(&a) {
            Facing::Back
        } else if (3.0 * PI / 4.0..5.0 * PI / 4.0).contains(&a) {
            Facing::Left
        } else if (5.0 * PI / 4.0..7.0 * PI / 4.0).contains(&a) {
            Facing::Front
        } else {
            Facing::Right
        }
    }
}

/// How a tile's texture is oriented when stamped onto the grid.
///
/// Rotation happens by permuting which computed UV corner lands in which
/// output slot — the texture is never resampled. A closed enum (plus serde
/// rejecting unknown strings at the config boundary) means there is no
/// "malformed tag silently renders unrotated" path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum TileOrientation {
    /// Unrotated.
    #[default]
    Bottom,
    /// 180°: every corner swaps with its diagonal opposite.
    Top,
    /// 90° counter-clockwise.
    Left,
    /// 90° clockwise.
    Right,
    /// Unrotated; used when a tile is drawn as an object component.
    Component,
}

/// Where a sprite lives on its sheet and how it animates.
#[derive(Debug, Clone, Deserialize)]
pub struct SpriteDef {
    /// Base cell row on the atlas.
    pub row: u32,
    /// Base cell column on the atlas.
    pub col: u32,
    /// Width in atlas cells.
    #[serde(default = "one")]
    pub width: u32,
    /// Height in atlas cells.
    #[serde(default = "one")]
    pub height: u32,
    /// Whether the sheet stacks one row of art per declared facing.
    #[serde(default)]
    pub directional: bool,
    /// Facings with art, in row order below the base row.
    #[serde(default)]
    pub directions: Vec<Facing>,
    /// Animation frames laid out as consecutive columns.
    #[serde(default = "one")]
    pub frame_count: u32,
}

fn one() -> u32 {
    1
}

/// One tile definition; its atlas position is its index in the sheet's list.
#[derive(Debug, Clone, Deserialize)]
pub struct Tile {
    pub name: String,
    #[serde(default)]
    pub solid: bool,
}

/// Sheet configuration as loaded from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetConfig {
    pub cell_size: u32,
    #[serde(default)]
    pub sprites: HashMap<String, SpriteDef>,
    #[serde(default)]
    pub tiles: Vec<Tile>,
}

/// Errors raised when constructing or loading a sheet.
#[derive(Debug)]
pub enum SheetError {
    /// Cell size of zero cannot form a grid.
    ZeroCellSize,
    /// The texture's pixel size is not an exact multiple of the cell size.
    /// Integer truncation would silently misalign every UV on the sheet, so
    /// this fails at construction instead.
    NotDivisible {
        texture: (u32, u32),
        cell_size: u32,
    },
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetError::ZeroCellSize => write!(f, "sheet cell size must be non-zero"),
            SheetError::NotDivisible { texture, cell_size } => write!(
                f,
                "texture {}x{} is not divisible by cell size {}",
                texture.0, texture.1, cell_size
            ),
            SheetError::Io(e) => write!(f, "failed to read sheet config: {e}"),
            SheetError::Parse(e) => write!(f, "failed to parse sheet config: {e}"),
        }
    }
}

impl std::error::Error for SheetError {}

/// Load a [`SheetConfig`] from a JSON file.
pub fn load_sheet_config(path: impl AsRef<Path>) -> Result<SheetConfig, SheetError> {
    let data = std::fs::read_to_string(path).map_err(SheetError::Io)?;
    serde_json::from_str(&data).map_err(SheetError::Parse)
}

/// A sprite atlas: one texture plus its derived cell grid.
///
/// Grid dimensions are computed once at construction and never change.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub texture: TextureHandle,
    pub cell_size: u32,
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
}

impl SpriteSheet {
    /// Build a sheet over a texture of `texture_size` pixels with square
    /// cells of `cell_size` pixels. Fails eagerly when the texture is not an
    /// exact multiple of the cell size.
    pub fn new(
        texture: TextureHandle,
        texture_size: (u32, u32),
        cell_size: u32,
    ) -> Result<Self, SheetError> {
        if cell_size == 0 {
            return Err(SheetError::ZeroCellSize);
        }
        if texture_size.0 % cell_size != 0 || texture_size.1 % cell_size != 0 {
            return Err(SheetError::NotDivisible {
                texture: texture_size,
                cell_size,
            });
        }
        Ok(Self {
            texture,
            cell_size,
            width: texture_size.0 / cell_size,
            height: texture_size.1 / cell_size,
        })
    }

    /// UV corners for a sprite at the given facing and animation frame.
    ///
    /// Returns `None` when the sprite is directional and `facing` is not in
    /// its declared direction list — that component simply has no art this
    /// frame, which is expected, not an error.
    pub fn sprite_uvs(&self, def: &SpriteDef, facing: Facing, frame: u32) -> Option<[Vec2; 4]> {
        let mut row = def.row;
        if def.directional {
            let index = def.directions.iter().position(|d| *d == facing)?;
            row += index as u32 * def.height;
        }
        let col = def.col + frame;

        let w = self.width as f32;
        let h = self.height as f32;
        let u0 = col as f32 / w;
        let u1 = (col + def.width) as f32 / w;
        let v0 = row as f32 / h;
        let v1 = (row + def.height) as f32 / h;

        // Bottom-left, top-left, bottom-right, top-right.
        Some([
            Vec2::new(u0, v1),
            Vec2::new(u0, v0),
            Vec2::new(u1, v1),
            Vec2::new(u1, v0),
        ])
    }
}

/// A tile atlas: a [`SpriteSheet`]-style grid plus ordered tile definitions.
#[derive(Debug, Clone)]
pub struct TileSheet {
    pub texture: TextureHandle,
    pub cell_size: u32,
    pub width: u32,
    pub height: u32,
    /// Tile definitions indexed by atlas position.
    pub tiles: Vec<Tile>,
}

impl TileSheet {
    /// Same eager grid validation as [`SpriteSheet::new`].
    pub fn new(
        texture: TextureHandle,
        texture_size: (u32, u32),
        cell_size: u32,
        tiles: Vec<Tile>,
    ) -> Result<Self, SheetError> {
        let grid = SpriteSheet::new(texture, texture_size, cell_size)?;
        Ok(Self {
            texture,
            cell_size,
            width: grid.width,
            height: grid.height,
            tiles,
        })
    }

    /// Tile definition for an ID, if one exists.
    pub fn tile(&self, id: u32) -> Option<&Tile> {
        self.tiles.get(id as usize)
    }

    /// UV corners for a tile ID, inset by [`UV_EPSILON`] and permuted for the
    /// requested orientation.
    ///
    /// IDs map to cells row-major: `row = id / width`, `col = id % width`.
    /// This assumes one tile definition per atlas cell walked left-to-right,
    /// top-to-bottom; multi-row tile families are not representable, which
    /// matches the layout every shipped atlas uses. An ID past the last cell
    /// returns `None` — its UVs would land outside the texture.
    pub fn tile_uvs(&self, id: u32, orientation: TileOrientation) -> Option<[Vec2; 4]> {
        if id >= self.width * self.height {
            return None;
        }
        let row = id / self.width;
        let col = id % self.width;

        let w = self.width as f32;
        let h = self.height as f32;
        let u0 = col as f32 / w + UV_EPSILON;
        let u1 = (col + 1) as f32 / w - UV_EPSILON;
        let v0 = row as f32 / h + UV_EPSILON;
        let v1 = (row + 1) as f32 / h - UV_EPSILON;

        let bl = Vec2::new(u0, v1);
        let tl = Vec2::new(u0, v0);
        let br = Vec2::new(u1, v1);
        let tr = Vec2::new(u1, v0);

        Some(match orientation {
            TileOrientation::Bottom | TileOrientation::Component => [bl, tl, br, tr],
            TileOrientation::Top => [tr, br, tl, bl],
            TileOrientation::Left => [tl, tr, bl, br],
            TileOrientation::Right => [br, bl, tr, tl],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sheet(px: u32, cell: u32) -> SpriteSheet {
        SpriteSheet::new(TextureHandle::WHITE, (px, px), cell).unwrap()
    }

    fn plain_sprite(row: u32, col: u32) -> SpriteDef {
        SpriteDef {
            row,
            col,
            width: 1,
            height: 1,
            directional: false,
            directions: Vec::new(),
            frame_count: 1,
        }
    }

    #[test]
    fn grid_derivation() {
        let s = sheet(512, 256);
        assert_eq!((s.width, s.height), (2, 2));
    }

    #[test]
    fn uneven_texture_is_rejected() {
        let err = SpriteSheet::new(TextureHandle::WHITE, (500, 512), 256);
        assert!(matches!(err, Err(SheetError::NotDivisible { .. })));
        assert!(matches!(
            SpriteSheet::new(TextureHandle::WHITE, (512, 512), 0),
            Err(SheetError::ZeroCellSize)
        ));
    }

    #[test]
    fn facing_buckets() {
        assert_eq!(Facing::from_angle(0.0), Facing::Right);
        assert_eq!(Facing::from_angle(PI / 2.0), Facing::Back);
        assert_eq!(Facing::from_angle(PI), Facing::Left);
        assert_eq!(Facing::from_angle(3.0 * PI / 2.0), Facing::Front);
        // Boundaries belong to the bucket that starts there.
        assert_eq!(Facing::from_angle(PI / 4.0), Facing::Back);
        assert_eq!(Facing::from_angle(7.0 * PI / 4.0), Facing::Right);
        // Negative angles normalize first.
        assert_eq!(Facing::from_angle(-PI / 2.0), Facing::Front);
    }

    #[test]
    fn sprite_uvs_in_bounds_and_ordered() {
        let s = sheet(1024, 64); // 16x16 grid
        let def = plain_sprite(3, 5);
        let uv = s.sprite_uvs(&def, Facing::Right, 0).unwrap();
        for corner in uv {
            assert!((0.0..=1.0).contains(&corner.x), "{corner:?}");
            assert!((0.0..=1.0).contains(&corner.y), "{corner:?}");
        }
        let [bl, tl, br, tr] = uv;
        assert!(bl.y > tl.y && br.y > tr.y, "bottom corners below top");
        assert!(br.x > bl.x && tr.x > tl.x, "right corners right of left");
    }

    #[test]
    fn directional_row_offset() {
        let s = sheet(1024, 64);
        let def = SpriteDef {
            directional: true,
            directions: vec![Facing::Front, Facing::Back],
            height: 2,
            ..plain_sprite(0, 0)
        };
        let front = s.sprite_uvs(&def, Facing::Front, 0).unwrap();
        let back = s.sprite_uvs(&def, Facing::Back, 0).unwrap();
        // Back is the second declared direction: two cells (height) lower.
        let cell_v = 1.0 / 16.0;
        assert!((back[1].y - front[1].y - 2.0 * cell_v).abs() < 1e-6);
    }

    #[test]
    fn unmatched_facing_yields_no_geometry() {
        let s = sheet(1024, 64);
        let def = SpriteDef {
            directional: true,
            directions: vec![Facing::Front],
            ..plain_sprite(0, 0)
        };
        assert!(s.sprite_uvs(&def, Facing::Left, 0).is_none());
    }

    #[test]
    fn animation_frame_advances_column() {
        let s = sheet(1024, 64);
        let def = SpriteDef {
            frame_count: 4,
            ..plain_sprite(0, 2)
        };
        let f0 = s.sprite_uvs(&def, Facing::Right, 0).unwrap();
        let f3 = s.sprite_uvs(&def, Facing::Right, 3).unwrap();
        assert!((f3[0].x - f0[0].x - 3.0 / 16.0).abs() < 1e-6);
    }

    #[test]
    fn tile_id_maps_row_major() {
        let tiles = TileSheet::new(TextureHandle::WHITE, (512, 512), 256, Vec::new()).unwrap();
        // 2x2 grid: id 3 → row 1, col 1.
        let uv = tiles.tile_uvs(3, TileOrientation::Bottom).unwrap();
        let [bl, ..] = uv;
        assert!(bl.x > 0.5 && bl.y > 0.5, "tile 3 is the bottom-right cell");
        for corner in uv {
            assert!((0.0..=1.0).contains(&corner.x));
            assert!((0.0..=1.0).contains(&corner.y));
        }
    }

    #[test]
    fn tile_id_past_the_grid_yields_nothing() {
        let tiles = TileSheet::new(TextureHandle::WHITE, (512, 512), 256, Vec::new()).unwrap();
        // 2x2 grid: ids 0..=3 are valid, 4 would sample below the texture.
        assert!(tiles.tile_uvs(3, TileOrientation::Bottom).is_some());
        assert!(tiles.tile_uvs(4, TileOrientation::Bottom).is_none());
    }

    #[test]
    fn top_orientation_reverses_bottom() {
        let tiles = TileSheet::new(TextureHandle::WHITE, (512, 512), 256, Vec::new()).unwrap();
        let bottom = tiles.tile_uvs(1, TileOrientation::Bottom).unwrap();
        let top = tiles.tile_uvs(1, TileOrientation::Top).unwrap();
        let mut reversed = bottom;
        reversed.reverse();
        assert_eq!(top, reversed);
    }

    #[test]
    fn tile_uvs_are_inset() {
        let tiles = TileSheet::new(TextureHandle::WHITE, (512, 512), 256, Vec::new()).unwrap();
        let [bl, tl, br, _] = tiles.tile_uvs(0, TileOrientation::Bottom).unwrap();
        assert!((tl.x - UV_EPSILON).abs() < 1e-6);
        assert!((tl.y - UV_EPSILON).abs() < 1e-6);
        assert!((br.x - (0.5 - UV_EPSILON)).abs() < 1e-6);
        assert!((bl.y - (0.5 - UV_EPSILON)).abs() < 1e-6);
    }

    #[test]
    fn sheet_config_parses() {
        let json = r#"{
            "cell_size": 32,
            "sprites": {
                "torch": {
                    "row": 0, "col": 4, "frame_count": 3,
                    "directional": true, "directions": ["Front", "Back"]
                }
            },
            "tiles": [
                { "name": "grass" },
                { "name": "wall", "solid": true }
            ]
        }"#;
        let config: SheetConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.cell_size, 32);
        assert_eq!(config.sprites["torch"].frame_count, 3);
        assert!(config.tiles[1].solid);

        // Unknown orientation tags are a config error, not a silent default.
        assert!(serde_json::from_str::<TileOrientation>("\"Sideways\"").is_err());
    }
}
