//! A small village scene: a slowly turning guard holding a torch, on a
//! checkered tile floor, with shadows and additive torchlight.
//!
//! Expects `assets/atlas.png` and `assets/atlas.json` next to the working
//! directory; the JSON must define `guard_body`, `guard_head`, and `torch`
//! sprites.

use std::f32::consts::{FRAC_PI_4, TAU};

use skuggi::prelude::*;

struct Village;

impl Game for Village {
    fn init(&mut self, engine: &mut Engine) {
        let atlas = engine
            .load_texture("assets/atlas.png")
            .expect("missing assets/atlas.png");
        let size = engine.textures.size(atlas);
        let config = load_sheet_config("assets/atlas.json").expect("missing assets/atlas.json");

        engine.sprites =
            Some(SpriteSheet::new(atlas, size, config.cell_size).expect("bad atlas grid"));
        engine.tiles = Some(
            TileSheet::new(atlas, size, config.cell_size, config.tiles.clone())
                .expect("bad atlas grid"),
        );

        let guard = GameObject::new("guard", Vec3::new(-0.5, 0.0, 0.0), Vec3::new(1.0, 1.0, 2.0))
            .with_component(
                Component::new("body", Vec3::ZERO, Vec3::new(1.0, 0.0, 1.4))
                    .sprite(SpriteInstance::still(config.sprites["guard_body"].clone())),
            )
            .with_component(
                Component::new("head", Vec3::new(0.0, 0.0, 1.4), Vec3::new(1.0, 0.0, 0.6))
                    .sprite(SpriteInstance::still(config.sprites["guard_head"].clone())),
            )
            .with_component(
                Component::new("torch", Vec3::new(0.8, 0.0, 0.6), Vec3::new(0.4, 0.0, 0.9))
                    .sprite(SpriteInstance::new(config.sprites["torch"].clone(), 0.12))
                    .light(3, Color::rgb(1.0, 0.7, 0.3)),
            );
        engine.scene.objects.push(guard);

        engine.scene.tile_map = Some(TileMap {
            width: 8,
            height: 8,
            tile_size: 1.0,
            origin: Vec2::new(-4.0, -4.0),
            cells: (0..64)
                .map(|i| TileCell {
                    id: ((i % 8 + i / 8) % 2) as u32,
                    orientation: TileOrientation::Bottom,
                })
                .collect(),
        });

        engine.light_direction = FRAC_PI_4;
    }

    fn update(&mut self, engine: &mut Engine, time: &Time) {
        if let Some(guard) = engine.scene.objects.first_mut() {
            guard.direction = modulo(guard.direction + time.delta_secs() * 0.5, TAU);
        }
    }
}

fn main() {
    App::new(Village)
        .title("skuggi village")
        .clear_color(Color::rgb(0.05, 0.06, 0.08))
        .run();
}
