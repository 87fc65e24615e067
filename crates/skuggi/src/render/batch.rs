//! # Batch — Painter-Sorted Render Passes
//!
//! Each pass walks the scene, projects quads, and hands one flat triangle
//! list per texture to the [`Renderer`]. Occlusion is ordering: within a
//! pass, objects are sorted far-to-near (descending world Y, since world Y
//! points up and the camera looks down), and each object's components are
//! sorted the same way by their projected centers. A full frame runs
//!
//! 1. [`render_tiles`] — the ground.
//! 2. [`render_shadows`] — collapsed silhouettes under everything standing.
//! 3. [`render_objects`] — the objects themselves.
//! 4. [`render_lighting`] — one additive overlay per lit component.
//! 5. [`render_bright_lighting`] — brightness − 1 extra additive repeats.
//!
//! [`render_scene`] runs them in that order. Passes with nothing to draw
//! submit nothing at all.

use crate::atlas::{SpriteSheet, TileSheet};
use crate::camera::Camera;
use crate::math::Vec3;
use crate::world::{GameObject, Scene};

use super::projector::{
    CAMERA_NORMALIZATION, SHADOW_NORMALIZATION, project_component, projected_center, push_quad,
};
use super::vertex::QuadVertex;
use super::{BlendMode, Color, DrawSpace, Renderer};

/// Shadows are a flat translucent black.
const SHADOW_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.5);

/// Everything a frame's passes read. All borrowed; nothing here is mutated
/// while drawing.
pub struct RenderContext<'a> {
    pub scene: &'a Scene,
    pub camera: &'a Camera,
    pub sheet: &'a SpriteSheet,
    pub tiles: Option<&'a TileSheet>,
}

/// Run every pass in frame order. `light_direction` is the world angle the
/// scene's light comes from, for the shadow pass.
pub fn render_scene(ctx: &RenderContext<'_>, renderer: &mut impl Renderer, light_direction: f32) {
    render_tiles(ctx, renderer);
    render_shadows(ctx, renderer, light_direction);
    render_objects(ctx, renderer);
    render_lighting(ctx, renderer);
    render_bright_lighting(ctx, renderer);
}

/// Objects and their sprite components, alpha-blended, far-to-near.
pub fn render_objects(ctx: &RenderContext<'_>, renderer: &mut impl Renderer) {
    let mut vertices = Vec::new();
    for object in painter_order(ctx.scene) {
        for component in component_order(object, CAMERA_NORMALIZATION) {
            project_component(
                object,
                component,
                CAMERA_NORMALIZATION,
                Vec3::ZERO,
                ctx.sheet,
                Color::WHITE,
                &mut vertices,
            );
        }
    }
    submit(renderer, ctx, BlendMode::Alpha, vertices);
}

/// One additive overlay per lit component, tinted with its light color.
/// Every light draws here exactly once; brightness only scales the bright
/// pass.
pub fn render_lighting(ctx: &RenderContext<'_>, renderer: &mut impl Renderer) {
    render_light_repeats(ctx, renderer, |_| 1);
}

/// The extra additive repeats beyond the first: brightness N contributes
/// N − 1 more copies of its overlay, stacking the glow. Brightness 0 and 1
/// contribute nothing here.
pub fn render_bright_lighting(ctx: &RenderContext<'_>, renderer: &mut impl Renderer) {
    render_light_repeats(ctx, renderer, |brightness| brightness.saturating_sub(1));
}

fn render_light_repeats(
    ctx: &RenderContext<'_>,
    renderer: &mut impl Renderer,
    repeats: impl Fn(u32) -> u32,
) {
    let mut vertices = Vec::new();
    for object in painter_order(ctx.scene) {
        for component in object.light_components() {
            let Some(light) = component.light else {
                continue;
            };
            for _ in 0..repeats(light.brightness) {
                project_component(
                    object,
                    component,
                    CAMERA_NORMALIZATION,
                    Vec3::ZERO,
                    ctx.sheet,
                    light.color,
                    &mut vertices,
                );
            }
        }
    }
    submit(renderer, ctx, BlendMode::Additive, vertices);
}

/// Collapsed silhouettes, alpha-blended under the object pass.
///
/// The π/4 fold half-flattens each panel toward the ground; a translation
/// offset then pushes the footprint away from `light_direction` (the world
/// angle the light comes from), scaled by the object's height so tall things
/// throw long shadows.
pub fn render_shadows(
    ctx: &RenderContext<'_>,
    renderer: &mut impl Renderer,
    light_direction: f32,
) {
    let away = -Vec3::new(light_direction.cos(), light_direction.sin(), 0.0);
    let mut vertices = Vec::new();
    for object in painter_order(ctx.scene) {
        let offset = away * (object.size.z * 0.5);
        for component in component_order(object, SHADOW_NORMALIZATION) {
            // Lights cast no shadow.
            if component.light.is_some() {
                continue;
            }
            project_component(
                object,
                component,
                SHADOW_NORMALIZATION,
                offset,
                ctx.sheet,
                SHADOW_COLOR,
                &mut vertices,
            );
        }
    }
    submit(renderer, ctx, BlendMode::Alpha, vertices);
}

/// The ground grid: one flat quad per cell on the Z = 0 plane.
pub fn render_tiles(ctx: &RenderContext<'_>, renderer: &mut impl Renderer) {
    let Some(tiles) = ctx.tiles else {
        return;
    };
    let Some(map) = &ctx.scene.tile_map else {
        return;
    };

    let mut vertices = Vec::new();
    for y in 0..map.height {
        for x in 0..map.width {
            let Some(cell) = map.cell(x, y) else {
                continue;
            };
            let o = map.cell_origin(x, y);
            let s = map.tile_size;
            let corners = [
                Vec3::new(o.x, o.y, 0.0),
                Vec3::new(o.x, o.y + s, 0.0),
                Vec3::new(o.x + s, o.y, 0.0),
                Vec3::new(o.x + s, o.y + s, 0.0),
            ];
            // An ID past the atlas grid has no art to stamp.
            let Some(uvs) = tiles.tile_uvs(cell.id, cell.orientation) else {
                continue;
            };
            push_quad(&mut vertices, corners, uvs, Color::WHITE);
        }
    }

    if !vertices.is_empty() {
        renderer.submit(tiles.texture, BlendMode::Alpha, DrawSpace::World, &vertices);
    }
}

/// Objects far-to-near: descending center Y.
fn painter_order(scene: &Scene) -> Vec<&GameObject> {
    let mut order: Vec<&GameObject> = scene.objects.iter().collect();
    order.sort_by(|a, b| b.center().y.total_cmp(&a.center().y));
    order
}

/// One object's components far-to-near under the given normalization.
fn component_order(
    object: &GameObject,
    normalization: Vec3,
) -> Vec<&crate::world::Component> {
    let mut order: Vec<_> = object.components().iter().collect();
    order.sort_by(|a, b| {
        let ya = projected_center(object, a, normalization).y;
        let yb = projected_center(object, b, normalization).y;
        yb.total_cmp(&ya)
    });
    order
}

fn submit(
    renderer: &mut impl Renderer,
    ctx: &RenderContext<'_>,
    blend: BlendMode,
    vertices: Vec<QuadVertex>,
) {
    if !vertices.is_empty() {
        renderer.submit(ctx.sheet.texture, blend, DrawSpace::World, &vertices);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::{SpriteDef, Tile, TileOrientation};
    use crate::math::Vec2;
    use crate::render::TextureHandle;
    use crate::world::{Component, SpriteInstance, TileCell, TileMap};

    struct Recorder {
        calls: Vec<(TextureHandle, BlendMode, DrawSpace, Vec<QuadVertex>)>,
    }

    impl Recorder {
        fn new() -> Self {
            Self { calls: Vec::new() }
        }
    }

    impl Renderer for Recorder {
        fn submit(
            &mut self,
            texture: TextureHandle,
            blend: BlendMode,
            space: DrawSpace,
            vertices: &[QuadVertex],
        ) {
            self.calls
                .push((texture, blend, space, vertices.to_vec()));
        }
    }

    fn sheet() -> SpriteSheet {
        SpriteSheet::new(TextureHandle::WHITE, (512, 512), 64).unwrap()
    }

    fn camera() -> Camera {
        Camera::centered(Vec2::ZERO, 16.0, 9.0, Vec2::new(1280.0, 720.0))
    }

    fn sprite() -> SpriteInstance {
        SpriteInstance::still(SpriteDef {
            row: 0,
            col: 0,
            width: 1,
            height: 1,
            directional: false,
            directions: Vec::new(),
            frame_count: 1,
        })
    }

    fn simple_object(name: &str, position: Vec3) -> GameObject {
        GameObject::new(name, position, Vec3::ONE)
            .with_component(Component::new("body", Vec3::ZERO, Vec3::ONE).sprite(sprite()))
    }

    #[test]
    fn empty_scene_submits_nothing() {
        let scene = Scene::new();
        let sheet = sheet();
        let camera = camera();
        let ctx = RenderContext {
            scene: &scene,
            camera: &camera,
            sheet: &sheet,
            tiles: None,
        };
        let mut recorder = Recorder::new();
        render_scene(&ctx, &mut recorder, 0.0);
        assert!(recorder.calls.is_empty());
    }

    #[test]
    fn objects_draw_far_to_near() {
        let mut scene = Scene::new();
        // "near" sits at a lower Y than "far", so it must come second.
        scene.objects.push(simple_object("near", Vec3::new(10.0, -5.0, 0.0)));
        scene.objects.push(simple_object("far", Vec3::new(-10.0, 5.0, 0.0)));
        let sheet = sheet();
        let camera = camera();
        let ctx = RenderContext {
            scene: &scene,
            camera: &camera,
            sheet: &sheet,
            tiles: None,
        };
        let mut recorder = Recorder::new();
        render_objects(&ctx, &mut recorder);

        assert_eq!(recorder.calls.len(), 1, "one texture, one draw");
        let (_, blend, space, vertices) = &recorder.calls[0];
        assert_eq!(*blend, BlendMode::Alpha);
        assert_eq!(*space, DrawSpace::World);
        assert_eq!(vertices.len(), 12);
        // The far object's vertices (x around -10) precede the near one's.
        assert!(vertices[0].position[0] < 0.0);
        assert!(vertices[6].position[0] > 0.0);
    }

    #[test]
    fn lighting_draws_once_bright_draws_brightness_minus_one() {
        let mut scene = Scene::new();
        scene.objects.push(
            GameObject::new("fire", Vec3::ZERO, Vec3::ONE).with_component(
                Component::new("glow", Vec3::ZERO, Vec3::ONE)
                    .sprite(sprite())
                    .light(3, Color::rgb(1.0, 0.6, 0.2)),
            ),
        );
        let sheet = sheet();
        let camera = camera();
        let ctx = RenderContext {
            scene: &scene,
            camera: &camera,
            sheet: &sheet,
            tiles: None,
        };

        let mut lighting = Recorder::new();
        render_lighting(&ctx, &mut lighting);
        let (_, blend, _, vertices) = &lighting.calls[0];
        assert_eq!(*blend, BlendMode::Additive);
        assert_eq!(vertices.len(), 6, "one quad regardless of brightness");
        assert_eq!(vertices[0].color, [1.0, 0.6, 0.2, 1.0]);

        let mut bright = Recorder::new();
        render_bright_lighting(&ctx, &mut bright);
        let (_, _, _, vertices) = &bright.calls[0];
        assert_eq!(vertices.len(), 12, "brightness 3 repeats twice more");
    }

    #[test]
    fn zero_brightness_still_draws_diffuse_once() {
        let mut scene = Scene::new();
        scene.objects.push(
            GameObject::new("ember", Vec3::ZERO, Vec3::ONE).with_component(
                Component::new("glow", Vec3::ZERO, Vec3::ONE)
                    .sprite(sprite())
                    .light(0, Color::WHITE),
            ),
        );
        let sheet = sheet();
        let camera = camera();
        let ctx = RenderContext {
            scene: &scene,
            camera: &camera,
            sheet: &sheet,
            tiles: None,
        };

        // The diffuse pass is the lit-component traversal, unconditionally.
        let mut lighting = Recorder::new();
        render_lighting(&ctx, &mut lighting);
        assert_eq!(lighting.calls.len(), 1);
        assert_eq!(lighting.calls[0].3.len(), 6);

        // Only the repeats are brightness-gated.
        let mut bright = Recorder::new();
        render_bright_lighting(&ctx, &mut bright);
        assert!(bright.calls.is_empty());
    }

    #[test]
    fn shadows_are_translucent_black_and_skip_lights() {
        let mut scene = Scene::new();
        scene.objects.push(
            GameObject::new("guard", Vec3::ZERO, Vec3::ONE)
                .with_component(Component::new("body", Vec3::ZERO, Vec3::ONE).sprite(sprite()))
                .with_component(
                    Component::new("torch", Vec3::X, Vec3::ONE)
                        .sprite(sprite())
                        .light(2, Color::WHITE),
                ),
        );
        let sheet = sheet();
        let camera = camera();
        let ctx = RenderContext {
            scene: &scene,
            camera: &camera,
            sheet: &sheet,
            tiles: None,
        };
        let mut recorder = Recorder::new();
        render_shadows(&ctx, &mut recorder, 0.0);

        let (_, blend, _, vertices) = &recorder.calls[0];
        assert_eq!(*blend, BlendMode::Alpha);
        assert_eq!(vertices.len(), 6, "torch casts no shadow");
        assert_eq!(vertices[0].color, [0.0, 0.0, 0.0, 0.5]);
        for v in vertices {
            assert_eq!(v.position[2], 0.0);
        }
    }

    #[test]
    fn shadow_direction_moves_the_silhouette() {
        let mut scene = Scene::new();
        scene.objects.push(simple_object("post", Vec3::ZERO));
        let sheet = sheet();
        let camera = camera();
        let ctx = RenderContext {
            scene: &scene,
            camera: &camera,
            sheet: &sheet,
            tiles: None,
        };
        let run = |direction: f32| {
            let mut recorder = Recorder::new();
            render_shadows(&ctx, &mut recorder, direction);
            recorder.calls.remove(0).3
        };
        let east = run(0.0);
        let west = run(std::f32::consts::PI);
        assert_ne!(east[1].position, west[1].position);
    }

    #[test]
    fn tiles_fill_the_grid() {
        let mut scene = Scene::new();
        scene.tile_map = Some(TileMap {
            width: 2,
            height: 2,
            tile_size: 1.0,
            origin: Vec2::ZERO,
            cells: (0..4)
                .map(|id| TileCell {
                    id,
                    orientation: TileOrientation::Bottom,
                })
                .collect(),
        });
        let sheet = sheet();
        let tile_sheet = TileSheet::new(
            TextureHandle::WHITE,
            (512, 512),
            256,
            vec![
                Tile { name: "grass".into(), solid: false },
                Tile { name: "dirt".into(), solid: false },
                Tile { name: "stone".into(), solid: false },
                Tile { name: "wall".into(), solid: true },
            ],
        )
        .unwrap();
        let camera = camera();
        let ctx = RenderContext {
            scene: &scene,
            camera: &camera,
            sheet: &sheet,
            tiles: Some(&tile_sheet),
        };
        let mut recorder = Recorder::new();
        render_tiles(&ctx, &mut recorder);

        assert_eq!(recorder.calls.len(), 1);
        let (_, _, space, vertices) = &recorder.calls[0];
        assert_eq!(*space, DrawSpace::World);
        assert_eq!(vertices.len(), 24, "four cells, six vertices each");
        for v in vertices {
            assert_eq!(v.position[2], 0.0, "tiles lie on the ground plane");
        }
    }
}
