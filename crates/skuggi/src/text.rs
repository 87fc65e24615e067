//! # Text — Glyph Atlases and Staged Layout
//!
//! Uses [fontdue](https://docs.rs/fontdue) to rasterize TrueType/OpenType
//! fonts into a texture atlas. Each glyph is white pixels with varying alpha
//! (`[255, 255, 255, coverage]`), so the quad shader's `texture × tint`
//! produces colored text with no dedicated text shader.
//!
//! Layout runs as explicit stages, each a plain function over the previous
//! stage's output:
//!
//! 1. **wrap** — break the string into lines at whitespace, honoring an
//!    optional maximum pixel width (a word wider than the limit gets its own
//!    overflowing line rather than breaking mid-word).
//! 2. **measure** — pixel width per line from glyph advances.
//! 3. **align** — per-line X offset for left/center/right alignment.
//! 4. **highlight** — optional background bar behind each line, emitted as
//!    untextured quads before the glyphs so the glyphs paint over them.
//! 5. **emit** — one screen-space quad per visible glyph.
//!
//! Everything is pixel-space ([`DrawSpace::Screen`]); anchor world-attached
//! labels by running the position through
//! [`Camera::world_to_pixel`](crate::camera::Camera::world_to_pixel) first.

use std::fmt;
use std::path::Path;

use crate::math::{Vec2, Vec3};
use crate::render::projector::push_quad;
use crate::render::texture::{TextureHandle, TextureStore};
use crate::render::{BlendMode, Color, DrawSpace, GpuContext, Renderer};
use crate::render::pipeline::QuadPipelines;

const ATLAS_SIZE: u32 = 512;
const GLYPH_PADDING: u32 = 1;
const FIRST_CHAR: u32 = 32;
const LAST_CHAR: u32 = 126;

/// Errors raised when loading a font.
#[derive(Debug)]
pub enum FontError {
    Io(std::io::Error),
    /// fontdue reports parse failures as static strings.
    Parse(&'static str),
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::Io(e) => write!(f, "failed to read font: {e}"),
            FontError::Parse(e) => write!(f, "failed to parse font: {e}"),
        }
    }
}

impl std::error::Error for FontError {}

/// Per-glyph metrics and UV coordinates in the atlas.
#[derive(Debug, Clone, Copy)]
struct Glyph {
    u_min: f32,
    v_min: f32,
    u_max: f32,
    v_max: f32,
    /// Horizontal advance to the next glyph, in pixels.
    advance: f32,
    /// Cursor to glyph left edge.
    offset_x: f32,
    /// Baseline to glyph bottom (fontdue's `ymin`, Y-up).
    offset_y: f32,
    width: f32,
    height: f32,
}

/// A rasterized font: glyph atlas texture plus per-glyph metrics for
/// ASCII 32–126.
pub struct Font {
    glyphs: Vec<Option<Glyph>>,
    atlas: TextureHandle,
    line_height: f32,
    ascent: f32,
}

impl Font {
    /// Load a TTF/OTF from disk, rasterize ASCII 32–126 at `size` pixels,
    /// and upload the packed atlas.
    pub fn load(
        gpu: &GpuContext,
        pipelines: &QuadPipelines,
        textures: &mut TextureStore,
        path: impl AsRef<Path>,
        size: f32,
    ) -> Result<Self, FontError> {
        let data = std::fs::read(path.as_ref()).map_err(FontError::Io)?;
        let font = fontdue::Font::from_bytes(
            data,
            fontdue::FontSettings {
                scale: size,
                ..Default::default()
            },
        )
        .map_err(FontError::Parse)?;

        let mut atlas_rgba = vec![0u8; (ATLAS_SIZE * ATLAS_SIZE * 4) as usize];
        let mut cursor_x = GLYPH_PADDING;
        let mut cursor_y = GLYPH_PADDING;
        let mut row_height = 0u32;
        let mut glyphs = Vec::with_capacity((LAST_CHAR - FIRST_CHAR + 1) as usize);

        for code in FIRST_CHAR..=LAST_CHAR {
            let ch = char::from_u32(code).unwrap_or(' ');
            let (metrics, bitmap) = font.rasterize(ch, size);
            let gw = metrics.width as u32;
            let gh = metrics.height as u32;

            // Space and other mark-free glyphs still advance the cursor.
            if gw == 0 || gh == 0 {
                glyphs.push(Some(Glyph {
                    u_min: 0.0,
                    v_min: 0.0,
                    u_max: 0.0,
                    v_max: 0.0,
                    advance: metrics.advance_width,
                    offset_x: 0.0,
                    offset_y: 0.0,
                    width: 0.0,
                    height: 0.0,
                }));
                continue;
            }

            if cursor_x + gw + GLYPH_PADDING > ATLAS_SIZE {
                cursor_x = GLYPH_PADDING;
                cursor_y += row_height + GLYPH_PADDING;
                row_height = 0;
            }
            if cursor_y + gh + GLYPH_PADDING > ATLAS_SIZE {
                log::warn!("font atlas overflow at '{ch}' (U+{code:04X})");
                glyphs.push(None);
                continue;
            }

            for gy in 0..gh {
                for gx in 0..gw {
                    let alpha = bitmap[(gy * gw + gx) as usize];
                    let dst = (((cursor_y + gy) * ATLAS_SIZE + cursor_x + gx) * 4) as usize;
                    atlas_rgba[dst..dst + 4].copy_from_slice(&[255, 255, 255, alpha]);
                }
            }

            glyphs.push(Some(Glyph {
                u_min: cursor_x as f32 / ATLAS_SIZE as f32,
                v_min: cursor_y as f32 / ATLAS_SIZE as f32,
                u_max: (cursor_x + gw) as f32 / ATLAS_SIZE as f32,
                v_max: (cursor_y + gh) as f32 / ATLAS_SIZE as f32,
                advance: metrics.advance_width,
                offset_x: metrics.xmin as f32,
                offset_y: metrics.ymin as f32,
                width: gw as f32,
                height: gh as f32,
            }));

            cursor_x += gw + GLYPH_PADDING;
            row_height = row_height.max(gh);
        }

        let atlas = textures.from_rgba(
            gpu,
            pipelines,
            "font atlas",
            ATLAS_SIZE,
            ATLAS_SIZE,
            &atlas_rgba,
        );

        Ok(Self {
            glyphs,
            atlas,
            line_height: size * 1.2,
            ascent: size,
        })
    }

    fn glyph(&self, ch: char) -> Option<&Glyph> {
        let code = ch as u32;
        if !(FIRST_CHAR..=LAST_CHAR).contains(&code) {
            return None;
        }
        self.glyphs[(code - FIRST_CHAR) as usize].as_ref()
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Pixel width of a single line (no wrapping).
    pub fn line_width(&self, line: &str) -> f32 {
        line.chars()
            .filter_map(|ch| self.glyph(ch))
            .map(|g| g.advance)
            .sum()
    }
}

/// Horizontal alignment of wrapped lines within the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Everything [`draw_text`] needs besides the string's font.
#[derive(Debug, Clone)]
pub struct TextParams<'a> {
    pub text: &'a str,
    /// Pixel-space top-left anchor of the block.
    pub position: Vec2,
    /// Wrap limit in pixels; `None` only breaks at explicit newlines.
    pub max_width: Option<f32>,
    pub align: TextAlign,
    pub color: Color,
    /// Background bar drawn behind each line.
    pub highlight: Option<Color>,
}

impl<'a> TextParams<'a> {
    pub fn new(text: &'a str, position: Vec2) -> Self {
        Self {
            text,
            position,
            max_width: None,
            align: TextAlign::Left,
            color: Color::WHITE,
            highlight: None,
        }
    }
}

/// Stage 1: break into lines at whitespace. Explicit newlines always break;
/// `max_width` adds soft breaks between words. A single word wider than the
/// limit overflows on its own line.
pub fn wrap_lines(font: &Font, text: &str, max_width: Option<f32>) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in text.split('\n') {
        let Some(limit) = max_width else {
            lines.push(raw.to_owned());
            continue;
        };
        let mut current = String::new();
        for word in raw.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_owned()
            } else {
                format!("{current} {word}")
            };
            if font.line_width(&candidate) <= limit || current.is_empty() {
                current = candidate;
            } else {
                lines.push(current);
                current = word.to_owned();
            }
        }
        lines.push(current);
    }
    lines
}

/// Stages 1+2: wrapped block extents (widest line, total height).
pub fn measure(font: &Font, text: &str, max_width: Option<f32>) -> Vec2 {
    let lines = wrap_lines(font, text, max_width);
    let width = lines
        .iter()
        .map(|l| font.line_width(l))
        .fold(0.0f32, f32::max);
    Vec2::new(width, lines.len() as f32 * font.line_height)
}

/// Stage 3: X offset of one line within the block.
fn aligned_x(align: TextAlign, block_width: f32, line_width: f32) -> f32 {
    match align {
        TextAlign::Left => 0.0,
        TextAlign::Center => (block_width - line_width) * 0.5,
        TextAlign::Right => block_width - line_width,
    }
}

/// Run all stages and submit the block: highlight bars first (if any), then
/// one quad per visible glyph. Both in screen space, alpha-blended.
pub fn draw_text(renderer: &mut impl Renderer, font: &Font, params: &TextParams<'_>) {
    let lines = wrap_lines(font, params.text, params.max_width);
    let widths: Vec<f32> = lines.iter().map(|l| font.line_width(l)).collect();
    let block_width = params
        .max_width
        .unwrap_or_else(|| widths.iter().copied().fold(0.0, f32::max));

    // Stage 4: highlight bars, one flat quad per non-empty line.
    if let Some(highlight) = params.highlight {
        let mut bars = Vec::new();
        for (i, width) in widths.iter().enumerate() {
            if *width <= 0.0 {
                continue;
            }
            let x0 = params.position.x + aligned_x(params.align, block_width, *width);
            let y0 = params.position.y + i as f32 * font.line_height;
            push_rect(&mut bars, x0, y0, *width, font.line_height, highlight);
        }
        if !bars.is_empty() {
            renderer.submit(TextureHandle::WHITE, BlendMode::Alpha, DrawSpace::Screen, &bars);
        }
    }

    // Stage 5: glyph quads.
    let mut vertices = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let mut pen_x = params.position.x + aligned_x(params.align, block_width, widths[i]);
        let baseline = params.position.y + i as f32 * font.line_height + font.ascent;
        for ch in line.chars() {
            let Some(glyph) = font.glyph(ch) else {
                continue;
            };
            if glyph.width > 0.0 {
                // Screen Y grows downward; fontdue's offsets are Y-up around
                // the baseline.
                let x0 = pen_x + glyph.offset_x;
                let y1 = baseline - glyph.offset_y;
                let y0 = y1 - glyph.height;
                let corners = [
                    Vec3::new(x0, y1, 0.0),
                    Vec3::new(x0, y0, 0.0),
                    Vec3::new(x0 + glyph.width, y1, 0.0),
                    Vec3::new(x0 + glyph.width, y0, 0.0),
                ];
                let uvs = [
                    Vec2::new(glyph.u_min, glyph.v_max),
                    Vec2::new(glyph.u_min, glyph.v_min),
                    Vec2::new(glyph.u_max, glyph.v_max),
                    Vec2::new(glyph.u_max, glyph.v_min),
                ];
                push_quad(&mut vertices, corners, uvs, params.color);
            }
            pen_x += glyph.advance;
        }
    }
    if !vertices.is_empty() {
        renderer.submit(font.atlas, BlendMode::Alpha, DrawSpace::Screen, &vertices);
    }
}

fn push_rect(
    out: &mut Vec<crate::render::QuadVertex>,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    color: Color,
) {
    let corners = [
        Vec3::new(x, y + height, 0.0),
        Vec3::new(x, y, 0.0),
        Vec3::new(x + width, y + height, 0.0),
        Vec3::new(x + width, y, 0.0),
    ];
    let uvs = [Vec2::ZERO, Vec2::ZERO, Vec2::ZERO, Vec2::ZERO];
    push_quad(out, corners, uvs, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::QuadVertex;

    /// A font with uniform 10px-advance, 8px-tall glyphs; no GPU needed.
    fn fixed_font() -> Font {
        let glyphs = (FIRST_CHAR..=LAST_CHAR)
            .map(|code| {
                let blank = code == FIRST_CHAR; // space
                Some(Glyph {
                    u_min: 0.0,
                    v_min: 0.0,
                    u_max: 0.1,
                    v_max: 0.1,
                    advance: 10.0,
                    offset_x: 1.0,
                    offset_y: 0.0,
                    width: if blank { 0.0 } else { 8.0 },
                    height: if blank { 0.0 } else { 8.0 },
                })
            })
            .collect();
        Font {
            glyphs,
            atlas: TextureHandle(1),
            line_height: 12.0,
            ascent: 10.0,
        }
    }

    struct Recorder {
        calls: Vec<(TextureHandle, BlendMode, DrawSpace, Vec<QuadVertex>)>,
    }

    impl Renderer for Recorder {
        fn submit(
            &mut self,
            texture: TextureHandle,
            blend: BlendMode,
            space: DrawSpace,
            vertices: &[QuadVertex],
        ) {
            self.calls.push((texture, blend, space, vertices.to_vec()));
        }
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let font = fixed_font();
        // 10px per char: "hello world" = 110px, limit 60px fits "hello".
        let lines = wrap_lines(&font, "hello world", Some(60.0));
        assert_eq!(lines, vec!["hello", "world"]);
    }

    #[test]
    fn overlong_word_overflows_alone() {
        let font = fixed_font();
        let lines = wrap_lines(&font, "hi supercalifragilistic hi", Some(50.0));
        assert_eq!(lines[0], "hi");
        assert_eq!(lines[1], "supercalifragilistic");
        assert_eq!(lines[2], "hi");
    }

    #[test]
    fn explicit_newlines_always_break() {
        let font = fixed_font();
        let lines = wrap_lines(&font, "a\nb", None);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn measure_spans_widest_line() {
        let font = fixed_font();
        let size = measure(&font, "hi\nhello", None);
        assert_eq!(size, Vec2::new(50.0, 24.0));
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(aligned_x(TextAlign::Left, 100.0, 40.0), 0.0);
        assert_eq!(aligned_x(TextAlign::Center, 100.0, 40.0), 30.0);
        assert_eq!(aligned_x(TextAlign::Right, 100.0, 40.0), 60.0);
    }

    #[test]
    fn draw_submits_glyphs_in_screen_space() {
        let font = fixed_font();
        let mut recorder = Recorder { calls: Vec::new() };
        draw_text(
            &mut recorder,
            &font,
            &TextParams::new("ab", Vec2::new(5.0, 7.0)),
        );
        assert_eq!(recorder.calls.len(), 1);
        let (texture, blend, space, vertices) = &recorder.calls[0];
        assert_eq!(*texture, font.atlas);
        assert_eq!(*blend, BlendMode::Alpha);
        assert_eq!(*space, DrawSpace::Screen);
        assert_eq!(vertices.len(), 12, "two glyphs, six vertices each");
        // Second glyph starts one advance to the right.
        assert!((vertices[6].position[0] - vertices[0].position[0] - 10.0).abs() < 1e-5);
    }

    #[test]
    fn spaces_advance_without_geometry() {
        let font = fixed_font();
        let mut recorder = Recorder { calls: Vec::new() };
        draw_text(
            &mut recorder,
            &font,
            &TextParams::new("a b", Vec2::ZERO),
        );
        let (.., vertices) = &recorder.calls[0];
        assert_eq!(vertices.len(), 12, "the space emits no quad");
        // 'b' lands two advances out.
        assert!((vertices[6].position[0] - vertices[0].position[0] - 20.0).abs() < 1e-5);
    }

    #[test]
    fn highlight_bars_precede_glyphs() {
        let font = fixed_font();
        let mut recorder = Recorder { calls: Vec::new() };
        let mut params = TextParams::new("hi", Vec2::ZERO);
        params.highlight = Some(Color::rgba(0.0, 0.0, 0.0, 0.6));
        draw_text(&mut recorder, &font, &params);

        assert_eq!(recorder.calls.len(), 2);
        assert_eq!(recorder.calls[0].0, TextureHandle::WHITE);
        assert_eq!(recorder.calls[1].0, font.atlas);
        let bar = &recorder.calls[0].3;
        assert_eq!(bar.len(), 6);
        // Bar spans the line's width and height.
        assert!((bar[2].position[0] - 20.0).abs() < 1e-5);
        assert!((bar[0].position[1] - 12.0).abs() < 1e-5);
    }
}
