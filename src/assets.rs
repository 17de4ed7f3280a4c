//! Sprite art.
//!
//! Three optional PNGs live in the asset directory.  Each one that fails to
//! load is reported and replaced by a procedurally drawn shape; the game
//! always starts.

use std::path::Path;

use image::RgbaImage;

use crate::display::canvas::Rgb;
use crate::entities::SpriteSizes;
use crate::error::AssetError;

/// Pixels with less alpha than this are treated as see-through.
const ALPHA_CUTOFF: u8 = 128;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Avatar,
    DirtyCloud,
    CleanCloud,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 3] = [
        SpriteKind::Avatar,
        SpriteKind::DirtyCloud,
        SpriteKind::CleanCloud,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            SpriteKind::Avatar => "avatar.png",
            SpriteKind::DirtyCloud => "dirty_cloud.png",
            SpriteKind::CleanCloud => "clean_cloud.png",
        }
    }
}

#[derive(Clone, Debug)]
pub enum SpriteArt {
    Bitmap(RgbaImage),
    Fallback,
}

#[derive(Clone, Debug)]
pub struct Assets {
    avatar: SpriteArt,
    dirty_cloud: SpriteArt,
    clean_cloud: SpriteArt,
}

impl Default for Assets {
    fn default() -> Self {
        Self::fallback()
    }
}

impl Assets {
    /// Procedural shapes for everything.
    pub fn fallback() -> Self {
        Self {
            avatar: SpriteArt::Fallback,
            dirty_cloud: SpriteArt::Fallback,
            clean_cloud: SpriteArt::Fallback,
        }
    }

    /// Load every sprite from `dir`, falling back per sprite on failure.
    pub fn load(dir: &Path) -> Self {
        let mut assets = Self::fallback();
        for kind in SpriteKind::ALL {
            let path = dir.join(kind.file_name());
            match load_bitmap(&path) {
                Ok(img) => {
                    log::info!(
                        "loaded {:?} sprite {}x{} from {}",
                        kind,
                        img.width(),
                        img.height(),
                        path.display()
                    );
                    assets.set(kind, SpriteArt::Bitmap(img));
                }
                Err(e) => {
                    log::warn!("{e}");
                    log::warn!(
                        "put the images in '{}' with the expected names; drawing a simple shape for now",
                        dir.display()
                    );
                }
            }
        }
        assets
    }

    pub fn set(&mut self, kind: SpriteKind, art: SpriteArt) {
        match kind {
            SpriteKind::Avatar => self.avatar = art,
            SpriteKind::DirtyCloud => self.dirty_cloud = art,
            SpriteKind::CleanCloud => self.clean_cloud = art,
        }
    }

    pub fn art(&self, kind: SpriteKind) -> &SpriteArt {
        match kind {
            SpriteKind::Avatar => &self.avatar,
            SpriteKind::DirtyCloud => &self.dirty_cloud,
            SpriteKind::CleanCloud => &self.clean_cloud,
        }
    }

    /// Bitmaps are drawn larger than the fallback shapes.
    pub fn sprite_sizes(&self) -> SpriteSizes {
        let pick = |kind: SpriteKind, bitmap: (i32, i32), fallback: (i32, i32)| {
            match self.art(kind) {
                SpriteArt::Bitmap(_) => bitmap,
                SpriteArt::Fallback => fallback,
            }
        };
        SpriteSizes {
            player: pick(
                SpriteKind::Avatar,
                SpriteSizes::BITMAP_PLAYER,
                SpriteSizes::FALLBACK_PLAYER,
            ),
            hazard: pick(
                SpriteKind::DirtyCloud,
                SpriteSizes::BITMAP_HAZARD,
                SpriteSizes::FALLBACK_HAZARD,
            ),
            reward: pick(
                SpriteKind::CleanCloud,
                SpriteSizes::BITMAP_REWARD,
                SpriteSizes::FALLBACK_REWARD,
            ),
        }
    }

    /// Colour of `kind` at normalised sprite coordinates `(u, v)` in
    /// `[0, 1)`, or `None` where the sprite is transparent.
    pub fn sample(&self, kind: SpriteKind, u: f32, v: f32) -> Option<Rgb> {
        match self.art(kind) {
            SpriteArt::Bitmap(img) => sample_bitmap(img, u, v),
            SpriteArt::Fallback => fallback_pixel(kind, u, v),
        }
    }
}

fn load_bitmap(path: &Path) -> Result<RgbaImage, AssetError> {
    let img = image::open(path)
        .map_err(|source| AssetError::Load {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    if img.width() == 0 || img.height() == 0 {
        return Err(AssetError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(img)
}

fn sample_bitmap(img: &RgbaImage, u: f32, v: f32) -> Option<Rgb> {
    let x = ((u * img.width() as f32) as u32).min(img.width() - 1);
    let y = ((v * img.height() as f32) as u32).min(img.height() - 1);
    let [r, g, b, a] = img.get_pixel(x, y).0;
    (a >= ALPHA_CUTOFF).then_some(Rgb::new(r, g, b))
}

/// Procedural stand-ins, drawn in the unit square.
pub fn fallback_pixel(kind: SpriteKind, u: f32, v: f32) -> Option<Rgb> {
    let (du, dv) = (u - 0.5, v - 0.5);
    let inside = |radius: f32| du * du + dv * dv <= radius * radius;
    match kind {
        // White tile with a blue disc.
        SpriteKind::Avatar => Some(if inside(0.4) {
            Rgb::new(0, 150, 255)
        } else {
            Rgb::WHITE
        }),
        SpriteKind::DirtyCloud => inside(0.5).then_some(Rgb::new(50, 50, 50)),
        SpriteKind::CleanCloud => inside(0.4).then_some(Rgb::WHITE),
    }
}
