//! Encoded texture images handed to the renderer.
//!
//! Hosts fetch the bytes their own way (file system natively, `fetch` in the
//! browser). Any entry may be missing; the renderer substitutes a plain
//! placeholder and keeps going.

use std::path::Path;

use crate::options::SceneOptions;

/// Raw (still encoded) image bytes for every scene texture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureSet {
    /// Scene backdrop.
    pub background: Option<Vec<u8>>,
    /// Avatar cube colour map.
    pub avatar: Option<Vec<u8>>,
    /// Moon colour map.
    pub moon: Option<Vec<u8>>,
    /// Moon normal map.
    pub moon_normal: Option<Vec<u8>>,
}

/// Which scene texture a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSlot {
    /// Scene backdrop.
    Background,
    /// Avatar cube colour map.
    Avatar,
    /// Moon colour map.
    Moon,
    /// Moon normal map.
    MoonNormal,
}

impl TextureSlot {
    /// All slots in load order.
    pub const ALL: [Self; 4] =
        [Self::Background, Self::Avatar, Self::Moon, Self::MoonNormal];

    /// Configured file name for this slot.
    #[must_use]
    pub fn file_name(self, scene: &SceneOptions) -> &str {
        match self {
            Self::Background => &scene.background_texture,
            Self::Avatar => &scene.avatar_texture,
            Self::Moon => &scene.moon_texture,
            Self::MoonNormal => &scene.moon_normal_texture,
        }
    }
}

/// Join a texture file onto a URL prefix. An empty prefix means relative to
/// the page.
#[must_use]
pub fn asset_url(dir: &str, file: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        file.to_owned()
    } else {
        format!("{dir}/{file}")
    }
}

impl TextureSet {
    /// Store `bytes` in `slot`.
    pub fn insert(&mut self, slot: TextureSlot, bytes: Vec<u8>) {
        *self.slot_mut(slot) = Some(bytes);
    }

    /// Bytes for `slot`, if loaded.
    #[must_use]
    pub fn get(&self, slot: TextureSlot) -> Option<&[u8]> {
        match slot {
            TextureSlot::Background => self.background.as_deref(),
            TextureSlot::Avatar => self.avatar.as_deref(),
            TextureSlot::Moon => self.moon.as_deref(),
            TextureSlot::MoonNormal => self.moon_normal.as_deref(),
        }
    }

    fn slot_mut(&mut self, slot: TextureSlot) -> &mut Option<Vec<u8>> {
        match slot {
            TextureSlot::Background => &mut self.background,
            TextureSlot::Avatar => &mut self.avatar,
            TextureSlot::Moon => &mut self.moon,
            TextureSlot::MoonNormal => &mut self.moon_normal,
        }
    }

    /// Read every configured texture from `dir`. Unreadable files are
    /// logged and left empty.
    #[must_use]
    pub fn load_dir(dir: &Path, scene: &SceneOptions) -> Self {
        let mut set = Self::default();
        for slot in TextureSlot::ALL {
            let path = dir.join(slot.file_name(scene));
            match std::fs::read(&path) {
                Ok(bytes) => {
                    log::debug!("loaded {} ({} bytes)", path.display(), bytes.len());
                    set.insert(slot, bytes);
                }
                Err(e) => log::warn!("{}: {e}", path.display()),
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_dir_reads_present_files_and_skips_missing() {
        let dir = std::env::temp_dir()
            .join(format!("stardrift-assets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let scene = SceneOptions::default();
        std::fs::write(dir.join(&scene.moon_texture), b"moon").unwrap();
        std::fs::write(dir.join(&scene.background_texture), b"space").unwrap();

        let set = TextureSet::load_dir(&dir, &scene);
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(set.get(TextureSlot::Moon), Some(&b"moon"[..]));
        assert_eq!(set.get(TextureSlot::Background), Some(&b"space"[..]));
        assert_eq!(set.get(TextureSlot::Avatar), None);
        assert_eq!(set.get(TextureSlot::MoonNormal), None);
    }

    #[test]
    fn slots_use_configured_names() {
        let scene = SceneOptions {
            avatar_texture: "me.png".to_owned(),
            ..SceneOptions::default()
        };
        assert_eq!(TextureSlot::Avatar.file_name(&scene), "me.png");
        assert_eq!(TextureSlot::MoonNormal.file_name(&scene), "normal.jpg");
    }

    #[test]
    fn missing_directory_gives_empty_set() {
        let set = TextureSet::load_dir(
            Path::new("/definitely/not/a/stardrift/dir"),
            &SceneOptions::default(),
        );
        assert_eq!(set, TextureSet::default());
    }

    #[test]
    fn asset_urls_join_relative_to_page() {
        assert_eq!(asset_url("assets", "moon.jpg"), "assets/moon.jpg");
        assert_eq!(asset_url("assets/", "moon.jpg"), "assets/moon.jpg");
        assert_eq!(asset_url("", "space.jpg"), "space.jpg");
    }
}
