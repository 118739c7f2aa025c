//! Window icon loading.

use std::path::Path;

/// Decoded RGBA icon.
#[derive(Clone, Debug)]
pub struct WindowIcon {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Largest icon edge handed to the window system.
const MAX_ICON_SIZE: u32 = 256;

/// Load the first decodable icon among `names` in `dir`.
///
/// A missing or broken icon is not an error; the window just keeps the
/// platform default.
pub fn load_icon(dir: &Path, names: &[String]) -> Option<WindowIcon> {
    for name in names {
        let path = dir.join(name);
        if !path.is_file() {
            continue;
        }

        match image::open(&path) {
            Ok(image) => {
                let image = if image.width() > MAX_ICON_SIZE || image.height() > MAX_ICON_SIZE {
                    image.thumbnail(MAX_ICON_SIZE, MAX_ICON_SIZE)
                } else {
                    image
                };
                let rgba = image.into_rgba8();
                let (width, height) = rgba.dimensions();

                return Some(WindowIcon {
                    rgba: rgba.into_raw(),
                    width,
                    height,
                });
            }
            Err(err) => tracing::debug!("Ignoring icon {}: {}", path.display(), err),
        }
    }

    None
}
