use std::{collections::HashMap, path::PathBuf, sync::Arc};

use crate::measure::FontMeasure;

/// Font database used to build [`FontMeasure`]s.
///
/// Faces are registered in a `fontdb` database and parsed by `fontdue` the
/// first time a measurer asks for them.
pub struct FontStorage {
    font_db: fontdb::Database,
    /// Parsed faces. Not every face in `font_db` is parsed.
    parsed: HashMap<fontdb::ID, Arc<fontdue::Font>, fxhash::FxBuildHasher>,
}

impl Default for FontStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FontStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self {
            font_db: fontdb::Database::new(),
            parsed: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
        }
    }

    /// Loads a font from binary data.
    pub fn load_font_binary(&mut self, data: impl Into<Vec<u8>>) {
        self.font_db.load_font_data(data.into());
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&mut self, path: PathBuf) -> Result<(), std::io::Error> {
        self.font_db.load_font_file(path)
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&mut self, dir: PathBuf) {
        self.font_db.load_fonts_dir(dir)
    }

    /// Loads the fonts installed on the system.
    pub fn load_system_fonts(&mut self) {
        self.font_db.load_system_fonts();
    }

    /// Removes a face by ID, dropping its parsed font as well.
    pub fn remove_face(&mut self, id: fontdb::ID) {
        self.font_db.remove_face(id);
        self.parsed.remove(&id);
    }

    /// Checks if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.font_db.is_empty()
    }

    /// Returns the number of registered faces.
    pub fn len(&self) -> usize {
        self.font_db.len()
    }

    /// Iterates over the registered faces.
    pub fn faces(&self) -> impl Iterator<Item = &fontdb::FaceInfo> {
        self.font_db.faces()
    }

    /// Finds the best face for `query` and parses it.
    pub fn query(&mut self, query: &fontdb::Query) -> Option<(fontdb::ID, Arc<fontdue::Font>)> {
        let id = self.font_db.query(query)?;
        self.font(id).map(|font| (id, font))
    }

    /// Returns the parsed face, parsing it on first use.
    pub fn font(&mut self, id: fontdb::ID) -> Option<Arc<fontdue::Font>> {
        if let Some(font) = self.parsed.get(&id) {
            return Some(Arc::clone(font));
        }

        let parsed = self.font_db.with_face_data(id, |data, index| {
            fontdue::Font::from_bytes(
                data,
                fontdue::FontSettings {
                    collection_index: index,
                    ..Default::default()
                },
            )
        })?;

        match parsed {
            Ok(font) => {
                let font = Arc::new(font);
                self.parsed.insert(id, Arc::clone(&font));
                Some(font)
            }
            Err(e) => {
                log::error!("Failed to parse font (id: {:?}): {}", id, e);
                None
            }
        }
    }

    /// Measurer for face `id` at `px` pixels.
    pub fn measure(&mut self, id: fontdb::ID, px: f32) -> Option<FontMeasure> {
        self.font(id).map(|font| FontMeasure::new(font, px))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_storage_measures_nothing() {
        let mut storage = FontStorage::new();
        assert!(storage.is_empty());
        let query = fontdb::Query {
            families: &[fontdb::Family::SansSerif],
            ..Default::default()
        };
        assert!(storage.query(&query).is_none());
    }

    #[test]
    fn garbage_binary_is_not_registered() {
        let mut storage = FontStorage::new();
        storage.load_font_binary(vec![0u8; 16]);
        assert_eq!(storage.len(), 0);
    }
}
