use std::{path::PathBuf, sync::Arc};

use parking_lot::Mutex;

use crate::{
    error::RenderError,
    font_storage::FontStorage,
    geometry::ResolvedRect,
    measure::{FontMeasure, TextMeasure},
    renderer::{LineBackground, OutlineRenderer, PassReport, RenderState, StepRenderer},
    style::{OutlineStyle, StyleConfig},
    surface::Surface,
    text::Line,
};

/// The background variant a [`BackgroundSystem`] paints with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BackgroundStyle {
    Fill(StepRenderer),
    Outline(OutlineRenderer),
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        BackgroundStyle::Fill(StepRenderer::default())
    }
}

impl From<StyleConfig> for BackgroundStyle {
    fn from(style: StyleConfig) -> Self {
        BackgroundStyle::Fill(StepRenderer::new(style))
    }
}

impl From<OutlineStyle> for BackgroundStyle {
    fn from(style: OutlineStyle) -> Self {
        BackgroundStyle::Outline(OutlineRenderer::new(style))
    }
}

impl LineBackground for BackgroundStyle {
    fn render_line(
        &self,
        surface: &mut dyn Surface,
        line: &Line<'_>,
        measure: &dyn TextMeasure,
        state: &mut RenderState,
    ) -> Result<ResolvedRect, RenderError> {
        match self {
            BackgroundStyle::Fill(renderer) => renderer.render_line(surface, line, measure, state),
            BackgroundStyle::Outline(renderer) => {
                renderer.render_line(surface, line, measure, state)
            }
        }
    }

    fn render_pass(
        &self,
        surface: &mut dyn Surface,
        lines: &[Line<'_>],
        measure: &dyn TextMeasure,
    ) -> PassReport {
        match self {
            BackgroundStyle::Fill(renderer) => renderer.render_pass(surface, lines, measure),
            BackgroundStyle::Outline(renderer) => renderer.render_pass(surface, lines, measure),
        }
    }
}

/// Active style and the state carried between its lines.
#[derive(Debug, Default)]
pub struct BackgroundState {
    pub style: BackgroundStyle,
    pub render_state: RenderState,
    /// Bumped every time the text changes.
    pub generation: u64,
}

/// High-level entry point for hosts that draw backgrounds behind a text view.
///
/// Couples a [`FontStorage`] with the active background style and its
/// [`RenderState`]. A text view calls [`text_changed`](Self::text_changed)
/// from its change listener and [`render_line`](Self::render_line) for every
/// visible line while drawing; both go through the same lock, so a reset
/// never lands halfway through a line.
///
/// The fields are public so hosts can hold a lock across several calls.
pub struct BackgroundSystem {
    pub font_storage: Mutex<FontStorage>,
    pub background: Mutex<BackgroundState>,
}

impl Default for BackgroundSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundSystem {
    /// Creates a system with empty font storage and the default fill style.
    pub fn new() -> Self {
        Self::with_style(BackgroundStyle::default())
    }

    /// Creates a system with empty font storage and the given style.
    pub fn with_style(style: impl Into<BackgroundStyle>) -> Self {
        Self {
            font_storage: Mutex::new(FontStorage::new()),
            background: Mutex::new(BackgroundState {
                style: style.into(),
                ..Default::default()
            }),
        }
    }
}

/// font storage
impl BackgroundSystem {
    /// Loads the system fonts into the storage.
    pub fn load_system_fonts(&self) {
        self.font_storage.lock().load_system_fonts();
    }

    /// Loads a font from binary data.
    pub fn load_font_binary(&self, data: impl Into<Vec<u8>>) {
        self.font_storage.lock().load_font_binary(data);
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&self, path: PathBuf) -> Result<(), std::io::Error> {
        self.font_storage.lock().load_font_file(path)
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&self, dir: PathBuf) {
        self.font_storage.lock().load_fonts_dir(dir)
    }

    /// Removes a face by ID.
    pub fn remove_face(&self, id: fontdb::ID) {
        self.font_storage.lock().remove_face(id);
    }

    /// Checks if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.font_storage.lock().is_empty()
    }

    /// Returns the number of loaded faces.
    pub fn len(&self) -> usize {
        self.font_storage.lock().len()
    }

    /// Returns a vec over all available faces.
    ///
    /// # Performance
    /// This clones every face info to avoid holding the storage lock.
    /// Lock `font_storage` directly to iterate without allocating.
    pub fn faces(&self) -> Vec<fontdb::FaceInfo> {
        self.font_storage.lock().faces().cloned().collect()
    }

    /// Queries for a font matching the description.
    pub fn query(&self, query: &fontdb::Query) -> Option<(fontdb::ID, Arc<fontdue::Font>)> {
        self.font_storage.lock().query(query)
    }

    /// Retrieves a loaded face by ID, parsing it on first use.
    pub fn font(&self, id: fontdb::ID) -> Option<Arc<fontdue::Font>> {
        self.font_storage.lock().font(id)
    }

    /// Measurer for face `id` at `px` pixels.
    pub fn font_measure(&self, id: fontdb::ID, px: f32) -> Option<FontMeasure> {
        self.font_storage.lock().measure(id, px)
    }
}

/// background style
impl BackgroundSystem {
    /// Returns a copy of the active style.
    pub fn style(&self) -> BackgroundStyle {
        self.background.lock().style
    }

    /// Switches to the filled style. The next line starts a new shape.
    pub fn set_fill_style(&self, style: StyleConfig) {
        self.set_style(style);
    }

    /// Switches to the bordered style. The next line starts a new shape.
    pub fn set_outline_style(&self, style: OutlineStyle) {
        self.set_style(style);
    }

    /// Switches to any style. The next line starts a new shape.
    pub fn set_style(&self, style: impl Into<BackgroundStyle>) {
        let mut background = self.background.lock();
        background.style = style.into();
        background.render_state.reset();
    }

    /// Forgets the carried line geometry and returns the new generation.
    ///
    /// Call this whenever the text (or anything that moves its lines)
    /// changes, before the next draw.
    pub fn text_changed(&self) -> u64 {
        let mut background = self.background.lock();
        background.render_state.reset();
        background.generation = background.generation.wrapping_add(1);
        log::debug!("text changed; background generation {}", background.generation);
        background.generation
    }

    /// Number of text changes seen so far.
    pub fn generation(&self) -> u64 {
        self.background.lock().generation
    }
}

/// rendering
impl BackgroundSystem {
    /// Paints one line with the active style, carrying state to the next call.
    pub fn render_line(
        &self,
        surface: &mut dyn Surface,
        line: &Line<'_>,
        measure: &dyn TextMeasure,
    ) -> Result<ResolvedRect, RenderError> {
        let mut background = self.background.lock();
        let BackgroundState {
            style,
            render_state,
            ..
        } = &mut *background;
        style.render_line(surface, line, measure, render_state)
    }

    /// Paints a whole block of lines from a fresh state.
    ///
    /// The lock is held for the whole pass, so a concurrent
    /// [`text_changed`](Self::text_changed) waits until every line is painted.
    pub fn render_pass(
        &self,
        surface: &mut dyn Surface,
        lines: &[Line<'_>],
        measure: &dyn TextMeasure,
    ) -> PassReport {
        let mut background = self.background.lock();
        let report = background.style.render_pass(surface, lines, measure);
        background.render_state.reset();
        report
    }
}
