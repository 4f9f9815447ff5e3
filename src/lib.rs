//! # Fukidashi
//!
//! Stepped, rounded speech-bubble backgrounds for multi-line text.
//!
//! ## Overview
//!
//! Every visual line gets its own rounded rectangle sized to the text plus
//! padding. Where two lines have nearly the same width the narrower one is
//! snapped or the wider one is pushed out, so that the joins between lines are
//! either perfectly flush or wide enough for a rounded step. Small join shapes
//! then blend each rectangle into the one above, giving one continuous bubble.
//!
//! The core is the [`renderer`] module; [`BackgroundSystem`] wraps it together
//! with font loading for hosts that share it across threads.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fukidashi::{
//!     BackgroundSystem,
//!     measure::FixedAdvance,
//!     style::{Alignment, StyleConfig},
//!     surface::RecordingSurface,
//!     text::Line,
//! };
//!
//! let system = BackgroundSystem::new();
//! system.set_fill_style(StyleConfig::default().with_alignment(Alignment::Center));
//!
//! let text = "first line\nsecond";
//! let lines = [
//!     Line::new(text, 0).with_range(0, 10).with_vertical(0.0, 16.0, 20.0).with_right(200.0),
//!     Line::new(text, 1).with_range(11, 17).with_vertical(20.0, 36.0, 40.0).with_right(200.0),
//! ];
//!
//! let mut surface = RecordingSurface::new();
//! let report = system.render_pass(&mut surface, &lines, &FixedAdvance(8.0));
//! assert!(report.is_complete());
//! ```
//!
//! ## Features
//!
//! *   **Pluggable targets**: draw into any [`surface::Surface`], record a
//!     display list, or rasterize on the CPU.
//! *   **Two styles**: a filled bubble and a bordered variant with an inner
//!     cutout.
//! *   **Font measurement**: `fontdb` + `fontdue` backed widths, or any closure.
//! *   **Thread Safety**: [`BackgroundSystem`] locks internally.

pub mod background_system;
pub mod error;
pub mod font_storage;
pub mod geometry;
pub mod measure;
pub mod renderer;
pub mod stepper;
pub mod style;
pub mod surface;
pub mod text;

// common re-exports
pub use background_system::{BackgroundStyle, BackgroundSystem};
pub use error::RenderError;
pub use font_storage::FontStorage;
pub use renderer::{LineBackground, OutlineRenderer, PassReport, RenderState, StepRenderer};
pub use style::{Alignment, OutlineStyle, StyleConfig};

// re-export dependencies
pub use euclid;
pub use fontdb;
pub use fontdue;
pub use parking_lot;
