/// Per-line input records handed to the renderer.
pub mod line;
/// Hard-break and greedy word-wrap line builder for hosts without their own.
pub mod paragraph;

pub use line::Line;
pub use paragraph::{LineMetrics, Paragraph, ParagraphConfig};
