//! Rendering module for converting pages to various output formats.

mod html;
mod json;
mod latex;
mod options;
mod stats;
mod text;

pub use html::{escape_html, to_html, HtmlRenderer};
pub use json::{from_json, to_json, JsonFormat};
pub use latex::{escape_latex, to_latex, ImageAsset, LatexOutput, LatexRenderer, STRUCTURE};
pub use options::RenderOptions;
pub use stats::DocumentStats;
pub use text::to_text;
