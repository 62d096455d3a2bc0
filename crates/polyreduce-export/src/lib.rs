//! polyreduce-export: Pure format serializers (sans-IO)
//!
//! Converts polylines into output formats. Currently supports SVG for
//! visual inspection and JSON point lists that `polyreduce::input` reads
//! back.

pub mod json;
pub mod svg;

pub use json::{ExportError, to_json};
pub use svg::{BoundingBox, SvgMetadata, bounding_box, build_path_data, to_svg};
