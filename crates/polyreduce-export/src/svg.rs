//! SVG export serializer.
//!
//! Converts polylines into an SVG string with `<path>` elements using
//! the [`svg`] crate for document construction, XML escaping, and path
//! data formatting.
//!
//! Each polyline becomes a separate `<path>` element using `M` (move to)
//! and `L` (line to) commands. The `viewBox` is fitted to the bounding box
//! of all points, so input in any coordinate units renders at a sensible
//! size. Coordinates are emitted as-is (SVG's y axis points down).
//!
//! Optional [`SvgMetadata`] embeds `<title>`, `<desc>`, and `<metadata>`
//! elements so exported files carry the parameters that produced them.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Description, Element, Path, Title};
use svg::node::{Node, Text, Value};

use polyreduce::Polyline;

/// Padding around the bounding box, as a fraction of its larger side.
const MARGIN_FRACTION: f64 = 0.025;

/// Smallest `viewBox` side, so a single point or a flat line stays visible.
const MIN_EXTENT: f64 = 1.0;

/// Metadata to embed in the SVG document.
///
/// All fields are optional. Text values are XML-escaped automatically by
/// the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title, emitted as `<title>`.
    ///
    /// Typically the input file name (without extension).
    pub title: Option<&'a str>,

    /// Document description, emitted as `<desc>`.
    pub description: Option<&'a str>,

    /// Serialized [`SimplifyConfig`](polyreduce::SimplifyConfig), emitted
    /// inside `<metadata>` wrapped in a namespaced `<polyreduce:config>`
    /// element, so exported files can be reproduced.
    pub config_json: Option<&'a str>,
}

/// Axis-aligned bounds of a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Smallest x.
    pub min_x: f64,
    /// Smallest y.
    pub min_y: f64,
    /// Largest x.
    pub max_x: f64,
    /// Largest y.
    pub max_y: f64,
}

impl BoundingBox {
    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Bounding box of every point in `polylines`, or `None` if there are no
/// points.
#[must_use]
pub fn bounding_box(polylines: &[Polyline]) -> Option<BoundingBox> {
    polylines
        .iter()
        .flat_map(Polyline::points)
        .fold(None, |acc, p| {
            Some(acc.map_or(
                BoundingBox {
                    min_x: p.x,
                    min_y: p.y,
                    max_x: p.x,
                    max_y: p.y,
                },
                |b: BoundingBox| BoundingBox {
                    min_x: b.min_x.min(p.x),
                    min_y: b.min_y.min(p.y),
                    max_x: b.max_x.max(p.x),
                    max_y: b.max_y.max(p.y),
                },
            ))
        })
}

/// Build an SVG path `d` attribute string from a polyline.
///
/// Uses `M` for the first point and `L` for subsequent points.
/// Returns an empty string for polylines with fewer than 2 points.
///
/// Coordinates are formatted by the [`svg`] crate using `f32` precision.
///
/// # Examples
///
/// ```
/// use polyreduce::{Point, Polyline};
/// use polyreduce_export::build_path_data;
///
/// let polyline = Polyline::new(vec![
///     Point::new(10.0, 20.0),
///     Point::new(30.0, 40.0),
/// ]);
/// let d = build_path_data(&polyline);
/// assert_eq!(d, "M10,20 L30,40");
/// ```
#[must_use]
pub fn build_path_data(polyline: &Polyline) -> String {
    let points = polyline.points();
    if points.len() < 2 {
        return String::new();
    }

    let first = &points[0];
    let mut data = Data::new().move_to((first.x, first.y));
    for p in &points[1..] {
        data = data.line_to((p.x, p.y));
    }
    String::from(Value::from(data))
}

/// `(x, y, width, height)` of the padded `viewBox` for `polylines`.
fn view_box(polylines: &[Polyline]) -> (f64, f64, f64, f64) {
    let Some(bounds) = bounding_box(polylines) else {
        return (0.0, 0.0, MIN_EXTENT, MIN_EXTENT);
    };
    let margin = bounds.width().max(bounds.height()) * MARGIN_FRACTION;
    let width = 2.0f64.mul_add(margin, bounds.width()).max(MIN_EXTENT);
    let height = 2.0f64.mul_add(margin, bounds.height()).max(MIN_EXTENT);
    // Centre the content when the minimum extent kicks in.
    let x = bounds.min_x - (width - bounds.width()) / 2.0;
    let y = bounds.min_y - (height - bounds.height()) / 2.0;
    (x, y, width, height)
}

/// Serialize polylines to an SVG document.
///
/// One `<path>` per polyline; polylines with fewer than 2 points are
/// skipped. Strokes use `vector-effect="non-scaling-stroke"` so they stay
/// one unit wide whatever the coordinate scale.
#[must_use]
pub fn to_svg(polylines: &[Polyline], metadata: &SvgMetadata<'_>) -> String {
    let (x, y, width, height) = view_box(polylines);
    let mut doc = Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (x, y, width, height));

    // Optional <title> element
    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }

    // Optional <desc> element
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    // Optional <metadata> element with the simplification config
    if let Some(config_json) = metadata.config_json {
        let mut config_el = Element::new("polyreduce:config");
        config_el.assign("xmlns:polyreduce", "https://polyreduce.dev/ns/1");
        config_el.append(Text::new(config_json));
        let mut metadata_el = Element::new("metadata");
        metadata_el.append(config_el);
        doc = doc.add(metadata_el);
    }

    for polyline in polylines {
        let d = build_path_data(polyline);
        if d.is_empty() {
            continue;
        }

        let path = Path::new()
            .set("d", d)
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", 1)
            .set("vector-effect", "non-scaling-stroke");
        doc = doc.add(path);
    }

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}
