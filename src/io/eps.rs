//! Encapsulated PostScript rendering.
//!
//! The mesh's physical bounding box `[xmin, xmax] x [ymin, ymax]` is mapped
//! onto a canvas whose larger side is `D` ([`RenderOptions::max_dimension`]).
//! With `w`, `h` the physical extents, `d = max(w, h)` and margin fraction `p`,
//! the image area is scaled by `s` and surrounded by margins of `p*s*w`
//! left and right (`p*s*h` top and bottom), so that `W = (1+2p)*s*w` and
//! `H = (1+2p)*s*h`. Requiring `max(W, H) = D` gives
//!
//! ```text
//! s = D / ((1+2p) * d)      W = D/d * w      H = D/d * h
//! X = p*s*w + s*(x - xmin)  Y = p*s*h + s*(y - ymin)
//! ```
//!
//! Every element is emitted as a filled triangle, then every edge as a
//! stroked segment, so edges stay visible on top of the fills.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::Mesh;

/// An RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
}

impl Rgb {
    /// Yellow, the default element fill.
    pub const YELLOW: Rgb = Rgb::new(1.0, 1.0, 0.0);
    /// Black, the default edge stroke.
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    /// Create a color.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    fn is_gray(&self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

/// Options for EPS rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Larger of the canvas width and height (default: 400).
    pub max_dimension: f64,

    /// Margin as a fraction of the scaled extent, per side (default: 0.01).
    pub margin_fraction: f64,

    /// Element fill color (default: yellow).
    pub fill: Rgb,

    /// Edge stroke color (default: black).
    pub stroke: Rgb,

    /// Decimal places written for coordinates (default: 4).
    pub precision: usize,

    /// Document title. [`save`] falls back to the file path.
    pub title: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_dimension: 400.0,
            margin_fraction: 0.01,
            fill: Rgb::YELLOW,
            stroke: Rgb::BLACK,
            precision: 4,
            title: None,
        }
    }
}

impl RenderOptions {
    /// Set the canvas size cap.
    pub fn with_max_dimension(mut self, max_dimension: f64) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Set the relative margin.
    pub fn with_margin_fraction(mut self, margin_fraction: f64) -> Self {
        self.margin_fraction = margin_fraction;
        self
    }

    /// Set the fill and stroke colors.
    pub fn with_colors(mut self, fill: Rgb, stroke: Rgb) -> Self {
        self.fill = fill;
        self.stroke = stroke;
        self
    }

    /// Set the number of decimal places written for coordinates.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Reject a non-positive canvas or a negative margin.
    pub fn validate(&self) -> Result<()> {
        if !self.max_dimension.is_finite() || self.max_dimension <= 0.0 {
            return Err(MeshError::invalid_param(
                "max_dimension",
                self.max_dimension,
                "must be finite and positive",
            ));
        }
        if !self.margin_fraction.is_finite() || self.margin_fraction < 0.0 {
            return Err(MeshError::invalid_param(
                "margin_fraction",
                self.margin_fraction,
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Physical-to-canvas mapping for one mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    xmin: f64,
    ymin: f64,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    width: f64,
    height: f64,
}

impl CanvasTransform {
    /// Fit the bounding box of `mesh` onto the canvas.
    ///
    /// # Errors
    ///
    /// [`MeshError::DegenerateGeometry`] if the mesh has no nodes or all nodes
    /// coincide.
    pub fn fit(mesh: &Mesh, options: &RenderOptions) -> Result<Self> {
        let (min, max) = mesh.bounding_box().ok_or(MeshError::DegenerateGeometry {
            width: 0.0,
            height: 0.0,
        })?;
        Self::from_bounds([min.x, max.x], [min.y, max.y], options)
    }

    /// Fit the physical box `[x[0], x[1]] x [y[0], y[1]]` onto the canvas.
    pub fn from_bounds(x: [f64; 2], y: [f64; 2], options: &RenderOptions) -> Result<Self> {
        options.validate()?;

        let w = x[1] - x[0];
        let h = y[1] - y[0];
        let d = w.max(h);
        if !(d.is_finite() && d > 0.0) {
            return Err(MeshError::DegenerateGeometry {
                width: w,
                height: h,
            });
        }

        let big_d = options.max_dimension;
        let p = options.margin_fraction;
        let scale = big_d / ((1.0 + 2.0 * p) * d);

        Ok(Self {
            xmin: x[0],
            ymin: y[0],
            scale,
            offset_x: p * scale * w,
            offset_y: p * scale * h,
            width: big_d / d * w,
            height: big_d / d * h,
        })
    }

    /// Map a physical point to canvas coordinates.
    #[inline]
    pub fn map(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.offset_x + self.scale * (x - self.xmin),
            self.offset_y + self.scale * (y - self.ymin),
        )
    }

    /// Physical-to-canvas scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Canvas width (`W`).
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Canvas height (`H`).
    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Write `mesh` as an EPS document to `writer`.
///
/// # Example
/// ```
/// use tessera::domain::Marker;
/// use tessera::io::eps::{self, RenderOptions};
/// use tessera::mesh::{assemble, AssembleOptions};
/// use tessera::triangulate::RawTriangulation;
///
/// let raw = RawTriangulation {
///     points: vec![[0.0, 0.0], [2.0, 0.0], [0.0, 1.0]],
///     point_markers: vec![Marker(2); 3],
///     triangles: vec![[0, 1, 2]],
///     edges: vec![[0, 1], [1, 2], [2, 0]],
///     edge_markers: vec![Marker(2); 3],
/// };
/// let mesh = assemble(&raw, &AssembleOptions::default()).unwrap();
///
/// let mut out = Vec::new();
/// eps::write(&mesh, &mut out, &RenderOptions::default()).unwrap();
/// let doc = String::from_utf8(out).unwrap();
/// assert!(doc.contains("%%BoundingBox: 0 0 400 200\n"));
/// ```
pub fn write<W: Write>(mesh: &Mesh, writer: W, options: &RenderOptions) -> Result<()> {
    let transform = CanvasTransform::fit(mesh, options)?;
    write_document(mesh, &transform, writer, options)
}

/// Render `mesh` to an EPS file at `path`.
///
/// Nothing is created when the mesh cannot be scaled. The file is written in
/// place; a failed write may leave a truncated file behind.
pub fn save<P: AsRef<Path>>(mesh: &Mesh, path: P, options: &RenderOptions) -> Result<()> {
    let path = path.as_ref();
    let transform = CanvasTransform::fit(mesh, options)?;

    let file = File::create(path).map_err(|e| MeshError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut writer = BufWriter::new(file);

    let options = match options.title {
        Some(_) => options.clone(),
        None => options.clone().with_title(path.display().to_string()),
    };
    write_document(mesh, &transform, &mut writer, &options)?;

    writer.flush()?;
    Ok(())
}

fn write_document<W: Write>(
    mesh: &Mesh,
    transform: &CanvasTransform,
    mut writer: W,
    options: &RenderOptions,
) -> Result<()> {
    let num = |v: f64| format_number(v, options.precision);
    let point = |x: f64, y: f64| {
        let (px, py) = transform.map(x, y);
        format!("{} {}", num(px), num(py))
    };

    // Header
    writeln!(writer, "%!PS-Adobe-3.0 EPSF-3.0")?;
    writeln!(
        writer,
        "%%BoundingBox: 0 0 {} {}",
        num(transform.width()),
        num(transform.height())
    )?;
    if let Some(title) = &options.title {
        writeln!(writer, "%%Title: ({})", escape_string(title))?;
    }
    writeln!(writer, "%%Creator: {}", concat!("tessera ", env!("CARGO_PKG_VERSION")))?;
    writeln!(writer, "%%EndComments")?;
    writeln!(writer, "gsave")?;

    // Fills
    writeln!(writer, "{}", set_color(&options.fill, options.precision))?;
    for el in mesh.elements() {
        let [a, b, c] = el.nodes().map(|n| mesh.node(n));
        writeln!(
            writer,
            "{} moveto {} lineto {} lineto closepath fill",
            point(a.x(), a.y()),
            point(b.x(), b.y()),
            point(c.x(), c.y())
        )?;
    }

    // Strokes
    writeln!(writer, "{}", set_color(&options.stroke, options.precision))?;
    for edge in mesh.edges() {
        let [a, b] = edge.nodes().map(|n| mesh.node(n));
        writeln!(
            writer,
            "{} moveto {} lineto stroke",
            point(a.x(), a.y()),
            point(b.x(), b.y())
        )?;
    }

    writeln!(writer, "grestore")?;
    writeln!(writer, "showpage")?;
    writeln!(writer, "%%EOF")?;
    writer.flush()?;
    Ok(())
}

fn set_color(color: &Rgb, precision: usize) -> String {
    if color.is_gray() {
        format!("{} setgray", format_number(color.r, precision))
    } else {
        format!(
            "{} {} {} setrgbcolor",
            format_number(color.r, precision),
            format_number(color.g, precision),
            format_number(color.b, precision)
        )
    }
}

/// Escape a PostScript string body; line breaks become spaces so the
/// comment stays on one line.
fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// Fixed-point with at most `precision` decimals and no trailing zeros.
fn format_number(v: f64, precision: usize) -> String {
    let s = format!("{:.*}", precision, v);
    let trimmed = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
