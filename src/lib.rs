//! Interactive brightness-density measurement for rectangular image selections.
//!
//! A selection is analysed by thresholding its luminance, tracing the outer borders of the
//! bright components with [imageproc] and comparing the bright pixel count against the area
//! of the convex hull around them. Every finalised selection produces one [`DensityRecord`].

pub mod colors;
pub mod config;
pub mod contours;
pub mod density;
pub mod draw;
pub mod error;
pub mod rect;
pub mod selection;
pub mod session;
pub mod sink;

pub use config::Settings;
pub use density::{Analysis, analyze, analyze_with_threshold};
pub use error::{Error, Result};
pub use rect::SelectionRect;
pub use selection::{PointerEvent, Selector, Transition};
pub use session::{Frame, Measurement, Session};
pub use sink::{CsvSink, DensityRecord, RecordSink};

/// Opens and decodes an image file into an 8-bit RGB buffer.
pub fn load_image(path: impl AsRef<std::path::Path>) -> Result<image::RgbImage> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgb8())
}
