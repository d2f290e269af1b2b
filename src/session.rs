use image::{
    RgbImage,
    imageops::{crop, crop_imm},
};
use log::{debug, error, info};

use crate::{
    config::{OverlayStyle, Settings},
    density::{Analysis, BRIGHTNESS_THRESHOLD, analyze_with_threshold},
    draw::{draw_hull_outline, draw_selection_outline},
    error::Result,
    rect::SelectionRect,
    selection::{PointerEvent, Selector, Transition},
    sink::{DensityRecord, RecordSink},
};

/// What the shell should display after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// The display does not need to change.
    Unchanged,
    /// A temporary copy of the image with the in-progress selection drawn on it.
    Preview(RgbImage),
    /// A selection was finalised; the persistent image now carries its overlays.
    Committed(Measurement),
}

/// Outcome of one finalised selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub record: DensityRecord,
    pub analysis: Analysis,
}

/// Owns the persistent image and applies the side effects requested by the [`Selector`].
#[derive(Debug, Clone)]
pub struct Session<S> {
    image: RgbImage,
    selector: Selector,
    sink: S,
    style: OverlayStyle,
    threshold: u8,
}

impl<S: RecordSink> Session<S> {
    /// Creates a session with default overlay style and threshold.
    pub fn new(image: RgbImage, sink: S) -> Self {
        Self {
            image,
            selector: Selector::new(),
            sink,
            style: OverlayStyle::default(),
            threshold: BRIGHTNESS_THRESHOLD,
        }
    }

    pub fn with_settings(image: RgbImage, sink: S, settings: &Settings) -> Result<Self> {
        Ok(Self {
            style: OverlayStyle::from_settings(settings)?,
            threshold: settings.threshold,
            ..Self::new(image, sink)
        })
    }

    /// The persistent image, including every committed overlay.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Feeds one pointer event through the state machine and applies its side effects.
    ///
    /// Only a failure to store the record is returned as an error, and it is returned after
    /// the overlays have been drawn, so the persistent image always reflects the selection.
    pub fn on_pointer_event(&mut self, event: PointerEvent) -> Result<Frame> {
        match self.selector.handle_event(event) {
            Transition::None => Ok(Frame::Unchanged),
            Transition::Started { anchor } => {
                debug!("selection started at {anchor:?}");
                Ok(Frame::Unchanged)
            }
            Transition::Preview(selection) => Ok(Frame::Preview(self.preview(selection))),
            Transition::Finalize(selection) => self.finalize(selection).map(Frame::Committed),
        }
    }

    fn preview(&self, selection: SelectionRect) -> RgbImage {
        let mut scratch = self.image.clone();
        draw_selection_outline(
            &mut scratch,
            selection,
            self.style.selection,
            self.style.thickness,
        );
        scratch
    }

    fn finalize(&mut self, selection: SelectionRect) -> Result<Measurement> {
        draw_selection_outline(
            &mut self.image,
            selection,
            self.style.selection,
            self.style.thickness,
        );

        let (width, height) = self.image.dimensions();
        let bounds = selection.clamped_to(width, height);

        let analysis = {
            let region = crop_imm(&self.image, bounds.x, bounds.y, bounds.width, bounds.height);
            analyze_with_threshold(&*region, self.threshold)
        };

        let record = DensityRecord::new(selection, analysis.density);
        let stored = self.sink.append(&record);

        match &analysis.hull {
            Some(hull) => {
                let mut region = crop(
                    &mut self.image,
                    bounds.x,
                    bounds.y,
                    bounds.width,
                    bounds.height,
                );
                draw_hull_outline(&mut *region, hull, self.style.hull, self.style.thickness);
                info!(
                    "brightness density of selection {selection}: {:.2}",
                    analysis.density
                );
            }
            None => info!("no bright area in selection {selection}"),
        }

        if let Err(err) = stored {
            error!("record for selection {selection} was not saved: {err}");
            return Err(err);
        }

        Ok(Measurement { record, analysis })
    }
}
