use std::path::PathBuf;

use brightness_density::{
    CsvSink, Frame, Measurement, PointerEvent, Session, Settings, config::DEFAULT_OUTPUT_FILE,
    density::BRIGHTNESS_THRESHOLD, load_image,
};
use clap::Parser;
use iced::widget::{column, container, image as iced_image, mouse_area, scrollable, text};
use iced::{
    ContentFit, Element, Event, Length, Point, Subscription, Task, Theme, event, keyboard, mouse,
    window,
};
use image::{DynamicImage, RgbImage};
use log::{error, info};

#[derive(Parser, Debug)]
#[command(name = "brightness-density")]
#[command(version, about = "Measure the brightness density of image selections", long_about = None)]
struct Cli {
    /// Image to open; a file dialog is shown when omitted
    #[arg(value_name = "IMAGE")]
    image: Option<PathBuf>,

    /// CSV file the results are appended to
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Luminance (0-255) above which a pixel counts as bright
    #[arg(long, value_name = "LEVEL", default_value_t = BRIGHTNESS_THRESHOLD)]
    threshold: u8,

    /// Color name of the selection outline
    #[arg(long, value_name = "COLOR", default_value = "lime")]
    selection_color: String,

    /// Color name of the hull outline
    #[arg(long, value_name = "COLOR", default_value = "red")]
    hull_color: String,

    /// Outline thickness in pixels
    #[arg(long, value_name = "PX", default_value_t = 2)]
    thickness: u32,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            output: self.output.clone(),
            threshold: self.threshold,
            selection_color: self.selection_color.clone(),
            hull_color: self.hull_color.clone(),
            thickness: self.thickness,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = cli.settings();

    let Some(path) = cli.image.clone().or_else(pick_image) else {
        error!("No image selected, exiting");
        return Ok(());
    };
    let image = match load_image(&path) {
        Ok(image) => image,
        Err(err) => {
            error!("{err}");
            return Ok(());
        }
    };

    let sink = CsvSink::new(&settings.output);
    info!("Results will be saved to {}", sink.path().display());
    let session = Session::with_settings(image, sink, &settings)?;

    let title = format!(
        "Brightness Density - {}",
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    );

    iced::application(
        move || Selection::new(session.clone()),
        Selection::update,
        Selection::view,
    )
    .title(move |_state: &Selection| title.clone())
    .theme(|_state: &Selection| Theme::Dark)
    .subscription(Selection::subscription)
    .run()?;

    Ok(())
}

fn pick_image() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select an image")
        .add_filter("Image files", &["png", "jpg", "jpeg", "bmp"])
        .add_filter("All files", &["*"])
        .pick_file()
}

struct Selection {
    session: Session<CsvSink>,

    // Either the persistent image or the latest drag preview
    display: iced_image::Handle,
    width: u32,
    height: u32,

    cursor: Point,
    status: String,
}

#[derive(Debug, Clone)]
enum Message {
    CursorMoved(Point),
    Pressed,
    Released,
    Quit,
}

impl Selection {
    fn new(session: Session<CsvSink>) -> (Self, Task<Message>) {
        let (width, height) = session.image().dimensions();
        let display = to_handle(session.image());
        (
            Self {
                session,
                display,
                width,
                height,
                cursor: Point::ORIGIN,
                status: "Drag to select a region. Press Esc to quit.".to_string(),
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let event = match message {
            Message::Quit => return iced::exit(),
            Message::CursorMoved(position) => {
                self.cursor = position;
                let (x, y) = self.pixel_under_cursor();
                PointerEvent::Move { x, y }
            }
            Message::Pressed => {
                let (x, y) = self.pixel_under_cursor();
                PointerEvent::Press { x, y }
            }
            Message::Released => {
                let (x, y) = self.pixel_under_cursor();
                PointerEvent::Release { x, y }
            }
        };

        match self.session.on_pointer_event(event) {
            Ok(Frame::Unchanged) => {}
            Ok(Frame::Preview(scratch)) => self.display = to_handle(&scratch),
            Ok(Frame::Committed(measurement)) => {
                self.display = to_handle(self.session.image());
                self.status = describe(&measurement);
            }
            Err(err) => {
                self.display = to_handle(self.session.image());
                self.status = format!("Error: {err}");
            }
        }

        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let picture = iced_image(self.display.clone())
            .width(Length::Fixed(self.width as f32))
            .height(Length::Fixed(self.height as f32))
            .content_fit(ContentFit::None);

        let canvas = mouse_area(picture)
            .on_move(Message::CursorMoved)
            .on_press(Message::Pressed);

        let viewport = scrollable(canvas)
            .direction(scrollable::Direction::Both {
                vertical: scrollable::Scrollbar::default(),
                horizontal: scrollable::Scrollbar::default(),
            })
            .width(Length::Fill)
            .height(Length::Fill);

        container(column![viewport, text(&self.status).size(14)].spacing(10))
            .padding(10)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(window_message)
    }

    fn pixel_under_cursor(&self) -> (u32, u32) {
        let x = self.cursor.x.max(0.0) as u32;
        let y = self.cursor.y.max(0.0) as u32;
        (x.min(self.width), y.min(self.height))
    }
}

/// Window-wide events. The release is taken from here rather than from the image area so a
/// drag that ends outside the picture still finishes the selection.
fn window_message(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed {
            key: keyboard::Key::Named(keyboard::key::Named::Escape),
            ..
        }) => Some(Message::Quit),
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => Some(Message::Released),
        _ => None,
    }
}

fn describe(measurement: &Measurement) -> String {
    let record = &measurement.record;
    let area = format!(
        "({}, {})-({}, {})",
        record.x1, record.y1, record.x2, record.y2
    );
    if measurement.analysis.hull.is_some() {
        format!("{area}: brightness density {:.2}", record.density)
    } else {
        format!("{area}: no bright area")
    }
}

fn to_handle(image: &RgbImage) -> iced_image::Handle {
    let rgba = DynamicImage::ImageRgb8(image.clone()).to_rgba8();
    iced_image::Handle::from_rgba(rgba.width(), rgba.height(), rgba.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_for(event: Event) -> Option<Message> {
        window_message(event, event::Status::Ignored, window::Id::unique())
    }

    #[test]
    fn left_release_anywhere_finishes_the_drag() {
        let released = message_for(Event::Mouse(mouse::Event::ButtonReleased(
            mouse::Button::Left,
        )));
        assert!(matches!(released, Some(Message::Released)));

        let right = message_for(Event::Mouse(mouse::Event::ButtonReleased(
            mouse::Button::Right,
        )));
        assert!(right.is_none());
        assert!(message_for(Event::Mouse(mouse::Event::CursorLeft)).is_none());
    }
}
