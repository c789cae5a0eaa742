use iced::widget::{
    button, column, container, image as picture, pick_list, row, scrollable, text, text_input,
    Column,
};
use iced::{Alignment, Element, Length, Task, Theme};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod files;
mod state;
mod ui;

use api::BackendClient;
use config::{AppConfig, ConfigError};
use state::data::{Operation, MAX_UPLOAD_BYTES};
use state::session::{Effect, Event, FailureKind, Phase, Session};

/// Main application state
struct PixelMorph {
    /// Upload workflow: inputs, phase, connectivity
    session: Session,
    /// Shared HTTP client for the processing endpoint
    client: BackendClient,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the file area
    SelectFile,
    /// User clicked "Download Output"
    Download,
    /// Anything the session reducer handles
    Session(Event),
}

/// Errors that stop the application from starting
#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ui(#[from] iced::Error),
}

impl PixelMorph {
    /// Create the application and launch the startup reachability probe
    fn new(config: AppConfig) -> (Self, Task<Message>) {
        let client = BackendClient::new(config.api_url);
        info!("🎨 PixelMorph initialized, backend at {}", client.endpoint());

        let probe = {
            let client = client.clone();
            Task::perform(async move { client.probe().await }, |result| {
                Message::Session(Event::ProbeFinished(result))
            })
        };

        (
            PixelMorph {
                session: Session::new(),
                client,
            },
            probe,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SelectFile => {
                if self.session.is_in_flight() {
                    return Task::none();
                }

                // Show the native file picker
                match files::loader::pick_image() {
                    Some(path) => Task::perform(files::loader::load_selected_image(path), |result| {
                        Message::Session(Event::FileLoaded(result))
                    }),
                    None => Task::none(),
                }
            }
            Message::Download => {
                let Some(artifact) = self.session.result() else {
                    return Task::none();
                };
                let bytes = artifact.bytes.clone();

                match files::export::choose_download_path(artifact.file_name()) {
                    Some(path) => Task::perform(files::export::save_artifact(path, bytes), |result| {
                        Message::Session(Event::ArtifactSaved(result))
                    }),
                    None => Task::none(),
                }
            }
            Message::Session(event) => {
                let effect = self.session.update(event);
                self.run(effect)
            }
        }
    }

    /// Turn a reducer side effect into a background task
    fn run(&self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::None => Task::none(),
            Effect::Submit { ticket, request } => {
                let client = self.client.clone();
                Task::perform(async move { client.process(request).await }, move |outcome| {
                    Message::Session(Event::SubmissionFinished { ticket, outcome })
                })
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let session = &self.session;

        let header = column![
            text("PixelMorph").size(40),
            text("Redefine Your Images").size(16),
        ]
        .spacing(4)
        .align_x(Alignment::Center);

        let file_area: Element<Message> = match session.image() {
            Some(image) => column![
                picture(image.preview.clone())
                    .width(Length::Fixed(250.0))
                    .height(Length::Fixed(300.0)),
                text("Image Preview"),
                text("(Click Again to Change Image)").size(12),
            ]
            .spacing(6)
            .align_x(Alignment::Center)
            .into(),
            None => column![text("+").size(48), text("Select File")]
                .spacing(6)
                .align_x(Alignment::Center)
                .into(),
        };

        let operations = pick_list(Operation::MENU, session.operation(), |operation| {
            Message::Session(Event::OperationSelected(operation))
        })
        .placeholder("-- Select Option --");

        let resize_fields = session.dimensions_required().then(|| {
            let dims = session.dimensions();
            row![
                text("Width :"),
                text_input("px", &dims.width)
                    .on_input(|value| Message::Session(Event::WidthChanged(value)))
                    .width(Length::Fixed(100.0)),
                text("px"),
                text("Height :"),
                text_input("px", &dims.height)
                    .on_input(|value| Message::Session(Event::HeightChanged(value)))
                    .width(Length::Fixed(100.0)),
                text("px"),
            ]
            .spacing(8)
            .align_y(Alignment::Center)
        });

        let failure_hint = match session.phase() {
            Phase::Failed(FailureKind::Rejected) => {
                Some("The server couldn't process this image with the chosen option.")
            }
            Phase::Failed(FailureKind::Unreachable) => {
                Some("Check that the processing server is running, then try again.")
            }
            _ => None,
        };

        let output = session.result().map(|artifact| {
            column![
                text("Output Image"),
                picture(artifact.handle.clone()).width(Length::Fixed(250.0)),
                button("Download Output")
                    .on_press(Message::Download)
                    .padding(10),
            ]
            .spacing(10)
            .align_x(Alignment::Center)
        });

        let content = Column::new()
            .push(header)
            .push_maybe(session.advisory().map(ui::advisory::banner))
            .push(
                button(file_area)
                    .on_press(Message::SelectFile)
                    .padding(16),
            )
            .push(text(format!("File Size Limit : {} MB", MAX_UPLOAD_BYTES / (1024 * 1024))).size(14))
            .push(operations)
            .push_maybe(resize_fields)
            .push(
                button("Upload Image")
                    .on_press(Message::Session(Event::SubmitRequested))
                    .padding(10),
            )
            .push_maybe(failure_hint.map(|hint| text(hint).size(12)))
            .push_maybe(output)
            .push(ui::status::server_status(session.connectivity()))
            .spacing(20)
            .padding(40)
            .align_x(Alignment::Center);

        let page = container(scrollable(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill);

        if session.is_in_flight() {
            ui::overlay::loading(page.into())
        } else {
            page.into()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pixelmorph=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env().inspect_err(|e| error!("❌ {e}"))?;

    iced::application("PixelMorph", PixelMorph::update, PixelMorph::view)
        .theme(PixelMorph::theme)
        .centered()
        .run_with(move || PixelMorph::new(config))?;

    Ok(())
}
