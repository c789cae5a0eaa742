use bytes::Bytes;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::data::{
    Connectivity, InputError, Operation, ResultArtifact, SelectedImage, MAX_UPLOAD_BYTES,
};
use super::dimensions::DimensionInput;
use crate::api::{ApiError, ProcessRequest};

/// Where the upload workflow currently stands
///
/// The result artifact only exists inside `Succeeded`, so a loading state
/// with a visible result can't be represented.
#[derive(Debug, Clone, Default)]
pub enum Phase {
    /// No image picked yet
    #[default]
    Idle,
    /// An image is picked and nothing is in flight
    Previewing,
    Submitting,
    Succeeded(ResultArtifact),
    Failed(FailureKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The server answered with something other than 200
    Rejected,
    Unreachable,
}

/// Message shown to the user until dismissed or replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    Input(InputError),
    SelectImage,
    ChooseOption,
    InvalidRequest,
    ServerUnreachable,
    Saved(PathBuf),
    SaveFailed(String),
}

impl Advisory {
    pub fn is_error(&self) -> bool {
        !matches!(self, Advisory::Saved(_))
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::Input(err) => write!(f, "{err}"),
            Advisory::SelectImage => f.write_str("Select an Image !!"),
            Advisory::ChooseOption => f.write_str("Choose an option"),
            Advisory::InvalidRequest => f.write_str("Client Error : Invalid Request"),
            Advisory::ServerUnreachable => {
                f.write_str("Server Error : Couldn't connect to Server !!")
            }
            Advisory::Saved(path) => write!(f, "Saved to {}", path.display()),
            Advisory::SaveFailed(reason) => write!(f, "Download failed: {reason}"),
        }
    }
}

/// Everything that can change the session
#[derive(Debug, Clone)]
pub enum Event {
    /// Startup reachability check completed
    ProbeFinished(Result<(), ApiError>),
    /// A picked file was read (or rejected) in the background
    FileLoaded(Result<SelectedImage, InputError>),
    OperationSelected(Operation),
    WidthChanged(String),
    HeightChanged(String),
    SubmitRequested,
    SubmissionFinished {
        ticket: u64,
        outcome: Result<Bytes, ApiError>,
    },
    ArtifactSaved(Result<PathBuf, String>),
    AdvisoryDismissed,
}

/// Side effect the shell must run after an update
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    Submit { ticket: u64, request: ProcessRequest },
}

/// The whole client-side workflow: inputs, phase and connectivity
///
/// All mutation goes through [`Session::update`], which returns the side
/// effect (if any) for the caller to perform.
#[derive(Debug, Clone, Default)]
pub struct Session {
    image: Option<SelectedImage>,
    operation: Option<Operation>,
    dimensions: DimensionInput,
    phase: Phase,
    connectivity: Connectivity,
    advisory: Option<Advisory>,
    /// Id of the latest submission; completions with any other id are stale
    ticket: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    /// `None` until the user picks something; never goes back to `None`
    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    pub fn dimensions(&self) -> &DimensionInput {
        &self.dimensions
    }

    /// Whether the width/height fields are shown and required
    pub fn dimensions_required(&self) -> bool {
        self.operation.is_some_and(Operation::requires_dimensions)
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn advisory(&self) -> Option<&Advisory> {
        self.advisory.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.phase, Phase::Submitting)
    }

    /// The current output, if the last submission succeeded
    pub fn result(&self) -> Option<&ResultArtifact> {
        match &self.phase {
            Phase::Succeeded(artifact) => Some(artifact),
            _ => None,
        }
    }

    /// Apply an event and return the side effect to run
    pub fn update(&mut self, event: Event) -> Effect {
        match event {
            Event::ProbeFinished(result) => {
                self.on_probe(result);
                Effect::None
            }
            Event::FileLoaded(Ok(image)) => {
                info!(file = %image.name, bytes = image.size(), "🖼️  image selected");
                self.image = Some(image);
                self.clear_result();
                Effect::None
            }
            Event::FileLoaded(Err(err)) => {
                match &err {
                    InputError::TooLarge { size } => {
                        warn!(size, limit = MAX_UPLOAD_BYTES, "image over the upload limit")
                    }
                    other => warn!("image rejected: {other}"),
                }
                self.advisory = Some(Advisory::Input(err));
                Effect::None
            }
            Event::OperationSelected(operation) => {
                debug!(%operation, "operation selected");
                self.operation = Some(operation);
                self.clear_result();
                Effect::None
            }
            Event::WidthChanged(width) => {
                self.dimensions.width = width;
                Effect::None
            }
            Event::HeightChanged(height) => {
                self.dimensions.height = height;
                Effect::None
            }
            Event::SubmitRequested => self.submit(),
            Event::SubmissionFinished { ticket, outcome } => {
                self.on_submission_finished(ticket, outcome);
                Effect::None
            }
            Event::ArtifactSaved(Ok(path)) => {
                info!("💾 output saved to {}", path.display());
                self.advisory = Some(Advisory::Saved(path));
                Effect::None
            }
            Event::ArtifactSaved(Err(reason)) => {
                warn!("saving output failed: {reason}");
                self.advisory = Some(Advisory::SaveFailed(reason));
                Effect::None
            }
            Event::AdvisoryDismissed => {
                self.advisory = None;
                Effect::None
            }
        }
    }

    fn on_probe(&mut self, result: Result<(), ApiError>) {
        // A submission outcome observed before the probe returned is newer
        if self.connectivity != Connectivity::Connecting {
            debug!("ignoring late probe result");
            return;
        }
        self.connectivity = match result {
            Ok(()) => Connectivity::Online,
            Err(_) => Connectivity::Offline,
        };
        info!("server status: {}", self.connectivity);
    }

    /// Drop any output that no longer matches the current inputs
    fn clear_result(&mut self) {
        if self.is_in_flight() {
            // Abandon the running request; its completion will be ignored
            self.ticket += 1;
            debug!("inputs changed while submitting, abandoning request");
        }
        self.phase = if self.image.is_some() {
            Phase::Previewing
        } else {
            Phase::Idle
        };
    }

    fn submit(&mut self) -> Effect {
        if self.is_in_flight() {
            debug!("submission already in flight");
            return Effect::None;
        }

        let Some(image) = &self.image else {
            self.advisory = Some(Advisory::SelectImage);
            return Effect::None;
        };
        let Some(operation) = self.operation else {
            self.advisory = Some(Advisory::ChooseOption);
            return Effect::None;
        };

        let dimensions = if operation.requires_dimensions() {
            match self.dimensions.parse() {
                Ok(dims) => Some(dims),
                Err(err) => {
                    self.advisory = Some(Advisory::Input(err));
                    return Effect::None;
                }
            }
        } else {
            None
        };

        let request = ProcessRequest {
            file_name: image.name.clone(),
            image: image.bytes.clone(),
            mime_type: image.mime_type(),
            operation,
            dimensions,
        };

        self.ticket += 1;
        self.phase = Phase::Submitting;
        self.advisory = None;

        Effect::Submit {
            ticket: self.ticket,
            request,
        }
    }

    fn on_submission_finished(&mut self, ticket: u64, outcome: Result<Bytes, ApiError>) {
        // The server was either reached or not, whichever request this was
        self.connectivity = match &outcome {
            Err(err) if err.is_unreachable() => Connectivity::Offline,
            _ => Connectivity::Online,
        };

        if ticket != self.ticket || !self.is_in_flight() {
            debug!(ticket, current = self.ticket, "dropping stale submission result");
            return;
        }

        match outcome {
            Ok(bytes) => {
                self.phase = Phase::Succeeded(ResultArtifact::new(bytes));
            }
            Err(err) => {
                warn!("submission failed: {err}");
                let (kind, advisory) = if err.is_unreachable() {
                    (FailureKind::Unreachable, Advisory::ServerUnreachable)
                } else {
                    (FailureKind::Rejected, Advisory::InvalidRequest)
                };
                self.phase = Phase::Failed(kind);
                self.advisory = Some(advisory);
            }
        }
    }
}
