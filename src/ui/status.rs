/// Server status indicator (orange while connecting, green online, red offline)
use iced::widget::{row, text};
use iced::{Color, Element};

use crate::state::data::Connectivity;
use crate::Message;

pub fn status_color(connectivity: Connectivity) -> Color {
    match connectivity {
        Connectivity::Connecting => Color::from_rgb(1.0, 0.65, 0.0),
        Connectivity::Online => Color::from_rgb(0.2, 0.8, 0.3),
        Connectivity::Offline => Color::from_rgb(0.9, 0.2, 0.2),
    }
}

pub fn server_status<'a>(connectivity: Connectivity) -> Element<'a, Message> {
    row![
        text("Server Status :").size(14),
        text(connectivity.to_string())
            .size(14)
            .color(status_color(connectivity)),
    ]
    .spacing(6)
    .into()
}
