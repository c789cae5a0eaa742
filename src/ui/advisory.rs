use iced::widget::{button, container, row, text};
use iced::{Alignment, Color, Element, Length};

use crate::state::session::{Advisory, Event};
use crate::Message;

/// Banner replacing the blocking alerts of a browser page
pub fn banner<'a>(advisory: &Advisory) -> Element<'a, Message> {
    let color = if advisory.is_error() {
        Color::from_rgb(0.95, 0.35, 0.35)
    } else {
        Color::from_rgb(0.3, 0.85, 0.4)
    };

    container(
        row![
            text(advisory.to_string()).color(color).width(Length::Fill),
            button("Dismiss").on_press(Message::Session(Event::AdvisoryDismissed)),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .padding(10)
    .width(Length::Fill)
    .style(container::rounded_box)
    .into()
}
