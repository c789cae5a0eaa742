use iced::widget::{center, column, container, opaque, stack, text};
use iced::{Alignment, Color, Element, Theme};

use crate::Message;

/// Cover `content` with a blocking "Please Wait" veil
///
/// `opaque` swallows every mouse event, so nothing underneath can be
/// clicked until the overlay goes away.
pub fn loading<'a>(content: Element<'a, Message>) -> Element<'a, Message> {
    let veil = center(
        column![text("Please Wait ...").size(20)]
            .spacing(10)
            .align_x(Alignment::Center),
    )
    .style(|_theme: &Theme| container::Style {
        background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.7).into()),
        text_color: Some(Color::WHITE),
        ..container::Style::default()
    });

    stack![content, opaque(veil)].into()
}
