use super::{app::FORM_SCROLLABLE, options::options_for, App, Message};
use crate::{form::Field, sequencer::Phase};
use iced::{
    widget::{
        column, container, pick_list, row, scrollable, slider, text, Button, Column, Rule,
        TextInput,
    },
    Color, Element, Length,
};

fn error_color() -> Color {
    Color::from_rgb8(0xdc, 0x35, 0x45)
}

fn success_color() -> Color {
    Color::from_rgb8(0x19, 0x87, 0x54)
}

/// Label, input and (if the backend complained) the error underneath.
fn labelled<'a>(
    field: Field,
    input: impl Into<Element<'a, Message>>,
    error: Option<&str>,
) -> Element<'a, Message> {
    let input: Element<'a, Message> = input.into();
    let mut block: Column<'a, Message> = column![text(field.label()), input].spacing(5);
    if let Some(error) = error {
        block = block.push(text(error).size(14).style(error_color()));
    }
    block.width(Length::Fill).into()
}

fn field_input<'a>(field: Field, value: &str) -> Element<'a, Message> {
    match options_for(field) {
        Some(options) => {
            let selected = options.iter().copied().find(|option| *option == value);
            pick_list(options, selected, move |choice: &'static str| {
                Message::FieldChanged(field, choice.to_owned())
            })
            .placeholder("Choose...")
            .width(Length::Fill)
            .into()
        }
        None => TextInput::new(
            format!("Enter the {}", field.label().to_lowercase()).as_str(),
            value,
        )
        .on_input(move |s| Message::FieldChanged(field, s))
        .into(),
    }
}

impl App {
    fn field_block(&self, field: Field) -> Element<'_, Message> {
        labelled(
            field,
            field_input(field, self.controller.record().get(field)),
            self.controller.error_for(field),
        )
    }

    fn attachment_block(&self) -> Element<'_, Message> {
        let path_input = TextInput::new("Path to an image", &self.attachment_path)
            .on_input(Message::AttachmentPathChanged)
            .on_submit(Message::Attach);
        let attach_button = Button::new("Attach").on_press(Message::Attach);

        let mut block = column![row![path_input, attach_button].spacing(10)].spacing(5);
        match self.controller.record().attachment() {
            Some(attachment) => {
                block = block.push(
                    row![
                        text(format!("{} ({} bytes)", attachment.name, attachment.len())),
                        Button::new("Remove").on_press(Message::Detach)
                    ]
                    .spacing(10),
                );
            }
            None => block = block.push(text("No file attached")),
        }
        if let Some(error) = &self.attachment_error {
            block = block.push(text(error).size(14).style(error_color()));
        }
        block.into()
    }

    #[must_use]
    pub fn view_form(&self) -> Element<'_, Message> {
        let record = self.controller.record();

        let rating = column![
            text(format!("Rating: {:.1}", record.rating())),
            slider(0.0..=5.0, record.rating(), Message::RatingChanged).step(0.5)
        ]
        .spacing(5);

        // disabled while an attempt is in flight or the success toast is up
        let mut submit_button = Button::new("Add");
        if self.controller.phase() == Phase::Idle {
            submit_button = submit_button.on_press(Message::Submit);
        }

        let mut content: Column<'_, Message> = column![text("Add perfume").size(28)]
            .spacing(20)
            .max_width(800);

        if let Some(notification) = self.controller.notification() {
            content = content.push(text(notification).style(success_color()));
        }

        content = content.push(Rule::horizontal(4));

        // two fields per row
        for pair in Field::ALL.chunks(2) {
            let mut line = row![].spacing(20);
            for field in pair {
                line = line.push(self.field_block(*field));
            }
            content = content.push(line);
        }

        content = content
            .push(rating)
            .push(self.attachment_block())
            .push(Rule::horizontal(4))
            .push(submit_button);

        scrollable(container(content).width(Length::Fill).padding(40).center_x())
            .id(FORM_SCROLLABLE.clone())
            .into()
    }
}
