use super::message::Message;
use crate::{
    collaborators::{Notifier, SubmitError, Viewport},
    config::Config,
    form::Attachment,
    http::HttpCatalog,
    sequencer::{Collaborators, FormController, PendingSubmission, Phase},
    POOL,
};
use iced::{
    futures::channel::oneshot,
    time::Instant,
    widget::scrollable::{self, RelativeOffset},
    Application, Command, Element, Subscription, Theme,
};
use once_cell::sync::Lazy;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

pub(super) static FORM_SCROLLABLE: Lazy<scrollable::Id> =
    Lazy::new(|| scrollable::Id::new("perfume-form"));

const TICK: Duration = Duration::from_millis(100);

/// What the window is started with.
#[derive(Debug)]
pub struct Flags {
    pub config: Config,
    pub catalog: HttpCatalog,
}

#[derive(Debug)]
pub struct App {
    pub(super) controller: FormController,
    /// Path typed into the attachment input, not yet read.
    pub(super) attachment_path: String,
    pub(super) attachment_error: Option<String>,
    scroll_requested: Arc<AtomicBool>,
}

/// The toast itself is drawn from [`FormController::notification`]; this just logs.
struct LogNotifier;

impl Notifier for LogNotifier {
    fn show(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn hide(&mut self) {
        log::debug!("notification hidden");
    }
}

/// Scrolling needs a [`Command`], which only `update` can return, so the controller just
/// raises a flag for it.
struct ScrollRequest(Arc<AtomicBool>);

impl Viewport for ScrollRequest {
    fn scroll_to_top(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

fn submit_in_background(pending: PendingSubmission) -> Command<Message> {
    let (tx, rx) = oneshot::channel();
    POOL.spawn(move || {
        if tx.send(pending.run()).is_err() {
            log::warn!("submission finished after the form was closed");
        }
    });

    Command::perform(
        async move {
            rx.await
                .unwrap_or(Err(SubmitError::Dropped))
                .map_err(Arc::new)
        },
        Message::SubmissionResolved,
    )
}

impl Application for App {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = Flags;

    fn new(flags: Self::Flags) -> (Self, Command<Self::Message>) {
        let Flags { config, catalog } = flags;
        let scroll_requested = Arc::new(AtomicBool::new(false));

        let controller = FormController::new(Collaborators {
            submitter: Arc::new(catalog.clone()),
            notifier: Box::new(LogNotifier),
            refresher: Box::new(catalog),
            viewport: Box::new(ScrollRequest(Arc::clone(&scroll_requested))),
        })
        .with_notification_duration(config.notification_duration());

        let app = App {
            controller,
            attachment_path: String::new(),
            attachment_error: None,
            scroll_requested,
        };
        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("Add perfume")
    }

    fn update(&mut self, message: Self::Message) -> Command<Self::Message> {
        match message {
            Message::FieldChanged(field, value) => self.controller.set_field(field, value),
            Message::RatingChanged(rating) => self.controller.set_rating(rating),
            Message::AttachmentPathChanged(path) => self.attachment_path = path,
            Message::Attach => match Attachment::from_path(self.attachment_path.trim()) {
                Ok(attachment) => {
                    self.attachment_error = None;
                    self.controller.set_attachment(Some(attachment));
                }
                Err(err) => {
                    log::warn!("couldn't read {}: {err}", self.attachment_path);
                    self.attachment_error = Some(err.to_string());
                }
            },
            Message::Detach => {
                self.attachment_error = None;
                self.controller.set_attachment(None);
            }
            Message::Submit => {
                if let Some(pending) = self.controller.submit() {
                    return submit_in_background(pending);
                }
            }
            Message::SubmissionResolved(result) => {
                self.controller.resolve(result, Instant::now());
                if self.scroll_requested.swap(false, Ordering::Relaxed) {
                    self.attachment_path.clear();
                    return scrollable::snap_to(FORM_SCROLLABLE.clone(), RelativeOffset::START);
                }
            }
            Message::Tick(now) => {
                self.controller.tick(now);
            }
        }

        Command::none()
    }

    fn view(&self) -> Element<Self::Message> {
        self.view_form()
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        if matches!(self.controller.phase(), Phase::Succeeded { .. }) {
            iced::time::every(TICK).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }
}
