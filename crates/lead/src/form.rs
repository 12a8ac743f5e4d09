use std::sync::Arc;

use doceencomenda_shared::Notice;
use strum::{AsRefStr, Display};
use tokio::sync::Mutex;

use crate::{Ack, FieldErrors, LeadInput, SubmissionStrategy};

pub const SUBMISSION_SUCCEEDED: &str = "submission_succeeded";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Success,
    /// Last attempt failed. Accepts a new submit like `Idle`.
    Error,
}

impl SubmissionState {
    pub fn accepts_submit(&self) -> bool {
        matches!(self, SubmissionState::Idle | SubmissionState::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(&'static str),
    Error(Notice),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Submitted(Ack),
    Invalid(FieldErrors),
    Failed(Notice),
    /// The form already succeeded; it stays that way until reset.
    AlreadySubmitted(Ack),
    /// A submission is already in flight for this form.
    Suppressed,
}

/// Renderable copy of a form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormView {
    pub state: SubmissionState,
    pub name: String,
    pub email: String,
    pub errors: FieldErrors,
    pub notification: Option<Notification>,
}

#[derive(Default)]
struct FormData {
    state: SubmissionState,
    name: String,
    email: String,
    errors: FieldErrors,
    notification: Option<Notification>,
    ack: Option<Ack>,
}

/// One lead-capture form instance and its submission state machine.
pub struct LeadForm {
    strategy: Arc<dyn SubmissionStrategy>,
    data: Mutex<FormData>,
}

impl LeadForm {
    pub fn new(strategy: Arc<dyn SubmissionStrategy>) -> Self {
        Self {
            strategy,
            data: Mutex::new(FormData::default()),
        }
    }

    pub async fn submit(&self, name: impl Into<String>, email: impl Into<String>) -> Outcome {
        let input = {
            let mut data = self.data.lock().await;
            if let (SubmissionState::Success, Some(ack)) = (data.state, &data.ack) {
                tracing::debug!("lead form already submitted");
                return Outcome::AlreadySubmitted(ack.clone());
            }

            if !data.state.accepts_submit() {
                tracing::debug!(state = %data.state, "lead submission suppressed");
                return Outcome::Suppressed;
            }

            data.name = name.into();
            data.email = email.into();

            let input = LeadInput::new(&data.name, &data.email);
            let lead = match input.validate_lead() {
                Ok(lead) => lead,
                Err(errors) => {
                    data.errors = errors.clone();
                    return Outcome::Invalid(errors);
                }
            };

            data.errors = FieldErrors::default();
            data.notification = None;
            data.state = SubmissionState::Pending;

            lead
        };

        let result = self.strategy.submit(&input).await;

        let mut data = self.data.lock().await;
        match result {
            Ok(ack) => {
                tracing::info!(strategy = %self.strategy.kind(), "lead submitted");

                data.state = SubmissionState::Success;
                data.name.clear();
                data.email.clear();
                data.notification = Some(Notification::Success(SUBMISSION_SUCCEEDED));
                data.ack = Some(ack.clone());

                Outcome::Submitted(ack)
            }
            Err(err) => {
                match &err {
                    doceencomenda_shared::Error::Configuration(_)
                    | doceencomenda_shared::Error::Unknown(_) => {
                        tracing::error!(strategy = %self.strategy.kind(), "lead submission failed: {err}")
                    }
                    _ => {
                        tracing::warn!(strategy = %self.strategy.kind(), "lead submission failed: {err}")
                    }
                }

                let notice = err.notice();
                data.state = SubmissionState::Error;
                data.notification = Some(Notification::Error(notice.clone()));

                Outcome::Failed(notice)
            }
        }
    }

    /// "Submit another": back to an empty idle form. Ignored while pending.
    pub async fn reset(&self) -> bool {
        let mut data = self.data.lock().await;
        if data.state == SubmissionState::Pending {
            return false;
        }

        *data = FormData::default();

        true
    }

    pub async fn state(&self) -> SubmissionState {
        self.data.lock().await.state
    }

    pub async fn view(&self) -> FormView {
        let data = self.data.lock().await;

        FormView {
            state: data.state,
            name: data.name.to_owned(),
            email: data.email.to_owned(),
            errors: data.errors.clone(),
            notification: data.notification.clone(),
        }
    }
}
