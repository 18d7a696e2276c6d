use thiserror::Error;
use time::Date;

use crate::api::ApiError;
use crate::dates::format_iso_date;
use crate::models::{Barber, BookingConfirmation, BookingRequest, ClientDetails, Service, Slot};

pub const SLOTS_FETCH_ERROR: &str = "Erro ao carregar horários disponíveis";
pub const INCOMPLETE_SUBMISSION_ERROR: &str =
    "Por favor, preencha todos os campos obrigatórios";
pub const BOOKING_REJECTED_FALLBACK: &str = "Erro ao realizar agendamento";
pub const BOOKING_TRANSPORT_ERROR: &str = "Erro interno. Tente novamente.";
pub const BOOKING_SUCCESS_FALLBACK: &str = "Agendamento realizado com sucesso!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    #[default]
    Service,
    Barber,
    Schedule,
    Client,
    Confirmed,
}

impl WizardStep {
    pub fn number(self) -> u8 {
        match self {
            Self::Service => 1,
            Self::Barber => 2,
            Self::Schedule => 3,
            Self::Client => 4,
            Self::Confirmed => 5,
        }
    }
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("no service selected")]
    MissingService,
    #[error("no barber selected")]
    MissingBarber,
    #[error("no date and time selected")]
    MissingSchedule,
    #[error("client details are incomplete")]
    MissingClientDetails,
}

/// Linear booking flow: service -> barber -> schedule -> client -> confirmed.
/// All mutation goes through the transition methods below; `advance` refuses
/// to move while the current step is incomplete and never skips a step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingWizard {
    step: WizardStep,
    service: Option<Service>,
    barber: Option<Barber>,
    date: Option<Date>,
    time: Option<String>,
    client: ClientDetails,
    slots: Vec<Slot>,
    error: Option<String>,
    success: Option<String>,
}

impl BookingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn service(&self) -> Option<&Service> {
        self.service.as_ref()
    }

    pub fn barber(&self) -> Option<&Barber> {
        self.barber.as_ref()
    }

    pub fn date(&self) -> Option<Date> {
        self.date
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn client(&self) -> &ClientDetails {
        &self.client
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn select_service(&mut self, service: Service) {
        self.service = Some(service);
    }

    /// Changing barber invalidates the chosen time and the loaded slot list.
    pub fn select_barber(&mut self, barber: Barber) {
        self.barber = Some(barber);
        self.time = None;
        self.slots.clear();
    }

    /// Changing date invalidates the chosen time; slots are replaced by the
    /// next availability fetch.
    pub fn select_date(&mut self, date: Date) {
        self.date = Some(date);
        self.time = None;
    }

    /// A time is only settable while a matching available slot is loaded.
    pub fn select_time(&mut self, label: &str) -> bool {
        let selectable = self
            .slots
            .iter()
            .any(|slot| slot.available && slot.display_label == label);
        if selectable {
            self.time = Some(label.to_string());
        }
        selectable
    }

    pub fn set_client_name(&mut self, name: String) {
        self.client.name = name;
    }

    pub fn set_client_email(&mut self, email: String) {
        self.client.email = email;
    }

    pub fn set_client_phone(&mut self, phone: String) {
        self.client.phone = phone;
    }

    pub fn set_lgpd_consent(&mut self, consent: bool) {
        self.client.lgpd_consent = consent;
    }

    /// Both halves of the availability query, once barber and date are known.
    pub fn availability_query(&self) -> Option<(i64, String)> {
        match (&self.barber, self.date) {
            (Some(barber), Some(date)) => Some((barber.id, format_iso_date(date))),
            _ => None,
        }
    }

    fn step_complete(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Service => self.service.is_some(),
            WizardStep::Barber => self.barber.is_some(),
            WizardStep::Schedule => self.date.is_some() && self.time.is_some(),
            WizardStep::Client => self.client.is_complete(),
            WizardStep::Confirmed => true,
        }
    }

    /// No-op while the current step is incomplete; otherwise moves forward by
    /// exactly one step. Submission, not `advance`, leaves the client step.
    pub fn advance(&mut self) {
        if !self.step_complete(self.step) {
            return;
        }

        self.step = match self.step {
            WizardStep::Service => WizardStep::Barber,
            WizardStep::Barber => WizardStep::Schedule,
            WizardStep::Schedule => WizardStep::Client,
            WizardStep::Client | WizardStep::Confirmed => self.step,
        };
    }

    /// Moves back one step, floored at the first; entered data is preserved.
    pub fn retreat(&mut self) {
        self.step = match self.step {
            WizardStep::Service | WizardStep::Confirmed => self.step,
            WizardStep::Barber => WizardStep::Service,
            WizardStep::Schedule => WizardStep::Barber,
            WizardStep::Client => WizardStep::Schedule,
        };
    }

    /// A successful fetch replaces the slot list wholesale, preserving server
    /// order. A failed fetch keeps whatever was loaded and reports a generic
    /// message.
    pub fn apply_slots(&mut self, outcome: Result<Vec<Slot>, String>) {
        match outcome {
            Ok(slots) => {
                self.slots = slots;
                self.error = None;
            }
            Err(_) => {
                self.error = Some(SLOTS_FETCH_ERROR.to_string());
            }
        }
    }

    /// Re-validates every step before assembling the payload; `advance`
    /// gating alone is not trusted at submit time.
    pub fn submission_request(&self) -> Result<BookingRequest, WizardError> {
        let service = self.service.as_ref().ok_or(WizardError::MissingService)?;
        let barber = self.barber.as_ref().ok_or(WizardError::MissingBarber)?;
        let date = self.date.ok_or(WizardError::MissingSchedule)?;
        let time = self.time.as_deref().ok_or(WizardError::MissingSchedule)?;

        if !self.client.is_complete() {
            return Err(WizardError::MissingClientDetails);
        }

        Ok(BookingRequest {
            client: self.client.clone(),
            barber_id: barber.id,
            service_id: service.id,
            date_time: format!("{}T{time}:00", format_iso_date(date)),
            note: String::new(),
        })
    }

    /// Acceptance reaches the terminal step without clearing selections;
    /// rejection keeps the wizard on the client step for a retry.
    pub fn apply_submission(&mut self, outcome: Result<BookingConfirmation, ApiError>) {
        match outcome {
            Ok(confirmation) => {
                self.error = None;
                let message = if confirmation.message.trim().is_empty() {
                    BOOKING_SUCCESS_FALLBACK.to_string()
                } else {
                    confirmation.message
                };
                self.success = Some(message);
                self.step = WizardStep::Confirmed;
            }
            Err(ApiError::Rejected { detail, .. }) => {
                self.error =
                    Some(detail.unwrap_or_else(|| BOOKING_REJECTED_FALLBACK.to_string()));
            }
            Err(_) => {
                self.error = Some(BOOKING_TRANSPORT_ERROR.to_string());
            }
        }
    }

    /// Submitting with missing fields shows a message instead of silently
    /// doing nothing; unlike `advance`, the source flow surfaces this one.
    pub fn note_incomplete_submission(&mut self) {
        self.error = Some(INCOMPLETE_SUBMISSION_ERROR.to_string());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
