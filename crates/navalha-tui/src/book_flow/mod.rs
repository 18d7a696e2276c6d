mod keys;
mod render;

use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};

use anyhow::{Result, anyhow};
use crossterm::event::KeyEvent;
use navalha_app::{App, BookingCatalog};
use navalha_core::api::{ApiError, ApiSession};
use navalha_core::models::{
    BookingConfirmation, BookingRequest, Service, Slot, format_brl,
};
use navalha_core::wizard::BookingWizard;
use tui_input::Input;

use crate::UiExit;
use crate::ui::loading::{LoadingState, SlotLoadEvent, SlotLoader, SystemSlotLoader};
use crate::ui::select_list::SelectList;

pub(crate) trait BookFlowOps {
    fn prepare(&self) -> Result<BookingCatalog>;
    fn submit(
        &self,
        api: &ApiSession,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, ApiError>;
}

impl<'a> BookFlowOps for App<'a> {
    fn prepare(&self) -> Result<BookingCatalog> {
        self.booking_prepare()
    }

    fn submit(
        &self,
        api: &ApiSession,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, ApiError> {
        self.booking_submit(api, request)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScheduleFocus {
    Date,
    Slots,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClientField {
    Name,
    Email,
    Phone,
    Consent,
}

impl ClientField {
    fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Phone,
            Self::Phone => Self::Consent,
            Self::Consent => Self::Name,
        }
    }
}

struct PendingSlotFetch {
    token: u64,
    receiver: Receiver<SlotLoadEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowSignal {
    Continue,
    Exit(UiExit),
}

struct BookFlow {
    catalog: BookingCatalog,
    loader: Arc<dyn SlotLoader>,
    wizard: BookingWizard,
    service_list: SelectList,
    barber_list: SelectList,
    date_input: Input,
    date_error: Option<String>,
    schedule_focus: ScheduleFocus,
    slot_cursor: usize,
    client_field: ClientField,
    name_input: Input,
    email_input: Input,
    phone_input: Input,
    loading: LoadingState,
    pending_fetches: Vec<PendingSlotFetch>,
    active_fetch_token: Option<u64>,
    next_fetch_token: u64,
}

pub(crate) struct BookScreen {
    flow: BookFlow,
}

impl BookScreen {
    pub(crate) fn new(app: &App<'_>) -> Result<Self> {
        Ok(Self {
            flow: BookFlow::new(app)?,
        })
    }

    pub(crate) fn render(&self, frame: &mut ratatui::Frame<'_>) {
        self.flow.render(frame);
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent, app: &App<'_>) -> Result<Option<UiExit>> {
        match self.flow.on_key(key, app) {
            FlowSignal::Continue => Ok(None),
            FlowSignal::Exit(exit) => Ok(Some(exit)),
        }
    }

    pub(crate) fn on_tick(&mut self) {
        self.flow.on_tick();
    }

    pub(crate) fn should_drain_loader_after_input(&self) -> bool {
        self.flow.should_drain_loader_after_input()
    }
}

impl BookFlow {
    fn new(ops: &dyn BookFlowOps) -> Result<Self> {
        Self::new_with_loader(ops, Arc::new(SystemSlotLoader::new()))
    }

    fn new_with_loader(ops: &dyn BookFlowOps, loader: Arc<dyn SlotLoader>) -> Result<Self> {
        let catalog = ops.prepare()?;

        if catalog.services.is_empty() {
            return Err(anyhow!(
                "no services are available for online booking right now"
            ));
        }
        if catalog.barbers.is_empty() {
            return Err(anyhow!("no barbers are available for online booking right now"));
        }

        let service_list =
            SelectList::new(catalog.services.iter().map(service_row).collect());
        let barber_list =
            SelectList::new(catalog.barbers.iter().map(|barber| barber.name.clone()).collect());

        Ok(Self {
            catalog,
            loader,
            wizard: BookingWizard::new(),
            service_list,
            barber_list,
            date_input: Input::default(),
            date_error: None,
            schedule_focus: ScheduleFocus::Date,
            slot_cursor: 0,
            client_field: ClientField::Name,
            name_input: Input::default(),
            email_input: Input::default(),
            phone_input: Input::default(),
            loading: LoadingState::default(),
            pending_fetches: Vec::new(),
            active_fetch_token: None,
            next_fetch_token: 1,
        })
    }

    fn is_loading(&self) -> bool {
        self.active_fetch_token.is_some()
    }

    fn should_drain_loader_after_input(&self) -> bool {
        !self.pending_fetches.is_empty()
    }

    fn available_labels(&self) -> Vec<&str> {
        self.wizard
            .slots()
            .iter()
            .filter(|slot| slot.available)
            .map(|slot| slot.display_label.as_str())
            .collect()
    }

    fn begin_slot_fetch(&mut self) {
        let Some((barber_id, date)) = self.wizard.availability_query() else {
            return;
        };

        let token = self.next_fetch_token;
        self.next_fetch_token = self.next_fetch_token.saturating_add(1);
        self.active_fetch_token = Some(token);
        self.slot_cursor = 0;

        let receiver = self.loader.spawn_fetch(
            self.catalog.api.clone(),
            self.catalog.timeout,
            barber_id,
            date,
            token,
        );
        self.pending_fetches.push(PendingSlotFetch { token, receiver });
    }

    /// Drains finished fetches; only the event matching the active generation
    /// token touches the wizard, everything else is a stale response.
    fn on_tick(&mut self) {
        if self.pending_fetches.is_empty() {
            return;
        }

        self.loading.next_frame();

        let active = self.active_fetch_token;
        let mut finished = Vec::new();
        let mut applicable: Option<Result<Vec<Slot>, String>> = None;

        for (index, pending) in self.pending_fetches.iter().enumerate() {
            match pending.receiver.try_recv() {
                Ok(SlotLoadEvent::Done { token, result }) => {
                    finished.push(index);
                    if Some(token) == active {
                        applicable = Some(result);
                    }
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    finished.push(index);
                    if Some(pending.token) == active {
                        applicable = Some(Err("slot fetch worker disconnected".to_string()));
                    }
                }
            }
        }

        for index in finished.into_iter().rev() {
            self.pending_fetches.remove(index);
        }

        if let Some(result) = applicable {
            self.active_fetch_token = None;
            let fetched = result.is_ok();
            self.wizard.apply_slots(result);
            if fetched {
                self.schedule_focus = ScheduleFocus::Slots;
                self.slot_cursor = 0;
            }
        }
    }

    fn reset_for_new_booking(&mut self) {
        self.wizard.reset();
        self.service_list =
            SelectList::new(self.catalog.services.iter().map(service_row).collect());
        self.barber_list = SelectList::new(
            self.catalog
                .barbers
                .iter()
                .map(|barber| barber.name.clone())
                .collect(),
        );
        self.date_input = Input::default();
        self.date_error = None;
        self.schedule_focus = ScheduleFocus::Date;
        self.slot_cursor = 0;
        self.client_field = ClientField::Name;
        self.name_input = Input::default();
        self.email_input = Input::default();
        self.phone_input = Input::default();
        self.active_fetch_token = None;
    }
}

fn service_row(service: &Service) -> String {
    format!(
        "{} — {} ({} min)",
        service.name,
        format_brl(service.price_centavos),
        service.duration_minutes
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::mpsc::{self, Sender};
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use navalha_core::models::{Barber, ClientDetails};
    use navalha_core::wizard::{SLOTS_FETCH_ERROR, WizardStep};

    use super::*;

    struct ScriptedOps {
        catalog: BookingCatalog,
        submit_results: Mutex<Vec<Result<BookingConfirmation, ApiError>>>,
        submitted: Mutex<Vec<BookingRequest>>,
    }

    impl ScriptedOps {
        fn new(submit_results: Vec<Result<BookingConfirmation, ApiError>>) -> Self {
            Self {
                catalog: catalog(),
                submit_results: Mutex::new(submit_results),
                submitted: Mutex::new(Vec::new()),
            }
        }

        fn submitted(&self) -> Vec<BookingRequest> {
            self.submitted.lock().expect("submitted lock").clone()
        }
    }

    impl BookFlowOps for ScriptedOps {
        fn prepare(&self) -> Result<BookingCatalog> {
            Ok(self.catalog.clone())
        }

        fn submit(
            &self,
            _api: &ApiSession,
            request: &BookingRequest,
        ) -> Result<BookingConfirmation, ApiError> {
            self.submitted
                .lock()
                .expect("submitted lock")
                .push(request.clone());
            self.submit_results
                .lock()
                .expect("results lock")
                .remove(0)
        }
    }

    struct RecordedFetch {
        token: u64,
        barber_id: i64,
        date: String,
        sender: Sender<SlotLoadEvent>,
    }

    #[derive(Default)]
    struct ScriptedLoader {
        fetches: Mutex<Vec<RecordedFetch>>,
    }

    impl ScriptedLoader {
        fn fetch_count(&self) -> usize {
            self.fetches.lock().expect("fetches lock").len()
        }

        fn fetch_target(&self, index: usize) -> (i64, String) {
            let fetches = self.fetches.lock().expect("fetches lock");
            (fetches[index].barber_id, fetches[index].date.clone())
        }

        fn complete(&self, index: usize, result: Result<Vec<Slot>, String>) {
            let fetches = self.fetches.lock().expect("fetches lock");
            let fetch = &fetches[index];
            fetch
                .sender
                .send(SlotLoadEvent::Done {
                    token: fetch.token,
                    result,
                })
                .expect("send slot event");
        }
    }

    impl SlotLoader for ScriptedLoader {
        fn spawn_fetch(
            &self,
            _api: ApiSession,
            _timeout: Duration,
            barber_id: i64,
            date: String,
            token: u64,
        ) -> Receiver<SlotLoadEvent> {
            let (sender, receiver) = mpsc::channel();
            self.fetches.lock().expect("fetches lock").push(RecordedFetch {
                token,
                barber_id,
                date,
                sender,
            });
            receiver
        }
    }

    fn catalog() -> BookingCatalog {
        BookingCatalog {
            services: vec![
                Service {
                    id: 7,
                    name: "Corte Masculino".to_string(),
                    description: None,
                    price_centavos: 4500,
                    duration_minutes: 30,
                    active: true,
                },
                Service {
                    id: 3,
                    name: "Barba".to_string(),
                    description: None,
                    price_centavos: 2550,
                    duration_minutes: 20,
                    active: true,
                },
            ],
            barbers: vec![Barber {
                id: 2,
                name: "Joe".to_string(),
                email: None,
                active: true,
            }],
            api: ApiSession::new("http://localhost:8000"),
            timeout: Duration::from_secs(10),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn slot(label: &str, available: bool) -> Slot {
        Slot {
            iso_date_time: format!("2024-06-01T{label}:00"),
            display_label: label.to_string(),
            available,
        }
    }

    fn type_text(flow: &mut BookFlow, ops: &dyn BookFlowOps, text: &str) {
        for character in text.chars() {
            let _ = flow.on_key(key(KeyCode::Char(character)), ops);
        }
    }

    fn flow_with(ops: &ScriptedOps, loader: &Arc<ScriptedLoader>) -> BookFlow {
        BookFlow::new_with_loader(ops, Arc::clone(loader) as Arc<dyn SlotLoader>)
            .expect("flow")
    }

    /// Drives the flow to the schedule step with service and barber chosen.
    fn flow_at_schedule(ops: &ScriptedOps, loader: &Arc<ScriptedLoader>) -> BookFlow {
        let mut flow = flow_with(ops, loader);
        let _ = flow.on_key(key(KeyCode::Char(' ')), ops);
        let _ = flow.on_key(key(KeyCode::Enter), ops);
        let _ = flow.on_key(key(KeyCode::Char(' ')), ops);
        let _ = flow.on_key(key(KeyCode::Enter), ops);
        assert_eq!(flow.wizard.step(), WizardStep::Schedule);
        flow
    }

    fn enter_date(flow: &mut BookFlow, ops: &ScriptedOps, date: &str) {
        type_text(flow, ops, date);
        let _ = flow.on_key(key(KeyCode::Enter), ops);
    }

    fn flow_at_client(
        ops: &ScriptedOps,
        loader: &Arc<ScriptedLoader>,
    ) -> BookFlow {
        let mut flow = flow_at_schedule(ops, loader);
        enter_date(&mut flow, ops, "2024-06-01");
        loader.complete(0, Ok(vec![slot("09:00", true), slot("09:30", false)]));
        flow.on_tick();
        let _ = flow.on_key(key(KeyCode::Char(' ')), ops);
        let _ = flow.on_key(key(KeyCode::Enter), ops);
        assert_eq!(flow.wizard.step(), WizardStep::Client);
        flow
    }

    fn fill_client_details(flow: &mut BookFlow, ops: &ScriptedOps) {
        type_text(flow, ops, "Maria Silva");
        let _ = flow.on_key(key(KeyCode::Tab), ops);
        type_text(flow, ops, "maria@example.com");
        let _ = flow.on_key(key(KeyCode::Tab), ops);
        type_text(flow, ops, "11 99999-0000");
        let _ = flow.on_key(key(KeyCode::Tab), ops);
        let _ = flow.on_key(key(KeyCode::Char(' ')), ops);
    }

    #[test]
    fn enter_without_selection_stays_on_the_service_step() {
        let ops = ScriptedOps::new(Vec::new());
        let loader = Arc::new(ScriptedLoader::default());
        let mut flow = flow_with(&ops, &loader);

        let _ = flow.on_key(key(KeyCode::Enter), &ops);
        assert_eq!(flow.wizard.step(), WizardStep::Service);

        let _ = flow.on_key(key(KeyCode::Char(' ')), &ops);
        let _ = flow.on_key(key(KeyCode::Enter), &ops);
        assert_eq!(flow.wizard.step(), WizardStep::Barber);
    }

    #[test]
    fn space_selects_the_highlighted_service() {
        let ops = ScriptedOps::new(Vec::new());
        let loader = Arc::new(ScriptedLoader::default());
        let mut flow = flow_with(&ops, &loader);

        let _ = flow.on_key(key(KeyCode::Char('j')), &ops);
        let _ = flow.on_key(key(KeyCode::Char(' ')), &ops);

        assert_eq!(flow.wizard.service().expect("service").name, "Barba");
    }

    #[test]
    fn committing_a_date_spawns_an_availability_fetch() {
        let ops = ScriptedOps::new(Vec::new());
        let loader = Arc::new(ScriptedLoader::default());
        let mut flow = flow_at_schedule(&ops, &loader);

        enter_date(&mut flow, &ops, "2024-06-01");

        assert!(flow.is_loading());
        assert_eq!(loader.fetch_count(), 1);
        assert_eq!(loader.fetch_target(0), (2, "2024-06-01".to_string()));
    }

    #[test]
    fn malformed_date_is_rejected_without_a_fetch() {
        let ops = ScriptedOps::new(Vec::new());
        let loader = Arc::new(ScriptedLoader::default());
        let mut flow = flow_at_schedule(&ops, &loader);

        enter_date(&mut flow, &ops, "junho 1");

        assert!(flow.date_error.is_some());
        assert_eq!(loader.fetch_count(), 0);
        assert_eq!(flow.wizard.date(), None);
    }

    #[test]
    fn completed_fetch_loads_slots_and_moves_focus_to_the_grid() {
        let ops = ScriptedOps::new(Vec::new());
        let loader = Arc::new(ScriptedLoader::default());
        let mut flow = flow_at_schedule(&ops, &loader);

        enter_date(&mut flow, &ops, "2024-06-01");
        loader.complete(0, Ok(vec![slot("09:00", true), slot("09:30", false)]));
        flow.on_tick();

        assert!(!flow.is_loading());
        assert_eq!(flow.wizard.slots().len(), 2);
        assert_eq!(flow.schedule_focus, ScheduleFocus::Slots);
        assert_eq!(flow.available_labels(), vec!["09:00"]);
    }

    #[test]
    fn slots_cannot_be_selected_while_a_fetch_is_outstanding() {
        let ops = ScriptedOps::new(Vec::new());
        let loader = Arc::new(ScriptedLoader::default());
        let mut flow = flow_at_schedule(&ops, &loader);

        enter_date(&mut flow, &ops, "2024-06-01");
        let _ = flow.on_key(key(KeyCode::Tab), &ops);
        let _ = flow.on_key(key(KeyCode::Char(' ')), &ops);

        assert_eq!(flow.wizard.time(), None);
    }

    #[test]
    fn stale_fetch_results_are_discarded_by_generation_token() {
        let ops = ScriptedOps::new(Vec::new());
        let loader = Arc::new(ScriptedLoader::default());
        let mut flow = flow_at_schedule(&ops, &loader);

        enter_date(&mut flow, &ops, "2024-06-01");

        // The user changes the date before the first fetch resolves.
        assert_eq!(flow.schedule_focus, ScheduleFocus::Date);
        for _ in 0.."2024-06-01".len() {
            let _ = flow.on_key(key(KeyCode::Backspace), &ops);
        }
        enter_date(&mut flow, &ops, "2024-06-02");
        assert_eq!(loader.fetch_count(), 2);

        // The older fetch lands first and must not touch the wizard.
        loader.complete(0, Ok(vec![slot("08:00", true)]));
        flow.on_tick();
        assert!(flow.wizard.slots().is_empty());
        assert!(flow.is_loading());

        loader.complete(1, Ok(vec![slot("10:00", true)]));
        flow.on_tick();
        assert_eq!(flow.available_labels(), vec!["10:00"]);
        assert!(!flow.is_loading());
    }

    #[test]
    fn failed_fetch_keeps_previous_slots_and_reports_generic_error() {
        let ops = ScriptedOps::new(Vec::new());
        let loader = Arc::new(ScriptedLoader::default());
        let mut flow = flow_at_schedule(&ops, &loader);

        enter_date(&mut flow, &ops, "2024-06-01");
        loader.complete(0, Ok(vec![slot("09:00", true)]));
        flow.on_tick();

        let _ = flow.on_key(key(KeyCode::Tab), &ops);
        for _ in 0.."2024-06-01".len() {
            let _ = flow.on_key(key(KeyCode::Backspace), &ops);
        }
        enter_date(&mut flow, &ops, "2024-06-02");
        loader.complete(1, Err("connection refused".to_string()));
        flow.on_tick();

        assert_eq!(flow.wizard.error(), Some(SLOTS_FETCH_ERROR));
        assert_eq!(flow.wizard.slots().len(), 1, "stale list is retained");
    }

    #[test]
    fn changing_barber_clears_chosen_time_and_refetches_for_the_set_date() {
        let ops = ScriptedOps::new(Vec::new());
        let loader = Arc::new(ScriptedLoader::default());
        let mut flow = flow_at_schedule(&ops, &loader);

        enter_date(&mut flow, &ops, "2024-06-01");
        loader.complete(0, Ok(vec![slot("09:00", true)]));
        flow.on_tick();
        let _ = flow.on_key(key(KeyCode::Char(' ')), &ops);
        assert_eq!(flow.wizard.time(), Some("09:00"));

        let _ = flow.on_key(key(KeyCode::Esc), &ops);
        assert_eq!(flow.wizard.step(), WizardStep::Barber);
        let _ = flow.on_key(key(KeyCode::Char(' ')), &ops);

        assert_eq!(flow.wizard.time(), None);
        assert!(flow.wizard.slots().is_empty());
        assert_eq!(loader.fetch_count(), 2, "barber change refetches availability");
    }

    #[test]
    fn incomplete_submission_reports_the_source_message() {
        let ops = ScriptedOps::new(Vec::new());
        let loader = Arc::new(ScriptedLoader::default());
        let mut flow = flow_at_client(&ops, &loader);

        let _ = flow.on_key(key(KeyCode::Enter), &ops);

        assert_eq!(
            flow.wizard.error(),
            Some(navalha_core::wizard::INCOMPLETE_SUBMISSION_ERROR)
        );
        assert!(ops.submitted().is_empty());
    }

    #[test]
    fn successful_submission_reaches_the_confirmed_screen() {
        let ops = ScriptedOps::new(vec![Ok(BookingConfirmation {
            message: "Agendamento criado com sucesso!".to_string(),
            appointment_id: Some(11),
            client_name: None,
            barber_name: None,
            service_name: None,
            date_time: None,
            amount: None,
        })]);
        let loader = Arc::new(ScriptedLoader::default());
        let mut flow = flow_at_client(&ops, &loader);

        fill_client_details(&mut flow, &ops);
        let _ = flow.on_key(key(KeyCode::Enter), &ops);

        assert_eq!(flow.wizard.step(), WizardStep::Confirmed);
        assert_eq!(
            flow.wizard.success(),
            Some("Agendamento criado com sucesso!")
        );

        let submitted = ops.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].date_time, "2024-06-01T09:00:00");
        assert_eq!(
            submitted[0].client,
            ClientDetails {
                name: "Maria Silva".to_string(),
                email: "maria@example.com".to_string(),
                phone: "11 99999-0000".to_string(),
                lgpd_consent: true,
            }
        );
    }

    #[test]
    fn rejected_submission_keeps_the_flow_on_the_client_step() {
        let ops = ScriptedOps::new(vec![Err(ApiError::Rejected {
            url: "http://localhost:8000/api/public/book-appointment".to_string(),
            status: 409,
            detail: Some("Horário não disponível".to_string()),
        })]);
        let loader = Arc::new(ScriptedLoader::default());
        let mut flow = flow_at_client(&ops, &loader);

        fill_client_details(&mut flow, &ops);
        let _ = flow.on_key(key(KeyCode::Enter), &ops);

        assert_eq!(flow.wizard.step(), WizardStep::Client);
        assert_eq!(flow.wizard.error(), Some("Horário não disponível"));
        assert_eq!(flow.wizard.time(), Some("09:00"));
    }

    #[test]
    fn new_booking_from_the_confirmed_screen_resets_everything() {
        let ops = ScriptedOps::new(vec![Ok(BookingConfirmation {
            message: String::new(),
            appointment_id: None,
            client_name: None,
            barber_name: None,
            service_name: None,
            date_time: None,
            amount: None,
        })]);
        let loader = Arc::new(ScriptedLoader::default());
        let mut flow = flow_at_client(&ops, &loader);

        fill_client_details(&mut flow, &ops);
        let _ = flow.on_key(key(KeyCode::Enter), &ops);
        assert_eq!(flow.wizard.step(), WizardStep::Confirmed);

        let _ = flow.on_key(key(KeyCode::Char('n')), &ops);

        assert_eq!(flow.wizard, BookingWizard::new());
        assert_eq!(flow.date_input.value(), "");
        assert_eq!(flow.name_input.value(), "");
        assert_eq!(flow.client_field, ClientField::Name);
    }

    #[test]
    fn confirmed_screen_exits_back_to_home_on_enter() {
        let ops = ScriptedOps::new(vec![Ok(BookingConfirmation {
            message: String::new(),
            appointment_id: None,
            client_name: None,
            barber_name: None,
            service_name: None,
            date_time: None,
            amount: None,
        })]);
        let loader = Arc::new(ScriptedLoader::default());
        let mut flow = flow_at_client(&ops, &loader);

        fill_client_details(&mut flow, &ops);
        let _ = flow.on_key(key(KeyCode::Enter), &ops);

        assert_eq!(
            flow.on_key(key(KeyCode::Enter), &ops),
            FlowSignal::Exit(UiExit::BackAtRoot)
        );
    }

    #[test]
    fn esc_on_the_first_step_returns_to_the_root_menu() {
        let ops = ScriptedOps::new(Vec::new());
        let loader = Arc::new(ScriptedLoader::default());
        let mut flow = flow_with(&ops, &loader);

        assert_eq!(
            flow.on_key(key(KeyCode::Esc), &ops),
            FlowSignal::Exit(UiExit::BackAtRoot)
        );
    }
}
