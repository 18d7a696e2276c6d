use crossterm::event::{Event, KeyCode, KeyEvent};
use navalha_core::dates::{format_iso_date, parse_iso_date};
use navalha_core::wizard::WizardStep;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::UiExit;
use crate::keymap;

use super::{BookFlow, BookFlowOps, ClientField, FlowSignal, ScheduleFocus};

impl BookFlow {
    pub(super) fn on_key(&mut self, key: KeyEvent, ops: &dyn BookFlowOps) -> FlowSignal {
        match self.wizard.step() {
            WizardStep::Service => self.on_key_service(key),
            WizardStep::Barber => self.on_key_barber(key),
            WizardStep::Schedule => self.on_key_schedule(key),
            WizardStep::Client => self.on_key_client(key, ops),
            WizardStep::Confirmed => self.on_key_confirmed(key),
        }
    }

    fn on_key_service(&mut self, key: KeyEvent) -> FlowSignal {
        if keymap::is_back(key) {
            return FlowSignal::Exit(UiExit::BackAtRoot);
        }

        if self.service_list.on_key(key) {
            return FlowSignal::Continue;
        }

        if keymap::is_toggle(key) {
            let service = self.catalog.services[self.service_list.selected()].clone();
            self.wizard.select_service(service);
            return FlowSignal::Continue;
        }

        if keymap::is_confirm(key) {
            self.wizard.advance();
        }

        FlowSignal::Continue
    }

    fn on_key_barber(&mut self, key: KeyEvent) -> FlowSignal {
        if keymap::is_back(key) {
            self.wizard.retreat();
            return FlowSignal::Continue;
        }

        if self.barber_list.on_key(key) {
            return FlowSignal::Continue;
        }

        if keymap::is_toggle(key) {
            let barber = self.catalog.barbers[self.barber_list.selected()].clone();
            self.wizard.select_barber(barber);
            // A date may already be entered from an earlier pass through the
            // schedule step; refresh availability for the new barber.
            self.begin_slot_fetch();
            return FlowSignal::Continue;
        }

        if keymap::is_confirm(key) {
            self.wizard.advance();
        }

        FlowSignal::Continue
    }

    fn on_key_schedule(&mut self, key: KeyEvent) -> FlowSignal {
        if keymap::is_back(key) {
            self.wizard.retreat();
            self.schedule_focus = ScheduleFocus::Date;
            return FlowSignal::Continue;
        }

        if keymap::is_field_switch(key) {
            self.schedule_focus = match self.schedule_focus {
                ScheduleFocus::Date => ScheduleFocus::Slots,
                ScheduleFocus::Slots => ScheduleFocus::Date,
            };
            return FlowSignal::Continue;
        }

        match self.schedule_focus {
            ScheduleFocus::Date => {
                if keymap::is_confirm(key) {
                    self.commit_date();
                    return FlowSignal::Continue;
                }

                if self.date_input.handle_event(&Event::Key(key)).is_some() {
                    self.date_error = None;
                }
                FlowSignal::Continue
            }
            ScheduleFocus::Slots => self.on_key_slot_grid(key),
        }
    }

    fn on_key_slot_grid(&mut self, key: KeyEvent) -> FlowSignal {
        // Nothing is selectable until the pending fetch resolves.
        if self.is_loading() {
            return FlowSignal::Continue;
        }

        let available = self.available_labels().len();

        if keymap::is_left(key) || keymap::is_up(key) {
            self.slot_cursor = self.slot_cursor.saturating_sub(1);
            return FlowSignal::Continue;
        }

        if (keymap::is_right(key) || keymap::is_down(key)) && self.slot_cursor + 1 < available {
            self.slot_cursor += 1;
            return FlowSignal::Continue;
        }

        if keymap::is_toggle(key) {
            let label = self
                .available_labels()
                .get(self.slot_cursor)
                .map(|label| (*label).to_string());
            if let Some(label) = label {
                let _ = self.wizard.select_time(&label);
            }
            return FlowSignal::Continue;
        }

        if keymap::is_confirm(key) {
            self.wizard.advance();
        }

        FlowSignal::Continue
    }

    fn commit_date(&mut self) {
        match parse_iso_date(self.date_input.value()) {
            Ok(date) => {
                self.date_error = None;
                self.date_input = Input::new(format_iso_date(date));
                self.wizard.select_date(date);
                self.begin_slot_fetch();
            }
            Err(error) => {
                self.date_error = Some(error.to_string());
            }
        }
    }

    fn on_key_client(&mut self, key: KeyEvent, ops: &dyn BookFlowOps) -> FlowSignal {
        if keymap::is_back(key) {
            self.wizard.retreat();
            return FlowSignal::Continue;
        }

        if keymap::is_field_switch(key) {
            self.client_field = self.client_field.next();
            return FlowSignal::Continue;
        }

        if self.client_field == ClientField::Consent && keymap::is_toggle(key) {
            let consent = !self.wizard.client().lgpd_consent;
            self.wizard.set_lgpd_consent(consent);
            return FlowSignal::Continue;
        }

        if keymap::is_confirm(key) {
            self.submit(ops);
            return FlowSignal::Continue;
        }

        match self.client_field {
            ClientField::Name => {
                if self.name_input.handle_event(&Event::Key(key)).is_some() {
                    self.wizard.set_client_name(self.name_input.value().to_string());
                }
            }
            ClientField::Email => {
                if self.email_input.handle_event(&Event::Key(key)).is_some() {
                    self.wizard
                        .set_client_email(self.email_input.value().to_string());
                }
            }
            ClientField::Phone => {
                if self.phone_input.handle_event(&Event::Key(key)).is_some() {
                    self.wizard
                        .set_client_phone(self.phone_input.value().to_string());
                }
            }
            ClientField::Consent => {}
        }

        FlowSignal::Continue
    }

    fn submit(&mut self, ops: &dyn BookFlowOps) {
        match self.wizard.submission_request() {
            Ok(request) => {
                let outcome = ops.submit(&self.catalog.api, &request);
                self.wizard.apply_submission(outcome);
            }
            Err(_) => self.wizard.note_incomplete_submission(),
        }
    }

    fn on_key_confirmed(&mut self, key: KeyEvent) -> FlowSignal {
        if matches!(key.code, KeyCode::Char('n')) {
            self.reset_for_new_booking();
            return FlowSignal::Continue;
        }

        if keymap::is_quit(key) {
            return FlowSignal::Exit(UiExit::Completed);
        }

        if keymap::is_confirm(key) || keymap::is_back(key) {
            return FlowSignal::Exit(UiExit::BackAtRoot);
        }

        FlowSignal::Continue
    }
}
