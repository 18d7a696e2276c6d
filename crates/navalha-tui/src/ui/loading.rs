use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use navalha_core::api::{ApiSession, public};
use navalha_core::models::Slot;
use navalha_core::transport::ReqwestTransport;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;

use crate::theme;
use crate::ui::text::wrapped_paragraph;

const FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

#[derive(Debug, Clone, Default)]
pub(crate) struct LoadingState {
    frame_index: usize,
}

impl LoadingState {
    pub(crate) fn next_frame(&mut self) {
        self.frame_index = (self.frame_index + 1) % FRAMES.len();
    }

    fn current_frame(&self) -> &'static str {
        FRAMES[self.frame_index]
    }
}

#[derive(Debug)]
pub(crate) enum SlotLoadEvent {
    Done {
        token: u64,
        result: Result<Vec<Slot>, String>,
    },
}

/// Availability fetches run off the UI thread; every fetch carries the
/// generation token it was spawned with so late responses can be recognized
/// and dropped.
pub(crate) trait SlotLoader: Send + Sync {
    fn spawn_fetch(
        &self,
        api: ApiSession,
        timeout: Duration,
        barber_id: i64,
        date: String,
        token: u64,
    ) -> Receiver<SlotLoadEvent>;
}

#[derive(Debug, Default)]
pub(crate) struct SystemSlotLoader;

impl SystemSlotLoader {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl SlotLoader for SystemSlotLoader {
    fn spawn_fetch(
        &self,
        api: ApiSession,
        timeout: Duration,
        barber_id: i64,
        date: String,
        token: u64,
    ) -> Receiver<SlotLoadEvent> {
        let (sender, receiver) = mpsc::channel();
        std::thread::spawn(move || {
            let result = ReqwestTransport::new(timeout)
                .map_err(|error| format!("{error:#}"))
                .and_then(|transport| {
                    public::fetch_availability(&transport, &api, barber_id, &date)
                        .map_err(|error| format!("{error:#}"))
                });
            let _ = sender.send(SlotLoadEvent::Done { token, result });
        });
        receiver
    }
}

pub(crate) fn render_loading_box(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    message: &str,
    loading: &LoadingState,
) {
    let body = vec![
        Line::from(""),
        Line::from(format!("{} {}", loading.current_frame(), message)),
    ];
    frame.render_widget(
        wrapped_paragraph(body).block(theme::chrome(crate::ui::text::focus_line(title))),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::{FRAMES, LoadingState};

    #[test]
    fn spinner_wraps_around_its_frames() {
        let mut loading = LoadingState::default();
        for _ in 0..FRAMES.len() {
            loading.next_frame();
        }
        assert_eq!(loading.current_frame(), FRAMES[0]);
    }
}
