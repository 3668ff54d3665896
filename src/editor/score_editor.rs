// Score editor facade
// Ties the page, staff geometry, gestures, and playback together and
// reports what it does on the notification channel

use crate::config::EditorConfig;
use crate::editor::snapper::{DragSnapper, SnapCandidate};
use crate::geometry::metrics::GlyphMetrics;
use crate::geometry::staff::StaffLayout;
use crate::gesture::recognizer::{StrokeAction, StrokeRecognizer};
use crate::gesture::scratch::try_scratch_out;
use crate::gesture::stroke::Stroke;
use crate::messaging::channels::{SharedNotificationProducer, push_notification};
use crate::messaging::notification::{Notification, NotificationCategory};
use crate::playback::scheduler::{self, PlaybackHandle};
use crate::playback::state::PlaybackState;
use crate::playback::timeline::build_timeline;
use crate::playback::port::SoundPort;
use crate::score::duration::NoteDuration;
use crate::score::page::Page;
use crate::score::symbol::{Accidental, Symbol, SymbolId};
use std::io;
use std::sync::Arc;

/// State carried across one drag, pointer press to release
struct DragSession {
    symbol_id: SymbolId,
    snapper: DragSnapper,
    /// Staff the symbol was over on the previous move; a change
    /// releases the snap lock
    last_staff_top: Option<i32>,
}

pub struct ScoreEditor {
    page: Page,
    layout: StaffLayout,
    metrics: GlyphMetrics,
    config: EditorConfig,
    recognizer: Option<Box<dyn StrokeRecognizer>>,
    drag: Option<DragSession>,
    playback: Option<PlaybackHandle>,
    notifications: SharedNotificationProducer,
}

impl ScoreEditor {
    pub fn new(notifications: SharedNotificationProducer) -> Self {
        Self::with_config(EditorConfig::default(), notifications)
    }

    pub fn with_config(config: EditorConfig, notifications: SharedNotificationProducer) -> Self {
        Self {
            page: Page::new(),
            layout: StaffLayout::default(),
            metrics: GlyphMetrics::default(),
            config,
            recognizer: None,
            drag: None,
            playback: None,
            notifications,
        }
    }

    /// Installs the stroke matcher used by `finish_stroke`
    pub fn set_recognizer(&mut self, recognizer: Box<dyn StrokeRecognizer>) {
        self.recognizer = Some(recognizer);
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn layout(&self) -> &StaffLayout {
        &self.layout
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ---- placement ----

    /// Places a note centered on the click point, then commits it:
    /// the pitch is computed and the glyph pulled onto the nearest
    /// line or gap.
    pub fn place_note(&mut self, x: i32, y: i32, duration: NoteDuration) -> SymbolId {
        let mut symbol = Symbol::note(x, y, duration);
        let (width, height) = self.metrics.size_of(&symbol);
        symbol.x = x - width / 2;
        symbol.y = y - height / 2;
        let id = self.page.add(symbol);
        self.commit_note(id);
        self.push_pitch_status(id);
        id
    }

    /// Places a rest centered on the click point and commits it onto
    /// the midline of the nearest staff
    pub fn place_rest(&mut self, x: i32, y: i32, duration: NoteDuration) -> SymbolId {
        let mut symbol = Symbol::rest(x, y, duration);
        let (width, height) = self.metrics.size_of(&symbol);
        symbol.x = x - width / 2;
        symbol.y = y - height / 2;
        let id = self.page.add(symbol);
        self.commit_rest(id);
        id
    }

    // ---- dragging ----

    /// Hit-tests the point against glyph boxes, topmost symbol first,
    /// and starts dragging the hit symbol
    pub fn begin_drag_at(&mut self, x: i32, y: i32) -> Option<SymbolId> {
        let id = self
            .page
            .symbols()
            .iter()
            .rev()
            .find(|s| self.metrics.bounds(s).contains(x, y))
            .map(|s| s.id)?;
        self.begin_drag(id).then_some(id)
    }

    pub fn begin_drag(&mut self, id: SymbolId) -> bool {
        let Some(symbol) = self.page.get(id) else {
            return false;
        };
        let pitch_status = symbol.is_note().then(|| symbol.display_pitch());

        self.drag = Some(DragSession {
            symbol_id: id,
            snapper: DragSnapper::new(self.config.unsnap_dx_px),
            last_staff_top: None,
        });

        if let Some(display) = pitch_status {
            self.push_status(NotificationCategory::System, format!("Pitch: {display}"));
        }
        true
    }

    /// Moves the dragged symbol under the pointer and returns the live
    /// pitch readout for notes. Notes run through the snap lock; rests
    /// just follow the pointer.
    pub fn drag_to(&mut self, pointer_x: i32, pointer_y: i32) -> Option<&'static str> {
        let symbol_id = self.drag.as_ref()?.symbol_id;
        let Some(snapshot) = self.page.get(symbol_id).cloned() else {
            self.drag = None;
            return None;
        };
        let (width, height) = self.metrics.size_of(&snapshot);

        if snapshot.is_rest() {
            if let Some(symbol) = self.page.get_mut(symbol_id) {
                symbol.x = pointer_x - width / 2;
                symbol.y = pointer_y - height / 2;
            }
            return None;
        }

        let half_w = width / 2;
        let half_h = height / 2;
        let line_spacing = self.layout.line_spacing();
        let candidates = self.snap_candidates(&snapshot);

        // Candidate staff from the pre-move position; crossing onto
        // another staff releases the lock before the move is applied
        let glyph_center_y = snapshot.y + height / 2;
        let staff_top_now = self.layout.nearest_staff_top(glyph_center_y);

        let session = self.drag.as_mut()?;
        match session.last_staff_top {
            None => session.last_staff_top = Some(staff_top_now),
            Some(previous) if previous != staff_top_now => {
                session.snapper.reset();
                session.last_staff_top = Some(staff_top_now);
            }
            Some(_) => {}
        }

        session.snapper.on_drag_move(pointer_x, half_w, &candidates);
        let new_x = session
            .snapper
            .snapped_x()
            .unwrap_or(pointer_x - half_w);
        let new_y = pointer_y - half_h;

        let symbol = self.page.get_mut(symbol_id)?;
        symbol.x = new_x;
        symbol.y = new_y;
        let head_y = self.metrics.head_center_y(symbol, line_spacing);
        let pitch = self.layout.pitch_for_y(head_y);
        symbol.set_pitch(pitch);
        pitch
    }

    /// Ends the drag and commits the symbol's resting place. For notes
    /// the committed pitch is returned.
    pub fn end_drag(&mut self) -> Option<&'static str> {
        let session = self.drag.take()?;
        let is_note = self.page.get(session.symbol_id)?.is_note();

        if is_note {
            let pitch = self.commit_note(session.symbol_id);
            self.push_pitch_status(session.symbol_id);
            pitch
        } else {
            self.commit_rest(session.symbol_id);
            None
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pitch from the notehead position, then the vertical snap. The
    /// pitch reads the pre-snap position so the readout matches what
    /// the user released.
    fn commit_note(&mut self, id: SymbolId) -> Option<&'static str> {
        let snapshot = self.page.get(id)?.clone();
        let (_, height) = self.metrics.size_of(&snapshot);
        let line_spacing = self.layout.line_spacing();

        let head_y = self.metrics.head_center_y(&snapshot, line_spacing);
        let pitch = self.layout.pitch_for_y(head_y);

        let staff_top = self.layout.nearest_staff_top(head_y);
        let snapped_head = self
            .layout
            .snap_y(head_y, staff_top, self.layout.snap_tolerance());

        let symbol = self.page.get_mut(id)?;
        symbol.set_pitch(pitch);
        symbol.y = snapped_head - (height - line_spacing / 2);
        pitch
    }

    /// Centers the rest glyph on the midline of the nearest staff
    fn commit_rest(&mut self, id: SymbolId) {
        let Some(snapshot) = self.page.get(id).cloned() else {
            return;
        };
        let (_, height) = self.metrics.size_of(&snapshot);
        let center_y = snapshot.y + height / 2;
        let staff_top = self.layout.nearest_staff_top(center_y);
        let mid_y = staff_top + self.layout.staff_height / 2;

        if let Some(symbol) = self.page.get_mut(id) {
            symbol.y = mid_y - height / 2;
        }
    }

    /// Notes on the same staff as the dragged one, by notehead band,
    /// excluding the dragged note itself
    fn snap_candidates(&self, dragged: &Symbol) -> Vec<SnapCandidate> {
        let line_spacing = self.layout.line_spacing();
        let dragged_head = self.metrics.head_center_y(dragged, line_spacing);
        let staff_top = self.layout.staff_top_for_band(dragged_head);
        let staff_bottom = staff_top + self.layout.staff_height;
        let half_gap = self.layout.staff_spacing / 2;

        self.page
            .symbols()
            .iter()
            .filter(|s| s.is_note() && s.id != dragged.id)
            .filter(|s| {
                let head = self.metrics.head_center_y(s, line_spacing);
                head >= staff_top - half_gap && head <= staff_bottom + half_gap
            })
            .map(|s| SnapCandidate {
                id: s.id,
                x: s.x,
                width: self.metrics.width_of(s),
            })
            .collect()
    }

    // ---- pen strokes ----

    /// Handles a finished pen stroke: scratch-out first, then the
    /// template recognizer
    pub fn finish_stroke(&mut self, stroke: &Stroke) {
        if stroke.is_empty() {
            return;
        }

        if let Some(outcome) =
            try_scratch_out(&mut self.page, stroke, &self.metrics, &self.config.scratch)
        {
            self.push_status(NotificationCategory::Gesture, outcome.status_message());
            return;
        }

        let Some(recognition) = self
            .recognizer
            .as_ref()
            .and_then(|r| r.recognize(stroke))
        else {
            self.push_warning(
                NotificationCategory::Gesture,
                "Unrecognized gesture: no match found.".to_string(),
            );
            return;
        };

        // Recognized symbols land at the raw stroke start, uncentered
        // and uncommitted; a later drag gives them a pitch
        let Some(start) = stroke.first() else {
            return;
        };
        let x = start.x as i32;
        let y = start.y as i32;
        let name = recognition.name;

        match StrokeAction::from_template(&name) {
            StrokeAction::PlaceNote(duration) => {
                self.page.add(Symbol::note(x, y, duration));
                self.push_status(
                    NotificationCategory::Gesture,
                    format!("Recognized: {name} → Note added at ({x}, {y})"),
                );
            }
            StrokeAction::PlaceRest(duration) => {
                self.page.add(Symbol::rest(x, y, duration));
                self.push_status(
                    NotificationCategory::Gesture,
                    format!("Recognized: {name} → Rest added at ({x}, {y})"),
                );
            }
            StrokeAction::AttachSharp => self.attach_recognized(&name, x, y, Accidental::Sharp),
            StrokeAction::AttachFlat => self.attach_recognized(&name, x, y, Accidental::Flat),
            StrokeAction::NoMatch => {
                self.push_status(
                    NotificationCategory::Gesture,
                    format!("Recognized: {name} (no matching action)"),
                );
            }
        }
    }

    fn attach_recognized(&mut self, name: &str, x: i32, y: i32, accidental: Accidental) {
        match self.find_note_at(x, y) {
            Some(id) => {
                if let Some(symbol) = self.page.get_mut(id) {
                    symbol.set_accidental(accidental);
                }
                let pitch = self
                    .page
                    .get(id)
                    .and_then(|s| s.pitch())
                    .unwrap_or("?");
                self.push_status(
                    NotificationCategory::Gesture,
                    format!("Recognized: {name} → applied to note {pitch}"),
                );
            }
            None => {
                self.push_warning(
                    NotificationCategory::Gesture,
                    format!("Recognized {name} but not over a note → ignored."),
                );
            }
        }
    }

    // ---- accidentals ----

    /// Drops an accidental at a point. Attaches to the first note, in
    /// placement order, whose glyph box contains the point.
    pub fn attach_accidental(&mut self, x: i32, y: i32, accidental: Accidental) -> bool {
        if accidental == Accidental::None {
            return false;
        }

        let Some(id) = self.find_note_at(x, y) else {
            self.push_warning(
                NotificationCategory::System,
                "Canceled: no note hit.".to_string(),
            );
            return false;
        };

        if let Some(symbol) = self.page.get_mut(id) {
            symbol.set_accidental(accidental);
        }
        self.push_pitch_status(id);
        true
    }

    fn find_note_at(&self, x: i32, y: i32) -> Option<SymbolId> {
        self.page
            .symbols()
            .iter()
            .find(|s| s.is_note() && self.metrics.bounds(s).contains(x, y))
            .map(|s| s.id)
    }

    // ---- playback ----

    /// Builds the timeline for the current page and starts it on a
    /// worker thread. Returns Ok(false) without side effects when a
    /// run is already in progress.
    pub fn play<P>(&mut self, port: P) -> io::Result<bool>
    where
        P: SoundPort + 'static,
    {
        if self.playback.as_ref().is_some_and(|h| h.is_running()) {
            return Ok(false);
        }

        let timeline = build_timeline(self.page.symbols(), self.config.chord_tolerance_px);
        self.push_status(NotificationCategory::Playback, "Playing...".to_string());

        let finish_tx = Arc::clone(&self.notifications);
        let handle = scheduler::spawn(timeline, port, move || {
            push_notification(
                &finish_tx,
                Notification::info(NotificationCategory::Playback, "Ready".to_string()),
            );
        })?;

        self.playback = Some(handle);
        Ok(true)
    }

    /// Requests cancellation of the current run, if any
    pub fn stop(&mut self) {
        if let Some(handle) = &self.playback {
            if handle.is_running() {
                self.push_status(NotificationCategory::Playback, "Stopped.".to_string());
                handle.request_cancel();
            }
        }
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback
            .as_ref()
            .map(|h| h.state())
            .unwrap_or(PlaybackState::Idle)
    }

    /// Blocks until the current run ends
    pub fn wait_for_playback(&mut self) {
        if let Some(handle) = &mut self.playback {
            handle.join();
        }
    }

    // ---- status ----

    fn push_pitch_status(&self, id: SymbolId) {
        if let Some(symbol) = self.page.get(id) {
            self.push_status(
                NotificationCategory::System,
                format!("Pitch: {}", symbol.display_pitch()),
            );
        }
    }

    fn push_status(&self, category: NotificationCategory, message: String) {
        push_notification(&self.notifications, Notification::info(category, message));
    }

    fn push_warning(&self, category: NotificationCategory, message: String) {
        push_notification(&self.notifications, Notification::warning(category, message));
    }
}
