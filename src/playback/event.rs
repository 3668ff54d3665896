// Timed playback events

/// What a timeline entry does to the sounding set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayEventKind {
    Start,
    Stop,
}

/// One scheduled action, `at_ms` relative to playback start
#[derive(Debug, Clone, PartialEq)]
pub struct PlayEvent {
    pub at_ms: u64,
    pub kind: PlayEventKind,
    pub note_names: Vec<String>,
}

impl PlayEvent {
    /// A chord start; every name begins sounding together
    pub fn start(at_ms: u64, note_names: Vec<String>) -> Self {
        Self {
            at_ms,
            kind: PlayEventKind::Start,
            note_names,
        }
    }

    /// A single note release
    pub fn stop(at_ms: u64, note_name: String) -> Self {
        Self {
            at_ms,
            kind: PlayEventKind::Stop,
            note_names: vec![note_name],
        }
    }
}

/// Orders events by time, stops before starts at equal times. The sort
/// is stable so same-kind events keep their build order.
pub fn sort_timeline(events: &mut [PlayEvent]) {
    events.sort_by(|a, b| {
        let rank = |e: &PlayEvent| match e.kind {
            PlayEventKind::Stop => 0u8,
            PlayEventKind::Start => 1u8,
        };
        (a.at_ms, rank(a)).cmp(&(b.at_ms, rank(b)))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_sorts_before_start_at_same_time() {
        let mut events = vec![
            PlayEvent::start(400, vec!["C4".to_string()]),
            PlayEvent::stop(400, "G4".to_string()),
            PlayEvent::start(0, vec!["G4".to_string()]),
        ];
        sort_timeline(&mut events);

        assert_eq!(events[0].kind, PlayEventKind::Start);
        assert_eq!(events[0].at_ms, 0);
        assert_eq!(events[1].kind, PlayEventKind::Stop);
        assert_eq!(events[1].at_ms, 400);
        assert_eq!(events[2].kind, PlayEventKind::Start);
        assert_eq!(events[2].at_ms, 400);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut events = vec![
            PlayEvent::stop(100, "C4".to_string()),
            PlayEvent::stop(100, "E4".to_string()),
        ];
        sort_timeline(&mut events);

        assert_eq!(events[0].note_names, vec!["C4".to_string()]);
        assert_eq!(events[1].note_names, vec!["E4".to_string()]);
    }
}
