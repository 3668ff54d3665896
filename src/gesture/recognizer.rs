// Template recognition seam
// The matcher itself is pluggable; this module maps its template names
// onto editing actions and durations

use crate::gesture::stroke::Stroke;
use crate::score::duration::NoteDuration;

/// Result of matching a stroke against a template library
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    /// Template name, e.g. "half note" or "right curly brace"
    pub name: String,
    /// Match confidence reported by the matcher
    pub score: f64,
}

impl Recognition {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// A stroke matcher. Implementations own their template library and
/// return `None` when nothing matches well enough.
pub trait StrokeRecognizer {
    fn recognize(&self, stroke: &Stroke) -> Option<Recognition>;
}

/// Editing action derived from a recognized template name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeAction {
    PlaceNote(NoteDuration),
    PlaceRest(NoteDuration),
    AttachSharp,
    AttachFlat,
    NoMatch,
}

impl StrokeAction {
    /// Keyword dispatch over the lowercased template name. Note-like
    /// names win over rest-like names when both keywords appear.
    pub fn from_template(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("note") || lower.contains("circle") {
            StrokeAction::PlaceNote(duration_from_template(&lower))
        } else if lower.contains("rest")
            || lower.contains("rectangle")
            || lower.contains("right curly brace")
        {
            StrokeAction::PlaceRest(duration_from_template(&lower))
        } else if lower.contains("star") {
            StrokeAction::AttachSharp
        } else if lower.contains("flat") {
            StrokeAction::AttachFlat
        } else {
            StrokeAction::NoMatch
        }
    }
}

/// Duration encoded in a template name; unqualified names fall back to
/// a quarter.
pub fn duration_from_template(name: &str) -> NoteDuration {
    let lower = name.to_lowercase();
    if lower.contains("circle") || lower.contains("rectangle") {
        NoteDuration::Whole
    } else if lower.contains("half") {
        NoteDuration::Half
    } else if lower.contains("quarter") || lower.contains("right curly brace") {
        NoteDuration::Quarter
    } else if lower.contains("eighth") {
        NoteDuration::Eighth
    } else if lower.contains("sixteenth") {
        NoteDuration::Sixteenth
    } else {
        NoteDuration::Quarter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_templates_place_notes() {
        assert_eq!(
            StrokeAction::from_template("half note"),
            StrokeAction::PlaceNote(NoteDuration::Half)
        );
        assert_eq!(
            StrokeAction::from_template("Sixteenth Note"),
            StrokeAction::PlaceNote(NoteDuration::Sixteenth)
        );
        assert_eq!(
            StrokeAction::from_template("circle"),
            StrokeAction::PlaceNote(NoteDuration::Whole)
        );
    }

    #[test]
    fn test_rest_templates_place_rests() {
        assert_eq!(
            StrokeAction::from_template("eighth rest"),
            StrokeAction::PlaceRest(NoteDuration::Eighth)
        );
        assert_eq!(
            StrokeAction::from_template("rectangle"),
            StrokeAction::PlaceRest(NoteDuration::Whole)
        );
        assert_eq!(
            StrokeAction::from_template("right curly brace"),
            StrokeAction::PlaceRest(NoteDuration::Quarter)
        );
    }

    #[test]
    fn test_accidental_templates() {
        assert_eq!(StrokeAction::from_template("star"), StrokeAction::AttachSharp);
        assert_eq!(StrokeAction::from_template("flat"), StrokeAction::AttachFlat);
    }

    #[test]
    fn test_unknown_template_is_no_match() {
        assert_eq!(StrokeAction::from_template("triangle"), StrokeAction::NoMatch);
        assert_eq!(StrokeAction::from_template(""), StrokeAction::NoMatch);
    }

    #[test]
    fn test_duration_keywords() {
        assert_eq!(duration_from_template("circle"), NoteDuration::Whole);
        assert_eq!(duration_from_template("half note"), NoteDuration::Half);
        assert_eq!(duration_from_template("quarter rest"), NoteDuration::Quarter);
        assert_eq!(duration_from_template("eighth note"), NoteDuration::Eighth);
        assert_eq!(duration_from_template("sixteenth rest"), NoteDuration::Sixteenth);
    }

    #[test]
    fn test_unqualified_name_defaults_to_quarter() {
        assert_eq!(duration_from_template("note"), NoteDuration::Quarter);
        assert_eq!(duration_from_template("rest"), NoteDuration::Quarter);
    }
}
