// Spelled pitch to MIDI note number

/// Parses a spelled pitch ("G4", "C#5", "Bb3") into a MIDI note number
/// with middle C at 60. Spellings outside octaves 3 through 6 return
/// `None` and stay silent.
pub fn note_number(name: &str) -> Option<u8> {
    let name = name.trim();
    let mut chars = name.chars();
    let letter = chars.next()?;
    let base: i32 = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    let rest = chars.as_str();
    let (offset, octave_str): (i32, &str) = if let Some(stripped) = rest.strip_prefix('#') {
        (1, stripped)
    } else if let Some(stripped) = rest.strip_prefix(['b', 'B']) {
        (-1, stripped)
    } else {
        (0, rest)
    };

    let octave: i32 = octave_str.parse().ok()?;
    if !(3..=6).contains(&octave) {
        return None;
    }

    let number = (octave + 1) * 12 + base + offset;
    u8::try_from(number).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naturals() {
        assert_eq!(note_number("C4"), Some(60));
        assert_eq!(note_number("A4"), Some(69));
        assert_eq!(note_number("G4"), Some(67));
        assert_eq!(note_number("F5"), Some(77));
        assert_eq!(note_number("D6"), Some(86));
        assert_eq!(note_number("G3"), Some(55));
    }

    #[test]
    fn test_sharps_and_flats() {
        assert_eq!(note_number("F#4"), Some(66));
        assert_eq!(note_number("C#5"), Some(73));
        assert_eq!(note_number("Bb3"), Some(58));
        assert_eq!(note_number("Eb4"), Some(63));
        assert_eq!(note_number("AB4"), Some(68));
    }

    #[test]
    fn test_enharmonic_spellings_resolve_arithmetically() {
        assert_eq!(note_number("Db4"), note_number("C#4"));
        // Cb4 sits a semitone below C4, B#4 a semitone above B4
        assert_eq!(note_number("Cb4"), Some(59));
        assert_eq!(note_number("B#4"), Some(72));
    }

    #[test]
    fn test_octave_range_is_restricted() {
        assert_eq!(note_number("G2"), None);
        assert_eq!(note_number("C7"), None);
        assert_eq!(note_number("B6"), Some(95));
        assert_eq!(note_number("C3"), Some(48));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(note_number(" G4 "), Some(67));
    }

    #[test]
    fn test_malformed_names() {
        assert_eq!(note_number(""), None);
        assert_eq!(note_number("H4"), None);
        assert_eq!(note_number("G"), None);
        assert_eq!(note_number("4"), None);
        assert_eq!(note_number("Gb"), None);
        assert_eq!(note_number("C##4"), None);
    }
}
