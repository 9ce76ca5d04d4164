use wordwell_lib::vocab::VocabularyItem;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const ITALIC: &str = "\x1b[3m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in an ANSI style when color is enabled
pub fn paint(text: &str, style: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", style, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Horizontal rule of the given width
pub fn rule(width: usize) -> String {
    "\u{2500}".repeat(width)
}

/// Five-cell mastery meter, e.g. `■■■□□`
pub fn mastery_meter(level: u8, use_color: bool) -> String {
    let filled = usize::from(level.min(5));
    let bar = format!("{}{}", "\u{25a0}".repeat(filled), "\u{25a1}".repeat(5 - filled));
    let style = match level {
        0 => Color::GRAY,
        1..=3 => Color::YELLOW,
        _ => Color::GREEN,
    };
    paint(&bar, style, use_color)
}

/// Front of a flashcard: the word and its part of speech
pub fn render_card_front(item: &VocabularyItem, use_color: bool) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}",
        paint(&item.word, Color::BOLD, use_color),
        paint(&format!("({})", item.part_of_speech), Color::DIM, use_color)
    )];
    if !item.pronunciation.is_empty() {
        lines.push(paint(&item.pronunciation, Color::GRAY, use_color));
    }
    lines
}

/// Back of a flashcard: definition plus whatever extras are filled in
pub fn render_card_back(item: &VocabularyItem, use_color: bool) -> Vec<String> {
    let mut lines = vec![item.definition.clone()];

    if !item.example_sentence.is_empty() {
        lines.push(paint(&format!("\"{}\"", item.example_sentence), Color::ITALIC, use_color));
    }

    let extras = [
        ("Synonyms", &item.synonyms),
        ("Antonyms", &item.antonyms),
        ("Collocations", &item.collocations),
        ("Notes", &item.notes),
    ];
    for (label, value) in extras {
        if !value.is_empty() {
            lines.push(format!("{}: {}", paint(label, Color::CYAN, use_color), value));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_paint_without_color() {
        assert_eq!(paint("word", Color::BOLD, false), "word");
        assert_eq!(paint("word", Color::BOLD, true), "\x1b[1mword\x1b[0m");
    }

    #[test]
    fn test_mastery_meter() {
        assert_eq!(mastery_meter(0, false), "\u{25a1}\u{25a1}\u{25a1}\u{25a1}\u{25a1}");
        assert_eq!(mastery_meter(3, false), "\u{25a0}\u{25a0}\u{25a0}\u{25a1}\u{25a1}");
        assert_eq!(mastery_meter(9, false).chars().filter(|c| *c == '\u{25a0}').count(), 5);
    }

    #[test]
    fn test_card_back_skips_empty_fields() {
        let mut item = VocabularyItem::new("terse", "brief", Utc::now());
        item.synonyms = "concise".to_string();

        let lines = render_card_back(&item, false);
        assert_eq!(lines, vec!["brief".to_string(), "Synonyms: concise".to_string()]);
    }
}
