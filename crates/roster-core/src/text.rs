use deunicode::deunicode_char;

/// Lowercase ASCII transliteration: accented letters fold to their base letter
/// and ligatures expand (`Œ` to `oe`). Characters with no transliteration are
/// dropped.
pub fn fold(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_ascii() {
            out.push(ch.to_ascii_lowercase());
        } else if let Some(ascii) = deunicode_char(ch) {
            out.extend(ascii.chars().map(|c| c.to_ascii_lowercase()));
        }
    }
    out
}

/// Comparison key for choice labels: accents folded, lowercase, ASCII alphanumerics only.
pub fn choice_key(raw: &str) -> String {
    fold(raw)
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .collect()
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{choice_key, escape_html, fold};

    #[test]
    fn fold_strips_accents_beyond_catalan() {
        assert_eq!(fold("Vòlei Àlex Çà"), "volei alex ca");
        assert_eq!(fold("Škoda Žilina"), "skoda zilina");
        assert_eq!(fold("Łódź Ørsta"), "lodz orsta");
        assert_eq!(fold("Œuvre Straße"), "oeuvre strasse");
    }

    #[test]
    fn choice_key_ignores_case_accents_and_punctuation() {
        assert_eq!(choice_key("Col·locador/a"), "collocadora");
        assert_eq!(choice_key("  COL·LOCADOR/A "), "collocadora");
        assert_eq!(choice_key("Líbero"), "libero");
    }

    #[test]
    fn escape_html_escapes_markup() {
        assert_eq!(
            escape_html("<b>Joan & \"Pep\"</b>"),
            "&lt;b&gt;Joan &amp; &quot;Pep&quot;&lt;/b&gt;"
        );
    }
}
