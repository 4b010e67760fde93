//! Subject sanitising and taxonomy prefixes.

use std::sync::OnceLock;

use regex::Regex;

static DISALLOWED_CHARS: OnceLock<Regex> = OnceLock::new();
static LONG_WORDS: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_RUNS: OnceLock<Regex> = OnceLock::new();
static CATEGORY_PREFIX: OnceLock<Regex> = OnceLock::new();

/// Compile `pattern` once into `cell`.
///
/// # Panics
///
/// Only when a built-in pattern is malformed; none depends on input.
fn compile(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("subject regex {pattern:?} failed to compile: {error}"))
    })
}

/// Clean a free-text subject.
///
/// Steps, in order: trim; drop characters outside letters, digits,
/// underscore, whitespace and `-.,!?()&@#$%`; drop purely alphabetic words
/// of eight or more letters; collapse whitespace runs; trim again.
///
/// # Examples
/// ```
/// use helpdesk::domain::sanitize_subject;
///
/// assert_eq!(sanitize_subject("  Need a laptop!! zzzqwxxxx "), "Need a laptop!!");
/// assert_eq!(sanitize_subject("<b>Desk</b> wobbles"), "bDeskb wobbles");
/// ```
pub fn sanitize_subject(raw: &str) -> String {
    let kept = compile(&DISALLOWED_CHARS, r"[^A-Za-z0-9_\s\-.,!?()&@#$%]")
        .replace_all(raw.trim(), "");
    let short = compile(&LONG_WORDS, r"(?i)\b[a-z]{8,}\b").replace_all(&kept, "");
    let collapsed = compile(&WHITESPACE_RUNS, r"\s+").replace_all(&short, " ");
    collapsed.trim().to_owned()
}

/// Prefix a cleaned subject with its taxonomy path when both parts are known.
pub fn compose_subject(category: Option<&str>, subcategory: Option<&str>, cleaned: &str) -> String {
    match (category, subcategory) {
        (Some(category), Some(subcategory)) => format!("[{category} - {subcategory}] {cleaned}"),
        _ => cleaned.to_owned(),
    }
}

/// Remove a leading `"[..] "` taxonomy prefix from a stored subject.
///
/// Sanitising strips square brackets from user text, so a leading bracket
/// always belongs to a prefix.
pub fn strip_category_prefix(subject: &str) -> &str {
    match compile(&CATEGORY_PREFIX, r"^\[[^\]]*\]\s*").find(subject) {
        Some(found) => subject.get(found.end()..).unwrap_or(subject),
        None => subject,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  Need a laptop!! zzzqwxxxx ", "Need a laptop!!")]
    #[case("Broken   chair\t\nleg", "Broken chair leg")]
    #[case("Salary <script>alert(1)</script>", "Salary (1)script")]
    #[case("Printer ink #42 @ desk 5", "Printer ink #42 @ desk 5")]
    #[case("Keyboards disappeared", "")]
    #[case("ABCDEFGHI short", "short")]
    #[case("abcdefgh_1 stays", "abcdefgh_1 stays")]
    #[case("Pay 100% now", "Pay 100% now")]
    fn sanitises_subjects(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(sanitize_subject(raw), expected);
    }

    #[rstest]
    fn every_pattern_compiles_on_first_use() {
        sanitize_subject("warm up");
        strip_category_prefix("[Taxation - Form 16] warm up");

        for cell in [&DISALLOWED_CHARS, &LONG_WORDS, &WHITESPACE_RUNS, &CATEGORY_PREFIX] {
            assert!(cell.get().is_some());
        }
    }

    #[rstest]
    fn seven_letter_words_survive() {
        assert_eq!(sanitize_subject("Monitor flicker"), "Monitor flicker");
    }

    #[rstest]
    #[case(Some("IT Assets"), Some("Disposal Request"), "[IT Assets - Disposal Request] Old PC")]
    #[case(Some("IT Assets"), None, "Old PC")]
    #[case(None, None, "Old PC")]
    fn composes_prefix_only_with_both_parts(
        #[case] category: Option<&str>,
        #[case] subcategory: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(compose_subject(category, subcategory, "Old PC"), expected);
    }

    #[rstest]
    #[case("[Taxation - Form 16] Need copy", "Need copy")]
    #[case("Need copy", "Need copy")]
    #[case("[Taxation - Form 16] ", "")]
    fn strips_existing_prefix(#[case] stored: &str, #[case] expected: &str) {
        assert_eq!(strip_category_prefix(stored), expected);
    }
}
