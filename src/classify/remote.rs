// src/classify/remote.rs
//! Remote/hybrid detection over posting text.

/// Keywords that flag remote or hybrid work, English and Spanish. Matched as
/// substrings of the lowered text, so "100% remote" and "fully remote" also
/// hit via "remote".
const REMOTE_KEYWORDS: &[&str] = &[
    "remote",
    "remoto",
    "teletrabajo",
    "work from home",
    "wfh",
    "fully remote",
    "100% remote",
    "híbrido",
    "hybrid",
];

/// `true` iff the text mentions remote or hybrid work. Missing text is
/// `false`.
pub fn is_remote(text: Option<&str>) -> bool {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return false,
    };
    let lower = text.to_lowercase();
    REMOTE_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_english_and_spanish_mentions() {
        assert!(is_remote(Some("Fully remote position")));
        assert!(is_remote(Some("Trabajo 100% remoto")));
        assert!(is_remote(Some("Posibilidad de teletrabajo")));
        assert!(is_remote(Some("Modelo híbrido, 2 días oficina")));
        assert!(is_remote(Some("Hybrid setup")));
    }

    #[test]
    fn case_insensitive() {
        assert!(is_remote(Some("REMOTE-FIRST company")));
        assert!(is_remote(Some("HÍBRIDO")));
    }

    #[test]
    fn false_on_missing_or_unrelated() {
        assert!(!is_remote(None));
        assert!(!is_remote(Some("")));
        assert!(!is_remote(Some("On-site role in Madrid")));
    }
}
