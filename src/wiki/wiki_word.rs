//! `WikiWord` detection

/// Returns true if `name` is a `WikiWord`: two or more runs of one uppercase
/// letter followed by lowercase letters, and nothing else.
///
/// # Examples
/// ```
/// use wiki_translation::wiki::is_wiki_word;
///
/// assert!(is_wiki_word("HomePage"));
/// assert!(!is_wiki_word("Homepage"));
/// ```
#[must_use]
pub fn is_wiki_word(name: &str) -> bool {
    let mut chars = name.chars().peekable();
    let mut humps = 0_usize;

    while let Some(c) = chars.next() {
        if !c.is_uppercase() {
            return false;
        }
        let mut lower = 0_usize;
        while chars.next_if(|c| c.is_lowercase()).is_some() {
            lower += 1;
        }
        if lower == 0 {
            return false;
        }
        humps += 1;
    }

    humps >= 2
}
