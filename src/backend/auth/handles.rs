/**
 * Handle Derivation
 *
 * Derives a unique handle ("username") from the local part of an email
 * address.
 *
 * # Algorithm
 *
 * 1. Take the text before the first `@` (the whole string if there is none)
 * 2. Strip every character outside `[\w.@+-]`
 * 3. Truncate to `USERNAME_MAX_LENGTH` characters (`user` if nothing is left)
 * 4. While the candidate is taken, append `1`, `2`, ... re-truncating the
 *    base so that base + suffix still fits the length bound
 *
 * The pure functions here know nothing about storage. The transactional
 * reservation against the `users` table lives in `accounts`.
 */

use lazy_static::lazy_static;
use regex::Regex;

/// Maximum handle length in characters
pub const USERNAME_MAX_LENGTH: usize = 100;

/// Handle used when an email prefix sanitizes to nothing
pub const FALLBACK_USERNAME: &str = "user";

lazy_static! {
    static ref DISALLOWED_USERNAME_CHARS: Regex =
        Regex::new(r"[^\w.@+-]").expect("username character class is a valid regex");
}

/// The local part of an email address
pub fn email_prefix(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Strip disallowed characters and clamp to the length bound
pub fn sanitize_username(raw: &str) -> String {
    let cleaned = DISALLOWED_USERNAME_CHARS.replace_all(raw, "");
    let truncated: String = cleaned.chars().take(USERNAME_MAX_LENGTH).collect();
    if truncated.is_empty() {
        FALLBACK_USERNAME.to_string()
    } else {
        truncated
    }
}

/// The `attempt`-th candidate for a sanitized base (attempt 0 is the base itself)
pub fn username_candidate(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        return base.chars().take(USERNAME_MAX_LENGTH).collect();
    }
    let suffix = attempt.to_string();
    let keep = USERNAME_MAX_LENGTH.saturating_sub(suffix.len());
    let mut candidate: String = base.chars().take(keep).collect();
    candidate.push_str(&suffix);
    candidate
}

/// Derive a handle from an email that `is_taken` does not report as taken
///
/// # Example
///
/// ```rust
/// use userauths::backend::auth::handles::generate_unique_username_from_email_prefix;
///
/// let taken = ["jane", "jane1"];
/// let handle = generate_unique_username_from_email_prefix("jane@example.com", |h| taken.contains(&h));
/// assert_eq!(handle, "jane2");
/// ```
pub fn generate_unique_username_from_email_prefix<F>(email: &str, mut is_taken: F) -> String
where
    F: FnMut(&str) -> bool,
{
    let base = sanitize_username(email_prefix(email));
    let mut attempt = 0u32;
    loop {
        let candidate = username_candidate(&base, attempt);
        if !is_taken(&candidate) {
            return candidate;
        }
        attempt += 1;
    }
}
