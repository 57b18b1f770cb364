//! Participant display-name derivation.

/// Derive a display name from an email address.
///
/// The name is everything before the **last** `@`. Returns `None` when the
/// address has no `@` or nothing precedes it, so callers can fail closed
/// instead of inventing a name.
///
/// # Examples
///
/// ```
/// use planner_core::naming::display_name;
///
/// assert_eq!(display_name("alice.b@example.com"), Some("alice.b"));
/// assert_eq!(display_name("\"odd@local\"@example.com"), Some("\"odd@local\""));
/// assert_eq!(display_name("no-at-sign"), None);
/// ```
pub fn display_name(email: &str) -> Option<&str> {
    let at = email.rfind('@')?;
    let local = &email[..at];
    (!local.is_empty()).then_some(local)
}
