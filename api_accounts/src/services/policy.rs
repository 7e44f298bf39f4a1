use email_address::EmailAddress;

const SPECIAL_CHARACTERS: [char; 4] = ['@', '$', '%', '!'];

/// Password strength gate, applied before any hashing happens.
///
/// A password is acceptable when it is at least 8 characters long and
/// contains at least one digit, one lowercase letter, one uppercase letter
/// and one of `@`, `$`, `%`, `!`. ASCII classes only; there is no upper
/// bound on length.
pub fn is_acceptable(password: &str) -> bool {
    password.len() >= 8
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| SPECIAL_CHARACTERS.contains(&c))
}

/// Well-formedness check for emails, run at the service boundary before
/// any mutation reaches the store.
pub fn is_well_formed_email(email: &str) -> bool {
    EmailAddress::is_valid(email)
}
