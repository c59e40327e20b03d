use rand::distr::Alphanumeric;
use rand::{Rng, rng};

/// Lowercase alphanumeric suffix, suitable for globally-unique resource
/// names such as storage accounts.
pub fn generate_suffix(length: usize) -> String {
    rng()
        .sample_iter(Alphanumeric)
        .filter(|b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit())
        .take(length)
        .map(char::from)
        .collect()
}

/// One-off admin password. The fixed tail guarantees the character classes
/// Azure requires regardless of what the random body contains.
pub fn generate_password() -> String {
    let body: String = rng()
        .sample_iter(Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();

    format!("{}Aa1!", body)
}

#[cfg(test)]
mod tests {
    use super::{generate_password, generate_suffix};

    #[test]
    fn suffix_is_lowercase_alphanumeric_of_requested_length() {
        let suffix = generate_suffix(8);
        assert_eq!(suffix.len(), 8);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn password_carries_every_required_character_class() {
        let password = generate_password();
        assert_eq!(password.len(), 20);
        assert!(password.chars().any(|c| c.is_ascii_uppercase()));
        assert!(password.chars().any(|c| c.is_ascii_lowercase()));
        assert!(password.chars().any(|c| c.is_ascii_digit()));
        assert!(password.chars().any(|c| !c.is_ascii_alphanumeric()));
    }
}
