use rand::Rng;

use crate::infra::contracts::LocalStore;

/// Local store key holding a previously chosen display name.
pub const DISPLAY_NAME_KEY: &str = "chat-username";

const DISPLAY_NAME_STORE_READ_FAILED: &str = "DISPLAY_NAME_STORE_READ_FAILED";

/// Returns the stored display name, or a fresh `User<n>` when none is stored.
///
/// A generated name is not written back.
pub fn resolve_display_name(store: &dyn LocalStore) -> String {
    match store.get(DISPLAY_NAME_KEY) {
        Ok(Some(name)) if !name.is_empty() => name,
        Ok(_) => generate_display_name(),
        Err(error) => {
            tracing::warn!(
                code = DISPLAY_NAME_STORE_READ_FAILED,
                error = ?error,
                "falling back to a generated display name"
            );
            generate_display_name()
        }
    }
}

fn generate_display_name() -> String {
    format!("User{}", rand::rng().random_range(0..1000))
}

/// Trims a user-entered display name. Blank input yields `None`.
pub fn normalize_display_name(raw: &str) -> Option<&str> {
    let name = raw.trim();
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::stubs::{BrokenLocalStore, MemoryLocalStore};

    fn is_generated(name: &str) -> bool {
        name.strip_prefix("User")
            .and_then(|digits| digits.parse::<u32>().ok())
            .is_some_and(|n| n < 1000)
    }

    #[test]
    fn uses_stored_name_when_present() {
        let store = MemoryLocalStore::with(DISPLAY_NAME_KEY, "alice");

        assert_eq!(resolve_display_name(&store), "alice");
    }

    #[test]
    fn generates_name_when_store_is_empty() {
        let store = MemoryLocalStore::default();

        assert!(is_generated(&resolve_display_name(&store)));
    }

    #[test]
    fn empty_stored_name_counts_as_missing() {
        let store = MemoryLocalStore::with(DISPLAY_NAME_KEY, "");

        assert!(is_generated(&resolve_display_name(&store)));
    }

    #[test]
    fn generated_name_is_not_persisted() {
        let store = MemoryLocalStore::default();
        let _ = resolve_display_name(&store);

        assert_eq!(store.get(DISPLAY_NAME_KEY).expect("memory get"), None);
    }

    #[test]
    fn store_errors_fall_back_to_generated_name() {
        assert!(is_generated(&resolve_display_name(&BrokenLocalStore)));
    }

    #[test]
    fn normalizes_entered_names() {
        assert_eq!(normalize_display_name("  bob "), Some("bob"));
        assert_eq!(normalize_display_name("/nick"), Some("/nick"));
        assert_eq!(normalize_display_name("   "), None);
        assert_eq!(normalize_display_name(""), None);
    }
}
