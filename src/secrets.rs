use rand::Rng;

/// Source of webhook trigger secrets.
///
/// The default source is not cryptographically strong; webhook secrets
/// only need to be hard to guess by accident. Hosts that want stronger
/// tokens can plug in their own source.
pub trait SecretSource {
    fn generate(&mut self) -> String;
}

/// Generates 16 hex characters as four 4-character groups from the thread
/// rng.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomSecretSource;

impl SecretSource for RandomSecretSource {
    fn generate(&mut self) -> String {
        let mut rng = rand::thread_rng();
        (0..4).map(|_| format!("{:04x}", rng.gen::<u16>())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_are_sixteen_hex_characters() {
        let secret = RandomSecretSource.generate();

        assert_eq!(secret.len(), 16);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn consecutive_secrets_differ() {
        let mut source = RandomSecretSource;

        // 2^64 possible tokens, a collision here means the rng is broken.
        assert_ne!(source.generate(), source.generate());
    }
}
