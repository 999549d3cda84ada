use rand::Rng;

/// Generates a random alphanumeric secret of the given length
pub fn create_random_secret(secret_len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn creates_secret_of_requested_length() {
        assert_eq!(create_random_secret(16).len(), 16);
        assert_eq!(create_random_secret(0).len(), 0);
    }

    #[test]
    fn secrets_are_unlikely_to_collide() {
        assert_ne!(create_random_secret(20), create_random_secret(20));
    }
}
