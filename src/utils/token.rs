use rand::{distributions::Alphanumeric, thread_rng, Rng};

pub const CLIENT_ID_LENGTH: usize = 10;

pub fn generate_client_id() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CLIENT_ID_LENGTH)
        .map(char::from)
        .collect()
}

pub fn generate_api_key() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn client_ids_have_fixed_length_and_are_alphanumeric() {
        for _ in 0..100 {
            let id = generate_client_id();
            assert_eq!(id.len(), CLIENT_ID_LENGTH);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn api_keys_are_unique_uuids() {
        let keys: HashSet<String> = (0..200).map(|_| generate_api_key()).collect();
        assert_eq!(keys.len(), 200);
        assert!(keys.iter().all(|k| uuid::Uuid::parse_str(k).is_ok()));
    }
}
