use rand::Rng;

use crate::SessionId;

const SESSION_ID_BYTES: usize = 16;

pub fn generate_session_id() -> SessionId {
    let mut rng = rand::rng();
    let bytes: [u8; SESSION_ID_BYTES] = rng.random();
    let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    SessionId::new(hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_are_hex_and_distinct() {
        let first = generate_session_id();
        let second = generate_session_id();
        assert_eq!(first.as_str().len(), SESSION_ID_BYTES * 2);
        assert!(first.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }
}
