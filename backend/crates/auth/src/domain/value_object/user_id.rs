pub use kernel::id::{SessionId, UserId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_new() {
        let user_id = UserId::new();
        let uuid = user_id.as_uuid();
        assert_eq!(uuid.get_version_num(), 4); // UUIDv4
    }

    #[test]
    fn test_session_id_is_random() {
        assert_ne!(SessionId::new(), SessionId::new());
    }
}
