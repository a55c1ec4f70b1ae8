pub mod comment_service;
pub mod task_service;
pub mod user_service;

use mongodb::bson::oid::ObjectId;

/// Parses a client-supplied id. Anything that is not a valid ObjectId can
/// never match a stored record, so callers treat `None` as "not found".
pub fn parse_object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex()), Some(id));
        assert_eq!(parse_object_id("not-an-id"), None);
        assert_eq!(parse_object_id(""), None);
    }
}
