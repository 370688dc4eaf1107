//! The five managed collections.
//!
//! Every collection that relates to another takes the target's identifier as
//! a parameter, so it can only be built once that collection exists.

use super::types::*;
use crate::collections::CollectionId;

const AUTHENTICATED: &str = r#"@request.auth.id != """#;
const SELF_ONLY: &str = "@request.auth.id = id";

/// Names of the managed collections, in creation order.
/// Cleanup only ever deletes collections with one of these names.
pub const COLLECTION_NAMES: [&str; 5] =
    ["users", "messages", "slots", "blocked_users", "reports"];

/// Largest avatar upload, 5 MiB
pub const AVATAR_MAX_SIZE: u64 = 5 * 1024 * 1024;

/// `users` auth collection
pub fn users() -> CollectionSchema {
    CollectionSchema {
        name: "users".to_string(),
        kind: CollectionType::Auth,
        schema: vec![
            SchemaField::date("birthDate"),
            SchemaField::text("city", TextOptions::max(100)),
            SchemaField::select_one("role", &["student", "tutor"]).required(),
            SchemaField::text("bio", TextOptions::max(500)),
            SchemaField::file(
                "avatar",
                FileOptions {
                    max_select: 1,
                    max_size: AVATAR_MAX_SIZE,
                    mime_types: ["image/jpeg", "image/png", "image/gif", "image/webp"]
                        .iter()
                        .map(|m| m.to_string())
                        .collect(),
                    thumbs: vec!["100x100".to_string(), "300x300".to_string()],
                },
            ),
        ],
        list_rule: rule(AUTHENTICATED),
        view_rule: rule(AUTHENTICATED),
        create_rule: rule(""),
        update_rule: rule(SELF_ONLY),
        delete_rule: rule(SELF_ONLY),
        options: Some(AuthOptions::default()),
    }
}

/// `messages` between two users
pub fn messages(users: &CollectionId) -> CollectionSchema {
    let participant = "senderId = @request.auth.id || receiverId = @request.auth.id";

    CollectionSchema {
        name: "messages".to_string(),
        kind: CollectionType::Base,
        schema: vec![
            SchemaField::text("chatRoomId", TextOptions::between(1, 100)).required(),
            SchemaField::relation("senderId", users, false).required(),
            SchemaField::text("senderEmail", TextOptions::max(200)).required(),
            SchemaField::relation("receiverId", users, false).required(),
            SchemaField::text("message", TextOptions::max(5000)).required(),
            SchemaField::select_one("type", &["text", "image", "audio"]).required(),
            SchemaField::bool("isRead"),
        ],
        list_rule: rule(participant),
        view_rule: rule(participant),
        create_rule: rule("senderId = @request.auth.id"),
        update_rule: rule("receiverId = @request.auth.id"),
        delete_rule: rule("senderId = @request.auth.id"),
        options: None,
    }
}

/// Tutor availability `slots`. Times are `HH:MM`.
pub fn slots(users: &CollectionId) -> CollectionSchema {
    CollectionSchema {
        name: "slots".to_string(),
        kind: CollectionType::Base,
        schema: vec![
            SchemaField::relation("tutorId", users, false).required(),
            SchemaField::date("date").required(),
            SchemaField::text("startTime", TextOptions::between(5, 5)).required(),
            SchemaField::text("endTime", TextOptions::between(5, 5)).required(),
            SchemaField::bool("isBooked"),
            SchemaField::bool("isPaid"),
            SchemaField::relation("studentId", users, false),
        ],
        list_rule: rule(AUTHENTICATED),
        view_rule: rule(AUTHENTICATED),
        create_rule: rule("tutorId = @request.auth.id"),
        update_rule: rule("tutorId = @request.auth.id || studentId = @request.auth.id"),
        delete_rule: rule("tutorId = @request.auth.id"),
        options: None,
    }
}

/// `blocked_users`. Block records are immutable.
pub fn blocked_users(users: &CollectionId) -> CollectionSchema {
    let owner = "userId = @request.auth.id";

    CollectionSchema {
        name: "blocked_users".to_string(),
        kind: CollectionType::Base,
        schema: vec![
            SchemaField::relation("userId", users, true).required(),
            SchemaField::relation("blockedUserId", users, true).required(),
        ],
        list_rule: rule(owner),
        view_rule: rule(owner),
        create_rule: rule(owner),
        update_rule: None,
        delete_rule: rule(owner),
        options: None,
    }
}

/// Message abuse `reports`; write-only for users.
pub fn reports(users: &CollectionId, messages: &CollectionId) -> CollectionSchema {
    CollectionSchema {
        name: "reports".to_string(),
        kind: CollectionType::Base,
        schema: vec![
            SchemaField::relation("reportedBy", users, false).required(),
            SchemaField::relation("messageId", messages, true).required(),
            SchemaField::relation("messageOwnerId", users, false).required(),
        ],
        list_rule: None,
        view_rule: None,
        create_rule: rule("reportedBy = @request.auth.id"),
        update_rule: None,
        delete_rule: None,
        options: None,
    }
}
