use mongodb::bson::oid::ObjectId;

pub mod event_models;
pub mod poll_models;
pub mod user_models;

/// Fresh opaque document id. ObjectId hex keeps ids roughly creation ordered.
pub fn new_id() -> String {
    ObjectId::new().to_hex()
}
