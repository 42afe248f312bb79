use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Account record owned by the identity service. Only read here, to put
/// display names next to user ids.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}
