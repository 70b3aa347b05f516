use serde::{Deserialize, Serialize};

/// Local, unauthenticated identity captured at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub username: String,
    pub email: String,
}
