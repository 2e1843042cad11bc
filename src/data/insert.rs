use serde::{Deserialize, Serialize};

/// Field values carried by a successful insert
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInsertData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Outcome reported by the insert form to its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<UserInsertData>,
    pub message: String,
}

impl InsertResult {
    pub fn succeeded(data: UserInsertData, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
        }
    }
}
