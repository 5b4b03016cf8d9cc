use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::dashboard::DashboardView;

/// Accepts a form field sent either as a string or as a bare JSON number or
/// boolean, the way browsers and scripted clients respectively send them.
fn form_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_json::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(D::Error::custom("form fields must be strings or numbers")),
    }
}

/// A submitted dashboard or manage-homes form, selected by its `action` tag.
///
/// Every field is optional here; presence and format are checked when the
/// request is turned into a command.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum ActionRequest {
    AddRoom {
        #[serde(default, deserialize_with = "form_value")]
        room_name: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        room_description: Option<String>,
    },
    AddAsset {
        #[serde(default, deserialize_with = "form_value")]
        asset_name: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        asset_brand: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        asset_model_number: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        asset_category: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        asset_room: Option<String>,
    },
    AddCustomAsset {
        #[serde(default, deserialize_with = "form_value")]
        asset_name: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        asset_brand: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        asset_model_number: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        asset_category: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        asset_room: Option<String>,
    },
    AddConsumable {
        #[serde(default, deserialize_with = "form_value")]
        consumable_name: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        consumable_brand: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        consumable_part_number: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        consumable_asset: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        consumable_interval: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        consumable_start_date: Option<String>,
    },
    AddTask {
        #[serde(default, deserialize_with = "form_value")]
        task_name: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        task_interval: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        task_start_date: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        task_asset: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        task_room: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        task_consumable: Option<String>,
    },
    AddLog {
        #[serde(default, deserialize_with = "form_value")]
        log_task: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        log_completion_date: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        log_cost: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        log_notes: Option<String>,
    },
    DeleteTask {
        #[serde(default, deserialize_with = "form_value")]
        task_id: Option<String>,
    },
    DeleteRoom {
        #[serde(default, deserialize_with = "form_value")]
        room_id: Option<String>,
    },
    DeleteAsset {
        #[serde(default, deserialize_with = "form_value")]
        asset_id: Option<String>,
    },
    SortRoom {
        #[serde(default, deserialize_with = "form_value")]
        room_id: Option<String>,
    },
    SortAsset {
        #[serde(default, deserialize_with = "form_value")]
        asset_id: Option<String>,
    },
    SwitchHome {
        #[serde(default, deserialize_with = "form_value")]
        home_id: Option<String>,
    },
    UpdateHome {
        #[serde(default, deserialize_with = "form_value")]
        home_id: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        home_name: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        home_address: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        home_city: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        home_state: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        home_zip: Option<String>,
    },
    AddHome {
        #[serde(default, deserialize_with = "form_value")]
        home_name: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        home_address: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        home_city: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        home_state: Option<String>,
        #[serde(default, deserialize_with = "form_value")]
        home_zip: Option<String>,
    },
    DeleteHome {
        #[serde(default, deserialize_with = "form_value")]
        home_id: Option<String>,
    },
}

impl ActionRequest {
    /// The `action` tag as it appears on the wire.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::AddRoom { .. } => "add-room",
            Self::AddAsset { .. } => "add-asset",
            Self::AddCustomAsset { .. } => "add-custom-asset",
            Self::AddConsumable { .. } => "add-consumable",
            Self::AddTask { .. } => "add-task",
            Self::AddLog { .. } => "add-log",
            Self::DeleteTask { .. } => "delete-task",
            Self::DeleteRoom { .. } => "delete-room",
            Self::DeleteAsset { .. } => "delete-asset",
            Self::SortRoom { .. } => "sort-room",
            Self::SortAsset { .. } => "sort-asset",
            Self::SwitchHome { .. } => "switch-home",
            Self::UpdateHome { .. } => "update-home",
            Self::AddHome { .. } => "add-home",
            Self::DeleteHome { .. } => "delete-home",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A one-shot, human readable notice about the outcome of a request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            text: text.into(),
        }
    }
}

/// Outcome of an action: flash messages plus the listing to show next.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActionResponse {
    pub success: bool,
    pub messages: Vec<FlashMessage>,
    /// Listing the client should load next, e.g. `/api/v1/dashboard?room=3`.
    pub redirect: String,
    /// Filtered dashboard, only for the sort actions.
    pub view: Option<DashboardView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_tag_selects_variant() {
        let body = r#"{"action": "add-room", "room_name": "Garage"}"#;
        let parsed: ActionRequest = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed,
            ActionRequest::AddRoom {
                room_name: Some("Garage".to_string()),
                room_description: None,
            }
        );
        assert_eq!(parsed.tag(), "add-room");
    }

    #[test]
    fn test_numeric_fields_are_accepted_as_text() {
        let body = r#"{"action": "delete-task", "task_id": 42}"#;
        let parsed: ActionRequest = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed,
            ActionRequest::DeleteTask {
                task_id: Some("42".to_string())
            }
        );
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let body = r#"{"action": "launch-rocket"}"#;
        assert!(serde_json::from_str::<ActionRequest>(body).is_err());
    }
}
