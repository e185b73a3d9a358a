use crate::app::intake_service::IntakeService;
use crate::domain::profile::RawSubmission;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub intake: IntakeService,
}

/// Profile form body (`application/x-www-form-urlencoded`).
///
/// Every field is optional on the wire; a missing field is validated as empty.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct ProfileFormRequest {
    #[serde(default)]
    #[schema(example = "Иван Иванов")]
    pub full_name: Option<String>,
    #[serde(default)]
    #[schema(example = "ivan@test.ru")]
    pub email: Option<String>,
    #[serde(default)]
    #[schema(example = "+7 999 123 45 67")]
    pub phone: Option<String>,
    #[serde(default)]
    #[schema(example = "30")]
    pub age: Option<String>,
}

impl From<ProfileFormRequest> for RawSubmission {
    fn from(request: ProfileFormRequest) -> Self {
        RawSubmission {
            full_name: request.full_name,
            email: request.email,
            phone: request.phone,
            age: request.age,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
