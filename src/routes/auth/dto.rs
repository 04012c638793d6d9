use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::user;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "scholar@university.edu")]
    pub email: String,

    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,

    #[schema(example = "newPassword123")]
    pub new_password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChangePasswordResponse {
    pub message: String,
}

/// Registration form. Account fields and the commonly captured scholar
/// fields are flat; `profile` may carry any further part of the scholar
/// record in its nested shape.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[schema(example = "scholar@university.edu")]
    pub email: String,
    #[schema(example = "password123")]
    pub password: String,
    #[schema(example = "Asha")]
    pub first_name: String,
    pub middle_name: Option<String>,
    #[schema(example = "Nair")]
    pub last_name: String,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub mobile: Option<String>,
    pub address: Option<String>,
    #[schema(example = "PhD engg-CSE")]
    pub department: Option<String>,
    #[schema(example = "FT")]
    pub mode_of_program: Option<String>,
    pub usn: Option<String>,
    pub registration_number: Option<String>,
    pub admission_date: Option<String>,
    pub research_supervisor: Option<String>,
    pub research_co_supervisor: Option<String>,
    #[schema(value_type = Object)]
    pub profile: Option<Value>,
}

fn insert_present(target: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        target.insert(key.to_string(), Value::String(value.trim().to_string()));
    }
}

impl SignupRequest {
    /// Patches over an empty scholar record: the nested `profile` first, then
    /// the flat fields that were actually sent, so those win on overlap.
    pub fn profile_patch(&self) -> Vec<Value> {
        let mut patches = Vec::new();
        if let Some(profile) = &self.profile {
            patches.push(profile.clone());
        }

        let mut personal = Map::new();
        personal.insert("firstName".to_string(), self.first_name.trim().into());
        personal.insert("lastName".to_string(), self.last_name.trim().into());
        insert_present(&mut personal, "middleName", &self.middle_name);
        insert_present(&mut personal, "dateOfBirth", &self.date_of_birth);
        insert_present(&mut personal, "gender", &self.gender);
        insert_present(&mut personal, "nationality", &self.nationality);
        insert_present(&mut personal, "mobile", &self.mobile);
        insert_present(&mut personal, "address", &self.address);

        let mut admission = Map::new();
        insert_present(&mut admission, "department", &self.department);
        insert_present(&mut admission, "modeOfProgram", &self.mode_of_program);
        insert_present(&mut admission, "usn", &self.usn);
        insert_present(&mut admission, "registrationNumber", &self.registration_number);
        insert_present(&mut admission, "admissionDate", &self.admission_date);

        let mut flat = Map::new();
        flat.insert("personalDetails".to_string(), Value::Object(personal));
        if !admission.is_empty() {
            flat.insert("admissionDetails".to_string(), Value::Object(admission));
        }
        insert_present(&mut flat, "researchSupervisor", &self.research_supervisor);
        insert_present(&mut flat, "researchCoSupervisor", &self.research_co_supervisor);

        patches.push(Value::Object(flat));
        patches
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user_id: Uuid,
    pub scholar_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
    pub is_supervisor: bool,
    pub is_verified: bool,
    pub scholar_id: Option<Uuid>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            is_admin: user.is_admin,
            is_supervisor: user.is_supervisor,
            is_verified: user.is_verified,
            scholar_id: user.scholar_id,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_flat_fields_leave_nested_values_alone() {
        let request: SignupRequest = serde_json::from_value(json!({
            "email": "asha@uni.edu",
            "password": "scholar-password",
            "firstName": "Asha",
            "lastName": "Nair",
            "mobile": "98450",
            "profile": { "admissionDetails": { "department": "PhD engg-CSE" } }
        }))
        .unwrap();

        let patches = request.profile_patch();
        assert_eq!(patches.len(), 2);
        let flat = &patches[1];
        assert_eq!(flat["personalDetails"]["mobile"], "98450");
        assert!(flat["personalDetails"].get("dateOfBirth").is_none());
        assert!(flat.get("admissionDetails").is_none());
        assert!(flat.get("researchSupervisor").is_none());
    }
}
