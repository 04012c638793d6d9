use serde_json::{Map, Value};

use super::ScholarProfile;
use crate::error::{AppError, AppResult};

/// Merges `patch` into `target` (JSON merge-patch rules): objects merge key by
/// key, `null` removes a key, anything else replaces.
pub fn merge_json(target: &mut Value, patch: Value) {
    match patch {
        Value::Object(patch_map) => {
            if !target.is_object() {
                *target = Value::Object(Map::new());
            }
            if let Value::Object(target_map) = target {
                for (key, value) in patch_map {
                    if value.is_null() {
                        target_map.remove(&key);
                    } else {
                        merge_json(target_map.entry(key).or_insert(Value::Null), value);
                    }
                }
            }
        }
        other => *target = other,
    }
}

/// Applies a partial (or full) update document to a stored profile and
/// re-validates the result against the typed shape. Removed keys fall back to
/// their defaults.
pub fn apply_patch(current: &ScholarProfile, patch: Value) -> AppResult<ScholarProfile> {
    if !patch.is_object() {
        return Err(AppError::validation("Update payload must be a JSON object"));
    }

    let mut document = serde_json::to_value(current)
        .map_err(|e| AppError::PersistenceFailure(e.into()))?;
    merge_json(&mut document, patch);

    serde_json::from_value(document)
        .map_err(|e| AppError::validation(format!("Invalid scholar record: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stored() -> ScholarProfile {
        serde_json::from_value(json!({
            "personalDetails": { "firstName": "Asha", "lastName": "Nair", "mobile": "98450" },
            "admissionDetails": { "department": "PhD engg-CSE", "modeOfProgram": "FT" },
            "courseWork1": { "subjectCode": "CS901", "grade": "A" },
            "publications": { "journals": [ { "title": "Old" } ] }
        }))
        .unwrap()
    }

    #[test]
    fn nested_patch_keeps_sibling_fields() {
        let updated = apply_patch(
            &stored(),
            json!({ "personalDetails": { "firstName": "Asha R" } }),
        )
        .unwrap();

        assert_eq!(updated.personal_details.first_name, "Asha R");
        assert_eq!(updated.personal_details.last_name, "Nair");
        assert_eq!(updated.personal_details.mobile, "98450");
        assert_eq!(updated.course_work1.subject_code, "CS901");
    }

    #[test]
    fn arrays_are_replaced_not_appended() {
        let updated = apply_patch(
            &stored(),
            json!({ "publications": { "journals": [ { "title": "A" }, { "title": "B" } ] } }),
        )
        .unwrap();

        let titles: Vec<_> = updated
            .publications
            .journals
            .iter()
            .map(|j| j.title.as_str())
            .collect();
        assert_eq!(titles, ["A", "B"]);
    }

    #[test]
    fn null_resets_a_slot_to_defaults() {
        let updated = apply_patch(&stored(), json!({ "courseWork1": null })).unwrap();
        assert_eq!(updated.course_work1, Default::default());
    }

    #[test]
    fn wrong_types_and_unknown_slots_fail_validation() {
        let err = apply_patch(&stored(), json!({ "courseWork1": { "grade": 7 } })).unwrap_err();
        assert!(matches!(err, AppError::ValidationFailed(_)));

        let err = apply_patch(&stored(), json!({ "courseWork5": {} })).unwrap_err();
        assert!(matches!(err, AppError::ValidationFailed(_)));

        let err = apply_patch(&stored(), json!(["not", "an", "object"])).unwrap_err();
        assert!(matches!(err, AppError::ValidationFailed(_)));
    }
}
