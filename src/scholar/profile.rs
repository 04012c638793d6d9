use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::flexible_date;

/// The whole scholar aggregate as stored in `phd_scholar.profile`.
///
/// Every struct here defaults all of its fields, so a record created from a
/// sparse signup still serializes with every key present. The four coursework
/// slots and the four seminar checkpoints are fixed named fields; consumers
/// address them as `courseWork1`..`courseWork4`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ScholarProfile {
    pub personal_details: PersonalDetails,
    pub admission_details: AdmissionDetails,
    pub research_supervisor: String,
    pub research_co_supervisor: String,
    pub doctoral_committee: DoctoralCommittee,
    pub course_work1: CourseWork,
    pub course_work2: CourseWork,
    pub course_work3: CourseWork,
    pub course_work4: CourseWork,
    pub phd_milestones: PhdMilestones,
    pub publications: Publications,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalDetails {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    #[serde(deserialize_with = "flexible_date::deserialize")]
    pub date_of_birth: Option<NaiveDate>,
    pub gender: String,
    pub nationality: String,
    pub mobile: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AdmissionDetails {
    pub entrance_exam: String,
    pub qualifying_exam: String,
    pub allotment_number: String,
    #[serde(deserialize_with = "flexible_date::deserialize")]
    pub admission_date: Option<NaiveDate>,
    #[schema(example = "PhD engg-CSE")]
    pub department: String,
    pub usn: String,
    pub registration_number: String,
    /// FT, IPT or EPT. Free text is kept as entered.
    #[schema(example = "FT")]
    pub mode_of_program: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DoctoralCommittee {
    pub members: Vec<CommitteeMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CommitteeMember {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseWork {
    pub subject_code: String,
    pub subject_name: String,
    pub grade: String,
    pub status: String,
    #[serde(deserialize_with = "flexible_date::deserialize")]
    pub eligibility_date: Option<NaiveDate>,
}

/// A program checkpoint with a planned and an achieved date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Milestone {
    #[serde(deserialize_with = "flexible_date::deserialize")]
    pub target_date: Option<NaiveDate>,
    #[serde(deserialize_with = "flexible_date::deserialize")]
    pub actual_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseworkCompletionDates {
    #[serde(deserialize_with = "flexible_date::deserialize")]
    pub course_work1: Option<NaiveDate>,
    #[serde(deserialize_with = "flexible_date::deserialize")]
    pub course_work2: Option<NaiveDate>,
    #[serde(deserialize_with = "flexible_date::deserialize")]
    pub course_work3: Option<NaiveDate>,
    #[serde(deserialize_with = "flexible_date::deserialize")]
    pub course_work4: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PhdMilestones {
    pub coursework_completion_date: CourseworkCompletionDates,
    pub comprehensive_exam: Milestone,
    pub proposal_defense: Milestone,
    pub seminar1: Milestone,
    pub seminar2: Milestone,
    pub seminar3: Milestone,
    pub seminar4: Milestone,
    pub synopsis_submission: Milestone,
    pub thesis_submission: Milestone,
    pub thesis_defense: Milestone,
    pub degree_award: Milestone,
    pub dc_meetings: DcMeetings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct DcMeetings {
    #[serde(rename = "DCM")]
    pub dcm: Vec<DcMeeting>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DcMeeting {
    #[serde(deserialize_with = "flexible_date::deserialize")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(deserialize_with = "flexible_date::deserialize")]
    pub actual_date: Option<NaiveDate>,
    pub happened: bool,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Publications {
    pub journals: Vec<JournalPublication>,
    pub conferences: Vec<ConferencePublication>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct JournalPublication {
    pub title: String,
    pub authors: String,
    pub journal_name: String,
    pub volume: String,
    pub issue: String,
    pub pages: String,
    pub year: i32,
    pub doi: String,
    pub issn: String,
    pub indexing: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ConferencePublication {
    pub title: String,
    pub authors: String,
    pub conference_name: String,
    pub location: String,
    #[serde(deserialize_with = "flexible_date::deserialize")]
    pub date: Option<NaiveDate>,
    pub pages: String,
    pub doi: String,
    pub isbn: String,
    pub publisher: String,
}

impl ScholarProfile {
    pub fn display_name(&self) -> String {
        let p = &self.personal_details;
        [p.first_name.as_str(), p.middle_name.as_str(), p.last_name.as_str()]
            .iter()
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether `name` appears as supervisor or co-supervisor. The fields are
    /// free text, so the match is case-insensitive containment.
    pub fn is_supervised_by(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        [&self.research_supervisor, &self.research_co_supervisor]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn name_changed_from(&self, previous: &ScholarProfile) -> bool {
        self.personal_details.first_name != previous.personal_details.first_name
            || self.personal_details.last_name != previous.personal_details.last_name
    }
}
