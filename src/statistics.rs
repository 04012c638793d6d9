//! Department/enrollment-mode reporting for the admin dashboard.
//!
//! Department labels are free text ("PhD engg-CSE", "cse", "Pharmacy
//! Practice"). They are normalized by stripping known prefixes, then mapped
//! into coarse faculty buckets. The prefix and code lists are data carried in
//! [`StatisticsRules`] and can be replaced from a JSON file.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ProgramMode {
    FT,
    IPT,
    EPT,
}

impl ProgramMode {
    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_uppercase();
        match key.as_str() {
            "FT" | "FULLTIME" => Some(ProgramMode::FT),
            "IPT" | "INTERNALPARTTIME" => Some(ProgramMode::IPT),
            "EPT" | "EXTERNALPARTTIME" => Some(ProgramMode::EPT),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacultyRule {
    #[schema(example = "Engineering")]
    pub name: String,
    /// Normalized (upper-case) department labels that belong to this faculty.
    pub department_codes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsRules {
    /// Lower-case prefixes stripped from the front of a label, longest first.
    pub strip_prefixes: Vec<String>,
    pub faculties: Vec<FacultyRule>,
    /// Bucket for records whose department is missing or blank.
    pub unmapped_label: String,
}

impl Default for StatisticsRules {
    fn default() -> Self {
        let to_strings =
            |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            strip_prefixes: to_strings(&[
                "department of",
                "dept of",
                "dept.",
                "phd engg.",
                "phd engg",
                "phd eng",
                "phd in",
                "ph.d",
                "phd",
                "engg.",
                "engg",
            ]),
            faculties: vec![
                FacultyRule {
                    name: "Engineering".to_string(),
                    department_codes: to_strings(&["CSE", "CV", "ECE", "EEE", "ME"]),
                },
                FacultyRule {
                    name: "Pharmacy".to_string(),
                    department_codes: to_strings(&[
                        "PHARMACY",
                        "PHARMACY PRACTICE",
                        "PHARMACEUTICS",
                        "PHARMACOLOGY",
                        "PHARMACOGNOSY",
                        "PHARMACEUTICAL CHEMISTRY",
                        "PHARMACEUTICAL ANALYSIS",
                        "PHARMACEUTICAL SCIENCES",
                        "PHARM D",
                    ]),
                },
            ],
            unmapped_label: "Unmapped".to_string(),
        }
    }
}

/// One scholar as seen by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScholarStatRecord {
    pub scholar_id: Uuid,
    pub name: String,
    pub department: String,
    pub normalized_department: String,
    pub faculty: String,
    pub mode: Option<ProgramMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ModeCounts {
    #[serde(rename = "FT")]
    pub ft: u64,
    #[serde(rename = "IPT")]
    pub ipt: u64,
    #[serde(rename = "EPT")]
    pub ept: u64,
    /// Records whose mode is blank or not one of FT/IPT/EPT.
    pub unspecified: u64,
    pub total: u64,
}

impl ModeCounts {
    fn add(&mut self, mode: Option<ProgramMode>) {
        match mode {
            Some(ProgramMode::FT) => self.ft += 1,
            Some(ProgramMode::IPT) => self.ipt += 1,
            Some(ProgramMode::EPT) => self.ept += 1,
            None => self.unspecified += 1,
        }
        self.total += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BucketStat {
    pub name: String,
    #[serde(flatten)]
    pub counts: ModeCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    /// Sorted by total, largest first.
    pub faculty_stats: Vec<BucketStat>,
    pub mode_stats: ModeCounts,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrillDown {
    pub faculty: String,
    pub department_stats: Vec<BucketStat>,
    pub raw_records: Vec<ScholarStatRecord>,
}

impl StatisticsRules {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read statistics rules {}", path.display()))?;
        let rules: Self =
            serde_json::from_str(&raw).context("Failed to parse statistics rules")?;
        Ok(rules)
    }

    /// "PhD engg-CSE" -> "CSE", "cse" -> "CSE", " " -> None.
    pub fn normalize_department(&self, raw: &str) -> Option<String> {
        let mut label = raw.trim().to_lowercase();

        loop {
            let stripped = self
                .strip_prefixes
                .iter()
                .find_map(|prefix| strip_word_prefix(&label, prefix));
            match stripped {
                Some(rest) => label = rest,
                None => break,
            }
        }

        let normalized = label
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();

        if normalized.is_empty() {
            None
        } else {
            Some(normalized)
        }
    }

    pub fn faculty_for(&self, normalized: Option<&str>) -> String {
        let Some(code) = normalized else {
            return self.unmapped_label.clone();
        };
        self.faculties
            .iter()
            .find(|faculty| faculty.department_codes.iter().any(|c| c == code))
            .map(|faculty| faculty.name.clone())
            .unwrap_or_else(|| code.to_string())
    }

    pub fn classify(
        &self,
        scholar_id: Uuid,
        name: String,
        department: &str,
        mode_of_program: &str,
    ) -> ScholarStatRecord {
        let normalized = self.normalize_department(department);
        let faculty = self.faculty_for(normalized.as_deref());
        ScholarStatRecord {
            scholar_id,
            name,
            department: department.to_string(),
            normalized_department: normalized.unwrap_or_else(|| self.unmapped_label.clone()),
            faculty,
            mode: ProgramMode::parse(mode_of_program),
        }
    }

    pub fn aggregate(&self, records: &[ScholarStatRecord]) -> StatisticsReport {
        let mut mode_stats = ModeCounts::default();
        let mut buckets: HashMap<&str, ModeCounts> = HashMap::new();

        for record in records {
            mode_stats.add(record.mode);
            buckets
                .entry(record.faculty.as_str())
                .or_default()
                .add(record.mode);
        }

        StatisticsReport {
            faculty_stats: sorted_buckets(buckets),
            total: mode_stats.total,
            mode_stats,
        }
    }

    /// Re-aggregates the records of one faculty bucket per department code.
    /// `faculty` is a bucket name exactly as reported by `aggregate`.
    pub fn drill_down(&self, records: &[ScholarStatRecord], faculty: &str) -> DrillDown {
        let raw_records: Vec<ScholarStatRecord> = records
            .iter()
            .filter(|record| record.faculty == faculty)
            .cloned()
            .collect();

        let mut departments: HashMap<&str, ModeCounts> = HashMap::new();
        for record in &raw_records {
            departments
                .entry(record.normalized_department.as_str())
                .or_default()
                .add(record.mode);
        }

        let department_stats = sorted_buckets(departments);

        DrillDown {
            faculty: faculty.to_string(),
            department_stats,
            raw_records,
        }
    }
}

fn strip_word_prefix(label: &str, prefix: &str) -> Option<String> {
    let rest = label.strip_prefix(prefix)?;
    // Only strip whole words so "phd" never eats into "pharmacy"
    let boundary = prefix.ends_with('.')
        || rest.is_empty()
        || rest.starts_with(|c: char| c.is_whitespace() || c == '-' || c == '_' || c == '.');
    if !boundary {
        return None;
    }
    Some(
        rest.trim_start_matches(|c: char| c.is_whitespace() || c == '-' || c == '_' || c == '.')
            .to_string(),
    )
}

fn sorted_buckets(buckets: HashMap<&str, ModeCounts>) -> Vec<BucketStat> {
    let ordered: BTreeMap<&str, ModeCounts> = buckets.into_iter().collect();
    let mut stats: Vec<BucketStat> = ordered
        .into_iter()
        .map(|(name, counts)| BucketStat {
            name: name.to_string(),
            counts,
        })
        .collect();
    // Stable sort keeps equal totals in name order
    stats.sort_by(|a, b| b.counts.total.cmp(&a.counts.total));
    stats
}

/// Renders the faculty table as CSV for download.
pub fn report_to_csv(report: &StatisticsReport) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["faculty", "FT", "IPT", "EPT", "unspecified", "total"])?;
    for bucket in &report.faculty_stats {
        writer.write_record([
            bucket.name.clone(),
            bucket.counts.ft.to_string(),
            bucket.counts.ipt.to_string(),
            bucket.counts.ept.to_string(),
            bucket.counts.unspecified.to_string(),
            bucket.counts.total.to_string(),
        ])?;
    }
    let bytes = writer.into_inner().context("Failed to flush CSV writer")?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rules: &StatisticsRules, department: &str, mode: &str) -> ScholarStatRecord {
        rules.classify(Uuid::new_v4(), "Scholar".to_string(), department, mode)
    }

    #[test]
    fn normalizes_prefixed_and_cased_labels() {
        let rules = StatisticsRules::default();
        assert_eq!(rules.normalize_department("PhD engg-CSE").as_deref(), Some("CSE"));
        assert_eq!(rules.normalize_department("cse").as_deref(), Some("CSE"));
        assert_eq!(rules.normalize_department("  Ph.D ECE ").as_deref(), Some("ECE"));
        assert_eq!(
            rules.normalize_department("Department of Pharmacy-Practice").as_deref(),
            Some("PHARMACY PRACTICE")
        );
        assert_eq!(rules.normalize_department("Pharmacology").as_deref(), Some("PHARMACOLOGY"));
        assert_eq!(rules.normalize_department("   "), None);
        assert_eq!(rules.normalize_department("PhD"), None);
    }

    #[test]
    fn unknown_departments_keep_their_own_bucket() {
        let rules = StatisticsRules::default();
        assert_eq!(rules.faculty_for(Some("MBA")), "MBA");
        assert_eq!(rules.faculty_for(Some("CV")), "Engineering");
        assert_eq!(rules.faculty_for(None), "Unmapped");
    }

    #[test]
    fn groups_engineering_and_pharmacy_buckets() {
        let rules = StatisticsRules::default();
        let records = vec![
            record(&rules, "PhD engg-CSE", "FT"),
            record(&rules, "cse", "IPT"),
            record(&rules, "ECE", "FT"),
            record(&rules, "Pharmacy Practice", "EPT"),
        ];

        let report = rules.aggregate(&records);
        assert_eq!(report.total, 4);

        let engineering = report
            .faculty_stats
            .iter()
            .find(|b| b.name == "Engineering")
            .unwrap();
        assert_eq!(engineering.counts.total, 3);
        assert_eq!(engineering.counts.ft, 2);
        assert_eq!(engineering.counts.ipt, 1);

        let pharmacy = report.faculty_stats.iter().find(|b| b.name == "Pharmacy").unwrap();
        assert_eq!(pharmacy.counts.total, 1);
        assert_eq!(pharmacy.counts.ept, 1);

        assert_eq!(report.mode_stats.ft, 2);
        assert_eq!(report.mode_stats.ipt, 1);
        assert_eq!(report.mode_stats.ept, 1);
    }

    #[test]
    fn buckets_are_sorted_by_total_descending() {
        let rules = StatisticsRules::default();
        let records = vec![
            record(&rules, "MBA", "FT"),
            record(&rules, "CSE", "FT"),
            record(&rules, "ME", "FT"),
            record(&rules, "EEE", "EPT"),
            record(&rules, "Pharmacy", "FT"),
            record(&rules, "Pharmaceutics", "IPT"),
            record(&rules, "", "FT"),
        ];

        let report = rules.aggregate(&records);
        let totals: Vec<u64> = report.faculty_stats.iter().map(|b| b.counts.total).collect();
        assert!(totals.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(report.faculty_stats[0].name, "Engineering");
        assert_eq!(report.faculty_stats[1].name, "Pharmacy");
        // equal totals fall back to name order
        let tail: Vec<&str> = report.faculty_stats[2..].iter().map(|b| b.name.as_str()).collect();
        assert_eq!(tail, ["MBA", "Unmapped"]);
    }

    #[test]
    fn malformed_department_and_mode_do_not_fail() {
        let rules = StatisticsRules::default();
        let records = vec![record(&rules, "", "part time?")];
        let report = rules.aggregate(&records);
        assert_eq!(report.faculty_stats[0].name, "Unmapped");
        assert_eq!(report.faculty_stats[0].counts.unspecified, 1);
        assert_eq!(report.mode_stats.unspecified, 1);
    }

    #[test]
    fn drill_down_splits_bucket_by_department() {
        let rules = StatisticsRules::default();
        let records = vec![
            record(&rules, "PhD engg-CSE", "FT"),
            record(&rules, "cse", "FT"),
            record(&rules, "ECE", "EPT"),
            record(&rules, "Pharmacy", "FT"),
        ];

        let drill = rules.drill_down(&records, "Engineering");
        assert_eq!(drill.raw_records.len(), 3);
        assert_eq!(drill.department_stats[0].name, "CSE");
        assert_eq!(drill.department_stats[0].counts.ft, 2);
        assert_eq!(drill.department_stats[1].name, "ECE");
    }

    #[test]
    fn drill_down_does_not_mix_in_lookalike_buckets() {
        let rules = StatisticsRules::default();
        let records = vec![
            record(&rules, "CSE", "FT"),
            record(&rules, "engineering", "IPT"),
        ];

        let report = rules.aggregate(&records);
        let names: Vec<&str> = report.faculty_stats.iter().map(|b| b.name.as_str()).collect();
        assert!(names.contains(&"Engineering"));
        assert!(names.contains(&"ENGINEERING"));

        let drill = rules.drill_down(&records, "Engineering");
        assert_eq!(drill.raw_records.len(), 1);
        assert_eq!(drill.raw_records[0].normalized_department, "CSE");

        let lookalike = rules.drill_down(&records, "ENGINEERING");
        assert_eq!(lookalike.raw_records.len(), 1);
        assert_eq!(lookalike.raw_records[0].mode, Some(ProgramMode::IPT));
    }

    #[test]
    fn parses_mode_aliases() {
        assert_eq!(ProgramMode::parse("ft"), Some(ProgramMode::FT));
        assert_eq!(ProgramMode::parse("Internal Part-Time"), Some(ProgramMode::IPT));
        assert_eq!(ProgramMode::parse("EPT"), Some(ProgramMode::EPT));
        assert_eq!(ProgramMode::parse(""), None);
    }

    #[test]
    fn csv_export_lists_every_bucket() {
        let rules = StatisticsRules::default();
        let records = vec![record(&rules, "CSE", "FT"), record(&rules, "MBA", "IPT")];
        let csv = report_to_csv(&rules.aggregate(&records)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "faculty,FT,IPT,EPT,unspecified,total");
        assert_eq!(lines.len(), 3);
        assert!(lines.contains(&"Engineering,1,0,0,0,1"));
        assert!(lines.contains(&"MBA,0,1,0,0,1"));
    }

    #[test]
    fn rules_round_trip_through_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        let mut rules = StatisticsRules::default();
        rules.faculties.push(FacultyRule {
            name: "Management".to_string(),
            department_codes: vec!["MBA".to_string()],
        });
        std::fs::write(&path, serde_json::to_string(&rules).unwrap()).unwrap();

        let loaded = StatisticsRules::load(&path).unwrap();
        assert_eq!(loaded.faculty_for(Some("MBA")), "Management");
    }
}
