use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Avatar shown until the owner uploads one.
pub const DEFAULT_AVATAR: &str = "/images/avatar.jpg";

/// Separator used by the delimited-list fields.
pub const LIST_DELIMITER: char = '|';

/// Persisted field names, in the order they are written to disk.
pub const FIELD_ORDER: [&str; 21] = [
    // Personal
    "HoTen",
    "MSSV",
    "NgaySinh",
    "Lop",
    "Khoa",
    "AnhDaiDien",
    "Email",
    "SoDienThoai",
    "DiaChi",
    "GioiThieu",
    // Education
    "TruongDaoTao",
    "NganhHoc",
    "GPA",
    "ChungChi",
    // Skills
    "KyNangChuyenMon",
    "KyNangMem",
    "NgoaiNgu",
    // Research & projects (JSON array text)
    "NCKH",
    "DuAn",
    // Hobbies & goals
    "SoThich",
    "MucTieuNgheNghiep",
];

/// The single CV profile record.
///
/// `certificates`, `technical_skills`, `soft_skills`, `languages` and `hobbies`
/// hold `|`-delimited text; the `*_list` accessors derive the ordered lists.
/// `research_json` and `projects_json` hold JSON array text decoded by
/// [`crate::store::entries`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvRecord {
    pub name: String,
    pub student_id: String,
    pub birth_date: String,
    pub class_name: String,
    pub faculty: String,
    pub avatar: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub bio: String,

    pub school: String,
    pub major: String,
    pub gpa: String,
    pub certificates: String,

    pub technical_skills: String,
    pub soft_skills: String,
    pub languages: String,

    pub research_json: String,
    pub projects_json: String,

    pub hobbies: String,
    pub career_goal: String,
}

impl Default for CvRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            student_id: String::new(),
            birth_date: String::new(),
            class_name: String::new(),
            faculty: String::new(),
            avatar: DEFAULT_AVATAR.to_string(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            bio: String::new(),
            school: String::new(),
            major: String::new(),
            gpa: String::new(),
            certificates: String::new(),
            technical_skills: String::new(),
            soft_skills: String::new(),
            languages: String::new(),
            research_json: String::new(),
            projects_json: String::new(),
            hobbies: String::new(),
            career_goal: String::new(),
        }
    }
}

impl CvRecord {
    /// Returns `(field name, value)` pairs in [`FIELD_ORDER`].
    pub fn fields(&self) -> [(&'static str, &str); 21] {
        [
            (FIELD_ORDER[0], self.name.as_str()),
            (FIELD_ORDER[1], self.student_id.as_str()),
            (FIELD_ORDER[2], self.birth_date.as_str()),
            (FIELD_ORDER[3], self.class_name.as_str()),
            (FIELD_ORDER[4], self.faculty.as_str()),
            (FIELD_ORDER[5], self.avatar.as_str()),
            (FIELD_ORDER[6], self.email.as_str()),
            (FIELD_ORDER[7], self.phone.as_str()),
            (FIELD_ORDER[8], self.address.as_str()),
            (FIELD_ORDER[9], self.bio.as_str()),
            (FIELD_ORDER[10], self.school.as_str()),
            (FIELD_ORDER[11], self.major.as_str()),
            (FIELD_ORDER[12], self.gpa.as_str()),
            (FIELD_ORDER[13], self.certificates.as_str()),
            (FIELD_ORDER[14], self.technical_skills.as_str()),
            (FIELD_ORDER[15], self.soft_skills.as_str()),
            (FIELD_ORDER[16], self.languages.as_str()),
            (FIELD_ORDER[17], self.research_json.as_str()),
            (FIELD_ORDER[18], self.projects_json.as_str()),
            (FIELD_ORDER[19], self.hobbies.as_str()),
            (FIELD_ORDER[20], self.career_goal.as_str()),
        ]
    }

    /// Builds a record from a field-name → value map.
    /// Absent keys fall back to the [`Default`] values; unknown keys are ignored.
    pub fn from_fields(data: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str, fallback: String| data.get(key).cloned().unwrap_or(fallback);

        Self {
            name: get("HoTen", defaults.name),
            student_id: get("MSSV", defaults.student_id),
            birth_date: get("NgaySinh", defaults.birth_date),
            class_name: get("Lop", defaults.class_name),
            faculty: get("Khoa", defaults.faculty),
            avatar: get("AnhDaiDien", defaults.avatar),
            email: get("Email", defaults.email),
            phone: get("SoDienThoai", defaults.phone),
            address: get("DiaChi", defaults.address),
            bio: get("GioiThieu", defaults.bio),
            school: get("TruongDaoTao", defaults.school),
            major: get("NganhHoc", defaults.major),
            gpa: get("GPA", defaults.gpa),
            certificates: get("ChungChi", defaults.certificates),
            technical_skills: get("KyNangChuyenMon", defaults.technical_skills),
            soft_skills: get("KyNangMem", defaults.soft_skills),
            languages: get("NgoaiNgu", defaults.languages),
            research_json: get("NCKH", defaults.research_json),
            projects_json: get("DuAn", defaults.projects_json),
            hobbies: get("SoThich", defaults.hobbies),
            career_goal: get("MucTieuNgheNghiep", defaults.career_goal),
        }
    }

    pub fn certificate_list(&self) -> Vec<String> {
        split_delimited(&self.certificates)
    }

    pub fn technical_skill_list(&self) -> Vec<String> {
        split_delimited(&self.technical_skills)
    }

    pub fn soft_skill_list(&self) -> Vec<String> {
        split_delimited(&self.soft_skills)
    }

    pub fn language_list(&self) -> Vec<String> {
        split_delimited(&self.languages)
    }

    pub fn hobby_list(&self) -> Vec<String> {
        split_delimited(&self.hobbies)
    }
}

/// Splits `|`-delimited text into trimmed, non-blank segments, preserving order
/// and duplicates.
///
/// A segment made only of whitespace and stray commas (a leftover of
/// comma-separated input such as `Go |,|Rust`) counts as blank.
pub fn split_delimited(raw: &str) -> Vec<String> {
    raw.split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|segment| !is_blank_segment(segment))
        .map(str::to_string)
        .collect()
}

/// Wider than a plain empty check: a comma-only segment such as `,` is dropped
/// too, even when it was typed on purpose.
fn is_blank_segment(segment: &str) -> bool {
    segment.chars().all(|c| c.is_whitespace() || c == ',')
}

/// One research (NCKH) entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchEntry {
    pub title: String,
    pub description: String,
    pub period: String,
    pub activities: String,
    pub role: String,
    pub outcome: String,
}

/// One project entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    pub period: String,
    pub technologies: String,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_uses_default_avatar() {
        let cv = CvRecord::default();
        assert_eq!(cv.avatar, DEFAULT_AVATAR);
        assert!(cv.fields().iter().all(|(key, value)| {
            if *key == "AnhDaiDien" {
                *value == DEFAULT_AVATAR
            } else {
                value.is_empty()
            }
        }));
    }

    #[test]
    fn test_split_delimited_drops_blank_and_trims() {
        assert_eq!(
            split_delimited("C++|  Go |   |Rust"),
            vec!["C++", "Go", "Rust"]
        );
    }

    #[test]
    fn test_split_delimited_drops_stray_comma_segment() {
        assert_eq!(split_delimited("C++|  Go |,|Rust"), vec!["C++", "Go", "Rust"]);
    }

    #[test]
    fn test_split_delimited_comma_only_value_is_empty() {
        assert!(split_delimited(",").is_empty());
        assert!(split_delimited(" , |,,").is_empty());
    }

    #[test]
    fn test_split_delimited_keeps_commas_inside_segment() {
        assert_eq!(
            split_delimited("Reading, writing|Go"),
            vec!["Reading, writing", "Go"]
        );
    }

    #[test]
    fn test_split_delimited_preserves_duplicates_and_order() {
        assert_eq!(split_delimited("b|a|b"), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_split_delimited_blank_input() {
        assert!(split_delimited("").is_empty());
        assert!(split_delimited("  |  | ").is_empty());
    }

    #[test]
    fn test_derived_accessors_read_their_own_field() {
        let cv = CvRecord {
            certificates: "IELTS 7.0|TOEIC".into(),
            technical_skills: "Rust|SQL".into(),
            soft_skills: "Teamwork".into(),
            languages: "English | Japanese".into(),
            hobbies: "Chess||Running".into(),
            ..Default::default()
        };
        assert_eq!(cv.certificate_list(), vec!["IELTS 7.0", "TOEIC"]);
        assert_eq!(cv.technical_skill_list(), vec!["Rust", "SQL"]);
        assert_eq!(cv.soft_skill_list(), vec!["Teamwork"]);
        assert_eq!(cv.language_list(), vec!["English", "Japanese"]);
        assert_eq!(cv.hobby_list(), vec!["Chess", "Running"]);
    }

    #[test]
    fn test_fields_follow_field_order() {
        let keys: Vec<&str> = CvRecord::default().fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, FIELD_ORDER.to_vec());
    }

    #[test]
    fn test_from_fields_applies_defaults() {
        let mut data = HashMap::new();
        data.insert("HoTen".to_string(), "Nguyễn Văn A".to_string());
        data.insert("Unknown".to_string(), "ignored".to_string());

        let cv = CvRecord::from_fields(&data);
        assert_eq!(cv.name, "Nguyễn Văn A");
        assert_eq!(cv.avatar, DEFAULT_AVATAR);
        assert_eq!(cv.email, "");
    }

    #[test]
    fn test_from_fields_keeps_explicit_empty_avatar() {
        let mut data = HashMap::new();
        data.insert("AnhDaiDien".to_string(), String::new());
        assert_eq!(CvRecord::from_fields(&data).avatar, "");
    }

    #[test]
    fn test_entries_accept_missing_keys() {
        let entry: ProjectEntry = serde_json::from_str(r#"{"title":"Blog"}"#).unwrap();
        assert_eq!(entry.title, "Blog");
        assert_eq!(entry.technologies, "");
    }
}
