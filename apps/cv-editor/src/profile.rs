//! View model and Markdown rendering for the public profile page.

use serde::Serialize;

use crate::models::cv::{CvRecord, ProjectEntry, ResearchEntry};
use crate::store::entries::{decode_projects, decode_research};

/// Everything a profile view or edit form needs, derived from one load.
#[derive(Debug, Clone, Serialize)]
pub struct CvProfile {
    pub record: CvRecord,
    pub certificates: Vec<String>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub languages: Vec<String>,
    pub hobbies: Vec<String>,
    pub research: Vec<ResearchEntry>,
    pub projects: Vec<ProjectEntry>,
}

impl From<CvRecord> for CvProfile {
    fn from(record: CvRecord) -> Self {
        Self {
            certificates: record.certificate_list(),
            technical_skills: record.technical_skill_list(),
            soft_skills: record.soft_skill_list(),
            languages: record.language_list(),
            hobbies: record.hobby_list(),
            research: decode_research(&record.research_json),
            projects: decode_projects(&record.projects_json),
            record,
        }
    }
}

/// Renders the profile as a Markdown page. Sections with no content are omitted.
pub fn render_profile_markdown(profile: &CvProfile) -> String {
    let cv = &profile.record;
    let title = if cv.name.trim().is_empty() {
        "Curriculum Vitae"
    } else {
        cv.name.trim()
    };
    let mut md = format!("# {title}\n\n");

    if !cv.avatar.is_empty() {
        md.push_str(&format!("![avatar]({})\n\n", cv.avatar));
    }

    push_section(
        &mut md,
        "Personal",
        &[
            ("Student ID", cv.student_id.as_str()),
            ("Date of birth", cv.birth_date.as_str()),
            ("Class", cv.class_name.as_str()),
            ("Faculty", cv.faculty.as_str()),
            ("Email", cv.email.as_str()),
            ("Phone", cv.phone.as_str()),
            ("Address", cv.address.as_str()),
        ],
    );
    if !cv.bio.trim().is_empty() {
        md.push_str(&format!("{}\n\n", cv.bio.trim()));
    }

    push_section(
        &mut md,
        "Education",
        &[
            ("School", cv.school.as_str()),
            ("Major", cv.major.as_str()),
            ("GPA", cv.gpa.as_str()),
            ("Certificates", profile.certificates.join(", ").as_str()),
        ],
    );

    push_section(
        &mut md,
        "Skills",
        &[
            ("Technical", profile.technical_skills.join(", ").as_str()),
            ("Soft skills", profile.soft_skills.join(", ").as_str()),
            ("Languages", profile.languages.join(", ").as_str()),
        ],
    );

    if !profile.research.is_empty() {
        md.push_str("## Research\n\n");
        for entry in &profile.research {
            md.push_str(&format!("### {}\n", entry.title));
            push_details(
                &mut md,
                &[
                    ("Period", entry.period.as_str()),
                    ("Role", entry.role.as_str()),
                    ("Description", entry.description.as_str()),
                    ("Activities", entry.activities.as_str()),
                    ("Outcome", entry.outcome.as_str()),
                ],
            );
            md.push('\n');
        }
    }

    if !profile.projects.is_empty() {
        md.push_str("## Projects\n\n");
        for entry in &profile.projects {
            md.push_str(&format!("### {}\n", entry.title));
            push_details(
                &mut md,
                &[
                    ("Period", entry.period.as_str()),
                    ("Role", entry.role.as_str()),
                    ("Technologies", entry.technologies.as_str()),
                    ("Description", entry.description.as_str()),
                ],
            );
            md.push('\n');
        }
    }

    push_section(
        &mut md,
        "Hobbies & Goals",
        &[
            ("Hobbies", profile.hobbies.join(", ").as_str()),
            ("Career goal", cv.career_goal.as_str()),
        ],
    );

    md
}

fn push_section(md: &mut String, heading: &str, rows: &[(&str, &str)]) {
    if rows.iter().all(|(_, value)| value.trim().is_empty()) {
        return;
    }
    md.push_str(&format!("## {heading}\n\n"));
    push_details(md, rows);
    md.push('\n');
}

fn push_details(md: &mut String, rows: &[(&str, &str)]) {
    for (label, value) in rows {
        let value = value.trim();
        if !value.is_empty() {
            md.push_str(&format!("- **{label}:** {value}\n"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_derives_lists_and_entries() {
        let profile = CvProfile::from(CvRecord {
            technical_skills: "Rust| Go ".into(),
            research_json: r#"[{"title":"NLP"}]"#.into(),
            projects_json: "{broken".into(),
            ..Default::default()
        });
        assert_eq!(profile.technical_skills, vec!["Rust", "Go"]);
        assert_eq!(profile.research.len(), 1);
        assert!(profile.projects.is_empty());
    }

    #[test]
    fn test_render_default_profile_is_minimal() {
        let md = render_profile_markdown(&CvProfile::from(CvRecord::default()));
        assert!(md.starts_with("# Curriculum Vitae\n"));
        assert!(md.contains("![avatar](/images/avatar.jpg)"));
        assert!(!md.contains("## Education"));
        assert!(!md.contains("## Research"));
    }

    #[test]
    fn test_render_full_profile_sections() {
        let md = render_profile_markdown(&CvProfile::from(CvRecord {
            name: "Phạm Thu Trang".into(),
            school: "ĐH Quốc gia".into(),
            certificates: "IELTS|JLPT N3".into(),
            languages: "English".into(),
            projects_json: r#"[{"title":"CV editor","technologies":"Rust"}]"#.into(),
            career_goal: "Backend engineer".into(),
            ..Default::default()
        }));

        assert!(md.starts_with("# Phạm Thu Trang\n"));
        assert!(md.contains("- **Certificates:** IELTS, JLPT N3\n"));
        assert!(md.contains("- **Languages:** English\n"));
        assert!(md.contains("### CV editor\n- **Technologies:** Rust\n"));
        assert!(md.contains("## Hobbies & Goals\n\n- **Career goal:** Backend engineer\n"));
        assert!(!md.contains("## Personal"));
    }
}
