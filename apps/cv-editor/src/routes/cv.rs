//! Axum route handlers for viewing and editing the CV.

use axum::{extract::State, http::header, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::cv::{CvRecord, ProjectEntry, ResearchEntry, DEFAULT_AVATAR};
use crate::profile::{render_profile_markdown, CvProfile};
use crate::state::AppState;
use crate::store::entries::{encode_projects, encode_research};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Body of `PUT /api/v1/cv`. Missing scalar fields are stored empty.
///
/// Research and project lists may be sent structured (`research`, `projects`)
/// or as raw JSON text (`research_json`, `projects_json`); structured wins.
/// With neither, the list is stored as `[]`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SaveCvRequest {
    pub name: String,
    pub student_id: String,
    pub birth_date: String,
    pub class_name: String,
    pub faculty: String,
    pub avatar: Option<String>,
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
    pub research: Option<Vec<ResearchEntry>>,
    pub research_json: Option<String>,
    pub projects: Option<Vec<ProjectEntry>>,
    pub projects_json: Option<String>,
    pub hobbies: String,
    pub career_goal: String,
}

impl SaveCvRequest {
    pub fn into_record(self) -> CvRecord {
        let research_json = match (self.research, self.research_json) {
            (Some(entries), _) => encode_research(&entries),
            (None, Some(raw)) => raw,
            (None, None) => "[]".to_string(),
        };
        let projects_json = match (self.projects, self.projects_json) {
            (Some(entries), _) => encode_projects(&entries),
            (None, Some(raw)) => raw,
            (None, None) => "[]".to_string(),
        };

        CvRecord {
            name: self.name,
            student_id: self.student_id,
            birth_date: self.birth_date,
            class_name: self.class_name,
            faculty: self.faculty,
            avatar: self.avatar.unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
            email: self.email,
            phone: self.phone,
            address: self.address,
            bio: self.bio,
            school: self.school,
            major: self.major,
            gpa: self.gpa,
            certificates: self.certificates,
            technical_skills: self.technical_skills,
            soft_skills: self.soft_skills,
            languages: self.languages,
            research_json,
            projects_json,
            hobbies: self.hobbies,
            career_goal: self.career_goal,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveCvResponse {
    pub message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/cv
///
/// Returns the stored record with its derived lists and decoded entries.
/// Serves both the profile view and the edit form.
pub async fn handle_get_cv(State(state): State<AppState>) -> Result<Json<CvProfile>, AppError> {
    let record = load_record(&state).await?;
    Ok(Json(CvProfile::from(record)))
}

/// GET /api/v1/cv/profile
///
/// Returns the profile page rendered as Markdown.
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let record = load_record(&state).await?;
    let md = render_profile_markdown(&CvProfile::from(record));
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        md,
    ))
}

/// PUT /api/v1/cv
///
/// Replaces the stored record. Save failures are reported to the caller.
pub async fn handle_save_cv(
    State(state): State<AppState>,
    Json(request): Json<SaveCvRequest>,
) -> Result<Json<SaveCvResponse>, AppError> {
    let record = request.into_record();
    let store = state.store.clone();

    tokio::task::spawn_blocking(move || store.save(&record))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed saving CV: {e}")))?
        .map_err(|e| AppError::Storage(format!("{e:#}")))?;

    Ok(Json(SaveCvResponse {
        message: "CV saved".to_string(),
    }))
}

async fn load_record(state: &AppState) -> Result<CvRecord, AppError> {
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || store.load())
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed loading CV: {e}")))
}
