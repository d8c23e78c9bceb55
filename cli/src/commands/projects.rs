//! Projects commands

use super::ApiClient;
use crate::{output::OutputFormat, ProjectCommands};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    /// JSON-encoded field list, as stored
    pub fields: String,
    pub live: bool,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Tabled)]
struct ProjectRow {
    id: String,
    name: String,
    fields: usize,
    live: bool,
    updated: String,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        let count = serde_json::from_str::<Vec<serde_json::Value>>(&project.fields)
            .map(|f| f.len())
            .unwrap_or(0);
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            fields: count,
            live: project.live,
            updated: project.updated_at.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseCard {
    pub id: String,
    pub submitted_at: String,
    pub fields: Vec<ResponseField>,
    /// Raw submitted values, keyed by field name
    pub values: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseField {
    pub name: String,
    pub field_type: String,
    pub value: serde_json::Value,
}

pub async fn handle(
    action: ProjectCommands,
    client: &ApiClient,
    format: OutputFormat,
) -> Result<(), String> {
    match action {
        ProjectCommands::List => {
            let projects: Vec<Project> = client.get("/api/projects").await?;
            let rows: Vec<ProjectRow> = projects.iter().map(ProjectRow::from).collect();
            format.print_rows(&rows);
        }
        ProjectCommands::Get { id } => {
            let project: Project = client.get(&format!("/api/projects/{}", id)).await?;
            format.print(&project);
        }
        ProjectCommands::Create { name, description } => {
            let body = serde_json::json!({ "name": name, "description": description });
            let project: Project = client.post("/api/projects", &body).await?;
            println!("Created project: {}", project.id);
        }
        ProjectCommands::Responses { id } => {
            let cards: Vec<ResponseCard> =
                client.get(&format!("/api/projects/{}/responses", id)).await?;
            format.print(&cards);
        }
    }
    Ok(())
}
