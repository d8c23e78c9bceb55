//! Add command
//!
//! Scaffolds a form component file wired to a project id, using the
//! preferences recorded by `formforge config init`.

use std::fs;
use std::path::Path;

use colored::Colorize;

use crate::config::ScaffoldConfig;

pub async fn handle(project_id: &str) -> Result<(), String> {
    println!(
        "{}",
        format!("Creating component with id: {}", project_id).yellow()
    );

    let config = match ScaffoldConfig::load()? {
        Some(config) => config,
        None => {
            println!("{}", "No config file found".red());
            return Err("Run `formforge config init` before adding components".into());
        }
    };

    let base = config.dir_pref.path();
    fs::create_dir_all(base).map_err(|e| e.to_string())?;

    let file_name = format!("Form.{}", config.file_type.extension());
    let file_path = Path::new(base).join(&file_name);
    fs::write(&file_path, component_stub(project_id)).map_err(|e| e.to_string())?;

    println!("{}", format!("{} created in {}", file_name, base).green());
    Ok(())
}

fn component_stub(project_id: &str) -> String {
    format!(
        "// Form component\n// Project: {}\n// Renders the form served at /api/preview/{}\n",
        project_id, project_id
    )
}
