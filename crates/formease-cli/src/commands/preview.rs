use anyhow::{Context, Result};
use colored::Colorize;
use formease::{BuilderConfig, FormBuilder, Markup, DOCTYPE};
use maud::html;
use std::fs;
use std::path::Path;

/// Standalone page: the rendered form, plus the JSON structure when enabled
pub fn render_page(builder: &FormBuilder, interactive: bool, show_json: bool) -> Result<Markup> {
    let title = builder.title().unwrap_or("Form Preview");
    let form = builder.preview(!interactive).render();
    let json = if show_json {
        Some(builder.json_view()?)
    } else {
        None
    };

    Ok(html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
            }
            body {
                main.formease-preview {
                    h2 { (title) }
                    (form)
                }
                @if let Some(json) = json {
                    aside.formease-json {
                        h2 { "JSON Structure" }
                        pre { code { (json) } }
                    }
                }
            }
        }
    })
}

pub fn execute(
    config: &BuilderConfig,
    file: Option<&Path>,
    interactive: bool,
    out: Option<&Path>,
) -> Result<()> {
    let builder = match file {
        Some(path) => {
            let mut builder = FormBuilder::from_document(super::load_document(path)?);
            if builder.title().is_none() {
                builder.set_title(config.project.title.clone());
            }
            builder
        }
        None => FormBuilder::from_config(config).context("Failed to load initial form")?,
    };

    let interactive = interactive || !config.preview.read_only;
    let page = render_page(&builder, interactive, config.preview.show_json)?.into_string();

    match out {
        Some(path) => {
            fs::write(path, page)
                .with_context(|| format!("Failed to write preview: {:?}", path))?;
            eprintln!(
                "{} {} ({} fields)",
                "Preview written to".green().bold(),
                path.display(),
                builder.fields().len()
            );
        }
        None => println!("{}", page),
    }

    Ok(())
}
