//! Static site generation around the markdown converter.
//!
//! Everything here is file plumbing: reading sources and the template,
//! mirroring directory trees, and copying static assets.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::{Config, TemplateConfig};
use crate::error::{Error, Result};
use crate::html::convert;
use crate::parser::extract_title;

/// Fill the template with the document's title and rendered content.
pub fn render_page(template: &str, markdown: &str, placeholders: &TemplateConfig) -> Result<String> {
    let content = convert(markdown)?.to_html()?;
    let title = extract_title(markdown)?;

    Ok(template
        .replace(&placeholders.title_placeholder, &title)
        .replace(&placeholders.content_placeholder, &content))
}

/// Render one markdown file into `dest_path`, creating parent directories.
pub fn generate_page(
    template_path: &Path,
    src_path: &Path,
    dest_path: &Path,
    config: &Config,
) -> Result<()> {
    info!(
        "Generating page from {} to {} using {}",
        src_path.display(),
        dest_path.display(),
        template_path.display()
    );

    let template = read(template_path)?;
    let markdown = read(src_path)?;

    let page = render_page(&template, &markdown, &config.template).map_err(|e| Error::Page {
        path: src_path.to_path_buf(),
        source: Box::new(e),
    })?;

    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(dest_path, page).map_err(|e| Error::io(dest_path, e))
}

/// Render every file under `src_dir` into the mirrored path under
/// `dest_dir`, with `.md` becoming `.html`. Returns the page count.
pub fn generate_pages(
    template_path: &Path,
    src_dir: &Path,
    dest_dir: &Path,
    config: &Config,
) -> Result<usize> {
    let mut count = 0;
    for entry in sorted_entries(src_dir)? {
        let Some(name) = entry.file_name() else {
            continue;
        };
        let dest_path = dest_dir.join(name);

        if entry.is_dir() {
            count += generate_pages(template_path, &entry, &dest_path, config)?;
        } else {
            let dest_path = html_path(&dest_path);
            generate_page(template_path, &entry, &dest_path, config)?;
            count += 1;
        }
    }
    Ok(count)
}

fn html_path(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext == "md" => path.with_extension("html"),
        _ => path.to_path_buf(),
    }
}

/// Remove `dir` if it exists and recreate it empty.
pub fn clear_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
}

/// Recursively copy `src` into `dest`. Returns the number of files copied.
pub fn copy_dir(src: &Path, dest: &Path) -> Result<usize> {
    if !src.is_dir() {
        return Err(Error::MissingDirectory(src.to_path_buf()));
    }
    fs::create_dir_all(dest).map_err(|e| Error::io(dest, e))?;

    let mut count = 0;
    for entry in sorted_entries(src)? {
        let Some(name) = entry.file_name() else {
            continue;
        };
        let dest_path = dest.join(name);

        if entry.is_dir() {
            count += copy_dir(&entry, &dest_path)?;
        } else {
            fs::copy(&entry, &dest_path).map_err(|e| Error::io(&entry, e))?;
            info!("copied {} to {}", entry.display(), dest_path.display());
            count += 1;
        }
    }
    Ok(count)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| Error::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::io(dir, e))?;
    entries.sort();
    Ok(entries)
}
