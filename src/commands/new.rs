//! Create a new content file

use anyhow::Result;
use std::fs;

use crate::content::ContentKind;
use crate::Site;

/// Create a new content source with front-matter stubbed out.
///
/// The file name (and therefore the slug) is the slugified title.
pub fn create_item(site: &Site, kind: ContentKind, title: &str) -> Result<()> {
    let target_dir = site.kind_dir(kind);
    fs::create_dir_all(&target_dir)?;

    let file_name = format!("{}.md", slug::slugify(title));
    let file_path = target_dir.join(&file_name);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let date = chrono::Local::now().format("%Y-%m-%d");
    let embed_stub = match kind {
        ContentKind::Dashboard => "embedUrl: ''\n",
        _ => "",
    };
    let content = format!(
        "---\ntitle: {}\ndate: {}\nsummary: ''\ntags: []\n{}---\n",
        title, date, embed_stub
    );

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}
