use tokio::fs;

const CONTENT_DIR: &str = "content";

/// Page shells loaded once at startup. `layout` carries `{{ banner }}` and
/// `{{ content }}` placeholders; `home` carries `{{ carousel }}`; `not_found`
/// carries `{{slug}}`.
#[derive(Debug, Clone)]
pub struct Templates {
    pub layout: String,
    pub banner: String,
    pub home: String,
    pub not_found: String,
}

pub async fn load_templates() -> Result<Templates, std::io::Error> {
    Ok(Templates {
        layout: fs::read_to_string(format!("{CONTENT_DIR}/layout.html")).await?,
        banner: fs::read_to_string(format!("{CONTENT_DIR}/banner.html")).await?,
        home: fs::read_to_string(format!("{CONTENT_DIR}/home.html")).await?,
        not_found: fs::read_to_string(format!("{CONTENT_DIR}/not_found.html")).await?,
    })
}
