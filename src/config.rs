/// Connection settings for the headless CMS, read once at startup and passed
/// into the client so tests can substitute their own.
#[derive(Debug, Clone)]
pub struct CmsConfig {
    pub base_url: String,
    /// Absent token is tolerated at construction; any call that actually
    /// reaches for the CMS fails with a configuration error instead.
    pub api_token: Option<String>,
}

impl CmsConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("CMS_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:1337".to_string()),
            api_token: std::env::var("CMS_API_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }

    /// Media entries come back with CDN-relative paths like `/uploads/x.jpg`;
    /// absolute URLs are passed through untouched.
    pub fn media_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), path)
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub cms: CmsConfig,
    pub port: u16,
    pub watermark: String,
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self {
            cms: CmsConfig::from_env(),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            watermark: std::env::var("WATERMARK_TEXT")
                .unwrap_or_else(|_| "DY Productions".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CmsConfig;

    fn config(base_url: &str) -> CmsConfig {
        CmsConfig {
            base_url: base_url.to_string(),
            api_token: None,
        }
    }

    #[test]
    fn media_url_prefixes_relative_paths() {
        let cfg = config("http://localhost:1337");
        assert_eq!(
            cfg.media_url("/uploads/hero.jpg"),
            "http://localhost:1337/uploads/hero.jpg"
        );
    }

    #[test]
    fn media_url_tolerates_trailing_slash() {
        let cfg = config("http://localhost:1337/");
        assert_eq!(
            cfg.media_url("/uploads/hero.jpg"),
            "http://localhost:1337/uploads/hero.jpg"
        );
    }

    #[test]
    fn media_url_passes_absolute_urls_through() {
        let cfg = config("http://localhost:1337");
        assert_eq!(
            cfg.media_url("https://cdn.example.com/hero.jpg"),
            "https://cdn.example.com/hero.jpg"
        );
    }
}
