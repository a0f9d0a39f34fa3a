use crate::cms::CmsClient;
use crate::config::SiteConfig;
use crate::templates::Templates;

/// Shared immutable state behind an `Arc`; nothing here is mutated after
/// startup, so no locking crosses requests.
pub struct AppState {
    pub config: SiteConfig,
    pub templates: Templates,
    pub cms: CmsClient,
}
