use crate::config::Config;
use crate::fetch::PageFetcher;
use crate::pipeline::HostPolicy;

/// Shared application state passed to all handlers.
/// Read-only after startup; requests never share mutable state.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: PageFetcher,
    pub host_policy: HostPolicy,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(AppState {
            fetcher: PageFetcher::new(config.fetch_timeout, &config.user_agent)?,
            host_policy: if config.allow_private_hosts {
                HostPolicy::AllowPrivate
            } else {
                HostPolicy::PublicOnly
            },
        })
    }
}
