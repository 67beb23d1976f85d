use reqwest::blocking::Client;
use reqwest::redirect;
use tracing::debug;

use crate::config::Config;
use crate::error::Result;

const MAX_REDIRECTS: usize = 100;

/// Blocking HTML fetcher shared by every page load of a run.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let redirect_policy = redirect::Policy::custom(|attempt| {
            if attempt.previous().len() > MAX_REDIRECTS {
                attempt.error("Too many redirects (>100)")
            } else {
                attempt.follow()
            }
        });

        let client = Client::builder()
            .redirect(redirect_policy)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }

    pub fn fetch_html(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);
        let html = self
            .client
            .get(url)
            .header("Accept-Language", "en-GB,en;q=0.9")
            .send()?
            .error_for_status()?
            .text()?;
        debug!("Fetched {} bytes from {}", html.len(), url);
        Ok(html)
    }
}
