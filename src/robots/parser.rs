//! Robots.txt rules
//!
//! Allow/Disallow matching is delegated to the robotstxt crate. Crawl-delay
//! is not part of that crate's API, so it is read from the groups here.

use robotstxt::DefaultMatcher;
use url::Url;

/// Parsed robots.txt data for the crawled site
#[derive(Debug, Clone, Default)]
pub struct RobotsRules {
    /// Raw robots.txt body; `None` allows everything
    content: Option<String>,
}

impl RobotsRules {
    /// Creates rules from a robots.txt body
    pub fn from_content(content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
        }
    }

    /// Creates rules that allow everything
    ///
    /// Used when robots.txt is missing or cannot be fetched.
    pub fn allow_all() -> Self {
        Self { content: None }
    }

    /// Checks if a URL may be fetched by the given user agent
    pub fn is_allowed(&self, url: &Url, user_agent: &str) -> bool {
        match self.content.as_deref() {
            None | Some("") => true,
            Some(content) => {
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(content, user_agent, url.as_str())
            }
        }
    }

    /// Gets the Crawl-delay (seconds) that applies to a user agent
    ///
    /// A group naming the agent wins over the `*` group.
    pub fn crawl_delay(&self, user_agent: &str) -> Option<f64> {
        let content = self.content.as_deref()?;
        let agent = product_token(user_agent);

        let mut group_agents: Vec<String> = Vec::new();
        let mut group_has_rules = false;
        let mut for_agent = None;
        let mut for_wildcard = None;

        for line in content.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    // A user-agent line after rules starts a new group
                    if group_has_rules {
                        group_agents.clear();
                        group_has_rules = false;
                    }
                    group_agents.push(value.to_lowercase());
                }
                "crawl-delay" => {
                    group_has_rules = true;
                    let Ok(delay) = value.parse::<f64>() else {
                        continue;
                    };
                    if group_agents.iter().any(|ua| ua != "*" && *ua == agent) {
                        for_agent = Some(delay);
                    } else if group_agents.iter().any(|ua| ua == "*") {
                        for_wildcard = Some(delay);
                    }
                }
                _ => group_has_rules = true,
            }
        }

        for_agent.or(for_wildcard)
    }
}

/// Extracts the lowercased product token from a User-Agent string
///
/// `Mozilla/5.0 (X11; Linux x86_64)` yields `mozilla`. Group names in
/// robots.txt are compared against this token, as the allow/disallow
/// matcher does.
fn product_token(user_agent: &str) -> String {
    user_agent
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_alphabetic() || *c == '_' || *c == '-')
        .collect::<String>()
        .to_lowercase()
}
