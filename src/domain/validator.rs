use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_ASSET_LINKS_ENDPOINT: &str = "https://{domain}/.well-known/assetlinks.json";

const ANDROID_APP_NAMESPACE: &str = "android_app";
const LOGIN_RELATIONS: [&str; 2] = [
    "delegate_permission/common.get_login_creds",
    "delegate_permission/common.handle_all_urls",
];

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Asset links request for {domain} failed: {source}")]
    Request {
        domain: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Asset links request for {domain} returned HTTP {status}")]
    Status { domain: String, status: u16 },

    #[error("Association cache lock poisoned")]
    CachePoisoned,
}

/// Confirms that a web domain is legitimately associated with a package.
pub trait AssociationValidator {
    fn is_valid(&self, web_domain: &str, package_name: &str) -> Result<bool, ValidationError>;
}

/// Accepts every association.
pub struct AllowAll;

impl AssociationValidator for AllowAll {
    fn is_valid(&self, _web_domain: &str, _package_name: &str) -> Result<bool, ValidationError> {
        Ok(true)
    }
}

/// Answers from a fixed domain → packages table.
#[derive(Debug, Clone, Default)]
pub struct StaticAssociations {
    associations: HashMap<String, Vec<String>>,
}

impl StaticAssociations {
    pub fn new(associations: HashMap<String, Vec<String>>) -> Self {
        Self { associations }
    }

    pub fn with(mut self, domain: &str, package_name: &str) -> Self {
        self.associations
            .entry(domain.to_string())
            .or_default()
            .push(package_name.to_string());
        self
    }
}

impl AssociationValidator for StaticAssociations {
    fn is_valid(&self, web_domain: &str, package_name: &str) -> Result<bool, ValidationError> {
        Ok(self
            .associations
            .get(web_domain)
            .map(|packages| packages.iter().any(|p| p == package_name))
            .unwrap_or(false))
    }
}

// ============================================================================
// Digital Asset Links
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AssetStatement {
    #[serde(default)]
    pub relation: Vec<String>,
    pub target: AssetTarget,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetTarget {
    pub namespace: String,
    pub package_name: Option<String>,
}

/// True when a statement delegates login credentials to `package_name`.
pub fn statements_allow(statements: &[AssetStatement], package_name: &str) -> bool {
    statements.iter().any(|s| {
        s.target.namespace == ANDROID_APP_NAMESPACE
            && s.target.package_name.as_deref() == Some(package_name)
            && s.relation.iter().any(|r| LOGIN_RELATIONS.contains(&r.as_str()))
    })
}

/// Fetches `assetlinks.json` from the claimed domain and caches verdicts per
/// (domain, package). Failed lookups are not cached.
pub struct AssetLinksValidator {
    endpoint_template: String,
    client: reqwest::blocking::Client,
    cache: Mutex<HashMap<(String, String), bool>>,
}

impl AssetLinksValidator {
    pub fn new(endpoint_template: &str) -> Self {
        Self::with_client(endpoint_template, reqwest::blocking::Client::new())
    }

    pub fn with_client(endpoint_template: &str, client: reqwest::blocking::Client) -> Self {
        Self {
            endpoint_template: endpoint_template.to_string(),
            client,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn endpoint_for(&self, web_domain: &str) -> String {
        self.endpoint_template.replace("{domain}", web_domain)
    }

    fn cached(&self, key: &(String, String)) -> Result<Option<bool>, ValidationError> {
        let cache = self.cache.lock().map_err(|_| ValidationError::CachePoisoned)?;
        Ok(cache.get(key).copied())
    }

    fn fetch(&self, web_domain: &str) -> Result<Vec<AssetStatement>, ValidationError> {
        let url = self.endpoint_for(web_domain);
        debug!("fetching asset links from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| ValidationError::Request {
                domain: web_domain.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(ValidationError::Status {
                domain: web_domain.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.json().map_err(|source| ValidationError::Request {
            domain: web_domain.to_string(),
            source,
        })
    }
}

impl Default for AssetLinksValidator {
    fn default() -> Self {
        Self::new(DEFAULT_ASSET_LINKS_ENDPOINT)
    }
}

impl AssociationValidator for AssetLinksValidator {
    fn is_valid(&self, web_domain: &str, package_name: &str) -> Result<bool, ValidationError> {
        let key = (web_domain.to_string(), package_name.to_string());
        if let Some(verdict) = self.cached(&key)? {
            return Ok(verdict);
        }

        let verdict = statements_allow(&self.fetch(web_domain)?, package_name);
        self.cache
            .lock()
            .map_err(|_| ValidationError::CachePoisoned)?
            .insert(key, verdict);
        Ok(verdict)
    }
}
