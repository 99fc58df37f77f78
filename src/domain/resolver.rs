use serde::Serialize;
use std::fmt;
use tracing::{debug, error, warn};

use crate::domain::validator::AssociationValidator;

/// Prefix of identifiers synthesized from a package name.
pub const APP_SCHEME: &str = "app:";

/// Package of the platform's own home screen.
pub const HOME_SCREEN_PACKAGE: &str = "android";

/// Credential lookup key: a validated web domain or `app:<package>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionIdentifier(String);

impl SessionIdentifier {
    pub fn for_domain(domain: &str) -> Self {
        Self(domain.to_string())
    }

    pub fn for_package(package_name: &str) -> Self {
        Self(format!("{}{}", APP_SCHEME, package_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_package_fallback(&self) -> bool {
        self.0.starts_with(APP_SCHEME)
    }
}

impl fmt::Display for SessionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reconcile a claimed web domain with the requesting package.
///
/// A domain the validator rejects (or cannot check) is dropped, which falls
/// back to the package identifier. Never fails.
pub fn resolve(
    web_domain: Option<&str>,
    package_name: &str,
    validator: &dyn AssociationValidator,
) -> SessionIdentifier {
    let validated = web_domain
        .filter(|d| !d.is_empty())
        .filter(|domain| match validator.is_valid(domain, package_name) {
            Ok(true) => true,
            Ok(false) => {
                error!("DAL verification failed for {}/{}", package_name, domain);
                false
            }
            Err(e) => {
                warn!("DAL verification for {}/{} errored: {}", package_name, domain, e);
                false
            }
        });

    match validated {
        Some(domain) => SessionIdentifier::for_domain(domain),
        None => {
            debug!("no web domain. Using package name.");
            SessionIdentifier::for_package(package_name)
        }
    }
}

/// False for the home screen and for our own package, so the credential
/// picker is never offered to fill itself.
pub fn can_autofill(identifier: &str, own_package: &str) -> bool {
    let home = format!("{}{}", APP_SCHEME, HOME_SCREEN_PACKAGE);
    let own = format!("{}{}", APP_SCHEME, own_package);
    !(identifier == home || identifier == own)
}
