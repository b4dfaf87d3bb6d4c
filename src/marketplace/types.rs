use serde::{Deserialize, Serialize};

/// A released version of a self-hosted marketplace application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    #[serde(rename = "app")]
    pub application_name: String,
    pub version: String,
}

impl VersionEntry {
    pub fn new(application_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
            version: version.into(),
        }
    }
}

/// Response from the marketplace applications listing
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CatalogResponse {
    pub applications: Vec<Application>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct Application {
    pub key: String,
    pub hosting_support: HostingSupport,
}

impl Application {
    pub fn supports_self_hosting(&self) -> bool {
        self.hosting_support.server
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct HostingSupport {
    pub server: bool,
}

/// Response from a single application's version listing
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApplicationResponse {
    pub name: String,
    pub versions: Vec<ApplicationVersion>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApplicationVersion {
    pub version: String,
}
