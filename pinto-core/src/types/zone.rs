use pinto_api::{CreateZoneRequest, Scope};

/// A DNS zone scoped to a provider and environment.
///
/// `(name, environment, provider)` is unique. The backend only tracks `name`
/// inside a scope, the full triple is a local notion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    /// Fully-qualified name, trailing dot significant.
    pub name: String,
    /// May be empty.
    pub environment: String,
    pub provider: String,
}

impl Zone {
    pub fn new(
        name: impl Into<String>,
        environment: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            environment: environment.into(),
            provider: provider.into(),
        }
    }

    pub fn scope(&self) -> Scope {
        Scope::new(&self.provider, &self.environment)
    }

    pub fn create_request(&self) -> CreateZoneRequest {
        CreateZoneRequest::new(&self.scope(), &self.name)
    }
}
