#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeploymentEnvironment {
    Local,
    Dev,
    Staging,
    Prod,
}

impl DeploymentEnvironment {
    /// Reads a `CURR_ENV` value. Unset means prod; anything unrecognized means local.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(s) => match s.trim().to_ascii_lowercase().as_str() {
                // Local
                "local" | "localhost" => DeploymentEnvironment::Local,
                // Dev
                "dev" | "develop" | "development" => DeploymentEnvironment::Dev,
                // Staging
                "staging" | "stage" | "stg" => DeploymentEnvironment::Staging,
                // Prod
                "prd" | "prod" | "production" => DeploymentEnvironment::Prod,
                _ => DeploymentEnvironment::Local,
            },
            None => DeploymentEnvironment::Prod,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentEnvironment::Local => "local",
            DeploymentEnvironment::Dev => "dev",
            DeploymentEnvironment::Staging => "staging",
            DeploymentEnvironment::Prod => "prod",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DeploymentEnvironment;

    #[test]
    fn parses_aliases() {
        assert_eq!(
            DeploymentEnvironment::from_env_value(Some("PRD")),
            DeploymentEnvironment::Prod
        );
        assert_eq!(
            DeploymentEnvironment::from_env_value(Some("stage")),
            DeploymentEnvironment::Staging
        );
        assert_eq!(
            DeploymentEnvironment::from_env_value(Some("whatever")),
            DeploymentEnvironment::Local
        );
        assert_eq!(
            DeploymentEnvironment::from_env_value(None),
            DeploymentEnvironment::Prod
        );
    }
}
