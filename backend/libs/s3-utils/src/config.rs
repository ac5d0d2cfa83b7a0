/// S3 configuration shared across services
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// S3 bucket name
    pub bucket: String,
    /// AWS region; `None` defers to the SDK default provider chain
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible stores (MinIO, LocalStack)
    pub endpoint: Option<String>,
    /// Whether to use path-style URLs (false = virtual-hosted-style)
    pub path_style: bool,
}

impl S3Config {
    /// Load S3 configuration from environment variables
    ///
    /// `default_bucket` is used when `S3_BUCKET` is unset. A custom endpoint
    /// implies path-style addressing unless `S3_PATH_STYLE` says otherwise.
    pub fn from_env(default_bucket: &str) -> Self {
        let endpoint = non_empty_var("S3_ENDPOINT");
        let path_style = std::env::var("S3_PATH_STYLE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(endpoint.is_some());

        Self {
            bucket: non_empty_var("S3_BUCKET").unwrap_or_else(|| default_bucket.to_string()),
            region: non_empty_var("AWS_REGION"),
            endpoint,
            path_style,
        }
    }

    /// Build an object key under `prefix`, tolerating stray slashes on either side
    pub fn object_key(prefix: &str, name: &str) -> String {
        let prefix = prefix.trim_matches('/');
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", prefix, name)
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_s3_env() {
        std::env::remove_var("S3_BUCKET");
        std::env::remove_var("S3_ENDPOINT");
        std::env::remove_var("S3_PATH_STYLE");
        std::env::remove_var("AWS_REGION");
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_uses_default_bucket() {
        clear_s3_env();

        let config = S3Config::from_env("archive-bucket");
        assert_eq!(config.bucket, "archive-bucket");
        assert!(config.region.is_none());
        assert!(config.endpoint.is_none());
        assert!(!config.path_style);
    }

    #[test]
    #[serial_test::serial]
    fn test_endpoint_implies_path_style() {
        clear_s3_env();
        std::env::set_var("S3_ENDPOINT", "http://localhost:9000");
        std::env::set_var("S3_BUCKET", "local-bucket");

        let config = S3Config::from_env("archive-bucket");
        assert_eq!(config.bucket, "local-bucket");
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:9000"));
        assert!(config.path_style);

        clear_s3_env();
    }

    #[test]
    fn test_object_key() {
        assert_eq!(
            S3Config::object_key("datasets", "Bulbasaur.json"),
            "datasets/Bulbasaur.json"
        );
        assert_eq!(
            S3Config::object_key("/datasets/", "Bulbasaur.json"),
            "datasets/Bulbasaur.json"
        );
        assert_eq!(S3Config::object_key("", "Bulbasaur.json"), "Bulbasaur.json");
    }
}
