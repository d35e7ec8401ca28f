use serde::Deserialize;

///  ---------------- AWS credentials ----------------
///
/// Static access key pair for the account that owns the warehouse. The key
/// needs permissions for IAM, Redshift and EC2.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AwsSettings {
    pub key: String,
    pub secret: String,
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "us-west-2".to_string()
}
