use serde::Deserialize;

///  ---------------- Warehouse wiring (config file B) ----------------
///
/// Written by hand after `redlift provision` prints the endpoint and role
/// ARN. The pipeline commands read only this file; they never talk to the
/// control plane.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WarehouseConfig {
    pub cluster: WarehouseConnection,
    pub sources: SourceLocations,
    pub iam_role: RoleRef,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WarehouseConnection {
    pub host: String,
    pub database: String,
    pub user: String,
    pub password: String,
    pub port: u16,
}

/// Object-storage locations for the raw event and song logs. `log_jsonpath`
/// is the JSONPaths manifest the COPY of the event logs needs; song data is
/// self-describing (`JSON 'auto'`).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SourceLocations {
    pub log_data: String,
    pub song_data: String,
    pub log_jsonpath: String,
    #[serde(default = "default_region")]
    pub region: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RoleRef {
    pub arn: String,
}

fn default_region() -> String {
    "us-west-2".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_warehouse_config_parses() {
        let yaml = r#"
cluster:
  host: dwhcluster.abc123.us-west-2.redshift.amazonaws.com
  database: dwh
  user: dwhuser
  password: Passw0rd
  port: 5439
sources:
  log_data: "s3://udacity-dend/log_data"
  song_data: "s3://udacity-dend/song_data"
  log_jsonpath: "s3://udacity-dend/log_json_path.json"
iam_role:
  arn: "arn:aws:iam::123456789012:role/dwhRole"
"#;
        let config: WarehouseConfig = serde_yaml::from_str(yaml).expect("parse warehouse config");
        assert_eq!(config.cluster.port, 5439);
        assert_eq!(config.sources.region, "us-west-2");
        assert!(config.iam_role.arn.starts_with("arn:aws:iam::"));
    }

    #[test]
    fn missing_role_arn_is_a_parse_error() {
        let yaml = r#"
cluster:
  host: localhost
  database: dwh
  user: dwhuser
  password: pw
  port: 5439
sources:
  log_data: "s3://bucket/log_data"
  song_data: "s3://bucket/song_data"
  log_jsonpath: "s3://bucket/paths.json"
"#;
        serde_yaml::from_str::<WarehouseConfig>(yaml).expect_err("iam_role is required");
    }
}
