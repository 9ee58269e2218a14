//! Configuration system tests.

use prom_remote_adapter::core::config::MAX_BUFFER_CAPACITY;
use prom_remote_adapter::core::{Config, ConfigBuilder, Context, LabelQueries, RemoteError};
use prom_remote_adapter::transport::memory::{RecordingWriteClient, StaticReadClient};
use prom_remote_adapter::{Pusher, Queryable};
use std::sync::Arc;

#[test]
fn test_default_config() {
    let config = Config::new().unwrap();
    assert_eq!(config.write.buffer_capacity, 4096);
    assert!(config.read.validate_labels);
    assert_eq!(config.read.label_queries, LabelQueries::Empty);
}

#[test]
fn test_yaml_config() {
    let yaml = r#"
write:
  buffer_capacity: 1048576
read:
  validate_labels: false
  label_queries: unsupported
"#;

    let config = ConfigBuilder::new().from_yaml(yaml).unwrap().build().unwrap();

    assert_eq!(config.write.buffer_capacity, 1_048_576);
    assert!(!config.read.validate_labels);
    assert_eq!(config.read.label_queries, LabelQueries::Unsupported);
}

#[test]
fn test_empty_yaml_uses_defaults() {
    let config = ConfigBuilder::new().from_yaml("{}").unwrap().build().unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_config() {
    let yaml = format!("write:\n  buffer_capacity: {}\n", MAX_BUFFER_CAPACITY + 1);
    let result = ConfigBuilder::new().from_yaml(&yaml).unwrap().build();
    assert!(matches!(result, Err(RemoteError::Config(_))));

    let unknown_mode = ConfigBuilder::new().from_yaml("read:\n  label_queries: sometimes\n");
    assert!(unknown_mode.is_err());
}

#[tokio::test]
async fn test_config_drives_the_adapters() {
    let config = ConfigBuilder::new()
        .buffer_capacity(0)
        .label_queries(LabelQueries::Unsupported)
        .build()
        .unwrap();

    let client = Arc::new(RecordingWriteClient::new());
    let pusher = Pusher::with_config(Arc::clone(&client), config.write.clone());
    pusher
        .push(&Context::background(), &Default::default())
        .await
        .unwrap();
    assert_eq!(client.attempts(), 1);

    let querier = Queryable::with_config(Arc::new(StaticReadClient::new()), config.read.clone())
        .querier(Context::background(), 0, 1)
        .unwrap();
    assert!(matches!(querier.label_names(&[]), Err(RemoteError::Unsupported(_))));
}
