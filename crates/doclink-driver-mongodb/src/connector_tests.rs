//! Unit tests for the MongoDB connector

use std::sync::Arc;
use std::time::Duration;

use super::*;
use doclink_core::{Connection, Connector, DoclinkError, PoolOptions};
use mongodb::Client;
use mongodb::options::ClientOptions;

// ============================================================================
// Option Mapping Tests
// ============================================================================

mod option_mapping_tests {
    use super::*;

    #[test]
    fn test_pool_sizes_applied() {
        let mut client_options = ClientOptions::default();
        let options = PoolOptions::new().with_min_pool_size(2).with_max_pool_size(10);

        apply_pool_options(&mut client_options, &options);

        assert_eq!(client_options.min_pool_size, Some(2));
        assert_eq!(client_options.max_pool_size, Some(10));
    }

    #[test]
    fn test_server_selection_timeout_applied() {
        let mut client_options = ClientOptions::default();
        let options = PoolOptions::new().with_server_selection_timeout_ms(5_000);

        apply_pool_options(&mut client_options, &options);

        assert_eq!(
            client_options.server_selection_timeout,
            Some(Duration::from_millis(5_000))
        );
    }

    #[test]
    fn test_absent_fields_keep_uri_values() {
        let mut client_options = ClientOptions::default();
        client_options.max_pool_size = Some(42);

        apply_pool_options(&mut client_options, &PoolOptions::default());

        assert_eq!(client_options.max_pool_size, Some(42));
        assert_eq!(client_options.min_pool_size, None);
    }

    #[test]
    fn test_extension_fields_applied() {
        let mut client_options = ClientOptions::default();
        let options = PoolOptions::new()
            .with_extra(APP_NAME, "billing")
            .with_extra(CONNECT_TIMEOUT_MS, 2_500)
            .with_extra(MAX_IDLE_TIME_MS, 60_000);

        apply_pool_options(&mut client_options, &options);

        assert_eq!(client_options.app_name.as_deref(), Some("billing"));
        assert_eq!(
            client_options.connect_timeout,
            Some(Duration::from_millis(2_500))
        );
        assert_eq!(
            client_options.max_idle_time,
            Some(Duration::from_millis(60_000))
        );
    }

    #[test]
    fn test_invalid_extension_values_ignored() {
        let mut client_options = ClientOptions::default();
        let options = PoolOptions::new()
            .with_extra(APP_NAME, 7)
            .with_extra(CONNECT_TIMEOUT_MS, "soon");

        apply_pool_options(&mut client_options, &options);

        assert_eq!(client_options.app_name, None);
        assert_eq!(client_options.connect_timeout, None);
    }

    #[test]
    fn test_unknown_extension_and_socket_timeout_ignored() {
        let mut client_options = ClientOptions::default();
        let options = PoolOptions::new()
            .with_socket_timeout_ms(45_000)
            .with_extra("readPreferenceTags", "dc:east");

        apply_pool_options(&mut client_options, &options);

        assert_eq!(client_options.min_pool_size, None);
        assert_eq!(client_options.max_pool_size, None);
    }
}

// ============================================================================
// Connector Tests
// ============================================================================

mod connector_tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_uri_is_configuration_error() {
        let connector = MongoDbConnector::new();
        let result = connector
            .open("not-a-mongodb-uri", &PoolOptions::default())
            .await;

        assert!(matches!(result, Err(DoclinkError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_fails() {
        let connector = MongoDbConnector::default();
        let options = PoolOptions::new().with_server_selection_timeout_ms(50);

        // Port 1 is reserved and never runs a MongoDB server
        let result = connector
            .open("mongodb://127.0.0.1:1/?directConnection=true", &options)
            .await;

        assert!(matches!(
            result,
            Err(DoclinkError::Timeout(_)) | Err(DoclinkError::Connection(_))
        ));
    }

    #[tokio::test]
    async fn test_handle_downcasts_to_mongodb_connection() {
        let uri = "mongodb://localhost:27017/reports";
        let client_options = ClientOptions::parse(uri).await.unwrap();
        let client = Client::with_options(client_options).unwrap();
        let handle: Arc<dyn Connection> =
            Arc::new(MongoDbConnection::new(client, "reports".to_string(), uri.to_string()));

        let connection =
            MongoDbConnection::from_handle(handle.as_ref()).expect("handle is a MongoDB connection");

        assert_eq!(connection.database(), "reports");
        assert_eq!(connection.db().name(), "reports");
        assert!(!handle.is_closed());
    }
}
