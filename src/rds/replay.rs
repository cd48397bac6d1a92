//! RDS client tests against canned Query API responses

use aws_sdk_rds::Client;
use aws_sdk_rds::config::retry::RetryConfig;
use aws_sdk_rds::config::{BehaviorVersion, Credentials, Region};
use aws_smithy_runtime::client::http::test_util::{ReplayEvent, StaticReplayClient};
use aws_smithy_types::body::SdkBody;

use super::{DbInstanceProvider, RdsClient};
use crate::error::SweepError;

const REGION: &str = "eu-central-1";

fn replay_client(events: Vec<ReplayEvent>) -> (RdsClient, StaticReplayClient) {
    let replay = StaticReplayClient::new(events);
    let config = aws_sdk_rds::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(REGION))
        .credentials_provider(Credentials::new("akid", "secret", None, None, "test"))
        .retry_config(RetryConfig::disabled())
        .http_client(replay.clone())
        .build();

    (
        RdsClient::from_parts(Client::from_conf(config), REGION),
        replay,
    )
}

fn event(status: u16, body: &str) -> ReplayEvent {
    ReplayEvent::new(
        http::Request::builder()
            .method("POST")
            .uri(format!("https://rds.{REGION}.amazonaws.com/"))
            .body(SdkBody::empty())
            .unwrap(),
        http::Response::builder()
            .status(status)
            .header("content-type", "text/xml")
            .body(SdkBody::from(body.to_string()))
            .unwrap(),
    )
}

fn sent_bodies(replay: &StaticReplayClient) -> Vec<String> {
    replay
        .actual_requests()
        .map(|req| String::from_utf8_lossy(req.body().bytes().unwrap_or_default()).into_owned())
        .collect()
}

fn describe_response(instances: &str, marker: Option<&str>) -> String {
    let marker = marker
        .map(|m| format!("<Marker>{m}</Marker>"))
        .unwrap_or_default();
    format!(
        r#"<DescribeDBInstancesResponse xmlns="http://rds.amazonaws.com/doc/2014-10-31/">
  <DescribeDBInstancesResult>
    {marker}
    <DBInstances>{instances}</DBInstances>
  </DescribeDBInstancesResult>
  <ResponseMetadata><RequestId>req-describe</RequestId></ResponseMetadata>
</DescribeDBInstancesResponse>"#
    )
}

fn db_instance(identifier: &str, status: &str, sleepy: bool) -> String {
    let tags = if sleepy {
        "<TagList><Tag><Key>PUT_ME_TO_SLEEP</Key><Value>YES</Value></Tag></TagList>"
    } else {
        ""
    };
    format!(
        "<DBInstance>\
           <DBInstanceIdentifier>{identifier}</DBInstanceIdentifier>\
           <DBInstanceStatus>{status}</DBInstanceStatus>\
           <Engine>postgres</Engine>\
           <DBInstanceClass>db.t3.micro</DBInstanceClass>\
           {tags}\
         </DBInstance>"
    )
}

fn error_response(code: &str, message: &str) -> String {
    format!(
        r#"<ErrorResponse xmlns="http://rds.amazonaws.com/doc/2014-10-31/">
  <Error><Type>Sender</Type><Code>{code}</Code><Message>{message}</Message></Error>
  <RequestId>req-error</RequestId>
</ErrorResponse>"#
    )
}

mod list_instances_tests {
    use super::*;

    #[tokio::test]
    async fn test_follows_marker_to_second_page() {
        let (client, replay) = replay_client(vec![
            event(
                200,
                &describe_response(&db_instance("db-1", "available", true), Some("page-2")),
            ),
            event(
                200,
                &describe_response(&db_instance("db-2", "stopped", false), None),
            ),
        ]);

        let instances = client.list_instances().await.unwrap();

        let ids: Vec<_> = instances.iter().map(|i| i.identifier.as_str()).collect();
        assert_eq!(ids, vec!["db-1", "db-2"]);
        assert_eq!(instances[0].tag("PUT_ME_TO_SLEEP"), Some("YES"));
        assert_eq!(instances[0].engine.as_deref(), Some("postgres"));
        assert_eq!(instances[1].status, "stopped");
        assert!(instances[1].tags.is_empty());

        let bodies = sent_bodies(&replay);
        assert_eq!(bodies.len(), 2);
        assert!(bodies[0].contains("Action=DescribeDBInstances"));
        assert!(bodies[0].contains("MaxRecords=100"));
        assert!(!bodies[0].contains("Marker="));
        assert!(bodies[1].contains("MaxRecords=100"));
        assert!(bodies[1].contains("Marker=page-2"));
    }

    #[tokio::test]
    async fn test_access_denied_is_query_error() {
        let (client, replay) = replay_client(vec![event(
            403,
            &error_response("AccessDenied", "not authorized to perform rds:DescribeDBInstances"),
        )]);

        let err = client.list_instances().await.unwrap_err();

        assert!(matches!(err, SweepError::ProviderQuery(_)));
        assert!(err.to_string().contains("not authorized"));
        assert_eq!(sent_bodies(&replay).len(), 1);
    }
}

mod stop_instance_tests {
    use super::*;

    #[tokio::test]
    async fn test_stop_sends_identifier() {
        let (client, replay) = replay_client(vec![event(
            200,
            r#"<StopDBInstanceResponse xmlns="http://rds.amazonaws.com/doc/2014-10-31/">
  <StopDBInstanceResult>
    <DBInstance>
      <DBInstanceIdentifier>db-1</DBInstanceIdentifier>
      <DBInstanceStatus>stopping</DBInstanceStatus>
    </DBInstance>
  </StopDBInstanceResult>
  <ResponseMetadata><RequestId>req-stop</RequestId></ResponseMetadata>
</StopDBInstanceResponse>"#,
        )]);

        client.stop_instance("db-1").await.unwrap();

        let bodies = sent_bodies(&replay);
        assert_eq!(bodies.len(), 1);
        assert!(bodies[0].contains("Action=StopDBInstance"));
        assert!(bodies[0].contains("DBInstanceIdentifier=db-1"));
    }

    #[tokio::test]
    async fn test_invalid_state_is_command_error() {
        let (client, _replay) = replay_client(vec![event(
            400,
            &error_response("InvalidDBInstanceState", "Instance db-1 is not in available state."),
        )]);

        let err = client.stop_instance("db-1").await.unwrap_err();

        match err {
            SweepError::ProviderCommand {
                ref identifier,
                ref message,
            } => {
                assert_eq!(identifier, "db-1");
                assert!(message.contains("not in available state"));
            }
            other => panic!("expected ProviderCommand, got {other:?}"),
        }
    }
}
