use std::collections::HashMap;
use std::fmt::Display;
use std::time::Duration;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::{Credentials, Region};
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput, ScalarAttributeType, TableStatus};
use serde_json::Value;
use crate::core::library::{CatalogError, CatalogResult};
use crate::core::repository::RepositoryStore;

const LOCAL_ENDPOINT: &str = "http://localhost:8000";

// creates a table keyed by the string attribute `pk`
pub(crate) async fn create_table(client: &Client, table_name: &str, pk: &str) -> CatalogResult<()> {
    client
        .create_table()
        .table_name(table_name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(pk)
                .key_type(KeyType::Hash)
                .build(),
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(pk)
                .attribute_type(ScalarAttributeType::S)
                .build(),
        )
        .provisioned_throughput(
            ProvisionedThroughput::builder()
                .read_capacity_units(10)
                .write_capacity_units(10)
                .build(),
        )
        .send()
        .await
        .map_err(|err| table_error("create", table_name, err))?;
    wait_until_table_status_is_not(client, table_name, TableStatus::Creating).await;
    tracing::info!(table_name, "created table");
    Ok(())
}

pub(crate) async fn delete_table(client: &Client, table_name: &str) -> CatalogResult<()> {
    client.delete_table().table_name(table_name).send().await
        .map_err(|err| table_error("delete", table_name, err))?;
    wait_until_table_status_is_not(client, table_name, TableStatus::Deleting).await;
    Ok(())
}

fn table_error(action: &str, table_name: &str, err: impl Display) -> CatalogError {
    CatalogError::database_or_unavailable(&format!("failed to {} {} table due to {}", action, table_name, err), None, false)
}

async fn wait_until_table_status_is_not(client: &Client, table_name: &str, other_status: TableStatus) {
    for _i in 0..30 {
        if let Ok(status) = describe_table(client, table_name).await {
            if status != other_status {
                return;
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

async fn describe_table(client: &Client, table_name: &str) -> CatalogResult<TableStatus> {
    let out = client.describe_table().table_name(table_name).send().await
        .map_err(|err| table_error("describe", table_name, err))?;
    out.table().and_then(|t| t.table_status()).cloned()
        .ok_or_else(|| CatalogError::runtime(&format!("no status for {} table", table_name), None))
}

pub(crate) fn parse_item(value: Value) -> CatalogResult<HashMap<String, AttributeValue>> {
    match value_to_item(value) {
        AttributeValue::M(map) => Ok(map),
        other => Err(CatalogError::serialization(&format!("expected an object item but found {:?}", other))),
    }
}

pub(crate) fn parse_string_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> Option<String> {
    if let Some(AttributeValue::S(str)) = map.get(name) {
        return Some(str.clone());
    }
    None
}

pub(crate) fn parse_bool_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> bool {
    if let Some(AttributeValue::Bool(b)) = map.get(name) {
        return *b;
    }
    false
}

pub(crate) fn parse_number_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> i64 {
    if let Some(AttributeValue::N(str)) = map.get(name) {
        if let Ok(n) = str.parse::<i64>() {
            return n;
        }
    }
    0
}

pub(crate) fn parse_number_list_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> Vec<i64> {
    if let Some(AttributeValue::L(list)) = map.get(name) {
        return list.iter().filter_map(|v| match v {
            AttributeValue::N(n) => n.parse::<i64>().ok(),
            _ => None,
        }).collect();
    }
    vec![]
}

fn value_to_item(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(a) => AttributeValue::L(a.into_iter().map(value_to_item).collect()),
        Value::Object(o) => {
            AttributeValue::M(o.into_iter().map(|(k, v)| (k, value_to_item(v))).collect())
        }
    }
}

// helper method to build db-client; the local endpoint can be moved with DYNAMODB_ENDPOINT
pub(crate) async fn build_db_client(store: RepositoryStore) -> Client {
    match store {
        RepositoryStore::DynamoDB => {
            //Get config from environment.
            let config = aws_config::load_from_env().await;
            //Create the DynamoDB client.
            Client::new(&config)
        }
        RepositoryStore::LocalDynamoDB | RepositoryStore::Memory => {
            // See https://docs.aws.amazon.com/sdk-for-rust/latest/dg/dynamodb-local.html
            let endpoint = std::env::var("DYNAMODB_ENDPOINT").unwrap_or_else(|_| LOCAL_ENDPOINT.to_string());
            let dynamodb_local_config = aws_sdk_dynamodb::Config::builder()
                .region(Region::new("local"))
                .credentials_provider(
                    Credentials::new("AKIDLOCALSTACK", "localstacksecret", None, None, "faked"))
                .endpoint_url(endpoint)
                .build();
            Client::from_conf(dynamodb_local_config)
        }
    }
}

// store failures keep the HTTP status as reason so NotFound/AccessDenied can be told apart
macro_rules! sdk_error_conversion {
    ($($op:ty),*) => {
        $(
            impl From<SdkError<$op>> for CatalogError {
                fn from(err: SdkError<$op>) -> Self {
                    let (retryable, reason) = retryable_sdk_error(&err);
                    CatalogError::database_or_unavailable(&format!("{:?}", err), reason, retryable)
                }
            }
        )*
    };
}

sdk_error_conversion!(GetItemError, UpdateItemError, PutItemError, QueryError, ScanError);

fn retryable_sdk_error<T>(err: &SdkError<T>) -> (bool, Option<String>) {
    match err {
        SdkError::ConstructionFailure(_) => { (false, Some("ConstructionFailure".to_string())) }
        SdkError::TimeoutError(_) => { (true, Some("TimeoutError".to_string())) }
        SdkError::DispatchFailure(_) => { (true, Some("DispatchFailure".to_string())) }
        SdkError::ResponseError { .. } => { (true, Some("ResponseError".to_string())) }
        SdkError::ServiceError(ctx) => {
            (ctx.raw().http().status().is_server_error() || has_exceeded_limit(ctx.raw().http().body().bytes()), Some(ctx.raw().http().status().to_string()))
        }
        _ => { (true, Some("Unknown".to_string())) }
    }
}

// throttling responses carry "...ExceededException" in the body
fn has_exceeded_limit(opts: Option<&[u8]>) -> bool {
    if let Some(b) = opts {
        return b.windows(6).any(|w| w == b"ceeded");
    }
    false
}
