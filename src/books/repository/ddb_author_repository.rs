use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};

use crate::books::domain::model::AuthorEntity;
use crate::books::repository::AuthorRepository;
use crate::core::library::{CatalogError, CatalogResult};
use crate::utils::ddb::{parse_number_attribute, parse_string_attribute};

// reserved item holding the last allocated author id
const SEQUENCE_KEY: &str = "__sequence";

#[derive(Debug)]
pub struct DDBAuthorRepository {
    client: Client,
    table_name: String,
}

impl DDBAuthorRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }

    async fn next_id(&self) -> CatalogResult<i64> {
        let table_name: &str = self.table_name.as_ref();
        let out = self.client
            .update_item()
            .table_name(table_name)
            .key("author_id", AttributeValue::S(SEQUENCE_KEY.to_string()))
            .update_expression("ADD seq_value :one")
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await?;
        let id = out.attributes().map(|attrs| parse_number_attribute("seq_value", attrs)).unwrap_or(0);
        if id <= 0 {
            return Err(CatalogError::runtime("failed to allocate author id", None));
        }
        Ok(id)
    }

    async fn get(&self, id: i64) -> CatalogResult<AuthorEntity> {
        let table_name: &str = self.table_name.as_ref();
        let out = self.client
            .get_item()
            .table_name(table_name)
            .key("author_id", AttributeValue::S(id.to_string()))
            .consistent_read(true)
            .send()
            .await?;
        match out.item() {
            Some(map) => Ok(map_to_author(map)),
            None => Err(CatalogError::not_found(format!("author not found for {}", id).as_str())),
        }
    }
}

#[async_trait]
impl AuthorRepository for DDBAuthorRepository {
    async fn create(&self, name: &str) -> CatalogResult<AuthorEntity> {
        let author = AuthorEntity::new(self.next_id().await?, name);
        let table_name: &str = self.table_name.as_ref();
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(author_id)")
            .item("author_id", AttributeValue::S(author.author_id.to_string()))
            .item("name", AttributeValue::S(author.name.to_string()))
            .send()
            .await?;
        Ok(author)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> CatalogResult<Vec<AuthorEntity>> {
        let mut authors = Vec::with_capacity(ids.len());
        for id in ids {
            authors.push(self.get(*id).await?);
        }
        Ok(authors)
    }
}

fn map_to_author(map: &HashMap<String, AttributeValue>) -> AuthorEntity {
    let author_id = parse_string_attribute("author_id", map)
        .and_then(|id| id.parse::<i64>().ok())
        .unwrap_or(0);
    AuthorEntity::new(author_id, parse_string_attribute("name", map).unwrap_or_default().as_str())
}
