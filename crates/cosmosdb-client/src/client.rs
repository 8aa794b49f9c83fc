//! Cosmos DB REST client.

use crate::auth::{format_http_date, MasterKey, ResourceType};
use crate::error::CosmosError;
use crate::store::{partition_key_value, ContainerRef, ContainerSpec, DatabaseRef, DocumentStore};
use chrono::Utc;
use reqwest::{header, Client, Method, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// REST API version sent in `x-ms-version`.
pub const API_VERSION: &str = "2018-12-31";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Error body returned by the service on failures.
#[derive(Deserialize)]
struct ServiceErrorBody {
    code: String,
    message: String,
}

/// Cosmos DB account client authenticated with a master key.
#[derive(Debug, Clone)]
pub struct CosmosClient {
    http: Client,
    endpoint: Url,
    key: MasterKey,
}

impl CosmosClient {
    /// Create a client for the account at `endpoint`.
    ///
    /// Fails without touching the network if the endpoint is not a valid URL
    /// or the key is not valid base64.
    pub fn new(endpoint: &str, key: &str) -> Result<Self, CosmosError> {
        let mut endpoint = Url::parse(endpoint)?;
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        let key = MasterKey::from_base64(key)?;
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            endpoint,
            key,
        })
    }

    /// Account endpoint, always ending in `/`.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send(
        &self,
        method: Method,
        resource_type: ResourceType,
        resource_link: &str,
        path: &str,
        headers: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Response, CosmosError> {
        let date = format_http_date(Utc::now());
        let authorization =
            self.key
                .authorization(method.as_str(), resource_type, resource_link, &date)?;
        let url = self.endpoint.join(path)?;

        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, url)
            .header("x-ms-date", &date)
            .header("x-ms-version", API_VERSION)
            .header(header::AUTHORIZATION, authorization)
            .header(header::ACCEPT, "application/json");
        for (name, value) in headers {
            request = request.header(*name, value);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    /// Read a resource by link. `None` if it does not exist.
    async fn read(
        &self,
        resource_type: ResourceType,
        link: &str,
    ) -> Result<Option<Value>, CosmosError> {
        let response = self
            .send(Method::GET, resource_type, link, link, &[], None)
            .await?;

        match response.status() {
            status if status.is_success() => {
                let bytes = response.bytes().await?;
                if bytes.is_empty() {
                    Ok(Some(Value::Null))
                } else {
                    Ok(Some(serde_json::from_slice(&bytes)?))
                }
            }
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(service_error(response).await),
        }
    }

    /// Create a resource under `parent_link`.
    ///
    /// Returns `false` when the service reports a conflict, meaning someone
    /// else created it between our read and this call.
    async fn create(
        &self,
        resource_type: ResourceType,
        parent_link: &str,
        path: &str,
        headers: &[(&str, String)],
        body: &Value,
    ) -> Result<bool, CosmosError> {
        let response = self
            .send(
                Method::POST,
                resource_type,
                parent_link,
                path,
                headers,
                Some(body),
            )
            .await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::CONFLICT => Ok(false),
            _ => Err(service_error(response).await),
        }
    }
}

async fn service_error(response: Response) -> CosmosError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ServiceErrorBody>(&body) {
        Ok(parsed) => CosmosError::Service {
            status,
            code: parsed.code,
            message: parsed.message,
        },
        Err(_) => CosmosError::service(status, body),
    }
}

#[async_trait::async_trait]
impl DocumentStore for CosmosClient {
    async fn ensure_database(&self, id: &str) -> Result<DatabaseRef, CosmosError> {
        let database = DatabaseRef { id: id.to_string() };

        if self
            .read(ResourceType::Databases, &database.link())
            .await?
            .is_some()
        {
            debug!("Database '{}' already exists", id);
            return Ok(database);
        }

        let body = json!({ "id": id });
        if self
            .create(ResourceType::Databases, "", "dbs", &[], &body)
            .await?
        {
            info!("Created database '{}'", id);
        } else {
            debug!("Database '{}' was created concurrently", id);
        }

        Ok(database)
    }

    async fn ensure_container(
        &self,
        database: &DatabaseRef,
        spec: &ContainerSpec,
    ) -> Result<ContainerRef, CosmosError> {
        let mut container = ContainerRef {
            database: database.id.clone(),
            id: spec.id.clone(),
            partition_key_path: spec.partition_key_path.clone(),
        };

        if let Some(existing) = self
            .read(ResourceType::Containers, &container.link())
            .await?
        {
            debug!("Container '{}' already exists", spec.id);
            if let Some(path) = existing
                .pointer("/partitionKey/paths/0")
                .and_then(Value::as_str)
            {
                if path != spec.partition_key_path {
                    warn!(
                        "Container '{}' is partitioned on '{}', not '{}'",
                        spec.id, path, spec.partition_key_path
                    );
                    container.partition_key_path = path.to_string();
                }
            }
            return Ok(container);
        }

        let body = json!({
            "id": spec.id,
            "partitionKey": {
                "paths": [spec.partition_key_path],
                "kind": "Hash",
                "version": 2
            }
        });
        let headers = [("x-ms-offer-throughput", spec.throughput.to_string())];
        let path = format!("{}/colls", database.link());

        if self
            .create(
                ResourceType::Containers,
                &database.link(),
                &path,
                &headers,
                &body,
            )
            .await?
        {
            info!(
                "Created container '{}' (partition key {}, {} RU/s)",
                spec.id, spec.partition_key_path, spec.throughput
            );
        } else {
            debug!("Container '{}' was created concurrently", spec.id);
        }

        Ok(container)
    }

    async fn insert_item(&self, container: &ContainerRef, item: &Value) -> Result<(), CosmosError> {
        item.get("id")
            .and_then(Value::as_str)
            .ok_or(CosmosError::MissingId)?;
        let partition_key = serde_json::to_string(&[partition_key_value(container, item)?])?;

        let link = container.link();
        let path = format!("{link}/docs");
        let headers = [("x-ms-documentdb-partitionkey", partition_key)];

        let response = self
            .send(
                Method::POST,
                ResourceType::Documents,
                &link,
                &path,
                &headers,
                Some(item),
            )
            .await?;

        if !response.status().is_success() {
            return Err(service_error(response).await);
        }

        Ok(())
    }
}
