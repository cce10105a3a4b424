use std::time::Duration;

use docdiff_config_file::{
    DocdiffConfigError, DocdiffConfigToml, ObjectStoreKind, ObjectStoreSection,
    RemoteFunctionKind, RemoteFunctionSection,
};
use docdiff_gateway::RetryPolicy;
use docdiff_object_store::{
    file_store::FileObjectStore, s3::S3ObjectStore, store::ObjectStore, StoreConfig,
};
use docdiff_remote_function::{
    function::RemoteFunction, http::HttpRemoteFunction, lambda::LambdaRemoteFunction,
    InvocationConfig,
};

use crate::api::ServerConfig;

pub async fn server_config_from_toml(
    config: &DocdiffConfigToml,
) -> Result<ServerConfig, DocdiffConfigError> {
    Ok(ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        max_upload_bytes: config.server.max_upload_bytes,
        remote_function: remote_function_from_section(&config.remote_function).await?,
        retry_policy: RetryPolicy::with_max_attempts(config.remote_function.max_attempts),
        object_store: object_store_from_section(&config.object_store).await?,
    })
}

pub fn invocation_config(section: &RemoteFunctionSection) -> InvocationConfig {
    InvocationConfig {
        connect_timeout: Duration::from_secs(section.connect_timeout_secs),
        read_timeout: Duration::from_secs(section.read_timeout_secs),
    }
}

pub fn store_config(section: &ObjectStoreSection) -> StoreConfig {
    StoreConfig {
        connect_timeout: Duration::from_secs(section.connect_timeout_secs),
        read_timeout: Duration::from_secs(section.read_timeout_secs),
    }
}

pub async fn remote_function_from_section(
    section: &RemoteFunctionSection,
) -> Result<RemoteFunction, DocdiffConfigError> {
    let invocation_config = invocation_config(section);
    match section.kind {
        RemoteFunctionKind::Lambda => Ok(RemoteFunction::Lambda(
            LambdaRemoteFunction::new(
                section.function_name.clone(),
                section.region.clone(),
                &invocation_config,
            )
            .await,
        )),
        RemoteFunctionKind::Http => {
            let url = section.url.clone().ok_or_else(|| {
                DocdiffConfigError::Invalid("remote_function.url is not set".to_string())
            })?;
            Ok(RemoteFunction::Http(HttpRemoteFunction::new(
                url,
                &invocation_config,
            )))
        }
    }
}

pub async fn object_store_from_section(
    section: &ObjectStoreSection,
) -> Result<ObjectStore, DocdiffConfigError> {
    match section.kind {
        ObjectStoreKind::S3 => Ok(ObjectStore::S3(
            S3ObjectStore::new(section.region.clone(), &store_config(section)).await,
        )),
        ObjectStoreKind::File => {
            let base_path = section.base_path.clone().ok_or_else(|| {
                DocdiffConfigError::Invalid("object_store.base_path is not set".to_string())
            })?;
            Ok(ObjectStore::File(FileObjectStore::new(base_path)))
        }
    }
}
