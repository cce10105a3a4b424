use crate::{
    http::HttpRemoteFunction, lambda::LambdaRemoteFunction, InvocationEnvelope, InvocationPayload,
    InvokeError, RemoteFunctionTrait,
};

#[derive(Debug, Clone)]
pub enum RemoteFunction {
    Lambda(LambdaRemoteFunction),
    Http(HttpRemoteFunction),
}

impl RemoteFunctionTrait for RemoteFunction {
    fn name(&self) -> &str {
        match self {
            RemoteFunction::Lambda(function) => function.name(),
            RemoteFunction::Http(function) => function.name(),
        }
    }

    async fn invoke(&self, payload: &InvocationPayload) -> Result<InvocationEnvelope, InvokeError> {
        match self {
            RemoteFunction::Lambda(function) => function.invoke(payload).await,
            RemoteFunction::Http(function) => function.invoke(payload).await,
        }
    }
}
