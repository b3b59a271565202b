//! [`HttpRequester`] for `reqwest::Client`.

use async_trait::async_trait;
use bytes::Bytes;

use super::traits::HttpRequester;

/// Sends the request with `reqwest` and buffers the response body.
///
/// Every completed exchange yields `Some(response)`; transport failures and
/// requests `reqwest` cannot represent surface as `reqwest::Error`.
#[async_trait]
impl HttpRequester for reqwest::Client {
    type Error = reqwest::Error;

    async fn send(
        &self,
        request: http::Request<Bytes>,
    ) -> Result<Option<http::Response<Bytes>>, reqwest::Error> {
        let request = reqwest::Request::try_from(request)?;
        let response = reqwest::Client::execute(self, request).await?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        let mut out = http::Response::new(body);
        *out.status_mut() = status;
        *out.version_mut() = version;
        *out.headers_mut() = headers;
        Ok(Some(out))
    }
}
