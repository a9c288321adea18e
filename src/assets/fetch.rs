use crate::{
    config::LoaderOpts,
    foundation::error::{FramegenError, FramegenResult},
};

/// Blocking HTTP(S) client with a bounded per-request timeout.
///
/// Build it outside any async runtime; `reqwest::blocking` owns its own.
#[derive(Clone, Debug)]
pub struct RemoteFetcher {
    #[cfg(feature = "remote")]
    client: reqwest::blocking::Client,
}

impl RemoteFetcher {
    #[cfg(feature = "remote")]
    pub fn new(opts: &LoaderOpts) -> FramegenResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(opts.fetch_timeout())
            .user_agent(opts.user_agent.clone())
            .build()
            .map_err(|e| FramegenError::fetch(format!("build http client: {e}")))?;
        Ok(Self { client })
    }

    #[cfg(not(feature = "remote"))]
    pub fn new(_opts: &LoaderOpts) -> FramegenResult<Self> {
        Ok(Self {})
    }

    /// Fetch the body of `url`. Transport failures, timeouts and non-2xx answers
    /// all map to [`FramegenError::Fetch`].
    #[cfg(feature = "remote")]
    pub fn fetch(&self, url: &str) -> FramegenResult<Vec<u8>> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FramegenError::fetch(describe_transport_error(url, &e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FramegenError::fetch(format!("GET {url} returned {status}")));
        }

        let body = resp
            .bytes()
            .map_err(|e| FramegenError::fetch(describe_transport_error(url, &e)))?;
        tracing::debug!(url, bytes = body.len(), "fetched remote image");
        Ok(body.to_vec())
    }

    #[cfg(not(feature = "remote"))]
    pub fn fetch(&self, url: &str) -> FramegenResult<Vec<u8>> {
        Err(FramegenError::fetch(format!(
            "cannot fetch {url}: built without the `remote` feature"
        )))
    }
}

#[cfg(feature = "remote")]
fn describe_transport_error(url: &str, e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("GET {url} timed out: {e}")
    } else if e.is_connect() {
        format!("GET {url} could not connect: {e}")
    } else {
        format!("GET {url} failed: {e}")
    }
}
