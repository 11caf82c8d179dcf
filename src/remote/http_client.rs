use serde::de::DeserializeOwned;

use super::*;

pub(super) fn with_retries<T>(label: &str, mut f: impl FnMut() -> Result<T>) -> Result<T> {
    const ATTEMPTS: usize = 3;
    let mut last: Option<anyhow::Error> = None;
    for i in 0..ATTEMPTS {
        match f() {
            Ok(v) => return Ok(v),
            Err(err) => {
                tracing::debug!(label, attempt = i + 1, "request failed: {:#}", err);
                last = Some(err);
                if i + 1 < ATTEMPTS {
                    std::thread::sleep(std::time::Duration::from_millis(200 * (1 << i)));
                }
            }
        }
    }
    Err(last
        .unwrap_or_else(|| anyhow::anyhow!("unknown error"))
        .context(label.to_string()))
}

/// Collapse an envelope into the store's single failure channel.
pub(super) fn unwrap_envelope<T>(res: Result<Envelope<T>>) -> Result<T, StoreError> {
    let envelope = res?;
    match envelope.error {
        Some(err) if !err.is_empty() => Err(StoreError(err)),
        _ => Ok(envelope.payload),
    }
}

impl HttpStore {
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("{}: endpoint not found (is the store running at {}?)", label, self.base_url);
        }
        resp.error_for_status()
            .with_context(|| format!("{} status", label))
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Only the send is retried; a bad status or body would come back the same.
    fn send_get(
        &self,
        path: &str,
        query: &[(&str, String)],
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        with_retries(label, || {
            self.client
                .get(self.url(path))
                .query(query)
                .send()
                .with_context(|| format!("{} request", label))
        })
    }

    pub(super) fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        label: &str,
    ) -> Result<Envelope<T>> {
        let resp = self.send_get(path, query, label)?;
        self.ensure_ok(resp, label)?
            .json::<Envelope<T>>()
            .with_context(|| format!("parse {} response", label))
    }

    /// Mutations go out exactly once; a retry could apply them twice.
    pub(super) fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        label: &str,
    ) -> Result<Envelope<Ack>> {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .with_context(|| format!("{} request", label))?;
        self.ensure_ok(resp, label)?
            .json::<Envelope<Ack>>()
            .with_context(|| format!("parse {} response", label))
    }

    pub(super) fn get_text(&self, path: &str, label: &str) -> Result<String> {
        let resp = self.send_get(path, &[], label)?;
        self.ensure_ok(resp, label)?
            .text()
            .with_context(|| format!("read {} response", label))
    }
}
