use url::Url;

use crate::PipelineError;

/// Syntactic gate for the source reference. Runs before any subprocess or
/// paid API call; only absolute http/https URLs with a host pass.
pub fn validate_source(raw: Option<&str>) -> Result<Url, PipelineError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PipelineError::InvalidInput("no source url provided".into()))?;

    let url = Url::parse(raw)
        .map_err(|e| PipelineError::InvalidInput(format!("not an absolute url: {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(PipelineError::InvalidInput(format!(
                "unsupported scheme '{other}', expected http or https"
            )))
        }
    }

    if url.host_str().is_none() {
        return Err(PipelineError::InvalidInput(
            "url has no network location".into(),
        ));
    }

    Ok(url)
}
