pub mod naming;
pub mod ytdlp;

use std::{fmt::Debug, future::Future};

use url::Url;

use crate::types::MediaKind;
use self::naming::OutputTemplate;

/// One fetch instruction: a validated source, a single format policy and
/// the naming template the artifact must land under.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub source: Url,
    pub kind: MediaKind,
    pub template: OutputTemplate,
}

/// Drives the external extraction tool. Implementations report success once
/// the tool exits cleanly; where the produced file actually landed is the
/// naming resolver's problem, not the fetcher's.
pub trait MediaFetcher {
    type Error: Debug + Send;

    fn fetch(
        &self,
        request: &FetchRequest,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
