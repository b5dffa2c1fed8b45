//! Assembles the transcript bundle into the delivered text artifact.
//! Rendering is pure; the only failure mode is the final write.

use std::path::Path;

use crate::types::TranscriptBundle;

/// Fixed section order: summary, transcript, optional translation, analysis.
pub fn render(bundle: &TranscriptBundle) -> String {
    let mut out = String::new();
    out.push_str("Summary:\n");
    out.push_str(&bundle.summary);
    out.push_str("\n\n");
    out.push_str(&format!(
        "Transcript (language: {}):\n",
        bundle.language_or_unknown()
    ));
    out.push_str(&bundle.transcript);
    out.push_str("\n\n");
    if let Some(translated) = &bundle.translated {
        out.push_str("Translation:\n");
        out.push_str(translated);
        out.push_str("\n\n");
    }
    out.push_str("Analysis:\n");
    out.push_str(&bundle.analysis);
    out
}

pub fn write_output(bundle: &TranscriptBundle, path: &Path) -> std::io::Result<()> {
    std::fs::write(path, render(bundle))
}
