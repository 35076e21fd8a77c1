//! Boundary to the document snapshot collaborator.
//!
//! Turning a laid-out payslip into a binary document (PDF or otherwise) is
//! done outside the engine. The engine supplies the layout and the artifact
//! name, makes one call, and reports failure as `SnapshotFailed`.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::PayslipConfig;
use crate::error::{EngineError, EngineResult};

use super::layout::PayslipLayout;
use super::payslip_document::PayslipDocument;

/// Renders a payslip layout into document bytes.
#[async_trait]
pub trait DocumentSnapshotExporter: Send + Sync {
    /// Produces the document bytes for `layout`.
    async fn render(&self, layout: &PayslipLayout) -> anyhow::Result<Vec<u8>>;
}

/// A rendered payslip document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotArtifact {
    /// `Payslip_<employeeName>_<month>_<year>.pdf`.
    pub file_name: String,
    /// Bytes returned by the exporter.
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Lays out `document` and hands it to `exporter`.
///
/// The call is made once. A failure is returned as `SnapshotFailed` carrying
/// the exporter's message; the document is only borrowed and is left as it was.
pub async fn export_snapshot<E>(
    exporter: &E,
    document: &PayslipDocument,
    config: &PayslipConfig,
) -> EngineResult<SnapshotArtifact>
where
    E: DocumentSnapshotExporter + ?Sized,
{
    let layout = PayslipLayout::from_document(document, config);

    match exporter.render(&layout).await {
        Ok(bytes) => {
            info!(file_name = %layout.file_name, size = bytes.len(), "Payslip snapshot exported");
            Ok(SnapshotArtifact {
                file_name: layout.file_name,
                bytes,
            })
        }
        Err(err) => {
            warn!(file_name = %layout.file_name, error = %err, "Payslip snapshot failed");
            Err(EngineError::SnapshotFailed {
                message: err.to_string(),
            })
        }
    }
}

/// Exporter that writes the fixed-width text rendering as UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSnapshotExporter;

#[async_trait]
impl DocumentSnapshotExporter for TextSnapshotExporter {
    async fn render(&self, layout: &PayslipLayout) -> anyhow::Result<Vec<u8>> {
        Ok(layout.render_text().into_bytes())
    }
}
