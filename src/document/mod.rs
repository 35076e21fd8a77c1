//! The payslip document, its operator session and its rendering.
//!
//! A [`PayslipSession`] collects the operator's selections and generates a
//! [`PayslipDocument`]. The document is laid out as a [`PayslipLayout`] and
//! handed to a [`DocumentSnapshotExporter`] to produce the final artifact.

mod layout;
mod payslip_document;
mod session;
mod snapshot;

pub use layout::{AmountRow, LabeledValue, PayslipLayout};
pub use payslip_document::{AttendanceChangePolicy, EditMode, OtherDeductions, PayslipDocument};
pub use session::PayslipSession;
pub use snapshot::{
    DocumentSnapshotExporter, SnapshotArtifact, TextSnapshotExporter, export_snapshot,
};
