pub mod npm_execution;
pub mod project_scanner;
pub mod version_control;

pub use npm_execution::{NpmExecutionAgent, PackageManager};
pub use project_scanner::{PackageManifest, ProjectInfo, ProjectScannerAgent};
pub use version_control::{ManifestChanges, VersionControlAgent};
