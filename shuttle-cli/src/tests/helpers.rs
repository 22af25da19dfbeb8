//! Request fixtures written to temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use shuttle_core::OptimizeRequest;
use shuttle_core::test_support::ishigaki_morning_tour;
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

pub(super) fn write_request(path: &Utf8Path, request: &OptimizeRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}

/// A temporary directory holding `request.json` with the morning tour.
pub(super) struct Workspace {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) request_path: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let request_path = root.join("request.json");
        Self {
            _dir: dir,
            root,
            request_path,
        }
    }

    pub(super) fn with_morning_tour() -> Self {
        let workspace = Self::new();
        write_request(&workspace.request_path, &ishigaki_morning_tour(None));
        workspace
    }
}
