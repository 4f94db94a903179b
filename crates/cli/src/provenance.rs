use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What a crown run consumed and produced, recorded next to its output.
pub struct Payload {
    pub params: Value,
    pub inputs: Vec<String>,
    pub crowns: usize,
    pub skipped: usize,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            inputs: Vec::new(),
            crowns: 0,
            skipped: 0,
        }
    }
}

/// Write `<artifact-stem>.provenance.json` with code revision, callsite, params, counts and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let mut doc = header();
    doc["callsite"] = json!({ "file": callsite.file(), "line": callsite.line() });
    doc["params"] = payload.params;
    doc["inputs"] = json!(payload.inputs);
    doc["counts"] = json!({ "crowns": payload.crowns, "skipped": payload.skipped });
    doc["outputs"] = json!([artifact.to_string_lossy()]);
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

/// Tool name, versions and code revision; shared by sidecars and `crown report`.
pub fn header() -> Value {
    json!({
        "tool": "crown",
        "version": env!("CARGO_PKG_VERSION"),
        "kernel_version": crown::VERSION,
        "code_rev": current_git_rev(),
    })
}

/// `crowns.geojson` → `crowns.provenance.json`, in the same directory.
fn provenance_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// Revision stamped into every header: `GIT_COMMIT` (runtime, then build time),
/// else `git rev-parse HEAD`, else "unknown".
fn current_git_rev() -> String {
    let from_env = std::env::var("GIT_COMMIT")
        .ok()
        .into_iter()
        .chain(option_env!("GIT_COMMIT").map(str::to_string))
        .find(|rev| !rev.is_empty());
    from_env
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string())
}

fn git_head() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let rev = String::from_utf8(output.stdout).ok()?;
    Some(rev.trim().to_string()).filter(|r| !r.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_rewrites_extension() {
        let base = Path::new("/tmp/output/crowns.geojson");
        let derived = provenance_path(base);
        assert_eq!(derived, Path::new("/tmp/output/crowns.provenance.json"));
        assert_eq!(
            provenance_path(Path::new("out/crowns")),
            Path::new("out/crowns.provenance.json")
        );
    }

    #[test]
    fn header_carries_versions_and_revision() {
        let h = header();
        assert_eq!(h["tool"], "crown");
        assert_eq!(h["kernel_version"], crown::VERSION);
        let rev = h["code_rev"].as_str().unwrap();
        assert!(!rev.is_empty());
        assert_eq!(rev, current_git_rev());
    }

    #[test]
    fn write_sidecar_records_counts_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("a.geojson");
        fs::write(&artifact, "{}").unwrap();
        let mut payload = Payload::new(json!({"crs": "EPSG:25832"}));
        payload.inputs.push("trees.csv".into());
        payload.crowns = 3;
        payload.skipped = 1;
        let prov_path = write_sidecar(&artifact, payload).unwrap();
        assert!(prov_path.exists());
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["counts"]["crowns"], 3);
        assert_eq!(parsed["counts"]["skipped"], 1);
        assert_eq!(parsed["params"]["crs"], "EPSG:25832");
        assert_eq!(parsed["tool"], "crown");
    }
}
