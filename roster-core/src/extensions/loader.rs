use super::api::{BackendMetadata, SolverBackendExt_TO};
use super::root::BackendRootModuleRef;
use crate::backend::{MipBackend, MipSolution};
use crate::conf::config::RosterConfig;
use crate::lp::LpModel;
use abi_stable::library::RootModule;
use abi_stable::std_types::{RBox, RResult, RString};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One plugin slot from the runtime config.
pub struct BackendEntry {
    pub id: String,
    pub path: PathBuf,
    pub enabled: bool,
}

/// Plugin entries declared in the runtime config.
pub fn backend_entries(config: &RosterConfig) -> Vec<BackendEntry> {
    config
        .extensions()
        .unwrap_or_default()
        .iter()
        .map(|entry| BackendEntry {
            id: entry.id.clone(),
            path: entry.path.clone().into(),
            enabled: entry.enabled,
        })
        .collect()
}

struct BackendHandle {
    id: String,
    extension: SolverBackendExt_TO<'static, RBox<()>>,
    _module: Option<BackendRootModuleRef>,
}

/// Loaded solver-backend extensions, addressable by id.
#[derive(Default)]
pub struct BackendRegistry {
    backends: Vec<Arc<BackendHandle>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self {
            backends: Vec::new(),
        }
    }

    /// Register an in-process backend object (no dynamic library).
    pub fn register(&mut self, extension: SolverBackendExt_TO<'static, RBox<()>>) {
        let id = extension.metadata().id.to_string();
        self.backends.push(Arc::new(BackendHandle {
            id,
            extension,
            _module: None,
        }));
    }

    pub fn metadata(&self) -> Vec<BackendMetadata> {
        self.backends
            .iter()
            .map(|handle| handle.extension.metadata())
            .collect()
    }

    pub fn resolve(&self, id: &str) -> Option<PluginBackend> {
        self.backends
            .iter()
            .find(|handle| handle.id == id)
            .map(|handle| PluginBackend {
                handle: handle.clone(),
            })
    }
}

/// [`MipBackend`] adapter over a loaded extension: LP text out, solution
/// JSON back.
pub struct PluginBackend {
    handle: Arc<BackendHandle>,
}

impl MipBackend for PluginBackend {
    fn id(&self) -> &str {
        &self.handle.id
    }

    fn solve(&self, model: &LpModel) -> Result<MipSolution> {
        let text = model.to_lp_string()?;
        match self.handle.extension.solve_model(RString::from(text)) {
            RResult::ROk(json) => serde_json::from_str(json.as_str())
                .context("solver backend returned malformed solution JSON"),
            RResult::RErr(err) => bail!("solver backend '{}' failed: {}", self.handle.id, err),
        }
    }
}

/// Load every enabled entry as a dynamic library.
pub fn load_backends(entries: &[BackendEntry]) -> Result<BackendRegistry> {
    let mut registry = BackendRegistry::new();
    for entry in entries {
        if !entry.enabled {
            continue;
        }
        let handle = load_dynamic_backend(&entry.path)
            .with_context(|| format!("failed to load solver backend {}", entry.id))?;
        registry.backends.push(Arc::new(handle));
    }
    Ok(registry)
}

fn load_dynamic_backend(path: &Path) -> Result<BackendHandle> {
    let module = BackendRootModuleRef::load_from_file(path)
        .with_context(|| format!("failed to load solver backend {}", path.display()))?;
    let constructor = module.get_backend();
    let extension = constructor();
    let id = extension.metadata().id.to_string();
    Ok(BackendHandle {
        id,
        extension,
        _module: Some(module),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MipStatus;
    use crate::extensions::api::SolverBackendExt;
    use abi_stable::sabi_trait::prelude::TD_Opaque;

    struct CannedBackend;

    impl SolverBackendExt for CannedBackend {
        fn metadata(&self) -> BackendMetadata {
            BackendMetadata {
                id: RString::from("canned"),
                version: RString::from("0.0.1"),
                api_version: RString::from("v1"),
            }
        }

        fn solve_model(&self, lp_text: RString) -> RResult<RString, RString> {
            if !lp_text.as_str().starts_with("Minimize") {
                return RResult::RErr(RString::from("not an LP model"));
            }
            RResult::ROk(RString::from(
                r#"{"status":"optimal","primal":{"xWPT_10":3.0}}"#,
            ))
        }
    }

    fn tiny_model() -> LpModel {
        LpModel {
            objective: vec!["xWPT_10".to_string()],
            constraints: Vec::new(),
            variables: vec!["xWPT_10".to_string()],
        }
    }

    #[test]
    fn registry_resolves_by_metadata_id() {
        let mut registry = BackendRegistry::new();
        registry.register(SolverBackendExt_TO::from_value(CannedBackend, TD_Opaque));

        assert!(registry.resolve("missing").is_none());
        let metadata = registry.metadata();
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata[0].id.as_str(), "canned");

        let backend = registry.resolve("canned").expect("backend");
        assert_eq!(backend.id(), "canned");
        let solution = backend.solve(&tiny_model()).expect("solve");
        assert_eq!(solution.status, MipStatus::Optimal);
        assert_eq!(solution.count_for("xWPT_10"), 3);
    }
}
