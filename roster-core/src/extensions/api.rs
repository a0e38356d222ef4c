use abi_stable::std_types::{RResult, RString};

#[derive(abi_stable::StableAbi, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct BackendMetadata {
    pub id: RString,
    pub version: RString,
    pub api_version: RString,
}

#[abi_stable::sabi_trait]
pub trait SolverBackendExt: Send + Sync {
    fn metadata(&self) -> BackendMetadata;

    /// Solve the LP text and return the solution as JSON
    /// (`{"status": ..., "primal": {...}}`), or a diagnostic string.
    fn solve_model(&self, lp_text: RString) -> RResult<RString, RString>;
}
