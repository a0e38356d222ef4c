use abi_stable::library::RootModule;
use abi_stable::sabi_types::version::VersionStrings;
use abi_stable::std_types::RBox;

use super::api::SolverBackendExt_TO;

#[repr(C)]
#[derive(abi_stable::StableAbi)]
#[sabi(kind(Prefix(prefix_ref = BackendRootModuleRef, prefix_fields = BackendRootModule_Prefix)))]
pub struct BackendRootModule {
    #[sabi(last_prefix_field)]
    pub get_backend: extern "C" fn() -> SolverBackendExt_TO<'static, RBox<()>>,
}

impl RootModule for BackendRootModuleRef {
    abi_stable::declare_root_module_statics! {BackendRootModuleRef}
    const BASE_NAME: &'static str = "roster_backend";
    const NAME: &'static str = "roster_backend";
    const VERSION_STRINGS: VersionStrings = abi_stable::package_version_strings!();
}
