pub mod app;
pub mod core;
pub mod ffi;

pub use crate::core::requirement::{Compatibility, Requirement};
pub use crate::core::version::{
    compare, get_platform_exec_suffix, get_version_string, get_version_triple,
    is_compatible, is_compatible_with, Version, VersionInfo, BUILD_INFO, BUILD_TIME, EXEEXT,
    VERSION, VERSION_MAJOR, VERSION_MICRO, VERSION_MINOR, VERSION_STRING,
};
