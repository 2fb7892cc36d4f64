//! C ABI for bindings and plugin loaders that link the cdylib.
//!
//! Mirrors the libvips entry points: `vips_version(flag)` returns a single
//! component and `vips_version_string()` the long version string.

use crate::core::version::{self, VERSION_STRING};
use libc::{c_char, c_int};
use std::ffi::CStr;
use std::sync::OnceLock;

static VERSION_CSTRING: OnceLock<Vec<u8>> = OnceLock::new();

/// Component by index: 0 major, 1 minor, 2 micro; -1 for anything else.
#[no_mangle]
pub extern "C" fn vips_version(flag: c_int) -> c_int {
    usize::try_from(flag)
        .ok()
        .and_then(version::version_component)
        .and_then(|value| c_int::try_from(value).ok())
        .unwrap_or(-1)
}

/// NUL-terminated long version string, valid for the life of the process.
#[no_mangle]
pub extern "C" fn vips_version_string() -> *const c_char {
    version_cstr().as_ptr()
}

/// 1 when this library satisfies `major.minor`, 0 otherwise.
#[no_mangle]
pub extern "C" fn vips_version_is_compatible(
    required_major: c_int,
    required_minor: c_int,
) -> c_int {
    match (u32::try_from(required_major), u32::try_from(required_minor)) {
        (Ok(major), Ok(minor)) => c_int::from(version::is_compatible_with(major, minor)),
        _ => 0,
    }
}

fn version_cstr() -> &'static CStr {
    let bytes = VERSION_CSTRING.get_or_init(|| {
        // An interior NUL would truncate the string for C callers; cut there explicitly
        let mut bytes: Vec<u8> = VERSION_STRING.bytes().take_while(|b| *b != 0).collect();
        bytes.push(0);
        bytes
    });
    // Built above with exactly one trailing NUL
    CStr::from_bytes_with_nul(bytes).unwrap_or_default()
}
