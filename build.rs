use chrono::{DateTime, Utc};
use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

fn main() {
    let out_dir = env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("version.rs");
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let cargo_toml_path = Path::new(&manifest_dir).join("Cargo.toml");

    // Re-render the triple from integers so the short string is always canonical
    let major = version_component("CARGO_PKG_VERSION_MAJOR");
    let minor = version_component("CARGO_PKG_VERSION_MINOR");
    let micro = version_component("CARGO_PKG_VERSION_PATCH");
    let version = format!("{}.{}.{}", major, minor, micro);

    let build_time = build_timestamp();
    let version_string = format!("{}-{}", version, build_time);

    let cargo_toml_content = std::fs::read_to_string(&cargo_toml_path).unwrap();
    let exec_suffix = metadata_exec_suffix(&cargo_toml_content).unwrap_or_else(|| {
        match env::var("CARGO_CFG_TARGET_OS").as_deref() {
            Ok("windows") => ".exe".to_string(),
            _ => String::new(),
        }
    });

    let mut f = File::create(&dest_path).unwrap();

    #[allow(clippy::uninlined_format_args)]
    writeln!(
        &mut f,
        r###"pub const VERSION_MAJOR: u32 = {};
pub const VERSION_MINOR: u32 = {};
pub const VERSION_MICRO: u32 = {};
pub const VERSION: &str = {:?};
pub const VERSION_STRING: &str = {:?};
pub const BUILD_TIME: &str = {:?};
pub const EXEEXT: &str = {:?};"###,
        major, minor, micro, version, version_string, build_time, exec_suffix
    )
    .unwrap();

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
}

fn version_component(var: &str) -> u32 {
    env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

// SOURCE_DATE_EPOCH pins the timestamp for reproducible builds
fn build_timestamp() -> String {
    let when: DateTime<Utc> = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now);
    when.format("%a %b %e %H:%M:%S UTC %Y").to_string()
}

fn metadata_exec_suffix(cargo_toml_content: &str) -> Option<String> {
    cargo_toml_content
        .parse::<toml::Table>()
        .ok()?
        .get("package")
        .and_then(|p| p.as_table())
        .and_then(|p| p.get("metadata"))
        .and_then(|m| m.as_table())
        .and_then(|m| m.get("vips"))
        .and_then(|v| v.as_table())
        .and_then(|v| v.get("exec_suffix"))
        .and_then(|s| s.as_str())
        .map(|s| s.to_string())
}
