use std::env;
use std::path::PathBuf;

const WATCHED_VARIABLES: [&str; 3] = ["FFMPEG_DIR", "VCPKG_ROOT", "VCPKGRS_TRIPLET"];

fn main() {
    for variable in WATCHED_VARIABLES {
        println!("cargo:rerun-if-env-changed={variable}");
    }

    // ffmpeg-sys-next finds FFmpeg through pkg-config everywhere but Windows.
    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows"
        || env::var_os("FFMPEG_DIR").is_some()
    {
        return;
    }

    match vcpkg_ffmpeg_dir() {
        Some(directory) if directory.exists() => println!(
            "cargo:warning=Found vcpkg FFmpeg at {0}; set FFMPEG_DIR={0} if the build cannot locate it.",
            directory.display(),
        ),
        Some(directory) => println!(
            "cargo:warning=VCPKG_ROOT is set but {} does not exist.",
            directory.display(),
        ),
        None => println!(
            "cargo:warning=FFMPEG_DIR is not set. Install FFmpeg (e.g. via vcpkg) and point FFMPEG_DIR at it."
        ),
    }
}

fn vcpkg_ffmpeg_dir() -> Option<PathBuf> {
    let root = env::var("VCPKG_ROOT").ok()?;
    let triplet = env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
    Some(PathBuf::from(root).join("installed").join(triplet))
}
