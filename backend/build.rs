//! Stages the dashboard bundle for embedding.
//!
//! `trunk build` writes the frontend to `frontend/dist`; its content is
//! copied into `static/dist`, which `main.rs` bundles with `include_dir!`.
//! The directory is created even when no bundle exists yet so the backend
//! still builds on a fresh checkout.

use fs_extra::dir::CopyOptions;
use std::fs;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bundle_dir = Path::new("static").join("dist");
    let dist_dir = Path::new("../frontend/dist");

    if dist_dir.exists() {
        if bundle_dir.exists() {
            fs::remove_dir_all(&bundle_dir)?;
        }
        fs::create_dir_all(&bundle_dir)?;
        let options = CopyOptions::new().overwrite(true).content_only(true);
        fs_extra::dir::copy(dist_dir, &bundle_dir, &options)?;
    } else {
        fs::create_dir_all(&bundle_dir)?;
    }

    println!("cargo:rerun-if-changed=../frontend/dist");
    Ok(())
}
