//! Handler for `bindery pinned`.

use std::path::Path;

use miette::Result;

use bindery_core::config::GlobalConfig;
use bindery_ops::ops_pinned;

pub fn exec(manifest_path: Option<&Path>, skip: Option<&str>) -> Result<()> {
    let cwd = super::current_dir()?;
    let config = GlobalConfig::load()?;
    for name in ops_pinned::pinned(&cwd, manifest_path, &config, skip)? {
        println!("{name}");
    }
    Ok(())
}
