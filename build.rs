use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=laserclock.toml");

    let config_path = Path::new("laserclock.toml");
    if !config_path.exists() {
        return;
    }

    // OUT_DIR is target/<profile>/build/<pkg>/out; the executable lives three levels up
    let Some(dest_dir) = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .and_then(|out| out.ancestors().nth(3).map(Path::to_path_buf))
    else {
        return;
    };

    if let Err(e) = fs::copy(config_path, dest_dir.join("laserclock.toml")) {
        println!("cargo:warning=could not copy laserclock.toml: {}", e);
    }
}
