use std::env;
use std::fs;
use std::path::Path;

// Кладём config.toml рядом с бинарником, там его ищет load_config()
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let out_dir = env::var("OUT_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap();

    // OUT_DIR: target/<profile>/build/backend-xxx/out
    let Some(target_dir) = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
    else {
        println!("cargo:warning=target/{profile} not found, config.toml not copied");
        return;
    };

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root");

    let source = workspace_root.join("config.toml");
    if !source.exists() {
        println!("cargo:warning=config.toml not found, backend will use embedded defaults");
        return;
    }

    let dest = target_dir.join("config.toml");
    fs::copy(&source, &dest).unwrap_or_else(|e| panic!("copy config.toml: {e}"));
}
