use std::{env, fs, path::PathBuf};

/// Files served by the blink page, in the order they are listed at boot.
const FILES: [&str; 3] = ["index.html", "styles.css", "script.js"];

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let web_dir = manifest_dir.join("../web");
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    println!("cargo:rerun-if-changed={}", web_dir.display());

    let mut table = String::from("pub static ASSETS: &[(&str, &[u8])] = &[\n");
    for name in FILES {
        let path = web_dir.join(name);
        println!("cargo:rerun-if-changed={}", path.display());
        // A missing file is left out so the firmware answers 404 for it
        if !path.is_file() {
            println!("cargo:warning=web asset {name} is missing and will not be served");
            continue;
        }
        let path = fs::canonicalize(&path).expect("Failed to resolve web asset path");
        table.push_str(&format!(
            "    ({:?}, include_bytes!({:?})),\n",
            name,
            path.display().to_string()
        ));
    }
    table.push_str("];\n");

    fs::write(out_dir.join("assets.rs"), table).expect("Failed to write assets.rs");
}
