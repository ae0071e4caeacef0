use std::env;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("songs.rs");

    let mut code = String::new();
    code.push_str("/// Embedded song files\n");
    code.push_str("pub static SONGS: &[(&str, &str)] = &[\n");

    let songs_dir = Path::new("library");

    if songs_dir.exists() {
        for entry in WalkDir::new(songs_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "txt"))
        {
            let path = entry.path();
            let relative_path = path.strip_prefix(songs_dir).unwrap();
            let name = relative_path.with_extension("");
            let name = name.to_string_lossy().replace('\\', "/");

            // Debug formatting yields a valid string literal
            if let Ok(content) = fs::read_to_string(path) {
                code.push_str(&format!("    ({:?}, {:?}),\n", name, content));
            }
        }
    }

    code.push_str("];\n");

    fs::write(&dest_path, code).unwrap();

    println!("cargo:rerun-if-changed=library");
}
