use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=assets/");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("banners.rs");
    let mut f = fs::File::create(&dest_path).unwrap();

    let asset_dir = Path::new("assets").join("banners");
    if !asset_dir.exists() {
        writeln!(f, "pub const BANNERS: &[&str] = &[];").unwrap();
        writeln!(f, "pub const BANNER_WIDTH: usize = 0;").unwrap();
        return;
    }

    let mut entries: Vec<_> = fs::read_dir(&asset_dir)
        .unwrap()
        .map(|res| res.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();

    // File names carry the rotation order (01-, 02-, ...)
    entries.sort();

    writeln!(f, "pub const BANNERS: &[&str] = &[").unwrap();

    let mut widest = 0usize;
    for path in entries {
        let content = fs::read_to_string(&path).unwrap();
        // Drop trailing padding so themes don't paint past the art
        let trimmed: Vec<&str> = content.lines().map(str::trim_end).collect();
        for line in &trimmed {
            widest = widest.max(line.chars().count());
        }
        writeln!(f, "    {:?},", trimmed.join("\n")).unwrap();
    }

    writeln!(f, "];").unwrap();
    writeln!(f, "pub const BANNER_WIDTH: usize = {};", widest).unwrap();
}
