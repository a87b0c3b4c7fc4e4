use std::{collections::BTreeMap, fmt::Write, path::PathBuf};

const UP: &str = ".up.sql";
const DOWN: &str = ".down.sql";

/// Embeds every `migrations/<name>.{up,down}.sql` pair as a `Migration`
/// literal, sorted by name.
fn main() {
    println!("cargo::rerun-if-changed=migrations");

    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let mut migrations = BTreeMap::<String, [String; 2]>::new();

    for entry in dir.read_dir().expect("failed to read migrations directory") {
        let entry = entry.expect("failed to read migrations directory entry");
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let (name, slot) = if let Some(name) = file_name.strip_suffix(UP) {
            (name, 0)
        } else if let Some(name) = file_name.strip_suffix(DOWN) {
            (name, 1)
        } else {
            continue;
        };

        let content = std::fs::read_to_string(entry.path())
            .unwrap_or_else(|err| panic!("failed to read {file_name}: {err}"));
        migrations.entry(name.to_owned()).or_default()[slot] = content;
    }

    let mut code = String::from("&[");
    for (name, [up, down]) in &migrations {
        assert!(!up.is_empty(), "migration {name} has no {UP} script");
        assert!(!down.is_empty(), "migration {name} has no {DOWN} script");
        write!(code, "Migration{{name:{name:?},up:{up:?},down:{down:?}}},").unwrap();
    }
    code.push(']');

    let out = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR is not set"))
        .join("migrations.rs");
    std::fs::write(&out, code).expect("failed to write migrations.rs");
    println!("cargo::rustc-env=MIGRATIONS={}", out.display());
}
