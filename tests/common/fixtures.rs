use std::path::PathBuf;

pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

pub fn load_roster() -> termattrib::Roster {
    termattrib::Roster::load_from_files(
        &fixture_path("customers.json"),
        &fixture_path("terminals.json"),
    )
    .expect("Failed to load fixture rosters")
}
