use anyhow::Result;
use pii_config::Config;
use std::path::PathBuf;

pub fn handle(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path.unwrap_or_else(Config::config_path);

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let config = Config::default();
    config.save_to(&path)?;

    println!("✓ Created {}", path.display());
    for note in notes(&config) {
        println!("  {}", note);
    }

    Ok(())
}

/// Follow-up hints printed after the file is written
fn notes(config: &Config) -> Vec<&'static str> {
    let mut notes = Vec::new();
    if !config.recognizer.detects_names() {
        notes.push(
            "Note: the gazetteer is empty, so person, location and organization names \
             are NOT redacted yet",
        );
        notes.push(
            "  Add names under [recognizer.gazetteer] or set recognizer.kind = \"http\" \
             with an NER service url",
        );
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        handle(Some(path.clone()), false).unwrap();
        assert!(Config::load_from(&path).is_ok());

        assert!(handle(Some(path.clone()), false).is_err());
        assert!(handle(Some(path), true).is_ok());
    }

    #[test]
    fn test_notes_flag_missing_name_detection() {
        let hints = notes(&Config::default());
        assert!(hints[0].contains("NOT redacted"));

        let mut config = Config::default();
        config.recognizer.gazetteer.persons.push("Rahul".to_string());
        assert!(notes(&config).is_empty());
    }
}
