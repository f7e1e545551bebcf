use gpfitness::config::{AppConfig, ConfigManager, ConfigSection, VmConfig};
use gpfitness::FitnessError;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("gpfitness-{}-{}", std::process::id(), name))
}

#[test]
fn test_defaults() {
    let config = ConfigManager::new().get();
    assert_eq!(config.vm.max_steps, 256);
    assert_eq!(config.vm.div_epsilon, 1e-12);
    assert_eq!(config.scoring.floor_fitness, 1e-9);
    assert_eq!(config.evolution.task, "poly2");
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_partial_toml_file() {
    let path = temp_path("partial.toml");
    std::fs::write(
        &path,
        "[vm]\nmax_steps = 64\n\n[evolution]\npopulation_size = 20\nseed = 7\n",
    )
    .unwrap();

    let manager = ConfigManager::new();
    manager.load_from_file(&path).unwrap();
    let config = manager.get();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.vm.max_steps, 64);
    assert_eq!(config.vm.div_epsilon, 1e-12);
    assert_eq!(config.evolution.population_size, 20);
    assert_eq!(config.evolution.seed, Some(7));
    assert_eq!(config.scoring, AppConfig::default().scoring);
}

#[test]
fn test_invalid_file_is_rejected() {
    let path = temp_path("invalid.toml");
    std::fs::write(&path, "[scoring]\nfloor_fitness = 0.0\n").unwrap();

    let manager = ConfigManager::new();
    assert!(manager.load_from_file(&path).is_err());
    std::fs::remove_file(&path).ok();

    // Previous configuration is kept.
    assert_eq!(manager.get(), AppConfig::default());
}

#[test]
fn test_save_and_reload() {
    let path = temp_path("roundtrip.toml");
    let manager = ConfigManager::new();
    manager
        .update(|config| {
            config.vm.max_steps = 128;
            config.scoring.parallel = false;
        })
        .unwrap();
    manager.save_to_file(&path).unwrap();

    let reloaded = ConfigManager::new();
    reloaded.load_from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(reloaded.get().vm.max_steps, 128);
    assert!(!reloaded.get().scoring.parallel);
}

#[test]
fn test_save_to_missing_directory_is_io_error() {
    let path = temp_path("missing-dir").join("config.toml");
    match ConfigManager::new().save_to_file(&path) {
        Err(FitnessError::Io(_)) => {}
        other => panic!("expected IO error, got {:?}", other),
    }
}

#[test]
fn test_update_rejects_invalid_values() {
    let manager = ConfigManager::new();
    assert!(manager.update(|config| config.vm.max_steps = 0).is_err());
    assert_eq!(manager.get().vm.max_steps, 256);
}

#[test]
fn test_section_names() {
    assert_eq!(VmConfig::section_name(), "vm");
}
