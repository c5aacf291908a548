//! Unit tests for pf-cli's loading and bootstrap helpers.

#[cfg(test)]
mod config_loader {
    use crate::config_loader::load;

    #[test]
    fn missing_path_falls_back_to_defaults() {
        let (config, warnings) = load(None).unwrap();
        assert_eq!(config.frequency_hz, 10);
        assert!(warnings.is_empty());
    }

    #[test]
    fn loads_and_clamps_an_out_of_range_toml_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "frequency_hz = 999\ntarget_people_count = 10\n").unwrap();

        let (config, warnings) = load(Some(&path)).unwrap();
        assert_eq!(config.frequency_hz, 60);
        assert_eq!(config.target_people_count, 10);
        assert!(warnings.iter().any(|w| w.contains("frequency_hz")));
    }

    #[test]
    fn rejects_unparseable_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is not toml = = =").unwrap();
        assert!(load(Some(&path)).is_err());
    }
}

#[cfg(test)]
mod scene_loader {
    use crate::scene_loader::load;

    fn sample_scene_json() -> &'static str {
        r#"{
            "width_m": 10.0,
            "depth_m": 8.0,
            "obstacles": [],
            "entrances": [{"points": [
                {"x": 0.0, "y": 1.0}, {"x": 0.0, "y": 2.0},
                {"x": 1.0, "y": 2.0}, {"x": 1.0, "y": 1.0}
            ]}],
            "zones": [],
            "lanes": []
        }"#
    }

    #[test]
    fn loads_a_valid_scene() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, sample_scene_json()).unwrap();

        let scene = load(&path).unwrap();
        assert_eq!(scene.width_m, 10.0);
        assert_eq!(scene.entrances.len(), 1);
    }

    #[test]
    fn rejects_a_scene_that_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, r#"{"width_m": 0.0, "depth_m": 8.0, "obstacles": [], "entrances": [], "zones": [], "lanes": []}"#).unwrap();

        assert!(load(&path).is_err());
    }
}
