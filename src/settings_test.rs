use crate::error::{QuickTagError, QuickTagExpectedError};
use crate::frame::FrameName;
use crate::settings::*;
use tempfile::TempDir;

#[test]
fn test_settings_default() {
    let settings = QuickTagSettings::default();
    assert_eq!(settings.moods.len(), 9);
    assert_eq!(settings.mood_tag, FrameName::new("TMOO", "MOOD", "iTunes:MOOD"));
    assert_eq!(settings.energy_tag.encoding, EnergyEncoding::Rating);
    assert_eq!(settings.custom.len(), 3);
    assert!(settings.custom.iter().all(|c| c.tag == settings.note_tag.tag));
    assert!(settings.is_subgenre("Dubstep"));
    assert!(!settings.is_subgenre("Techno"));
    assert_eq!(settings.sort_option, SortOption::Title);
    assert!(settings.ambiguities().is_empty());
}

#[test]
fn test_settings_from_json() {
    let settings = QuickTagSettings::from_json(
        r##"{
            "id3v24": true,
            "id3CommLang": "eng",
            "sortOption": "bpm",
            "noteTag": {"tag": {"id3": "COMM", "vorbis": "COMMENT", "mp4": "©cmt"}},
            "moodTag": {"id3": "TMOO", "vorbis": "MOOD", "mp4": "iTunes:MOOD"},
            "energyTag": {"type": "symbol", "symbol": "#", "tag": {"id3": "TXXX:ENERGY", "vorbis": "ENERGY", "mp4": "iTunes:ENERGY"}},
            "genres": [{"genre": "House"}, {"genre": "Electro", "subgenres": ["EDM"]}],
            "subgenreTag": {"id3": "TXXX:SUBGENRE", "vorbis": "SUBGENRE", "mp4": "iTunes:SUBGENRE"},
            "custom": [{"name": "Vibe", "tag": {"id3": "COMM", "vorbis": "COMMENT", "mp4": "©cmt"}, "values": [{"val": "Dirty"}]}]
        }"##,
    )
    .unwrap();

    assert!(settings.id3v24);
    assert_eq!(settings.id3_comm_lang.as_deref(), Some("eng"));
    assert_eq!(settings.sort_option, SortOption::Bpm);
    assert_eq!(settings.energy_tag.encoding, EnergyEncoding::Symbol { symbol: "#".to_string() });
    assert_eq!(settings.energy_tag.tag.vorbis, "ENERGY");
    assert!(settings.genres[0].subgenres.is_empty());
    assert!(settings.is_subgenre("EDM"));
    assert!(settings.subgenre_tag.is_some());
    assert!(settings.custom[0].contains("Dirty"));
    assert!(!settings.custom[0].contains("dirty"));
    // Keys absent from the payload keep their defaults
    assert_eq!(settings.moods.len(), 9);
}

#[test]
fn test_energy_tag_wire_shape() {
    let rating = EnergyTag::default();
    let json = serde_json::to_value(&rating).unwrap();
    assert_eq!(json["type"], "rating");
    assert_eq!(json["symbol"], "*");
    assert_eq!(json["tag"]["id3"], "TCOM");

    // Symbol defaults to `*`
    let tag: EnergyTag = serde_json::from_str(r#"{"type": "symbol", "tag": {"id3": "A", "vorbis": "B", "mp4": "C"}}"#).unwrap();
    assert_eq!(tag.encoding, EnergyEncoding::Symbol { symbol: "*".to_string() });
}

#[test]
fn test_settings_json_roundtrip() {
    let settings = QuickTagSettings::default();
    let parsed = QuickTagSettings::from_json(&settings.to_json().unwrap()).unwrap();
    assert_eq!(parsed, settings);
}

#[test]
fn test_settings_parse_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
        id3v24 = true
        sortDescending = true

        [moodTag]
        id3 = "TXXX:MOOD"
        vorbis = "MOOD"
        mp4 = "iTunes:MOOD"

        [energyTag]
        type = "symbol"
        symbol = "*"
        tag = { id3 = "TCOM", vorbis = "COMPOSER", mp4 = "©wrt" }

        [[custom]]
        name = "Situation"
        tag = { id3 = "COMM", vorbis = "COMMENT", mp4 = "©cmt" }
        values = [{ val = "Start" }, { val = "Peak" }]
        "#,
    )
    .unwrap();

    let settings = QuickTagSettings::parse(Some(&config_path)).unwrap();
    assert!(settings.id3v24);
    assert!(settings.sort_descending);
    assert_eq!(settings.mood_tag.id3, "TXXX:MOOD");
    assert_eq!(settings.energy_tag.encoding, EnergyEncoding::Symbol { symbol: "*".to_string() });
    assert_eq!(settings.custom.len(), 1);
    assert_eq!(settings.custom[0].position("Peak"), Some(1));
}

#[test]
fn test_settings_parse_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nope.toml");
    let err = QuickTagSettings::parse(Some(&config_path)).unwrap_err();
    assert!(matches!(err, QuickTagError::Expected(QuickTagExpectedError::ConfigNotFound { .. })));
}

#[test]
fn test_settings_parse_invalid_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "moodTag = 3").unwrap();
    let err = QuickTagSettings::parse(Some(&config_path)).unwrap_err();
    assert!(matches!(err, QuickTagError::Expected(QuickTagExpectedError::ConfigDecode { .. })));
}

#[test]
fn test_custom_group_lookup() {
    let settings = QuickTagSettings::default();
    assert_eq!(settings.custom_group(1).unwrap().name, "Situation");
    let err = settings.custom_group(7).unwrap_err();
    assert!(matches!(err, QuickTagError::Expected(QuickTagExpectedError::CustomGroupDoesNotExist { index: 7 })));
}

#[test]
fn test_ambiguities() {
    let comment = FrameName::new("COMM", "COMMENT", "©cmt");
    let settings = QuickTagSettings {
        custom: vec![
            QuickTagCustom::new("A", comment.clone(), &["Dark", "Warm"]),
            QuickTagCustom::new("B", comment, &["Warm"]),
            QuickTagCustom::new("C", FrameName::same("OTHER"), &["Dark"]),
            QuickTagCustom::new("D", FrameName::same("OTHER"), &[]),
        ],
        ..Default::default()
    };
    let ambiguities = settings.ambiguities();
    assert_eq!(
        ambiguities,
        vec![
            SettingsAmbiguity::OverlappingCustomValue { value: "Warm".to_string(), first: "A".to_string(), second: "B".to_string() },
            SettingsAmbiguity::EmptyCustomGroup { group: "D".to_string() },
        ]
    );
}

#[test]
fn test_ambiguities_partially_shared_field() {
    let settings = QuickTagSettings {
        custom: vec![
            QuickTagCustom::new("A", FrameName::new("COMM", "COMMENT", "©cmt"), &["X"]),
            QuickTagCustom::new("B", FrameName::new("COMM", "DESCRIPTION", "©cmt"), &["X"]),
            QuickTagCustom::new("C", FrameName::new("TXXX:C", "C", "iTunes:C"), &["X"]),
        ],
        ..Default::default()
    };
    assert_eq!(
        settings.ambiguities(),
        vec![SettingsAmbiguity::OverlappingCustomValue { value: "X".to_string(), first: "A".to_string(), second: "B".to_string() }]
    );
}
