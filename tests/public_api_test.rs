// Tests for the crate-root API used by downstream consumers
// WHY: Re-exported functions and serialized shapes are the contract other tools rely on

use pitchsmith::kana::{count_morae, katakana_to_hiragana, morae};
use pitchsmith::{
    drop_pos_to_type, get_accent_flags, get_pattern, render_flags, render_levels, Level,
    PitchConfig, PitchEntry, PitchType,
};

#[test]
fn test_pattern_properties_for_small_words() {
    for n in 2..=8 {
        let heiban = get_pattern(n, 0);
        assert_eq!(heiban[0], Level::Low);
        assert!(heiban[1..].iter().all(|&l| l == Level::High));

        let atamadaka = get_pattern(n, 1);
        assert_eq!(atamadaka[0], Level::High);
        assert!(atamadaka[1..].iter().all(|&l| l == Level::Low));

        assert_eq!(get_pattern(n, n), heiban, "odaka and heiban share a word contour");
        assert_eq!(drop_pos_to_type(n, n), PitchType::Odaka);
        assert_eq!(get_accent_flags(n, n).iter().filter(|&&f| f).count(), 1);
    }
    assert_eq!(get_pattern(1, 0), vec![Level::Low]);
    assert_eq!(drop_pos_to_type(1, 1), PitchType::Atamadaka);
}

#[test]
fn test_rendering_helpers() {
    assert_eq!(render_levels(&get_pattern(3, 2)), "LHL");
    assert_eq!(render_flags(&get_accent_flags(3, 2)), "●○●");
}

#[test]
fn test_mora_segmentation() {
    assert_eq!(morae("きょう"), vec!["きょ", "う"]);
    assert_eq!(count_morae("がっこう"), 4);
    assert_eq!(count_morae("コーヒー"), 4);
    assert_eq!(count_morae("しんぶん"), 4);
    assert_eq!(katakana_to_hiragana("コーヒー"), "こーひー");
}

#[test]
fn test_entry_json_shape() {
    let entry = PitchEntry::new("おかし", 2);
    let json = serde_json::to_value(&entry).expect("entry serializes");
    assert_eq!(
        json,
        serde_json::json!({
            "reading": "おかし",
            "drop_pos": 2,
            "num_mora": 3,
            "pitch_type": "Nakadaka"
        })
    );

    let parsed: PitchEntry = serde_json::from_value(serde_json::json!({
        "reading": "き",
        "drop_pos": 1,
        "num_mora": 1,
        "pitch_type": "Atamadaka",
        "meaning": "tree"
    }))
    .expect("entry deserializes");
    assert_eq!(parsed.meaning.as_deref(), Some("tree"));
    assert!(!parsed.provisional);
}

#[test]
fn test_default_config_round_trips_through_json() {
    let config = PitchConfig::default();
    let text = serde_json::to_string(&config).expect("config serializes");
    let parsed: PitchConfig = serde_json::from_str(&text).expect("config parses");
    assert_eq!(parsed, config);
    assert!(parsed.reference.enabled);
    assert_eq!(parsed.analyzer.layout, "ipadic");
}
