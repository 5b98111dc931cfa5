use std::collections::HashMap;

use tagfall::{
    decompose, fallback_chain, localize, localize_text, params, select, Catalog, Leaf, LocaleState,
    LocaleTag, Params, Value,
};

fn strings(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn decompose_examples() {
    let t = decompose("zh-hant-tw");
    assert_eq!(
        (t.tag.as_str(), t.language.as_str(), t.script.as_str(), t.region.as_str()),
        ("zh-hant-tw", "zh", "hant", "tw")
    );
    let t = decompose("en");
    assert_eq!(
        (t.tag.as_str(), t.language.as_str(), t.script.as_str(), t.region.as_str()),
        ("en", "en", "", "")
    );
    assert_eq!(decompose(""), LocaleTag::default());
}

#[test]
fn documented_fallback_cases() {
    let none = Params::new();

    let s = strings(&[("en-us", "A"), ("en", "B")]);
    assert_eq!(localize_text(&s, &none, &["en-US"]), Some("A".into()));

    let s = strings(&[("zh-hant", "繁體")]);
    assert_eq!(localize_text(&s, &none, &["zh-TW"]), Some("繁體".into()));

    let s = strings(&[("en", "Hello")]);
    assert_eq!(localize_text(&s, &none, &["en-GB"]), Some("Hello".into()));

    let s = strings(&[("fr", "Bonjour")]);
    assert_eq!(localize_text(&s, &none, &["en"]), None);
}

#[test]
fn parameter_substitution_only_touches_text() {
    let p = params! { name: "Sam" };

    let s = strings(&[("en", "Hello ${name}")]);
    assert_eq!(localize_text(&s, &p, &["en"]), Some("Hello Sam".into()));

    let en: Value = [("n", Value::Int(7)), ("t", Value::from("${name}"))]
        .into_iter()
        .collect();
    let nested = HashMap::from([("en".to_string(), en)]);
    assert_eq!(
        localize(&nested, &p, &["en"], select::path("n")),
        Some(Leaf::Other(Value::Int(7)))
    );
    assert_eq!(
        localize(&nested, &p, &["en"], select::path("")),
        Some(Leaf::Other(nested["en"].clone()))
    );
}

#[test]
fn selector_miss_falls_through_to_language() {
    let catalog = Catalog::from_json_str(r#"{ "en-us": {}, "en": { "greeting": "Hi" } }"#).unwrap();
    assert_eq!(
        catalog.value("greeting", &Params::new(), &["en-US"]),
        Some(Value::from("Hi"))
    );
}

#[test]
fn result_always_comes_from_a_queried_chain() {
    let s = strings(&[
        ("en", "en"),
        ("en-gb", "en-gb"),
        ("zh-hant", "zh-hant"),
        ("zh-hans", "zh-hans"),
        ("sr-latn", "sr-latn"),
        ("fr", "fr"),
    ]);
    let queries: &[&[&str]] = &[
        &["en-GB"],
        &["en-AU", "fr"],
        &["zh-TW"],
        &["zh-Hans-HK"],
        &["sr-Latn-RS"],
        &["ja", "ko"],
        &["", "-", "de-1996"],
        &["pt-BR", "fr-CA"],
    ];

    for &locales in queries {
        let allowed: Vec<String> = locales
            .iter()
            .flat_map(|l| fallback_chain(&decompose(l)))
            .map(|k| k.key)
            .collect();
        match localize_text(&s, &Params::new(), locales) {
            Some(found) => assert!(
                allowed.contains(&found),
                "{found} not in chain {allowed:?} for {locales:?}"
            ),
            None => assert!(
                allowed.iter().all(|k| !s.contains_key(k)),
                "missed a match for {locales:?}"
            ),
        }
    }
}

#[test]
fn concurrent_lookups_share_one_catalog() {
    let catalog = Catalog::from_yaml_str(
        r#"
en:
  greeting: "Hello, ${name}"
zh-hant:
  greeting: "${name}，你好"
zh-hans:
  greeting: "${name}，您好"
"#,
    )
    .unwrap();
    let state = LocaleState::new("en", "en");
    let cases = [
        ("zh-TW", "Ann，你好"),
        ("zh-HK", "Ann，你好"),
        ("zh-CN", "Ann，您好"),
        ("en-GB", "Hello, Ann"),
        ("ja", "Hello, Ann"),
    ];

    std::thread::scope(|scope| {
        for (locale, expected) in cases {
            let (catalog, state) = (&catalog, &state);
            scope.spawn(move || {
                let p = params! { name: "Ann" };
                for _ in 0..200 {
                    let locales = [locale.to_string(), state.fallback().to_string()];
                    assert_eq!(catalog.string("greeting", &p, &locales), expected);
                    assert_eq!(
                        localize(catalog, &p, &locales, select::path("greeting")),
                        Some(Leaf::Text(expected.to_string()))
                    );
                }
            });
        }
        scope.spawn(|| {
            for i in 0..200 {
                state.set_preferred(if i % 2 == 0 { "fr" } else { "de" });
            }
        });
    });
    assert_eq!(state.preferred(), "de");
}

#[test]
fn state_drives_locale_ranking() {
    let catalog = Catalog::from_yaml_str(
        r#"
en:
  title: Settings
zh-hant:
  title: 設定
"#,
    )
    .unwrap();

    let state = LocaleState::new("fr", "en");
    let reported = ["de-CH"];
    assert_eq!(
        catalog.string("title", &Params::new(), &state.user_locales(reported)),
        "Settings"
    );

    state.set_preferred("zh-HK");
    assert_eq!(
        catalog.string("title", &Params::new(), &state.user_locales(reported)),
        "設定"
    );
}
