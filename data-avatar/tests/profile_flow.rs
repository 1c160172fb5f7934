use std::collections::HashSet;

use data_avatar::{
    random_color, AvatarDescriptor, AvatarKind, AvatarService, Catalog,
    ParamKind, ParamValue, Params, PALETTE,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn randomized_miniavs_url() {
    init();
    let service = AvatarService::with_defaults().unwrap();

    let params = service.random_params("miniavs");
    let outcome = service.build_url("user-7", "miniavs", 256, &params);
    assert!(outcome.is_clean());

    let url = outcome.url();
    let query: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    assert!(url.as_str().contains("seed=user-7"));
    assert!(url.as_str().contains("size=256"));
    assert_eq!(query.len(), 2 + params.len());

    let domains = Catalog::builtin();
    for (name, value) in params.iter() {
        let raw = query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .unwrap();
        assert_eq!(raw, value.to_string());

        let domain = domains.parameter("miniavs", name).unwrap();
        assert!(domain.contains(value));
        assert!(domain.contains(&domain.parse_value(raw)));
    }
}

#[test]
fn palette_coverage() {
    let seen: HashSet<&str> = (0..10_000).map(|_| random_color()).collect();
    for color in PALETTE {
        assert!(seen.contains(color), "{} never picked", color);
    }
    assert_eq!(seen.len(), PALETTE.len());
}

#[test]
fn every_style_builds() {
    init();
    let service = AvatarService::with_defaults().unwrap();
    for style in service.catalog().list_styles() {
        let params = service.random_params(&style.id);
        let outcome = service.build_url("seed", &style.id, 96, &params);
        assert!(outcome.is_clean(), "{} degraded", style.id);
        assert!(outcome.url().path().contains(&format!("/{}/", style.id)));
    }
}

#[test]
fn profile_edit_switches_kinds() {
    init();
    let service = AvatarService::with_defaults().unwrap();

    let mut avatar = AvatarDescriptor::initial_random("Grace Hopper");
    assert_eq!(avatar.value(), "GH");

    let mut params = Params::new();
    params.insert("skinColor", "f5d0c5");
    params.insert("hair", "curly");
    avatar = service.dicebear("grace", "miniavs", params.clone());
    assert_eq!(avatar.kind(), AvatarKind::Dicebear);
    assert_eq!(
        avatar.value(),
        service.build_url("grace", "miniavs", 256, &params).url().as_str()
    );

    // tweaking one parameter gives a new URL, the old one stays cached
    let before = service.cache().len();
    params.insert("hair", "long");
    let tweaked = service.dicebear("grace", "miniavs", params);
    assert_ne!(tweaked.value(), avatar.value());
    assert_eq!(service.cache().len(), before + 1);

    avatar = AvatarDescriptor::image("https://storage.example.com/u/grace.jpg").unwrap();
    assert_eq!(avatar.kind(), AvatarKind::Image);
}

#[test]
fn color_parameters_are_strings_in_json() {
    let service = AvatarService::with_defaults().unwrap();
    let domain = service.catalog().parameter("bottts", "primaryColor").unwrap();
    assert_eq!(domain.kind, ParamKind::Color);

    let mut params = Params::new();
    params.insert("primaryColor", domain.parse_value("663399"));
    params.insert("textureProbability", ParamValue::Number(50));
    assert_eq!(
        params.cache_key().unwrap(),
        r#"{"primaryColor":"663399","textureProbability":50}"#
    );
}
