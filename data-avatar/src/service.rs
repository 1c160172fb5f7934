use std::fmt;
use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use url::Url;

use crate::cache::{CacheKey, UrlCache};
use crate::catalog::Catalog;
use crate::config::ServiceConfig;
use crate::descriptor::{sanitize_seed, AvatarDescriptor, DicebearAvatar, FALLBACK_SEED};
use crate::palette;
use crate::params::Params;
use data_error::{AvatarError, Result};

/// Pixel size stored in generated descriptors.
pub const DESCRIPTOR_SIZE: u32 = 256;

/// Everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, the set a URI
/// component leaves unescaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Why a build did not use its inputs as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Degradation {
    /// Style was not in the catalog; the default style was used.
    UnknownStyle,
    /// Seed was blank; the fallback URL was returned.
    EmptySeed,
    /// Size was zero; the default size was used.
    InvalidSize,
    /// URL composition failed; the fallback URL was returned.
    Internal,
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Degradation::UnknownStyle => "unknown style",
            Degradation::EmptySeed => "empty seed",
            Degradation::InvalidSize => "invalid size",
            Degradation::Internal => "internal error",
        };
        f.write_str(text)
    }
}

/// Result of [`AvatarService::build_url`]. Always carries a usable URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Clean(Url),
    Degraded { url: Url, reason: Degradation },
}

impl BuildOutcome {
    pub fn url(&self) -> &Url {
        match self {
            BuildOutcome::Clean(url) => url,
            BuildOutcome::Degraded { url, .. } => url,
        }
    }

    pub fn into_url(self) -> Url {
        match self {
            BuildOutcome::Clean(url) => url,
            BuildOutcome::Degraded { url, .. } => url,
        }
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, BuildOutcome::Clean(_))
    }

    pub fn degradation(&self) -> Option<Degradation> {
        match self {
            BuildOutcome::Clean(_) => None,
            BuildOutcome::Degraded { reason, .. } => Some(*reason),
        }
    }
}

/// Builds avatar URLs and descriptors against one catalog and one
/// rendering endpoint.
///
/// Nothing here returns an error for bad input: unknown styles, blank
/// seeds and zero sizes are replaced by defaults and reported through
/// [`BuildOutcome`].
pub struct AvatarService {
    catalog: Arc<Catalog>,
    config: ServiceConfig,
    endpoint: Url,
    fallback: Url,
    cache: UrlCache,
}

impl AvatarService {
    pub fn new(catalog: Arc<Catalog>, config: ServiceConfig) -> Result<Self> {
        config.validate(&catalog)?;
        let endpoint = Url::parse(&config.endpoint)?;
        let fallback = compose(
            &endpoint,
            &config,
            &config.default_style,
            FALLBACK_SEED,
            config.default_size,
            &Params::new(),
        )?;
        let cache = UrlCache::new(config.cache_capacity);

        log::debug!(
            "Avatar service for {} with {} styles, fallback {}",
            endpoint,
            catalog.list_styles().len(),
            fallback
        );

        Ok(Self {
            catalog,
            config,
            endpoint,
            fallback,
            cache,
        })
    }

    /// Built-in catalog with the default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(Catalog::builtin(), ServiceConfig::default())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn cache(&self) -> &UrlCache {
        &self.cache
    }

    /// The URL returned when nothing better can be built.
    pub fn fallback_url(&self) -> &Url {
        &self.fallback
    }

    /// The catalog id `style` resolves to.
    pub fn resolve_style<'a>(&'a self, style: &'a str) -> &'a str {
        if self.catalog.contains(style) {
            style
        } else {
            &self.config.default_style
        }
    }

    /// Image URL for `seed` in `style` at `size` pixels.
    ///
    /// Parameters appear in the query string in insertion order.
    /// Results are memoized by `(style, encoded seed, size, params)`.
    pub fn build_url(
        &self,
        seed: &str,
        style: &str,
        size: u32,
        params: &Params,
    ) -> BuildOutcome {
        let seed = seed.trim();
        if seed.is_empty() {
            log::warn!("Empty seed for style {}, using fallback", style);
            return BuildOutcome::Degraded {
                url: self.fallback.clone(),
                reason: Degradation::EmptySeed,
            };
        }

        let mut reason = None;
        let resolved = self.resolve_style(style);
        if resolved != style {
            log::warn!("Unknown style {:?}, using {}", style, resolved);
            reason = Some(Degradation::UnknownStyle);
        }
        let size = if size == 0 {
            log::warn!("Invalid size 0, using {}", self.config.default_size);
            reason.get_or_insert(Degradation::InvalidSize);
            self.config.default_size
        } else {
            size
        };

        match self.cached(seed, resolved, size, params) {
            Ok(url) => match reason {
                None => BuildOutcome::Clean(url),
                Some(reason) => BuildOutcome::Degraded { url, reason },
            },
            Err(e) => {
                log::warn!("Failed to build avatar URL: {}", e);
                BuildOutcome::Degraded {
                    url: self.fallback.clone(),
                    reason: Degradation::Internal,
                }
            }
        }
    }

    fn cached(
        &self,
        seed: &str,
        style: &str,
        size: u32,
        params: &Params,
    ) -> Result<Url> {
        let encoded = encode_component(seed);
        let key = CacheKey::new(style, &encoded, size, params.cache_key()?);
        self.cache.get_or_insert_with(key, || {
            compose(&self.endpoint, &self.config, style, seed, size, params)
        })
    }

    /// One uniformly chosen value per parameter of `style`. Empty for
    /// unknown styles.
    pub fn random_params(&self, style: &str) -> Params {
        self.random_params_with(&mut fastrand::Rng::new(), style)
    }

    pub fn random_params_with(&self, rng: &mut fastrand::Rng, style: &str) -> Params {
        self.catalog
            .parameters_for(style)
            .iter()
            .filter_map(|domain| {
                domain
                    .pick(rng)
                    .map(|value| (domain.name.clone(), value.clone()))
            })
            .collect()
    }

    pub fn random_color(&self) -> &'static str {
        palette::random_color()
    }

    /// A generated avatar. The seed is sanitized, the style resolved
    /// against the catalog and the URL derived at [`DESCRIPTOR_SIZE`].
    pub fn dicebear(&self, seed: &str, style: &str, params: Params) -> AvatarDescriptor {
        let seed = sanitize_seed(seed);
        let style = self.resolve_style(style).to_owned();
        let value = self
            .build_url(&seed, &style, DESCRIPTOR_SIZE, &params)
            .into_url();
        AvatarDescriptor::Dicebear(DicebearAvatar::new(value, style, seed, params))
    }

    /// A generated avatar with random parameters.
    pub fn random_dicebear(&self, seed: &str, style: &str) -> AvatarDescriptor {
        let style = self.resolve_style(style);
        self.dicebear(seed, style, self.random_params(style))
    }

    /// Re-derives the URL of a generated avatar, e.g. after loading it
    /// from storage. Other kinds are returned unchanged.
    pub fn refresh(&self, descriptor: AvatarDescriptor) -> AvatarDescriptor {
        match descriptor {
            AvatarDescriptor::Dicebear(avatar) => {
                let seed = avatar.seed().to_owned();
                let style = avatar.style().to_owned();
                self.dicebear(&seed, &style, avatar.into_params())
            }
            other => other,
        }
    }
}

fn compose(
    endpoint: &Url,
    config: &ServiceConfig,
    style: &str,
    seed: &str,
    size: u32,
    params: &Params,
) -> Result<Url> {
    let mut url = endpoint.clone();
    url.path_segments_mut()
        .map_err(|_| {
            AvatarError::Config(format!("endpoint {} cannot be a base", endpoint))
        })?
        .pop_if_empty()
        .extend([config.api_version.as_str(), style, config.format.as_str()]);

    let mut query = format!("seed={}&size={}", encode_component(seed), size);
    for (name, value) in params.iter() {
        query.push('&');
        query.push_str(&encode_component(name));
        query.push('=');
        query.push_str(&encode_component(&value.to_string()));
    }
    // `'` still ends up as %27: query strings of http(s) URLs escape it.
    url.set_query(Some(&query));

    Ok(url)
}

fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ParamValue;
    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    fn service() -> AvatarService {
        AvatarService::with_defaults().unwrap()
    }

    fn bottts_params() -> Params {
        let mut params = Params::new();
        params.insert("primaryColor", "663399");
        params
    }

    #[test]
    fn builds_expected_shape() {
        let outcome = service().build_url("vibes-42", "bottts", 256, &bottts_params());
        assert!(outcome.is_clean());
        assert_eq!(
            outcome.url().as_str(),
            "https://api.dicebear.com/7.x/bottts/png?seed=vibes-42&size=256&primaryColor=663399"
        );
    }

    #[test]
    fn seed_is_trimmed_and_encoded() {
        let outcome = service().build_url("  jane doe&co ", "bottts", 64, &Params::new());
        assert_eq!(
            outcome.url().query(),
            Some("seed=jane%20doe%26co&size=64")
        );
    }

    #[rstest]
    #[case("jane doe (x)~", "seed=jane%20doe%20(x)~&size=64")]
    #[case("a+b=c", "seed=a%2Bb%3Dc&size=64")]
    #[case("wow!*_.-", "seed=wow!*_.-&size=64")]
    #[case("été", "seed=%C3%A9t%C3%A9&size=64")]
    fn seed_is_uri_component_encoded(#[case] seed: &str, #[case] query: &str) {
        let service = service();
        let outcome = service.build_url(seed, "bottts", 64, &Params::new());
        assert_eq!(outcome.url().query(), Some(query));

        let encoded = query
            .strip_prefix("seed=")
            .and_then(|q| q.strip_suffix("&size=64"))
            .unwrap();
        let key = CacheKey::new("bottts", encoded, 64, "{}".to_owned());
        assert!(service.cache().contains(&key));
    }

    #[test]
    fn identical_inputs_hit_the_cache() {
        let service = service();
        let first = service.build_url("user-7", "miniavs", 256, &Params::new());
        let second = service.build_url("user-7", "miniavs", 256, &Params::new());
        assert_eq!(first, second);
        assert_eq!(service.cache().len(), 1);
    }

    #[rstest]
    #[case("no-such-style")]
    #[case("")]
    #[case("BOTTTS")]
    fn unknown_style_uses_default(#[case] style: &str) {
        let service = service();
        let outcome = service.build_url("seed", style, 128, &Params::new());
        assert_eq!(outcome.degradation(), Some(Degradation::UnknownStyle));
        assert_eq!(
            outcome.url().as_str(),
            "https://api.dicebear.com/7.x/avataaars/png?seed=seed&size=128"
        );
        assert!(service.random_params(style).is_empty());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_seed_falls_back(#[case] seed: &str) {
        let service = service();
        let outcome = service.build_url(seed, "bottts", 256, &bottts_params());
        assert_eq!(outcome.degradation(), Some(Degradation::EmptySeed));
        assert_eq!(outcome.url(), service.fallback_url());
        assert_eq!(
            outcome.url().as_str(),
            "https://api.dicebear.com/7.x/avataaars/png?seed=fallback&size=256"
        );
        assert!(service.cache().is_empty());
    }

    #[test]
    fn zero_size_uses_default() {
        let outcome = service().build_url("x", "bottts", 0, &Params::new());
        assert_eq!(outcome.degradation(), Some(Degradation::InvalidSize));
        assert!(outcome.url().as_str().contains("size=256"));
    }

    #[test]
    fn param_order_is_kept_and_keys_do_not_collide() {
        let service = service();
        let mut ab = Params::new();
        ab.insert("eyes", "happy");
        ab.insert("mouth", "bite");
        let mut ba = Params::new();
        ba.insert("mouth", "bite");
        ba.insert("eyes", "happy");

        let first = service.build_url("s", "bottts", 256, &ab).into_url();
        let second = service.build_url("s", "bottts", 256, &ba).into_url();

        assert!(first.as_str().ends_with("eyes=happy&mouth=bite"));
        assert!(second.as_str().ends_with("mouth=bite&eyes=happy"));
        assert_eq!(service.cache().len(), 2);

        // the first entry is still intact
        assert_eq!(service.build_url("s", "bottts", 256, &ab).into_url(), first);
    }

    #[test]
    fn dicebear_round_trip() {
        let service = service();
        let avatar = service.dicebear("vibes-42", "bottts", bottts_params());
        let rebuilt = service.build_url("vibes-42", "bottts", 256, &bottts_params());

        assert_eq!(avatar.value(), rebuilt.url().as_str());
        match &avatar {
            AvatarDescriptor::Dicebear(d) => {
                assert_eq!(d.seed(), "vibes-42");
                assert_eq!(d.style(), "bottts");
                assert_eq!(d.params(), &bottts_params());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn dicebear_sanitizes_and_resolves() {
        let avatar = service().dicebear("Jane Doe!", "nope", Params::new());
        match avatar {
            AvatarDescriptor::Dicebear(d) => {
                assert_eq!(d.seed(), "jane-doe");
                assert_eq!(d.style(), "avataaars");
                assert_eq!(
                    d.value().as_str(),
                    "https://api.dicebear.com/7.x/avataaars/png?seed=jane-doe&size=256"
                );
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn dicebear_json_shape() {
        let avatar = service().dicebear("vibes-42", "bottts", bottts_params());
        let json = serde_json::to_value(&avatar).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "dicebear",
                "value": "https://api.dicebear.com/7.x/bottts/png?seed=vibes-42&size=256&primaryColor=663399",
                "style": "bottts",
                "seed": "vibes-42",
                "params": {"primaryColor": "663399"}
            })
        );
    }

    #[test]
    fn refresh_repairs_a_tampered_value() {
        let service = service();
        let stored = r#"{
            "type": "dicebear",
            "value": "https://evil.example.com/x.png",
            "style": "bottts",
            "seed": "vibes-42",
            "params": {"primaryColor": "663399"}
        }"#;
        let loaded: AvatarDescriptor = serde_json::from_str(stored).unwrap();
        let refreshed = service.refresh(loaded);
        assert_eq!(
            refreshed,
            service.dicebear("vibes-42", "bottts", bottts_params())
        );

        let initial = AvatarDescriptor::initial("A B", "663399");
        assert_eq!(service.refresh(initial.clone()), initial);
    }

    #[test]
    fn random_params_draw_from_domains() {
        let service = service();
        let mut rng = fastrand::Rng::with_seed(3);
        let params = service.random_params_with(&mut rng, "bottts");
        let domains = service.catalog().parameters_for("bottts");

        assert_eq!(params.len(), domains.len());
        for domain in domains {
            let value = params.get(&domain.name).unwrap();
            assert!(domain.contains(value));
        }
    }

    #[test]
    fn random_dicebear_uses_style_parameters() {
        let service = service();
        match service.random_dicebear("seed", "thumbs") {
            AvatarDescriptor::Dicebear(d) => {
                assert_eq!(d.params().len(), 5);
                assert!(matches!(
                    d.params().get("rotate"),
                    Some(ParamValue::Number(_))
                ));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn random_color_is_from_palette() {
        assert!(palette::PALETTE.contains(&service().random_color()));
    }

    #[test]
    fn custom_endpoint_with_path() {
        let config = ServiceConfig {
            endpoint: "https://avatars.internal/render/".to_owned(),
            format: "svg".to_owned(),
            ..ServiceConfig::default()
        };
        let service = AvatarService::new(Catalog::builtin(), config).unwrap();
        let outcome = service.build_url("a", "shapes", 32, &Params::new());
        assert_eq!(
            outcome.url().as_str(),
            "https://avatars.internal/render/7.x/shapes/svg?seed=a&size=32"
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ServiceConfig {
            default_style: "missing".to_owned(),
            ..ServiceConfig::default()
        };
        assert!(AvatarService::new(Catalog::builtin(), config).is_err());
    }

    #[quickcheck]
    fn build_url_is_deterministic(seed: String, size: u16) -> bool {
        let service = service();
        let params = bottts_params();
        let first = service.build_url(&seed, "bottts", size.into(), &params);
        let second = service.build_url(&seed, "bottts", size.into(), &params);
        first == second
    }

    #[test]
    fn service_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AvatarService>();
    }
}
