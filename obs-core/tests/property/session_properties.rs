use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use obs_core::session::{decode, encode, MemoryTransport, DEFAULT_COOKIE_NAME};
use obs_core::{Session, SessionPatch, SessionStore};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn coordinate() -> impl Strategy<Value = f64> {
    prop_oneof![
        -90.0f64..90.0,
        -180.0f64..180.0,
        any::<i32>().prop_map(f64::from),
        prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO,
    ]
}

fn extra_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        ".{0,16}".prop_map(Value::from),
    ]
}

fn extra_fields() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map(
        "[a-z_]{1,10}".prop_filter("session field", |k| {
            !matches!(k.as_str(), "lat" | "lon" | "target")
        }),
        extra_value(),
        0..4,
    )
    .prop_map(|fields| fields.into_iter().collect())
}

fn session() -> impl Strategy<Value = Session> {
    (
        coordinate(),
        coordinate(),
        prop::option::of(".{0,24}"),
        extra_fields(),
    )
        .prop_map(|(lat, lon, target, extra)| Session {
            lat,
            lon,
            target,
            extra,
        })
}

fn patch() -> impl Strategy<Value = SessionPatch> {
    (
        prop::option::of(coordinate()),
        prop::option::of(coordinate()),
        prop::option::of(".{0,24}"),
    )
        .prop_map(|(lat, lon, target)| SessionPatch { lat, lon, target })
}

fn cookie_json(value: &str) -> Value {
    let bytes = URL_SAFE.decode(value).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

proptest! {
    #[test]
    fn decode_inverts_encode(s in session()) {
        let value = encode(&s).unwrap();
        prop_assert_eq!(decode(&value).unwrap(), s);
    }

    #[test]
    fn encoding_is_deterministic(s in session()) {
        prop_assert_eq!(encode(&s).unwrap(), encode(&s.clone()).unwrap());
    }

    #[test]
    fn whole_coordinates_are_json_integers(lat in any::<i32>(), lon in any::<i32>()) {
        let value = encode(&Session::new(f64::from(lat), f64::from(lon))).unwrap();
        let json = cookie_json(&value);
        prop_assert_eq!(json["lat"].as_i64(), Some(i64::from(lat)));
        prop_assert_eq!(json["lon"].as_i64(), Some(i64::from(lon)));
    }

    #[test]
    fn update_replaces_only_target_fields(existing in session(), p in patch()) {
        let store = SessionStore::default();
        let mut transport = MemoryTransport::new()
            .with_cookie(DEFAULT_COOKIE_NAME, encode(&existing).unwrap());

        let updated = store.update(&mut transport, p.clone()).unwrap();

        prop_assert_eq!(updated.lat, p.lat.unwrap_or_default());
        prop_assert_eq!(updated.lon, p.lon.unwrap_or_default());
        let expected_target = p.target.clone().unwrap_or_default();
        prop_assert_eq!(updated.target.as_deref(), Some(expected_target.as_str()));
        prop_assert_eq!(&updated.extra, &existing.extra);

        let written = transport.written_value(DEFAULT_COOKIE_NAME).unwrap();
        prop_assert_eq!(decode(written).unwrap(), updated);
    }

    #[test]
    fn load_returns_stored_session_without_rewrite(s in session()) {
        let store = SessionStore::default();
        let mut transport = MemoryTransport::new()
            .with_cookie(DEFAULT_COOKIE_NAME, encode(&s).unwrap());

        prop_assert_eq!(store.load(&mut transport).unwrap(), s);
        prop_assert!(transport.written().is_empty());
    }
}
