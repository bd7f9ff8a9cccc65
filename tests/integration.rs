use abstime::{
    AbsoluteTime, DateStyle, DateTimeConfig, Error, IntervalStatus, IntervalStyle, RelativeTime,
    TimeInterval, TimeZoneSetting,
};
use bytes::Buf;

fn real(seconds: i32) -> AbsoluteTime {
    AbsoluteTime::Real(seconds)
}

#[test]
fn abstime_text_and_binary_round_trip() {
    let configs = [
        DateTimeConfig::default(),
        DateTimeConfig::default().with_date_style(DateStyle::Postgres),
        DateTimeConfig::default().with_datestyle("SQL, DMY").unwrap(),
        DateTimeConfig::default().with_datestyle("German").unwrap(),
        DateTimeConfig::in_zone("Europe/Madrid".parse().unwrap())
            .with_date_style(DateStyle::Postgres),
        DateTimeConfig::in_zone("+05:30".parse().unwrap()),
    ];
    for seconds in [-2_000_000_000, -1, 0, 1, 951_782_400, 1_700_000_000, 2_147_000_000] {
        let time = real(seconds);
        for config in &configs {
            let text = time.encode_text(config);
            assert_eq!(AbsoluteTime::decode_text(&text, config), Ok(time), "{text}");
        }
        let mut bytes = time.to_bytes();
        assert_eq!(AbsoluteTime::decode_binary(&mut bytes), Ok(time));
        assert!(!bytes.has_remaining());
    }
}

#[test]
fn sentinels_compare_after_real_values() {
    let reals = [real(-7), real(0), real(7)];
    for r in reals {
        assert!(AbsoluteTime::Invalid.btree_cmp(r) > 0);
        assert!(r.btree_cmp(AbsoluteTime::Invalid) < 0);
    }
    assert_eq!(AbsoluteTime::Invalid.btree_cmp(AbsoluteTime::Invalid), 0);

    assert!(RelativeTime::Invalid.btree_cmp(RelativeTime::Seconds(i32::MAX)) > 0);
    assert!(RelativeTime::Seconds(-1).btree_cmp(RelativeTime::Invalid) < 0);
    assert_eq!(RelativeTime::Invalid.btree_cmp(RelativeTime::Invalid), 0);

    let undefined = TimeInterval::undefined();
    let broken = TimeInterval::new(real(1), AbsoluteTime::Invalid);
    assert!(undefined.btree_cmp(&TimeInterval::new(real(0), real(1))) > 0);
    assert_eq!(undefined.btree_cmp(&broken), 0);
}

#[test]
fn interval_construction_canonicalizes() {
    let values = [
        AbsoluteTime::NoStart,
        real(-3),
        real(0),
        real(3),
        AbsoluteTime::NoEnd,
        AbsoluteTime::Invalid,
    ];
    for t1 in values {
        for t2 in values {
            let interval = TimeInterval::new(t1, t2);
            assert_eq!(interval.endpoints(), (t1.min(t2), t1.max(t2)));
            let expected = if t1.is_invalid() || t2.is_invalid() {
                IntervalStatus::Invalid
            } else {
                IntervalStatus::Valid
            };
            assert_eq!(interval.status(), expected);
        }
    }
}

#[test]
fn interval_ordering_ignores_position() {
    let early = TimeInterval::new(real(0), real(100));
    let late = TimeInterval::new(real(500), real(600));
    assert_eq!(early, late);
    assert_eq!(early.btree_cmp(&late), 0);
    assert!(!early.same(&late));
}

#[test]
fn arithmetic_boundaries() {
    let noend = AbsoluteTime::NoEnd.to_raw();
    assert_eq!(real(noend - 1) + RelativeTime::Seconds(2), AbsoluteTime::Invalid);
    assert_eq!(real(5) + RelativeTime::Seconds(3), real(8));
    assert_eq!(real(8) - RelativeTime::Seconds(3), real(5));
}

#[test]
fn literal_with_one_day_span() {
    let config = DateTimeConfig::default();
    let interval =
        TimeInterval::decode_text(r#"[ "Jan 1 00:00:00 1970" "Jan 2 00:00:00 1970" ]"#, &config)
            .unwrap();
    assert_eq!(interval.status(), IntervalStatus::Valid);
    assert_eq!(interval.length(), RelativeTime::Seconds(86_400));
    assert_eq!(
        interval.length().encode_text(&config),
        "1 day"
    );
}

#[test]
fn literal_undefined_range() {
    let interval: TimeInterval = "Undefined Range".parse().unwrap();
    assert_eq!(interval.status(), IntervalStatus::Invalid);
    assert_eq!(interval.start(), AbsoluteTime::Invalid);
    assert_eq!(interval.length(), RelativeTime::Invalid);
}

#[test]
fn literal_rejections_name_the_input() {
    let bad_endpoint = r#"[ "bad" "Jan 1 1970" ]"#;
    let err = bad_endpoint.parse::<TimeInterval>().unwrap_err();
    assert!(err.is_syntax_error());
    assert_eq!(
        err.to_string(),
        format!("invalid input syntax for type tinterval: \"{bad_endpoint}\"")
    );

    let trailing = r#"[ "epoch" "Jan 1 1970" ] now"#;
    assert_eq!(
        trailing.parse::<TimeInterval>(),
        Err(Error::InvalidSyntax {
            type_name: "tinterval",
            input: trailing.to_owned()
        })
    );
}

#[test]
fn binary_status_must_match_endpoints() {
    let mut payload = Vec::new();
    payload.extend_from_slice(&1_i32.to_be_bytes());
    payload.extend_from_slice(&AbsoluteTime::Invalid.to_raw().to_be_bytes());
    payload.extend_from_slice(&0_i32.to_be_bytes());
    assert_eq!(
        TimeInterval::decode_binary(&mut payload.as_slice()),
        Err(Error::InvalidStatus { status: 1 })
    );

    let interval = TimeInterval::new(real(10), AbsoluteTime::NoEnd);
    let mut bytes = interval.to_bytes();
    assert!(TimeInterval::decode_binary(&mut bytes).unwrap().same(&interval));
}

#[test]
fn reltime_follows_interval_style() {
    let span: RelativeTime = "2 days 03:00:00".parse().unwrap();
    let verbose = DateTimeConfig::default().with_interval_style(IntervalStyle::PostgresVerbose);
    assert_eq!(span.encode_text(&verbose), "@ 2 days 3 hours");
    let iso = DateTimeConfig::default().with_interval_style(IntervalStyle::Iso8601);
    assert_eq!(span.encode_text(&iso), "P2DT3H");
}

#[test]
fn wall_clock_follows_session_zone() {
    let tokyo = DateTimeConfig::in_zone(TimeZoneSetting::Named(chrono_tz::Asia::Tokyo));
    let time = AbsoluteTime::decode_text("1970-01-01 09:00:00", &tokyo).unwrap();
    assert_eq!(time, real(0));
    assert_eq!(time.encode_text(&tokyo), "1970-01-01 09:00:00+09");
}

#[cfg(feature = "serde")]
#[test]
fn serde_uses_raw_wire_values() {
    let json = serde_json::to_string(&AbsoluteTime::NoEnd).unwrap();
    assert_eq!(json, "2147483644");
    let back: AbsoluteTime = serde_json::from_str(&json).unwrap();
    assert_eq!(back, AbsoluteTime::NoEnd);
    let past_end: AbsoluteTime = serde_json::from_str("2147483647").unwrap();
    assert!(!past_end.is_finite());
    assert_eq!(past_end.to_raw(), i32::MAX);

    let interval = TimeInterval::new(real(100), real(0));
    let json = serde_json::to_value(interval).unwrap();
    assert_eq!(json, serde_json::json!({ "status": 1, "start": 0, "end": 100 }));
    let back: TimeInterval = serde_json::from_value(json).unwrap();
    assert!(back.same(&interval));

    let lying = serde_json::json!({ "status": 1, "start": 0, "end": 2147483646 });
    assert!(serde_json::from_value::<TimeInterval>(lying).is_err());
}
