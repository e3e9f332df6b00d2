//! Property tests for the envelope and timestamp arithmetic.

use gw_common::response::status_for_code;
use gw_common::{extend_timestamp, ApiResponse, TimeOffset, Unit};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn status_is_leading_three_digits(code in 100u32..10_000_000) {
        let status = status_for_code(code).unwrap();
        prop_assert!(code.to_string().starts_with(&status.to_string()));
        prop_assert!((100..=999).contains(&status));
    }

    #[test]
    fn codes_below_100_rejected(code in 0u32..100) {
        prop_assert!(status_for_code(code).is_err());
        prop_assert!(ApiResponse::new(code).build().is_err());
    }

    #[test]
    fn envelope_body_round_trips(code in 1000u32..6000, message in "[a-zA-Z0-9 ]{1,20}") {
        let resp = ApiResponse::new(code).message(message.clone()).build().unwrap();
        let body: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
        prop_assert_eq!(body["code"].as_u64(), Some(u64::from(code)));
        prop_assert_eq!(body["message"].as_str(), Some(message.as_str()));
        prop_assert!(body["payload"].as_object().map(|p| p.is_empty()).unwrap_or(false));
        prop_assert_eq!(u32::from(resp.status_code), code / 10);
    }

    #[test]
    fn seconds_offsets_are_exact(
        src in 1i64..4_000_000_000,
        days in -1000i64..1000,
        seconds in -100_000i64..100_000,
    ) {
        let offset = TimeOffset::default().days(days).seconds(seconds);
        let got = extend_timestamp(src, &offset, Unit::Seconds).unwrap();
        prop_assert_eq!(got, src + days * 86_400 + seconds);
    }

    #[test]
    fn seconds_and_millis_agree(
        src in 1i64..4_000_000_000,
        hours in -1000i64..1000,
        millis in -10_000i64..10_000,
    ) {
        let offset = TimeOffset::default().hours(hours).milliseconds(millis);
        let in_seconds = extend_timestamp(src, &offset, Unit::Seconds).unwrap();
        let in_millis = extend_timestamp(src * 1000, &offset, Unit::Milliseconds).unwrap();
        prop_assert_eq!(in_seconds, in_millis.div_euclid(1000));
    }
}
