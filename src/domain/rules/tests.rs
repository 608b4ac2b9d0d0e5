// Unit tests for business rules

#[cfg(test)]
mod tests {
    use crate::domain::model::*;
    use crate::domain::rules::*;

    fn derive(start: u64, end: u64, duration: u64) -> DerivedRange {
        RangePolicy::default().derive(
            &TimeSelection::from_seconds(start),
            &TimeSelection::from_seconds(end),
            duration,
        )
    }

    #[test]
    fn test_valid_range_is_kept() {
        let derived = derive(10, 90, 300);
        assert_eq!(derived.interval, ClipInterval::new(10, 90));
        assert_eq!(derived.corrected_end, None);
    }

    #[test]
    fn test_ends_are_clamped_to_duration() {
        let derived = derive(10, 4000, 300);
        assert_eq!(derived.interval, ClipInterval::new(10, 300));
        assert_eq!(derived.corrected_end, None);
    }

    #[test]
    fn test_inverted_range_gets_minimum_length() {
        let derived = derive(100, 50, 300);
        assert_eq!(derived.interval, ClipInterval::new(100, 160));
        assert_eq!(derived.corrected_end, Some(TimeSelection::new(0, 2, 40)));
    }

    #[test]
    fn test_equal_range_gets_minimum_length() {
        let derived = derive(100, 100, 300);
        assert_eq!(derived.interval, ClipInterval::new(100, 160));
    }

    #[test]
    fn test_correction_collapses_at_the_tail() {
        // start 00:02:00 on a 125 s video
        let derived = derive(120, 0, 125);
        assert_eq!(derived.interval, ClipInterval::new(120, 125));
        assert_eq!(derived.corrected_end, Some(TimeSelection::new(0, 2, 5)));
    }

    #[test]
    fn test_start_past_duration_yields_zero_length_at_end() {
        let derived = derive(500, 10, 125);
        assert_eq!(derived.interval, ClipInterval::new(125, 125));
        assert!(derived.interval.is_empty());
    }

    #[test]
    fn test_zero_duration() {
        let derived = derive(0, 0, 0);
        assert_eq!(derived.interval, ClipInterval::new(0, 0));
    }

    #[test]
    fn test_custom_minimum_clip_length() {
        let policy = RangePolicy::new(15);
        let derived = policy.derive(
            &TimeSelection::new(0, 1, 0),
            &TimeSelection::new(0, 0, 30),
            600,
        );
        assert_eq!(derived.interval, ClipInterval::new(60, 75));
    }

    #[test]
    fn test_zero_minimum_still_yields_non_empty_interval() {
        let policy = RangePolicy::new(0);
        assert_eq!(policy.min_clip_seconds(), 1);

        let derived = policy.derive(
            &TimeSelection::new(0, 2, 0),
            &TimeSelection::new(0, 1, 0),
            300,
        );
        assert_eq!(derived.interval, ClipInterval::new(120, 121));
    }

    #[test]
    fn test_invariant_holds_over_a_grid() {
        for duration in [0u64, 1, 59, 60, 61, 125, 3599, 3600, 7322] {
            for start in (0..=duration + 70).step_by(13) {
                for end in (0..=duration + 70).step_by(17) {
                    let interval = derive(start, end, duration).interval;
                    assert!(interval.start_seconds <= interval.end_seconds);
                    assert!(interval.end_seconds <= duration);
                    if interval.is_empty() {
                        assert_eq!(interval.start_seconds, duration);
                    }
                }
            }
        }
    }

    #[test]
    fn test_url_validator_accepts_supported_forms() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "http://youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
        ] {
            assert!(UrlValidator::validate(url).is_ok(), "{} should be accepted", url);
        }
    }

    #[test]
    fn test_url_validator_rejects_other_urls() {
        for url in [
            "",
            "https://example.com/video",
            "https://www.youtube.com/watch?v=short",
            "https://www.youtube.com/",
            "ftp://youtube.com/watch?v=dQw4w9WgXcQ",
        ] {
            assert!(UrlValidator::validate(url).is_err(), "{} should be rejected", url);
        }
    }

    #[test]
    fn test_video_id_extraction() {
        let url = url::Url::parse("https://youtu.be/dQw4w9WgXcQ?t=42").unwrap();
        assert_eq!(UrlValidator::video_id(&url).as_deref(), Some("dQw4w9WgXcQ"));
    }

    fn info_with_formats(qualities: &[&str]) -> VideoInfo {
        VideoInfo {
            video_id: Some("dQw4w9WgXcQ".to_string()),
            title: "Test Video".to_string(),
            thumbnail_url: None,
            duration: 300,
            uploader: None,
            formats: qualities.iter().map(|q| VideoFormat::new(*q)).collect(),
        }
    }

    #[test]
    fn test_quality_selector() {
        let info = info_with_formats(&["720p", "360p"]);
        assert_eq!(QualitySelector::select(&info, Some("360p")).unwrap(), "360p");
        assert_eq!(QualitySelector::select(&info, None).unwrap(), "720p");
        assert!(matches!(
            QualitySelector::select(&info, Some("4k")),
            Err(DomainError::BadArgs(_))
        ));
    }

    #[test]
    fn test_quality_selector_without_formats() {
        let info = info_with_formats(&[]);
        assert_eq!(QualitySelector::select(&info, Some("best")).unwrap(), "best");
        assert!(QualitySelector::select(&info, None).is_err());
    }
}
