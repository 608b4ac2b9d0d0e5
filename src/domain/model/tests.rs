// Unit tests for domain models

#[cfg(test)]
mod tests {
    use crate::domain::model::*;

    #[test]
    fn test_time_selection_from_seconds() {
        assert_eq!(TimeSelection::from_seconds(125), TimeSelection::new(0, 2, 5));
        assert_eq!(TimeSelection::from_seconds(3661), TimeSelection::new(1, 1, 1));
        assert_eq!(TimeSelection::from_seconds(0), TimeSelection::default());
    }

    #[test]
    fn test_time_selection_to_seconds() {
        assert_eq!(TimeSelection::new(1, 2, 3).to_seconds(), 3723);
        assert_eq!(TimeSelection::new(0, 59, 59).to_seconds(), 3599);
    }

    #[test]
    fn test_time_selection_display() {
        assert_eq!(TimeSelection::new(0, 2, 5).to_string(), "00:02:05");
        assert_eq!(TimeSelection::new(12, 0, 9).to_string(), "12:00:09");
    }

    #[test]
    fn test_time_selection_parse() {
        assert_eq!(TimeSelection::parse("00:02:00").unwrap(), TimeSelection::new(0, 2, 0));
        assert_eq!(TimeSelection::parse("2:05").unwrap(), TimeSelection::new(0, 2, 5));
        assert_eq!(TimeSelection::parse("125").unwrap(), TimeSelection::new(0, 2, 5));
        assert_eq!(TimeSelection::parse(" 1:00:00 ").unwrap(), TimeSelection::new(1, 0, 0));
        assert_eq!(TimeSelection::parse("90:30").unwrap(), TimeSelection::new(1, 30, 30));
    }

    #[test]
    fn test_time_selection_parse_invalid() {
        assert!(TimeSelection::parse("invalid").is_err());
        assert!(TimeSelection::parse("00:60").is_err());
        assert!(TimeSelection::parse("01:60:00").is_err());
        assert!(TimeSelection::parse("1:2:3:4").is_err());
        assert!(TimeSelection::parse("-10").is_err());
    }

    #[test]
    fn test_time_selection_clamp_fields() {
        let wild = TimeSelection::new(9, 75, 60);
        assert_eq!(wild.clamp_fields(2), TimeSelection::new(2, 59, 59));
    }

    #[test]
    fn test_time_selection_with_field() {
        let selection = TimeSelection::new(0, 1, 2)
            .with_field(TimeField::Hour, 3)
            .with_field(TimeField::Second, 7);
        assert_eq!(selection, TimeSelection::new(3, 1, 7));
    }

    #[test]
    fn test_max_hour_rounds_up() {
        assert_eq!(max_hour_for(0), 0);
        assert_eq!(max_hour_for(125), 1);
        assert_eq!(max_hour_for(3600), 1);
        assert_eq!(max_hour_for(3601), 2);
    }

    #[test]
    fn test_clip_interval_validate() {
        assert!(ClipInterval::new(10, 20).validate().is_ok());
        assert!(ClipInterval::new(20, 20).validate().is_err());
        assert!(ClipInterval::new(30, 20).validate().is_err());
        assert_eq!(ClipInterval::new(30, 20).length(), 0);
    }

    #[test]
    fn test_clip_interval_display() {
        assert_eq!(ClipInterval::new(0, 125).to_string(), "0:00 - 2:05");
    }

    #[test]
    fn test_video_format_label() {
        let mut format = VideoFormat::new("720p");
        assert_eq!(format.label(), "720p");

        format.filesize_bytes = Some(12_897_485);
        assert_eq!(format.label(), "720p (approx. 12.3 MB)");
    }

    #[test]
    fn test_video_format_matches_quality_or_id() {
        let format = VideoFormat {
            format_id: Some("22".to_string()),
            ..VideoFormat::new("720p")
        };
        assert!(format.matches("720p"));
        assert!(format.matches("22"));
        assert!(!format.matches("1080p"));
    }

    #[test]
    fn test_estimated_clip_size_scales_with_length() {
        let format = VideoFormat {
            filesize_bytes: Some(1_000_000),
            ..VideoFormat::new("360p")
        };
        let interval = ClipInterval::new(0, 25);
        assert_eq!(format.estimated_clip_size(100, &interval), Some(250_000));
        assert_eq!(format.estimated_clip_size(0, &interval), None);
        assert_eq!(VideoFormat::new("360p").estimated_clip_size(100, &interval), None);
    }

    #[test]
    fn test_task_status_terminal() {
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::Processing.is_terminal());
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
    }
}
