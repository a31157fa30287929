use crate::domain::calendar::month_name_from_param;
use crate::domain::model::{
    CalendarEventsQuery, DateConversionQuery, ForexQuery, MonthCalendarQuery, RashifalQuery, Route,
    UpstreamRequest,
};

// Values go upstream exactly as the browser sent them. The month number is
// the only parameter rewritten here.

pub fn calendar_events(query: &CalendarEventsQuery) -> UpstreamRequest {
    UpstreamRequest::new(Route::CalendarEvents)
        .with_param("year_bs", query.year_bs.as_deref())
        .with_param("start_date_bs", query.start_date_bs.as_deref())
        .with_param("end_date_bs", query.end_date_bs.as_deref())
}

pub fn date_conversion(query: &DateConversionQuery) -> UpstreamRequest {
    UpstreamRequest::new(Route::DateConversion)
        .with_param("from", query.from.as_deref())
        .with_param("date", query.date.as_deref())
}

pub fn month_calendar(query: &MonthCalendarQuery) -> UpstreamRequest {
    UpstreamRequest::new(Route::MonthCalendar)
        .with_param("year", query.year.as_deref())
        .with_param("month_name", Some(month_name_from_param(query.month.as_deref())))
}

pub fn vegetables() -> UpstreamRequest {
    UpstreamRequest::new(Route::Vegetables)
}

pub fn metals() -> UpstreamRequest {
    UpstreamRequest::new(Route::Metals)
}

pub fn rashifal(query: &RashifalQuery) -> UpstreamRequest {
    UpstreamRequest::new(Route::Rashifal).with_param("date", query.date.as_deref())
}

pub fn forex(query: &ForexQuery) -> UpstreamRequest {
    UpstreamRequest::new(Route::Forex)
        .with_param("from", query.from.as_deref())
        .with_param("to", query.to.as_deref())
        .with_param("page", query.page.as_deref())
        .with_param("per_page", query.per_page.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(request: &UpstreamRequest) -> Vec<(&str, &str)> {
        request
            .params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_calendar_events_by_year() {
        let query = CalendarEventsQuery {
            year_bs: Some("2081".to_string()),
            ..Default::default()
        };

        let request = calendar_events(&query);

        assert_eq!(request.route, Route::CalendarEvents);
        assert_eq!(pairs(&request), vec![("year_bs", "2081")]);
    }

    #[test]
    fn test_calendar_events_by_range() {
        let query = CalendarEventsQuery {
            year_bs: None,
            start_date_bs: Some("2081-01-01".to_string()),
            end_date_bs: Some("2081-01-30".to_string()),
        };

        let request = calendar_events(&query);

        assert_eq!(
            pairs(&request),
            vec![("start_date_bs", "2081-01-01"), ("end_date_bs", "2081-01-30")]
        );
    }

    #[test]
    fn test_date_conversion_passes_values_untouched() {
        let query = DateConversionQuery {
            from: Some("bs".to_string()),
            date: Some(" 2081-13-45 ".to_string()),
        };

        let request = date_conversion(&query);

        assert_eq!(pairs(&request), vec![("from", "bs"), ("date", " 2081-13-45 ")]);
    }

    #[test]
    fn test_month_calendar_maps_month_number_to_name() {
        let query = MonthCalendarQuery {
            year: Some("2081".to_string()),
            month: Some("4".to_string()),
        };

        let request = month_calendar(&query);

        assert_eq!(request.route.upstream_path(), "detailed-calendar/");
        assert_eq!(pairs(&request), vec![("year", "2081"), ("month_name", "Shrawan")]);
    }

    #[test]
    fn test_month_calendar_defaults_bad_month_and_keeps_bad_year() {
        let query = MonthCalendarQuery {
            year: Some("twenty".to_string()),
            month: Some("0".to_string()),
        };

        let request = month_calendar(&query);

        assert_eq!(pairs(&request), vec![("year", "twenty"), ("month_name", "Baisakh")]);
    }

    #[test]
    fn test_month_calendar_always_sends_month_name() {
        let request = month_calendar(&MonthCalendarQuery::default());
        assert_eq!(pairs(&request), vec![("month_name", "Baisakh")]);
    }

    #[test]
    fn test_parameterless_routes() {
        assert!(vegetables().params.is_empty());
        assert!(metals().params.is_empty());
        assert_eq!(vegetables().path(), "vegetables/");
        assert_eq!(metals().path(), "metals/");
    }

    #[test]
    fn test_rashifal_date_is_optional() {
        assert!(rashifal(&RashifalQuery::default()).params.is_empty());

        let dated = rashifal(&RashifalQuery {
            date: Some("2081-05-10".to_string()),
        });
        assert_eq!(pairs(&dated), vec![("date", "2081-05-10")]);
    }

    #[test]
    fn test_forex_forwards_paging_in_order() {
        let query = ForexQuery {
            from: Some("2024-01-01".to_string()),
            to: Some("2024-01-07".to_string()),
            page: Some("1".to_string()),
            per_page: Some("100".to_string()),
        };

        let request = forex(&query);

        assert_eq!(
            pairs(&request),
            vec![
                ("from", "2024-01-01"),
                ("to", "2024-01-07"),
                ("page", "1"),
                ("per_page", "100"),
            ]
        );
    }

    #[test]
    fn test_forwarded_names_match_route_table() {
        let full_forex = forex(&ForexQuery {
            from: Some("a".into()),
            to: Some("b".into()),
            page: Some("c".into()),
            per_page: Some("d".into()),
        });
        let names: Vec<&str> = full_forex.params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, Route::Forex.forwarded_params());

        let full_calendar = calendar_events(&CalendarEventsQuery {
            year_bs: Some("a".into()),
            start_date_bs: Some("b".into()),
            end_date_bs: Some("c".into()),
        });
        let names: Vec<&str> = full_calendar.params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, Route::CalendarEvents.forwarded_params());
    }
}
