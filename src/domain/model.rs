use axum::body::Bytes;
use std::fmt;

/// Every route the proxy exposes. Each one mirrors exactly one upstream
/// endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    CalendarEvents,
    DateConversion,
    MonthCalendar,
    Vegetables,
    Metals,
    Rashifal,
    Forex,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::CalendarEvents,
        Route::DateConversion,
        Route::MonthCalendar,
        Route::Vegetables,
        Route::Metals,
        Route::Rashifal,
        Route::Forex,
    ];

    /// Path below the configured base path.
    pub fn local_path(self) -> &'static str {
        match self {
            Route::CalendarEvents => "/calendar",
            Route::DateConversion => "/calendar/convert",
            Route::MonthCalendar => "/calendar/month",
            Route::Vegetables => "/vegetables",
            Route::Metals => "/metals",
            Route::Rashifal => "/rashifal",
            Route::Forex => "/forex",
        }
    }

    /// Path relative to the upstream base URL. Trailing slashes are part of
    /// the upstream contract and must be kept.
    pub fn upstream_path(self) -> &'static str {
        match self {
            Route::CalendarEvents => "calendar/",
            Route::DateConversion => "calendar/convert",
            Route::MonthCalendar => "detailed-calendar/",
            Route::Vegetables => "vegetables/",
            Route::Metals => "metals/",
            Route::Rashifal => "rashifal/",
            Route::Forex => "forex",
        }
    }

    /// Query parameters sent upstream, in the order they are appended.
    pub fn forwarded_params(self) -> &'static [&'static str] {
        match self {
            Route::CalendarEvents => &["year_bs", "start_date_bs", "end_date_bs"],
            Route::DateConversion => &["from", "date"],
            Route::MonthCalendar => &["year", "month_name"],
            Route::Vegetables | Route::Metals => &[],
            Route::Rashifal => &["date"],
            Route::Forex => &["from", "to", "page", "per_page"],
        }
    }

    /// The only thing a caller ever learns about an upstream failure.
    pub fn failure_message(self) -> &'static str {
        match self {
            Route::CalendarEvents => "Failed to fetch calendar events",
            Route::DateConversion => "Failed to convert date",
            Route::MonthCalendar => "Failed to fetch month calendar",
            Route::Vegetables => "Failed to fetch vegetable prices",
            Route::Metals => "Failed to fetch metal prices",
            Route::Rashifal => "Failed to fetch rashifal",
            Route::Forex => "Failed to fetch forex rates",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Route::CalendarEvents => "calendar_events",
            Route::DateConversion => "date_conversion",
            Route::MonthCalendar => "month_calendar",
            Route::Vegetables => "vegetables",
            Route::Metals => "metals",
            Route::Rashifal => "rashifal",
            Route::Forex => "forex",
        };
        f.write_str(name)
    }
}

/// Decoded query string, in the order the caller sent it. Repeated names
/// are kept; lookups take the first occurrence.
pub type QueryPairs = [(String, String)];

fn first(pairs: &QueryPairs, name: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}

#[derive(Debug, Clone, Default)]
pub struct CalendarEventsQuery {
    pub year_bs: Option<String>,
    pub start_date_bs: Option<String>,
    pub end_date_bs: Option<String>,
}

impl CalendarEventsQuery {
    pub fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            year_bs: first(pairs, "year_bs"),
            start_date_bs: first(pairs, "start_date_bs"),
            end_date_bs: first(pairs, "end_date_bs"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DateConversionQuery {
    pub from: Option<String>,
    pub date: Option<String>,
}

impl DateConversionQuery {
    pub fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            from: first(pairs, "from"),
            date: first(pairs, "date"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MonthCalendarQuery {
    pub year: Option<String>,
    pub month: Option<String>,
}

impl MonthCalendarQuery {
    pub fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            year: first(pairs, "year"),
            month: first(pairs, "month"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RashifalQuery {
    pub date: Option<String>,
}

impl RashifalQuery {
    pub fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            date: first(pairs, "date"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForexQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl ForexQuery {
    pub fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            from: first(pairs, "from"),
            to: first(pairs, "to"),
            page: first(pairs, "page"),
            per_page: first(pairs, "per_page"),
        }
    }
}

/// One outbound call: which route it serves and the query it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub route: Route,
    pub params: Vec<(String, String)>,
}

impl UpstreamRequest {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            params: Vec::new(),
        }
    }

    /// Appends `name=value` when a value was supplied; absent values are not
    /// sent at all.
    pub fn with_param(mut self, name: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.params.push((name.to_string(), value.to_string()));
        }
        self
    }

    pub fn path(&self) -> &'static str {
        self.route.upstream_path()
    }
}

/// Raw upstream payload, relayed without re-encoding.
#[derive(Debug, Clone)]
pub struct UpstreamBody {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}
