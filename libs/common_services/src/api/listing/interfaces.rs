use crate::photos_client::{
    DateFilter, MediaTypeFilter, RemoteDate, RemoteDateRange, RemoteMediaItem, SearchFilters,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Query string of the photo listing endpoint. Filter fields mirror the
/// search form; the rest is pager plumbing that must never influence the
/// filter hash.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoListingQuery {
    pub user_id: i64,
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
    #[serde(default)]
    pub is_range: bool,
    #[serde(default)]
    pub date_year: Option<i32>,
    #[serde(default)]
    pub date_month: Option<u32>,
    #[serde(default)]
    pub date_day: Option<u32>,
}

impl PhotoListingQuery {
    /// The filter fields as a JSON map, shaped the way the pager hashes
    /// them: the three date-part fields collapse into one `date_list` value.
    #[must_use]
    pub fn filters_value(&self) -> Value {
        let mut map = Map::new();
        if let Some(v) = &self.date_from {
            map.insert("date_from".into(), json!(v));
        }
        if let Some(v) = &self.date_to {
            map.insert("date_to".into(), json!(v));
        }
        if self.is_range {
            map.insert("is_range".into(), json!(true));
        }

        let mut date_list = Map::new();
        if let Some(year) = self.date_year {
            date_list.insert("year".into(), json!(year));
        }
        if let Some(month) = self.date_month {
            date_list.insert("month".into(), json!(month));
        }
        if let Some(day) = self.date_day {
            date_list.insert("day".into(), json!(day));
        }
        if !date_list.is_empty() {
            map.insert("date_list".into(), Value::Object(date_list));
        }

        Value::Object(map)
    }

    /// Builds the remote search filters: photos only, restricted by either
    /// a date range or a partial date, matching the form's two filter modes.
    #[must_use]
    pub fn to_search_filters(&self) -> SearchFilters {
        let date_filter = if self.is_range {
            let start_date = self
                .date_from
                .as_deref()
                .and_then(parse_remote_date)
                .unwrap_or_default();
            let today = Utc::now().date_naive();
            let end_date = self
                .date_to
                .as_deref()
                .and_then(parse_remote_date)
                .unwrap_or(RemoteDate {
                    year: today.year(),
                    month: today.month(),
                    day: today.day(),
                });
            Some(DateFilter {
                dates: vec![],
                ranges: vec![RemoteDateRange {
                    start_date,
                    end_date,
                }],
            })
        } else if self.date_year.is_some() || self.date_month.is_some() || self.date_day.is_some()
        {
            Some(DateFilter {
                dates: vec![RemoteDate {
                    year: self.date_year.unwrap_or(0),
                    month: self.date_month.unwrap_or(0),
                    day: self.date_day.unwrap_or(0),
                }],
                ranges: vec![],
            })
        } else {
            None
        };

        SearchFilters {
            media_type_filter: MediaTypeFilter {
                media_types: vec!["PHOTO".to_owned()],
            },
            date_filter,
        }
    }
}

fn parse_remote_date(raw: &str) -> Option<RemoteDate> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(RemoteDate {
        year: date.year(),
        month: date.month(),
        day: date.day(),
    })
}

#[derive(Debug, Serialize)]
pub struct PhotoListingPage {
    pub items: Vec<PhotoSummary>,
    pub next_page_token: String,
    pub prev_page_token: String,
}

#[derive(Debug, Serialize)]
pub struct PhotoSummary {
    pub id: String,
    pub base_url: String,
    pub filename: Option<String>,
    pub description: Option<String>,
    pub creation_time: String,
}

impl From<&RemoteMediaItem> for PhotoSummary {
    fn from(item: &RemoteMediaItem) -> Self {
        Self {
            id: item.id.clone(),
            base_url: item.base_url.clone(),
            filename: item.filename.clone(),
            description: item.description.clone(),
            creation_time: item.media_metadata.creation_time.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumListingQuery {
    pub user_id: i64,
    #[serde(default)]
    pub page_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AlbumListingPage {
    pub items: Vec<AlbumSummary>,
    pub next_page_token: String,
}

#[derive(Debug, Serialize)]
pub struct AlbumSummary {
    pub id: String,
    pub title: String,
    pub cover_url: Option<String>,
    pub media_count: i64,
}
