use crate::modules::catalog::domain::repositories::{OrderBy, RemoteQuery};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Curated anime lists that are cached as whole snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedList {
    LatestReleases,
    PopularAnimes,
    ReleasingAnimes,
    SeasonPopularAnimes,
    NextSeasonAnimes,
    HasThumbnail,
    AllAnimes,
}

impl NamedList {
    pub const ALL: [NamedList; 7] = [
        NamedList::LatestReleases,
        NamedList::PopularAnimes,
        NamedList::ReleasingAnimes,
        NamedList::SeasonPopularAnimes,
        NamedList::NextSeasonAnimes,
        NamedList::HasThumbnail,
        NamedList::AllAnimes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NamedList::LatestReleases => "latest_releases",
            NamedList::PopularAnimes => "popular_animes",
            NamedList::ReleasingAnimes => "releasing_animes",
            NamedList::SeasonPopularAnimes => "season_popular_animes",
            NamedList::NextSeasonAnimes => "next_season_animes",
            NamedList::HasThumbnail => "has_thumbnail",
            NamedList::AllAnimes => "all_animes",
        }
    }

    /// Boolean flag column on `animes` that selects members of this list
    pub fn flag_field(&self) -> Option<&'static str> {
        match self {
            NamedList::LatestReleases => Some("new_releases"),
            NamedList::PopularAnimes => Some("is_popular"),
            NamedList::ReleasingAnimes => Some("is_release"),
            NamedList::SeasonPopularAnimes => Some("is_popular_season"),
            NamedList::NextSeasonAnimes => Some("is_next_season"),
            NamedList::HasThumbnail => Some("is_thumbnail"),
            NamedList::AllAnimes => None,
        }
    }

    /// Remote query that produces this list
    pub fn query(&self) -> RemoteQuery {
        let mut query = RemoteQuery::new("animes");
        if let Some(field) = self.flag_field() {
            query = query.filter_eq(field, "true");
        }

        match self {
            NamedList::LatestReleases => query.order_by(OrderBy::desc("updated_at")).limit(10),
            NamedList::PopularAnimes => query.order_by(OrderBy::desc("score")).limit(10),
            NamedList::ReleasingAnimes => query.order_by(OrderBy::desc("updated_at")),
            NamedList::SeasonPopularAnimes => query.order_by(OrderBy::desc("score")),
            NamedList::NextSeasonAnimes | NamedList::HasThumbnail | NamedList::AllAnimes => query,
        }
    }
}

impl fmt::Display for NamedList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
