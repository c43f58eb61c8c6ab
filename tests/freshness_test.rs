mod utils;

use anime_catalog::{CatalogService, FreshnessPolicy, NamedList};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::advance;
use utils::factories::AnimeFactory;
use utils::fake_store::FakeRemoteStore;
use utils::helpers::{build_service, counters, test_config};

fn popular_store() -> FakeRemoteStore {
    FakeRemoteStore::new()
        .with_list(
            NamedList::PopularAnimes,
            vec![AnimeFactory::new("1").popular().with_score(9.1).build()],
        )
        .with_list(
            NamedList::LatestReleases,
            vec![AnimeFactory::new("2").new_release().build()],
        )
}

#[tokio::test(start_paused = true)]
async fn list_is_served_inside_window_and_refetched_after() {
    let (service, store) = build_service(popular_store());

    service.get_popular_animes().await.unwrap();
    assert_eq!(store.calls(), 1);

    advance(Duration::from_secs(4 * 60)).await;
    service.get_popular_animes().await.unwrap();
    assert_eq!(store.calls(), 1);
    assert_eq!(counters(&service), (1, 1, 1));

    advance(Duration::from_secs(2 * 60)).await;
    service.get_popular_animes().await.unwrap();
    assert_eq!(store.calls(), 2);
    assert_eq!(counters(&service), (1, 2, 2));
}

#[tokio::test(start_paused = true)]
async fn window_starts_when_rows_arrive() {
    let (service, store) = build_service(popular_store().with_delay(Duration::from_secs(2)));

    // Takes 2s to answer
    service.get_popular_animes().await.unwrap();

    // 5m1s after the request went out, 4m59s after the rows came back
    advance(Duration::from_secs(299)).await;
    service.get_popular_animes().await.unwrap();
    assert_eq!(store.calls(), 1);

    advance(Duration::from_secs(2)).await;
    service.get_popular_animes().await.unwrap();
    assert_eq!(store.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn lists_expire_independently() {
    let (service, store) = build_service(popular_store());

    service.get_popular_animes().await.unwrap();
    advance(Duration::from_secs(4 * 60)).await;
    service.get_latest_releases().await.unwrap();
    assert_eq!(store.calls(), 2);

    // Popular is now 6 minutes old, latest only 2
    advance(Duration::from_secs(2 * 60)).await;
    service.get_latest_releases().await.unwrap();
    assert_eq!(store.calls(), 2);
    service.get_popular_animes().await.unwrap();
    assert_eq!(store.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn empty_list_is_always_refetched() {
    let (service, store) = build_service(FakeRemoteStore::new());

    assert!(service.get_next_season_animes().await.unwrap().is_empty());
    assert!(service.get_next_season_animes().await.unwrap().is_empty());

    assert_eq!(store.calls(), 2);
    assert_eq!(counters(&service), (0, 2, 2));
}

#[tokio::test(start_paused = true)]
async fn entities_never_expire() {
    let (service, store) = build_service(popular_store());

    service.get_popular_animes().await.unwrap();
    advance(Duration::from_secs(24 * 60 * 60)).await;

    // The list is stale but the anime it populated is still served
    assert!(service.get_anime_by_id("1").await.unwrap().is_some());
    assert_eq!(store.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn per_list_window_override() {
    let store = Arc::new(popular_store());
    let service = CatalogService::new(store.clone(), &test_config()).with_freshness(
        FreshnessPolicy::new(Duration::from_secs(300))
            .with_window(NamedList::PopularAnimes, Duration::from_secs(30)),
    );

    service.get_popular_animes().await.unwrap();
    service.get_latest_releases().await.unwrap();
    advance(Duration::from_secs(60)).await;

    service.get_popular_animes().await.unwrap();
    service.get_latest_releases().await.unwrap();
    assert_eq!(store.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn refetch_replaces_list_contents() {
    let (service, store) = build_service(popular_store());

    let first = service.get_popular_animes().await.unwrap();
    assert_eq!(first[0].id, "1");

    store.set_rows(
        &NamedList::PopularAnimes.query().to_string(),
        vec![AnimeFactory::new("3").popular().build()],
    );
    advance(Duration::from_secs(301)).await;

    let second = service.get_popular_animes().await.unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id, "3");
    // Entities from the earlier fetch stay cached
    assert!(service.cache().get_entity::<anime_catalog::Anime>("1").is_some());
}
