use kart_ranker::import::{import_catalog, CatalogFile};
use kart_ranker::model::NamedBuild;
use kart_ranker::query::Query;
use kart_ranker::rank::rank;
use kart_ranker::select::{Algorithm, SelectOptions};
use kart_ranker::store::{CatalogStore, MemoryCatalog, SqliteCatalog};
use kart_ranker::Error;

const CATALOG: &str = r#"
drivers:
  - id: 1
    names: [Speedy]
    size: small
    stats: { ground_speed: 2.0, acceleration: 3.0 }
  - id: 2
    names: [Heavy, Heavier]
    size: large
    stats: { ground_speed: 5.0, acceleration: 1.0 }
vehicles:
  - id: 0
    names: [Standard Kart]
tyres:
  - id: 0
    names: [Standard]
gliders:
  - id: 0
    names: [Super Glider]
"#;

async fn run<S: CatalogStore>(store: &S, algorithm: Algorithm, pairs: &[&str]) -> Vec<NamedBuild> {
    let mut query = Query::new();
    query.apply_all(pairs).unwrap();
    let options = SelectOptions {
        seed: Some(11),
        ..SelectOptions::default()
    };
    rank(store, &query, algorithm, &options).await.unwrap()
}

fn drivers(builds: &[NamedBuild]) -> Vec<&str> {
    builds.iter().map(|b| b.driver[0].as_str()).collect()
}

async fn sqlite_catalog() -> SqliteCatalog {
    let catalog = CatalogFile::from_yaml(CATALOG).unwrap();
    let mut store = SqliteCatalog::connect_in_memory().await.unwrap();
    assert_eq!(import_catalog(&mut store, &catalog).await.unwrap(), 2);
    store
}

#[tokio::test]
async fn test_min_filter_keeps_fast_build() {
    let store = sqlite_catalog().await;
    let result = run(&store, Algorithm::TopK, &["min_ground_speed=3"]).await;
    assert_eq!(drivers(&result), vec!["Heavy"]);
    assert_eq!(result[0].driver, vec!["Heavy", "Heavier"]);
    assert_eq!(result[0].vehicle, vec!["Standard Kart"]);
}

#[tokio::test]
async fn test_skyline_keeps_incomparable_builds() {
    let store = sqlite_catalog().await;
    let result = run(
        &store,
        Algorithm::Skyline,
        &["rank_ground_speed=1", "rank_acceleration=1"],
    )
    .await;
    assert_eq!(drivers(&result), vec!["Speedy", "Heavy"]);
}

#[tokio::test]
async fn test_skyline_single_attribute_keeps_best() {
    let store = sqlite_catalog().await;
    let result = run(&store, Algorithm::Skyline, &["rank_acceleration=1"]).await;
    assert_eq!(drivers(&result), vec!["Speedy"]);
}

#[tokio::test]
async fn test_weighted_sort_and_limit() {
    let store = sqlite_catalog().await;
    let result = run(
        &store,
        Algorithm::TopK,
        &["weight_ground_speed=1", "weight_acceleration=2", "sort_score=-1", "limit=1"],
    )
    .await;
    // Speedy: 2 + 2 * 3 = 8, Heavy: 5 + 2 * 1 = 7
    assert_eq!(drivers(&result), vec!["Speedy"]);
    assert_eq!(result[0].score, 8.0);
}

#[tokio::test]
async fn test_medrank_and_kmeans_run_end_to_end() {
    let store = sqlite_catalog().await;
    let ranked = ["rank_ground_speed=1", "rank_acceleration=1"];

    let medrank = run(&store, Algorithm::Medrank, &ranked).await;
    assert_eq!(medrank.len(), 2);

    let kmeans = run(&store, Algorithm::KMeans, &["rank_ground_speed=1", "limit=2"]).await;
    assert_eq!(kmeans.len(), 2);
}

#[tokio::test]
async fn test_sqlite_and_memory_rank_identically() {
    let catalog = CatalogFile::from_yaml(CATALOG).unwrap();
    let sqlite = sqlite_catalog().await;
    let mut memory = MemoryCatalog::new();
    import_catalog(&mut memory, &catalog).await.unwrap();

    let pairs = ["weight_ground_speed=1", "weight_acceleration=1", "sort_score_dev=1"];
    assert_eq!(
        run(&sqlite, Algorithm::TopK, &pairs).await,
        run(&memory, Algorithm::TopK, &pairs).await
    );
}

#[tokio::test]
async fn test_bad_directive_fails_before_storage() {
    let mut query = Query::new();
    let err = query
        .apply_all(["min_ground_speed=3", "weight_top_speed=1"])
        .unwrap_err();
    assert!(matches!(err, Error::UnknownAttribute { .. }));
    assert!(query.storage_filters().is_empty());
}
