mod common;

use chrono::NaiveDate;
use lab_content::entities::{
    analysis::AnalysisDraft,
    category::CategoryDraft,
    homepage_category::HomepageCategoryDraft,
    news::NewsDraft,
    Analysis, Category, HomepageCategory, NewsCategory, NewsItem, Submission,
};
use lab_content::ContentStore;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use common::{file_store, spawn_app, sql_store};

async fn seeded(store: &ContentStore) {
    store
        .create::<NewsItem>(NewsDraft {
            title_en: Some("Lab opening".into()),
            published_at: NaiveDate::from_ymd_opt(2024, 6, 1),
            featured: Some(true),
            ..NewsDraft::new("Открытие лаборатории", NewsCategory::News)
        })
        .await
        .expect("Failed to create news");
    store
        .create::<NewsItem>(NewsDraft {
            published_at: NaiveDate::from_ymd_opt(2024, 6, 3),
            ..NewsDraft::new("Скидка 20%", NewsCategory::Promotion)
        })
        .await
        .expect("Failed to create news");

    let category = store
        .create::<Category>(CategoryDraft {
            name: "Биохимия".into(),
            name_kz: None,
            name_en: Some("Biochemistry".into()),
            slug: None,
        })
        .await
        .expect("Failed to create category");
    store
        .create::<Analysis>(AnalysisDraft::new("Глюкоза", &category.id, 1200))
        .await
        .expect("Failed to create analysis");
}

#[tokio::test]
async fn test_news_listing_is_localized() {
    let (store, _dir) = file_store();
    seeded(&store).await;
    let base = spawn_app(store).await;
    let client = Client::new();

    let response = client
        .get(format!("{base}/news?locale=en"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response
        .json::<Vec<Value>>()
        .await
        .expect("Failed to parse response JSON");

    assert_eq!(body.len(), 2);
    assert_eq!(body[0]["title"], "Скидка 20%");
    assert_eq!(body[1]["title"], "Lab opening");
    assert_eq!(body[1]["publishedAt"], "2024-06-01");

    let response = client
        .get(format!("{base}/news?category=promotion&locale=zz"))
        .send()
        .await
        .expect("Failed to send request");
    let body = response.json::<Vec<Value>>().await.unwrap();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["category"], "promotion");
}

#[tokio::test]
async fn test_featured_news_and_slug_lookup() {
    let (store, _dir) = file_store();
    seeded(&store).await;
    let base = spawn_app(store).await;
    let client = Client::new();

    let body = client
        .get(format!("{base}/news/featured"))
        .send()
        .await
        .expect("Failed to send request")
        .json::<Vec<Value>>()
        .await
        .expect("Failed to parse response JSON");
    assert_eq!(body.len(), 1);
    let slug = body[0]["slug"].as_str().unwrap().to_string();
    assert_eq!(slug, "otkrytie-laboratorii");

    let response = client
        .get(format!("{base}/news/{slug}?locale=kz"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let item = response.json::<Value>().await.unwrap();
    assert_eq!(item["title"], "Открытие лаборатории");

    let response = client
        .get(format!("{base}/news/no-such-news"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_analyses_carry_category_name() {
    let store = sql_store().await;
    seeded(&store).await;
    let base = spawn_app(store).await;
    let client = Client::new();

    let body = client
        .get(format!("{base}/analyses?categoryId=1&locale=en"))
        .send()
        .await
        .expect("Failed to send request")
        .json::<Vec<Value>>()
        .await
        .expect("Failed to parse response JSON");
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["categoryName"], "Biochemistry");
    assert_eq!(body[0]["price"], 1200);

    let response = client
        .get(format!("{base}/analyses/glyukoza"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let analysis = response.json::<Value>().await.unwrap();
    assert_eq!(analysis["categoryName"], "Биохимия");

    let body = client
        .get(format!("{base}/analyses?categoryId=7"))
        .send()
        .await
        .expect("Failed to send request")
        .json::<Vec<Value>>()
        .await
        .unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_featured_homepage_category() {
    let (store, _dir) = file_store();
    let base = spawn_app(store.clone()).await;
    let client = Client::new();

    let response = client
        .get(format!("{base}/homepage-categories/featured"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    store
        .create::<HomepageCategory>(HomepageCategoryDraft {
            name: "Чекапы".into(),
            tags: vec!["кровь".into(), "гормоны".into()],
            tags_en: vec!["blood".into(), "hormones".into()],
            featured: true,
            ..Default::default()
        })
        .await
        .expect("Failed to create category");

    let response = client
        .get(format!("{base}/homepage-categories/featured?locale=en"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let category = response.json::<Value>().await.unwrap();
    assert_eq!(category["name"], "Чекапы");
    assert_eq!(category["tags"], json!(["blood", "hormones"]));
}

#[tokio::test]
async fn test_contact_submission() {
    let (store, _dir) = file_store();
    let base = spawn_app(store.clone()).await;
    let client = Client::new();

    let response = client
        .post(format!("{base}/submissions/contact"))
        .json(&json!({
            "firstName": "Ерлан",
            "phone": "+7 701 123 45 67",
            "message": "Перезвоните, пожалуйста"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["type"], "contact");
    assert!(body["id"].as_str().unwrap().starts_with("sub_"));

    assert_eq!(store.list::<Submission>().await.len(), 1);
}

#[tokio::test]
async fn test_submission_validation() {
    let (store, _dir) = file_store();
    let base = spawn_app(store.clone()).await;
    let client = Client::new();

    let response = client
        .post(format!("{base}/submissions/contact"))
        .json(&json!({
            "firstName": "",
            "phone": "call me"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>().await.unwrap();
    assert!(body["fields"].get("phone").is_some());
    assert!(body["fields"].get("first_name").is_some());

    let response = client
        .post(format!("{base}/submissions/booking"))
        .json(&json!({
            "firstName": "Дана",
            "phone": "+77010000000"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(store.list::<Submission>().await.is_empty());
}

#[tokio::test]
async fn test_booking_fills_analysis_name() {
    let (store, _dir) = file_store();
    seeded(&store).await;
    let analysis_id = store.list::<Analysis>().await[0].id.clone();
    let base = spawn_app(store).await;
    let client = Client::new();

    let response = client
        .post(format!("{base}/submissions/booking"))
        .json(&json!({
            "type": "contact",
            "firstName": "Дана",
            "phone": "+77010000000",
            "analysisId": analysis_id,
            "preferredDate": "2024-07-01"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["type"], "booking");
    assert_eq!(body["analysisName"], "Глюкоза");
    assert_eq!(body["preferredDate"], "2024-07-01");
}
