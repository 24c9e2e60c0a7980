mod common;

use chrono::{NaiveDate, Utc};
use lab_content::entities::{
    analysis::AnalysisDraft,
    category::CategoryDraft,
    content_block::{ContentBlockDraft, FaqItem, Text},
    homepage_category::{HomepageCategoryDraft, HomepageCategoryPatch},
    news::{NewsDraft, NewsPatch},
    review::ReviewDraft,
    submission::SubmissionDraft,
    Analysis, BlockKind, Category, ContentBlock, HomepageCategory, NewsCategory, NewsItem,
    Review, Submission,
};
use lab_content::store::{copy_collections, StoreError};
use lab_content::{ContentStore, Locale};
use regex::Regex;
use serde_json::json;
use tempfile::TempDir;

use common::{file_store, sql_store};

async fn backends() -> Vec<(&'static str, ContentStore, Option<TempDir>)> {
    let (files, dir) = file_store();
    vec![
        ("file", files, Some(dir)),
        ("sql", sql_store().await, None),
    ]
}

fn dated(title: &str, category: NewsCategory, day: u32, featured: bool) -> NewsDraft {
    NewsDraft {
        published_at: NaiveDate::from_ymd_opt(2024, 5, day),
        featured: Some(featured),
        ..NewsDraft::new(title, category)
    }
}

#[tokio::test]
async fn test_create_then_get() {
    for (name, store, _dir) in backends().await {
        let created = store
            .create::<NewsItem>(NewsDraft::new("Новая лаборатория", NewsCategory::News))
            .await
            .expect("Failed to create news");

        let fetched = store.get_by_id::<NewsItem>(&created.id).await;
        assert_eq!(fetched.as_ref(), Some(&created), "{name}");
        assert_eq!(store.list::<NewsItem>().await, vec![created], "{name}");
    }
}

#[tokio::test]
async fn test_news_translations_default_to_russian() {
    for (name, store, _dir) in backends().await {
        let before = Utc::now().date_naive();
        let news = store
            .create::<NewsItem>(NewsDraft::new("Тест", NewsCategory::News))
            .await
            .expect("Failed to create news");
        let after = Utc::now().date_naive();

        assert_eq!(news.title_kz.as_deref(), Some("Тест"), "{name}");
        assert_eq!(news.title_en.as_deref(), Some("Тест"), "{name}");
        assert_eq!(news.title_in(Locale::Kz), "Тест", "{name}");
        assert!(!news.featured, "{name}");
        assert!(news.published_at >= before && news.published_at <= after, "{name}");
        assert_eq!(news.slug, "test", "{name}");
    }
}

#[tokio::test]
async fn test_news_ids_and_slugs_are_unique() {
    for (name, store, _dir) in backends().await {
        let first = store
            .create::<NewsItem>(NewsDraft::new("Скидки", NewsCategory::Promotion))
            .await
            .expect("Failed to create news");
        let second = store
            .create::<NewsItem>(NewsDraft::new("Скидки", NewsCategory::Promotion))
            .await
            .expect("Failed to create news");

        assert_eq!(first.id, "1", "{name}");
        assert_eq!(second.id, "2", "{name}");
        assert_eq!(first.slug, "skidki", "{name}");
        assert_eq!(second.slug, "skidki-2", "{name}");
        assert!(store.news_by_slug("skidki-2").await.is_some(), "{name}");
    }
}

#[tokio::test]
async fn test_update_keeps_id_and_untouched_fields() {
    for (name, store, _dir) in backends().await {
        let news = store
            .create::<NewsItem>(NewsDraft {
                excerpt: "Коротко".into(),
                ..NewsDraft::new("Старый заголовок", NewsCategory::Article)
            })
            .await
            .expect("Failed to create news");

        let patch = NewsPatch {
            title: Some("Новый заголовок".into()),
            ..Default::default()
        };
        let updated = store
            .update::<NewsItem>(&news.id, patch)
            .await
            .expect("Failed to update news")
            .expect("News should exist");

        assert_eq!(updated.id, news.id, "{name}");
        assert_eq!(updated.title, "Новый заголовок", "{name}");
        assert_eq!(updated.excerpt, "Коротко", "{name}");
        assert_eq!(updated.slug, news.slug, "{name}");
        assert_eq!(store.get_by_id::<NewsItem>(&news.id).await, Some(updated), "{name}");

        let missing = store
            .update::<NewsItem>("404", NewsPatch::default())
            .await
            .expect("Failed to update news");
        assert!(missing.is_none(), "{name}");
    }
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    for (name, store, _dir) in backends().await {
        let review = store
            .create::<Review>(ReviewDraft::new("Айгуль", "Быстро и удобно", 5))
            .await
            .expect("Failed to create review");

        assert!(store.delete::<Review>(&review.id).await.expect("delete"), "{name}");
        assert!(!store.delete::<Review>(&review.id).await.expect("delete"), "{name}");
        assert!(store.get_by_id::<Review>(&review.id).await.is_none(), "{name}");
        assert!(store.list::<Review>().await.is_empty(), "{name}");
    }
}

#[tokio::test]
async fn test_featured_news_is_newest_first_and_limited() {
    for (name, store, _dir) in backends().await {
        for (title, category, day, featured) in [
            ("Первая", NewsCategory::News, 1, true),
            ("Вторая", NewsCategory::News, 9, true),
            ("Третья", NewsCategory::News, 5, true),
            ("Четвертая", NewsCategory::News, 7, true),
            ("Не на главной", NewsCategory::News, 20, false),
            ("Акция", NewsCategory::Promotion, 21, true),
        ] {
            store
                .create::<NewsItem>(dated(title, category, day, featured))
                .await
                .expect("Failed to create news");
        }

        let featured = store.featured_news(3).await;
        let titles: Vec<&str> = featured.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Вторая", "Четвертая", "Третья"], "{name}");

        let promotions = store.promotions(3).await;
        assert_eq!(promotions.len(), 1, "{name}");
        assert_eq!(promotions[0].title, "Акция", "{name}");
    }
}

#[tokio::test]
async fn test_reviews_listed_by_order() {
    for (name, store, _dir) in backends().await {
        for (author, order, homepage) in [("Б", 2, true), ("А", 0, false), ("В", 1, true)] {
            store
                .create::<Review>(ReviewDraft {
                    order,
                    show_on_homepage: homepage,
                    ..ReviewDraft::new(author, "Спасибо", 4)
                })
                .await
                .expect("Failed to create review");
        }

        let orders: Vec<i32> = store.list::<Review>().await.iter().map(|r| r.order).collect();
        assert_eq!(orders, vec![0, 1, 2], "{name}");

        let homepage: Vec<String> = store
            .homepage_reviews()
            .await
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(homepage, vec!["В", "Б"], "{name}");
    }
}

#[tokio::test]
async fn test_equal_orders_keep_insertion_order() {
    for (name, store, _dir) in backends().await {
        for (author, order) in [("А", 1), ("Б", 0), ("В", 1), ("Г", 0)] {
            store
                .create::<Review>(ReviewDraft {
                    order,
                    ..ReviewDraft::new(author, "Спасибо", 5)
                })
                .await
                .expect("Failed to create review");
        }
        for (title, order) in [("Анализы", 2), ("Чекапы", 2), ("УЗИ", 1), ("Прививки", 2)] {
            store
                .create::<HomepageCategory>(HomepageCategoryDraft {
                    name: title.into(),
                    order,
                    ..Default::default()
                })
                .await
                .expect("Failed to create category");
        }

        let reviews: Vec<String> = store
            .list::<Review>()
            .await
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(reviews, vec!["Б", "Г", "А", "В"], "{name}");

        let categories: Vec<String> = store
            .list::<HomepageCategory>()
            .await
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(categories, vec!["УЗИ", "Анализы", "Чекапы", "Прививки"], "{name}");
    }
}

#[tokio::test]
async fn test_submission_ids_and_timestamps() {
    let id_format = Regex::new(r"^sub_\d+_[a-z0-9]{6}$").unwrap();

    for (name, store, _dir) in backends().await {
        let start = Utc::now().timestamp_millis();
        let first = store
            .create::<Submission>(SubmissionDraft::contact("Ерлан", "+7 701 000 00 00"))
            .await
            .expect("Failed to create submission");
        let second = store
            .create::<Submission>(SubmissionDraft::booking("Дана", "+77010000001", "3"))
            .await
            .expect("Failed to create submission");

        assert!(id_format.is_match(&first.id), "{name}: {}", first.id);
        assert!(id_format.is_match(&second.id), "{name}: {}", second.id);
        assert_ne!(first.id, second.id, "{name}");
        assert!(first.created_at.timestamp_millis() >= start, "{name}");

        let listed: Vec<String> = store
            .list::<Submission>()
            .await
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(listed.len(), 2, "{name}");
        assert_eq!(listed[0], second.id, "{name}");
    }
}

#[tokio::test]
async fn test_only_one_featured_homepage_category() {
    for (name, store, _dir) in backends().await {
        let first = store
            .create::<HomepageCategory>(HomepageCategoryDraft {
                name: "Анализы".into(),
                featured: true,
                ..Default::default()
            })
            .await
            .expect("Failed to create category");
        let second = store
            .create::<HomepageCategory>(HomepageCategoryDraft {
                name: "Чекапы".into(),
                featured: true,
                order: 1,
                ..Default::default()
            })
            .await
            .expect("Failed to create category");

        let featured: Vec<HomepageCategory> = store
            .list::<HomepageCategory>()
            .await
            .into_iter()
            .filter(|c| c.featured)
            .collect();
        assert_eq!(featured.len(), 1, "{name}");
        assert_eq!(featured[0].id, second.id, "{name}");

        store
            .update::<HomepageCategory>(
                &first.id,
                HomepageCategoryPatch {
                    featured: Some(true),
                    ..Default::default()
                },
            )
            .await
            .expect("Failed to update category");
        let current = store.featured_homepage_category().await;
        assert_eq!(current.map(|c| c.id), Some(first.id.clone()), "{name}");
    }
}

#[tokio::test]
async fn test_analysis_view_falls_back_to_category_id() {
    for (name, store, _dir) in backends().await {
        let category = store
            .create::<Category>(CategoryDraft {
                name: "Гематология".into(),
                name_kz: Some("Гематология".into()),
                name_en: Some("Hematology".into()),
                slug: None,
            })
            .await
            .expect("Failed to create category");
        let known = store
            .create::<Analysis>(AnalysisDraft::new("Анализ крови", &category.id, 2500))
            .await
            .expect("Failed to create analysis");
        let orphan = store
            .create::<Analysis>(AnalysisDraft::new("Ферритин", "99", 4100))
            .await
            .expect("Failed to create analysis");

        let categories = store.list::<Category>().await;
        assert_eq!(known.slug, "analiz-krovi", "{name}");
        assert_eq!(known.view(Locale::En, &categories).category_name, "Hematology", "{name}");
        assert_eq!(orphan.view(Locale::Ru, &categories).category_name, "99", "{name}");
        assert_eq!(store.analyses_by_category(&category.id).await, vec![known], "{name}");
    }
}

#[tokio::test]
async fn test_content_blocks_per_page() {
    for (name, store, _dir) in backends().await {
        let faq = BlockKind::Faq {
            items: vec![FaqItem {
                question: Text::new("Нужно ли голодать?"),
                answer: Text {
                    en: Some("Yes, 8 hours.".into()),
                    ..Text::new("Да, 8 часов.")
                },
            }],
        };
        let block = store
            .create::<ContentBlock>(ContentBlockDraft {
                page: "faq".into(),
                order: 0,
                block: faq.clone(),
            })
            .await
            .expect("Failed to create block");

        let blocks = store.content_blocks_for_page("faq").await;
        assert_eq!(blocks, vec![block], "{name}");
        assert_eq!(blocks[0].block, faq, "{name}");
        assert!(store.content_blocks_for_page("about").await.is_empty(), "{name}");
    }
}

#[tokio::test]
async fn test_malformed_collection_reads_empty_but_rejects_writes() {
    let (store, dir) = file_store();
    let path = dir.path().join("news.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(store.list::<NewsItem>().await.is_empty());
    assert!(store.get_by_id::<NewsItem>("1").await.is_none());

    let result = store
        .create::<NewsItem>(NewsDraft::new("Тест", NewsCategory::News))
        .await;
    assert!(matches!(result, Err(StoreError::Malformed { .. })));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_file_writes_all_succeed() {
    let (store, dir) = file_store();

    for round in 0..10 {
        let mut tasks = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store
                    .create::<Submission>(SubmissionDraft::contact(
                        format!("Гость {round}-{i}"),
                        "+77010000000",
                    ))
                    .await
            }));
        }
        for task in tasks {
            let result = task.await.expect("Task panicked");
            assert!(result.is_ok(), "round {round}: {:?}", result.err());
        }
    }

    assert!(!store.list::<Submission>().await.is_empty());
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_sequential_id_after_largest_possible_id() {
    let (store, dir) = file_store();
    let seeded = json!([{
        "id": u64::MAX.to_string(),
        "slug": "staraya",
        "title": "Старая",
        "excerpt": "",
        "content": "",
        "image": "",
        "category": "news",
        "publishedAt": "2024-01-01",
        "featured": false
    }]);
    std::fs::write(dir.path().join("news.json"), seeded.to_string()).unwrap();

    let news = store
        .create::<NewsItem>(NewsDraft::new("Новая", NewsCategory::News))
        .await
        .expect("Failed to create news");
    assert_eq!(news.id, "1");
    assert_eq!(store.list::<NewsItem>().await.len(), 2);
}

#[tokio::test]
async fn test_missing_collection_is_empty() {
    let (store, _dir) = file_store();
    assert!(store.list::<Analysis>().await.is_empty());
    assert!(!store.delete::<Analysis>("1").await.expect("delete"));
}

#[tokio::test]
async fn test_copy_collections_into_sql() {
    let (files, _dir) = file_store();
    let news = files
        .create::<NewsItem>(NewsDraft::new("Открытие", NewsCategory::News))
        .await
        .expect("Failed to create news");
    files
        .create::<Submission>(SubmissionDraft::contact("Ерлан", "+77010000000"))
        .await
        .expect("Failed to create submission");
    files
        .create::<Submission>(SubmissionDraft::contact("Дана", "+77010000001"))
        .await
        .expect("Failed to create submission");

    let sql = sql_store().await;
    let copied = copy_collections(files.backend(), sql.backend())
        .await
        .expect("Failed to copy collections");
    assert_eq!(copied, 3);
    assert_eq!(sql.list::<NewsItem>().await, vec![news]);
    assert_eq!(sql.list::<Submission>().await, files.list::<Submission>().await);

    let again = copy_collections(files.backend(), sql.backend())
        .await
        .expect("Failed to copy collections");
    assert_eq!(again, 0);
}
