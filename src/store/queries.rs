use crate::entities::{
    Analysis, ContentBlock, HomepageCategory, NewsCategory, NewsItem, Review,
};
use crate::store::ContentStore;

impl ContentStore {
    pub async fn news_by_slug(&self, slug: &str) -> Option<NewsItem> {
        self.list::<NewsItem>()
            .await
            .into_iter()
            .find(|n| n.slug == slug)
    }

    /// Featured items of the `news` category, newest first.
    pub async fn featured_news(&self, limit: usize) -> Vec<NewsItem> {
        self.newest_news(limit, |n| n.featured && n.category == NewsCategory::News)
            .await
    }

    /// Promotions, newest first.
    pub async fn promotions(&self, limit: usize) -> Vec<NewsItem> {
        self.newest_news(limit, |n| n.category == NewsCategory::Promotion)
            .await
    }

    async fn newest_news<F>(&self, limit: usize, keep: F) -> Vec<NewsItem>
    where
        F: Fn(&NewsItem) -> bool,
    {
        let mut items: Vec<NewsItem> = self
            .list::<NewsItem>()
            .await
            .into_iter()
            .filter(|n| keep(n))
            .collect();
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        items.truncate(limit);
        items
    }

    pub async fn analysis_by_slug(&self, slug: &str) -> Option<Analysis> {
        self.list::<Analysis>()
            .await
            .into_iter()
            .find(|a| a.slug == slug)
    }

    pub async fn analyses_by_category(&self, category_id: &str) -> Vec<Analysis> {
        self.list::<Analysis>()
            .await
            .into_iter()
            .filter(|a| a.category_id == category_id)
            .collect()
    }

    /// Reviews flagged for the homepage, in `order`.
    pub async fn homepage_reviews(&self) -> Vec<Review> {
        self.list::<Review>()
            .await
            .into_iter()
            .filter(|r| r.show_on_homepage)
            .collect()
    }

    pub async fn featured_homepage_category(&self) -> Option<HomepageCategory> {
        self.list::<HomepageCategory>()
            .await
            .into_iter()
            .find(|c| c.featured)
    }

    pub async fn content_blocks_for_page(&self, page: &str) -> Vec<ContentBlock> {
        self.list::<ContentBlock>()
            .await
            .into_iter()
            .filter(|b| b.page == page)
            .collect()
    }
}
