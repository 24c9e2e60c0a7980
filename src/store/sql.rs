use sea_orm::sea_query::{Expr, Order};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Schema,
};
use std::time::Duration;
use tracing::info;

use crate::entities::{
    analysis, category, content_block, homepage_category, homepage_service, news, review,
    submission, Record,
};
use crate::store::StoreError;

/// One table per collection, snake_case columns. Missing translations are
/// stored as `NULL`.
#[derive(Clone, Debug)]
pub struct SqlBackend {
    db: DatabaseConnection,
}

impl SqlBackend {
    pub async fn connect(url: &str, max_connections: u32) -> Result<SqlBackend, StoreError> {
        let mut options = ConnectOptions::new(url.to_owned());
        options
            .max_connections(max_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let db = Database::connect(options).await?;
        info!(url = %url, "Connected to content database");
        Ok(SqlBackend { db })
    }

    /// Creates the collection tables that do not exist yet.
    pub async fn setup_schema(&self) -> Result<(), StoreError> {
        let backend = self.db.get_database_backend();
        let schema = Schema::new(backend);

        let mut statements = vec![
            schema.create_table_from_entity(news::Entity),
            schema.create_table_from_entity(analysis::Entity),
            schema.create_table_from_entity(category::Entity),
            schema.create_table_from_entity(review::Entity),
            schema.create_table_from_entity(homepage_category::Entity),
            schema.create_table_from_entity(homepage_service::Entity),
            schema.create_table_from_entity(content_block::Entity),
            schema.create_table_from_entity(submission::Entity),
        ];

        for statement in statements.iter_mut() {
            statement.if_not_exists();
            self.db.execute(backend.build(&*statement)).await?;
        }
        Ok(())
    }

    /// Rows in the same order the file collection keeps them: insertion order
    /// (sqlite `rowid`), or newest insertion first for prepend kinds.
    pub async fn load<T: Record>(&self) -> Result<Vec<T>, StoreError> {
        let order = if T::PREPEND { Order::Desc } else { Order::Asc };
        Ok(T::Entity::find()
            .order_by(Expr::cust("rowid"), order)
            .all(&self.db)
            .await?)
    }

    pub async fn find<T: Record>(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(T::Entity::find()
            .filter(T::id_column().eq(id))
            .one(&self.db)
            .await?)
    }

    pub async fn insert<T: Record>(&self, record: &T) -> Result<(), StoreError> {
        T::Entity::insert(active_model(record)).exec(&self.db).await?;
        Ok(())
    }

    pub async fn replace<T: Record>(&self, record: &T) -> Result<bool, StoreError> {
        let result = T::Entity::update_many()
            .set(active_model(record))
            .filter(T::id_column().eq(record.id()))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn remove<T: Record>(&self, id: &str) -> Result<bool, StoreError> {
        let result = T::Entity::delete_many()
            .filter(T::id_column().eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

// Every column marked as set, so the same value works for insert and update.
fn active_model<T: Record>(record: &T) -> T::ActiveModel {
    T::ActiveModel::from(record.clone()).reset_all()
}
