use surrealdb::{
    Surreal,
    engine::any::{self, Any},
    opt::auth::Root,
};
use tracing::info;

use super::schema::ensure_schema;
use crate::infrastructure::config::DatabaseConfig;

pub type Database = Surreal<Any>;

pub async fn init_db(config: &DatabaseConfig) -> Result<Database, surrealdb::Error> {
    info!(url = %config.url, "connecting to SurrealDB");
    let db = any::connect(config.url.as_str()).await?;

    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        db.signin(Root {
            username: username.as_str(),
            password: password.as_str(),
        })
        .await?;
        info!("signed in to SurrealDB");
    }

    db.use_ns(config.namespace.as_str())
        .use_db(config.database.as_str())
        .await?;
    info!(
        namespace = %config.namespace,
        database = %config.database,
        "namespace and database selected"
    );

    ensure_schema(&db).await?;
    info!("schema ensured");

    Ok(db)
}
