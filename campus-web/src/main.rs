use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use campus_db::connection::create_connection_pool;
use campus_db::run_migrations;
use campus_db::store::{PgSchoolStore, PgUserStore};
use campus_web::config::Settings;
use campus_web::{configure_service, AppState};
use dotenv::dotenv;
use log::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env()?;
    let pool = create_connection_pool(&settings.database_url)?;
    run_migrations(&pool).map_err(|e| anyhow::anyhow!(e))?;

    let state = web::Data::new(AppState::new(
        PgSchoolStore::new(pool.clone()),
        PgUserStore::new(pool),
        &settings,
    ));

    info!("listening on {}", settings.bind_addr);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure_service)
    })
    .bind(&settings.bind_addr)?
    .run()
    .await?;

    Ok(())
}
