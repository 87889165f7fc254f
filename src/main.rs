use actix_web::{App, HttpServer, middleware, web};
use actix_cors::Cors;
use verilog_runner::api::{configure_routes, AppState};
use verilog_runner::{banner, config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Print the startup banner
    banner::print_banner();

    // A missing .env is fine; everything has a default
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("ℹ️  No .env file loaded ({}), using process environment", e);
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let app_config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    log::info!(
        "Compiler: {:?}, simulator: {:?}, timeout: {:?}",
        app_config.compiler,
        app_config.simulator,
        app_config.process_timeout
    );

    let bind_addr = app_config.bind_addr();
    let state = AppState::new(app_config);

    println!("🚀 Starting server...");
    println!("📝 Editor available at http://{}:{}/ui", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}
