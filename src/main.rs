use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use geo_velocity::{
    AppState,
    config::Config,
    create_router,
    geo::TravelSpeedService,
    session::{InMemorySessionStore, RedisSessionStore, SessionRecord, SessionStore},
    utils::init_logger,
};
use tokio::sync::Notify;

#[tokio::main]
async fn main() {
    // 初始化日志
    init_logger();

    // 加载配置
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // 设置会话存储
    let store = match build_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to set up session store: {}", e);
            std::process::exit(1);
        }
    };

    let service = TravelSpeedService::new(store, config.service_defaults());
    let state = AppState::new(config.clone(), service);
    let app = create_router(state);

    // 启动服务器
    let addr = config.listen_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        %addr,
        default_unit = %config.default_unit,
        default_max_speed = config.default_max_speed,
        "starting server"
    );

    let shutdown = Arc::new(Notify::new());
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown({
        let shutdown = shutdown.clone();
        async move {
            shutdown_signal().await;
            tracing::info!("shutting down server...");
            shutdown.notify_one();
        }
    });

    let grace = config.shutdown_timeout();
    tokio::select! {
        result = server.into_future() => {
            if let Err(e) = result {
                tracing::error!("server failed: {}", e);
                std::process::exit(1);
            }
        }
        _ = forced_shutdown(shutdown, grace) => {
            tracing::error!("server forced to shutdown after {:?}", grace);
            std::process::exit(1);
        }
    }

    tracing::info!("server exited");
}

async fn build_store(
    config: &Config,
) -> Result<Arc<dyn SessionStore>, geo_velocity::error::StoreError> {
    let now = Utc::now();
    let demo = SessionRecord::demo(now);

    match &config.redis_url {
        Some(url) => {
            let store = RedisSessionStore::open(url)?;
            if config.seed_demo_session {
                let ttl = demo
                    .remaining_ttl(now)
                    .map(|d| d.num_seconds().max(1) as u64)
                    .unwrap_or(1);
                store.put_session(&demo, ttl).await?;
                tracing::info!("Seeded demo session {} in redis", demo.id);
            }
            Ok(Arc::new(store))
        }
        None => {
            let store = InMemorySessionStore::new();
            if config.seed_demo_session {
                store.insert(demo)?;
                tracing::info!("Seeded demo session in memory");
            }
            Ok(Arc::new(store))
        }
    }
}

// 收到关闭信号后等待宽限期，超时则强制退出
async fn forced_shutdown(shutdown: Arc<Notify>, grace: Duration) {
    shutdown.notified().await;
    tokio::time::sleep(grace).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
