use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{auth, product},
    AppState,
};

pub fn router(state: AppState) -> Router {
    let product_collection = get(product::list).post(product::create);

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/token", post(auth::login))
        .route("/product/", product_collection.clone())
        .route("/product", product_collection)
        .route(
            "/product/:id",
            get(product::get)
                .put(product::update)
                .delete(product::delete),
        )
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
