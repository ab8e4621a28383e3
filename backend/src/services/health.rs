use actix_web::web::{get, resource};
use actix_web::{HttpResponse, Resource, Responder};

const API_PATH: &str = "/api/health";

pub fn configure_routes() -> Resource {
    resource(API_PATH).route(get().to(process))
}

async fn process() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "healthy" }))
}
