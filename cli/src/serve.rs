#![deny(missing_docs)]

//! # Serve Command
//!
//! Serves the generated document over HTTP with Actix Web.
//!
//! - `GET {jsonPath}` returns the document generated at startup.
//! - [`SwaggerMiddleware`] stores a [`SwaggerContext`] in every request's
//!   extensions, then hands the request on.
//! - `POST /_routedoc/regenerate` rebuilds the document with the options in
//!   the request body, through the context.

use crate::error::CliResult;
use crate::generate::SourceArgs;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, App, HttpMessage, HttpRequest, HttpResponse, HttpServer};
use routedoc_core::{generate, AppResult, DocOptions, Router};
use std::fmt;
use std::future::{ready, Ready};
use std::sync::Arc;

/// Path of the regeneration endpoint.
pub const REGENERATE_PATH: &str = "/_routedoc/regenerate";

/// Arguments for the serve command.
#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Input selection.
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Address to listen on.
    #[clap(long, env = "ROUTEDOC_BIND", default_value = "127.0.0.1:8080")]
    pub bind: String,
}

/// Rebuilds the document with different options.
pub type RegenerateFn = Arc<dyn Fn(&DocOptions) -> AppResult<String> + Send + Sync>;

/// The last generated document and a way to rebuild it.
#[derive(Clone)]
pub struct SwaggerContext {
    /// Serialized document.
    pub json: Arc<str>,
    regenerate: RegenerateFn,
}

impl SwaggerContext {
    /// Generates the document once and keeps the router for later rebuilds.
    pub fn new(router: Router, options: &DocOptions) -> AppResult<Self> {
        let json = generate(&router, options)?;
        let router = Arc::new(router);
        Ok(Self {
            json: json.into(),
            regenerate: Arc::new(move |options| generate(&router, options)),
        })
    }

    /// Generates the document again with `options`.
    pub fn regenerate(&self, options: &DocOptions) -> AppResult<String> {
        (self.regenerate)(options)
    }
}

impl fmt::Debug for SwaggerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwaggerContext")
            .field("json_len", &self.json.len())
            .finish_non_exhaustive()
    }
}

/// Middleware exposing a [`SwaggerContext`] to downstream handlers.
#[derive(Debug, Clone)]
pub struct SwaggerMiddleware {
    context: SwaggerContext,
}

impl SwaggerMiddleware {
    /// Wraps `context`.
    pub fn new(context: SwaggerContext) -> Self {
        Self { context }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SwaggerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Transform = SwaggerMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SwaggerMiddlewareService {
            service,
            context: self.context.clone(),
        }))
    }
}

/// Service produced by [`SwaggerMiddleware`].
pub struct SwaggerMiddlewareService<S> {
    service: S,
    context: SwaggerContext,
}

impl<S, B> Service<ServiceRequest> for SwaggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        req.extensions_mut().insert(self.context.clone());
        self.service.call(req)
    }
}

/// Registers the document endpoint and the regeneration endpoint.
pub fn configure(cfg: &mut web::ServiceConfig, context: &SwaggerContext, json_path: &str) {
    let json = context.json.clone();
    cfg.route(
        json_path,
        web::get().to(move || {
            let json = json.clone();
            async move {
                HttpResponse::Ok()
                    .content_type("application/json")
                    .body(json.to_string())
            }
        }),
    )
    .route(REGENERATE_PATH, web::post().to(regenerate));
}

async fn regenerate(req: HttpRequest, options: web::Json<DocOptions>) -> HttpResponse {
    let context = req.extensions().get::<SwaggerContext>().cloned();
    let Some(context) = context else {
        return HttpResponse::InternalServerError().body("swagger middleware not installed");
    };

    match context.regenerate(&options) {
        Ok(json) => HttpResponse::Ok().content_type("application/json").body(json),
        Err(e) => HttpResponse::BadRequest().body(e.to_string()),
    }
}

/// Executes the serve command.
pub async fn execute(args: &ServeArgs) -> CliResult<()> {
    let (router, options) = args.source.load()?;
    let json_path = options.json_path.clone();
    let context = SwaggerContext::new(router, &options)?;

    tracing::info!(bind = %args.bind, path = %json_path, "serving swagger document");

    HttpServer::new(move || {
        App::new()
            .wrap(SwaggerMiddleware::new(context.clone()))
            .configure(|cfg| configure(cfg, &context, &json_path))
    })
    .bind(&args.bind)?
    .run()
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use routedoc_core::Route;
    use serde_json::{json, Value};

    fn context() -> SwaggerContext {
        let router = Router::new()
            .route(Route::new("GET", "/pets/:id").swagger(json!({ "tags": ["pets"] })));
        SwaggerContext::new(router, &DocOptions::default()).unwrap()
    }

    async fn peek(req: HttpRequest) -> HttpResponse {
        match req.extensions().get::<SwaggerContext>() {
            Some(ctx) => HttpResponse::Ok().body(ctx.json.to_string()),
            None => HttpResponse::NotFound().finish(),
        }
    }

    #[actix_web::test]
    async fn test_json_route_serves_document() {
        let ctx = context();
        let app = test::init_service(
            App::new()
                .wrap(SwaggerMiddleware::new(ctx.clone()))
                .configure(|cfg| configure(cfg, &ctx, "/swagger.json")),
        )
        .await;

        let req = test::TestRequest::get().uri("/swagger.json").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["swagger"], "2.0");
        assert!(body["paths"]["/pets/{id}"]["get"].is_object());
    }

    #[actix_web::test]
    async fn test_middleware_exposes_context() {
        let ctx = context();
        let app = test::init_service(
            App::new()
                .wrap(SwaggerMiddleware::new(ctx.clone()))
                .route("/peek", web::get().to(peek)),
        )
        .await;

        let req = test::TestRequest::get().uri("/peek").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, ctx.json.as_bytes());
    }

    #[actix_web::test]
    async fn test_regenerate_with_new_options() {
        let ctx = context();
        let app = test::init_service(
            App::new()
                .wrap(SwaggerMiddleware::new(ctx.clone()))
                .configure(|cfg| configure(cfg, &ctx, "/swagger.json")),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(REGENERATE_PATH)
            .set_json(json!({ "basePath": "/v9", "prefix": "/api" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["basePath"], "/v9");
        assert!(body["paths"]["/api/pets/{id}"].is_object());
    }

    #[actix_web::test]
    async fn test_regenerate_without_middleware() {
        let ctx = context();
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, &ctx, "/doc.json")))
            .await;

        let req = test::TestRequest::post()
            .uri(REGENERATE_PATH)
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
